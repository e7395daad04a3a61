use anyhow::{Result, bail};
use clap::{ArgGroup, Parser, ValueEnum};
use covid_core::Predicate;
use covid_core::date::query_date_key;

/// Транспорт до сервера
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum Transport {
    Tcp,
    Unix,
}

/// Covid Client - один запрос к covid-server по региону или по дате.
#[derive(Parser, Debug, Clone)]
#[command(name = "covid-client", version, about)]
#[command(
    group(
        ArgGroup::new("query")
            .required(true)
            .args(["region", "date"])
    )
)]
pub(crate) struct Args {
    /// Тип сокета
    #[arg(long, value_enum, default_value_t = Transport::Tcp)]
    pub(crate) network: Transport,

    /// Адрес сервера: HOST:PORT для tcp, путь к сокету для unix
    #[arg(long, default_value = "127.0.0.1:4040")]
    pub(crate) server: String,

    /// Регион, например Sindh. Нельзя вместе с --date
    #[arg(long, conflicts_with = "date")]
    pub(crate) region: Option<String>,

    /// Дата в формате YYYY-MM-DD. Нельзя вместе с --region
    #[arg(long, conflicts_with = "region")]
    pub(crate) date: Option<String>,
}

impl Args {
    /// Проверки, которые clap сам не делает
    pub(crate) fn validate(&self) -> Result<()> {
        if self.server.trim().is_empty() {
            bail!("--server is empty");
        }
        if self.network == Transport::Tcp && !self.server.contains(':') {
            bail!("--server must look like HOST:PORT (got: {})", self.server);
        }

        let (_, value) = self.query();
        // сервер режет запрос по пробелам, значение с пробелом не пройдёт
        if value.contains(' ') {
            bail!("query value must not contain spaces (got: {value:?})");
        }
        if let Some(date) = &self.date {
            if query_date_key(date).is_none() {
                bail!("--date must look like YYYY-MM-DD (got: {date})");
            }
        }

        Ok(())
    }

    pub(crate) fn query(&self) -> (Predicate, &str) {
        match (&self.region, &self.date) {
            (Some(region), _) => (Predicate::Region, region.as_str()),
            (None, Some(date)) => (Predicate::Date, date.as_str()),
            // ArgGroup гарантирует одно из двух
            (None, None) => (Predicate::Region, ""),
        }
    }
}
