use clap::Parser;
use covid_core::Envelope;
use std::path::PathBuf;

use crate::config::{self, Network};

/// Covid Server - поиск по датасету covid-статистики по региону или дате.
#[derive(Parser, Debug, Clone)]
#[command(name = "covid-server", version, about)]
pub(crate) struct Args {
    /// Сетевой протокол
    #[arg(short = 'n', long, value_enum, default_value_t = Network::Tcp)]
    pub(crate) network: Network,

    /// Адрес сервиса: HOST:PORT или :PORT для tcp, путь к сокету для unix
    #[arg(short = 'e', long, default_value = config::DEFAULT_ENDPOINT)]
    pub(crate) endpoint: String,

    /// CSV с данными (7 полей в строке, без заголовка)
    #[arg(short = 'd', long, default_value = config::DEFAULT_DATASET_PATH)]
    pub(crate) dataset: PathBuf,

    /// Отдавать валидный JSON (без `,` после последней записи)
    #[arg(long)]
    pub(crate) strict_json: bool,
}

impl Args {
    pub(crate) fn envelope(&self) -> Envelope {
        if self.strict_json {
            Envelope::Strict
        } else {
            Envelope::Legacy
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["covid-server"]).unwrap();
        assert_eq!(args.network, Network::Tcp);
        assert_eq!(args.endpoint, ":4040");
        assert_eq!(args.dataset, PathBuf::from("covid_final_data.csv"));
        assert_eq!(args.envelope(), Envelope::Legacy);
    }

    #[test]
    fn short_flags() {
        let args = Args::try_parse_from([
            "covid-server",
            "-n",
            "unix",
            "-e",
            "/tmp/covid.sock",
            "-d",
            "data.csv",
            "--strict-json",
        ])
        .unwrap();
        assert_eq!(args.network, Network::Unix);
        assert_eq!(args.endpoint, "/tmp/covid.sock");
        assert_eq!(args.dataset, PathBuf::from("data.csv"));
        assert_eq!(args.envelope(), Envelope::Strict);
    }

    #[test]
    fn unsupported_network_is_rejected() {
        assert!(Args::try_parse_from(["covid-server", "-n", "udp"]).is_err());
    }
}
