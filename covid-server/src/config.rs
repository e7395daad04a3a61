use std::fmt;
use std::io;
use std::net::{SocketAddr, ToSocketAddrs};
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use clap::ValueEnum;
use covid_core::RecordStore;
use covid_core::date::STORED_DATE_SEP;
use log::{info, warn};
use thiserror::Error;

pub(crate) use covid_core::DEFAULT_DATASET_PATH;

pub(crate) const DEFAULT_ENDPOINT: &str = ":4040";

/// Пауза accept-цикла, когда новых соединений нет
pub(crate) const ACCEPT_TICK: Duration = Duration::from_millis(50);

/// Поддерживаемые типы сокетов
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum Network {
    /// TCP, IPv4 или IPv6 - что вернёт резолвер первым
    Tcp,
    /// только IPv4
    Tcp4,
    /// только IPv6
    Tcp6,
    /// Unix domain socket, endpoint - путь к файлу сокета
    Unix,
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Network::Tcp => "tcp",
            Network::Tcp4 => "tcp4",
            Network::Tcp6 => "tcp6",
            Network::Unix => "unix",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Error)]
pub(crate) enum BindError {
    #[error("failed to resolve endpoint {endpoint:?}")]
    Resolve {
        endpoint: String,
        #[source]
        source: io::Error,
    },

    #[error("no {network} address for endpoint {endpoint:?}")]
    NoAddress { network: Network, endpoint: String },

    #[error("network {0} is not a tcp network")]
    NotTcp(Network),
}

/// Адрес для TCP-листенера.
///
/// `:PORT` означает "все интерфейсы" нужного семейства.
pub(crate) fn resolve_tcp_addr(network: Network, endpoint: &str) -> Result<SocketAddr, BindError> {
    let endpoint_full = match (network, endpoint.strip_prefix(':')) {
        (Network::Tcp6, Some(port)) => format!("[::]:{port}"),
        (_, Some(port)) => format!("0.0.0.0:{port}"),
        (_, None) => endpoint.to_string(),
    };

    let wanted: fn(&SocketAddr) -> bool = match network {
        Network::Tcp => |_| true,
        Network::Tcp4 => SocketAddr::is_ipv4,
        Network::Tcp6 => SocketAddr::is_ipv6,
        Network::Unix => return Err(BindError::NotTcp(network)),
    };

    let mut addrs = endpoint_full
        .to_socket_addrs()
        .map_err(|source| BindError::Resolve {
            endpoint: endpoint.to_string(),
            source,
        })?;

    addrs.find(wanted).ok_or_else(|| BindError::NoAddress {
        network,
        endpoint: endpoint.to_string(),
    })
}

/// Загрузка датасета. Любая ошибка - фатальна для старта сервера.
pub(crate) fn load_store(path: &Path) -> anyhow::Result<RecordStore> {
    let store = covid_core::dataset::load_records_from_path(path)
        .with_context(|| format!("failed to load dataset {}", path.display()))?;

    info!("loaded {} records from {}", store.len(), path.display());

    // даты в датасете ожидаются как DD/MM/YYYY, иначе поиск по дате молча ничего не найдёт
    let odd_dates = store
        .iter()
        .filter(|r| !r.date.contains(STORED_DATE_SEP))
        .count();
    if odd_dates > 0 {
        warn!("{odd_dates} records have a date without '{STORED_DATE_SEP}'; date queries will not match them");
    }

    Ok(store)
}
