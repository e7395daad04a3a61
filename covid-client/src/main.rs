//! Точка входа `covid-client`.
//!
//! Одно соединение - один запрос:
//! - парсинг CLI
//! - подключение по tcp или unix-сокету
//! - приветствие сервера, запрос, ответ в stdout

mod cli;
mod query;

use clap::Parser;
use log::info;

fn main() -> anyhow::Result<()> {
    // Логи через RUST_LOG=info/debug
    env_logger::init();

    let args = cli::Args::parse();
    args.validate()?;

    let (predicate, value) = args.query();
    info!(
        "Starting covid-client: server={}, {}={}",
        args.server,
        predicate.name(),
        value
    );

    let stream = query::connect(args.network, &args.server)?;
    let reply = query::run_query(stream, predicate, value)?;

    print!("{reply}");
    Ok(())
}
