//! Точка входа `covid-server`.
//!
//! Жизненный цикл:
//! - парсинг CLI
//! - загрузка датасета (любая ошибка - выход до старта сервера)
//! - bind на tcp/tcp4/tcp6/unix
//! - accept-цикл, по потоку на клиента
//! - остановка приёма соединений по `Ctrl+C`

mod cli;
mod config;
mod listener;
mod session;

use std::sync::{Arc, atomic::AtomicBool, atomic::Ordering};

use clap::Parser;
use log::info;

fn main() -> anyhow::Result<()> {
    // Логи через RUST_LOG=info/debug
    env_logger::init();

    let shutdown = Arc::new(AtomicBool::new(false));

    // Ctrl+C => ставим shutdown=true
    {
        let shutdown = shutdown.clone();
        ctrlc::set_handler(move || {
            shutdown.store(true, Ordering::Relaxed);
            info!("shutting down...");
        })?;
    }

    let args = cli::Args::parse();

    let store = Arc::new(config::load_store(&args.dataset)?);

    let listener = listener::Listener::bind(args.network, &args.endpoint)?;

    info!("**** Covid Lookup Service ****");
    info!(
        "Service started: ({}) {}",
        args.network,
        listener.local_addr()
    );

    listener::run_listener(listener, store, args.envelope(), shutdown)
}
