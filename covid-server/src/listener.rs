use crate::config::{ACCEPT_TICK, Network, resolve_tcp_addr};
use crate::session::run_session;
use anyhow::Context;
use covid_core::{Envelope, RecordStore};
use log::{info, warn};
use std::io::{self, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, atomic::AtomicBool, atomic::Ordering};
use std::thread;

#[cfg(unix)]
use std::os::unix::net::{UnixListener, UnixStream};
#[cfg(unix)]
use std::path::PathBuf;

/// Слушающий сокет: TCP или unix
pub(crate) enum Listener {
    Tcp(TcpListener),
    #[cfg(unix)]
    Unix(UnixListener, PathBuf),
}

/// Принятое соединение
pub(crate) enum Connection {
    Tcp(TcpStream),
    #[cfg(unix)]
    Unix(UnixStream),
}

impl Listener {
    pub(crate) fn bind(network: Network, endpoint: &str) -> anyhow::Result<Self> {
        match network {
            Network::Tcp | Network::Tcp4 | Network::Tcp6 => {
                let addr = resolve_tcp_addr(network, endpoint)?;
                let l = TcpListener::bind(addr)
                    .with_context(|| format!("bind TCP listener {addr}"))?;
                Ok(Listener::Tcp(l))
            }
            #[cfg(unix)]
            Network::Unix => {
                let l = UnixListener::bind(endpoint)
                    .with_context(|| format!("bind unix listener {endpoint}"))?;
                Ok(Listener::Unix(l, PathBuf::from(endpoint)))
            }
            #[cfg(not(unix))]
            Network::Unix => anyhow::bail!("unix sockets are not supported on this platform"),
        }
    }

    /// Фактический адрес (для `:0` - с выбранным портом)
    pub(crate) fn local_addr(&self) -> String {
        match self {
            Listener::Tcp(l) => l
                .local_addr()
                .map(|a| a.to_string())
                .unwrap_or_else(|_| "?".to_string()),
            #[cfg(unix)]
            Listener::Unix(_, path) => path.display().to_string(),
        }
    }

    fn set_nonblocking(&self, nonblocking: bool) -> io::Result<()> {
        match self {
            Listener::Tcp(l) => l.set_nonblocking(nonblocking),
            #[cfg(unix)]
            Listener::Unix(l, _) => l.set_nonblocking(nonblocking),
        }
    }

    /// Принять соединение; второй элемент - адрес клиента для логов
    fn accept(&self) -> io::Result<(Connection, String)> {
        match self {
            Listener::Tcp(l) => {
                let (stream, addr) = l.accept()?;
                stream.set_nonblocking(false)?;
                stream.set_nodelay(true).ok();
                Ok((Connection::Tcp(stream), addr.to_string()))
            }
            #[cfg(unix)]
            Listener::Unix(l, path) => {
                let (stream, _addr) = l.accept()?;
                stream.set_nonblocking(false)?;
                Ok((Connection::Unix(stream), format!("unix:{}", path.display())))
            }
        }
    }
}

#[cfg(unix)]
impl Drop for Listener {
    fn drop(&mut self) {
        // unix-сокет оставляет файл, повторный bind на нём упадёт
        if let Listener::Unix(_, path) = self {
            if let Err(e) = std::fs::remove_file(&*path) {
                warn!("failed to remove socket file {}: {e}", path.display());
            }
        }
    }
}

impl Read for Connection {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Connection::Tcp(s) => s.read(buf),
            #[cfg(unix)]
            Connection::Unix(s) => s.read(buf),
        }
    }
}

impl Write for Connection {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Connection::Tcp(s) => s.write(buf),
            #[cfg(unix)]
            Connection::Unix(s) => s.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Connection::Tcp(s) => s.flush(),
            #[cfg(unix)]
            Connection::Unix(s) => s.flush(),
        }
    }
}

// accept loop: поток на каждое соединение
pub(crate) fn run_listener(
    listener: Listener,
    store: Arc<RecordStore>,
    envelope: Envelope,
    shutdown: Arc<AtomicBool>,
) -> anyhow::Result<()> {
    listener
        .set_nonblocking(true)
        .context("listener.set_nonblocking(true)")?;
    let mut session_handles = Vec::new();

    loop {
        reap_finished_sessions(&mut session_handles);

        if shutdown.load(Ordering::Relaxed) {
            info!("shutting down listener");
            break;
        }

        match listener.accept() {
            Ok((mut conn, peer)) => {
                info!("Connected to {peer}");

                let store = store.clone();
                let h = thread::spawn(move || {
                    let served = run_session(&mut conn, &peer, &store, envelope);
                    info!("session {peer} finished after {served} requests");
                });
                session_handles.push(h);
            }
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => {
                // нет новых соединений прямо сейчас
                thread::sleep(ACCEPT_TICK);
            }
            Err(e) => {
                warn!("accept error: {e}");
                thread::sleep(ACCEPT_TICK);
            }
        }
    }

    // у сессий нет таймаута, join может зависнуть на блокирующем read.
    // Оставшиеся потоки умрут вместе с процессом.
    if !session_handles.is_empty() {
        info!("{} sessions still open at shutdown", session_handles.len());
    }

    Ok(())
}

fn reap_finished_sessions(handles: &mut Vec<thread::JoinHandle<()>>) {
    let mut i = 0;
    while i < handles.len() {
        if handles[i].is_finished() {
            let h = handles.swap_remove(i);
            if let Err(panic) = h.join() {
                warn!("session thread panicked: {:?}", panic);
            }
        } else {
            i += 1;
        }
    }
}
