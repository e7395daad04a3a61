use anyhow::{Context, bail};
use covid_core::protocol::format_request;
use covid_core::{INVALID_COMMAND, NOTHING_FOUND, Predicate};
use log::debug;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpStream;
use std::time::Duration;

use crate::cli::Transport;

const READ_TIMEOUT_S: u64 = 5;
const WRITE_TIMEOUT_S: u64 = 5;

const USAGE_LINE_PREFIX: &str = "Usage:";
const RESPONSE_OPEN: &str = "{\"response\": [";
const RESPONSE_CLOSE: &str = "]}";

pub(crate) trait Stream: Read + Write {}
impl<T: Read + Write> Stream for T {}

pub(crate) fn connect(transport: Transport, server: &str) -> anyhow::Result<Box<dyn Stream>> {
    match transport {
        Transport::Tcp => {
            let stream =
                TcpStream::connect(server).with_context(|| format!("connect to {server}"))?;
            stream.set_nodelay(true).ok();
            stream
                .set_read_timeout(Some(Duration::from_secs(READ_TIMEOUT_S)))
                .ok();
            stream
                .set_write_timeout(Some(Duration::from_secs(WRITE_TIMEOUT_S)))
                .ok();
            Ok(Box::new(stream))
        }
        #[cfg(unix)]
        Transport::Unix => {
            let stream = std::os::unix::net::UnixStream::connect(server)
                .with_context(|| format!("connect to {server}"))?;
            stream
                .set_read_timeout(Some(Duration::from_secs(READ_TIMEOUT_S)))
                .ok();
            Ok(Box::new(stream))
        }
        #[cfg(not(unix))]
        Transport::Unix => bail!("unix sockets are not supported on this platform"),
    }
}

/// Ждёт приветствие, отправляет запрос и возвращает текст ответа.
///
/// `Invalid command` от сервера - ошибка.
pub(crate) fn run_query<S: Read + Write>(
    stream: S,
    predicate: Predicate,
    value: &str,
) -> anyhow::Result<String> {
    let mut reader = BufReader::new(stream);

    let greeting = read_until(&mut reader, |l| l.starts_with(USAGE_LINE_PREFIX))
        .context("waiting for server greeting")?;
    debug!("greeting: {greeting:?}");

    let request = format_request(predicate, value);
    let stream = reader.get_mut();
    stream.write_all(request.as_bytes())?;
    stream.flush()?;

    let first = read_line(&mut reader)?;

    if first == NOTHING_FOUND {
        return Ok(first);
    }

    if first == INVALID_COMMAND {
        // за отказом сервер повторяет подсказку, дочитываем её
        let usage = read_until(&mut reader, |l| l.starts_with(USAGE_LINE_PREFIX))?;
        bail!("server rejected query {:?}: {}", request.trim_end(), usage.trim_end());
    }

    if first.starts_with(RESPONSE_OPEN) {
        let rest = read_until(&mut reader, |l| l.trim_end() == RESPONSE_CLOSE)?;
        return Ok(first + &rest);
    }

    bail!("unexpected server response: {:?}", first);
}

fn read_line<R: BufRead>(reader: &mut R) -> anyhow::Result<String> {
    let mut line = String::new();
    let n = reader.read_line(&mut line)?;
    if n == 0 {
        bail!("server closed connection without response");
    }
    Ok(line)
}

/// Читает строки, пока `done` не вернёт true (строка включается в результат)
fn read_until<R: BufRead>(reader: &mut R, done: impl Fn(&str) -> bool) -> anyhow::Result<String> {
    let mut out = String::new();
    loop {
        let line = read_line(reader)?;
        out.push_str(&line);
        if done(&line) {
            return Ok(out);
        }
    }
}
