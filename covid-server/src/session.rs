use covid_core::protocol::parse_query;
use covid_core::response::{Envelope, Outcome, encode_response};
use covid_core::search::search;
use covid_core::{CovidCoreError, MAX_REQUEST_BYTES, RecordStore, USAGE_BANNER};
use log::{debug, info, warn};
use std::io::{self, Read, Write};

/// Состояния одной клиентской сессии
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Greeting,
    AwaitRequest,
    /// в буфере `n` байт запроса
    Processing(usize),
    Closed,
}

/// Обслуживает одно соединение до его закрытия.
///
/// Один `read` = один запрос: запрос, пришедший несколькими кусками, или
/// несколько запросов в одном чтении не разделяются. Таков контракт протокола.
///
/// Возвращает число обработанных запросов.
pub(crate) fn run_session<S: Read + Write>(
    stream: &mut S,
    peer: &str,
    store: &RecordStore,
    envelope: Envelope,
) -> usize {
    let mut buf = vec![0u8; MAX_REQUEST_BYTES];
    let mut state = State::Greeting;
    let mut served = 0;

    while state != State::Closed {
        state = match state {
            State::Greeting => match send(stream, USAGE_BANNER.as_bytes()) {
                Ok(()) => State::AwaitRequest,
                Err(e) => {
                    warn!("failed to greet {peer}: {e}");
                    State::Closed
                }
            },

            State::AwaitRequest => match stream.read(&mut buf) {
                Ok(0) => {
                    info!("{peer} closed connection");
                    State::Closed
                }
                Ok(n) => State::Processing(n),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => State::AwaitRequest,
                Err(e) => {
                    info!("connection read error from {peer}: {e}");
                    State::Closed
                }
            },

            State::Processing(n) => {
                served += 1;
                match handle_request(&buf[..n], store, envelope) {
                    Ok(reply) => match send(stream, &reply) {
                        Ok(()) => State::AwaitRequest,
                        Err(e) => {
                            warn!("failed to write response to {peer}: {e}");
                            State::Closed
                        }
                    },
                    Err(e) => {
                        warn!("failed to build response for {peer}: {e}");
                        State::Closed
                    }
                }
            }

            State::Closed => State::Closed,
        };
    }

    served
}

/// Разбор -> поиск -> сериализация для одного запроса
pub(crate) fn handle_request(
    request: &[u8],
    store: &RecordStore,
    envelope: Envelope,
) -> Result<Vec<u8>, CovidCoreError> {
    let text = String::from_utf8_lossy(request);

    let outcome = match parse_query(&text) {
        Ok(q) => {
            let found = search(store, &q);
            debug!("query {q:?}: {} records", found.len());
            Outcome::Matches(found)
        }
        Err(e) => {
            debug!("invalid command {text:?}: {e}");
            Outcome::Invalid
        }
    };

    Ok(encode_response(&outcome, envelope)?)
}

fn send<S: Write>(stream: &mut S, bytes: &[u8]) -> io::Result<()> {
    stream.write_all(bytes)?;
    stream.flush()
}
