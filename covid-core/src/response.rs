use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::constants::{INVALID_COMMAND, NOTHING_FOUND, USAGE_BANNER};
use crate::record::Record;

const ENVELOPE_OPEN: &[u8] = b"{\"response\": [\n";
const ENVELOPE_CLOSE: &[u8] = b"]}\n";
const RECORD_INDENT: &[u8] = b"\t";

/// Результат обработки одного запроса
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Запрос не разобран
    Invalid,
    /// Найденные записи (пустой список - "ничего не найдено")
    Matches(Vec<Record>),
}

/// Как оформлять список записей в ответе
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Envelope {
    /// `,\n` после каждой записи, включая последнюю.
    /// Совместимо с существующими клиентами, но это не валидный JSON.
    #[default]
    Legacy,
    /// `,\n` только между записями - валидный JSON
    Strict,
}

/// Сериализует результат в байты для отправки клиенту
pub fn encode_response(outcome: &Outcome, envelope: Envelope) -> serde_json::Result<Vec<u8>> {
    match outcome {
        Outcome::Invalid => {
            let mut out = Vec::with_capacity(INVALID_COMMAND.len() + USAGE_BANNER.len());
            out.extend_from_slice(INVALID_COMMAND.as_bytes());
            out.extend_from_slice(USAGE_BANNER.as_bytes());
            Ok(out)
        }
        Outcome::Matches(records) if records.is_empty() => Ok(NOTHING_FOUND.as_bytes().to_vec()),
        Outcome::Matches(records) => encode_records(records, envelope),
    }
}

fn encode_records(records: &[Record], envelope: Envelope) -> serde_json::Result<Vec<u8>> {
    let mut out = Vec::from(ENVELOPE_OPEN);

    for (i, record) in records.iter().enumerate() {
        write_record(&mut out, record)?;

        let last = i + 1 == records.len();
        match (envelope, last) {
            (Envelope::Strict, true) => out.push(b'\n'),
            _ => out.extend_from_slice(b",\n"),
        }
    }

    out.extend_from_slice(ENVELOPE_CLOSE);
    Ok(out)
}

fn write_record(out: &mut Vec<u8>, record: &Record) -> serde_json::Result<()> {
    let mut ser = Serializer::with_formatter(out, PrettyFormatter::with_indent(RECORD_INDENT));
    record.serialize(&mut ser)
}
