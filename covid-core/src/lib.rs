//! # covid-core
//!
//! Базовые типы и протокол для covid-server / covid-client.
//!
//! Этот крейт содержит:
//!
//! - [`record`] — запись датасета и неизменяемая таблица записей
//! - [`dataset`] — загрузка таблицы из CSV
//! - [`protocol`] — разбор текстовых запросов `{"query": {...}}`
//! - [`date`] — перевод дат между форматом запроса и форматом датасета
//! - [`search`] — поиск по таблице
//! - [`response`] — сериализация ответа
//! - [`error`] — типы ошибок, которые возвращают компоненты `covid-core`
//!
//! ## Быстрый пример: запрос по региону
//!
//! ```rust
//! use covid_core::protocol::{parse_query, Query};
//! use covid_core::dataset::read_records;
//! use covid_core::search::search;
//! use std::io::Cursor;
//!
//! let store = read_records(Cursor::new("1,10,20/03/2020,0,0,Sindh,1\n")).unwrap();
//!
//! let q = parse_query("{\"query\": {\"region\": \"Sindh\"}}").unwrap();
//! assert_eq!(q, Query::ByRegion("Sindh".to_string()));
//!
//! let found = search(&store, &q);
//! assert_eq!(found.len(), 1);
//! assert_eq!(found[0].date, "2020-03-20");
//! ```
//!
//! ## Пример: запрос по дате
//!
//! ```rust
//! use covid_core::protocol::{parse_query, Query};
//!
//! // дата из запроса сразу переводится в формат датасета
//! let q = parse_query("{\"query\": {\"date\": \"2020-03-20\"}}").unwrap();
//! assert_eq!(q, Query::ByDate("20/03/2020".to_string()));
//!
//! // не три части через `-` => ошибка разбора
//! assert!(parse_query("{\"query\": {\"date\": \"2020-0320\"}}").is_err());
//! ```
//!
//! ## Пример: ответ
//!
//! ```rust
//! use covid_core::response::{encode_response, Envelope, Outcome};
//!
//! let bytes = encode_response(&Outcome::Matches(vec![]), Envelope::Legacy).unwrap();
//! assert_eq!(bytes, b"Nothing Found\n");
//! ```
//!
//! ## Дизайн
//!
//! Как и раньше, здесь только чистые типы, парсинг и сериализация:
//! без сокетов, потоков и логирования. Сетевая часть живёт в `covid-server`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Запись датасета и таблица записей.
pub mod record;

/// Загрузка датасета из CSV.
pub mod dataset;

/// Текстовый протокол запросов.
pub mod protocol;

/// Нормализация дат.
pub mod date;

/// Поиск по таблице.
pub mod search;

/// Сериализация ответов.
pub mod response;

/// Ошибки `covid-core`.
pub mod error;

/// Общие константы
mod constants;
pub use constants::{
    DEFAULT_DATASET_PATH, INVALID_COMMAND, MAX_REQUEST_BYTES, NOTHING_FOUND, USAGE_BANNER,
};

// --- Re-exports (публичный фасад API) ---

pub use crate::error::{CovidCoreError, DatasetError, ParseError};
pub use crate::protocol::{Predicate, Query};
pub use crate::record::{Record, RecordStore};
pub use crate::response::{Envelope, Outcome};
