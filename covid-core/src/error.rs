use std::path::PathBuf;

use thiserror::Error;

/// Верхнеуровневый тип ошибок крейта
#[derive(Debug, Error)]
pub enum CovidCoreError {
    /// Ошибки разбора запроса
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Ошибки загрузки датасета
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    /// Ошибки сериализации ответа
    #[error("response encode error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Ошибки разбора запроса.
///
/// Клиенту все варианты отдаются одинаково (`Invalid command`),
/// различаем их только в логах.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Запрос не разбился ровно на три токена по пробелу
    #[error("expected 3 space-separated tokens, got {0}")]
    TokenCount(usize),

    /// Неизвестный тип предиката
    #[error("unknown predicate: {0}")]
    UnknownPredicate(String),

    /// Дата не в формате YYYY-MM-DD
    #[error("malformed date: {0}")]
    MalformedDate(String),
}

/// Ошибки загрузки датасета
#[derive(Debug, Error)]
pub enum DatasetError {
    /// Не удалось открыть файл
    #[error("failed to open dataset {path:?}")]
    Open {
        /// путь к файлу
        path: PathBuf,
        /// исходная ошибка
        #[source]
        source: std::io::Error,
    },

    /// Ошибка чтения/разбора CSV
    #[error("csv read error: {0}")]
    Csv(#[from] csv::Error),

    /// Строка с неверным числом полей
    #[error("row {row}: expected {expected} fields, got {found}")]
    FieldCount {
        /// номер строки (с 1)
        row: usize,
        /// ожидаемое число полей
        expected: usize,
        /// фактическое число полей
        found: usize,
    },
}
