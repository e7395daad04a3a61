//! Перевод дат между форматом запроса (`YYYY-MM-DD`) и форматом датасета (`DD/MM/YYYY`).
//!
//! Оба направления - одно и то же преобразование: меняем местами первую и
//! последнюю части и склеиваем другим разделителем.

/// Разделитель дат в запросах и ответах
pub const QUERY_DATE_SEP: char = '-';

/// Разделитель дат в датасете
pub const STORED_DATE_SEP: char = '/';

/// Разбить `value` по `from`, поменять местами первую и последнюю части,
/// склеить через `to`.
pub fn flip_date(value: &str, from: char, to: char) -> String {
    let mut parts: Vec<&str> = value.split(from).collect();
    let last = parts.len() - 1;
    parts.swap(0, last);
    let sep = to.to_string();
    parts.join(sep.as_str())
}

/// `YYYY-MM-DD` -> `DD/MM/YYYY`.
///
/// `None`, если значение не делится по `-` ровно на три части.
pub fn query_date_key(raw: &str) -> Option<String> {
    if raw.split(QUERY_DATE_SEP).count() != 3 {
        return None;
    }
    Some(flip_date(raw, QUERY_DATE_SEP, STORED_DATE_SEP))
}

/// Дата для ответа: `DD/MM/YYYY` -> `YYYY-MM-DD`.
///
/// Значения без `/` возвращаются как есть.
pub fn display_date(stored: &str) -> String {
    if stored.contains(STORED_DATE_SEP) {
        flip_date(stored, STORED_DATE_SEP, QUERY_DATE_SEP)
    } else {
        stored.to_string()
    }
}
