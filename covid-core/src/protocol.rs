use crate::date::query_date_key;
use crate::error::ParseError;

/// Разобранный запрос клиента
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// Поиск по региону, ключ сравнивается как есть
    ByRegion(String),
    /// Поиск по дате, ключ уже в формате датасета (`DD/MM/YYYY`)
    ByDate(String),
}

impl Query {
    /// Ключ, с которым сравниваются записи
    pub fn key(&self) -> &str {
        match self {
            Query::ByRegion(k) | Query::ByDate(k) => k,
        }
    }
}

/// Тип предиката во втором токене запроса
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate {
    /// `{"region":`
    Region,
    /// `{"date":`
    Date,
}

impl Predicate {
    /// Имя поля в запросе
    pub fn name(self) -> &'static str {
        match self {
            Predicate::Region => "region",
            Predicate::Date => "date",
        }
    }

    /// Литерал второго токена
    pub fn marker(self) -> &'static str {
        match self {
            Predicate::Region => "{\"region\":",
            Predicate::Date => "{\"date\":",
        }
    }

    fn from_marker(token: &str) -> Option<Self> {
        [Predicate::Region, Predicate::Date]
            .into_iter()
            .find(|p| p.marker() == token)
    }
}

/// Символы, которые вырезаются из значения (все вхождения, не только по краям).
/// `\r`/`\n` - хвост строки от netcat/telnet.
const STRIPPED_CHARS: [char; 4] = ['"', '}', '\r', '\n'];

/// Парсит запрос вида:
/// `{"query": {"region": "Sindh"}}` или `{"query": {"date": "2020-03-20"}}`
///
/// Это не JSON-парсер: строка режется только по символу пробела и должна
/// дать ровно три токена. Табы и двойные пробелы меняют границы токенов,
/// и такой запрос не пройдёт.
pub fn parse_query(request: &str) -> Result<Query, ParseError> {
    let tokens: Vec<&str> = request.split(' ').collect();
    if tokens.len() != 3 {
        return Err(ParseError::TokenCount(tokens.len()));
    }

    // tokens[0] - `{"query":`, содержимое не проверяем
    let predicate = Predicate::from_marker(tokens[1])
        .ok_or_else(|| ParseError::UnknownPredicate(tokens[1].to_string()))?;

    let key: String = tokens[2]
        .chars()
        .filter(|c| !STRIPPED_CHARS.contains(c))
        .collect();

    match predicate {
        Predicate::Region => Ok(Query::ByRegion(key)),
        Predicate::Date => query_date_key(&key)
            .map(Query::ByDate)
            .ok_or(ParseError::MalformedDate(key)),
    }
}

/// Формирует строку запроса для клиента:
/// `{"query": {"region": "Sindh"}}\n`
pub fn format_request(predicate: Predicate, value: &str) -> String {
    format!("{{\"query\": {} \"{}\"}}}}\n", predicate.marker(), value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_region_query() {
        let q = parse_query("{\"query\": {\"region\": \"Sindh\"}}").unwrap();
        assert_eq!(q, Query::ByRegion("Sindh".to_string()));
    }

    #[test]
    fn parses_date_query_into_stored_form() {
        let q = parse_query("{\"query\": {\"date\": \"2020-03-20\"}}\n").unwrap();
        assert_eq!(q, Query::ByDate("20/03/2020".to_string()));
        assert_eq!(q.key(), "20/03/2020");
    }

    #[test]
    fn strips_line_endings_from_key() {
        let q = parse_query("{\"query\": {\"region\": \"Punjab\"}}\r\n").unwrap();
        assert_eq!(q, Query::ByRegion("Punjab".to_string()));
    }

    #[test]
    fn removes_quotes_and_braces_everywhere() {
        let q = parse_query("x {\"region\": \"Kh\"yber}\"}}").unwrap();
        assert_eq!(q, Query::ByRegion("Khyber".to_string()));
    }

    #[test]
    fn first_token_is_not_checked() {
        let q = parse_query("GET {\"region\": \"Sindh\"}}").unwrap();
        assert_eq!(q, Query::ByRegion("Sindh".to_string()));
    }

    #[test]
    fn rejects_wrong_token_count() {
        assert_eq!(parse_query(""), Err(ParseError::TokenCount(1)));
        assert_eq!(
            parse_query("{\"query\": {\"region\":"),
            Err(ParseError::TokenCount(2))
        );
        // регион с пробелом даёт четыре токена
        assert_eq!(
            parse_query("{\"query\": {\"region\": \"Gilgit Baltistan\"}}"),
            Err(ParseError::TokenCount(4))
        );
    }

    #[test]
    fn splits_on_plain_space_only() {
        // двойной пробел -> пустой токен
        assert_eq!(
            parse_query("{\"query\":  {\"region\": \"Sindh\"}}"),
            Err(ParseError::TokenCount(4))
        );
        // таб не разделитель
        assert_eq!(
            parse_query("{\"query\":\t{\"region\": \"Sindh\"}}"),
            Err(ParseError::TokenCount(2))
        );
    }

    #[test]
    fn rejects_unknown_predicate() {
        let err = parse_query("{\"query\": {\"city\": \"Karachi\"}}").unwrap_err();
        assert_eq!(err, ParseError::UnknownPredicate("{\"city\":".to_string()));

        // маркер сравнивается буквально
        assert!(matches!(
            parse_query("{\"query\": {\"REGION\": \"Sindh\"}}"),
            Err(ParseError::UnknownPredicate(_))
        ));
    }

    #[test]
    fn rejects_malformed_date() {
        assert_eq!(
            parse_query("{\"query\": {\"date\": \"2020-0320\"}}"),
            Err(ParseError::MalformedDate("2020-0320".to_string()))
        );
        assert!(matches!(
            parse_query("{\"query\": {\"date\": \"20/03/2020\"}}"),
            Err(ParseError::MalformedDate(_))
        ));
    }

    #[test]
    fn format_request_is_accepted_by_parser() {
        let line = format_request(Predicate::Region, "Sindh");
        assert_eq!(line, "{\"query\": {\"region\": \"Sindh\"}}\n");
        assert_eq!(parse_query(&line).unwrap(), Query::ByRegion("Sindh".into()));

        let line = format_request(Predicate::Date, "2020-03-20");
        assert_eq!(line, "{\"query\": {\"date\": \"2020-03-20\"}}\n");
        assert_eq!(parse_query(&line).unwrap(), Query::ByDate("20/03/2020".into()));
    }
}
