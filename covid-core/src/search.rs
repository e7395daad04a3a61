use crate::date::display_date;
use crate::protocol::Query;
use crate::record::{Record, RecordStore};

/// Линейный поиск по таблице.
///
/// Порядок результата совпадает с порядком в `store`. Сравнение - точное
/// равенство строк. Дата в найденных записях переписывается для ответа,
/// сама таблица не меняется.
pub fn search(store: &RecordStore, query: &Query) -> Vec<Record> {
    store
        .iter()
        .filter(|r| matches(r, query))
        .map(|r| Record {
            date: display_date(&r.date),
            ..r.clone()
        })
        .collect()
}

fn matches(record: &Record, query: &Query) -> bool {
    match query {
        Query::ByRegion(region) => record.region == *region,
        Query::ByDate(date) => record.date == *date,
    }
}
