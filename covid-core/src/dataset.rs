use std::fs::File;
use std::io;
use std::path::Path;

use crate::error::DatasetError;
use crate::record::{Record, RecordStore};

/// Число позиционных полей в строке датасета
pub const FIELDS_PER_ROW: usize = 7;

/// Чтение датасета: CSV без заголовка, ровно 7 полей в строке.
///
/// Порядок полей:
/// positive, tests, date, discharged, expired, region, admitted
pub fn read_records<R: io::Read>(reader: R) -> Result<RecordStore, DatasetError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut records = Vec::new();

    for (i, row) in rdr.records().enumerate() {
        let row = row?;
        records.push(record_from_row(&row, i + 1)?);
    }

    Ok(RecordStore::new(records))
}

/// Чтение датасета из файла
pub fn load_records_from_path(path: impl AsRef<Path>) -> Result<RecordStore, DatasetError> {
    let path = path.as_ref();
    let f = File::open(path).map_err(|source| DatasetError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    read_records(f)
}

fn record_from_row(row: &csv::StringRecord, row_no: usize) -> Result<Record, DatasetError> {
    if row.len() != FIELDS_PER_ROW {
        return Err(DatasetError::FieldCount {
            row: row_no,
            expected: FIELDS_PER_ROW,
            found: row.len(),
        });
    }

    // длина проверена выше, индексы 0..7 есть
    let field = |i: usize| row[i].to_string();

    Ok(Record {
        cumulative_positive: field(0),
        cumulative_tests: field(1),
        date: field(2),
        discharged: field(3),
        expired: field(4),
        region: field(5),
        still_admitted: field(6),
    })
}
