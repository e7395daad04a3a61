use serde::Serialize;

/// Одна строка датасета. Все поля текстовые и для сервиса непрозрачны.
///
/// `date` хранится как `DD/MM/YYYY`; в ответах переписывается в `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    /// дата
    pub date: String,
    /// накопленное число положительных тестов
    #[serde(rename = "positive")]
    pub cumulative_positive: String,
    /// накопленное число тестов
    #[serde(rename = "tests")]
    pub cumulative_tests: String,
    /// умершие
    pub expired: String,
    /// госпитализированы на текущий момент
    #[serde(rename = "admitted")]
    pub still_admitted: String,
    /// выписанные
    pub discharged: String,
    /// регион
    pub region: String,
}

/// Неизменяемая упорядоченная таблица записей.
///
/// Строится один раз при старте и дальше только читается,
/// поэтому между сессиями её можно делить через `Arc` без блокировок.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordStore {
    records: Vec<Record>,
}

impl RecordStore {
    /// Создать хранилище из готовых записей (порядок сохраняется)
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Число записей
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Пустое ли хранилище
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Итератор по записям в порядке загрузки
    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Все записи срезом
    pub fn records(&self) -> &[Record] {
        &self.records
    }
}

impl<'a> IntoIterator for &'a RecordStore {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
