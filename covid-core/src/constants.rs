/// Максимальный размер одного запроса: всё, что пришло за один `read`
pub const MAX_REQUEST_BYTES: usize = 4 * 1024;

/// Приветствие и подсказка по формату запросов
pub const USAGE_BANNER: &str = "Connected...\nUsage: <{\"query\": {\"region\": \"Sindh\"}} OR {\"query\": {\"date\": \"2020-03-20\"}}>\n";

/// Первая строка ответа на некорректный запрос (дальше идёт `USAGE_BANNER`)
pub const INVALID_COMMAND: &str = "Invalid command\n";

/// Ответ, когда ни одна запись не подошла
pub const NOTHING_FOUND: &str = "Nothing Found\n";

/// Путь к датасету по умолчанию
pub const DEFAULT_DATASET_PATH: &str = "covid_final_data.csv";
