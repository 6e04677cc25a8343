/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Calendar date without time zone (`DATE` columns such as `goals.due_date`).
pub type Date = chrono::NaiveDate;

/// Status, priority and role columns are PostgreSQL SMALLINT.
pub type StatusId = i16;
