/// Legacy tables and `files_new` use 32-bit `INTEGER`/`SERIAL` keys.
pub type DbId = i32;

/// Legacy and destination tables store `TIMESTAMP WITHOUT TIME ZONE`.
pub type Timestamp = chrono::NaiveDateTime;

/// Report timestamps are UTC.
pub type ReportTimestamp = chrono::DateTime<chrono::Utc>;
