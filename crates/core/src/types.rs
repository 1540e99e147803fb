/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All server-side timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Event timestamps as reported by the host, in the host's local time.
pub type HostTime = chrono::NaiveDateTime;
