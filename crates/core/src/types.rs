/// Record identifiers are assigned by the store (PostgreSQL BIGSERIAL or the
/// in-memory counter) and never reused.
pub type DbId = i64;

/// All timestamps are milliseconds since the Unix epoch, UTC.
pub type EpochMillis = i64;

/// Source of the current time for record timestamps.
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> EpochMillis;
}

/// Wall-clock time from the system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> EpochMillis {
        chrono::Utc::now().timestamp_millis()
    }
}
