use chrono::{DateTime, Utc};

/// Source of wall-clock timestamps for tasks and sessions.
///
/// The tracker asks the clock instead of calling `Utc::now()` directly so
/// that tests can pin creation, start and end times.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Clock backed by the system time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
