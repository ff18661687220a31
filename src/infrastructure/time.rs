use crate::application::ports::time::Clock;
use chrono::{DateTime, Utc};

/// Reads the wall clock on every call; "now" is never cached.
#[derive(Default, Clone)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
