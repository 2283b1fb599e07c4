use crate::domain::ports::Clock;
use chrono::{Local, NaiveDateTime};

/// Wall clock on the server's local calendar.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}
