//! Local system clock

use application::ports::Clock;
use chrono::{Local, NaiveTime};

/// Reads the host's local wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn local_time(&self) -> NaiveTime {
        Local::now().time()
    }
}
