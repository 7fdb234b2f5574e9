//! Deterministic port implementations shared by unit tests

use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::NaiveTime;

use crate::ports::{Clock, RandomSource};

/// Replays a fixed list of draws, wrapping around at the end
#[derive(Debug)]
pub struct SequenceRandom {
    values: Vec<f64>,
    cursor: AtomicUsize,
}

impl SequenceRandom {
    pub fn new(values: Vec<f64>) -> Self {
        assert!(!values.is_empty(), "sequence needs at least one value");
        Self {
            values,
            cursor: AtomicUsize::new(0),
        }
    }

    /// Number of draws taken so far
    pub fn draws(&self) -> usize {
        self.cursor.load(Ordering::SeqCst)
    }
}

impl RandomSource for SequenceRandom {
    fn next_f64(&self) -> f64 {
        let index = self.cursor.fetch_add(1, Ordering::SeqCst);
        self.values[index % self.values.len()]
    }
}

/// Clock frozen at one time of day
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveTime);

impl FixedClock {
    pub fn at(hour: u32, minute: u32) -> Self {
        Self(NaiveTime::from_hms_opt(hour, minute, 0).unwrap())
    }
}

impl Clock for FixedClock {
    fn local_time(&self) -> NaiveTime {
        self.0
    }
}
