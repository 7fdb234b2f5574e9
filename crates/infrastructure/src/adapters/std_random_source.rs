//! `rand`-backed random source

use application::ports::RandomSource;
use parking_lot::Mutex;
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Random source over a seedable standard generator
///
/// The generator sits behind a mutex so one instance can serve every
/// concurrent decision of an engine. With a seed, runs are reproducible.
#[derive(Debug)]
pub struct StdRandomSource {
    rng: Mutex<StdRng>,
    seed: Option<u64>,
}

impl StdRandomSource {
    /// Generator seeded from the operating system
    #[must_use]
    pub fn from_os() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
            seed: None,
        }
    }

    /// Deterministic generator
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            seed: Some(seed),
        }
    }

    /// Seeded when a seed is given, OS entropy otherwise
    #[must_use]
    pub fn new(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_os, Self::seeded)
    }

    /// The seed in use, if any
    #[must_use]
    pub const fn seed(&self) -> Option<u64> {
        self.seed
    }
}

impl Default for StdRandomSource {
    fn default() -> Self {
        Self::from_os()
    }
}

impl RandomSource for StdRandomSource {
    fn next_f64(&self) -> f64 {
        self.rng.lock().random::<f64>()
    }
}
