//! Built-in custom chaos generators and their registry
//!
//! Every generator that consumes resources does so in bounded amounts and
//! for a bounded time. Sleeping and yielding generators are cancelled with
//! the request that triggered them.

use std::{
    collections::BTreeMap,
    fmt,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::{Duration, Instant},
};

use async_trait::async_trait;
use domain::{BodyTransform, ConfigurationError, CustomPayload, RequestDescriptor};
use serde_json::json;
use tracing::debug;

use crate::ports::{CustomChaos, RandomSource, RandomSourceExt};

/// Name of the [`NetworkJitter`] generator
pub const NETWORK_JITTER: &str = "network-jitter";
/// Name of the [`IntermittentFailure`] generator
pub const INTERMITTENT_FAILURE: &str = "intermittent-failure";
/// Name of the [`CpuSpike`] generator
pub const CPU_SPIKE: &str = "cpu-spike";
/// Name of the [`MemoryPressure`] generator
pub const MEMORY_PRESSURE: &str = "memory-pressure";
/// Name of the [`CorruptResponse`] generator
pub const CORRUPT_RESPONSE: &str = "corrupt-response";
/// Name of the [`InflateResponse`] generator
pub const INFLATE_RESPONSE: &str = "inflate-response";

/// Lookup table of named generators
#[derive(Clone, Default)]
pub struct CustomChaosRegistry {
    generators: BTreeMap<String, Arc<dyn CustomChaos>>,
}

impl fmt::Debug for CustomChaosRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomChaosRegistry")
            .field("generators", &self.names())
            .finish()
    }
}

impl CustomChaosRegistry {
    /// Empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in generator with default bounds
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(NetworkJitter::default()));
        registry.register(Arc::new(IntermittentFailure::default()));
        registry.register(Arc::new(CpuSpike::default()));
        registry.register(Arc::new(MemoryPressure::default()));
        registry.register(Arc::new(CorruptResponse::default()));
        registry.register(Arc::new(InflateResponse::default()));
        registry
    }

    /// Add or replace a generator under its own name
    pub fn register(&mut self, generator: Arc<dyn CustomChaos>) {
        self.generators
            .insert(generator.name().to_string(), generator);
    }

    /// Look up a generator
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<dyn CustomChaos>> {
        self.generators.get(name).cloned()
    }

    /// Registered names in sorted order
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.generators.keys().map(String::as_str).collect()
    }

    /// Resolve configured names, preserving their order
    ///
    /// # Errors
    ///
    /// Returns `UnknownCustomChaos` for the first name that is not registered
    pub fn resolve(&self, names: &[String]) -> Result<Vec<Arc<dyn CustomChaos>>, ConfigurationError> {
        names
            .iter()
            .map(|name| {
                self.get(name)
                    .ok_or_else(|| ConfigurationError::UnknownCustomChaos(name.clone()))
            })
            .collect()
    }
}

/// Several short sleeps in a row, like a congested link
#[derive(Debug, Clone)]
pub struct NetworkJitter {
    waits: (u64, u64),
    wait_ms: (u64, u64),
}

impl Default for NetworkJitter {
    fn default() -> Self {
        Self {
            waits: (2, 6),
            wait_ms: (10, 110),
        }
    }
}

#[async_trait]
impl CustomChaos for NetworkJitter {
    fn name(&self) -> &str {
        NETWORK_JITTER
    }

    async fn produce(
        &self,
        _request: &RequestDescriptor,
        random: &dyn RandomSource,
    ) -> Option<CustomPayload> {
        let count = random.range_inclusive(self.waits.0, self.waits.1);
        let mut total_ms = 0;
        for _ in 0..count {
            let wait = random.range_inclusive(self.wait_ms.0, self.wait_ms.1);
            tokio::time::sleep(Duration::from_millis(wait)).await;
            total_ms += wait;
        }

        Some(CustomPayload::Note {
            message: format!("Chaos Monkey added {count} network jitters 🐒📶"),
            details: json!({ "jitter_count": count, "total_ms": total_ms }),
        })
    }
}

/// Fails on a fixed repeating pattern
#[derive(Debug, Default)]
pub struct IntermittentFailure {
    counter: AtomicUsize,
}

impl IntermittentFailure {
    /// Failure pattern cycled through one invocation at a time
    pub const PATTERN: [bool; 5] = [true, false, true, true, false];
}

#[async_trait]
impl CustomChaos for IntermittentFailure {
    fn name(&self) -> &str {
        INTERMITTENT_FAILURE
    }

    async fn produce(
        &self,
        _request: &RequestDescriptor,
        _random: &dyn RandomSource,
    ) -> Option<CustomPayload> {
        let attempt = self.counter.fetch_add(1, Ordering::Relaxed);
        if !Self::PATTERN[attempt % Self::PATTERN.len()] {
            return None;
        }
        Some(CustomPayload::Fail {
            status_code: 503,
            message: "Intermittent failure - Chaos Monkey is being moody 🐒😤".to_string(),
        })
    }
}

/// Burns CPU in 1 ms slices, yielding to the runtime between slices
#[derive(Debug, Clone)]
pub struct CpuSpike {
    max_duration: Duration,
}

impl CpuSpike {
    /// Spike bounded by `max_duration`
    #[must_use]
    pub const fn new(max_duration: Duration) -> Self {
        Self { max_duration }
    }
}

impl Default for CpuSpike {
    fn default() -> Self {
        Self::new(Duration::from_millis(250))
    }
}

#[async_trait]
impl CustomChaos for CpuSpike {
    fn name(&self) -> &str {
        CPU_SPIKE
    }

    #[allow(clippy::cast_possible_truncation)]
    async fn produce(
        &self,
        _request: &RequestDescriptor,
        random: &dyn RandomSource,
    ) -> Option<CustomPayload> {
        let max_ms = self.max_duration.as_millis() as u64;
        let target = Duration::from_millis(random.range_inclusive(1, max_ms.max(1)));
        let slice = Duration::from_millis(1);

        let started = Instant::now();
        let mut accumulator = 0u64;
        while started.elapsed() < target {
            let slice_started = Instant::now();
            while slice_started.elapsed() < slice {
                accumulator = std::hint::black_box(accumulator.wrapping_mul(31).wrapping_add(7));
            }
            tokio::task::yield_now().await;
        }
        let spent_ms = started.elapsed().as_millis() as u64;

        Some(CustomPayload::Note {
            message: format!("Chaos Monkey caused {spent_ms}ms CPU spike 🐒💻"),
            details: json!({ "duration_ms": spent_ms }),
        })
    }
}

/// Default cap on bytes held by one [`MemoryPressure`] generator at a time
pub const DEFAULT_MAX_HELD_BYTES: usize = 16 * 1024 * 1024;

/// Holds a buffer of 100 KB to 1 MB for a bounded time
///
/// All buffers share one budget. Once it is spent the generator declines
/// until earlier buffers are released.
#[derive(Debug, Clone)]
pub struct MemoryPressure {
    hold: Duration,
    bytes: (u64, u64),
    max_held: usize,
    held: Arc<AtomicUsize>,
}

impl MemoryPressure {
    /// Pressure released after `hold`, capped at [`DEFAULT_MAX_HELD_BYTES`]
    #[must_use]
    pub fn new(hold: Duration) -> Self {
        Self::with_budget(hold, DEFAULT_MAX_HELD_BYTES)
    }

    /// Pressure released after `hold`, never holding more than `max_held`
    #[must_use]
    pub fn with_budget(hold: Duration, max_held: usize) -> Self {
        Self {
            hold,
            bytes: (100_000, 1_000_000),
            max_held,
            held: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Bytes currently held by outstanding buffers
    #[must_use]
    pub fn held_bytes(&self) -> usize {
        self.held.load(Ordering::SeqCst)
    }

    fn reserve(&self, size: usize) -> Option<HeldBuffer> {
        self.held
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |held| {
                held.checked_add(size).filter(|total| *total <= self.max_held)
            })
            .ok()?;
        Some(HeldBuffer {
            buffer: vec![b'M'; size],
            held: Arc::clone(&self.held),
        })
    }
}

impl Default for MemoryPressure {
    fn default() -> Self {
        Self::new(Duration::from_secs(30))
    }
}

/// Allocation that returns its size to the budget when dropped
#[derive(Debug)]
struct HeldBuffer {
    buffer: Vec<u8>,
    held: Arc<AtomicUsize>,
}

impl Drop for HeldBuffer {
    fn drop(&mut self) {
        self.held.fetch_sub(self.buffer.len(), Ordering::SeqCst);
    }
}

#[async_trait]
impl CustomChaos for MemoryPressure {
    fn name(&self) -> &str {
        MEMORY_PRESSURE
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    async fn produce(
        &self,
        _request: &RequestDescriptor,
        random: &dyn RandomSource,
    ) -> Option<CustomPayload> {
        let size = random.range_inclusive(self.bytes.0, self.bytes.1) as usize;
        let Some(buffer) = self.reserve(size) else {
            debug!(
                bytes = size,
                held = self.held_bytes(),
                "Memory pressure budget exhausted"
            );
            return None;
        };

        // Without a runtime the buffer is released straight away
        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            let hold = self.hold;
            handle.spawn(async move {
                tokio::time::sleep(hold).await;
                debug!(bytes = buffer.buffer.len(), "Released memory pressure buffer");
                drop(buffer);
            });
        }

        Some(CustomPayload::Note {
            message: format!(
                "Chaos Monkey created {:.1}KB memory pressure 🐒🧠",
                size as f64 / 1000.0
            ),
            details: json!({ "bytes": size, "hold_ms": self.hold.as_millis() as u64 }),
        })
    }
}

/// Corrupts a share of the handler's response bytes
#[derive(Debug, Clone)]
pub struct CorruptResponse {
    rate: f64,
}

impl Default for CorruptResponse {
    fn default() -> Self {
        Self { rate: 0.1 }
    }
}

#[async_trait]
impl CustomChaos for CorruptResponse {
    fn name(&self) -> &str {
        CORRUPT_RESPONSE
    }

    async fn produce(
        &self,
        _request: &RequestDescriptor,
        _random: &dyn RandomSource,
    ) -> Option<CustomPayload> {
        Some(CustomPayload::Transform {
            transform: BodyTransform::Corrupt { rate: self.rate },
            message: "Chaos Monkey corrupted response data 🐒🔧".to_string(),
        })
    }
}

/// Pads the handler's response with 10 KB to 100 KB of filler
#[derive(Debug, Clone)]
pub struct InflateResponse {
    padding: (u64, u64),
}

impl Default for InflateResponse {
    fn default() -> Self {
        Self {
            padding: (10_000, 100_000),
        }
    }
}

#[async_trait]
impl CustomChaos for InflateResponse {
    fn name(&self) -> &str {
        INFLATE_RESPONSE
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    async fn produce(
        &self,
        _request: &RequestDescriptor,
        random: &dyn RandomSource,
    ) -> Option<CustomPayload> {
        let padding_bytes = random.range_inclusive(self.padding.0, self.padding.1) as usize;
        Some(CustomPayload::Transform {
            transform: BodyTransform::Inflate { padding_bytes },
            message: format!(
                "Chaos Monkey inflated response by {:.1}KB 🐒🎈",
                padding_bytes as f64 / 1000.0
            ),
        })
    }
}
