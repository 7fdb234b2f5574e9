//! Randomness port
//!
//! Every random draw the engine makes goes through this trait so that tests
//! can replay exact sequences and production can seed a generator.

#[cfg(test)]
use mockall::automock;

/// Source of uniform random numbers
#[cfg_attr(test, automock)]
pub trait RandomSource: Send + Sync {
    /// Uniform draw in `[0, 1)`
    fn next_f64(&self) -> f64;
}

/// Derived draws built on top of [`RandomSource::next_f64`]
pub trait RandomSourceExt: RandomSource {
    /// Uniform integer in `[low, high]` inclusive
    ///
    /// Returns `low` when the range is empty or degenerate.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::cast_sign_loss
    )]
    fn range_inclusive(&self, low: u64, high: u64) -> u64 {
        if high <= low {
            return low;
        }
        let span = (high - low).saturating_add(1);
        let offset = (self.next_f64() * span as f64) as u64;
        low + offset.min(span - 1)
    }

    /// Uniform index into a collection of `len` items
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::cast_sign_loss
    )]
    fn pick_index(&self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        let index = (self.next_f64() * len as f64) as usize;
        index.min(len - 1)
    }

    /// Uniform element of a non-empty slice
    fn pick<'a, T>(&self, items: &'a [T]) -> Option<&'a T> {
        items.get(self.pick_index(items.len()))
    }
}

// Blanket implementation for all RandomSource implementors
impl<T: RandomSource + ?Sized> RandomSourceExt for T {}
