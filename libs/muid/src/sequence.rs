//! Sequence counters for the incremental and padded strategies.
//!
//! Counters are injected into the engine. [`MemorySequence`] keeps the
//! high-water marks in process memory behind a mutex, so concurrent
//! callers never receive the same value. It is not durable: deployments
//! that need sequences to survive a restart should either seed it with a
//! [`SequenceSeed`] that looks up the persisted maximum, or implement
//! [`SequenceCounter`] over an atomic external counter such as a database
//! sequence.

use std::collections::HashMap;
use std::fmt;

use parking_lot::Mutex;
use tracing::debug;

use crate::error::MuidError;

/// Counter key used when sequencing is global instead of per prefix.
pub const GLOBAL_KEY: &str = "__global__";

/// Issues monotonically increasing sequence values per key.
pub trait SequenceCounter: Send + Sync + fmt::Debug {
    /// Returns the next value for `key`.
    ///
    /// Implementations must be atomic: two calls never return the same value
    /// for the same key.
    fn next(&self, key: &str) -> Result<u64, MuidError>;

    /// Sets the last issued value for `key`; the next call returns `value + 1`.
    fn set(&self, key: &str, value: u64);

    /// Forgets every key, so the next call for each key reseeds.
    fn reset(&self);
}

/// Supplies the starting point for a key seen for the first time.
pub trait SequenceSeed: Send + Sync {
    /// Returns the highest value already in use for `key`.
    fn max_sequence(&self, key: &str) -> u64;
}

/// Seed that assumes nothing has been issued yet.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroSeed;

impl SequenceSeed for ZeroSeed {
    fn max_sequence(&self, _key: &str) -> u64 {
        0
    }
}

impl<F> SequenceSeed for F
where
    F: Fn(&str) -> u64 + Send + Sync,
{
    fn max_sequence(&self, key: &str) -> u64 {
        self(key)
    }
}

/// Whether counters are scoped per prefix or shared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceScope {
    PerPrefix,
    Global,
}

impl SequenceScope {
    /// Maps the scope flag from configuration.
    pub fn from_per_prefix(per_prefix: bool) -> Self {
        if per_prefix {
            SequenceScope::PerPrefix
        } else {
            SequenceScope::Global
        }
    }

    /// Returns the counter key for a prefix.
    pub fn key<'a>(&self, prefix: &'a str) -> &'a str {
        match self {
            SequenceScope::PerPrefix => prefix,
            SequenceScope::Global => GLOBAL_KEY,
        }
    }
}

/// In-memory counter with mutex-guarded read-increment-write.
pub struct MemorySequence {
    values: Mutex<HashMap<String, u64>>,
    seed: Box<dyn SequenceSeed>,
}

impl MemorySequence {
    /// Creates a counter seeded from zero.
    pub fn new() -> Self {
        Self::with_seed(ZeroSeed)
    }

    /// Creates a counter that seeds unseen keys from `seed`.
    pub fn with_seed(seed: impl SequenceSeed + 'static) -> Self {
        Self {
            values: Mutex::new(HashMap::new()),
            seed: Box::new(seed),
        }
    }

    /// Returns the last issued value for `key`, if any.
    pub fn current(&self, key: &str) -> Option<u64> {
        self.values.lock().get(key).copied()
    }
}

impl Default for MemorySequence {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MemorySequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemorySequence")
            .field("keys", &self.values.lock().len())
            .finish_non_exhaustive()
    }
}

impl SequenceCounter for MemorySequence {
    fn next(&self, key: &str) -> Result<u64, MuidError> {
        let mut values = self.values.lock();

        let last = match values.get(key) {
            Some(last) => *last,
            None => {
                let max = self.seed.max_sequence(key);
                debug!(key, max, "seeded sequence");
                max
            }
        };

        let next = last.checked_add(1).ok_or_else(|| {
            MuidError::overflow(format!("sequence for '{key}' is exhausted"))
        })?;

        values.insert(key.to_string(), next);
        Ok(next)
    }

    fn set(&self, key: &str, value: u64) {
        self.values.lock().insert(key.to_string(), value);
    }

    fn reset(&self) {
        self.values.lock().clear();
    }
}
