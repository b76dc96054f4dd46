//! Wall-clock source for sortable bodies.

use std::fmt;

use chrono::Utc;

/// Supplies the current time in milliseconds since the Unix epoch.
pub trait Clock: Send + Sync + fmt::Debug {
    fn now_ms(&self) -> u64;
}

/// System wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        // Clocks set before 1970 are clamped to the epoch.
        u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0)
    }
}
