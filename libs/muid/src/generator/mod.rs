//! Strategy generators.
//!
//! The set of strategies is closed: [`Generator`] has exactly one variant
//! per [`Strategy`], and adding a strategy means adding a variant here.

mod incremental;
mod ordered;
mod padded;

pub use incremental::IncrementalGenerator;
pub use ordered::{OrderedGenerator, MIN_RANDOM_LENGTH};
pub use padded::PaddedGenerator;

pub(crate) use incremental::Sequencer;

use crate::components::Components;
use crate::error::MuidError;
use crate::strategy::Strategy;

/// A generator for one strategy.
#[derive(Debug)]
pub enum Generator {
    Ordered(OrderedGenerator),
    Incremental(IncrementalGenerator),
    Padded(PaddedGenerator),
}

impl Generator {
    /// Returns the strategy this generator implements.
    pub fn strategy(&self) -> Strategy {
        match self {
            Generator::Ordered(_) => Strategy::Ordered,
            Generator::Incremental(_) => Strategy::Incremental,
            Generator::Padded(_) => Strategy::Padded,
        }
    }

    /// Generates a new identifier no longer than `max_length`.
    ///
    /// `None` uses the configured standard length.
    pub fn generate(&self, prefix: &str, max_length: Option<usize>) -> Result<String, MuidError> {
        match self {
            Generator::Ordered(g) => g.generate(prefix, max_length),
            Generator::Incremental(g) => g.generate(prefix, max_length),
            Generator::Padded(g) => g.generate(prefix, max_length),
        }
    }

    /// Parses an identifier produced by this strategy.
    pub fn parse(&self, muid: &str) -> Option<Components> {
        match self {
            Generator::Ordered(g) => g.parse(muid),
            Generator::Incremental(g) => g.parse(muid),
            Generator::Padded(g) => g.parse(muid),
        }
    }

    /// Returns true if `muid` parses and, when given, carries `expected_prefix`.
    pub fn validate(&self, muid: &str, expected_prefix: Option<&str>) -> bool {
        match self {
            Generator::Ordered(g) => g.validate(muid, expected_prefix),
            Generator::Incremental(g) => g.validate(muid, expected_prefix),
            Generator::Padded(g) => g.validate(muid, expected_prefix),
        }
    }
}

/// Characters left for the body once the prefix and separator are placed.
pub(crate) fn body_length(prefix: &str, max_length: usize) -> Result<usize, MuidError> {
    max_length
        .checked_sub(prefix.len() + 1)
        .filter(|n| *n > 0)
        .ok_or_else(|| {
            MuidError::invalid_input(format!(
                "max length {max_length} leaves no room for a body after prefix '{prefix}'"
            ))
        })
}

/// Shared acceptance check for the counter-backed strategies.
pub(crate) fn matches_prefix(components: &Components, expected_prefix: Option<&str>) -> bool {
    expected_prefix.is_none_or(|expected| components.prefix() == expected)
}
