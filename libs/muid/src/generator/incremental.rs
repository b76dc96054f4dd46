//! Plain counter strategy: `prefix_<decimal sequence>`.

use std::sync::Arc;

use tracing::warn;

use crate::components::{Components, SequenceComponents};
use crate::error::MuidError;
use crate::format::{self, SEPARATOR};
use crate::prefix::PrefixPolicy;
use crate::sequence::{SequenceCounter, SequenceScope};
use crate::strategy::is_decimal;

use super::{body_length, matches_prefix};

/// Counter plus scoping, shared by the counter-backed strategies.
#[derive(Debug, Clone)]
pub(crate) struct Sequencer {
    counter: Arc<dyn SequenceCounter>,
    scope: SequenceScope,
}

impl Sequencer {
    pub(crate) fn new(counter: Arc<dyn SequenceCounter>, scope: SequenceScope) -> Self {
        Self { counter, scope }
    }

    pub(crate) fn next(&self, prefix: &str) -> Result<u64, MuidError> {
        self.counter.next(self.scope.key(prefix))
    }

    pub(crate) fn set(&self, prefix: &str, value: u64) {
        self.counter.set(self.scope.key(prefix), value);
    }
}

/// Parses a counter-backed body; leading zeros are ignored.
pub(crate) fn parse_sequence<'a>(
    prefixes: &PrefixPolicy,
    muid: &'a str,
) -> Option<(&'a str, &'a str, u64)> {
    let (prefix, body) = format::split(muid)?;

    if !prefixes.is_valid(prefix) || !is_decimal(body) {
        return None;
    }

    let sequence = body.parse::<u64>().ok()?;
    Some((prefix, body, sequence))
}

/// Generator for the `incremental` strategy.
#[derive(Debug)]
pub struct IncrementalGenerator {
    prefixes: Arc<PrefixPolicy>,
    sequencer: Sequencer,
    default_max_length: usize,
}

impl IncrementalGenerator {
    pub(crate) fn new(
        prefixes: Arc<PrefixPolicy>,
        sequencer: Sequencer,
        default_max_length: usize,
    ) -> Self {
        Self {
            prefixes,
            sequencer,
            default_max_length,
        }
    }

    /// Generates `prefix_` + the next sequence value, unpadded.
    pub fn generate(&self, prefix: &str, max_length: Option<usize>) -> Result<String, MuidError> {
        self.prefixes.check(prefix)?;

        let max_length = max_length.unwrap_or(self.default_max_length);
        let max_digits = body_length(prefix, max_length)?;

        let sequence = self.sequencer.next(prefix)?;
        let body = sequence.to_string();

        if body.len() > max_digits {
            warn!(prefix, sequence, max_digits, "sequence overflow");
            return Err(MuidError::overflow(format!(
                "sequence {sequence} exceeds maximum length of {max_digits} digits for prefix '{prefix}'"
            )));
        }

        Ok(format!("{prefix}{SEPARATOR}{body}"))
    }

    /// Parses an all-decimal body.
    pub fn parse(&self, muid: &str) -> Option<Components> {
        let (prefix, body, sequence) = parse_sequence(&self.prefixes, muid)?;
        Some(Components::Incremental(SequenceComponents::new(
            prefix, body, sequence,
        )))
    }

    pub fn validate(&self, muid: &str, expected_prefix: Option<&str>) -> bool {
        self.parse(muid)
            .is_some_and(|c| matches_prefix(&c, expected_prefix))
    }

    /// Sets the last issued value; the next identifier uses `value + 1`.
    pub fn set_sequence(&self, prefix: &str, value: u64) {
        self.sequencer.set(prefix, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PrefixConfig;
    use crate::sequence::{MemorySequence, GLOBAL_KEY};

    fn generator(scope: SequenceScope) -> (IncrementalGenerator, Arc<MemorySequence>) {
        let counter = Arc::new(MemorySequence::new());
        let prefixes = Arc::new(PrefixPolicy::new(&PrefixConfig::default()).unwrap());
        let sequencer = Sequencer::new(counter.clone(), scope);
        (IncrementalGenerator::new(prefixes, sequencer, 36), counter)
    }

    #[test]
    fn test_sequential() {
        let (g, _) = generator(SequenceScope::PerPrefix);
        g.set_sequence("ord", 0);
        assert_eq!(g.generate("ord", None).unwrap(), "ord_1");
        assert_eq!(g.generate("ord", None).unwrap(), "ord_2");
        assert_eq!(g.generate("ord", None).unwrap(), "ord_3");
    }

    #[test]
    fn test_per_prefix_and_global_scopes() {
        let (g, _) = generator(SequenceScope::PerPrefix);
        assert_eq!(g.generate("ord", None).unwrap(), "ord_1");
        assert_eq!(g.generate("inv", None).unwrap(), "inv_1");

        let (g, counter) = generator(SequenceScope::Global);
        assert_eq!(g.generate("ord", None).unwrap(), "ord_1");
        assert_eq!(g.generate("inv", None).unwrap(), "inv_2");
        assert_eq!(counter.current(GLOBAL_KEY), Some(2));
    }

    #[test]
    fn test_overflow() {
        let (g, _) = generator(SequenceScope::PerPrefix);
        g.set_sequence("ord", 99);
        // "ord_" leaves two digits in six characters.
        assert!(g.generate("ord", Some(6)).unwrap_err().is_overflow());
    }

    #[test]
    fn test_validate() {
        let (g, _) = generator(SequenceScope::PerPrefix);
        assert!(g.validate("ord_1", None));
        assert!(g.validate("ord_999999", Some("ord")));
        assert!(!g.validate("ord_1", Some("usr")));
        assert!(!g.validate("ord_abc", None));
        assert!(!g.validate("ord_", None));
        assert!(!g.validate("ord_-1", None));
    }

    #[test]
    fn test_parse() {
        let (g, _) = generator(SequenceScope::PerPrefix);
        let c = g.parse("ord_42").unwrap();
        assert_eq!(c.prefix(), "ord");
        assert_eq!(c.body(), "42");
        assert_eq!(c.sequence(), Some(42));
        assert_eq!(c.strategy(), crate::Strategy::Incremental);

        // Wider than u64.
        assert!(g.parse("ord_123456789012345678901").is_none());
    }
}
