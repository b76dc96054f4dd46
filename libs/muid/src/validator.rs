//! Validation facade over the factory.

use tracing::debug;

use crate::factory::MuidFactory;
use crate::format;
use crate::strategy::Strategy;

/// Routes validation to the right generator, detecting the strategy when
/// the caller does not name one. Never fails: bad input is simply invalid.
#[derive(Debug, Clone, Copy)]
pub struct MuidValidator<'a> {
    factory: &'a MuidFactory,
}

impl<'a> MuidValidator<'a> {
    pub(crate) fn new(factory: &'a MuidFactory) -> Self {
        Self { factory }
    }

    /// Validates one identifier.
    pub fn validate(
        &self,
        muid: &str,
        expected_prefix: Option<&str>,
        strategy: Option<Strategy>,
    ) -> bool {
        if !format::has_valid_format(muid) {
            return false;
        }
        let Some((prefix, body)) = format::split(muid) else {
            return false;
        };

        if expected_prefix.is_some_and(|expected| expected != prefix) {
            return false;
        }
        if !self.is_valid_prefix(prefix) {
            return false;
        }

        let strategy = strategy.unwrap_or_else(|| {
            let detected = self.detect_strategy(body);
            debug!(muid, %detected, "detected strategy");
            detected
        });

        self.factory
            .generator(strategy)
            .validate(muid, expected_prefix)
    }

    /// Returns true if `muid` has exactly one separator with non-empty halves.
    pub fn has_valid_format(&self, muid: &str) -> bool {
        format::has_valid_format(muid)
    }

    /// Returns true if the prefix satisfies the configured rule.
    pub fn is_valid_prefix(&self, prefix: &str) -> bool {
        self.factory.prefix_policy().is_valid(prefix)
    }

    /// Returns true if the body uses only characters of the active alphabet.
    pub fn is_valid_body(&self, body: &str) -> bool {
        self.factory.encoder().is_valid(body)
    }

    /// Guesses the producing strategy from a body.
    pub fn detect_strategy(&self, body: &str) -> Strategy {
        Strategy::detect(body)
    }

    /// Validates each identifier, preserving input order.
    pub fn validate_many<'m, I>(&self, muids: I, expected_prefix: Option<&str>) -> Vec<(&'m str, bool)>
    where
        I: IntoIterator<Item = &'m str>,
    {
        muids
            .into_iter()
            .map(|muid| (muid, self.validate(muid, expected_prefix, None)))
            .collect()
    }

    /// Keeps only the valid identifiers, preserving input order.
    pub fn filter_valid<'m, I>(&self, muids: I, expected_prefix: Option<&str>) -> Vec<&'m str>
    where
        I: IntoIterator<Item = &'m str>,
    {
        muids
            .into_iter()
            .filter(|muid| self.validate(muid, expected_prefix, None))
            .collect()
    }
}
