//! Prefix acceptance rules.

use regex::Regex;

use crate::config::PrefixConfig;
use crate::error::{ConfigError, MuidError};
use crate::format::SEPARATOR;

/// Compiled prefix rule: length bounds plus a pattern.
#[derive(Debug, Clone)]
pub struct PrefixPolicy {
    min_length: usize,
    max_length: usize,
    pattern: Regex,
}

impl PrefixPolicy {
    /// Compiles the policy from configuration.
    pub fn new(config: &PrefixConfig) -> Result<Self, ConfigError> {
        if config.min_length == 0 || config.min_length > config.max_length {
            return Err(ConfigError::PrefixBounds {
                min: config.min_length,
                max: config.max_length,
            });
        }

        let pattern = Regex::new(&config.pattern).map_err(|e| ConfigError::PrefixPattern {
            pattern: config.pattern.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            min_length: config.min_length,
            max_length: config.max_length,
            pattern,
        })
    }

    /// Minimum accepted length.
    pub fn min_length(&self) -> usize {
        self.min_length
    }

    /// Maximum accepted length.
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Checks a prefix, explaining the first rule it breaks.
    pub fn check(&self, prefix: &str) -> Result<(), MuidError> {
        // Unicode case folding lets `(?i)[a-z]` match e.g. U+212A KELVIN SIGN.
        if !prefix.is_ascii() {
            return Err(MuidError::invalid_input(format!(
                "prefix '{prefix}' contains non-ASCII characters"
            )));
        }

        let length = prefix.len();

        if length < self.min_length {
            return Err(MuidError::invalid_input(format!(
                "prefix '{prefix}' is too short, minimum length is {} characters",
                self.min_length
            )));
        }

        if length > self.max_length {
            return Err(MuidError::invalid_input(format!(
                "prefix '{prefix}' is too long, maximum length is {} characters",
                self.max_length
            )));
        }

        // A separator in the prefix could never be split back out.
        if prefix.contains(SEPARATOR) || !self.pattern.is_match(prefix) {
            return Err(MuidError::invalid_input(format!(
                "prefix '{prefix}' does not match the required pattern {}",
                self.pattern.as_str()
            )));
        }

        Ok(())
    }

    /// Returns true if the prefix passes every rule.
    pub fn is_valid(&self, prefix: &str) -> bool {
        self.check(prefix).is_ok()
    }
}
