//! Error types for identifier generation and configuration.

use thiserror::Error;

/// Errors raised by generation and by the low-level codec.
///
/// Parsing and validation never produce these for malformed identifiers;
/// they answer `None`/`false` instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MuidError {
    /// Malformed prefix, negative integer, or a character outside the alphabet.
    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    /// A sequence or encoded value does not fit in the requested length.
    #[error("overflow: {message}")]
    Overflow { message: String },

    /// The strategy name is not one of the registered strategies.
    #[error("unknown strategy '{0}', available: ordered, incremental, padded")]
    UnknownStrategy(String),
}

impl MuidError {
    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        MuidError::InvalidInput {
            message: message.into(),
        }
    }

    pub(crate) fn overflow(message: impl Into<String>) -> Self {
        MuidError::Overflow {
            message: message.into(),
        }
    }

    /// Returns true if this error reports malformed input.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, MuidError::InvalidInput { .. })
    }

    /// Returns true if this error reports a value that did not fit.
    pub fn is_overflow(&self) -> bool {
        matches!(self, MuidError::Overflow { .. })
    }

    /// Returns true if this error reports an unregistered strategy.
    pub fn is_unknown_strategy(&self) -> bool {
        matches!(self, MuidError::UnknownStrategy(_))
    }
}

/// Errors raised while building an engine from configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The encoding name is not `base62` or `base36`.
    #[error("unsupported encoding type: {0}")]
    UnsupportedEncoding(String),

    /// Prefix length bounds are unusable.
    #[error("invalid prefix bounds: min {min}, max {max}")]
    PrefixBounds { min: usize, max: usize },

    /// The prefix pattern is not a valid regular expression.
    #[error("invalid prefix pattern '{pattern}': {reason}")]
    PrefixPattern { pattern: String, reason: String },

    /// Padding settings for the padded strategy are unusable.
    #[error("invalid padding: {0}")]
    Padding(String),

    /// Signature length is zero or wider than the hash can encode.
    #[error("invalid signature length {length}: must be between 1 and {max}")]
    SignatureLength { length: usize, max: usize },

    /// An environment variable could not be parsed.
    #[error("invalid value for {var}: '{value}'")]
    InvalidEnv { var: &'static str, value: String },

    /// The signature algorithm name is not `crc32` or `sha256`.
    #[error("unsupported signature algorithm: {0}")]
    UnsupportedSignatureAlgorithm(String),

    /// The length tier name is not `tiny`, `small`, or `standard`.
    #[error("unknown length tier: {0}")]
    UnknownLengthTier(String),

    /// A length tier is unusable.
    #[error("invalid length tier {tier}: {length}")]
    LengthTier { tier: &'static str, length: usize },
}
