//! Structured result of parsing an identifier.

use std::fmt;

use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;

use crate::format::SEPARATOR;
use crate::strategy::Strategy;

/// Parsed identifier, keyed by the strategy that produced it.
///
/// `Display` reproduces the original identifier exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "strategy", rename_all = "lowercase")]
pub enum Components {
    Ordered(OrderedComponents),
    Incremental(SequenceComponents),
    Padded(SequenceComponents),
}

/// Fields of an ordered identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct OrderedComponents {
    prefix: String,
    body: String,
    timestamp: u64,
    random: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    signature: Option<String>,
}

impl OrderedComponents {
    pub(crate) fn new(
        prefix: &str,
        body: &str,
        timestamp: u64,
        random: &str,
        signature: Option<&str>,
    ) -> Self {
        Self {
            prefix: prefix.to_string(),
            body: body.to_string(),
            timestamp,
            random: random.to_string(),
            signature: signature.map(str::to_string),
        }
    }

    /// Milliseconds since the Unix epoch.
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    /// Random characters between the timestamp and the signature.
    pub fn random(&self) -> &str {
        &self.random
    }

    /// Trailing signature, when signing is enabled.
    pub fn signature(&self) -> Option<&str> {
        self.signature.as_deref()
    }
}

/// Fields of an incremental or padded identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SequenceComponents {
    prefix: String,
    body: String,
    sequence: u64,
}

impl SequenceComponents {
    pub(crate) fn new(prefix: &str, body: &str, sequence: u64) -> Self {
        Self {
            prefix: prefix.to_string(),
            body: body.to_string(),
            sequence,
        }
    }

    /// Decimal value of the body, ignoring leading zeros.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }
}

impl Components {
    /// Returns the prefix.
    pub fn prefix(&self) -> &str {
        match self {
            Components::Ordered(c) => &c.prefix,
            Components::Incremental(c) | Components::Padded(c) => &c.prefix,
        }
    }

    /// Returns the body.
    pub fn body(&self) -> &str {
        match self {
            Components::Ordered(c) => &c.body,
            Components::Incremental(c) | Components::Padded(c) => &c.body,
        }
    }

    /// Returns the producing strategy.
    pub fn strategy(&self) -> Strategy {
        match self {
            Components::Ordered(_) => Strategy::Ordered,
            Components::Incremental(_) => Strategy::Incremental,
            Components::Padded(_) => Strategy::Padded,
        }
    }

    /// Timestamp in milliseconds, for ordered identifiers.
    pub fn timestamp(&self) -> Option<u64> {
        match self {
            Components::Ordered(c) => Some(c.timestamp),
            _ => None,
        }
    }

    /// Timestamp as a UTC date-time, for ordered identifiers.
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        let ms = i64::try_from(self.timestamp()?).ok()?;
        Utc.timestamp_millis_opt(ms).single()
    }

    /// Random component, for ordered identifiers.
    pub fn random(&self) -> Option<&str> {
        match self {
            Components::Ordered(c) => Some(&c.random),
            _ => None,
        }
    }

    /// Signature, for signed ordered identifiers.
    pub fn signature(&self) -> Option<&str> {
        match self {
            Components::Ordered(c) => c.signature(),
            _ => None,
        }
    }

    /// Sequence value, for counter-backed identifiers.
    pub fn sequence(&self) -> Option<u64> {
        match self {
            Components::Incremental(c) | Components::Padded(c) => Some(c.sequence),
            Components::Ordered(_) => None,
        }
    }

    pub fn has_signature(&self) -> bool {
        self.signature().is_some()
    }

    pub fn is_time_sortable(&self) -> bool {
        matches!(self, Components::Ordered(_))
    }

    pub fn is_incremental(&self) -> bool {
        self.strategy().is_sequential()
    }
}

impl fmt::Display for Components {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.prefix(), SEPARATOR, self.body())
    }
}
