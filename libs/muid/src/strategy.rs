//! Generation strategies and body-based strategy detection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MuidError;

/// How the body of an identifier is produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Sortable timestamp followed by random characters.
    #[default]
    Ordered,
    /// Plain decimal sequence counter.
    Incremental,
    /// Zero-padded decimal sequence counter.
    Padded,
}

impl Strategy {
    /// Every available strategy, in registry order.
    pub const ALL: [Strategy; 3] = [Strategy::Ordered, Strategy::Incremental, Strategy::Padded];

    /// Returns the strategy name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Ordered => "ordered",
            Strategy::Incremental => "incremental",
            Strategy::Padded => "padded",
        }
    }

    /// Guesses the strategy that produced `body`.
    ///
    /// All-decimal bodies with a leading zero are `padded`, other all-decimal
    /// bodies are `incremental`, everything else is `ordered`. An ordered body
    /// that happens to be all digits is misclassified, so callers that need
    /// certainty should name the strategy explicitly.
    pub fn detect(body: &str) -> Strategy {
        if !is_decimal(body) {
            return Strategy::Ordered;
        }

        if body.len() > 1 && body.starts_with('0') {
            Strategy::Padded
        } else {
            Strategy::Incremental
        }
    }

    /// Returns true for the counter-backed strategies.
    pub fn is_sequential(&self) -> bool {
        matches!(self, Strategy::Incremental | Strategy::Padded)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = MuidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ordered" => Ok(Strategy::Ordered),
            "incremental" => Ok(Strategy::Incremental),
            "padded" => Ok(Strategy::Padded),
            other => Err(MuidError::UnknownStrategy(other.to_string())),
        }
    }
}

/// Returns true for a non-empty string of ASCII digits.
pub(crate) fn is_decimal(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}
