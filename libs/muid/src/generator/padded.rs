//! Zero-padded counter strategy: `prefix_0000042`.

use std::sync::Arc;

use tracing::warn;

use crate::components::{Components, SequenceComponents};
use crate::error::MuidError;
use crate::format::SEPARATOR;
use crate::prefix::PrefixPolicy;

use super::incremental::{parse_sequence, Sequencer};
use super::{body_length, matches_prefix};

/// Generator for the `padded` strategy.
#[derive(Debug)]
pub struct PaddedGenerator {
    prefixes: Arc<PrefixPolicy>,
    sequencer: Sequencer,
    padding_length: usize,
    padding_character: char,
    default_max_length: usize,
}

impl PaddedGenerator {
    pub(crate) fn new(
        prefixes: Arc<PrefixPolicy>,
        sequencer: Sequencer,
        padding_length: usize,
        padding_character: char,
        default_max_length: usize,
    ) -> Self {
        Self {
            prefixes,
            sequencer,
            padding_length,
            padding_character,
            default_max_length,
        }
    }

    /// Configured body width.
    pub fn padding_length(&self) -> usize {
        self.padding_length
    }

    /// Generates `prefix_` + the next sequence value, left-padded.
    ///
    /// The width is the configured padding or the room left by `max_length`,
    /// whichever is smaller.
    pub fn generate(&self, prefix: &str, max_length: Option<usize>) -> Result<String, MuidError> {
        self.prefixes.check(prefix)?;

        let max_length = max_length.unwrap_or(self.default_max_length);
        let width = self.padding_length.min(body_length(prefix, max_length)?);
        let max_sequence = u32::try_from(width)
            .ok()
            .and_then(|w| 10u64.checked_pow(w))
            .map_or(u64::MAX, |limit| limit - 1);

        let sequence = self.sequencer.next(prefix)?;
        if sequence > max_sequence {
            warn!(prefix, sequence, width, "padded sequence overflow");
            return Err(MuidError::overflow(format!(
                "sequence {sequence} exceeds maximum value of {max_sequence} for padding length {width}"
            )));
        }

        let digits = sequence.to_string();
        let mut body = String::with_capacity(width);
        body.extend(std::iter::repeat_n(
            self.padding_character,
            width.saturating_sub(digits.len()),
        ));
        body.push_str(&digits);

        Ok(format!("{prefix}{SEPARATOR}{body}"))
    }

    /// Parses an all-decimal body, leading zeros allowed.
    pub fn parse(&self, muid: &str) -> Option<Components> {
        let (prefix, body, sequence) = parse_sequence(&self.prefixes, muid)?;
        Some(Components::Padded(SequenceComponents::new(
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
