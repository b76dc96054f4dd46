//! Strategy registry and the engine entry points.

use std::sync::{Arc, OnceLock};

use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::components::Components;
use crate::config::{LengthTier, MuidConfig};
use crate::encoder::Encoder;
use crate::error::{ConfigError, MuidError};
use crate::format;
use crate::generator::{
    Generator, IncrementalGenerator, OrderedGenerator, PaddedGenerator, Sequencer,
};
use crate::parser::MuidParser;
use crate::prefix::PrefixPolicy;
use crate::sequence::{MemorySequence, SequenceCounter, SequenceScope};
use crate::signature::Signer;
use crate::strategy::Strategy;
use crate::validator::MuidValidator;

/// Resolves strategies to generators and dispatches `generate`, `parse`,
/// and `is_valid`.
///
/// One generator per strategy is built on first use and reused afterwards.
/// The incremental and padded generators draw from separate counters unless
/// one counter is injected for both with [`MuidFactory::with_sequences`].
#[derive(Debug)]
pub struct MuidFactory {
    config: MuidConfig,
    encoder: Encoder,
    prefixes: Arc<PrefixPolicy>,
    incremental_sequences: Arc<dyn SequenceCounter>,
    padded_sequences: Arc<dyn SequenceCounter>,
    clock: Arc<dyn Clock>,
    ordered: OnceLock<Generator>,
    incremental: OnceLock<Generator>,
    padded: OnceLock<Generator>,
}

impl MuidFactory {
    /// Builds a factory with an in-memory counter and the system clock.
    pub fn new(config: MuidConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let prefixes = Arc::new(PrefixPolicy::new(&config.prefix)?);

        Ok(Self {
            encoder: Encoder::new(config.encoding),
            config,
            prefixes,
            incremental_sequences: Arc::new(MemorySequence::new()),
            padded_sequences: Arc::new(MemorySequence::new()),
            clock: Arc::new(SystemClock),
            ordered: OnceLock::new(),
            incremental: OnceLock::new(),
            padded: OnceLock::new(),
        })
    }

    /// Uses one counter for both counter-backed strategies, e.g. a
    /// database sequence.
    #[must_use]
    pub fn with_sequences(self, sequences: Arc<dyn SequenceCounter>) -> Self {
        self.with_incremental_sequences(sequences.clone())
            .with_padded_sequences(sequences)
    }

    /// Replaces the counter of the incremental strategy.
    #[must_use]
    pub fn with_incremental_sequences(mut self, sequences: Arc<dyn SequenceCounter>) -> Self {
        self.incremental_sequences = sequences;
        self.clear_generators();
        self
    }

    /// Replaces the counter of the padded strategy.
    #[must_use]
    pub fn with_padded_sequences(mut self, sequences: Arc<dyn SequenceCounter>) -> Self {
        self.padded_sequences = sequences;
        self.clear_generators();
        self
    }

    /// Replaces the clock used for ordered timestamps.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self.clear_generators();
        self
    }

    fn clear_generators(&mut self) {
        self.ordered = OnceLock::new();
        self.incremental = OnceLock::new();
        self.padded = OnceLock::new();
    }

    /// Generates an identifier.
    ///
    /// The prefix is checked before the strategy is resolved. `None` falls
    /// back to the configured default strategy and the standard length.
    pub fn generate(
        &self,
        prefix: &str,
        strategy: Option<Strategy>,
        max_length: Option<usize>,
    ) -> Result<String, MuidError> {
        self.prefixes.check(prefix)?;

        let strategy = strategy.unwrap_or(self.config.default_strategy);
        let max_length = max_length.unwrap_or(self.config.lengths.standard);
        self.generator(strategy).generate(prefix, Some(max_length))
    }

    /// Generates an identifier with a strategy given by name.
    pub fn generate_with(
        &self,
        prefix: &str,
        strategy: &str,
        max_length: Option<usize>,
    ) -> Result<String, MuidError> {
        self.prefixes.check(prefix)?;
        let strategy = strategy.parse::<Strategy>()?;
        self.generate(prefix, Some(strategy), max_length)
    }

    /// Generates an identifier sized for a length tier.
    pub fn generate_tier(
        &self,
        prefix: &str,
        strategy: Option<Strategy>,
        tier: LengthTier,
    ) -> Result<String, MuidError> {
        self.generate(prefix, strategy, Some(self.config.lengths.get(tier)))
    }

    /// Generates a standard-length identifier (36 by default).
    pub fn standard(&self, prefix: &str, strategy: Option<Strategy>) -> Result<String, MuidError> {
        self.generate_tier(prefix, strategy, LengthTier::Standard)
    }

    /// Generates a small identifier (24 by default).
    pub fn small(&self, prefix: &str, strategy: Option<Strategy>) -> Result<String, MuidError> {
        self.generate_tier(prefix, strategy, LengthTier::Small)
    }

    /// Generates a tiny identifier (16 by default).
    pub fn tiny(&self, prefix: &str, strategy: Option<Strategy>) -> Result<String, MuidError> {
        self.generate_tier(prefix, strategy, LengthTier::Tiny)
    }

    /// Parses an identifier, detecting the strategy when `None`.
    pub fn parse(&self, muid: &str, strategy: Option<Strategy>) -> Option<Components> {
        self.parser().parse(muid, strategy)
    }

    /// Validates an identifier, detecting the strategy when `None`.
    pub fn is_valid(
        &self,
        muid: &str,
        expected_prefix: Option<&str>,
        strategy: Option<Strategy>,
    ) -> bool {
        self.validator().validate(muid, expected_prefix, strategy)
    }

    /// Returns the text before the first separator.
    pub fn extract_prefix<'a>(&self, muid: &'a str) -> Option<&'a str> {
        format::split(muid).map(|(prefix, _)| prefix)
    }

    /// Returns the text after the first separator.
    pub fn extract_body<'a>(&self, muid: &'a str) -> Option<&'a str> {
        format::split(muid).map(|(_, body)| body)
    }

    /// Returns the generator for a strategy, building it on first use.
    pub fn generator(&self, strategy: Strategy) -> &Generator {
        let slot = match strategy {
            Strategy::Ordered => &self.ordered,
            Strategy::Incremental => &self.incremental,
            Strategy::Padded => &self.padded,
        };
        slot.get_or_init(|| self.create_generator(strategy))
    }

    /// Returns the generator for a strategy name.
    pub fn generator_named(&self, strategy: &str) -> Result<&Generator, MuidError> {
        Ok(self.generator(strategy.parse()?))
    }

    /// Every registered strategy.
    pub fn available_strategies(&self) -> &'static [Strategy] {
        &Strategy::ALL
    }

    /// Sets the last issued sequence value for a prefix in both
    /// counter-backed strategies.
    ///
    /// Use on startup with a persisted high-water mark.
    pub fn set_sequence(&self, prefix: &str, value: u64) {
        let key = SequenceScope::from_per_prefix(self.config.incremental.per_prefix).key(prefix);
        self.incremental_sequences.set(key, value);
        self.padded_sequences.set(key, value);
    }

    /// Forgets every sequence value.
    pub fn reset_sequences(&self) {
        self.incremental_sequences.reset();
        self.padded_sequences.reset();
    }

    pub fn config(&self) -> &MuidConfig {
        &self.config
    }

    pub fn encoder(&self) -> Encoder {
        self.encoder
    }

    pub fn prefix_policy(&self) -> &PrefixPolicy {
        &self.prefixes
    }

    pub fn validator(&self) -> MuidValidator<'_> {
        MuidValidator::new(self)
    }

    pub fn parser(&self) -> MuidParser<'_> {
        MuidParser::new(self)
    }

    fn create_generator(&self, strategy: Strategy) -> Generator {
        debug!(%strategy, "building generator");

        let standard = self.config.lengths.standard;
        let incremental = &self.config.incremental;
        let scope = SequenceScope::from_per_prefix(incremental.per_prefix);

        match strategy {
            Strategy::Ordered => {
                let signature = &self.config.signature;
                let signer = signature
                    .enabled
                    .then(|| Signer::new(signature, self.encoder));
                Generator::Ordered(OrderedGenerator::new(
                    self.encoder,
                    self.prefixes.clone(),
                    self.clock.clone(),
                    signer,
                    standard,
                ))
            }
            Strategy::Incremental => Generator::Incremental(IncrementalGenerator::new(
                self.prefixes.clone(),
                Sequencer::new(self.incremental_sequences.clone(), scope),
                standard,
            )),
            Strategy::Padded => Generator::Padded(PaddedGenerator::new(
                self.prefixes.clone(),
                Sequencer::new(self.padded_sequences.clone(), scope),
                incremental.padding_length,
                incremental.padding_character,
                standard,
            )),
        }
    }
}
