//! Engine configuration.
//!
//! Every field has a default, so an empty document (or no environment at
//! all) yields a working configuration. The engine never reads the
//! environment itself; callers build a [`MuidConfig`] and hand it to
//! [`crate::MuidFactory::new`].

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::encoder::Alphabet;
use crate::error::ConfigError;
use crate::prefix::PrefixPolicy;
use crate::signature::{SignatureAlgorithm, Signer};
use crate::strategy::Strategy;

/// Complete engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MuidConfig {
    /// Strategy used when the caller does not name one.
    pub default_strategy: Strategy,

    /// Named maximum lengths.
    pub lengths: LengthTiers,

    /// Counter-backed strategy settings.
    pub incremental: IncrementalConfig,

    /// Optional integrity suffix for ordered bodies.
    pub signature: SignatureConfig,

    /// Active alphabet.
    pub encoding: Alphabet,

    /// Prefix acceptance rule.
    pub prefix: PrefixConfig,
}

/// A named maximum length.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthTier {
    Tiny,
    Small,
    #[default]
    Standard,
}

impl LengthTier {
    /// Returns the tier name.
    pub fn as_str(&self) -> &'static str {
        match self {
            LengthTier::Tiny => "tiny",
            LengthTier::Small => "small",
            LengthTier::Standard => "standard",
        }
    }
}

impl FromStr for LengthTier {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tiny" => Ok(LengthTier::Tiny),
            "small" => Ok(LengthTier::Small),
            "standard" => Ok(LengthTier::Standard),
            other => Err(ConfigError::UnknownLengthTier(other.to_string())),
        }
    }
}

/// Maximum identifier length per tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LengthTiers {
    pub tiny: usize,
    pub small: usize,
    pub standard: usize,
}

impl Default for LengthTiers {
    fn default() -> Self {
        Self {
            tiny: 16,
            small: 24,
            standard: 36,
        }
    }
}

impl LengthTiers {
    /// Returns the maximum length for a tier.
    pub fn get(&self, tier: LengthTier) -> usize {
        match tier {
            LengthTier::Tiny => self.tiny,
            LengthTier::Small => self.small,
            LengthTier::Standard => self.standard,
        }
    }
}

/// Settings shared by the incremental and padded strategies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IncrementalConfig {
    /// Body width for the padded strategy.
    pub padding_length: usize,

    /// Fill character for the padded strategy (an ASCII digit).
    pub padding_character: char,

    /// Scope counters per prefix instead of one global counter.
    pub per_prefix: bool,
}

impl Default for IncrementalConfig {
    fn default() -> Self {
        Self {
            padding_length: 7,
            padding_character: '0',
            per_prefix: true,
        }
    }
}

/// Signature settings for the ordered strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignatureConfig {
    pub enabled: bool,
    pub length: usize,
    pub algorithm: SignatureAlgorithm,
    /// Application secret mixed into the checksum.
    pub secret: String,
}

impl Default for SignatureConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            length: 4,
            algorithm: SignatureAlgorithm::default(),
            secret: "default-key".to_string(),
        }
    }
}

/// Prefix length bounds and pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrefixConfig {
    pub min_length: usize,
    pub max_length: usize,
    pub pattern: String,
}

impl Default for PrefixConfig {
    fn default() -> Self {
        Self {
            min_length: 2,
            max_length: 8,
            pattern: "(?i)^[a-z][a-z0-9]*$".to_string(),
        }
    }
}

impl MuidConfig {
    /// Load configuration from `MUID_*` environment variables over the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let get = |var: &'static str| lookup(var).map(|value| (var, value));

        if let Some(v) = get("MUID_DEFAULT_STRATEGY") {
            config.default_strategy = parse_var(v)?;
        }
        if let Some(v) = get("MUID_LENGTH_TINY") {
            config.lengths.tiny = parse_var(v)?;
        }
        if let Some(v) = get("MUID_LENGTH_SMALL") {
            config.lengths.small = parse_var(v)?;
        }
        if let Some(v) = get("MUID_LENGTH_STANDARD") {
            config.lengths.standard = parse_var(v)?;
        }
        if let Some(v) = get("MUID_PADDING_LENGTH") {
            config.incremental.padding_length = parse_var(v)?;
        }
        if let Some(v) = get("MUID_PADDING_CHARACTER") {
            config.incremental.padding_character = parse_var(v)?;
        }
        if let Some(v) = get("MUID_PER_PREFIX") {
            config.incremental.per_prefix = parse_flag(v)?;
        }
        if let Some(v) = get("MUID_SIGNATURE_ENABLED") {
            config.signature.enabled = parse_flag(v)?;
        }
        if let Some(v) = get("MUID_SIGNATURE_LENGTH") {
            config.signature.length = parse_var(v)?;
        }
        if let Some(v) = get("MUID_SIGNATURE_ALGORITHM") {
            config.signature.algorithm = parse_var(v)?;
        }
        if let Some((_, secret)) = get("MUID_SIGNATURE_SECRET") {
            config.signature.secret = secret;
        }
        if let Some(v) = get("MUID_ENCODING") {
            config.encoding = Alphabet::from_str(&v.1)
                .map_err(|_| ConfigError::UnsupportedEncoding(v.1.clone()))?;
        }
        if let Some(v) = get("MUID_PREFIX_MIN_LENGTH") {
            config.prefix.min_length = parse_var(v)?;
        }
        if let Some(v) = get("MUID_PREFIX_MAX_LENGTH") {
            config.prefix.max_length = parse_var(v)?;
        }
        if let Some((_, pattern)) = get("MUID_PREFIX_PATTERN") {
            config.prefix.pattern = pattern;
        }

        config.validate()?;
        Ok(config)
    }

    /// Rejects settings no engine could run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        PrefixPolicy::new(&self.prefix)?;

        for (tier, length) in [
            ("tiny", self.lengths.tiny),
            ("small", self.lengths.small),
            ("standard", self.lengths.standard),
        ] {
            if length == 0 {
                return Err(ConfigError::LengthTier { tier, length });
            }
        }

        if self.incremental.padding_length == 0 {
            return Err(ConfigError::Padding("padding length must be positive".into()));
        }
        if !self.incremental.padding_character.is_ascii_digit() {
            return Err(ConfigError::Padding(format!(
                "padding character {:?} is not a decimal digit",
                self.incremental.padding_character
            )));
        }

        if self.signature.enabled {
            let max = Signer::max_length(self.signature.algorithm, self.encoding);
            if self.signature.length == 0 || self.signature.length > max {
                return Err(ConfigError::SignatureLength {
                    length: self.signature.length,
                    max,
                });
            }
        }

        Ok(())
    }
}

fn parse_var<T: FromStr>((var, value): (&'static str, String)) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidEnv { var, value })
}

fn parse_flag((var, value): (&'static str, String)) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidEnv { var, value }),
    }
}
