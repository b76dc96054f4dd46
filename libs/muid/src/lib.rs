//! # muid
//!
//! Short, prefixed, human-readable identifiers for use as primary and
//! foreign keys.
//!
//! ## ID Format
//!
//! Every identifier is `{prefix}_{body}`, where the body depends on the
//! strategy that produced it:
//!
//! - `ordered`: `usr_0OjWdK4g7Hq2ZkP9mXbT1sVaRc3eLnQ2` (sortable timestamp + random)
//! - `incremental`: `ord_42` (plain counter)
//! - `padded`: `inv_0000042` (zero-padded counter)
//!
//! ## Entry Points
//!
//! External code depends on three operations of [`MuidFactory`]:
//!
//! - [`MuidFactory::generate`] fails loudly on an invalid prefix, unknown
//!   strategy, or a value that does not fit
//! - [`MuidFactory::parse`] returns `None` for anything malformed
//! - [`MuidFactory::is_valid`] returns `false` for anything malformed
//!
//! ```
//! use muid::{MuidConfig, MuidFactory, Strategy};
//!
//! let factory = MuidFactory::new(MuidConfig::default()).unwrap();
//! let id = factory.generate("usr", None, None).unwrap();
//! assert!(factory.is_valid(&id, Some("usr"), None));
//!
//! factory.set_sequence("ord", 0);
//! assert_eq!(factory.generate("ord", Some(Strategy::Incremental), None).unwrap(), "ord_1");
//! ```
//!
//! ## Sequences
//!
//! Counter-backed strategies draw from an injected [`SequenceCounter`].
//! The default [`MemorySequence`] is safe under concurrency but forgets its
//! state on restart; persist the high-water mark externally and restore it
//! with [`MuidFactory::set_sequence`], or plug in a database-backed counter.

mod clock;
mod components;
mod config;
mod encoder;
mod error;
mod factory;
mod format;
mod generator;
mod parser;
mod prefix;
mod sequence;
mod signature;
mod strategy;
mod validator;

pub use clock::{Clock, SystemClock};
pub use components::{Components, OrderedComponents, SequenceComponents};
pub use config::{
    IncrementalConfig, LengthTier, LengthTiers, MuidConfig, PrefixConfig, SignatureConfig,
};
pub use encoder::{Alphabet, Encoder, TIMESTAMP_LENGTH};
pub use error::{ConfigError, MuidError};
pub use factory::MuidFactory;
pub use format::{has_valid_format, SEPARATOR};
pub use generator::{
    Generator, IncrementalGenerator, OrderedGenerator, PaddedGenerator, MIN_RANDOM_LENGTH,
};
pub use parser::MuidParser;
pub use prefix::PrefixPolicy;
pub use sequence::{
    MemorySequence, SequenceCounter, SequenceScope, SequenceSeed, ZeroSeed, GLOBAL_KEY,
};
pub use signature::{SignatureAlgorithm, Signer};
pub use strategy::Strategy;
pub use validator::MuidValidator;
