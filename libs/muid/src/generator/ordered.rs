//! Time-sortable strategy: `prefix_<timestamp><random>[<signature>]`.

use std::sync::Arc;

use tracing::warn;

use crate::clock::Clock;
use crate::components::{Components, OrderedComponents};
use crate::encoder::{Encoder, TIMESTAMP_LENGTH};
use crate::error::MuidError;
use crate::format::{self, SEPARATOR};
use crate::prefix::PrefixPolicy;
use crate::signature::Signer;

use super::{body_length, matches_prefix};

/// Fewest random characters an ordered body may carry.
pub const MIN_RANDOM_LENGTH: usize = 4;

/// Generator for the `ordered` strategy.
#[derive(Debug)]
pub struct OrderedGenerator {
    encoder: Encoder,
    prefixes: Arc<PrefixPolicy>,
    clock: Arc<dyn Clock>,
    signer: Option<Signer>,
    default_max_length: usize,
}

impl OrderedGenerator {
    pub(crate) fn new(
        encoder: Encoder,
        prefixes: Arc<PrefixPolicy>,
        clock: Arc<dyn Clock>,
        signer: Option<Signer>,
        default_max_length: usize,
    ) -> Self {
        Self {
            encoder,
            prefixes,
            clock,
            signer,
            default_max_length,
        }
    }

    fn signature_length(&self) -> usize {
        self.signer.as_ref().map_or(0, Signer::length)
    }

    /// Generates `prefix_` + timestamp + random fill (+ signature) of exactly `max_length`.
    pub fn generate(&self, prefix: &str, max_length: Option<usize>) -> Result<String, MuidError> {
        self.prefixes.check(prefix)?;

        let max_length = max_length.unwrap_or(self.default_max_length);
        let too_short = || {
            MuidError::invalid_input(format!(
                "max length {max_length} is too short for prefix '{prefix}' with ordered strategy"
            ))
        };

        let body_length = body_length(prefix, max_length).map_err(|_| too_short())?;
        let random_length = body_length
            .checked_sub(TIMESTAMP_LENGTH + self.signature_length())
            .filter(|n| *n >= MIN_RANDOM_LENGTH)
            .ok_or_else(too_short)?;

        let mut body = self
            .encoder
            .encode_timestamp(self.clock.now_ms(), TIMESTAMP_LENGTH)?;
        body.push_str(&self.encoder.random_string(random_length));

        if let Some(signer) = &self.signer {
            let signature = signer.sign(prefix, &body);
            body.push_str(&signature);
        }

        Ok(format!("{prefix}{SEPARATOR}{body}"))
    }

    /// Parses an ordered identifier.
    pub fn parse(&self, muid: &str) -> Option<Components> {
        let (prefix, body) = format::split(muid)?;

        if !self.prefixes.is_valid(prefix) || !self.encoder.is_valid(body) {
            return None;
        }

        if body.len() < TIMESTAMP_LENGTH + MIN_RANDOM_LENGTH {
            return None;
        }

        // Bodies too short to carry a signature parse as unsigned.
        let signature_length = match self.signature_length() {
            n if body.len() > TIMESTAMP_LENGTH + n => n,
            _ => 0,
        };

        // Body is pure ASCII once validated, so byte slicing is safe.
        let timestamp = self
            .encoder
            .decode_timestamp(&body[..TIMESTAMP_LENGTH])
            .ok()?;
        let random_end = body.len() - signature_length;
        let random = &body[TIMESTAMP_LENGTH..random_end];
        let signature = (signature_length > 0).then(|| &body[random_end..]);

        Some(Components::Ordered(OrderedComponents::new(
            prefix, body, timestamp, random, signature,
        )))
    }

    /// Validates structure, expected prefix, and signature when enabled.
    pub fn validate(&self, muid: &str, expected_prefix: Option<&str>) -> bool {
        let Some(components) = self.parse(muid) else {
            return false;
        };

        if !matches_prefix(&components, expected_prefix) {
            return false;
        }

        if let (Some(signer), Some(signature)) = (&self.signer, components.signature()) {
            let body = components.body();
            let unsigned = &body[..body.len() - signature.len()];
            if !signer.verify(components.prefix(), unsigned, signature) {
                warn!(muid, "signature mismatch");
                return false;
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU64, Ordering};

    use super::*;
    use crate::config::{PrefixConfig, SignatureConfig};
    use crate::encoder::Alphabet;
    use crate::signature::SignatureAlgorithm;

    #[derive(Debug)]
    struct StepClock(AtomicU64);

    impl Clock for StepClock {
        fn now_ms(&self) -> u64 {
            self.0.fetch_add(1, Ordering::SeqCst)
        }
    }

    fn generator(alphabet: Alphabet, signer: Option<SignatureConfig>) -> OrderedGenerator {
        let encoder = Encoder::new(alphabet);
        let prefixes = Arc::new(PrefixPolicy::new(&PrefixConfig::default()).unwrap());
        let clock = Arc::new(StepClock(AtomicU64::new(1_705_000_000_000)));
        let signer = signer.map(|config| Signer::new(&config, encoder));
        OrderedGenerator::new(encoder, prefixes, clock, signer, 36)
    }

    fn signed(length: usize) -> Option<SignatureConfig> {
        Some(SignatureConfig {
            enabled: true,
            length,
            algorithm: SignatureAlgorithm::Crc32,
            secret: "app-key".into(),
        })
    }

    #[test]
    fn test_generate_fills_max_length() {
        let g = generator(Alphabet::Base62, None);
        let muid = g.generate("usr", None).unwrap();
        assert!(muid.starts_with("usr_"));
        assert_eq!(muid.len(), 36);
        assert!(g.validate(&muid, None));

        let muid = g.generate("usr", Some(24)).unwrap();
        assert_eq!(muid.len(), 24);
    }

    #[test]
    fn test_generate_too_short() {
        let g = generator(Alphabet::Base62, None);
        // 3 + 1 + 8 + 4 = 16 is the minimum for "usr".
        assert!(g.generate("usr", Some(16)).is_ok());
        assert!(g.generate("usr", Some(15)).unwrap_err().is_invalid_input());
        assert!(g.generate("customer", Some(16)).unwrap_err().is_invalid_input());
        assert!(g.generate("usr", Some(2)).unwrap_err().is_invalid_input());
    }

    #[test]
    fn test_generate_rejects_prefix() {
        let g = generator(Alphabet::Base62, None);
        assert!(g.generate("1usr", None).unwrap_err().is_invalid_input());
    }

    #[test]
    fn test_parse_components() {
        let g = generator(Alphabet::Base62, None);
        let muid = g.generate("usr", None).unwrap();
        let c = g.parse(&muid).unwrap();

        assert_eq!(c.prefix(), "usr");
        assert_eq!(c.timestamp(), Some(1_705_000_000_000));
        assert_eq!(c.random().unwrap().len(), 36 - 4 - 8);
        assert_eq!(c.signature(), None);
        assert_eq!(c.to_string(), muid);
    }

    #[test]
    fn test_parse_rejects() {
        let g = generator(Alphabet::Base62, None);
        assert!(g.parse("usr_0OjWdK4gABC").is_none()); // too short
        assert!(g.parse("usr_!!!invalid!!!").is_none());
        assert!(g.parse("1usr_0OjWdK4gABCD").is_none());
        assert!(g.parse("usr").is_none());
        assert!(g.parse("us__0OjWdK4gABCD").is_none());
        assert!(g.parse("usr_0OjWdK4gABCD").is_some());
    }

    #[test]
    fn test_bodies_sort_by_time() {
        let g = generator(Alphabet::Base62, None);
        let muids: Vec<String> = (0..50).map(|_| g.generate("usr", None).unwrap()).collect();
        for pair in muids.windows(2) {
            assert!(pair[0][4..12] < pair[1][4..12]);
        }
    }

    #[test]
    fn test_base36_bodies() {
        let g = generator(Alphabet::Base36, None);
        let muid = g.generate("usr", None).unwrap();
        assert!(muid[4..].bytes().all(|b| b.is_ascii_digit() || b.is_ascii_lowercase()));
        assert!(g.validate(&muid, Some("usr")));
    }

    #[test]
    fn test_signature_roundtrip() {
        let g = generator(Alphabet::Base62, signed(4));
        let muid = g.generate("usr", None).unwrap();
        assert_eq!(muid.len(), 36);

        let c = g.parse(&muid).unwrap();
        assert_eq!(c.signature().unwrap().len(), 4);
        assert_eq!(c.random().unwrap().len(), 36 - 4 - 8 - 4);
        assert!(g.validate(&muid, Some("usr")));
    }

    #[test]
    fn test_signature_detects_tampering() {
        let g = generator(Alphabet::Base62, signed(6));
        let muid = g.generate("usr", None).unwrap();

        // Flip one random character.
        let mut bytes = muid.into_bytes();
        bytes[14] = if bytes[14] == b'a' { b'b' } else { b'a' };
        let tampered = String::from_utf8(bytes).unwrap();

        assert!(g.parse(&tampered).is_some());
        assert!(!g.validate(&tampered, None));
    }

    #[test]
    fn test_signature_reserves_room() {
        let g = generator(Alphabet::Base62, signed(4));
        assert!(g.generate("usr", Some(19)).unwrap_err().is_invalid_input());
        assert!(g.generate("usr", Some(20)).is_ok());
    }

    #[test]
    fn test_signed_config_parses_short_body_as_unsigned() {
        let g = generator(Alphabet::Base62, signed(4));
        let c = g.parse("usr_0OjWdK4gABCD").unwrap();
        assert_eq!(c.random(), Some("ABCD"));
        assert_eq!(c.signature(), None);
        assert!(!c.has_signature());
        assert!(g.validate("usr_0OjWdK4gABCD", Some("usr")));

        // One character past timestamp + signature is enough to split it off.
        let c = g.parse("usr_0OjWdK4gABCDE").unwrap();
        assert_eq!(c.random(), Some("A"));
        assert_eq!(c.signature(), Some("BCDE"));

        assert!(g.parse("usr_0OjWdK4gABC").is_none());
    }

    #[test]
    fn test_validate_expected_prefix() {
        let g = generator(Alphabet::Base62, None);
        let muid = g.generate("usr", None).unwrap();
        assert!(g.validate(&muid, Some("usr")));
        assert!(!g.validate(&muid, Some("cus")));
    }
}
