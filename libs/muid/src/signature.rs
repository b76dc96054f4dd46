//! Integrity checksum appended to ordered bodies.
//!
//! The checksum covers `prefix + body + secret` and is re-encoded in the
//! active alphabet, then truncated. It detects accidental corruption and
//! casual tampering; short signatures can be brute-forced and are not an
//! authentication mechanism.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::config::SignatureConfig;
use crate::encoder::{Alphabet, Encoder};
use crate::error::ConfigError;

/// Hash used to compute signatures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignatureAlgorithm {
    /// CRC-32 (IEEE).
    #[default]
    Crc32,
    /// First 64 bits of SHA-256.
    Sha256,
}

impl SignatureAlgorithm {
    /// Returns the algorithm name.
    pub fn as_str(&self) -> &'static str {
        match self {
            SignatureAlgorithm::Crc32 => "crc32",
            SignatureAlgorithm::Sha256 => "sha256",
        }
    }

    fn max_digest(&self) -> u64 {
        match self {
            SignatureAlgorithm::Crc32 => u64::from(u32::MAX),
            SignatureAlgorithm::Sha256 => u64::MAX,
        }
    }
}

impl fmt::Display for SignatureAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignatureAlgorithm {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "crc32" => Ok(SignatureAlgorithm::Crc32),
            "sha256" => Ok(SignatureAlgorithm::Sha256),
            other => Err(ConfigError::UnsupportedSignatureAlgorithm(other.to_string())),
        }
    }
}

/// Computes fixed-length signatures.
#[derive(Clone)]
pub struct Signer {
    algorithm: SignatureAlgorithm,
    length: usize,
    width: usize,
    secret: String,
    encoder: Encoder,
}

impl fmt::Debug for Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signer")
            .field("algorithm", &self.algorithm)
            .field("length", &self.length)
            .field("secret", &"<redacted>")
            .finish()
    }
}

impl Signer {
    /// Builds a signer from configuration.
    ///
    /// The length is expected to have passed [`crate::MuidConfig::validate`].
    pub fn new(config: &SignatureConfig, encoder: Encoder) -> Self {
        let width = Self::max_length(config.algorithm, encoder.alphabet());
        Self {
            algorithm: config.algorithm,
            length: config.length.min(width),
            width,
            secret: config.secret.clone(),
            encoder,
        }
    }

    /// Widest signature an algorithm can fill in an alphabet.
    pub fn max_length(algorithm: SignatureAlgorithm, alphabet: Alphabet) -> usize {
        Encoder::new(alphabet).encode_int(algorithm.max_digest()).len()
    }

    /// Number of characters appended to a body.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Computes the signature of `prefix` and an unsigned `body`.
    pub fn sign(&self, prefix: &str, body: &str) -> String {
        let digest = self.digest(prefix, body);
        // Fixed width so every signature has the configured length. The
        // leading digits of a padded digest are near-constant, so keep the tail.
        let mut encoded = self
            .encoder
            .encode_int_padded(digest, self.width)
            .unwrap_or_else(|_| self.encoder.encode_int(digest));
        let start = encoded.len().saturating_sub(self.length);
        encoded.split_off(start)
    }

    /// Returns true if `signature` matches `prefix` and `body`.
    pub fn verify(&self, prefix: &str, body: &str, signature: &str) -> bool {
        self.sign(prefix, body).as_bytes() == signature.as_bytes()
    }

    fn digest(&self, prefix: &str, body: &str) -> u64 {
        match self.algorithm {
            SignatureAlgorithm::Crc32 => {
                let mut hasher = crc32fast::Hasher::new();
                hasher.update(prefix.as_bytes());
                hasher.update(body.as_bytes());
                hasher.update(self.secret.as_bytes());
                u64::from(hasher.finalize())
            }
            SignatureAlgorithm::Sha256 => {
                let mut hasher = Sha256::new();
                hasher.update(prefix.as_bytes());
                hasher.update(body.as_bytes());
                hasher.update(self.secret.as_bytes());
                let result = hasher.finalize();
                let mut head = [0u8; 8];
                head.copy_from_slice(&result[..8]);
                u64::from_be_bytes(head)
            }
        }
    }
}
