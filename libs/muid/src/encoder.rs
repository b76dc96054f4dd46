//! Positional base-N codec over a fixed alphabet.
//!
//! Two alphabets are supported:
//!
//! - `base62`: `0-9A-Za-z` (compact, case-sensitive)
//! - `base36`: `0-9a-z` (case-insensitive friendly, slightly longer)
//!
//! Both alphabets start with `0`, which doubles as the padding character.
//!
//! # Byte strings
//!
//! Byte strings are treated as one big-endian unsigned integer of arbitrary
//! width. Leading zero bytes carry no numeric value, so each leading `0x00`
//! is written as one leading zero symbol and the remaining bytes are encoded
//! as a minimal integer. Decoding reverses this exactly: every leading zero
//! symbol becomes a `0x00` byte. This makes `decode_bytes(encode_bytes(b))`
//! equal to `b` for every input, including all-zero and empty inputs.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::MuidError;

const BASE62_CHARS: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
const BASE36_CHARS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Width of the timestamp field used by sortable bodies.
pub const TIMESTAMP_LENGTH: usize = 8;

/// The character set used for encoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alphabet {
    /// Digits, uppercase, lowercase.
    #[default]
    Base62,
    /// Digits and lowercase.
    Base36,
}

impl Alphabet {
    /// Returns the configuration name of this alphabet.
    pub fn name(&self) -> &'static str {
        match self {
            Alphabet::Base62 => "base62",
            Alphabet::Base36 => "base36",
        }
    }

    /// Returns the symbols in ascending digit order.
    pub fn symbols(&self) -> &'static [u8] {
        match self {
            Alphabet::Base62 => BASE62_CHARS,
            Alphabet::Base36 => BASE36_CHARS,
        }
    }

    /// Returns the numeric base.
    pub fn base(&self) -> u32 {
        match self {
            Alphabet::Base62 => 62,
            Alphabet::Base36 => 36,
        }
    }

    fn digit(&self, symbol: u8) -> Option<u32> {
        let value = match (self, symbol) {
            (_, b'0'..=b'9') => symbol - b'0',
            (Alphabet::Base62, b'A'..=b'Z') => symbol - b'A' + 10,
            (Alphabet::Base62, b'a'..=b'z') => symbol - b'a' + 36,
            (Alphabet::Base36, b'a'..=b'z') => symbol - b'a' + 10,
            _ => return None,
        };
        Some(u32::from(value))
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Alphabet {
    type Err = MuidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "base62" => Ok(Alphabet::Base62),
            "base36" => Ok(Alphabet::Base36),
            other => Err(MuidError::invalid_input(format!(
                "unsupported encoding type: {other}"
            ))),
        }
    }
}

/// Encoder bound to one alphabet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Encoder {
    alphabet: Alphabet,
}

impl Encoder {
    /// Creates an encoder for the given alphabet.
    #[must_use]
    pub const fn new(alphabet: Alphabet) -> Self {
        Self { alphabet }
    }

    /// Returns the active alphabet.
    pub fn alphabet(&self) -> Alphabet {
        self.alphabet
    }

    /// Returns the active character set.
    pub fn charset(&self) -> &'static str {
        // Both tables are ASCII.
        std::str::from_utf8(self.alphabet.symbols()).unwrap_or_default()
    }

    /// Returns the numeric base (62 or 36).
    pub fn base(&self) -> u32 {
        self.alphabet.base()
    }

    fn zero(&self) -> char {
        char::from(self.alphabet.symbols()[0])
    }

    fn symbol(&self, digit: u32) -> char {
        char::from(self.alphabet.symbols()[digit as usize])
    }

    /// Encodes an integer, most-significant digit first.
    pub fn encode_int(&self, mut n: u64) -> String {
        if n == 0 {
            return self.zero().to_string();
        }

        let base = u64::from(self.base());
        let mut digits = Vec::new();
        while n > 0 {
            digits.push(self.symbol((n % base) as u32));
            n /= base;
        }
        digits.iter().rev().collect()
    }

    /// Encodes a signed integer, rejecting negative values.
    pub fn encode_signed(&self, n: i64) -> Result<String, MuidError> {
        let n = u64::try_from(n)
            .map_err(|_| MuidError::invalid_input(format!("number must be non-negative: {n}")))?;
        Ok(self.encode_int(n))
    }

    /// Decodes text produced by [`Encoder::encode_int`].
    ///
    /// The empty string decodes to zero.
    pub fn decode_int(&self, text: &str) -> Result<u64, MuidError> {
        let base = u64::from(self.base());
        let mut n: u64 = 0;

        for symbol in text.bytes() {
            let digit = self.digit_of(symbol)?;
            n = n
                .checked_mul(base)
                .and_then(|n| n.checked_add(u64::from(digit)))
                .ok_or_else(|| {
                    MuidError::overflow(format!("'{text}' does not fit in 64 bits"))
                })?;
        }

        Ok(n)
    }

    /// Encodes an integer left-padded with the zero symbol to exactly `length`.
    pub fn encode_int_padded(&self, n: u64, length: usize) -> Result<String, MuidError> {
        let encoded = self.encode_int(n);
        self.pad(encoded, length)
    }

    /// Encodes a byte string as one big-endian integer.
    ///
    /// Each leading zero byte becomes one leading zero symbol.
    pub fn encode_bytes(&self, bytes: &[u8]) -> String {
        let zeros = bytes.iter().take_while(|b| **b == 0).count();
        let base = self.base();

        // Little-endian base-N digits of the non-zero tail.
        let mut digits: Vec<u32> = Vec::with_capacity(bytes.len() * 2);
        for &byte in &bytes[zeros..] {
            let mut carry = u32::from(byte);
            for digit in digits.iter_mut() {
                carry += *digit << 8;
                *digit = carry % base;
                carry /= base;
            }
            while carry > 0 {
                digits.push(carry % base);
                carry /= base;
            }
        }

        let mut out = String::with_capacity(zeros + digits.len());
        out.extend(std::iter::repeat_n(self.zero(), zeros));
        out.extend(digits.iter().rev().map(|d| self.symbol(*d)));
        out
    }

    /// Decodes text produced by [`Encoder::encode_bytes`].
    pub fn decode_bytes(&self, text: &str) -> Result<Vec<u8>, MuidError> {
        let zero = self.alphabet.symbols()[0];
        let zeros = text.bytes().take_while(|s| *s == zero).count();
        let base = self.base();

        // Little-endian bytes of the tail.
        let mut bytes: Vec<u8> = Vec::with_capacity(text.len());
        for symbol in text.bytes().skip(zeros) {
            let mut carry = self.digit_of(symbol)?;
            for byte in bytes.iter_mut() {
                carry += u32::from(*byte) * base;
                *byte = (carry & 0xff) as u8;
                carry >>= 8;
            }
            while carry > 0 {
                bytes.push((carry & 0xff) as u8);
                carry >>= 8;
            }
        }

        let mut out = vec![0u8; zeros];
        out.extend(bytes.iter().rev());
        Ok(out)
    }

    /// Encodes a byte string left-padded with the zero symbol to exactly `length`.
    pub fn encode_bytes_padded(&self, bytes: &[u8], length: usize) -> Result<String, MuidError> {
        let encoded = self.encode_bytes(bytes);
        self.pad(encoded, length)
    }

    /// Generates a uniformly random string over the alphabet.
    ///
    /// Suitable for identifier entropy, not for secrets.
    pub fn random_string(&self, length: usize) -> String {
        let symbols = self.alphabet.symbols();
        let mut rng = rand::rng();
        (0..length)
            .map(|_| char::from(symbols[rng.random_range(0..symbols.len())]))
            .collect()
    }

    /// Returns true if every character belongs to the alphabet.
    ///
    /// The empty string is valid.
    pub fn is_valid(&self, text: &str) -> bool {
        text.bytes().all(|s| self.alphabet.digit(s).is_some())
    }

    /// Encodes a millisecond timestamp as a fixed-width sortable field.
    pub fn encode_timestamp(&self, timestamp_ms: u64, length: usize) -> Result<String, MuidError> {
        self.encode_int_padded(timestamp_ms, length)
    }

    /// Decodes a timestamp field back to milliseconds.
    pub fn decode_timestamp(&self, text: &str) -> Result<u64, MuidError> {
        self.decode_int(text)
    }

    fn digit_of(&self, symbol: u8) -> Result<u32, MuidError> {
        self.alphabet.digit(symbol).ok_or_else(|| {
            MuidError::invalid_input(format!(
                "invalid character in {} string: {:?}",
                self.alphabet,
                char::from(symbol)
            ))
        })
    }

    fn pad(&self, encoded: String, length: usize) -> Result<String, MuidError> {
        if encoded.len() > length {
            return Err(MuidError::overflow(format!(
                "encoded value '{encoded}' exceeds maximum length of {length}"
            )));
        }

        let mut out = String::with_capacity(length);
        out.extend(std::iter::repeat_n(self.zero(), length - encoded.len()));
        out.push_str(&encoded);
        Ok(out)
    }
}
