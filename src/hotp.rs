//! Counter based code derivation, as per [rfc-4226](https://tools.ietf.org/html/rfc4226#section-5.3).
//!
//! ```rust
//! use totp_engine::{hotp, Algorithm};
//!
//! let code = hotp::derive(Algorithm::SHA1, b"12345678901234567890", 1, 6);
//! assert_eq!(code, "287082");
//! ```

use core::fmt;

use hmac::Mac;

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

use crate::config::{assert_digits, ConfigError};

type HmacSha1 = hmac::Hmac<sha1::Sha1>;
type HmacSha256 = hmac::Hmac<sha2::Sha256>;
type HmacSha512 = hmac::Hmac<sha2::Sha512>;

/// Hash function underlying the HMAC, as permitted by the [reference implementation](https://tools.ietf.org/html/rfc6238#appendix-A).
///
/// `SHA1` is what Google-Authenticator compatible clients expect, and the default.
/// Some apps accept `SHA256`/`SHA512` in a provisioning URI but silently fall back to `SHA1`,
/// so only pick another one when every client is known to support it.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub enum Algorithm {
    #[default]
    SHA1,
    SHA256,
    SHA512,
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::SHA1 => f.write_str("SHA1"),
            Algorithm::SHA256 => f.write_str("SHA256"),
            Algorithm::SHA512 => f.write_str("SHA512"),
        }
    }
}

impl Algorithm {
    /// Parse the name used by the `algorithm` parameter of an otpauth URI. Case-insensitive.
    pub fn from_name(name: &str) -> Option<Algorithm> {
        match name.to_ascii_uppercase().as_str() {
            "SHA1" => Some(Algorithm::SHA1),
            "SHA256" => Some(Algorithm::SHA256),
            "SHA512" => Some(Algorithm::SHA512),
            _ => None,
        }
    }

    fn hash<D>(mut digest: D, data: &[u8]) -> Vec<u8>
    where
        D: Mac,
    {
        digest.update(data);
        digest.finalize().into_bytes().to_vec()
    }

    /// HMAC of `data` keyed with `key`. Any key length is accepted, including empty.
    pub fn sign(&self, key: &[u8], data: &[u8]) -> Vec<u8> {
        // HMAC pads or hashes the key to the block size, new_from_slice can't fail
        match self {
            Algorithm::SHA1 => Algorithm::hash(
                HmacSha1::new_from_slice(key).expect("HMAC accepts keys of any length"),
                data,
            ),
            Algorithm::SHA256 => Algorithm::hash(
                HmacSha256::new_from_slice(key).expect("HMAC accepts keys of any length"),
                data,
            ),
            Algorithm::SHA512 => Algorithm::hash(
                HmacSha512::new_from_slice(key).expect("HMAC accepts keys of any length"),
                data,
            ),
        }
    }
}

/// Dynamic truncation: 31-bit big endian integer read at the offset given by the low nibble of the last byte.
///
/// The digest must be at least 20 bytes long, which every [Algorithm] output is.
fn dynamic_truncation(digest: &[u8]) -> u32 {
    let offset = (digest[digest.len() - 1] & 0x0f) as usize;
    let bytes = [
        digest[offset],
        digest[offset + 1],
        digest[offset + 2],
        digest[offset + 3],
    ];
    u32::from_be_bytes(bytes) & 0x7fff_ffff
}

/// Reduce `value` to `digits` decimal digits, left-padded with zeroes.
fn format_code(value: u32, digits: usize) -> String {
    let exponent = u32::try_from(digits).unwrap_or(u32::MAX);
    let modulus = 10_u64.saturating_pow(exponent);
    format!("{1:00$}", digits, u64::from(value) % modulus)
}

/// Derive the code for `counter`. The counter is signed as 8 big endian bytes.
///
/// Pure function: the same inputs always give the same code.
///
/// `digits` is not checked: the code is left-padded to exactly that width, so keeping it
/// within 6..=8 is up to the caller. See [try_derive] for a checked variant.
pub fn derive(algorithm: Algorithm, key: &[u8], counter: u64, digits: usize) -> String {
    let digest = algorithm.sign(key, &counter.to_be_bytes());
    format_code(dynamic_truncation(&digest), digits)
}

/// [derive], refusing digit counts outside 6..=8.
///
/// # Errors
///
/// Will return [ConfigError::InvalidDigits] for any other `digits`
pub fn try_derive(
    algorithm: Algorithm,
    key: &[u8],
    counter: u64,
    digits: usize,
) -> Result<String, ConfigError> {
    assert_digits(digits)?;
    Ok(derive(algorithm, key, counter, digits))
}
