//! Representation of a shared secret, either "raw" bytes or a base32 encoded String.
//!
//! # Examples
//!
//! - Create an engine from a base32 secret
//! ```
//! use totp_engine::{Secret, Totp};
//!
//! let secret = Secret::Encoded(String::from("JBSWY3DPEHPK3PXP"));
//! let totp = Totp::new(secret, 30).unwrap();
//!
//! println!("code from base32:\t{}", totp.now().unwrap());
//! ```
//!
//! - Create an engine from raw bytes
//! ```
//! use totp_engine::{Secret, Totp};
//!
//! let secret = Secret::Raw(b"12345678901234567890".to_vec());
//! let totp = Totp::new(secret, 30).unwrap();
//!
//! println!("code from raw secret:\t{}", totp.now().unwrap());
//! ```
//!
//! - Create an engine from a generated secret
//! ```
//! # #[cfg(feature = "gen_secret")] {
//! use totp_engine::{Secret, Totp};
//!
//! let secret = Secret::generate_secret();
//! let totp = Totp::new(secret.clone(), 30).unwrap();
//!
//! println!("secret {} gives code {}", secret, totp.now().unwrap());
//! # }
//! ```

use base32::Alphabet;
use constant_time_eq::constant_time_eq;

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

use crate::codec;

/// Length, in base32 characters, of secrets produced by [Secret::generate_secret].
/// 16 characters carry 80 bits.
pub const DEFAULT_SECRET_LENGTH: usize = 16;

/// Different ways strict secret parsing failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SecretParseError {
    /// No base32 symbol at all.
    #[error("Secret is empty or contains no base32 character.")]
    Empty,
    /// A character outside of the rfc-4648 alphabet.
    #[error("Character {character:?} at position {index} is not part of the base32 alphabet.")]
    InvalidCharacter { index: usize, character: char },
    /// Padding followed by more symbols.
    #[error("Padding starting at position {index} is followed by more symbols.")]
    MisplacedPadding { index: usize },
}

/// Shared secret between client and server to validate token against/generate token from.
#[derive(Clone, Eq)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "zeroize", derive(zeroize::Zeroize, zeroize::ZeroizeOnDrop))]
pub enum Secret {
    /// Non-encoded "raw" secret.
    Raw(Vec<u8>),
    /// Base32 encoded secret, as typed by a user or handed to an authenticator app.
    Encoded(String),
}

impl PartialEq for Secret {
    /// Will check that to_bytes() returns the same.
    /// One secret can be Raw, and the other Encoded.
    fn eq(&self, other: &Self) -> bool {
        constant_time_eq(&self.to_bytes(), &other.to_bytes())
    }
}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Secret::Raw(_) => f.write_str("Secret::Raw(<redacted>)"),
            Secret::Encoded(_) => f.write_str("Secret::Encoded(<redacted>)"),
        }
    }
}

impl From<String> for Secret {
    fn from(value: String) -> Self {
        Secret::Encoded(value)
    }
}

impl From<&str> for Secret {
    fn from(value: &str) -> Self {
        Secret::Encoded(value.to_string())
    }
}

impl From<Vec<u8>> for Secret {
    fn from(value: Vec<u8>) -> Self {
        Secret::Raw(value)
    }
}

#[cfg(feature = "gen_secret")]
#[cfg_attr(docsrs, doc(cfg(feature = "gen_secret")))]
impl Default for Secret {
    fn default() -> Self {
        Secret::generate_secret()
    }
}

impl Secret {
    /// Key bytes. Encoded secrets are decoded leniently, see [codec::decode].
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Secret::Raw(s) => s.to_vec(),
            Secret::Encoded(s) => codec::decode(s),
        }
    }

    /// Key bytes, refusing encoded secrets that aren't clean base32.
    pub fn to_bytes_strict(&self) -> Result<Vec<u8>, SecretParseError> {
        match self {
            Secret::Raw(s) => Ok(s.to_vec()),
            Secret::Encoded(s) => codec::decode_strict(s),
        }
    }

    /// Transform a `Secret::Encoded` into a `Secret::Raw`.
    pub fn to_raw(&self) -> Self {
        match self {
            Secret::Raw(_) => self.clone(),
            Secret::Encoded(s) => Secret::Raw(codec::decode(s)),
        }
    }

    /// Transform a `Secret::Raw` into a `Secret::Encoded`.
    ///
    /// Encoded secrets are brought to their canonical form, see [Secret::to_base32].
    pub fn to_encoded(&self) -> Self {
        Secret::Encoded(self.to_base32())
    }

    /// Canonical base32 text of this secret: upper case, without padding or any other
    /// non-alphabet character. Encoded secrets are filtered, not re-encoded.
    pub fn to_base32(&self) -> String {
        match self {
            Secret::Raw(s) => base32::encode(Alphabet::Rfc4648 { padding: false }, s),
            Secret::Encoded(s) => s
                .chars()
                .map(|c| c.to_ascii_uppercase())
                .filter(|c| c.is_ascii() && codec::ALPHABET.contains(&(*c as u8)))
                .collect(),
        }
    }

    /// Generate a [DEFAULT_SECRET_LENGTH] characters base32 secret from a CSPRNG.
    #[cfg(feature = "gen_secret")]
    #[cfg_attr(docsrs, doc(cfg(feature = "gen_secret")))]
    pub fn generate_secret() -> Secret {
        Secret::generate_with_length(DEFAULT_SECRET_LENGTH)
    }

    /// Generate a base32 secret of `length` characters, each drawn uniformly from the alphabet.
    ///
    /// Uses the thread-local generator of `rand`, a CSPRNG seeded from the OS.
    #[cfg(feature = "gen_secret")]
    #[cfg_attr(docsrs, doc(cfg(feature = "gen_secret")))]
    pub fn generate_with_length(length: usize) -> Secret {
        use rand::Rng;

        let mut rng = rand::rng();
        let secret = (0..length)
            .map(|_| codec::ALPHABET[rng.random_range(0..codec::ALPHABET.len())] as char)
            .collect();
        Secret::Encoded(secret)
    }
}

impl std::fmt::Display for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Secret::Raw(bytes) => {
                for b in bytes {
                    write!(f, "{:02x}", b)?;
                }
                Ok(())
            }
            Secret::Encoded(s) => write!(f, "{}", s),
        }
    }
}
