//! Time-based one-time passwords, as per [rfc-6238](https://tools.ietf.org/html/rfc6238).
//!
//! An engine is built once from a shared secret and a step length. It then derives the
//! code of the current time step, validates user supplied codes against a window of
//! neighbouring steps, and builds the `otpauth://` URI authenticator apps import.
//!
//! Base32 secrets are decoded leniently by default: anything outside the alphabet is
//! ignored, so a secret typed with spaces or padding still works, and a garbage secret
//! silently produces codes no client will ever match. Use a strict [TotpConfig] to
//! refuse such secrets instead.
//!
//! # Examples
//!
//! ```rust
//! use totp_engine::Totp;
//!
//! let totp = Totp::new("JBSWY3DPEHPK3PXP", 30).unwrap();
//! let code = totp.now().unwrap();
//! assert!(totp.validate(&code).unwrap());
//! ```
//!
//! ```rust
//! # #[cfg(feature = "otpauth")] {
//! use totp_engine::Totp;
//!
//! let totp = Totp::new("JBSWY3DPEHPK3PXP", 30).unwrap();
//! assert_eq!(
//!     totp.get_url("alice@example.com", "Example Co"),
//!     "otpauth://totp/alice%40example.com?secret=JBSWY3DPEHPK3PXP&issuer=Example%20Co"
//! );
//! # }
//! ```

pub mod codec;
mod config;
mod error;
pub mod hotp;
#[cfg(feature = "otpauth")]
mod provisioning;
mod secret;
#[cfg(feature = "otpauth")]
mod url_error;

pub use config::{ConfigError, TotpConfig, DEFAULT_DIGITS, DEFAULT_SKEW, DEFAULT_STEP};
pub use error::TotpError;
pub use hotp::Algorithm;
#[cfg(feature = "otpauth")]
pub use provisioning::ProvisioningUri;
pub use secret::{Secret, SecretParseError, DEFAULT_SECRET_LENGTH};
#[cfg(feature = "otpauth")]
pub use url_error::TotpUrlError;

use constant_time_eq::constant_time_eq;

use core::fmt;

use std::time::{SystemTime, SystemTimeError, UNIX_EPOCH};

fn system_time() -> Result<u64, SystemTimeError> {
    let t = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
    Ok(t)
}

/// A TOTP engine: one secret, one configuration, both fixed for its whole lifetime.
///
/// Every method takes `&self` and nothing is mutated after construction, so an engine can be
/// shared between threads freely.
#[derive(Clone)]
pub struct Totp {
    algorithm: Algorithm,
    digits: usize,
    skew: u8,
    step: u64,
    /// As handed over at construction, used for provisioning.
    secret: Secret,
    /// Decoded once, so every derivation uses the same key.
    key: Vec<u8>,
}

impl PartialEq for Totp {
    /// Compares everything that takes part in code generation, the key in constant time.
    fn eq(&self, other: &Self) -> bool {
        if self.algorithm != other.algorithm {
            return false;
        }
        if self.digits != other.digits {
            return false;
        }
        if self.skew != other.skew {
            return false;
        }
        if self.step != other.step {
            return false;
        }
        constant_time_eq(&self.key, &other.key)
    }
}

impl fmt::Debug for Totp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Totp")
            .field("algorithm", &self.algorithm)
            .field("digits", &self.digits)
            .field("skew", &self.skew)
            .field("step", &self.step)
            .field("secret", &"<redacted>")
            .finish()
    }
}

impl fmt::Display for Totp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "digits: {}; step: {}; alg: {}; skew: {}",
            self.digits, self.step, self.algorithm, self.skew,
        )
    }
}

#[cfg(feature = "zeroize")]
impl Drop for Totp {
    fn drop(&mut self) {
        use zeroize::Zeroize;

        self.key.zeroize();
    }
}

impl Totp {
    /// Engine with the default configuration (SHA-1, 6 digits, window of 1) and a custom step.
    ///
    /// `secret` may be a base32 `&str`/`String` or a [Secret].
    ///
    /// ```rust
    /// use totp_engine::{Secret, Totp};
    ///
    /// let totp = Totp::new("JBSWY3DPEHPK3PXP", 30).unwrap();
    /// let same = Totp::new(Secret::Encoded("jbsw y3dp ehpk 3pxp".to_string()), 30).unwrap();
    /// assert_eq!(totp, same);
    /// ```
    ///
    /// # Errors
    ///
    /// Will return [TotpError::Config] when `step` is 0
    pub fn new<S: Into<Secret>>(secret: S, step: u64) -> Result<Totp, TotpError> {
        let config = TotpConfig::new(step)?;
        Totp::with_config(secret, &config)
    }

    /// Engine built from an explicit [TotpConfig].
    ///
    /// # Errors
    ///
    /// Will return [TotpError::Config] for an invalid step or digit count, and
    /// [TotpError::Secret] when the configuration is strict and the secret isn't clean base32.
    pub fn with_config<S: Into<Secret>>(secret: S, config: &TotpConfig) -> Result<Totp, TotpError> {
        config.validate()?;
        let secret = secret.into();
        let key = if config.strict {
            secret.to_bytes_strict()?
        } else {
            secret.to_bytes()
        };

        Ok(Totp::assemble(secret, key, config))
    }

    /// Build from an already validated configuration and decoded key.
    pub(crate) fn assemble(secret: Secret, key: Vec<u8>, config: &TotpConfig) -> Totp {
        tracing::debug!(
            algorithm = %config.algorithm,
            digits = config.digits,
            step = config.step,
            skew = config.skew,
            strict = config.strict,
            key_len = key.len(),
            "created TOTP engine"
        );

        Totp {
            algorithm: config.algorithm,
            digits: config.digits,
            skew: config.skew,
            step: config.step,
            secret,
            key,
        }
    }

    /// Generate a random base32 secret of `length` characters, see [Secret::generate_with_length].
    #[cfg(feature = "gen_secret")]
    #[cfg_attr(docsrs, doc(cfg(feature = "gen_secret")))]
    pub fn generate_secret(length: usize) -> String {
        Secret::generate_with_length(length).to_string()
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn digits(&self) -> usize {
        self.digits
    }

    /// Default validation window, in steps on each side of the current one.
    pub fn skew(&self) -> u8 {
        self.skew
    }

    /// Duration of a step, in seconds.
    pub fn step(&self) -> u64 {
        self.step
    }

    /// Time step containing the given Unix timestamp in seconds.
    pub fn counter_at(&self, time: u64) -> u64 {
        time / self.step
    }

    /// Will generate the code of the given time step
    pub fn generate_at_counter(&self, counter: u64) -> String {
        hotp::derive(self.algorithm, &self.key, counter, self.digits)
    }

    /// Will generate a token given the provided timestamp in seconds
    pub fn generate(&self, time: u64) -> String {
        self.generate_at_counter(self.counter_at(time))
    }

    /// Generate a token from the current system time
    pub fn now(&self) -> Result<String, TotpError> {
        let t = system_time()?;
        Ok(self.generate(t))
    }

    /// Returns the timestamp of the first second for the next step
    /// given the provided timestamp in seconds
    pub fn next_step(&self, time: u64) -> u64 {
        self.counter_at(time)
            .saturating_add(1)
            .saturating_mul(self.step)
    }

    /// Returns the timestamp of the first second of the next step
    /// According to system time
    pub fn next_step_current(&self) -> Result<u64, TotpError> {
        let t = system_time()?;
        Ok(self.next_step(t))
    }

    /// Give the ttl (in seconds) of the current token
    pub fn ttl(&self) -> Result<u64, TotpError> {
        let t = system_time()?;
        Ok(self.step - (t % self.step))
    }

    /// Will check if token is valid at the provided timestamp in seconds, accepting any step
    /// in `[current - window, current + window]`.
    ///
    /// Each candidate is compared in constant time. Steps before the epoch or past `u64::MAX`
    /// are not considered.
    pub fn check(&self, token: &str, window: u8, time: u64) -> bool {
        let current = self.counter_at(time);
        let first = current.saturating_sub(u64::from(window));
        let last = current.saturating_add(u64::from(window));

        for counter in first..=last {
            if constant_time_eq(self.generate_at_counter(counter).as_bytes(), token.as_bytes()) {
                tracing::trace!(
                    window,
                    offset = counter.wrapping_sub(current) as i64,
                    "token accepted"
                );
                return true;
            }
        }
        tracing::trace!(window, "token rejected");
        false
    }

    /// Will check if token is valid by current system time, within the configured [skew](Totp::skew)
    pub fn validate(&self, token: &str) -> Result<bool, TotpError> {
        self.validate_with_window(token, self.skew)
    }

    /// Will check if token is valid by current system time, within `window` steps
    pub fn validate_with_window(&self, token: &str, window: u8) -> Result<bool, TotpError> {
        let t = system_time()?;
        Ok(self.check(token, window, t))
    }

    /// Will return the base32 representation of the secret, which might be useful when users want to manually add the secret to their authenticator
    pub fn get_secret_base32(&self) -> String {
        self.secret.to_base32()
    }
}
