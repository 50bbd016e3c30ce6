use crate::Algorithm;

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

/// Step length, in seconds, recommended by [rfc-6238](https://tools.ietf.org/html/rfc6238#section-5.2) and assumed by authenticator apps.
pub const DEFAULT_STEP: u64 = 30;
/// Code length assumed by authenticator apps.
pub const DEFAULT_DIGITS: usize = 6;
/// Steps accepted on each side of the current one.
pub const DEFAULT_SKEW: u8 = 1;

/// Configuration values an engine can't be built with.
#[derive(Debug, Clone, Copy, Eq, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// A zero-length step would put every instant in the same, undefined, time step.
    #[error("Step must be at least one second long")]
    InvalidStep,
    /// Implementations MUST extract a 6-digit code at a minimum and possibly 7 and 8-digit code
    #[error("Implementations MUST extract a 6-digit code at a minimum and possibly 7 and 8-digit code. {0} digits is not allowed")]
    InvalidDigits(usize),
}

pub(crate) fn assert_digits(digits: usize) -> Result<(), ConfigError> {
    if !(6..=8).contains(&digits) {
        Err(ConfigError::InvalidDigits(digits))
    } else {
        Ok(())
    }
}

pub(crate) fn assert_step(step: u64) -> Result<(), ConfigError> {
    if step == 0 {
        Err(ConfigError::InvalidStep)
    } else {
        Ok(())
    }
}

/// Everything but the secret needed to build a [Totp](crate::Totp).
///
/// Holds nothing sensitive, so it can live in an application's configuration file
/// (with the `serde_support` feature).
///
/// # Example
/// ```
/// use totp_engine::{Algorithm, Secret, Totp, TotpConfig};
///
/// let mut config = TotpConfig::default();
/// config.step(60).unwrap();
/// config.skew(2);
/// config.algorithm(Algorithm::SHA256);
///
/// let totp = Totp::with_config(Secret::Encoded("JBSWY3DPEHPK3PXP".to_string()), &config).unwrap();
/// assert_eq!(totp.step(), 60);
/// ```
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde_support", serde(default))]
pub struct TotpConfig {
    /// SHA-1 unless every client is known to support something else.
    pub(crate) algorithm: Algorithm,
    /// The number of digits composing the auth code. Per [rfc-4226](https://tools.ietf.org/html/rfc4226#section-5.3), this can oscilate between 6 and 8 digits
    pub(crate) digits: usize,
    /// Number of steps tolerated on each side of the current one by [Totp::validate](crate::Totp::validate).
    /// Larger values absorb more clock drift but accept each code for longer.
    pub(crate) skew: u8,
    /// Duration in seconds of a step.
    pub(crate) step: u64,
    /// Refuse base32 secrets carrying anything but alphabet characters and trailing padding.
    pub(crate) strict: bool,
}

impl Default for TotpConfig {
    fn default() -> Self {
        TotpConfig {
            algorithm: Algorithm::SHA1,
            digits: DEFAULT_DIGITS,
            skew: DEFAULT_SKEW,
            step: DEFAULT_STEP,
            strict: false,
        }
    }
}

impl TotpConfig {
    /// Default configuration with a custom step length.
    ///
    /// # Errors
    ///
    /// Will return [ConfigError::InvalidStep] when `step` is 0
    pub fn new(step: u64) -> Result<TotpConfig, ConfigError> {
        assert_step(step)?;
        Ok(TotpConfig {
            step,
            ..TotpConfig::default()
        })
    }

    /// Set the `algorithm`
    pub fn algorithm(&mut self, value: Algorithm) -> &mut Self {
        self.algorithm = value;
        self
    }

    /// Set the `digits`, between 6 and 8
    pub fn digits(&mut self, value: usize) -> Result<&mut Self, ConfigError> {
        assert_digits(value)?;
        self.digits = value;
        Ok(self)
    }

    /// Set the `step`, in seconds
    pub fn step(&mut self, value: u64) -> Result<&mut Self, ConfigError> {
        assert_step(value)?;
        self.step = value;
        Ok(self)
    }

    /// Set the default validation window
    pub fn skew(&mut self, value: u8) -> &mut Self {
        self.skew = value;
        self
    }

    /// Switch between lenient and strict secret decoding
    pub fn strict(&mut self, value: bool) -> &mut Self {
        self.strict = value;
        self
    }

    /// Check values that may have bypassed the setters, e.g. through deserialization.
    pub fn validate(&self) -> Result<(), ConfigError> {
        assert_step(self.step)?;
        assert_digits(self.digits)
    }
}
