use std::time::SystemTimeError;

use crate::{ConfigError, SecretParseError};

/// Errors raised while building an engine or reading the clock.
///
/// Code mismatches are not errors: validation returns `Ok(false)`.
#[derive(Debug, thiserror::Error)]
pub enum TotpError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Only raised by engines configured as strict.
    #[error("Invalid secret: {0}")]
    Secret(#[from] SecretParseError),
    /// The system clock reads a time before the Unix epoch.
    #[error("System time is before the Unix epoch: {0}")]
    Time(#[from] SystemTimeError),
}
