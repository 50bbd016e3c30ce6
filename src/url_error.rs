use url::ParseError;

use crate::ConfigError;

/// Ways an `otpauth://` provisioning URI can fail to parse.
#[derive(Debug, Eq, PartialEq, thiserror::Error)]
pub enum TotpUrlError {
    #[error("Error parsing URL: {0}")]
    Url(ParseError),
    #[error("Scheme should be otpauth, not \"{0}\"")]
    Scheme(String),
    #[error("Host should be totp, not \"{0}\"")]
    Host(String),
    /// The secret itself is not echoed back.
    #[error("Secret parameter is missing or holds no base32 character")]
    Secret,
    #[error("Algorithm can only be SHA1, SHA256 or SHA512, not \"{0}\"")]
    Algorithm(String),
    #[error("Could not parse \"{0}\" as a number.")]
    Digits(String),
    #[error("Could not parse \"{0}\" as a number.")]
    Step(String),
    #[error("Couldn't URL decode \"{0}\"")]
    LabelDecoding(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use crate::{ConfigError, TotpUrlError};

    #[test]
    fn algorithm() {
        let error = TotpUrlError::Algorithm("SIKE".to_string());
        assert_eq!(
            error.to_string(),
            "Algorithm can only be SHA1, SHA256 or SHA512, not \"SIKE\"".to_string()
        )
    }

    #[test]
    fn digits() {
        let error = TotpUrlError::Digits("six".to_string());
        assert_eq!(
            error.to_string(),
            "Could not parse \"six\" as a number.".to_string()
        )
    }

    #[test]
    fn host() {
        let error = TotpUrlError::Host("hotp".to_string());
        assert_eq!(
            error.to_string(),
            "Host should be totp, not \"hotp\"".to_string()
        )
    }

    #[test]
    fn label_decoding() {
        let error = TotpUrlError::LabelDecoding("%C3%28".to_string());
        assert_eq!(error.to_string(), "Couldn't URL decode \"%C3%28\"".to_string())
    }

    #[test]
    fn scheme() {
        let error = TotpUrlError::Scheme("https".to_string());
        assert_eq!(
            error.to_string(),
            "Scheme should be otpauth, not \"https\"".to_string()
        )
    }

    #[test]
    fn secret() {
        assert_eq!(
            TotpUrlError::Secret.to_string(),
            "Secret parameter is missing or holds no base32 character"
        )
    }

    #[test]
    fn config() {
        let error: TotpUrlError = ConfigError::InvalidDigits(5).into();
        assert_eq!(error, TotpUrlError::Config(ConfigError::InvalidDigits(5)));
    }

    #[test]
    fn url() {
        let error = TotpUrlError::Url(url::ParseError::EmptyHost);
        assert_eq!(
            error.to_string(),
            "Error parsing URL: empty host".to_string()
        )
    }
}
