//! `otpauth://totp` provisioning URIs, the format authenticator apps import (usually through a QR code).
//!
//! Label and issuer are percent-encoded as per [rfc-3986](https://www.rfc-editor.org/rfc/rfc3986#section-2.3):
//! only unreserved characters are kept as is, a space becomes `%20`, never `+`.
//!
//! `algorithm`, `digits` and `period` are only written when they differ from what apps
//! assume (SHA1, 6, 30), so the URI always describes the engine that produced it.

use core::fmt;

use url::{Host, Url};

use crate::config::{assert_digits, assert_step};
use crate::{
    codec, Algorithm, Secret, Totp, TotpConfig, TotpUrlError, DEFAULT_DIGITS, DEFAULT_STEP,
};

const QR_CHART_URL: &str = "https://chart.googleapis.com/chart";

/// Parsed or to-be-written `otpauth://totp` URI.
#[derive(Clone, PartialEq, Eq)]
pub struct ProvisioningUri {
    /// Shown by the app next to the code, e.g. `alice@example.com`
    pub label: String,
    /// e.g. the name of your service/website
    pub issuer: Option<String>,
    /// Canonical base32, without padding
    pub secret: String,
    pub algorithm: Algorithm,
    pub digits: usize,
    /// Step length, in seconds
    pub period: u64,
}

impl fmt::Debug for ProvisioningUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProvisioningUri")
            .field("label", &self.label)
            .field("issuer", &self.issuer)
            .field("secret", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .field("digits", &self.digits)
            .field("period", &self.period)
            .finish()
    }
}

impl fmt::Display for ProvisioningUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "otpauth://totp/{}?secret={}",
            urlencoding::encode(&self.label),
            self.secret
        )?;
        if let Some(issuer) = &self.issuer {
            write!(f, "&issuer={}", urlencoding::encode(issuer))?;
        }
        if self.algorithm != Algorithm::SHA1 {
            write!(f, "&algorithm={}", self.algorithm)?;
        }
        if self.digits != DEFAULT_DIGITS {
            write!(f, "&digits={}", self.digits)?;
        }
        if self.period != DEFAULT_STEP {
            write!(f, "&period={}", self.period)?;
        }
        Ok(())
    }
}

impl ProvisioningUri {
    /// Parse an `otpauth://totp` URI. Unknown parameters are ignored, missing ones take
    /// their default value.
    ///
    /// # Errors
    ///
    /// Will return an error for another scheme or host, a missing or empty secret,
    /// and unparsable or out of range `algorithm`, `digits` or `period` values.
    pub fn parse<S: AsRef<str>>(uri: S) -> Result<ProvisioningUri, TotpUrlError> {
        let url = Url::parse(uri.as_ref()).map_err(TotpUrlError::Url)?;
        if url.scheme() != "otpauth" {
            return Err(TotpUrlError::Scheme(url.scheme().to_string()));
        }
        if url.host() != Some(Host::Domain("totp")) {
            return Err(TotpUrlError::Host(
                url.host_str().unwrap_or_default().to_string(),
            ));
        }

        let path = url.path().trim_start_matches('/');
        let label = urlencoding::decode(path)
            .map_err(|_| TotpUrlError::LabelDecoding(path.to_string()))?
            .into_owned();

        let mut parsed = ProvisioningUri {
            label,
            issuer: None,
            secret: String::new(),
            algorithm: Algorithm::SHA1,
            digits: DEFAULT_DIGITS,
            period: DEFAULT_STEP,
        };

        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "secret" => {
                    if codec::decode(&value).is_empty() {
                        return Err(TotpUrlError::Secret);
                    }
                    parsed.secret = Secret::Encoded(value.into_owned()).to_base32();
                }
                "issuer" => parsed.issuer = Some(value.into_owned()),
                "algorithm" => {
                    parsed.algorithm = Algorithm::from_name(&value)
                        .ok_or_else(|| TotpUrlError::Algorithm(value.to_string()))?;
                }
                "digits" => {
                    parsed.digits = value
                        .parse::<usize>()
                        .map_err(|_| TotpUrlError::Digits(value.to_string()))?;
                    assert_digits(parsed.digits)?;
                }
                "period" => {
                    parsed.period = value
                        .parse::<u64>()
                        .map_err(|_| TotpUrlError::Step(value.to_string()))?;
                    assert_step(parsed.period)?;
                }
                _ => {}
            }
        }

        if parsed.secret.is_empty() {
            return Err(TotpUrlError::Secret);
        }
        Ok(parsed)
    }

    /// Engine configuration described by this URI, with the default validation window.
    pub fn config(&self) -> TotpConfig {
        TotpConfig {
            algorithm: self.algorithm,
            digits: self.digits,
            step: self.period,
            ..TotpConfig::default()
        }
    }
}

impl Totp {
    /// Provisioning URI for this engine, with the given label (usually the account name) and issuer.
    pub fn provisioning_uri(&self, label: &str, issuer: &str) -> ProvisioningUri {
        ProvisioningUri {
            label: label.to_string(),
            issuer: Some(issuer.to_string()),
            secret: self.get_secret_base32(),
            algorithm: self.algorithm(),
            digits: self.digits(),
            period: self.step(),
        }
    }

    /// Will generate a standard URL used to automatically add TOTP auths. Usually used with qr codes
    ///
    /// Label and issuer will be URL-encoded if needed be
    /// Secret will be base 32'd without padding, as per RFC.
    pub fn get_url(&self, label: &str, issuer: &str) -> String {
        self.provisioning_uri(label, issuer).to_string()
    }

    /// URL of a Google Charts rendered QR code (`size` x `size` pixels) holding [Totp::get_url].
    ///
    /// No image is produced here, and the provisioning URI, secret included, ends up in a
    /// third party request: prefer rendering the QR code locally when possible.
    pub fn get_qr_code_url(&self, label: &str, issuer: &str, size: u32) -> String {
        format!(
            "{}?cht=qr&chs={1}x{1}&chl={2}",
            QR_CHART_URL,
            size,
            urlencoding::encode(&self.get_url(label, issuer))
        )
    }

    /// Generate an engine from the standard otpauth URL
    pub fn from_url<S: AsRef<str>>(url: S) -> Result<Totp, TotpUrlError> {
        let uri = ProvisioningUri::parse(url)?;
        let secret = Secret::Encoded(uri.secret.clone());
        let key = secret.to_bytes();
        Ok(Totp::assemble(secret, key, &uri.config()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ConfigError;

    const SECRET: &str = "JBSWY3DPEHPK3PXP";

    fn totp() -> Totp {
        Totp::new(SECRET, 30).unwrap()
    }

    #[test]
    fn url_encodes_label_and_issuer() {
        assert_eq!(
            totp().get_url("a b@x.com", "My Co"),
            "otpauth://totp/a%20b%40x.com?secret=JBSWY3DPEHPK3PXP&issuer=My%20Co"
        );
    }

    #[test]
    fn url_keeps_unreserved_characters() {
        assert_eq!(
            totp().get_url("a-b_c.d~e", "Github:"),
            "otpauth://totp/a-b_c.d~e?secret=JBSWY3DPEHPK3PXP&issuer=Github%3A"
        );
        assert_eq!(
            totp().get_url("Github:constantoine@github.com", "Github"),
            "otpauth://totp/Github%3Aconstantoine%40github.com?secret=JBSWY3DPEHPK3PXP&issuer=Github"
        );
    }

    #[test]
    fn url_embeds_canonical_secret() {
        let typed = Totp::new("jbsw y3dp ehpk 3pxp", 30).unwrap();
        assert_eq!(typed.get_url("a", "b"), totp().get_url("a", "b"));

        let raw = Totp::new(b"TestSecretSuperSecret".to_vec(), 30).unwrap();
        assert_eq!(
            raw.get_url("constantoine@github.com", "Github"),
            "otpauth://totp/constantoine%40github.com?secret=KRSXG5CTMVRXEZLUKN2XAZLSKNSWG4TFOQ&issuer=Github"
        );
    }

    #[test]
    fn url_with_non_default_period() {
        let totp = Totp::new(SECRET, 60).unwrap();
        assert_eq!(
            totp.get_url("alice", "Co"),
            "otpauth://totp/alice?secret=JBSWY3DPEHPK3PXP&issuer=Co&period=60"
        );
    }

    #[test]
    fn url_with_non_default_algorithm_and_digits() {
        let mut config = TotpConfig::default();
        config.algorithm(Algorithm::SHA256).digits(8).unwrap();
        let totp = Totp::with_config(SECRET, &config).unwrap();
        assert_eq!(
            totp.get_url("alice", "Co"),
            "otpauth://totp/alice?secret=JBSWY3DPEHPK3PXP&issuer=Co&algorithm=SHA256&digits=8"
        );
    }

    #[test]
    fn qr_code_url() {
        assert_eq!(
            totp().get_qr_code_url("a@x.com", "Co", 200),
            "https://chart.googleapis.com/chart?cht=qr&chs=200x200&chl=otpauth%3A%2F%2Ftotp%2Fa%2540x.com%3Fsecret%3DJBSWY3DPEHPK3PXP%26issuer%3DCo"
        );
    }

    #[test]
    fn debug_is_redacted() {
        let uri = totp().provisioning_uri("alice", "Co");
        assert!(!format!("{:?}", uri).contains(SECRET));
    }

    #[test]
    fn parse_default() {
        let uri = ProvisioningUri::parse("otpauth://totp/alice?secret=JBSWY3DPEHPK3PXP").unwrap();
        assert_eq!(uri.label, "alice");
        assert_eq!(uri.issuer, None);
        assert_eq!(uri.secret, SECRET);
        assert_eq!(uri.algorithm, Algorithm::SHA1);
        assert_eq!(uri.digits, 6);
        assert_eq!(uri.period, 30);
    }

    #[test]
    fn parse_query() {
        let uri = ProvisioningUri::parse(concat!(
            "otpauth://totp/GitHub%3Atest?secret=KRSXG5CTMVRXEZLUKN2XAZLSKNSWG4TFOQ",
            "&issuer=My%20Co&digits=8&period=60&algorithm=SHA512&foo=bar"
        ))
        .unwrap();
        assert_eq!(uri.label, "GitHub:test");
        assert_eq!(uri.issuer.as_deref(), Some("My Co"));
        assert_eq!(uri.secret, "KRSXG5CTMVRXEZLUKN2XAZLSKNSWG4TFOQ");
        assert_eq!(uri.algorithm, Algorithm::SHA512);
        assert_eq!(uri.digits, 8);
        assert_eq!(uri.period, 60);
    }

    #[test]
    fn url_round_trip() {
        let mut config = TotpConfig::default();
        config.algorithm(Algorithm::SHA256).step(45).unwrap();
        let totp = Totp::with_config(SECRET, &config).unwrap();
        let url = totp.get_url("a b@x.com", "My Co");

        let uri = ProvisioningUri::parse(&url).unwrap();
        assert_eq!(uri, totp.provisioning_uri("a b@x.com", "My Co"));
        assert_eq!(uri.to_string(), url);

        let parsed = Totp::from_url(&url).unwrap();
        assert_eq!(parsed, totp);
        assert_eq!(parsed.generate(1_700_000_000), totp.generate(1_700_000_000));
    }

    #[test]
    fn from_url_err() {
        assert!(matches!(
            Totp::from_url("not a url").unwrap_err(),
            TotpUrlError::Url(_)
        ));
        assert_eq!(
            Totp::from_url("http://totp/alice?secret=JBSWY3DPEHPK3PXP").unwrap_err(),
            TotpUrlError::Scheme("http".to_string())
        );
        assert_eq!(
            Totp::from_url("otpauth://hotp/alice?secret=JBSWY3DPEHPK3PXP").unwrap_err(),
            TotpUrlError::Host("hotp".to_string())
        );
        assert_eq!(
            Totp::from_url("otpauth://totp/alice").unwrap_err(),
            TotpUrlError::Secret
        );
        assert_eq!(
            Totp::from_url("otpauth://totp/alice?secret=!!!").unwrap_err(),
            TotpUrlError::Secret
        );
    }

    #[test]
    fn from_url_wrong_parameters() {
        let base = "otpauth://totp/alice?secret=JBSWY3DPEHPK3PXP";
        assert_eq!(
            Totp::from_url(format!("{}&algorithm=MD5", base)).unwrap_err(),
            TotpUrlError::Algorithm("MD5".to_string())
        );
        assert_eq!(
            Totp::from_url(format!("{}&digits=six", base)).unwrap_err(),
            TotpUrlError::Digits("six".to_string())
        );
        assert_eq!(
            Totp::from_url(format!("{}&digits=5", base)).unwrap_err(),
            TotpUrlError::Config(ConfigError::InvalidDigits(5))
        );
        assert_eq!(
            Totp::from_url(format!("{}&period=soon", base)).unwrap_err(),
            TotpUrlError::Step("soon".to_string())
        );
        assert_eq!(
            Totp::from_url(format!("{}&period=0", base)).unwrap_err(),
            TotpUrlError::Config(ConfigError::InvalidStep)
        );
    }
}
