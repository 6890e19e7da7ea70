//! Tunable parameters for key generation.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// RSA modulus sizes accepted for generation and import.
pub const SUPPORTED_MODULUS_BITS: [usize; 3] = [2048, 3072, 4096];

/// Default RSA modulus size.
pub const DEFAULT_MODULUS_BITS: usize = 2048;

/// RSA encryption padding. Both parties must agree on it; it is not part of
/// the exported public key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RsaPadding {
    /// OAEP with SHA-256 for both the label hash and MGF1.
    #[default]
    #[serde(rename = "oaep-sha256")]
    OaepSha256,
    /// PKCS#1 v1.5 encryption padding.
    #[serde(rename = "pkcs1v15")]
    Pkcs1v15,
}

impl RsaPadding {
    /// Bytes of each RSA block consumed by the padding.
    pub const fn overhead(self) -> usize {
        match self {
            // 2 * hLen + 2 with SHA-256
            RsaPadding::OaepSha256 => 66,
            RsaPadding::Pkcs1v15 => 11,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            RsaPadding::OaepSha256 => "oaep-sha256",
            RsaPadding::Pkcs1v15 => "pkcs1v15",
        }
    }
}

impl std::fmt::Display for RsaPadding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// RSA key-pair parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RsaConfig {
    pub modulus_bits: usize,
    pub padding: RsaPadding,
}

impl Default for RsaConfig {
    fn default() -> Self {
        Self {
            modulus_bits: DEFAULT_MODULUS_BITS,
            padding: RsaPadding::default(),
        }
    }
}

impl RsaConfig {
    pub fn validate(&self) -> Result<()> {
        if !SUPPORTED_MODULUS_BITS.contains(&self.modulus_bits) {
            return Err(Error::Config(format!(
                "unsupported RSA modulus size {} (expected one of {:?})",
                self.modulus_bits, SUPPORTED_MODULUS_BITS
            )));
        }
        Ok(())
    }
}

/// Top-level configuration, loadable from JSON.
///
/// ```rust
/// use simplecrypt::config::{CryptoConfig, RsaPadding};
///
/// let config = CryptoConfig::from_json_str(r#"{"rsa": {"padding": "pkcs1v15"}}"#).unwrap();
/// assert_eq!(config.rsa.modulus_bits, 2048);
/// assert_eq!(config.rsa.padding, RsaPadding::Pkcs1v15);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CryptoConfig {
    pub rsa: RsaConfig,
}

impl CryptoConfig {
    /// Parse and validate a JSON configuration. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: CryptoConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.rsa.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_defaults() {
        let config = CryptoConfig::default();
        assert_eq!(config.rsa.modulus_bits, 2048);
        assert_eq!(config.rsa.padding, RsaPadding::OaepSha256);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_json_uses_defaults() {
        let config = CryptoConfig::from_json_str("{}").unwrap();
        assert_eq!(config, CryptoConfig::default());
    }

    #[test]
    fn test_full_json() {
        let config = CryptoConfig::from_json_str(
            r#"{"rsa": {"modulus_bits": 3072, "padding": "pkcs1v15"}}"#,
        )
        .unwrap();
        assert_eq!(config.rsa.modulus_bits, 3072);
        assert_eq!(config.rsa.padding, RsaPadding::Pkcs1v15);
    }

    #[test]
    fn test_unsupported_modulus_rejected() {
        let err = CryptoConfig::from_json_str(r#"{"rsa": {"modulus_bits": 1024}}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[test]
    fn test_unknown_padding_rejected() {
        let err = CryptoConfig::from_json_str(r#"{"rsa": {"padding": "none"}}"#).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_padding_overhead() {
        assert_eq!(256 - RsaPadding::Pkcs1v15.overhead(), 245);
        assert_eq!(256 - RsaPadding::OaepSha256.overhead(), 190);
    }

    #[test]
    fn test_padding_display_matches_serde() {
        for padding in [RsaPadding::OaepSha256, RsaPadding::Pkcs1v15] {
            let json = serde_json::to_string(&padding).unwrap();
            assert_eq!(json, format!("\"{}\"", padding));
        }
    }
}
