use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};

use crate::asymmetric::PublicKey;
use crate::config::RsaPadding;
use crate::error::{Error, Result};

/// Serializable description of an RSA public key, suitable for storing or
/// publishing alongside data encrypted for it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PublicKeyInfo {
    /// Key algorithm, always `"RSA"`
    pub algorithm: String,
    /// Modulus size in bits
    pub modulus_bits: usize,
    /// Encryption padding the key holder expects
    pub padding: RsaPadding,
    /// `sha256:<hex>` fingerprint of the DER encoding
    pub key_id: String,
    /// Base64 DER SubjectPublicKeyInfo
    pub public_key_der: String,
}

impl PublicKeyInfo {
    pub fn from_public_key(public_key: &PublicKey) -> Result<Self> {
        let der = public_key.export()?;
        Ok(Self {
            algorithm: "RSA".to_string(),
            modulus_bits: public_key.modulus_bits(),
            padding: public_key.padding(),
            key_id: public_key.fingerprint()?,
            public_key_der: general_purpose::STANDARD.encode(der),
        })
    }

    /// Rebuild the public key, checking it against the recorded metadata.
    pub fn to_public_key(&self) -> Result<PublicKey> {
        if self.algorithm != "RSA" {
            return Err(Error::MalformedInput(format!(
                "unsupported key algorithm {}",
                self.algorithm
            )));
        }

        let der = general_purpose::STANDARD.decode(&self.public_key_der)?;
        let public_key = PublicKey::load_with(&der, self.padding)?;

        if public_key.modulus_bits() != self.modulus_bits {
            return Err(Error::MalformedInput(format!(
                "modulus is {} bits, descriptor says {}",
                public_key.modulus_bits(),
                self.modulus_bits
            )));
        }
        if public_key.fingerprint()? != self.key_id {
            return Err(Error::MalformedInput("key id does not match key".to_string()));
        }
        Ok(public_key)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asymmetric::AsymmetricKeyPair;
    use crate::error::ErrorKind;

    #[test]
    fn test_public_key_info_roundtrip() {
        let pair = AsymmetricKeyPair::generate_random().unwrap();
        let public_key = pair.extract_public_key();

        let info = public_key.info().unwrap();
        assert_eq!(info.algorithm, "RSA");
        assert_eq!(info.modulus_bits, 2048);
        assert_eq!(info.padding, RsaPadding::OaepSha256);
        assert_eq!(info.key_id, public_key.fingerprint().unwrap());

        let json = info.to_json().unwrap();
        assert!(json.contains("\"padding\": \"oaep-sha256\""));
        let parsed = PublicKeyInfo::from_json(&json).unwrap();
        assert_eq!(parsed, info);

        let restored = parsed.to_public_key().unwrap();
        assert_eq!(restored, public_key);
        let encrypted = restored.encrypt(b"Hello World!").unwrap();
        assert_eq!(pair.decrypt(&encrypted).unwrap(), b"Hello World!");

        let mut wrong_id = info.clone();
        wrong_id.key_id = "sha256:00".to_string();
        assert_eq!(
            wrong_id.to_public_key().unwrap_err().kind(),
            ErrorKind::MalformedInput
        );

        let mut wrong_bits = info.clone();
        wrong_bits.modulus_bits = 4096;
        assert_eq!(
            wrong_bits.to_public_key().unwrap_err().kind(),
            ErrorKind::MalformedInput
        );

        let mut wrong_algorithm = info;
        wrong_algorithm.algorithm = "EC".to_string();
        assert_eq!(
            wrong_algorithm.to_public_key().unwrap_err().kind(),
            ErrorKind::MalformedInput
        );
    }

    #[test]
    fn test_public_key_info_rejects_bad_base64() {
        let info = PublicKeyInfo {
            algorithm: "RSA".to_string(),
            modulus_bits: 2048,
            padding: RsaPadding::Pkcs1v15,
            key_id: "sha256:00".to_string(),
            public_key_der: "***".to_string(),
        };
        assert!(matches!(info.to_public_key(), Err(Error::Base64(_))));
    }
}
