//! RSA key pairs and public keys.
//!
//! An [`AsymmetricKeyPair`] owns the private key. [`PublicKey`] is a
//! self-contained copy of the public half: it can be exported, shipped and
//! re-imported, and never gives access to the private key.

use rand::rngs::OsRng;
use rsa::pkcs8::{DecodePublicKey, EncodePublicKey, LineEnding};
use rsa::traits::PublicKeyParts;
use rsa::{Oaep, Pkcs1v15Encrypt, RsaPrivateKey, RsaPublicKey};
use sha2::{Digest, Sha256};
use tracing::{debug, trace};

use crate::config::{RsaConfig, RsaPadding, SUPPORTED_MODULUS_BITS};
use crate::core::PublicKeyInfo;
use crate::error::{Error, Result};

fn engine_error(err: rsa::Error) -> Error {
    match err {
        rsa::Error::Decryption => Error::PaddingOrAuth,
        other => Error::Engine(other.to_string()),
    }
}

/// An RSA private key together with its public half.
#[derive(Clone)]
pub struct AsymmetricKeyPair {
    private_key: RsaPrivateKey,
    public_key: RsaPublicKey,
    padding: RsaPadding,
}

impl AsymmetricKeyPair {
    /// Generate a 2048-bit key pair using OAEP-SHA256 padding.
    pub fn generate_random() -> Result<Self> {
        Self::generate_with(&RsaConfig::default())
    }

    /// Generate a key pair with an explicit modulus size and padding scheme.
    ///
    /// # Errors
    ///
    /// - [`Error::Config`] if the modulus size is not supported.
    /// - [`Error::Engine`] if key generation fails.
    pub fn generate_with(config: &RsaConfig) -> Result<Self> {
        config.validate()?;

        let mut rng = OsRng;
        let private_key = RsaPrivateKey::new(&mut rng, config.modulus_bits).map_err(|e| {
            debug!(bits = config.modulus_bits, "RSA key generation failed");
            Error::Engine(e.to_string())
        })?;
        let public_key = private_key.to_public_key();
        debug!(
            bits = config.modulus_bits,
            padding = %config.padding,
            "generated RSA key pair"
        );

        Ok(Self {
            private_key,
            public_key,
            padding: config.padding,
        })
    }

    /// The public half of this key pair.
    pub fn extract_public_key(&self) -> PublicKey {
        PublicKey {
            key: self.public_key.clone(),
            padding: self.padding,
        }
    }

    /// Decrypt a ciphertext produced by the matching [`PublicKey::encrypt`].
    ///
    /// # Errors
    ///
    /// - [`Error::MalformedInput`] if the ciphertext length is not the modulus size.
    /// - [`Error::PaddingOrAuth`] if the padding check fails, e.g. the
    ///   ciphertext was made for another key.
    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        let size = self.private_key.size();
        if ciphertext.len() != size {
            debug!(
                ciphertext_len = ciphertext.len(),
                modulus_len = size,
                "rejected RSA ciphertext of wrong length"
            );
            return Err(Error::MalformedInput(format!(
                "RSA ciphertext must be {} bytes, got {}",
                size,
                ciphertext.len()
            )));
        }

        let plaintext = match self.padding {
            RsaPadding::OaepSha256 => self.private_key.decrypt(Oaep::new::<Sha256>(), ciphertext),
            RsaPadding::Pkcs1v15 => self.private_key.decrypt(Pkcs1v15Encrypt, ciphertext),
        }
        .map_err(|e| {
            debug!(padding = %self.padding, "RSA decryption failed");
            engine_error(e)
        })?;
        trace!(plaintext_len = plaintext.len(), "RSA decrypt");
        Ok(plaintext)
    }

    pub fn modulus_bits(&self) -> usize {
        self.public_key.size() * 8
    }

    pub fn padding(&self) -> RsaPadding {
        self.padding
    }

    #[cfg(test)]
    pub(crate) fn private_key_der(&self) -> zeroize::Zeroizing<Vec<u8>> {
        use rsa::pkcs8::EncodePrivateKey;
        let doc = self.private_key.to_pkcs8_der().unwrap();
        zeroize::Zeroizing::new(doc.as_bytes().to_vec())
    }
}

impl std::fmt::Debug for AsymmetricKeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AsymmetricKeyPair")
            .field("modulus_bits", &self.modulus_bits())
            .field("padding", &self.padding)
            .finish_non_exhaustive()
    }
}

/// An RSA public key and the padding scheme used to encrypt with it.
#[derive(Clone, PartialEq, Eq)]
pub struct PublicKey {
    key: RsaPublicKey,
    padding: RsaPadding,
}

impl PublicKey {
    /// Encrypt `plaintext` for the holder of the matching private key.
    ///
    /// Padding is randomized, so encrypting the same plaintext twice gives
    /// different ciphertexts. The ciphertext is always the modulus size.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SizeExceeded`] if `plaintext` is longer than
    /// [`PublicKey::max_plaintext_len`]. Nothing is truncated.
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        let max = self.max_plaintext_len();
        if plaintext.len() > max {
            debug!(
                plaintext_len = plaintext.len(),
                max_len = max,
                "plaintext too large for RSA key"
            );
            return Err(Error::SizeExceeded {
                len: plaintext.len(),
                max,
            });
        }

        let mut rng = OsRng;
        let ciphertext = match self.padding {
            RsaPadding::OaepSha256 => self.key.encrypt(&mut rng, Oaep::new::<Sha256>(), plaintext),
            RsaPadding::Pkcs1v15 => self.key.encrypt(&mut rng, Pkcs1v15Encrypt, plaintext),
        }
        .map_err(engine_error)?;
        trace!(
            plaintext_len = plaintext.len(),
            ciphertext_len = ciphertext.len(),
            "RSA encrypt"
        );
        Ok(ciphertext)
    }

    /// Largest plaintext [`PublicKey::encrypt`] accepts.
    pub fn max_plaintext_len(&self) -> usize {
        self.key.size().saturating_sub(self.padding.overhead())
    }

    pub fn modulus_bits(&self) -> usize {
        self.key.size() * 8
    }

    pub fn padding(&self) -> RsaPadding {
        self.padding
    }

    /// Export as DER-encoded SubjectPublicKeyInfo.
    pub fn export(&self) -> Result<Vec<u8>> {
        let der = self
            .key
            .to_public_key_der()
            .map_err(|e| Error::Engine(e.to_string()))?;
        Ok(der.as_bytes().to_vec())
    }

    /// Export as a PEM `PUBLIC KEY` block.
    pub fn export_pem(&self) -> Result<String> {
        self.key
            .to_public_key_pem(LineEnding::LF)
            .map_err(|e| Error::Engine(e.to_string()))
    }

    /// Load a DER SubjectPublicKeyInfo, using the default OAEP-SHA256 padding.
    pub fn load(der: &[u8]) -> Result<Self> {
        Self::load_with(der, RsaPadding::default())
    }

    /// Load a DER SubjectPublicKeyInfo and encrypt with `padding`.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::ErrorKind::MalformedInput`] error if `der` is not an RSA
    /// public key or its modulus size is unsupported.
    pub fn load_with(der: &[u8], padding: RsaPadding) -> Result<Self> {
        let key = RsaPublicKey::from_public_key_der(der)?;
        Self::checked(key, padding)
    }

    /// Load a PEM `PUBLIC KEY` block, using the default OAEP-SHA256 padding.
    pub fn load_pem(pem: &str) -> Result<Self> {
        let key = RsaPublicKey::from_public_key_pem(pem)?;
        Self::checked(key, RsaPadding::default())
    }

    fn checked(key: RsaPublicKey, padding: RsaPadding) -> Result<Self> {
        let bits = key.size() * 8;
        if !SUPPORTED_MODULUS_BITS.contains(&bits) {
            debug!(bits, "rejected RSA public key with unsupported modulus");
            return Err(Error::MalformedInput(format!(
                "unsupported RSA modulus size {}",
                bits
            )));
        }
        debug!(bits, padding = %padding, "loaded RSA public key");
        Ok(Self { key, padding })
    }

    /// SHA-256 fingerprint of the DER encoding, formatted as `sha256:<hex>`.
    pub fn fingerprint(&self) -> Result<String> {
        let der = self.export()?;
        let hash = Sha256::digest(&der);
        Ok(format!("sha256:{}", hex::encode(hash)))
    }

    /// A serializable description of this key.
    pub fn info(&self) -> Result<PublicKeyInfo> {
        PublicKeyInfo::from_public_key(self)
    }
}

impl std::fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PublicKey")
            .field("modulus_bits", &self.modulus_bits())
            .field("padding", &self.padding)
            .finish_non_exhaustive()
    }
}
