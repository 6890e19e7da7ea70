//! # simplecrypt
//!
//! Symmetric (AES-256-CBC) and asymmetric (RSA) encryption for
//! "generate a key, encrypt a blob, decrypt a blob, persist the key"
//! workflows, without a platform keystore.
//!
//! ## Features
//!
//! - **AES-256-CBC**: random key and IV generation, PKCS#7 padded encryption,
//!   a fixed 48-byte `[IV][KEY]` export blob
//! - **RSA**: 2048-bit (default), 3072 or 4096-bit key pairs, OAEP-SHA256
//!   (default) or PKCS#1 v1.5 encryption with enforced message-size limits
//! - **Public key interchange**: DER or PEM SubjectPublicKeyInfo, SHA-256 key
//!   fingerprints, and a JSON key descriptor
//!
//! ## Quick Start
//!
//! ```rust
//! use simplecrypt::{AsymmetricKeyPair, PublicKey, SymmetricKey};
//!
//! let data = b"Hello World!";
//!
//! // Symmetric
//! let key = SymmetricKey::generate_random().unwrap();
//! let encrypted = key.encrypt(data).unwrap();
//! assert_ne!(&encrypted[..], &data[..]);
//!
//! let blob = key.export_iv_and_key();
//! let restored = SymmetricKey::load_iv_and_key(&blob[..]).unwrap();
//! assert_eq!(restored.decrypt(&encrypted).unwrap(), data);
//!
//! // Asymmetric
//! let pair = AsymmetricKeyPair::generate_random().unwrap();
//! let der = pair.extract_public_key().export().unwrap();
//! let public_key = PublicKey::load(&der).unwrap();
//! let encrypted = public_key.encrypt(data).unwrap();
//! assert_eq!(pair.decrypt(&encrypted).unwrap(), data);
//! ```
//!
//! ## Security
//!
//! - Keys, IVs and RSA padding randomness come from the OS CSPRNG (`OsRng`)
//! - AES key material is zeroized on drop; `Debug` output never shows key bytes
//! - Nothing is authenticated: AES-CBC ciphertexts carry no MAC. Callers that
//!   need integrity must add it themselves
//! - RSA encryption is limited to `modulus bytes - padding overhead`; longer
//!   messages are rejected with [`Error::SizeExceeded`], never truncated
//!
//! ## Error Handling
//!
//! Every fallible operation returns [`Result<T, Error>`](Result).
//! [`Error::kind`] maps an error onto its [`ErrorKind`].
//!
//! ## Logging
//!
//! Operations emit `tracing` events with sizes and error kinds only. Install a
//! subscriber in the application to see them.

pub mod asymmetric;
pub mod config;
pub mod core;
pub mod error;
pub mod symmetric;

pub use asymmetric::{AsymmetricKeyPair, PublicKey};
pub use config::{CryptoConfig, RsaConfig, RsaPadding};
pub use crate::core::PublicKeyInfo;
pub use error::{Error, ErrorKind, Result};
pub use symmetric::SymmetricKey;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_to_end_hello_world() {
        let data = "Hello World!".as_bytes();

        let key = SymmetricKey::generate_random().unwrap();
        let encrypted = key.encrypt(data).unwrap();
        assert_ne!(&encrypted[..], data);
        let decrypted = key.decrypt(&encrypted).unwrap();
        assert_ne!(encrypted, decrypted);
        assert_eq!(decrypted, data);

        let pair = AsymmetricKeyPair::generate_random().unwrap();
        let encrypted = pair.extract_public_key().encrypt(data).unwrap();
        assert_ne!(&encrypted[..], data);
        let decrypted = pair.decrypt(&encrypted).unwrap();
        assert_ne!(encrypted, decrypted);
        assert_eq!(decrypted, data);
    }

    #[test]
    fn test_hybrid_wrap_of_symmetric_key() {
        // Data too large for RSA goes through AES; the AES blob fits under RSA.
        let data = vec![0x42u8; 10_000];
        let pair = AsymmetricKeyPair::generate_random().unwrap();
        let public_key = pair.extract_public_key();
        assert_eq!(
            public_key.encrypt(&data).unwrap_err().kind(),
            ErrorKind::SizeExceeded
        );

        let key = SymmetricKey::generate_random().unwrap();
        let encrypted_data = key.encrypt(&data).unwrap();
        let wrapped_key = public_key.encrypt(&key.export_iv_and_key()[..]).unwrap();

        let blob = pair.decrypt(&wrapped_key).unwrap();
        let unwrapped = SymmetricKey::load_iv_and_key(&blob).unwrap();
        assert_eq!(unwrapped.decrypt(&encrypted_data).unwrap(), data);
    }

    #[test]
    fn test_config_driven_generation() {
        let config = CryptoConfig::from_json_str(r#"{"rsa": {"padding": "pkcs1v15"}}"#).unwrap();
        let pair = AsymmetricKeyPair::generate_with(&config.rsa).unwrap();
        assert_eq!(pair.padding(), RsaPadding::Pkcs1v15);
        assert_eq!(pair.extract_public_key().max_plaintext_len(), 245);
    }
}
