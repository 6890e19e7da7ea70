//! AES-256-CBC symmetric keys.
//!
//! A [`SymmetricKey`] bundles a 256-bit AES key with the 16-byte IV used for
//! every encryption under it. Ciphertexts are PKCS#7 padded and carry no
//! authentication tag: callers that need integrity must add a MAC themselves.

use aes::Aes256;
use base64::{engine::general_purpose, Engine as _};
use cbc::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand::rngs::OsRng;
use rand::RngCore;
use tracing::{debug, trace};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::error::{Error, Result};

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// AES-256 key length in bytes.
pub const KEY_LEN: usize = 32;
/// CBC initialization vector length in bytes.
pub const IV_LEN: usize = 16;
/// AES block size in bytes.
pub const BLOCK_LEN: usize = 16;
/// Length of the exported `[IV][KEY]` blob.
pub const EXPORT_LEN: usize = IV_LEN + KEY_LEN;

/// An AES-256 key and its CBC initialization vector.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SymmetricKey {
    key: [u8; KEY_LEN],
    iv: [u8; IV_LEN],
}

impl SymmetricKey {
    /// Generate a fresh key and IV from the operating system's CSPRNG.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RandomSource`] if the OS random source fails.
    pub fn generate_random() -> Result<Self> {
        let mut rng = OsRng;
        let mut key = Self {
            key: [0u8; KEY_LEN],
            iv: [0u8; IV_LEN],
        };
        rng.try_fill_bytes(&mut key.key)?;
        rng.try_fill_bytes(&mut key.iv)?;
        debug!(bits = KEY_LEN * 8, "generated AES key");
        Ok(key)
    }

    /// Encrypt `plaintext` with AES-256-CBC and PKCS#7 padding.
    ///
    /// The output is always a whole number of blocks and at least one block
    /// longer than an already block-aligned input. Any input length, including
    /// zero, is accepted.
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        let ciphertext = Aes256CbcEnc::new(&self.key.into(), &self.iv.into())
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext);
        trace!(
            plaintext_len = plaintext.len(),
            ciphertext_len = ciphertext.len(),
            "AES encrypt"
        );
        Ok(ciphertext)
    }

    /// Decrypt a ciphertext produced by [`SymmetricKey::encrypt`] under the same key.
    ///
    /// # Errors
    ///
    /// - [`Error::MalformedInput`] if the ciphertext is empty or not block aligned.
    /// - [`Error::PaddingOrAuth`] if the padding is invalid after decryption,
    ///   which usually means the wrong key or a corrupted ciphertext.
    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        if ciphertext.is_empty() || ciphertext.len() % BLOCK_LEN != 0 {
            debug!(
                ciphertext_len = ciphertext.len(),
                "rejected unaligned AES ciphertext"
            );
            return Err(Error::MalformedInput(format!(
                "AES-CBC ciphertext length {} is not a positive multiple of {}",
                ciphertext.len(),
                BLOCK_LEN
            )));
        }

        let plaintext = Aes256CbcDec::new(&self.key.into(), &self.iv.into())
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
            .map_err(|_| {
                debug!(ciphertext_len = ciphertext.len(), "AES padding check failed");
                Error::PaddingOrAuth
            })?;
        trace!(
            ciphertext_len = ciphertext.len(),
            plaintext_len = plaintext.len(),
            "AES decrypt"
        );
        Ok(plaintext)
    }

    /// Export the key as a 48-byte blob laid out as `[IV:16][KEY:32]`.
    pub fn export_iv_and_key(&self) -> Zeroizing<[u8; EXPORT_LEN]> {
        let mut blob = Zeroizing::new([0u8; EXPORT_LEN]);
        blob[..IV_LEN].copy_from_slice(&self.iv);
        blob[IV_LEN..].copy_from_slice(&self.key);
        blob
    }

    /// Rebuild a key from a blob produced by [`SymmetricKey::export_iv_and_key`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedInput`] unless `blob` is exactly 48 bytes.
    pub fn load_iv_and_key(blob: &[u8]) -> Result<Self> {
        if blob.len() != EXPORT_LEN {
            debug!(blob_len = blob.len(), "rejected AES key blob");
            return Err(Error::MalformedInput(format!(
                "AES key blob must be {} bytes, got {}",
                EXPORT_LEN,
                blob.len()
            )));
        }

        let mut key = Self {
            key: [0u8; KEY_LEN],
            iv: [0u8; IV_LEN],
        };
        key.iv.copy_from_slice(&blob[..IV_LEN]);
        key.key.copy_from_slice(&blob[IV_LEN..]);
        Ok(key)
    }

    /// Export the `[IV][KEY]` blob as standard base64.
    pub fn to_base64(&self) -> Zeroizing<String> {
        Zeroizing::new(general_purpose::STANDARD.encode(&self.export_iv_and_key()[..]))
    }

    /// Load a key from the base64 form produced by [`SymmetricKey::to_base64`].
    pub fn from_base64(encoded: &str) -> Result<Self> {
        let blob = Zeroizing::new(general_purpose::STANDARD.decode(encoded.trim())?);
        Self::load_iv_and_key(&blob)
    }

    /// Raw AES key bytes.
    pub fn key_bytes(&self) -> &[u8; KEY_LEN] {
        &self.key
    }

    /// Raw IV bytes.
    pub fn iv(&self) -> &[u8; IV_LEN] {
        &self.iv
    }
}

impl std::fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SymmetricKey")
            .field("algorithm", &"AES-256-CBC")
            .finish_non_exhaustive()
    }
}
