//! Field-level encryption for sensitive payment details
//!
//! Each detail value is sealed on its own with AES-256-GCM under a random
//! 96-bit nonce. A token is `base64(nonce || ciphertext || tag)`.

use crate::types::{Details, EncryptedDetails, EncryptedValue};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use ring::aead::{AES_256_GCM, Aad, LessSafeKey, NONCE_LEN, Nonce, UnboundKey};
use ring::rand::{SecureRandom, SystemRandom};
use std::fmt;

/// AES-256 key length in bytes
pub const KEY_LEN: usize = 32;

/// Encryption errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncryptionError {
    #[error("Invalid key length: expected 32 bytes, got {0}")]
    InvalidKeyLength(usize),

    #[error("Invalid key encoding: {0}")]
    InvalidKeyEncoding(String),

    #[error("Encryption failed")]
    EncryptionFailed,

    #[error("Decryption failed")]
    DecryptionFailed,

    #[error("Malformed ciphertext: {0}")]
    MalformedCiphertext(String),

    #[error("Decrypted value is not valid UTF-8")]
    InvalidUtf8,
}

/// Reversible transformation applied to sensitive values before they leave the facade
pub trait Encryptor: Send + Sync {
    /// Seal a single value
    fn encrypt(&self, plaintext: &str) -> Result<EncryptedValue, EncryptionError>;

    /// Open a value sealed by [`Encryptor::encrypt`]
    fn decrypt(&self, value: &EncryptedValue) -> Result<String, EncryptionError>;

    /// Seal every value of `details`, keeping the keys
    fn encrypt_details(&self, details: &Details) -> Result<EncryptedDetails, EncryptionError> {
        let mut sealed = EncryptedDetails::new();
        for (key, value) in details.iter() {
            sealed.insert(key.clone(), self.encrypt(value)?);
        }
        Ok(sealed)
    }

    /// Open every value of `details`
    fn decrypt_details(&self, details: &EncryptedDetails) -> Result<Details, EncryptionError> {
        let mut opened = Details::new();
        for (key, value) in details.iter() {
            opened.insert(key.clone(), self.decrypt(value)?);
        }
        Ok(opened)
    }
}

/// AES-256-GCM encryptor backed by `ring`
pub struct AesGcmEncryptor {
    key: LessSafeKey,
    rng: SystemRandom,
}

impl AesGcmEncryptor {
    /// Create from raw key bytes; the key must be exactly 32 bytes
    pub fn new(key: &[u8]) -> Result<Self, EncryptionError> {
        if key.len() != KEY_LEN {
            return Err(EncryptionError::InvalidKeyLength(key.len()));
        }
        let unbound = UnboundKey::new(&AES_256_GCM, key)
            .map_err(|_| EncryptionError::InvalidKeyLength(key.len()))?;

        Ok(Self {
            key: LessSafeKey::new(unbound),
            rng: SystemRandom::new(),
        })
    }

    /// Create from a base64-encoded 32-byte key
    pub fn from_base64(encoded: &str) -> Result<Self, EncryptionError> {
        let key = STANDARD
            .decode(encoded.trim())
            .map_err(|e| EncryptionError::InvalidKeyEncoding(e.to_string()))?;
        Self::new(&key)
    }

    /// Generate a fresh random key, base64-encoded
    pub fn generate_key() -> Result<String, EncryptionError> {
        let mut key = [0u8; KEY_LEN];
        SystemRandom::new()
            .fill(&mut key)
            .map_err(|_| EncryptionError::EncryptionFailed)?;
        Ok(STANDARD.encode(key))
    }
}

impl fmt::Debug for AesGcmEncryptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AesGcmEncryptor")
            .field("algorithm", &"AES-256-GCM")
            .finish_non_exhaustive()
    }
}

impl Encryptor for AesGcmEncryptor {
    fn encrypt(&self, plaintext: &str) -> Result<EncryptedValue, EncryptionError> {
        let mut nonce_bytes = [0u8; NONCE_LEN];
        self.rng
            .fill(&mut nonce_bytes)
            .map_err(|_| EncryptionError::EncryptionFailed)?;

        let mut in_out = plaintext.as_bytes().to_vec();
        self.key
            .seal_in_place_append_tag(
                Nonce::assume_unique_for_key(nonce_bytes),
                Aad::empty(),
                &mut in_out,
            )
            .map_err(|_| EncryptionError::EncryptionFailed)?;

        in_out.splice(0..0, nonce_bytes);
        Ok(EncryptedValue::new(STANDARD.encode(in_out)))
    }

    fn decrypt(&self, value: &EncryptedValue) -> Result<String, EncryptionError> {
        let mut raw = STANDARD
            .decode(value.as_str())
            .map_err(|e| EncryptionError::MalformedCiphertext(e.to_string()))?;

        if raw.len() < NONCE_LEN + AES_256_GCM.tag_len() {
            return Err(EncryptionError::MalformedCiphertext(format!(
                "token is {} bytes, shorter than nonce and tag",
                raw.len()
            )));
        }

        let mut in_out = raw.split_off(NONCE_LEN);
        let nonce = Nonce::try_assume_unique_for_key(&raw)
            .map_err(|_| EncryptionError::MalformedCiphertext("bad nonce".to_string()))?;

        let plaintext = self
            .key
            .open_in_place(nonce, Aad::empty(), &mut in_out)
            .map_err(|_| EncryptionError::DecryptionFailed)?;

        String::from_utf8(plaintext.to_vec()).map_err(|_| EncryptionError::InvalidUtf8)
    }
}
