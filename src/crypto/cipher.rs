//! Authenticated encryption for hidden payloads.
//!
//! Uses ChaCha20-Poly1305 with a password-derived key. The wire format
//! for the standard mode is:
//!
//! ```text
//! salt (16 bytes) || nonce (12 bytes) || ciphertext (includes auth tag)
//! ```
//!
//! The salt travels with the ciphertext so decryption can rederive the
//! same key; it is never reused across independent encryptions. The
//! legacy pad mode derives its key without a salt, so its wire format
//! is just `nonce || ciphertext`.
//!
//! Decryption fails closed: a wrong password, a truncated buffer, or a
//! single flipped bit all yield [`CipherError::InvalidKeyOrCorruptedData`],
//! never partial plaintext.

use chacha20poly1305::{
    aead::{Aead, KeyInit},
    ChaCha20Poly1305, Nonce,
};
use rand::rngs::OsRng;
use thiserror::Error;

use super::kdf::{self, DerivedKey, KdfMode, SALT_LEN};

/// Nonce size for ChaCha20-Poly1305.
const NONCE_LEN: usize = 12;

/// Poly1305 authentication tag size.
const TAG_LEN: usize = 16;

/// Errors that can occur during payload encryption.
#[derive(Error, Debug)]
pub enum CipherError {
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Invalid key or corrupted data")]
    InvalidKeyOrCorruptedData,
}

/// Encrypts a payload under the standard PBKDF2 mode.
///
/// A fresh salt and a fresh nonce are generated per call, so encrypting
/// the same plaintext twice never produces the same bytes.
pub fn encrypt(plaintext: &[u8], password: &str) -> Result<Vec<u8>, CipherError> {
    encrypt_with_mode(plaintext, password, KdfMode::Pbkdf2V1)
}

/// Encrypts a payload under an explicit key derivation mode.
pub fn encrypt_with_mode(
    plaintext: &[u8],
    password: &str,
    mode: KdfMode,
) -> Result<Vec<u8>, CipherError> {
    let mut nonce_bytes = [0u8; NONCE_LEN];
    rand::RngCore::fill_bytes(&mut OsRng, &mut nonce_bytes);

    match mode {
        KdfMode::Pbkdf2V1 => {
            let mut salt = [0u8; SALT_LEN];
            rand::RngCore::fill_bytes(&mut OsRng, &mut salt);
            let key = kdf::derive(password, &salt);
            let ciphertext = seal(&key, &nonce_bytes, plaintext)?;

            let mut result = Vec::with_capacity(SALT_LEN + NONCE_LEN + ciphertext.len());
            result.extend_from_slice(&salt);
            result.extend_from_slice(&nonce_bytes);
            result.extend_from_slice(&ciphertext);
            Ok(result)
        }
        KdfMode::LegacyPadV0 => {
            let key = kdf::derive_legacy(password);
            let ciphertext = seal(&key, &nonce_bytes, plaintext)?;

            let mut result = Vec::with_capacity(NONCE_LEN + ciphertext.len());
            result.extend_from_slice(&nonce_bytes);
            result.extend_from_slice(&ciphertext);
            Ok(result)
        }
    }
}

fn seal(
    key: &DerivedKey,
    nonce_bytes: &[u8; NONCE_LEN],
    plaintext: &[u8],
) -> Result<Vec<u8>, CipherError> {
    let cipher = ChaCha20Poly1305::new_from_slice(key.as_bytes())
        .map_err(|e| CipherError::EncryptionFailed(e.to_string()))?;

    cipher
        .encrypt(Nonce::from_slice(nonce_bytes), plaintext)
        .map_err(|e| CipherError::EncryptionFailed(e.to_string()))
}

/// Decrypts a payload sealed with the standard PBKDF2 mode.
pub fn decrypt(data: &[u8], password: &str) -> Result<Vec<u8>, CipherError> {
    decrypt_with_mode(data, password, KdfMode::Pbkdf2V1)
}

/// Decrypts a payload sealed under an explicit key derivation mode.
///
/// Deterministic check, no retries: retrying an identical call cannot
/// change the outcome.
pub fn decrypt_with_mode(
    data: &[u8],
    password: &str,
    mode: KdfMode,
) -> Result<Vec<u8>, CipherError> {
    let (key, framed) = match mode {
        KdfMode::Pbkdf2V1 => {
            if data.len() < SALT_LEN + NONCE_LEN + TAG_LEN {
                return Err(CipherError::InvalidKeyOrCorruptedData);
            }
            let mut salt = [0u8; SALT_LEN];
            salt.copy_from_slice(&data[..SALT_LEN]);
            (kdf::derive(password, &salt), &data[SALT_LEN..])
        }
        KdfMode::LegacyPadV0 => {
            if data.len() < NONCE_LEN + TAG_LEN {
                return Err(CipherError::InvalidKeyOrCorruptedData);
            }
            (kdf::derive_legacy(password), data)
        }
    };

    let cipher = ChaCha20Poly1305::new_from_slice(key.as_bytes())
        .map_err(|_| CipherError::InvalidKeyOrCorruptedData)?;

    cipher
        .decrypt(Nonce::from_slice(&framed[..NONCE_LEN]), &framed[NONCE_LEN..])
        .map_err(|_| CipherError::InvalidKeyOrCorruptedData)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encrypt_decrypt_roundtrip() {
        let plaintext = b"Hello, framehide!";
        let password = "my_secret_password";

        let encrypted = encrypt(plaintext, password).unwrap();
        let decrypted = decrypt(&encrypted, password).unwrap();

        assert_eq!(plaintext.as_slice(), decrypted.as_slice());
    }

    #[test]
    fn test_wrong_password_fails() {
        let encrypted = encrypt(b"Secret data", "correct").unwrap();
        let result = decrypt(&encrypted, "wrong");

        assert!(matches!(
            result,
            Err(CipherError::InvalidKeyOrCorruptedData)
        ));
    }

    #[test]
    fn test_tampered_ciphertext_fails() {
        let mut encrypted = encrypt(b"Secret data", "password").unwrap();
        let last = encrypted.len() - 1;
        encrypted[last] ^= 0x01;

        let result = decrypt(&encrypted, "password");

        assert!(matches!(
            result,
            Err(CipherError::InvalidKeyOrCorruptedData)
        ));
    }

    #[test]
    fn test_truncated_data_fails() {
        let result = decrypt(&[0u8; 10], "password");

        assert!(matches!(
            result,
            Err(CipherError::InvalidKeyOrCorruptedData)
        ));
    }

    #[test]
    fn test_salt_is_fresh_per_call() {
        let first = encrypt(b"same input", "same password").unwrap();
        let second = encrypt(b"same input", "same password").unwrap();

        assert_ne!(first, second);
        assert_ne!(first[..SALT_LEN], second[..SALT_LEN]);
    }

    #[test]
    fn test_empty_plaintext() {
        let encrypted = encrypt(b"", "password").unwrap();
        let decrypted = decrypt(&encrypted, "password").unwrap();

        assert!(decrypted.is_empty());
    }

    #[test]
    fn test_legacy_mode_roundtrip() {
        let encrypted =
            encrypt_with_mode(b"old carrier", "password", KdfMode::LegacyPadV0).unwrap();
        let decrypted =
            decrypt_with_mode(&encrypted, "password", KdfMode::LegacyPadV0).unwrap();

        assert_eq!(decrypted, b"old carrier");
    }

    #[test]
    fn test_modes_are_not_interchangeable() {
        let password = "same password either way";

        let standard = encrypt_with_mode(b"payload", password, KdfMode::Pbkdf2V1).unwrap();
        let legacy = encrypt_with_mode(b"payload", password, KdfMode::LegacyPadV0).unwrap();

        assert!(matches!(
            decrypt_with_mode(&standard, password, KdfMode::LegacyPadV0),
            Err(CipherError::InvalidKeyOrCorruptedData)
        ));
        assert!(matches!(
            decrypt_with_mode(&legacy, password, KdfMode::Pbkdf2V1),
            Err(CipherError::InvalidKeyOrCorruptedData)
        ));
    }
}
