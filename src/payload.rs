//! Seal/open pipeline joining the cipher and the compressor.
//!
//! Sealing encrypts the message, then compresses and base64-armors the
//! result so the carriers receive printable text. Opening reverses the
//! two layers: decompress, then decrypt. The same sealed payload format
//! flows through both the image and the video carrier.

use thiserror::Error;

use crate::crypto::cipher::{self, CipherError};
use crate::crypto::compression::{self, CompressionError};
use crate::crypto::kdf::KdfMode;

/// Errors that can occur while sealing or opening a payload.
#[derive(Error, Debug)]
pub enum PayloadError {
    #[error("Cipher error: {0}")]
    Cipher(#[from] CipherError),

    #[error("Compression error: {0}")]
    Compression(#[from] CompressionError),

    #[error("Recovered payload is not valid UTF-8")]
    InvalidUtf8,
}

/// Seals a message into a printable payload under the standard mode.
pub fn seal_message(message: &str, password: &str) -> Result<String, PayloadError> {
    seal_message_with_mode(message, password, KdfMode::Pbkdf2V1)
}

/// Seals a message under an explicit key derivation mode.
pub fn seal_message_with_mode(
    message: &str,
    password: &str,
    mode: KdfMode,
) -> Result<String, PayloadError> {
    let encrypted = cipher::encrypt_with_mode(message.as_bytes(), password, mode)?;
    Ok(compression::compress(&encrypted)?)
}

/// Opens a sealed payload back into the original message.
///
/// Fails closed on a wrong password, a tampered payload, or text that
/// was never produced by [`seal_message`].
pub fn open_payload(payload: &str, password: &str) -> Result<String, PayloadError> {
    open_payload_with_mode(payload, password, KdfMode::Pbkdf2V1)
}

/// Opens a sealed payload under an explicit key derivation mode.
pub fn open_payload_with_mode(
    payload: &str,
    password: &str,
    mode: KdfMode,
) -> Result<String, PayloadError> {
    let encrypted = compression::decompress(payload)?;
    let plaintext = cipher::decrypt_with_mode(&encrypted, password, mode)?;
    String::from_utf8(plaintext).map_err(|_| PayloadError::InvalidUtf8)
}
