//! Payload compression and text armoring.
//!
//! Compresses the encrypted payload with zlib and encodes the result as
//! standard base64, because the embedding layer only accepts printable
//! text. Decompression reverses both steps.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use flate2::read::{ZlibDecoder, ZlibEncoder};
use flate2::Compression;
use std::io::Read;
use thiserror::Error;

/// Compression errors.
#[derive(Error, Debug)]
pub enum CompressionError {
    #[error("Compression failed: {0}")]
    CompressionFailed(String),

    #[error("Malformed compressed data: {0}")]
    MalformedCompressedData(String),
}

/// Compresses data and armors it as printable base64 text.
pub fn compress(data: &[u8]) -> Result<String, CompressionError> {
    let mut encoder = ZlibEncoder::new(data, Compression::best());
    let mut compressed = Vec::new();

    encoder
        .read_to_end(&mut compressed)
        .map_err(|e| CompressionError::CompressionFailed(e.to_string()))?;

    Ok(BASE64.encode(&compressed))
}

/// Decompresses text produced by [`compress`].
///
/// Fails with [`CompressionError::MalformedCompressedData`] when the
/// input is not valid base64 or not a valid zlib stream; this only
/// occurs on corrupted or non-hidden carriers.
pub fn decompress(text: &str) -> Result<Vec<u8>, CompressionError> {
    let compressed = BASE64
        .decode(text)
        .map_err(|e| CompressionError::MalformedCompressedData(e.to_string()))?;

    let mut decoder = ZlibDecoder::new(compressed.as_slice());
    let mut data = Vec::new();

    decoder
        .read_to_end(&mut data)
        .map_err(|e| CompressionError::MalformedCompressedData(e.to_string()))?;

    Ok(data)
}
