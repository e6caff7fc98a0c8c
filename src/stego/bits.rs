//! LSB embedding and extraction over flat channel-sample buffers.
//!
//! The payload is written one bit per sample, MSB-first within each
//! byte, in buffer order. For an RGB image buffer this is row-major
//! scan order with channel order R,G,B. Only the least significant bit
//! of each sample is touched, so no sample moves by more than 1.
//!
//! A NUL byte written after the last payload byte marks the end of the
//! payload. Payloads are restricted to printable ASCII (0x20-0x7e), so
//! the marker can never collide with payload content.

use thiserror::Error;

/// End-of-payload marker, eight zero bits.
const TERMINATOR: u8 = 0x00;

/// Errors that can occur while embedding a payload.
#[derive(Error, Debug)]
pub enum EmbedError {
    #[error("Payload too large for carrier: need {required_bits} bits, have {available_bits}")]
    InsufficientCapacity {
        required_bits: usize,
        available_bits: usize,
    },

    #[error("Payload byte 0x{byte:02x} is not printable ASCII")]
    NonPrintablePayload { byte: u8 },
}

fn is_printable(byte: u8) -> bool {
    (0x20..=0x7e).contains(&byte)
}

/// Number of payload bits a sample buffer can hold (one per sample).
pub fn capacity_bits(samples: &[u8]) -> usize {
    samples.len()
}

/// Number of bits a payload occupies, terminator included.
pub fn required_bits(payload: &str) -> usize {
    (payload.len() + 1) * 8
}

/// Embeds a printable payload into the LSBs of a sample buffer.
///
/// The buffer is modified in place; every sample keeps its high 7 bits.
/// Fails without touching the buffer when the payload does not fit or
/// contains non-printable bytes.
pub fn embed(samples: &mut [u8], payload: &str) -> Result<(), EmbedError> {
    let required_bits = required_bits(payload);
    let available_bits = capacity_bits(samples);
    if required_bits > available_bits {
        return Err(EmbedError::InsufficientCapacity {
            required_bits,
            available_bits,
        });
    }

    if let Some(byte) = payload.bytes().find(|b| !is_printable(*b)) {
        return Err(EmbedError::NonPrintablePayload { byte });
    }

    let mut index = 0;
    for byte in payload.bytes().chain(std::iter::once(TERMINATOR)) {
        for shift in (0..8).rev() {
            let bit = (byte >> shift) & 1;
            samples[index] = (samples[index] & 0xfe) | bit;
            index += 1;
        }
    }

    Ok(())
}

/// Extracts a payload from the LSBs of a sample buffer.
///
/// Scans in the same fixed order as [`embed`], accumulating eight
/// samples per byte until the terminator is recognized. Returns `None`
/// when a non-printable byte appears or the buffer is exhausted without
/// a terminator - both mean the carrier holds no hidden data.
pub fn extract(samples: &[u8]) -> Option<String> {
    let mut payload = Vec::new();

    for chunk in samples.chunks_exact(8) {
        let mut byte = 0u8;
        for sample in chunk {
            byte = (byte << 1) | (sample & 1);
        }

        if byte == TERMINATOR {
            return String::from_utf8(payload).ok();
        }
        if !is_printable(byte) {
            return None;
        }
        payload.push(byte);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_buffer(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i * 37 % 256) as u8).collect()
    }

    #[test]
    fn test_embed_extract_roundtrip() {
        let mut samples = sample_buffer(1024);
        embed(&mut samples, "Hello, carrier!").unwrap();

        assert_eq!(extract(&samples).as_deref(), Some("Hello, carrier!"));
    }

    #[test]
    fn test_empty_payload_roundtrip() {
        let mut samples = sample_buffer(64);
        embed(&mut samples, "").unwrap();

        assert_eq!(extract(&samples).as_deref(), Some(""));
    }

    #[test]
    fn test_exact_capacity_succeeds() {
        let payload = "ABCD";
        let mut samples = sample_buffer(required_bits(payload));

        embed(&mut samples, payload).unwrap();

        assert_eq!(extract(&samples).as_deref(), Some(payload));
    }

    #[test]
    fn test_one_bit_short_fails() {
        let payload = "ABCD";
        let mut samples = sample_buffer(required_bits(payload) - 1);

        let result = embed(&mut samples, payload);

        assert!(matches!(
            result,
            Err(EmbedError::InsufficientCapacity {
                required_bits: 40,
                available_bits: 39,
            })
        ));
    }

    #[test]
    fn test_non_printable_payload_rejected() {
        let mut samples = sample_buffer(1024);
        let result = embed(&mut samples, "line\nbreak");

        assert!(matches!(
            result,
            Err(EmbedError::NonPrintablePayload { byte: 0x0a })
        ));
    }

    #[test]
    fn test_failed_embed_leaves_buffer_untouched() {
        let original = sample_buffer(16);
        let mut samples = original.clone();

        embed(&mut samples, "too long for sixteen samples").unwrap_err();

        assert_eq!(samples, original);
    }

    #[test]
    fn test_samples_move_at_most_one() {
        let original = sample_buffer(2048);
        let mut samples = original.clone();
        embed(&mut samples, "bounded distortion").unwrap();

        for (before, after) in original.iter().zip(&samples) {
            assert!(before.abs_diff(*after) <= 1);
            assert_eq!(before >> 1, after >> 1);
        }
    }

    #[test]
    fn test_embed_is_idempotent() {
        let mut first = sample_buffer(512);
        embed(&mut first, "same payload").unwrap();

        let mut second = first.clone();
        embed(&mut second, "same payload").unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_extract_without_terminator_returns_none() {
        let mut samples = sample_buffer(24);
        embed(&mut samples, "AB").unwrap();

        // Drop the terminator bits from the buffer
        assert_eq!(extract(&samples[..16]), None);
    }

    #[test]
    fn test_extract_rejects_non_printable_carrier() {
        // All-ones LSBs decode to 0xff immediately
        let samples = vec![0xffu8; 256];

        assert_eq!(extract(&samples), None);
    }

    #[test]
    fn test_capacity_accounting() {
        assert_eq!(capacity_bits(&[0u8; 30]), 30);
        assert_eq!(required_bits(""), 8);
        assert_eq!(required_bits("abc"), 32);
    }
}
