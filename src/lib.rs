//! # Framehide - hide messages in images and video frames
//!
//! Framehide is a steganography tool that hides an encrypted message in
//! the least significant bits of a still image, or of every frame of a
//! video stream.
//!
//! ## Overview
//!
//! - The message is **encrypted** with ChaCha20-Poly1305 under a key
//!   derived from the password (PBKDF2-HMAC-SHA256, fresh 16-byte salt
//!   per call)
//! - The encrypted payload is **compressed** (zlib) and base64-armored
//!   into printable text
//! - The text is **embedded** one bit per color-channel LSB in a fixed
//!   row-major scan, terminated by a NUL marker; no sample moves by
//!   more than 1, which keeps the change invisible
//! - For video, the same payload is embedded **redundantly in every
//!   frame**; extraction opens each frame independently and the first
//!   frame that decrypts successfully wins
//!
//! Decoding with the wrong password fails closed: authenticated
//! decryption rejects the payload, and nothing garbled is ever
//! returned. Carriers must stay in lossless formats (PNG, raw RGB) -
//! lossy re-encoding destroys the embedded bits.
//!
//! ## Example
//!
//! ```rust
//! use framehide::{open_payload, seal_message, ImageCarrier};
//! use image::{ImageBuffer, Rgb};
//!
//! let pixels = ImageBuffer::from_fn(64, 64, |x, y| Rgb([x as u8, y as u8, 0]));
//! let carrier = ImageCarrier::from_rgb(pixels);
//!
//! let payload = seal_message("meet at dawn", "hunter2").unwrap();
//! let encoded = carrier.hide(&payload).unwrap();
//!
//! let recovered = encoded.reveal().expect("payload present");
//! assert_eq!(open_payload(&recovered, "hunter2").unwrap(), "meet at dawn");
//! ```
//!
//! ## Modules
//!
//! - [`crypto`]: key derivation, authenticated encryption, compression
//! - [`payload`]: the seal/open pipeline composing the crypto layers
//! - [`stego`]: LSB embedding over pixel buffers and the image carrier
//! - [`video`]: frame stream traits, frame codecs, and the video carrier

pub mod crypto;
pub mod payload;
pub mod stego;
pub mod video;

// Re-export the main entry points at the crate root
pub use crypto::{CipherError, CompressionError, KdfMode};
pub use payload::{
    open_payload, open_payload_with_mode, seal_message, seal_message_with_mode, PayloadError,
};
pub use stego::{
    encoded_output_path, hide_in_file, reveal_from_file, EmbedError, ImageCarrier,
    ImageCarrierError,
};
pub use video::{Codec, FrameSink, FrameSource, Revealed, VideoError};
