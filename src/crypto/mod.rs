//! Cryptographic pipeline for hidden payloads.
//!
//! This module provides:
//! - Password-based key derivation (PBKDF2-HMAC-SHA256, plus the
//!   explicit legacy pad mode)
//! - Authenticated symmetric encryption (ChaCha20-Poly1305, salted per
//!   call)
//! - Payload compression with base64 armoring (zlib)

pub mod cipher;
pub mod compression;
pub mod kdf;

pub use cipher::{decrypt, decrypt_with_mode, encrypt, encrypt_with_mode, CipherError};
pub use compression::{compress, decompress, CompressionError};
pub use kdf::{
    derive, derive_legacy, derive_with_iterations, DerivedKey, KdfMode, KEY_LEN,
    PBKDF2_ITERATIONS, SALT_LEN,
};
