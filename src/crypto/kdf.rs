//! Password-based key derivation.
//!
//! Two named, versioned derivation modes:
//! - [`KdfMode::Pbkdf2V1`]: PBKDF2-HMAC-SHA256 over a fresh 16-byte salt
//!   with 100,000 iterations. This is the standard mode and the only one
//!   the CLI uses.
//! - [`KdfMode::LegacyPadV0`]: the password space-padded (or truncated)
//!   to 32 bytes, with no salt and no stretching. Trivially
//!   brute-forceable; kept only for reading carriers produced by old
//!   encoders and never selected implicitly.
//!
//! The modes are not interchangeable: keys derived under different modes
//! never match, and the cipher wire formats differ, so a payload sealed
//! under one mode cannot be opened under the other even with the correct
//! password.

use base64::{engine::general_purpose::URL_SAFE, Engine};
use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Salt length in bytes for the PBKDF2 mode.
pub const SALT_LEN: usize = 16;

/// Derived key length in bytes.
pub const KEY_LEN: usize = 32;

/// PBKDF2 iteration count for [`KdfMode::Pbkdf2V1`].
pub const PBKDF2_ITERATIONS: u32 = 100_000;

/// Key derivation mode a payload was sealed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KdfMode {
    /// Salted PBKDF2-HMAC-SHA256, 100,000 iterations.
    Pbkdf2V1,
    /// Saltless pad-to-32-bytes key. Weak; explicit opt-in only.
    LegacyPadV0,
}

/// A 32-byte symmetric key derived from a password.
///
/// Zeroized on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey {
    bytes: [u8; KEY_LEN],
}

impl DerivedKey {
    /// Raw key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }

    /// URL-safe base64 form of the key (44 characters).
    pub fn token(&self) -> String {
        URL_SAFE.encode(self.bytes)
    }
}

/// Derives a key with the standard iteration count.
///
/// Deterministic: the same password and salt always produce the same
/// key. Accepts any password and any 16-byte salt; there is no error
/// path.
pub fn derive(password: &str, salt: &[u8; SALT_LEN]) -> DerivedKey {
    derive_with_iterations(password, salt, PBKDF2_ITERATIONS)
}

/// Derives a key with an explicit iteration count.
pub fn derive_with_iterations(
    password: &str,
    salt: &[u8; SALT_LEN],
    iterations: u32,
) -> DerivedKey {
    let mut bytes = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, iterations, &mut bytes);
    DerivedKey { bytes }
}

/// Derives the legacy saltless key: the password's UTF-8 bytes padded
/// with spaces to 32 bytes, truncated if longer.
pub fn derive_legacy(password: &str) -> DerivedKey {
    let mut bytes = [b' '; KEY_LEN];
    let raw = password.as_bytes();
    let len = raw.len().min(KEY_LEN);
    bytes[..len].copy_from_slice(&raw[..len]);
    DerivedKey { bytes }
}
