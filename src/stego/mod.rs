//! Steganographic embedding over pixel buffers.
//!
//! - [`bits`]: LSB embedding/extraction over flat channel-sample slices
//! - [`image`]: still-image carrier built on top of [`bits`]

pub mod bits;
pub mod image;

pub use bits::{capacity_bits, embed, extract, required_bits, EmbedError};
pub use self::image::{
    encoded_output_path, hide_in_file, reveal_from_file, ImageCarrier, ImageCarrierError,
};
