//! Video carriers: frame stream traits, codecs, and the per-frame
//! embedding discipline.
//!
//! Container handling stays behind the [`FrameSource`] and
//! [`FrameSink`] traits - the carrier logic only ever asks for "the
//! next frame" or hands over "the next modified frame". Two frame-exact
//! codecs are provided:
//!
//! - [`raw`]: a single-file raw RGB24 stream (`FHV1` header)
//! - [`png_seq`]: a directory of numbered PNG frames
//!
//! Both are lossless; a lossy codec would destroy the embedded bits.

pub mod carrier;
pub mod png_seq;
pub mod raw;

pub use carrier::{hide, reveal, Revealed};
pub use png_seq::{PngSequenceReader, PngSequenceWriter};
pub use raw::{RawVideoReader, RawVideoWriter};

use image::RgbImage;
use std::path::Path;
use thiserror::Error;

use crate::stego::bits::EmbedError;

/// Frame rate assumed for sources that do not record one.
pub const DEFAULT_FRAME_RATE: u32 = 30;

/// Errors that can occur during video carrier operations.
#[derive(Error, Debug)]
pub enum VideoError {
    #[error("Cannot read video carrier: {0}")]
    CarrierRead(String),

    #[error("Cannot write video carrier: {0}")]
    CarrierWrite(String),

    #[error("{0}")]
    Embed(#[from] EmbedError),

    #[error("No hidden message found in any frame")]
    NoHiddenMessageFound,
}

/// A decodable stream of frames with fixed dimensions and frame rate.
///
/// Frames are yielded strictly in stream order and exactly once; the
/// stream never rewinds.
pub trait FrameSource {
    /// Frame width in pixels, fixed for the whole stream.
    fn width(&self) -> u32;

    /// Frame height in pixels, fixed for the whole stream.
    fn height(&self) -> u32;

    /// Frames per second.
    fn frame_rate(&self) -> u32;

    /// Decodes the next frame.
    ///
    /// `None` means end of stream. `Some(Err(_))` means this frame is
    /// undecodable but the stream continues; callers may skip it.
    fn next_frame(&mut self) -> Option<Result<RgbImage, VideoError>>;
}

/// An encodable stream of frames.
pub trait FrameSink {
    /// Encodes one frame. Frames must arrive in presentation order.
    fn write_frame(&mut self, frame: &RgbImage) -> Result<(), VideoError>;

    /// Flushes any buffered output.
    fn finish(&mut self) -> Result<(), VideoError>;
}

/// Output codec selection for video carriers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Codec {
    /// Single-file raw RGB24 stream with an `FHV1` header.
    Raw,
    /// Directory of numbered PNG frames.
    PngSequence,
}

/// Opens a frame source by path: a directory is read as a PNG frame
/// sequence, anything else as a raw `FHV1` stream.
///
/// `frame_rate` overrides the rate for sources that do not record one.
pub fn open_source(
    path: &Path,
    frame_rate: Option<u32>,
) -> Result<Box<dyn FrameSource>, VideoError> {
    if path.is_dir() {
        let reader =
            PngSequenceReader::open(path, frame_rate.unwrap_or(DEFAULT_FRAME_RATE))?;
        Ok(Box::new(reader))
    } else {
        Ok(Box::new(RawVideoReader::open(path)?))
    }
}

/// Creates a frame sink at `path` for the requested codec and stream
/// parameters.
pub fn create_sink(
    path: &Path,
    codec: Codec,
    width: u32,
    height: u32,
    frame_rate: u32,
) -> Result<Box<dyn FrameSink>, VideoError> {
    match codec {
        Codec::Raw => Ok(Box::new(RawVideoWriter::create(
            path, width, height, frame_rate,
        )?)),
        Codec::PngSequence => Ok(Box::new(PngSequenceWriter::create(path, width, height)?)),
    }
}
