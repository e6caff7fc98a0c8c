//! Raw RGB24 frame stream.
//!
//! Layout: a 16-byte header (magic `FHV1`, then width, height and frame
//! rate as little-endian u32) followed by tightly packed frames of
//! `width * height * 3` bytes each, row-major R,G,B. No per-frame
//! header, no compression - every sample survives byte-exact.

use image::RgbImage;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use super::{FrameSink, FrameSource, VideoError};

/// Stream magic, also the format version.
const MAGIC: &[u8; 4] = b"FHV1";

/// Reads frames from a raw RGB24 stream.
pub struct RawVideoReader<R: Read> {
    reader: R,
    width: u32,
    height: u32,
    frame_rate: u32,
    frame_len: usize,
    done: bool,
}

impl RawVideoReader<BufReader<File>> {
    /// Opens a raw stream file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, VideoError> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| VideoError::CarrierRead(format!("{}: {}", path.display(), e)))?;
        Self::new(BufReader::new(file))
    }
}

impl<R: Read> RawVideoReader<R> {
    /// Reads the stream header and prepares frame iteration.
    pub fn new(mut reader: R) -> Result<Self, VideoError> {
        let mut magic = [0u8; 4];
        reader
            .read_exact(&mut magic)
            .map_err(|e| VideoError::CarrierRead(e.to_string()))?;
        if &magic != MAGIC {
            return Err(VideoError::CarrierRead(
                "not an FHV1 raw video stream".to_string(),
            ));
        }

        let width = read_u32(&mut reader)?;
        let height = read_u32(&mut reader)?;
        let frame_rate = read_u32(&mut reader)?;
        if width == 0 || height == 0 {
            return Err(VideoError::CarrierRead(format!(
                "invalid stream dimensions {}x{}",
                width, height
            )));
        }

        Ok(Self {
            reader,
            width,
            height,
            frame_rate,
            frame_len: width as usize * height as usize * 3,
            done: false,
        })
    }
}

fn read_u32<R: Read>(reader: &mut R) -> Result<u32, VideoError> {
    let mut buf = [0u8; 4];
    reader
        .read_exact(&mut buf)
        .map_err(|e| VideoError::CarrierRead(e.to_string()))?;
    Ok(u32::from_le_bytes(buf))
}

impl<R: Read> FrameSource for RawVideoReader<R> {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn frame_rate(&self) -> u32 {
        self.frame_rate
    }

    fn next_frame(&mut self) -> Option<Result<RgbImage, VideoError>> {
        if self.done {
            return None;
        }

        let mut buf = vec![0u8; self.frame_len];
        let mut filled = 0;
        while filled < self.frame_len {
            match self.reader.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.done = true;
                    return Some(Err(VideoError::CarrierRead(e.to_string())));
                }
            }
        }

        if filled < self.frame_len {
            // end of stream; a truncated trailing frame is dropped
            self.done = true;
            return None;
        }

        match RgbImage::from_raw(self.width, self.height, buf) {
            Some(frame) => Some(Ok(frame)),
            None => {
                self.done = true;
                Some(Err(VideoError::CarrierRead(
                    "frame buffer size mismatch".to_string(),
                )))
            }
        }
    }
}

/// Writes frames as a raw RGB24 stream.
pub struct RawVideoWriter<W: Write> {
    writer: W,
    width: u32,
    height: u32,
}

impl RawVideoWriter<BufWriter<File>> {
    /// Creates a raw stream file, writing its header immediately.
    pub fn create<P: AsRef<Path>>(
        path: P,
        width: u32,
        height: u32,
        frame_rate: u32,
    ) -> Result<Self, VideoError> {
        let path = path.as_ref();
        let file = File::create(path)
            .map_err(|e| VideoError::CarrierWrite(format!("{}: {}", path.display(), e)))?;
        Self::new(BufWriter::new(file), width, height, frame_rate)
    }
}

impl<W: Write> RawVideoWriter<W> {
    /// Writes the stream header into `writer`.
    pub fn new(
        mut writer: W,
        width: u32,
        height: u32,
        frame_rate: u32,
    ) -> Result<Self, VideoError> {
        if width == 0 || height == 0 {
            return Err(VideoError::CarrierWrite(format!(
                "invalid stream dimensions {}x{}",
                width, height
            )));
        }

        let mut header = Vec::with_capacity(16);
        header.extend_from_slice(MAGIC);
        header.extend_from_slice(&width.to_le_bytes());
        header.extend_from_slice(&height.to_le_bytes());
        header.extend_from_slice(&frame_rate.to_le_bytes());
        writer
            .write_all(&header)
            .map_err(|e| VideoError::CarrierWrite(e.to_string()))?;

        Ok(Self {
            writer,
            width,
            height,
        })
    }

    /// Consumes the writer and returns the underlying stream.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> FrameSink for RawVideoWriter<W> {
    fn write_frame(&mut self, frame: &RgbImage) -> Result<(), VideoError> {
        if frame.dimensions() != (self.width, self.height) {
            return Err(VideoError::CarrierWrite(format!(
                "frame is {}x{}, stream is {}x{}",
                frame.width(),
                frame.height(),
                self.width,
                self.height
            )));
        }

        self.writer
            .write_all(frame.as_raw())
            .map_err(|e| VideoError::CarrierWrite(e.to_string()))
    }

    fn finish(&mut self) -> Result<(), VideoError> {
        self.writer
            .flush()
            .map_err(|e| VideoError::CarrierWrite(e.to_string()))
    }
}
