//! PNG frame-sequence carrier.
//!
//! Frames live in a directory as `frame_000000.png`, `frame_000001.png`
//! and so on. The sequence ends at the first missing index. PNG keeps
//! every sample byte-exact, which the embedded bits require.
//!
//! The format records no frame rate; readers take one as a parameter.

use image::{ImageFormat, RgbImage};
use std::fs;
use std::path::{Path, PathBuf};

use super::{FrameSink, FrameSource, VideoError};

fn frame_path(dir: &Path, index: u64) -> PathBuf {
    dir.join(format!("frame_{:06}.png", index))
}

/// Reads frames from a PNG sequence directory.
pub struct PngSequenceReader {
    dir: PathBuf,
    width: u32,
    height: u32,
    frame_rate: u32,
    next_index: u64,
    first_frame: Option<RgbImage>,
}

impl PngSequenceReader {
    /// Opens a sequence directory.
    ///
    /// The first frame must exist and decode; it fixes the stream
    /// dimensions.
    pub fn open<P: AsRef<Path>>(dir: P, frame_rate: u32) -> Result<Self, VideoError> {
        let dir = dir.as_ref().to_path_buf();
        if !dir.is_dir() {
            return Err(VideoError::CarrierRead(format!(
                "{} is not a directory",
                dir.display()
            )));
        }

        let first_path = frame_path(&dir, 0);
        let first = image::open(&first_path)
            .map_err(|e| {
                VideoError::CarrierRead(format!("{}: {}", first_path.display(), e))
            })?
            .to_rgb8();
        let (width, height) = first.dimensions();

        Ok(Self {
            dir,
            width,
            height,
            frame_rate,
            next_index: 0,
            first_frame: Some(first),
        })
    }
}

impl FrameSource for PngSequenceReader {
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
        if let Some(frame) = self.first_frame.take() {
            self.next_index = 1;
            return Some(Ok(frame));
        }

        let path = frame_path(&self.dir, self.next_index);
        if !path.exists() {
            return None;
        }
        self.next_index += 1;

        match image::open(&path) {
            Ok(frame) => Some(Ok(frame.to_rgb8())),
            Err(e) => Some(Err(VideoError::CarrierRead(format!(
                "{}: {}",
                path.display(),
                e
            )))),
        }
    }
}

/// Writes frames into a PNG sequence directory.
pub struct PngSequenceWriter {
    dir: PathBuf,
    width: u32,
    height: u32,
    next_index: u64,
}

impl PngSequenceWriter {
    /// Creates the sequence directory (and parents) if needed.
    pub fn create<P: AsRef<Path>>(dir: P, width: u32, height: u32) -> Result<Self, VideoError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)
            .map_err(|e| VideoError::CarrierWrite(format!("{}: {}", dir.display(), e)))?;

        Ok(Self {
            dir,
            width,
            height,
            next_index: 0,
        })
    }
}

impl FrameSink for PngSequenceWriter {
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

        let path = frame_path(&self.dir, self.next_index);
        frame
            .save_with_format(&path, ImageFormat::Png)
            .map_err(|e| VideoError::CarrierWrite(format!("{}: {}", path.display(), e)))?;
        self.next_index += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), VideoError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb};
    use tempfile::tempdir;

    fn test_frame(seed: u8) -> RgbImage {
        ImageBuffer::from_fn(20, 10, |x, y| {
            Rgb([seed, (x % 256) as u8, (y % 256) as u8])
        })
    }

    #[test]
    fn test_write_read_roundtrip() {
        let dir = tempdir().unwrap();
        let seq = dir.path().join("frames");

        let mut writer = PngSequenceWriter::create(&seq, 20, 10).unwrap();
        for seed in 0..4 {
            writer.write_frame(&test_frame(seed)).unwrap();
        }
        writer.finish().unwrap();

        let mut reader = PngSequenceReader::open(&seq, 24).unwrap();
        assert_eq!(reader.width(), 20);
        assert_eq!(reader.height(), 10);
        assert_eq!(reader.frame_rate(), 24);

        for seed in 0..4 {
            let frame = reader.next_frame().unwrap().unwrap();
            assert_eq!(frame, test_frame(seed));
        }
        assert!(reader.next_frame().is_none());
    }

    #[test]
    fn test_unreadable_frame_is_skippable_not_fatal() {
        let dir = tempdir().unwrap();
        let seq = dir.path().join("frames");

        let mut writer = PngSequenceWriter::create(&seq, 20, 10).unwrap();
        for seed in 0..3 {
            writer.write_frame(&test_frame(seed)).unwrap();
        }
        fs::write(seq.join("frame_000001.png"), b"not a png").unwrap();

        let mut reader = PngSequenceReader::open(&seq, 24).unwrap();
        assert!(reader.next_frame().unwrap().is_ok());
        assert!(reader.next_frame().unwrap().is_err());
        assert!(reader.next_frame().unwrap().is_ok());
        assert!(reader.next_frame().is_none());
    }

    #[test]
    fn test_missing_directory_rejected() {
        let dir = tempdir().unwrap();
        let result = PngSequenceReader::open(dir.path().join("nope"), 24);

        assert!(matches!(result, Err(VideoError::CarrierRead(_))));
    }
}
