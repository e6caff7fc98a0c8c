//! Per-frame redundant embedding and first-success extraction.
//!
//! Hiding embeds the identical sealed payload into every decodable
//! frame, so the message survives as long as any one frame does.
//! Revealing opens each frame's payload independently - decompress and
//! decrypt per frame, never concatenate across frames - and the first
//! frame that opens successfully is authoritative.

use crate::payload;
use crate::stego::bits;

use super::{FrameSink, FrameSource, VideoError};

/// A message recovered from a frame stream.
#[derive(Debug, Clone)]
pub struct Revealed {
    /// The decrypted message.
    pub message: String,
    /// Zero-based index of the frame that produced it.
    pub frame_index: u64,
}

/// Embeds `payload` into every decodable frame of `source`, writing the
/// modified frames to `sink` in stream order.
///
/// One decode-embed-encode cycle runs at a time, so memory stays
/// bounded by a single frame and the stream never rewinds. Undecodable
/// input frames are skipped. Returns the number of frames written.
pub fn hide<S, K>(source: &mut S, sink: &mut K, payload: &str) -> Result<u64, VideoError>
where
    S: FrameSource + ?Sized,
    K: FrameSink + ?Sized,
{
    let mut frames = 0u64;

    while let Some(next) = source.next_frame() {
        let mut frame = match next {
            Ok(frame) => frame,
            Err(_) => continue,
        };

        bits::embed(&mut frame, payload)?;
        sink.write_frame(&frame)?;
        frames += 1;
    }

    sink.finish()?;
    Ok(frames)
}

/// Scans `source` in stream order for a frame whose payload opens under
/// `password`.
///
/// Each frame is treated independently: extract, decompress, decrypt.
/// Frames that fail any of those steps are skipped; iteration stops at
/// the first success. When the stream ends without one, the result is
/// [`VideoError::NoHiddenMessageFound`] - a wrong password looks the
/// same as a carrier with nothing hidden, never garbled output.
pub fn reveal<S>(source: &mut S, password: &str) -> Result<Revealed, VideoError>
where
    S: FrameSource + ?Sized,
{
    let mut index = 0u64;

    while let Some(next) = source.next_frame() {
        let frame_index = index;
        index += 1;

        let frame = match next {
            Ok(frame) => frame,
            Err(_) => continue,
        };

        let text = match bits::extract(&frame) {
            Some(text) => text,
            None => continue,
        };

        match payload::open_payload(&text, password) {
            Ok(message) => {
                return Ok(Revealed {
                    message,
                    frame_index,
                })
            }
            Err(_) => continue,
        }
    }

    Err(VideoError::NoHiddenMessageFound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::seal_message;
    use image::{ImageBuffer, Rgb, RgbImage};

    const WIDTH: u32 = 64;
    const HEIGHT: u32 = 48;

    fn test_frame(seed: u8) -> RgbImage {
        ImageBuffer::from_fn(WIDTH, HEIGHT, |x, y| {
            Rgb([
                (x as u8).wrapping_add(seed),
                (y as u8).wrapping_mul(7),
                seed.wrapping_mul(13),
            ])
        })
    }

    /// In-memory frame stream; `None` entries model undecodable frames.
    struct MemorySource {
        frames: Vec<Option<RgbImage>>,
        pos: usize,
    }

    impl MemorySource {
        fn new(frames: Vec<Option<RgbImage>>) -> Self {
            Self { frames, pos: 0 }
        }
    }

    impl FrameSource for MemorySource {
        fn width(&self) -> u32 {
            WIDTH
        }

        fn height(&self) -> u32 {
            HEIGHT
        }

        fn frame_rate(&self) -> u32 {
            30
        }

        fn next_frame(&mut self) -> Option<Result<RgbImage, VideoError>> {
            if self.pos >= self.frames.len() {
                return None;
            }
            let entry = self.frames[self.pos].take();
            self.pos += 1;

            Some(match entry {
                Some(frame) => Ok(frame),
                None => Err(VideoError::CarrierRead("corrupt frame".to_string())),
            })
        }
    }

    struct MemorySink {
        frames: Vec<RgbImage>,
    }

    impl FrameSink for MemorySink {
        fn write_frame(&mut self, frame: &RgbImage) -> Result<(), VideoError> {
            self.frames.push(frame.clone());
            Ok(())
        }

        fn finish(&mut self) -> Result<(), VideoError> {
            Ok(())
        }
    }

    fn plain_frames(count: u8) -> Vec<Option<RgbImage>> {
        (0..count).map(|seed| Some(test_frame(seed))).collect()
    }

    #[test]
    fn test_hide_embeds_every_frame() {
        let payload = seal_message("redundant", "pw").unwrap();
        let mut source = MemorySource::new(plain_frames(5));
        let mut sink = MemorySink { frames: Vec::new() };

        let written = hide(&mut source, &mut sink, &payload).unwrap();

        assert_eq!(written, 5);
        for frame in &sink.frames {
            assert_eq!(bits::extract(frame).as_deref(), Some(payload.as_str()));
        }
    }

    #[test]
    fn test_hide_reveal_roundtrip() {
        let payload = seal_message("five frames deep", "pw").unwrap();
        let mut source = MemorySource::new(plain_frames(5));
        let mut sink = MemorySink { frames: Vec::new() };
        hide(&mut source, &mut sink, &payload).unwrap();

        let mut encoded =
            MemorySource::new(sink.frames.into_iter().map(Some).collect());
        let revealed = reveal(&mut encoded, "pw").unwrap();

        assert_eq!(revealed.message, "five frames deep");
        assert_eq!(revealed.frame_index, 0);
    }

    #[test]
    fn test_reveal_survives_corrupt_frames() {
        let payload = seal_message("survivor", "pw").unwrap();
        let mut source = MemorySource::new(plain_frames(5));
        let mut sink = MemorySink { frames: Vec::new() };
        hide(&mut source, &mut sink, &payload).unwrap();

        // Frames 2 and 4 unreadable, frames 1/3/5 intact
        let mut frames: Vec<Option<RgbImage>> =
            sink.frames.into_iter().map(Some).collect();
        frames[1] = None;
        frames[3] = None;

        let revealed = reveal(&mut MemorySource::new(frames), "pw").unwrap();

        assert_eq!(revealed.message, "survivor");
    }

    #[test]
    fn test_reveal_skips_frames_that_do_not_open() {
        let other = seal_message("different stream", "other password").unwrap();
        let payload = seal_message("the real one", "pw").unwrap();

        let mut first = test_frame(0);
        bits::embed(&mut first, &other).unwrap();
        let mut second = test_frame(1);
        bits::embed(&mut second, &payload).unwrap();

        let mut source = MemorySource::new(vec![Some(first), Some(second)]);
        let revealed = reveal(&mut source, "pw").unwrap();

        assert_eq!(revealed.message, "the real one");
        assert_eq!(revealed.frame_index, 1);
    }

    #[test]
    fn test_wrong_password_finds_nothing() {
        let payload = seal_message("secret", "correct").unwrap();
        let mut source = MemorySource::new(plain_frames(3));
        let mut sink = MemorySink { frames: Vec::new() };
        hide(&mut source, &mut sink, &payload).unwrap();

        let mut encoded =
            MemorySource::new(sink.frames.into_iter().map(Some).collect());
        let result = reveal(&mut encoded, "wrong");

        assert!(matches!(result, Err(VideoError::NoHiddenMessageFound)));
    }

    #[test]
    fn test_clean_stream_finds_nothing() {
        let result = reveal(&mut MemorySource::new(plain_frames(3)), "pw");

        assert!(matches!(result, Err(VideoError::NoHiddenMessageFound)));
    }

    #[test]
    fn test_empty_stream_finds_nothing() {
        let result = reveal(&mut MemorySource::new(Vec::new()), "pw");

        assert!(matches!(result, Err(VideoError::NoHiddenMessageFound)));
    }

    #[test]
    fn test_hide_skips_undecodable_input_frames() {
        let payload = seal_message("gappy input", "pw").unwrap();
        let mut frames = plain_frames(4);
        frames[2] = None;

        let mut source = MemorySource::new(frames);
        let mut sink = MemorySink { frames: Vec::new() };
        let written = hide(&mut source, &mut sink, &payload).unwrap();

        assert_eq!(written, 3);
    }

    #[test]
    fn test_hide_rejects_oversized_payload() {
        // 8x8 frame: 192 samples, nowhere near enough for a sealed payload
        let tiny = ImageBuffer::from_pixel(8, 8, Rgb([0u8, 0, 0]));
        let payload = seal_message("way too big for that frame", "pw").unwrap();

        let mut source = MemorySource::new(vec![Some(tiny)]);
        let mut sink = MemorySink { frames: Vec::new() };
        let result = hide(&mut source, &mut sink, &payload);

        assert!(matches!(result, Err(VideoError::Embed(_))));
    }
}
