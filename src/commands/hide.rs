//! Hide command - embed a message in every frame of a video stream.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;

use framehide::seal_message;
use framehide::video::{self, Codec};

use super::{read_message, CommandExecutor};

/// Hide a message in every frame of a video.
///
/// The sealed payload is embedded redundantly, so the message survives
/// as long as at least one frame stays intact. The output codec must be
/// lossless - a lossy re-encode destroys the hidden bits.
#[derive(Args, Debug)]
pub struct HideCommand {
    /// Path to the input video (FHV1 raw stream, or a PNG frame directory)
    pub input: PathBuf,

    /// Path for the output video carrying the hidden message
    pub output: PathBuf,

    /// Message to hide (use '-' to read from stdin)
    pub message: String,

    /// Password for encrypting the message
    pub password: String,

    /// Output codec: raw (FHV1 RGB24 stream) or png-seq (PNG frame directory)
    #[arg(long, default_value = "raw")]
    pub codec: String,

    /// Frame rate override (defaults to the input stream's rate)
    #[arg(long)]
    pub fps: Option<u32>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl CommandExecutor for HideCommand {
    fn execute(&self) -> Result<()> {
        let message = read_message(&self.message)?;
        if message.is_empty() {
            bail!("Message cannot be empty");
        }
        if self.password.is_empty() {
            bail!("Password cannot be empty");
        }

        let codec = match self.codec.to_lowercase().as_str() {
            "raw" => Codec::Raw,
            "png-seq" | "png" => Codec::PngSequence,
            other => bail!("Unknown codec: {}. Use: raw or png-seq", other),
        };

        let mut source = video::open_source(&self.input, self.fps)
            .with_context(|| format!("Failed to open input video {}", self.input.display()))?;

        let frame_rate = self.fps.unwrap_or_else(|| source.frame_rate());
        if self.verbose {
            eprintln!(
                "Input is {}x{} at {} fps",
                source.width(),
                source.height(),
                frame_rate
            );
        }

        let mut sink = video::create_sink(
            &self.output,
            codec,
            source.width(),
            source.height(),
            frame_rate,
        )
        .with_context(|| format!("Failed to open output video {}", self.output.display()))?;

        let payload = seal_message(&message, &self.password)?;
        if self.verbose {
            eprintln!("Sealed payload is {} bytes per frame", payload.len());
        }

        let frames = video::hide(source.as_mut(), sink.as_mut(), &payload)?;

        println!(
            "Message successfully hidden in {} frames to {}",
            frames,
            self.output.display()
        );
        Ok(())
    }
}
