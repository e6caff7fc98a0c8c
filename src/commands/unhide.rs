//! Unhide command - recover a hidden message from a video stream.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;

use framehide::video::{self, VideoError};

use super::CommandExecutor;

/// Unhide a message from a video.
///
/// Frames are scanned in stream order; the first frame whose payload
/// decrypts successfully provides the message. Corrupt frames are
/// skipped.
#[derive(Args, Debug)]
pub struct UnhideCommand {
    /// Path to the video carrying the hidden message
    pub video: PathBuf,

    /// Password used when the message was hidden
    pub password: String,

    /// Frame rate hint for PNG frame directories
    #[arg(long)]
    pub fps: Option<u32>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl CommandExecutor for UnhideCommand {
    fn execute(&self) -> Result<()> {
        let mut source = video::open_source(&self.video, self.fps)
            .with_context(|| format!("Failed to open video {}", self.video.display()))?;

        match video::reveal(source.as_mut(), &self.password) {
            Ok(revealed) => {
                if self.verbose {
                    eprintln!("Message recovered from frame {}", revealed.frame_index);
                }
                println!("Decrypted Message: {}", revealed.message);
                Ok(())
            }
            Err(VideoError::NoHiddenMessageFound) => {
                bail!("Failed to decrypt the message or no hidden message found")
            }
            Err(e) => Err(e.into()),
        }
    }
}
