//! Decode command - recover a hidden message from a still image.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;

use framehide::{open_payload, reveal_from_file};

use super::CommandExecutor;

/// Decode a hidden message from an image.
///
/// Fails with a non-zero exit when the password is wrong or the image
/// carries no hidden message - a wrong password never produces garbled
/// output.
#[derive(Args, Debug)]
pub struct DecodeCommand {
    /// Path to the encoded image
    pub image: PathBuf,

    /// Password used when the message was encoded
    pub password: String,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl CommandExecutor for DecodeCommand {
    fn execute(&self) -> Result<()> {
        let payload = reveal_from_file(&self.image)
            .with_context(|| format!("Failed to read carrier image {}", self.image.display()))?;

        let payload = match payload {
            Some(payload) => payload,
            None => bail!("No hidden message found in {}", self.image.display()),
        };

        if self.verbose {
            eprintln!("Extracted {} payload bytes", payload.len());
        }

        let message = open_payload(&payload, &self.password)
            .context("Wrong password or not a valid hidden message")?;

        println!("Decoded Message: {}", message);
        Ok(())
    }
}
