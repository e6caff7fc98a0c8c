//! Encode command - hide a message in a still image.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;

use framehide::{encoded_output_path, seal_message, ImageCarrier};

use super::{read_message, CommandExecutor};

/// Encode a message into a still image.
///
/// The message is encrypted with the password, compressed, and embedded
/// in the pixel LSBs. Output is always written as PNG next to the
/// input, named `<stem>_encoded.png`; the input file is never modified.
#[derive(Args, Debug)]
pub struct EncodeCommand {
    /// Path to the input image (PNG or JPEG)
    pub image: PathBuf,

    /// Message to hide (use '-' to read from stdin)
    pub message: String,

    /// Password for encrypting the message
    pub password: String,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl CommandExecutor for EncodeCommand {
    fn execute(&self) -> Result<()> {
        let message = read_message(&self.message)?;
        if message.is_empty() {
            bail!("Message cannot be empty");
        }
        if self.password.is_empty() {
            bail!("Password cannot be empty");
        }

        let carrier = ImageCarrier::from_file(&self.image)
            .with_context(|| format!("Failed to read carrier image {}", self.image.display()))?;

        let payload = seal_message(&message, &self.password)?;

        if self.verbose {
            let (width, height) = carrier.dimensions();
            eprintln!(
                "Carrier is {}x{} ({} payload bytes max)",
                width,
                height,
                carrier.capacity_bytes()
            );
            eprintln!("Sealed payload is {} bytes", payload.len());
        }

        let output = encoded_output_path(&self.image);
        carrier.hide(&payload)?.save(&output)?;

        println!("Message encoded and saved to {}", output.display());
        Ok(())
    }
}
