//! Framehide - LSB steganography for images and video streams.
//!
//! Thin CLI over the framehide library: encode/decode for still
//! images, hide/unhide for frame streams. All real work happens in the
//! library; this binary only parses arguments and reports results.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

use commands::{CommandExecutor, DecodeCommand, EncodeCommand, HideCommand, UnhideCommand};

/// Framehide - hide messages in images and video frames
#[derive(Parser)]
#[command(name = "framehide")]
#[command(version)]
#[command(about = "LSB steganography with password-gated, authenticated payloads")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a message into a still image (writes <stem>_encoded.png)
    Encode(EncodeCommand),

    /// Decode a hidden message from a still image
    Decode(DecodeCommand),

    /// Hide a message in every frame of a video
    Hide(HideCommand),

    /// Unhide a message from a video
    Unhide(UnhideCommand),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Encode(cmd) => cmd.execute(),
        Commands::Decode(cmd) => cmd.execute(),
        Commands::Hide(cmd) => cmd.execute(),
        Commands::Unhide(cmd) => cmd.execute(),
    }
}
