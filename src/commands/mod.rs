//! Command module - one module per CLI subcommand.
//!
//! Each command is a separate module implementing the `CommandExecutor`
//! trait, mirroring the subcommand layout of the argument parser.

mod decode;
mod encode;
mod hide;
mod unhide;

pub use decode::DecodeCommand;
pub use encode::EncodeCommand;
pub use hide::HideCommand;
pub use unhide::UnhideCommand;

use anyhow::{Context, Result};
use std::io::Read;

/// Trait for command execution.
///
/// Each command struct holds its parsed arguments and implements this
/// trait to define its execution logic.
pub trait CommandExecutor {
    /// Executes the command with its parsed arguments.
    fn execute(&self) -> Result<()>;
}

/// Resolves a message argument; `-` reads the message from stdin.
fn read_message(arg: &str) -> Result<String> {
    if arg != "-" {
        return Ok(arg.to_string());
    }

    eprintln!("Reading message from stdin (Ctrl+D to finish):");
    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read message from stdin")?;
    Ok(buffer.trim().to_string())
}
