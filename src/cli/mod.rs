//! CLI module for Movpress
//!
//! This module handles command-line argument parsing.

use clap::Parser;
use std::path::PathBuf;

/// Movpress batch video re-encoder
///
/// Re-encodes every `.mov` file in a directory to HEVC, writing results to
/// a `videoOutput` subdirectory and trashing originals after a successful
/// encode.
#[derive(Parser, Debug)]
#[command(name = "movpress")]
#[command(about = "Reencode videos to a more efficient format")]
#[command(version)]
pub struct Cli {
    /// Input folder location
    #[arg(short = 'i', value_name = "DIR")]
    pub input: PathBuf,
}
