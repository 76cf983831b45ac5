//! Main CLI parser and top-level argument handling.

use clap::Parser;

use crate::commands::Commands;

/// Plain-TCP gateway to the Gemini API.
///
/// This is the top-level parser that handles global options and dispatches
/// to subcommands.
#[derive(Parser)]
#[command(name = "gemgate")]
#[command(about = "Plain-text TCP gateway to the Gemini API")]
#[command(version)]
pub struct Cli {
    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
