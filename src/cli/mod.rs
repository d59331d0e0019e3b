//! CLI module for Tubecap.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Tubecap - YouTube data and transcripts for AI assistants
///
/// Runs an MCP server exposing read-only YouTube tools, and offers the
/// transcript tools directly on the command line.
#[derive(Parser, Debug)]
#[command(name = "tubecap")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start MCP server for AI assistant integration (Claude, etc.)
    Mcp,

    /// Print the transcript of a video
    Transcript {
        /// YouTube URL or video ID
        video: String,

        /// Preferred caption language (e.g. "en")
        #[arg(short, long)]
        language: Option<String>,

        /// Print "[MM:SS] text" lines instead of JSON
        #[arg(short, long)]
        timestamps: bool,
    },

    /// Search within the transcript of a video
    Search {
        /// YouTube URL or video ID
        video: String,

        /// Text to search for (case-insensitive)
        query: String,

        /// Preferred caption language (e.g. "en")
        #[arg(short, long)]
        language: Option<String>,

        /// Segments of context to show around each match
        #[arg(short, long)]
        window: Option<usize>,
    },

    /// Show details of a video (requires YOUTUBE_API_KEY)
    Video {
        /// YouTube URL or video ID
        video: String,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Write the current configuration to the default config file
    Init,

    /// Show configuration file path
    Path,
}
