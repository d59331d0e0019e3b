//! Tubecap - YouTube data and transcripts for AI assistants
//!
//! A read-only YouTube tool server speaking the Model Context Protocol.
//!
//! # Overview
//!
//! Tubecap allows you to:
//! - Fetch a video's captions as an ordered list of timed segments
//! - Search a transcript for a phrase, with neighbouring segments as context
//! - Render a transcript with `MM:SS` / `HH:MM:SS` display times
//! - Look up videos, channels and playlists through the YouTube Data API
//!
//! # Architecture
//!
//! - `captions` - Caption sources (YouTube caption tracks, in-memory)
//! - `transcript` - Normalization, search, timestamps and the transcript service
//! - `youtube` - YouTube Data API client and response cleaners
//! - `mcp` - MCP server over stdio
//! - `config` - Configuration management
//!
//! # Example
//!
//! ```rust,no_run
//! use tubecap::config::Settings;
//! use tubecap::transcript::{SearchTranscriptArgs, TranscriptService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let service = TranscriptService::from_settings(&settings)?;
//!
//!     let args = SearchTranscriptArgs::new("dQw4w9WgXcQ", "never gonna");
//!     let result = service.search_transcript(&args).await?;
//!     println!("{} matches", result.total_matches);
//!
//!     Ok(())
//! }
//! ```

pub mod captions;
pub mod cli;
pub mod config;
pub mod error;
pub mod http;
pub mod mcp;
pub mod transcript;
pub mod youtube;

pub use error::{Result, TubecapError};
