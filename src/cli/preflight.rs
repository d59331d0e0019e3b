//! Pre-flight checks before operations that need credentials.
//!
//! Validates configuration up front so a missing key is reported clearly
//! instead of as an opaque API failure.

use crate::config::YoutubeSettings;
use crate::error::{Result, TubecapError};

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Video, channel and playlist lookups require a Data API key.
    Metadata,
    /// Transcripts are read from public caption tracks.
    Transcript,
}

/// Run pre-flight checks for the given operation.
///
/// Returns Ok(()) if all checks pass, or an error describing what's missing.
pub fn check(operation: Operation, settings: &YoutubeSettings) -> Result<()> {
    match operation {
        Operation::Metadata => check_api_key(settings.api_key().as_deref()),
        Operation::Transcript => Ok(()),
    }
}

/// Check if a YouTube API key is configured.
fn check_api_key(key: Option<&str>) -> Result<()> {
    match key {
        Some(key) if !key.trim().is_empty() => Ok(()),
        _ => Err(TubecapError::MissingApiKey),
    }
}
