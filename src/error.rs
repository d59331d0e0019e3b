//! Error types for Tubecap.

use thiserror::Error;

/// Library-level error type for Tubecap operations.
#[derive(Error, Debug)]
pub enum TubecapError {
    #[error("Transcript unavailable for video {video_id}{}: {reason}", language_suffix(.language))]
    TranscriptUnavailable {
        video_id: String,
        language: Option<String>,
        reason: String,
    },

    #[error("Malformed caption segment at index {index}: {reason}")]
    MalformedSegment { index: usize, reason: String },

    #[error("Invalid search query: {0}")]
    InvalidQuery(String),

    #[error("Invalid timestamp offset: {0} (must be a non-negative number of seconds)")]
    InvalidOffset(f64),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("YOUTUBE_API_KEY is not set. Set it with: export YOUTUBE_API_KEY='...' or add api_key to the [youtube] config section")]
    MissingApiKey,

    #[error("YouTube API error: {0}")]
    YoutubeApi(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

fn language_suffix(language: &Option<String>) -> String {
    language
        .as_deref()
        .map(|lang| format!(" (language: {})", lang))
        .unwrap_or_default()
}

/// Result type alias for Tubecap operations.
pub type Result<T> = std::result::Result<T, TubecapError>;
