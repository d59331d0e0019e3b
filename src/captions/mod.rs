//! Caption sources.
//!
//! A caption source fetches the raw caption payload for a video. The payload
//! is left untyped ([`RawCaptionResult`]); shaping it into a transcript is the
//! job of [`crate::transcript::normalize`].

mod memory;
mod youtube;

pub use memory::MemoryCaptionSource;
pub use youtube::YoutubeCaptionSource;

use async_trait::async_trait;
use thiserror::Error;

/// Raw caption payload as delivered by a source.
pub type RawCaptionResult = serde_json::Value;

/// Errors reported by caption sources.
#[derive(Error, Debug)]
pub enum CaptionError {
    #[error("No captions available{}", requested_language(.language))]
    NotAvailable {
        video_id: String,
        language: Option<String>,
    },

    #[error("Video is unavailable: {0}")]
    Unavailable(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to parse caption data: {0}")]
    Parse(String),
}

fn requested_language(language: &Option<String>) -> String {
    language
        .as_deref()
        .map(|lang| format!(" in language '{}'", lang))
        .unwrap_or_default()
}

/// Trait for caption providers.
#[async_trait]
pub trait CaptionSource: Send + Sync {
    /// Fetch captions for a video, optionally preferring a language.
    ///
    /// The returned payload may be in another language than requested when no
    /// exact match exists.
    async fn fetch(
        &self,
        video_id: &str,
        language: Option<&str>,
    ) -> std::result::Result<RawCaptionResult, CaptionError>;
}
