//! Transcript service: the entry point used by the tool layer.
//!
//! Every call runs the same short pipeline (fetch, normalize, then search or
//! timestamp) and keeps nothing between calls.

use super::models::{SearchResult, TimestampedTranscript, Transcript};
use super::normalize::normalize;
use super::search::{search, validate_query, SearchOptions, DEFAULT_CONTEXT_WINDOW};
use super::timestamp::timestamp_transcript;
use crate::captions::{CaptionError, CaptionSource, YoutubeCaptionSource};
use crate::config::Settings;
use crate::error::{Result, TubecapError};
use crate::youtube::resolve_video_id;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Arguments for fetching a transcript.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptArgs {
    pub video_id: String,
    #[serde(default)]
    pub language: Option<String>,
}

impl TranscriptArgs {
    pub fn new(video_id: impl Into<String>) -> Self {
        Self {
            video_id: video_id.into(),
            language: None,
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }
}

/// Arguments for searching a transcript.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchTranscriptArgs {
    pub video_id: String,
    pub query: String,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub context_window: Option<usize>,
}

impl SearchTranscriptArgs {
    pub fn new(video_id: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            video_id: video_id.into(),
            query: query.into(),
            language: None,
            context_window: None,
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_context_window(mut self, context_window: usize) -> Self {
        self.context_window = Some(context_window);
        self
    }
}

/// Transcript retrieval, search and timestamping over a caption source.
pub struct TranscriptService {
    source: Arc<dyn CaptionSource>,
    default_language: Option<String>,
    context_window: usize,
}

impl TranscriptService {
    /// Create a service over any caption source.
    pub fn new(source: Arc<dyn CaptionSource>) -> Self {
        Self {
            source,
            default_language: None,
            context_window: DEFAULT_CONTEXT_WINDOW,
        }
    }

    /// Create a service fetching captions from YouTube.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let source = YoutubeCaptionSource::new(&settings.youtube)?;
        Ok(Self::new(Arc::new(source))
            .with_default_language(settings.youtube.default_language.clone())
            .with_context_window(settings.transcript.context_window))
    }

    /// Language requested when a call names none.
    pub fn with_default_language(mut self, language: Option<String>) -> Self {
        self.default_language = language;
        self
    }

    /// Context window used when a search names none.
    pub fn with_context_window(mut self, context_window: usize) -> Self {
        self.context_window = context_window;
        self
    }

    /// Fetch and normalize the transcript of a video.
    ///
    /// Fails with [`TubecapError::TranscriptUnavailable`] when the source has
    /// no captions; absence is never reported as an empty transcript.
    #[instrument(skip(self, args), fields(video_id = %args.video_id))]
    pub async fn get_transcript(&self, args: &TranscriptArgs) -> Result<Transcript> {
        let video_id = resolve_video_id(&args.video_id)?;
        let language = args.language.as_deref().or(self.default_language.as_deref());

        let raw = self
            .source
            .fetch(&video_id, language)
            .await
            .map_err(|e| unavailable(&video_id, language, e))?;

        let transcript = normalize(&video_id, raw)?;
        debug!(segments = transcript.len(), "Transcript ready");
        Ok(transcript)
    }

    /// Fetch a transcript and search it for `query`.
    #[instrument(skip(self, args), fields(video_id = %args.video_id, query = %args.query))]
    pub async fn search_transcript(&self, args: &SearchTranscriptArgs) -> Result<SearchResult> {
        validate_query(&args.query)?;

        let transcript = self
            .get_transcript(&TranscriptArgs {
                video_id: args.video_id.clone(),
                language: args.language.clone(),
            })
            .await?;

        let options = SearchOptions::default()
            .with_context_window(args.context_window.unwrap_or(self.context_window));
        search(&transcript, &args.query, options)
    }

    /// Fetch a transcript with a display time on every segment.
    #[instrument(skip(self, args), fields(video_id = %args.video_id))]
    pub async fn get_timestamped_transcript(&self, args: &TranscriptArgs) -> Result<TimestampedTranscript> {
        let transcript = self.get_transcript(args).await?;
        timestamp_transcript(transcript)
    }
}

fn unavailable(video_id: &str, language: Option<&str>, error: CaptionError) -> TubecapError {
    TubecapError::TranscriptUnavailable {
        video_id: video_id.to_string(),
        language: language.map(str::to_string),
        reason: error.to_string(),
    }
}
