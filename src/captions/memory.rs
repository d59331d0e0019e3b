//! In-memory caption source.
//!
//! Useful for testing and offline use.

use super::{CaptionError, CaptionSource, RawCaptionResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

/// Caption source backed by canned payloads.
///
/// Payloads are keyed by video ID and an optional language. A request for a
/// language without its own entry falls back to the video's default payload.
pub struct MemoryCaptionSource {
    payloads: RwLock<HashMap<(String, Option<String>), RawCaptionResult>>,
}

impl MemoryCaptionSource {
    /// Create an empty caption source.
    pub fn new() -> Self {
        Self {
            payloads: RwLock::new(HashMap::new()),
        }
    }

    /// Register the default payload for a video.
    pub fn insert(&self, video_id: &str, payload: RawCaptionResult) {
        self.insert_for_language(video_id, None, payload);
    }

    /// Register a payload for a specific language.
    pub fn insert_for_language(&self, video_id: &str, language: Option<&str>, payload: RawCaptionResult) {
        let mut payloads = self.payloads.write().unwrap();
        payloads.insert((video_id.to_string(), language.map(str::to_string)), payload);
    }

    /// Builder-style variant of [`insert`](Self::insert).
    pub fn with(self, video_id: &str, payload: RawCaptionResult) -> Self {
        self.insert(video_id, payload);
        self
    }
}

impl Default for MemoryCaptionSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CaptionSource for MemoryCaptionSource {
    async fn fetch(
        &self,
        video_id: &str,
        language: Option<&str>,
    ) -> Result<RawCaptionResult, CaptionError> {
        let payloads = self.payloads.read().unwrap();

        let exact = language.and_then(|lang| payloads.get(&(video_id.to_string(), Some(lang.to_string()))));

        exact
            .or_else(|| payloads.get(&(video_id.to_string(), None)))
            .cloned()
            .ok_or_else(|| CaptionError::NotAvailable {
                video_id: video_id.to_string(),
                language: language.map(str::to_string),
            })
    }
}
