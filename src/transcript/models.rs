//! Data models for transcripts and transcript search.

use serde::{Deserialize, Serialize};

/// A single caption cue in canonical form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptSegment {
    /// Caption text, exactly as the source delivered it.
    pub text: String,
    /// Start time in seconds.
    pub start_seconds: f64,
    /// Duration in seconds (0 when the source did not say).
    pub duration_seconds: f64,
}

impl TranscriptSegment {
    /// Create a new transcript segment.
    pub fn new(text: impl Into<String>, start_seconds: f64, duration_seconds: f64) -> Self {
        Self {
            text: text.into(),
            start_seconds,
            duration_seconds,
        }
    }

    /// End time of this segment in seconds.
    pub fn end_seconds(&self) -> f64 {
        self.start_seconds + self.duration_seconds
    }
}

/// The ordered caption cues of one video in one language.
///
/// Built fresh for every request and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transcript {
    /// Video ID this transcript belongs to.
    pub video_id: String,
    /// Language tag reported by the caption source, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Segments in source order.
    pub segments: Vec<TranscriptSegment>,
}

impl Transcript {
    /// Create a new transcript from segments.
    pub fn new(video_id: impl Into<String>, language: Option<String>, segments: Vec<TranscriptSegment>) -> Self {
        Self {
            video_id: video_id.into(),
            language,
            segments,
        }
    }

    /// Transcript with no segments.
    pub fn empty(video_id: impl Into<String>, language: Option<String>) -> Self {
        Self::new(video_id, language, Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// End of the last segment in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.segments
            .iter()
            .map(TranscriptSegment::end_seconds)
            .fold(0.0, f64::max)
    }
}

/// One matching segment plus its neighbours.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchMatch {
    pub segment: TranscriptSegment,
    /// Position of the segment in the transcript.
    pub index: usize,
    pub context_before: Vec<TranscriptSegment>,
    pub context_after: Vec<TranscriptSegment>,
}

/// Result of searching one transcript.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub video_id: String,
    pub query: String,
    /// Matches in segment order.
    pub matches: Vec<SearchMatch>,
    pub total_matches: usize,
}

impl SearchResult {
    /// Build a result; the match count always follows `matches`.
    pub fn new(video_id: impl Into<String>, query: impl Into<String>, matches: Vec<SearchMatch>) -> Self {
        let total_matches = matches.len();
        Self {
            video_id: video_id.into(),
            query: query.into(),
            matches,
            total_matches,
        }
    }
}

/// A segment with its start time rendered for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimestampedSegment {
    #[serde(flatten)]
    pub segment: TranscriptSegment,
    pub display_time: String,
}

/// A transcript whose segments carry display timestamps.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimestampedTranscript {
    pub video_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    pub segments: Vec<TimestampedSegment>,
}

impl TimestampedTranscript {
    /// Render as `[MM:SS] text` lines.
    pub fn to_lines(&self) -> String {
        self.segments
            .iter()
            .map(|s| format!("[{}] {}", s.display_time, s.segment.text))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
