//! Transcript retrieval, normalization and search.
//!
//! The [`TranscriptService`] fetches raw captions from a
//! [`CaptionSource`](crate::captions::CaptionSource), normalizes them into a
//! [`Transcript`], and optionally searches it or attaches display timestamps.

mod models;
mod normalize;
mod search;
mod service;
mod timestamp;

pub use models::{
    SearchMatch, SearchResult, TimestampedSegment, TimestampedTranscript, Transcript, TranscriptSegment,
};
pub use normalize::normalize;
pub use search::{search, validate_query, SearchOptions, DEFAULT_CONTEXT_WINDOW};
pub use service::{SearchTranscriptArgs, TranscriptArgs, TranscriptService};
pub use timestamp::{format_timestamp, timestamp_transcript};
