//! Case-insensitive substring search within a transcript.

use super::models::{SearchMatch, SearchResult, Transcript};
use crate::error::{Result, TubecapError};

/// Default number of neighbouring segments shown on each side of a match.
pub const DEFAULT_CONTEXT_WINDOW: usize = 1;

/// Search options.
#[derive(Debug, Clone, Copy)]
pub struct SearchOptions {
    /// Segments of context to include before and after each match.
    pub context_window: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            context_window: DEFAULT_CONTEXT_WINDOW,
        }
    }
}

impl SearchOptions {
    pub fn with_context_window(mut self, context_window: usize) -> Self {
        self.context_window = context_window;
        self
    }
}

/// Find every segment whose text contains `query`, ignoring case.
///
/// Each matching segment produces exactly one [`SearchMatch`], however many
/// times the query occurs in it. Matches come back in segment order.
pub fn search(transcript: &Transcript, query: &str, options: SearchOptions) -> Result<SearchResult> {
    validate_query(query)?;

    let needle = query.to_lowercase();
    let segments = &transcript.segments;
    let window = options.context_window;

    let matches = segments
        .iter()
        .enumerate()
        .filter(|(_, segment)| segment.text.to_lowercase().contains(&needle))
        .map(|(index, segment)| {
            let before_start = index.saturating_sub(window);
            let after_end = index.saturating_add(1).saturating_add(window).min(segments.len());

            SearchMatch {
                segment: segment.clone(),
                index,
                context_before: segments[before_start..index].to_vec(),
                context_after: segments[index + 1..after_end].to_vec(),
            }
        })
        .collect();

    Ok(SearchResult::new(transcript.video_id.clone(), query, matches))
}

/// Reject empty and whitespace-only queries.
pub fn validate_query(query: &str) -> Result<()> {
    if query.trim().is_empty() {
        return Err(TubecapError::InvalidQuery(
            "query must contain at least one non-whitespace character".to_string(),
        ));
    }
    Ok(())
}
