//! Search command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::transcript::{SearchTranscriptArgs, TranscriptService};
use anyhow::Result;

/// Run the search command.
pub async fn run_search(
    video: &str,
    query: &str,
    language: Option<String>,
    window: Option<usize>,
    settings: Settings,
) -> Result<()> {
    preflight::check(Operation::Transcript, &settings.youtube)?;

    let service = TranscriptService::from_settings(&settings)?;
    let mut args = SearchTranscriptArgs::new(video, query);
    if let Some(language) = language {
        args = args.with_language(language);
    }
    if let Some(window) = window {
        args = args.with_context_window(window);
    }

    let spinner = Output::spinner("Searching transcript...");
    let result = service.search_transcript(&args).await;
    spinner.finish_and_clear();

    match result {
        Ok(result) => {
            if result.matches.is_empty() {
                Output::warning(&format!("No segments match \"{}\".", result.query));
            } else {
                Output::success(&format!("Found {} matches", result.total_matches));
                for m in &result.matches {
                    Output::search_match(m);
                }
            }
        }
        Err(e) => {
            Output::error(&format!("Search failed: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}
