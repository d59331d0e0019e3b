//! Transcript command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::transcript::{format_timestamp, TranscriptArgs, TranscriptService};
use anyhow::Result;

/// Run the transcript command.
pub async fn run_transcript(
    video: &str,
    language: Option<String>,
    timestamps: bool,
    settings: Settings,
) -> Result<()> {
    preflight::check(Operation::Transcript, &settings.youtube)?;

    let service = TranscriptService::from_settings(&settings)?;
    let mut args = TranscriptArgs::new(video);
    if let Some(language) = language {
        args = args.with_language(language);
    }

    let spinner = Output::spinner("Fetching transcript...");

    if timestamps {
        let result = service.get_timestamped_transcript(&args).await;
        spinner.finish_and_clear();
        let transcript = result?;
        Output::success(&format!("{} segments", transcript.segments.len()));
        println!("{}", transcript.to_lines());
    } else {
        let result = service.get_transcript(&args).await;
        spinner.finish_and_clear();
        let transcript = result?;
        if transcript.is_empty() {
            Output::warning("Transcript has no segments.");
        } else {
            Output::success(&format!(
                "{} segments, {} long",
                transcript.len(),
                format_timestamp(transcript.duration_seconds())?
            ));
        }
        println!("{}", serde_json::to_string_pretty(&transcript)?);
    }

    Ok(())
}
