//! Video command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::youtube::{resolve_video_id, YoutubeClient};
use anyhow::Result;

/// Run the video command.
pub async fn run_video(video: &str, settings: Settings) -> Result<()> {
    preflight::check(Operation::Metadata, &settings.youtube)?;

    let video_id = resolve_video_id(video)?;
    let client = YoutubeClient::new(&settings.youtube)?;

    let spinner = Output::spinner("Fetching video details...");
    let result = client.get_video(&video_id, None).await;
    spinner.finish_and_clear();

    match result? {
        Some(summary) => println!("{}", serde_json::to_string_pretty(&summary)?),
        None => Output::warning(&format!("Video {} not found.", video_id)),
    }

    Ok(())
}
