//! CLI output formatting utilities.

use crate::transcript::{format_timestamp, SearchMatch, TranscriptSegment};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Output helper for CLI formatting.
pub struct Output;

impl Output {
    /// Print a success message.
    pub fn success(msg: &str) {
        eprintln!("{} {}", style(">>").green().bold(), msg);
    }

    /// Print a warning message.
    pub fn warning(msg: &str) {
        eprintln!("{} {}", style(">>").yellow().bold(), msg);
    }

    /// Print an error message.
    pub fn error(msg: &str) {
        eprintln!("{} {}", style(">>").red().bold(), msg);
    }

    /// Print a search match with its context lines.
    pub fn search_match(m: &SearchMatch) {
        println!();
        for segment in &m.context_before {
            println!("   {}", style(segment_line(segment)).dim());
        }
        println!("{} {}", style(">>").green(), highlight_line(&m.segment));
        for segment in &m.context_after {
            println!("   {}", style(segment_line(segment)).dim());
        }
    }

    /// Create a spinner.
    pub fn spinner(msg: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }
}

fn display_time(segment: &TranscriptSegment) -> String {
    format_timestamp(segment.start_seconds).unwrap_or_else(|_| "--:--".to_string())
}

/// Format a segment as "[MM:SS] text".
fn segment_line(segment: &TranscriptSegment) -> String {
    format!("[{}] {}", display_time(segment), content_preview(&segment.text, 200))
}

fn highlight_line(segment: &TranscriptSegment) -> String {
    format!(
        "[{}] {}",
        style(display_time(segment)).cyan(),
        style(content_preview(&segment.text, 200)).bold()
    )
}

/// Truncate content with ellipsis.
fn content_preview(content: &str, max_chars: usize) -> String {
    let content = content.replace('\n', " ");
    if content.chars().count() <= max_chars {
        content
    } else {
        format!("{}...", content.chars().take(max_chars).collect::<String>())
    }
}
