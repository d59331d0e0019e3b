//! Configuration module for Tubecap.
//!
//! Handles loading and managing application settings.

mod settings;

pub use settings::{GeneralSettings, Settings, TranscriptSettings, YoutubeSettings, API_KEY_ENV};
