//! MCP tool definitions for Tubecap.

use super::protocol::Tool;
use serde::Deserialize;
use serde_json::{json, Value};

pub const GET_VIDEO: &str = "videos_getVideo";
pub const SEARCH_VIDEOS: &str = "videos_searchVideos";
pub const GET_TRANSCRIPT: &str = "transcripts_getTranscript";
pub const SEARCH_TRANSCRIPT: &str = "transcripts_searchTranscript";
pub const GET_TIMESTAMPED_TRANSCRIPT: &str = "transcripts_getTimestampedTranscript";
pub const GET_CHANNEL: &str = "channels_getChannel";
pub const LIST_CHANNEL_VIDEOS: &str = "channels_listVideos";
pub const GET_PLAYLIST: &str = "playlists_getPlaylist";
pub const GET_PLAYLIST_ITEMS: &str = "playlists_getPlaylistItems";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetVideoArgs {
    pub video_id: String,
    #[serde(default)]
    pub parts: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchVideosArgs {
    pub query: String,
    #[serde(default)]
    pub max_results: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelArgs {
    pub channel_id: String,
    #[serde(default)]
    pub max_results: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistArgs {
    pub playlist_id: String,
    #[serde(default)]
    pub max_results: Option<u32>,
}

fn video_id_property() -> Value {
    json!({
        "type": "string",
        "description": "The YouTube video ID or URL"
    })
}

fn language_property() -> Value {
    json!({
        "type": "string",
        "description": "Language code for the transcript (e.g. 'en'). Falls back to another language if unavailable."
    })
}

fn max_results_property() -> Value {
    json!({
        "type": "integer",
        "description": "Maximum number of results to return (1-50)",
        "minimum": 1,
        "maximum": 50
    })
}

/// Get all available tools.
pub fn get_tools() -> Vec<Tool> {
    vec![
        Tool {
            name: GET_VIDEO.to_string(),
            description: "Get detailed information about a YouTube video".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "videoId": video_id_property(),
                    "parts": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Parts of the video to retrieve (default: snippet, contentDetails, statistics)"
                    }
                },
                "required": ["videoId"]
            }),
        },
        Tool {
            name: SEARCH_VIDEOS.to_string(),
            description: "Search for videos on YouTube".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "query": { "type": "string", "description": "Search query" },
                    "maxResults": max_results_property()
                },
                "required": ["query"]
            }),
        },
        Tool {
            name: GET_TRANSCRIPT.to_string(),
            description: "Get the transcript of a YouTube video. Returns caption segments with start \
                times and durations in seconds."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "videoId": video_id_property(),
                    "language": language_property()
                },
                "required": ["videoId"]
            }),
        },
        Tool {
            name: SEARCH_TRANSCRIPT.to_string(),
            description: "Search within the transcript of a YouTube video (case-insensitive). \
                Returns every matching caption segment with neighbouring segments for context."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "videoId": video_id_property(),
                    "query": { "type": "string", "description": "Text to search for" },
                    "language": language_property(),
                    "contextWindow": {
                        "type": "integer",
                        "description": "Number of segments to include before and after each match",
                        "default": 1,
                        "minimum": 0
                    }
                },
                "required": ["videoId", "query"]
            }),
        },
        Tool {
            name: GET_TIMESTAMPED_TRANSCRIPT.to_string(),
            description: "Get the transcript of a YouTube video with a formatted timestamp \
                (MM:SS or HH:MM:SS) on every segment."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "videoId": video_id_property(),
                    "language": language_property()
                },
                "required": ["videoId"]
            }),
        },
        Tool {
            name: GET_CHANNEL.to_string(),
            description: "Get information about a YouTube channel".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "channelId": { "type": "string", "description": "The YouTube channel ID" }
                },
                "required": ["channelId"]
            }),
        },
        Tool {
            name: LIST_CHANNEL_VIDEOS.to_string(),
            description: "Get the latest videos from a specific channel".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "channelId": { "type": "string", "description": "The YouTube channel ID" },
                    "maxResults": max_results_property()
                },
                "required": ["channelId"]
            }),
        },
        Tool {
            name: GET_PLAYLIST.to_string(),
            description: "Get information about a YouTube playlist".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "playlistId": { "type": "string", "description": "The YouTube playlist ID" }
                },
                "required": ["playlistId"]
            }),
        },
        Tool {
            name: GET_PLAYLIST_ITEMS.to_string(),
            description: "Get videos in a YouTube playlist".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "playlistId": { "type": "string", "description": "The YouTube playlist ID" },
                    "maxResults": max_results_property()
                },
                "required": ["playlistId"]
            }),
        },
    ]
}
