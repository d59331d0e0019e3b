//! Compact records built from YouTube Data API resources.
//!
//! API resources carry far more than a tool caller needs. These records keep
//! the useful fields, truncate long descriptions and parse the string-encoded
//! counters.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

const LONG_DESCRIPTION_CHARS: usize = 300;
const SHORT_DESCRIPTION_CHARS: usize = 200;
const MAX_TAGS: usize = 5;

/// A video with its statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSummary {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// ISO 8601 duration, e.g. `PT3M33S`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub views: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub likes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl VideoSummary {
    pub fn from_resource(video: &Value) -> Option<Self> {
        let id = string(video, "/id")?;

        Some(Self {
            id,
            title: string(video, "/snippet/title"),
            channel: string(video, "/snippet/channelTitle"),
            channel_id: string(video, "/snippet/channelId"),
            published: timestamp(video, "/snippet/publishedAt"),
            description: description(video, LONG_DESCRIPTION_CHARS),
            duration: string(video, "/contentDetails/duration"),
            views: count(video, "/statistics/viewCount"),
            likes: count(video, "/statistics/likeCount"),
            comments: count(video, "/statistics/commentCount"),
            tags: video.pointer("/snippet/tags").and_then(Value::as_array).map(|tags| {
                tags.iter()
                    .filter_map(Value::as_str)
                    .take(MAX_TAGS)
                    .map(str::to_string)
                    .collect()
            }),
        })
    }
}

/// A search hit (video).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchItem {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl SearchItem {
    pub fn from_resource(item: &Value) -> Option<Self> {
        // Search results nest the ID as `{ kind, videoId }`.
        let id = string(item, "/id/videoId").or_else(|| string(item, "/id"))?;

        Some(Self {
            id,
            title: string(item, "/snippet/title"),
            channel: string(item, "/snippet/channelTitle"),
            channel_id: string(item, "/snippet/channelId"),
            published: timestamp(item, "/snippet/publishedAt"),
            description: description(item, SHORT_DESCRIPTION_CHARS),
        })
    }
}

/// A channel with its statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelSummary {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscribers: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub videos: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub views: Option<u64>,
}

impl ChannelSummary {
    pub fn from_resource(channel: &Value) -> Option<Self> {
        let id = string(channel, "/id")?;

        Some(Self {
            id,
            title: string(channel, "/snippet/title"),
            description: description(channel, LONG_DESCRIPTION_CHARS),
            custom_url: string(channel, "/snippet/customUrl"),
            published: timestamp(channel, "/snippet/publishedAt"),
            country: string(channel, "/snippet/country"),
            subscribers: count(channel, "/statistics/subscriberCount"),
            videos: count(channel, "/statistics/videoCount"),
            views: count(channel, "/statistics/viewCount"),
        })
    }
}

/// A playlist.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistSummary {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_count: Option<u64>,
}

impl PlaylistSummary {
    pub fn from_resource(playlist: &Value) -> Option<Self> {
        let id = string(playlist, "/id")?;

        Some(Self {
            id,
            title: string(playlist, "/snippet/title"),
            channel: string(playlist, "/snippet/channelTitle"),
            channel_id: string(playlist, "/snippet/channelId"),
            description: description(playlist, SHORT_DESCRIPTION_CHARS),
            published: timestamp(playlist, "/snippet/publishedAt"),
            item_count: count(playlist, "/contentDetails/itemCount"),
        })
    }
}

/// A video inside a playlist.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistEntry {
    /// ID of the referenced video (absent for deleted/private entries).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<DateTime<Utc>>,
}

impl PlaylistEntry {
    pub fn from_resource(item: &Value) -> Option<Self> {
        if !item.is_object() {
            return None;
        }

        Some(Self {
            id: string(item, "/snippet/resourceId/videoId"),
            title: string(item, "/snippet/title"),
            channel: string(item, "/snippet/videoOwnerChannelTitle"),
            position: count(item, "/snippet/position"),
            published: timestamp(item, "/snippet/publishedAt"),
        })
    }
}

/// Clean every item of an API list response, dropping unusable ones.
pub(crate) fn clean_items<T>(response: &Value, clean: impl Fn(&Value) -> Option<T>) -> Vec<T> {
    response
        .get("items")
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(clean).collect())
        .unwrap_or_default()
}

fn string(value: &Value, pointer: &str) -> Option<String> {
    value.pointer(pointer).and_then(Value::as_str).map(str::to_string)
}

fn description(value: &Value, max_chars: usize) -> Option<String> {
    value
        .pointer("/snippet/description")
        .and_then(Value::as_str)
        .map(|d| d.chars().take(max_chars).collect())
}

/// Counters arrive as decimal strings (`"1234"`), occasionally as numbers.
fn count(value: &Value, pointer: &str) -> Option<u64> {
    match value.pointer(pointer)? {
        Value::String(s) => s.parse().ok(),
        Value::Number(n) => n.as_u64(),
        _ => None,
    }
}

fn timestamp(value: &Value, pointer: &str) -> Option<DateTime<Utc>> {
    value
        .pointer(pointer)
        .and_then(Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_clean_video() {
        let video = json!({
            "kind": "youtube#video",
            "etag": "abc",
            "id": "dQw4w9WgXcQ",
            "snippet": {
                "title": "Never Gonna Give You Up",
                "channelTitle": "Rick Astley",
                "channelId": "UCuAXFkgsw1L7xaCfnd5JJOw",
                "publishedAt": "2009-10-25T06:57:33Z",
                "description": "x".repeat(500),
                "tags": ["a", "b", "c", "d", "e", "f", "g"],
                "thumbnails": { "default": { "url": "https://i.ytimg.com/x.jpg" } }
            },
            "contentDetails": { "duration": "PT3M33S" },
            "statistics": { "viewCount": "1500000000", "likeCount": "not a number" }
        });

        let summary = VideoSummary::from_resource(&video).unwrap();
        assert_eq!(summary.id, "dQw4w9WgXcQ");
        assert_eq!(summary.channel.as_deref(), Some("Rick Astley"));
        assert_eq!(summary.description.as_ref().map(|d| d.len()), Some(300));
        assert_eq!(summary.tags.as_ref().map(Vec::len), Some(5));
        assert_eq!(summary.views, Some(1_500_000_000));
        assert_eq!(summary.likes, None);
        assert_eq!(summary.comments, None);
        assert_eq!(summary.published, Some(Utc.with_ymd_and_hms(2009, 10, 25, 6, 57, 33).unwrap()));

        let json = serde_json::to_value(&summary).unwrap();
        assert!(json.get("likes").is_none());
        assert!(json.get("etag").is_none());
        assert_eq!(json["channelId"], "UCuAXFkgsw1L7xaCfnd5JJOw");
    }

    #[test]
    fn test_description_truncates_on_char_boundary() {
        let video = json!({ "id": "x", "snippet": { "description": "é".repeat(400) } });
        let summary = VideoSummary::from_resource(&video).unwrap();
        assert_eq!(summary.description.unwrap().chars().count(), 300);
    }

    #[test]
    fn test_clean_search_items() {
        let response = json!({
            "items": [
                { "id": { "kind": "youtube#video", "videoId": "abc" }, "snippet": { "title": "One", "description": "y".repeat(250) } },
                { "id": { "kind": "youtube#channel", "channelId": "UC1" } },
                null
            ]
        });

        let items = clean_items(&response, SearchItem::from_resource);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "abc");
        assert_eq!(items[0].description.as_ref().map(|d| d.len()), Some(200));
    }

    #[test]
    fn test_clean_channel_and_playlist() {
        let channel = json!({
            "id": "UC1",
            "snippet": { "title": "Chan", "customUrl": "@chan", "country": "NO" },
            "statistics": { "subscriberCount": "42", "videoCount": "7", "viewCount": "1000" }
        });
        let summary = ChannelSummary::from_resource(&channel).unwrap();
        assert_eq!(summary.subscribers, Some(42));
        assert_eq!(summary.custom_url.as_deref(), Some("@chan"));

        let playlist = json!({ "id": "PL1", "snippet": { "title": "List" }, "contentDetails": { "itemCount": 12 } });
        let summary = PlaylistSummary::from_resource(&playlist).unwrap();
        assert_eq!(summary.item_count, Some(12));
    }

    #[test]
    fn test_clean_playlist_entries() {
        let response = json!({
            "items": [
                { "snippet": { "title": "First", "position": 0, "resourceId": { "videoId": "v1" }, "videoOwnerChannelTitle": "Owner" } },
                { "snippet": { "title": "Deleted video", "position": 1, "resourceId": {} } }
            ]
        });

        let entries = clean_items(&response, PlaylistEntry::from_resource);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].id.as_deref(), Some("v1"));
        assert_eq!(entries[1].id, None);
        assert_eq!(entries[1].position, Some(1));
    }

    #[test]
    fn test_missing_items_is_empty() {
        assert!(clean_items(&json!({}), SearchItem::from_resource).is_empty());
        assert!(VideoSummary::from_resource(&Value::Null).is_none());
    }
}
