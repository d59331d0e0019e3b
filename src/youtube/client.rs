//! YouTube Data API v3 client.

use super::cleaners::{
    clean_items, ChannelSummary, PlaylistEntry, PlaylistSummary, SearchItem, VideoSummary,
};
use super::resolve_video_id;
use crate::config::YoutubeSettings;
use crate::error::{Result, TubecapError};
use crate::http::create_client;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::{debug, instrument};
use url::Url;

/// Largest page the Data API returns.
pub const MAX_RESULTS_LIMIT: u32 = 50;

const VIDEO_PARTS: &str = "snippet,contentDetails,statistics";

/// Clamp a requested result count to what the API accepts.
pub fn clamp_max_results(requested: Option<u32>, default: u32) -> u32 {
    requested.unwrap_or(default).clamp(1, MAX_RESULTS_LIMIT)
}

/// Read-only client for videos, channels and playlists.
pub struct YoutubeClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    default_max_results: u32,
}

impl YoutubeClient {
    /// Create a client. A missing API key is only reported when a request is made.
    pub fn new(settings: &YoutubeSettings) -> Result<Self> {
        Ok(Self {
            client: create_client(settings)?,
            base_url: settings.api_base_url.trim_end_matches('/').to_string(),
            api_key: settings.api_key(),
            default_max_results: settings.default_max_results,
        })
    }

    /// Whether an API key is configured.
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Build the request URL for an API resource.
    fn request_url(&self, resource: &str, params: &[(&str, String)]) -> Result<Url> {
        let key = self.api_key.as_deref().ok_or(TubecapError::MissingApiKey)?;

        let mut url = Url::parse(&format!("{}/{}", self.base_url, resource))
            .map_err(|e| TubecapError::Config(format!("Invalid API base URL: {}", e)))?;
        url.query_pairs_mut()
            .extend_pairs(params.iter().map(|(k, v)| (*k, v.as_str())))
            .append_pair("key", key);
        Ok(url)
    }

    /// GET a resource. `Ok(None)` means the API answered 404.
    async fn get_json(&self, resource: &str, params: &[(&str, String)]) -> Result<Option<Value>> {
        let url = self.request_url(resource, params)?;
        debug!("GET {}", resource);

        let response = self.client.get(url).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !status.is_success() {
            // Error bodies are JSON from the API but may be HTML from a proxy.
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<Value>(&body)
                .ok()
                .and_then(|b| b.pointer("/error/message").and_then(Value::as_str).map(str::to_string))
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());
            return Err(TubecapError::YoutubeApi(format!("{} ({})", message, status)));
        }

        Ok(Some(response.json().await?))
    }

    async fn get_first<T>(
        &self,
        resource: &str,
        params: &[(&str, String)],
        clean: impl Fn(&Value) -> Option<T>,
    ) -> Result<Option<T>> {
        let Some(body) = self.get_json(resource, params).await? else {
            return Ok(None);
        };
        Ok(clean_items(&body, clean).into_iter().next())
    }

    async fn get_list<T>(
        &self,
        resource: &str,
        params: &[(&str, String)],
        clean: impl Fn(&Value) -> Option<T>,
    ) -> Result<Vec<T>> {
        Ok(self
            .get_json(resource, params)
            .await?
            .map(|body| clean_items(&body, clean))
            .unwrap_or_default())
    }

    fn max_results(&self, requested: Option<u32>) -> String {
        clamp_max_results(requested, self.default_max_results).to_string()
    }

    /// Look up a video. Unknown IDs give `None`.
    #[instrument(skip(self))]
    pub async fn get_video(&self, video_id: &str, parts: Option<&[String]>) -> Result<Option<VideoSummary>> {
        let parts = parts
            .filter(|p| !p.is_empty())
            .map(|p| p.join(","))
            .unwrap_or_else(|| VIDEO_PARTS.to_string());

        self.get_first(
            "videos",
            &[("part", parts), ("id", resolve_video_id(video_id)?)],
            VideoSummary::from_resource,
        )
        .await
    }

    /// Search for videos.
    #[instrument(skip(self))]
    pub async fn search_videos(&self, query: &str, max_results: Option<u32>) -> Result<Vec<SearchItem>> {
        if query.trim().is_empty() {
            return Err(TubecapError::InvalidInput("search query must not be empty".to_string()));
        }

        self.get_list(
            "search",
            &[
                ("part", "snippet".to_string()),
                ("type", "video".to_string()),
                ("q", query.to_string()),
                ("maxResults", self.max_results(max_results)),
            ],
            SearchItem::from_resource,
        )
        .await
    }

    /// Look up a channel. Unknown IDs give `None`.
    #[instrument(skip(self))]
    pub async fn get_channel(&self, channel_id: &str) -> Result<Option<ChannelSummary>> {
        self.get_first(
            "channels",
            &[("part", "snippet,statistics".to_string()), ("id", channel_id.trim().to_string())],
            ChannelSummary::from_resource,
        )
        .await
    }

    /// Latest videos of a channel, newest first.
    #[instrument(skip(self))]
    pub async fn list_channel_videos(&self, channel_id: &str, max_results: Option<u32>) -> Result<Vec<SearchItem>> {
        self.get_list(
            "search",
            &[
                ("part", "snippet".to_string()),
                ("channelId", channel_id.trim().to_string()),
                ("type", "video".to_string()),
                ("order", "date".to_string()),
                ("maxResults", self.max_results(max_results)),
            ],
            SearchItem::from_resource,
        )
        .await
    }

    /// Look up a playlist. Unknown IDs give `None`.
    #[instrument(skip(self))]
    pub async fn get_playlist(&self, playlist_id: &str) -> Result<Option<PlaylistSummary>> {
        self.get_first(
            "playlists",
            &[("part", "snippet,contentDetails".to_string()), ("id", playlist_id.trim().to_string())],
            PlaylistSummary::from_resource,
        )
        .await
    }

    /// Videos in a playlist, in playlist order.
    #[instrument(skip(self))]
    pub async fn get_playlist_items(&self, playlist_id: &str, max_results: Option<u32>) -> Result<Vec<PlaylistEntry>> {
        self.get_list(
            "playlistItems",
            &[
                ("part", "snippet".to_string()),
                ("playlistId", playlist_id.trim().to_string()),
                ("maxResults", self.max_results(max_results)),
            ],
            PlaylistEntry::from_resource,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::testing::{serve, Route};

    fn settings_with_key(key: Option<&str>) -> YoutubeSettings {
        YoutubeSettings {
            api_key: key.map(str::to_string),
            api_base_url: "https://api.example.com/youtube/v3/".to_string(),
            ..YoutubeSettings::default()
        }
    }

    fn client(key: Option<&str>) -> YoutubeClient {
        let mut client = YoutubeClient::new(&settings_with_key(key)).unwrap();
        // Keep the environment out of these tests.
        client.api_key = key.map(str::to_string);
        client
    }

    #[test]
    fn test_clamp_max_results() {
        assert_eq!(clamp_max_results(None, 10), 10);
        assert_eq!(clamp_max_results(Some(0), 10), 1);
        assert_eq!(clamp_max_results(Some(500), 10), 50);
        assert_eq!(clamp_max_results(Some(25), 10), 25);
    }

    #[test]
    fn test_request_url() {
        let client = client(Some("secret"));
        let url = client
            .request_url("search", &[("q", "rust & tokio".to_string()), ("maxResults", "5".to_string())])
            .unwrap();

        assert_eq!(url.path(), "/youtube/v3/search");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("q".to_string(), "rust & tokio".to_string()),
                ("maxResults".to_string(), "5".to_string()),
                ("key".to_string(), "secret".to_string()),
            ]
        );
    }

    #[test]
    fn test_missing_key_reported_on_use() {
        let client = client(None);
        assert!(!client.has_api_key());
        assert!(matches!(
            client.request_url("videos", &[]),
            Err(TubecapError::MissingApiKey)
        ));
    }

    async fn local_client(routes: Vec<Route>) -> YoutubeClient {
        let base = serve(routes).await;
        let mut client = YoutubeClient::new(&YoutubeSettings {
            api_base_url: format!("{}/youtube/v3", base),
            ..YoutubeSettings::default()
        })
        .unwrap();
        client.api_key = Some("secret".to_string());
        client
    }

    #[tokio::test]
    async fn test_not_found_is_none() {
        let client = local_client(Vec::new()).await;

        assert!(client.get_video("dQw4w9WgXcQ", None).await.unwrap().is_none());
        assert!(client.get_playlist_items("PL123", None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_items_is_none() {
        let client = local_client(vec![
            Route::new("/youtube/v3/videos", 200, "application/json", r#"{"items":[]}"#),
            Route::new("/youtube/v3/channels", 200, "application/json", r#"{"kind":"youtube#channelListResponse"}"#),
        ])
        .await;

        assert!(client.get_video("dQw4w9WgXcQ", None).await.unwrap().is_none());
        assert!(client.get_channel("UC123").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_api_errors_keep_status() {
        let client = local_client(vec![
            Route::new(
                "/youtube/v3/videos",
                403,
                "application/json",
                r#"{"error":{"code":403,"message":"The request cannot be completed because you have exceeded your quota."}}"#,
            ),
            Route::new("/youtube/v3/playlists", 500, "text/html", "<html>oops</html>"),
        ])
        .await;

        match client.get_video("dQw4w9WgXcQ", None).await {
            Err(TubecapError::YoutubeApi(message)) => {
                assert!(message.contains("exceeded your quota"));
                assert!(message.contains("403"));
            }
            other => panic!("unexpected result: {:?}", other),
        }

        match client.get_playlist("PL123").await {
            Err(TubecapError::YoutubeApi(message)) => {
                assert_eq!(message, "Internal Server Error (500 Internal Server Error)");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_search_query_rejected() {
        let client = client(Some("secret"));
        assert!(matches!(
            client.search_videos("  ", None).await,
            Err(TubecapError::InvalidInput(_))
        ));
    }
}
