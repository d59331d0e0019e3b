//! YouTube caption source.
//!
//! Reads the caption track list embedded in the watch page, picks a track and
//! downloads its timed-text XML.

use super::{CaptionError, CaptionSource, RawCaptionResult};
use crate::config::YoutubeSettings;
use crate::error::Result;
use crate::http::create_client;
use async_trait::async_trait;
use regex::{Captures, Regex};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::{debug, instrument, warn};
use url::Url;

/// A caption track advertised by the watch page.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CaptionTrack {
    base_url: String,
    language_code: String,
    #[serde(default)]
    kind: Option<String>,
}

/// YouTube caption source.
pub struct YoutubeCaptionSource {
    client: reqwest::Client,
    watch_base_url: String,
    cue_regex: Regex,
    paragraph_regex: Regex,
    tag_regex: Regex,
    entity_regex: Regex,
}

impl YoutubeCaptionSource {
    pub fn new(settings: &YoutubeSettings) -> Result<Self> {
        let cue_regex = Regex::new(r#"(?s)<text start="([^"]*)"(?: dur="([^"]*)")?[^>/]*(?:/>|>(.*?)</text>)"#)
            .expect("Invalid regex");
        let paragraph_regex = Regex::new(r#"(?s)<p t="(\d+)"(?: d="(\d+)")?[^>/]*(?:/>|>(.*?)</p>)"#)
            .expect("Invalid regex");
        let tag_regex = Regex::new(r"<[^>]+>").expect("Invalid regex");
        let entity_regex =
            Regex::new(r"&(#[xX][0-9a-fA-F]+|#[0-9]+|amp|lt|gt|quot|apos);").expect("Invalid regex");

        Ok(Self {
            client: create_client(settings)?,
            watch_base_url: settings.watch_base_url.trim_end_matches('/').to_string(),
            cue_regex,
            paragraph_regex,
            tag_regex,
            entity_regex,
        })
    }

    fn watch_url(&self, video_id: &str) -> std::result::Result<Url, CaptionError> {
        Url::parse_with_params(&format!("{}/watch", self.watch_base_url), &[("v", video_id)])
            .map_err(|e| CaptionError::Parse(format!("Invalid watch URL: {}", e)))
    }

    /// Resolve a track URL, which may be relative to the watch host.
    fn track_url(&self, base_url: &str) -> std::result::Result<Url, CaptionError> {
        Url::parse(base_url)
            .or_else(|_| Url::parse(&self.watch_base_url).and_then(|base| base.join(base_url)))
            .map_err(|e| CaptionError::Parse(format!("Invalid caption track URL: {}", e)))
    }

    /// Parse timed-text XML into raw cues (`text`, `offset`, `duration`).
    ///
    /// Handles the classic `<text start dur>` format (seconds) and the srv3
    /// `<p t d>` format (milliseconds).
    fn parse_cues(&self, xml: &str) -> Vec<Value> {
        let cues: Vec<Value> = self
            .cue_regex
            .captures_iter(xml)
            .map(|caps| self.cue(&caps, 1.0))
            .collect();

        if !cues.is_empty() {
            return cues;
        }

        self.paragraph_regex
            .captures_iter(xml)
            .map(|caps| self.cue(&caps, 1000.0))
            .collect()
    }

    fn cue(&self, caps: &Captures<'_>, unit: f64) -> Value {
        let mut cue = Map::new();

        // Self-closing cues have no body.
        let body = caps.get(3).map_or("", |m| m.as_str());
        let text = self.tag_regex.replace_all(body, "");
        cue.insert("text".to_string(), Value::String(self.decode_entities(&text)));

        // Unparseable timing is left out so normalization reports the cue.
        if let Some(offset) = caps[1].parse::<f64>().ok().map(|v| v / unit) {
            cue.insert("offset".to_string(), json!(offset));
        }
        if let Some(duration) = caps.get(2).and_then(|m| m.as_str().parse::<f64>().ok()) {
            cue.insert("duration".to_string(), json!(duration / unit));
        }

        Value::Object(cue)
    }

    fn decode_entities(&self, text: &str) -> String {
        let decoded = self.entity_regex.replace_all(text, |caps: &Captures<'_>| {
            let entity = &caps[1];
            match entity {
                "amp" => "&".to_string(),
                "lt" => "<".to_string(),
                "gt" => ">".to_string(),
                "quot" => "\"".to_string(),
                "apos" => "'".to_string(),
                _ => {
                    let code = if let Some(hex) = entity.strip_prefix("#x").or_else(|| entity.strip_prefix("#X")) {
                        u32::from_str_radix(hex, 16).ok()
                    } else {
                        entity[1..].parse::<u32>().ok()
                    };
                    code.and_then(char::from_u32)
                        .map(String::from)
                        .unwrap_or_else(|| caps[0].to_string())
                }
            }
        });
        // Caption XML is often double-escaped (`&amp;#39;`).
        if decoded.contains('&') && decoded != text {
            self.decode_entities(&decoded)
        } else {
            decoded.into_owned()
        }
    }
}

/// Extract the caption tracks advertised in a watch page.
///
/// Returns an empty list when the video simply has no captions.
fn extract_caption_tracks(html: &str) -> std::result::Result<Vec<CaptionTrack>, CaptionError> {
    let Some((_, after)) = html.split_once("\"captions\":") else {
        if html.contains("class=\"g-recaptcha\"") {
            return Err(CaptionError::Unavailable(
                "YouTube is receiving too many requests from this IP and now requires solving a captcha".to_string(),
            ));
        }
        if !html.contains("\"playabilityStatus\":") {
            return Err(CaptionError::Unavailable("the video is no longer available".to_string()));
        }
        return Ok(Vec::new());
    };

    let captions_json = after
        .split_once(",\"videoDetails")
        .map(|(captions, _)| captions)
        .unwrap_or(after)
        .replace('\n', "");

    let captions: Value = serde_json::from_str(&captions_json)
        .map_err(|e| CaptionError::Parse(format!("Invalid captions JSON: {}", e)))?;

    let tracks = captions
        .pointer("/playerCaptionsTracklistRenderer/captionTracks")
        .cloned()
        .unwrap_or(Value::Array(Vec::new()));

    serde_json::from_value(tracks).map_err(|e| CaptionError::Parse(format!("Invalid caption track list: {}", e)))
}

/// Pick a caption track: exact language, then same primary subtag, then the
/// first track. Manually authored tracks win over auto-generated ones.
fn select_track<'a>(tracks: &'a [CaptionTrack], language: Option<&str>) -> Option<&'a CaptionTrack> {
    let mut ordered: Vec<&CaptionTrack> = tracks.iter().collect();
    ordered.sort_by_key(|t| t.kind.as_deref() == Some("asr"));

    let Some(language) = language else {
        return ordered.first().copied();
    };

    let primary = |code: &str| code.split(['-', '_']).next().unwrap_or(code).to_lowercase();
    let wanted = primary(language);

    ordered
        .iter()
        .find(|t| t.language_code.eq_ignore_ascii_case(language))
        .or_else(|| ordered.iter().find(|t| primary(&t.language_code) == wanted))
        .or_else(|| ordered.first())
        .copied()
}

#[async_trait]
impl CaptionSource for YoutubeCaptionSource {
    #[instrument(skip(self))]
    async fn fetch(
        &self,
        video_id: &str,
        language: Option<&str>,
    ) -> std::result::Result<RawCaptionResult, CaptionError> {
        let not_available = || CaptionError::NotAvailable {
            video_id: video_id.to_string(),
            language: language.map(str::to_string),
        };

        let html = self
            .client
            .get(self.watch_url(video_id)?)
            .header(reqwest::header::ACCEPT_LANGUAGE, language.unwrap_or("en"))
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let tracks = extract_caption_tracks(&html)?;
        debug!("Found {} caption tracks", tracks.len());

        let track = select_track(&tracks, language).ok_or_else(not_available)?;
        if let Some(wanted) = language {
            if !track.language_code.eq_ignore_ascii_case(wanted) {
                warn!(
                    "No '{}' captions for {}, using '{}' instead",
                    wanted, video_id, track.language_code
                );
            }
        }

        let xml = self
            .client
            .get(self.track_url(&track.base_url)?)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let cues = self.parse_cues(&xml);
        if cues.is_empty() {
            return Err(not_available());
        }

        debug!("Fetched {} caption cues", cues.len());
        Ok(json!({
            "videoId": video_id,
            "language": track.language_code,
            "transcript": cues,
        }))
    }
}
