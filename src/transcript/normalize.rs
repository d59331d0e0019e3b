//! Normalization of raw caption payloads into canonical transcripts.
//!
//! Caption payloads arrive either as a bare array of cues or as an object
//! wrapping `{ transcript: [...], language }`. Cue timing may be keyed as
//! `offset` or `start`, and `duration` may be missing. All of that is resolved
//! here so search and formatting only ever see [`TranscriptSegment`]s.

use super::models::{Transcript, TranscriptSegment};
use crate::error::{Result, TubecapError};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

/// The shapes a raw caption payload can take.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawCaptionShape {
    Segments(Vec<Value>),
    Wrapped {
        transcript: Vec<Value>,
        #[serde(default)]
        language: Option<Value>,
    },
    Unrecognized(Value),
}

/// Convert a raw caption payload into a [`Transcript`].
///
/// An unrecognized payload shape yields an empty transcript. A cue without
/// any start time fails the whole conversion with
/// [`TubecapError::MalformedSegment`].
pub fn normalize(video_id: &str, raw: Value) -> Result<Transcript> {
    let shape: RawCaptionShape = serde_json::from_value(raw)?;

    let (cues, language) = match shape {
        RawCaptionShape::Segments(cues) => (cues, None),
        RawCaptionShape::Wrapped {
            transcript,
            language,
        } => (transcript, language_tag(language.as_ref())),
        RawCaptionShape::Unrecognized(other) => {
            debug!(video_id, "Caption payload has no segment list, returning empty transcript");
            let language = language_tag(other.get("language"));
            return Ok(Transcript::empty(video_id, language));
        }
    };

    let segments = cues
        .iter()
        .enumerate()
        .map(|(index, cue)| normalize_segment(index, cue))
        .collect::<Result<Vec<_>>>()?;

    debug!(video_id, segments = segments.len(), "Normalized transcript");
    Ok(Transcript::new(video_id, language, segments))
}

fn language_tag(value: Option<&Value>) -> Option<String> {
    value.and_then(Value::as_str).map(str::to_string)
}

fn normalize_segment(index: usize, cue: &Value) -> Result<TranscriptSegment> {
    let fields = cue.as_object().ok_or_else(|| malformed(index, "segment is not an object"))?;

    let start_value = present(fields, "offset")
        .or_else(|| present(fields, "start"))
        .ok_or_else(|| malformed(index, "missing both 'offset' and 'start'"))?;
    let start_seconds = seconds(start_value)
        .ok_or_else(|| malformed(index, &format!("invalid start time: {}", start_value)))?;

    let duration_seconds = match present(fields, "duration") {
        Some(value) => {
            seconds(value).ok_or_else(|| malformed(index, &format!("invalid duration: {}", value)))?
        }
        None => 0.0,
    };

    let text = match fields.get("text") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    };

    Ok(TranscriptSegment {
        text,
        start_seconds,
        duration_seconds,
    })
}

/// Field value, treating an explicit `null` like an absent key.
fn present<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    fields.get(key).filter(|v| !v.is_null())
}

/// Non-negative, finite seconds from a JSON number or numeric string.
fn seconds(value: &Value) -> Option<f64> {
    let secs = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;

    (secs.is_finite() && secs >= 0.0).then_some(secs)
}

fn malformed(index: usize, reason: &str) -> TubecapError {
    TubecapError::MalformedSegment {
        index,
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bare_array_with_offset() {
        let transcript = normalize("vid", json!([{ "offset": 1.5, "text": "hi", "duration": 2 }])).unwrap();

        assert_eq!(transcript.video_id, "vid");
        assert_eq!(transcript.language, None);
        assert_eq!(transcript.segments, vec![TranscriptSegment::new("hi", 1.5, 2.0)]);
    }

    #[test]
    fn test_wrapped_with_start_and_language() {
        let raw = json!({
            "videoId": "vid",
            "language": "en",
            "transcript": [
                { "start": 0, "text": "first", "duration": 1.25 },
                { "start": "1.25", "text": "second" }
            ]
        });
        let transcript = normalize("vid", raw).unwrap();

        assert_eq!(transcript.language.as_deref(), Some("en"));
        assert_eq!(transcript.segments[0], TranscriptSegment::new("first", 0.0, 1.25));
        assert_eq!(transcript.segments[1], TranscriptSegment::new("second", 1.25, 0.0));
    }

    #[test]
    fn test_offset_preferred_over_start() {
        let transcript = normalize("vid", json!([{ "offset": 3.0, "start": 9.0, "text": "x" }])).unwrap();
        assert_eq!(transcript.segments[0].start_seconds, 3.0);
    }

    #[test]
    fn test_missing_start_is_malformed() {
        let err = normalize(
            "vid",
            json!([{ "offset": 0, "text": "ok" }, { "text": "no timing", "duration": 1 }]),
        )
        .unwrap_err();

        assert!(matches!(err, TubecapError::MalformedSegment { index: 1, .. }));
    }

    #[test]
    fn test_null_start_is_malformed() {
        let err = normalize("vid", json!([{ "offset": null, "text": "x" }])).unwrap_err();
        assert!(matches!(err, TubecapError::MalformedSegment { index: 0, .. }));
    }

    #[test]
    fn test_negative_or_garbage_timing_is_malformed() {
        assert!(matches!(
            normalize("vid", json!([{ "offset": -1, "text": "x" }])),
            Err(TubecapError::MalformedSegment { .. })
        ));
        assert!(matches!(
            normalize("vid", json!([{ "offset": 1, "duration": "soon", "text": "x" }])),
            Err(TubecapError::MalformedSegment { .. })
        ));
        assert!(matches!(
            normalize("vid", json!(["not an object"])),
            Err(TubecapError::MalformedSegment { .. })
        ));
    }

    #[test]
    fn test_unrecognized_shape_is_empty() {
        for raw in [json!({ "videoId": "vid" }), json!("captions"), json!(null), json!({ "transcript": "nope" })] {
            let transcript = normalize("vid", raw).unwrap();
            assert!(transcript.is_empty());
        }

        let transcript = normalize("vid", json!({ "language": "fr" })).unwrap();
        assert!(transcript.is_empty());
        assert_eq!(transcript.language.as_deref(), Some("fr"));
    }

    #[test]
    fn test_text_is_untouched_and_order_preserved() {
        let raw = json!([
            { "offset": 5, "text": "  later  " },
            { "offset": 1, "text": "earlier &amp; raw" },
            { "offset": 1, "text": "earlier &amp; raw" }
        ]);
        let transcript = normalize("vid", raw).unwrap();

        let texts: Vec<_> = transcript.segments.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["  later  ", "earlier &amp; raw", "earlier &amp; raw"]);
        assert_eq!(transcript.segments[0].start_seconds, 5.0);
    }

    #[test]
    fn test_missing_text_becomes_empty() {
        let transcript = normalize("vid", json!([{ "offset": 2 }])).unwrap();
        assert_eq!(transcript.segments[0].text, "");
    }
}
