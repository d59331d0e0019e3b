//! Display timestamps for transcript segments.

use super::models::{TimestampedSegment, TimestampedTranscript, Transcript};
use crate::error::{Result, TubecapError};

/// Format seconds as MM:SS, or HH:MM:SS from one hour on.
///
/// Fractional seconds are floored so display times never run ahead of the
/// underlying offsets.
pub fn format_timestamp(seconds: f64) -> Result<String> {
    if !seconds.is_finite() || seconds < 0.0 || seconds >= u64::MAX as f64 {
        return Err(TubecapError::InvalidOffset(seconds));
    }

    let total_seconds = seconds.floor() as u64;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;

    if hours > 0 {
        Ok(format!("{:02}:{:02}:{:02}", hours, minutes, secs))
    } else {
        Ok(format!("{:02}:{:02}", minutes, secs))
    }
}

/// Attach a display time to every segment of `transcript`.
pub fn timestamp_transcript(transcript: Transcript) -> Result<TimestampedTranscript> {
    let segments = transcript
        .segments
        .into_iter()
        .map(|segment| {
            Ok(TimestampedSegment {
                display_time: format_timestamp(segment.start_seconds)?,
                segment,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(TimestampedTranscript {
        video_id: transcript.video_id,
        language: transcript.language,
        segments,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::TranscriptSegment;

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(0.0).unwrap(), "00:00");
        assert_eq!(format_timestamp(59.0).unwrap(), "00:59");
        assert_eq!(format_timestamp(65.0).unwrap(), "01:05");
        assert_eq!(format_timestamp(3599.999).unwrap(), "59:59");
        assert_eq!(format_timestamp(3600.0).unwrap(), "01:00:00");
        assert_eq!(format_timestamp(3665.0).unwrap(), "01:01:05");
        assert_eq!(format_timestamp(360_000.0).unwrap(), "100:00:00");
    }

    #[test]
    fn test_fraction_is_floored() {
        assert_eq!(format_timestamp(1.9).unwrap(), "00:01");
        assert_eq!(format_timestamp(59.99).unwrap(), "00:59");
    }

    #[test]
    fn test_negative_offset_rejected() {
        assert!(matches!(format_timestamp(-1.0), Err(TubecapError::InvalidOffset(s)) if s == -1.0));
        assert!(matches!(format_timestamp(-0.001), Err(TubecapError::InvalidOffset(_))));
        assert!(matches!(format_timestamp(f64::NAN), Err(TubecapError::InvalidOffset(_))));
    }

    #[test]
    fn test_unbounded_offset_rejected() {
        assert!(matches!(format_timestamp(f64::INFINITY), Err(TubecapError::InvalidOffset(_))));
        assert!(matches!(format_timestamp(1e30), Err(TubecapError::InvalidOffset(_))));
        assert_eq!(format_timestamp(359_999.0).unwrap(), "99:59:59");
    }

    #[test]
    fn test_timestamp_transcript() {
        let transcript = Transcript::new(
            "vid",
            None,
            vec![
                TranscriptSegment::new("a", 0.0, 1.0),
                TranscriptSegment::new("b", 65.0, 1.0),
                TranscriptSegment::new("c", 3601.0, 1.0),
            ],
        );

        let stamped = timestamp_transcript(transcript).unwrap();
        let times: Vec<_> = stamped.segments.iter().map(|s| s.display_time.as_str()).collect();
        assert_eq!(times, vec!["00:00", "01:05", "01:00:01"]);
        assert_eq!(stamped.to_lines(), "[00:00] a\n[01:05] b\n[01:00:01] c");
    }
}
