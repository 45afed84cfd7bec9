use crate::types::Segment;

/// Format seconds as MM:SS timestamp
pub fn format_timestamp(seconds: f64) -> String {
    let mins = (seconds / 60.0).floor() as u64;
    let secs = (seconds % 60.0).floor() as u64;
    format!("{:02}:{:02}", mins, secs)
}

/// Human-readable time span of a segment
pub fn format_segment_timestamp(segment: &Segment) -> String {
    if let Some(label) = &segment.timestamp_label {
        return label.clone();
    }

    let start = segment.start_seconds.map(format_timestamp);
    let end = segment.end_seconds.map(format_timestamp);

    match (start, end) {
        (Some(start), Some(end)) => format!("{start} – {end}"),
        (Some(start), None) => start,
        (None, Some(end)) => end,
        (None, None) => "Timestamp unavailable".to_string(),
    }
}

/// Scores up to 1 are confidences, larger ones are shown on their own scale
pub fn format_score(score: f64) -> String {
    if score <= 1.0 {
        format!("{:.1}% confidence", score * 100.0)
    } else {
        format!("Score {:.1}", score)
    }
}

/// Display class of a free-form segment status
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusTone {
    Success,
    Pending,
    Reviewing,
    Neutral,
}

impl StatusTone {
    pub fn classify(status: &str) -> Self {
        match status.to_lowercase().as_str() {
            "success" | "match" => StatusTone::Success,
            "pending" => StatusTone::Pending,
            "reviewing" => StatusTone::Reviewing,
            _ => StatusTone::Neutral,
        }
    }
}

/// Format a segment as a plain-text card
pub fn format_segment_readable(segment: &Segment) -> String {
    let mut output = String::new();

    let mut headline = Vec::new();
    if let Some(status) = &segment.status {
        headline.push(format!("[{}]", status.to_uppercase()));
    }
    headline.push(format_segment_timestamp(segment));
    if let Some(score) = segment.score {
        headline.push(format_score(score));
    }
    output.push_str(&headline.join("  "));
    output.push('\n');

    if let Some(summary) = &segment.summary {
        output.push_str(&format!("  {}\n", summary));
    }

    match &segment.clip_url {
        Some(url) => output.push_str(&format!("  {}\n", url)),
        None => output.push_str("  No clip URL returned for this segment.\n"),
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_pads_minutes_and_seconds() {
        assert_eq!(format_timestamp(0.0), "00:00");
        assert_eq!(format_timestamp(65.9), "01:05");
        assert_eq!(format_timestamp(3725.0), "62:05");
        assert_eq!(format_timestamp(-3.0), "00:00");
    }

    #[test]
    fn timestamp_minutes_do_not_saturate() {
        assert_eq!(format_timestamp(1e12), "16666666666:40");
    }

    #[test]
    fn segment_timestamp_prefers_label() {
        let segment = Segment {
            timestamp_label: Some("at the door".to_string()),
            start_seconds: Some(5.0),
            ..Segment::default()
        };
        assert_eq!(format_segment_timestamp(&segment), "at the door");
    }

    #[test]
    fn segment_timestamp_uses_available_bounds() {
        let mut segment = Segment {
            start_seconds: Some(12.0),
            end_seconds: Some(75.0),
            ..Segment::default()
        };
        assert_eq!(format_segment_timestamp(&segment), "00:12 – 01:15");

        segment.end_seconds = None;
        assert_eq!(format_segment_timestamp(&segment), "00:12");

        segment.start_seconds = None;
        segment.end_seconds = Some(30.0);
        assert_eq!(format_segment_timestamp(&segment), "00:30");

        segment.end_seconds = None;
        assert_eq!(format_segment_timestamp(&segment), "Timestamp unavailable");
    }

    #[test]
    fn score_scale_switches_above_one() {
        assert_eq!(format_score(0.87), "87.0% confidence");
        assert_eq!(format_score(1.0), "100.0% confidence");
        assert_eq!(format_score(42.26), "Score 42.3");
    }

    #[test]
    fn status_tone_is_case_insensitive() {
        assert_eq!(StatusTone::classify("SUCCESS"), StatusTone::Success);
        assert_eq!(StatusTone::classify("Match"), StatusTone::Success);
        assert_eq!(StatusTone::classify("pending"), StatusTone::Pending);
        assert_eq!(StatusTone::classify("Reviewing"), StatusTone::Reviewing);
        assert_eq!(StatusTone::classify("rejected"), StatusTone::Neutral);
    }

    #[test]
    fn readable_card_mentions_missing_clip() {
        let segment = Segment {
            id: "segment-0".to_string(),
            status: Some("pending".to_string()),
            score: Some(0.5),
            summary: Some("blue scarf".to_string()),
            ..Segment::default()
        };
        let card = format_segment_readable(&segment);
        assert!(card.starts_with("[PENDING]  Timestamp unavailable  50.0% confidence\n"));
        assert!(card.contains("  blue scarf\n"));
        assert!(card.contains("No clip URL returned for this segment."));
    }
}
