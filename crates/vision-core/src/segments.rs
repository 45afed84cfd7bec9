//! Normalization of loosely structured API payloads into [`Segment`] lists.
//!
//! The backend schema is not under our control, so every field is looked up
//! through an ordered list of key aliases and the first acceptable value wins.
//! Alias order is part of the contract; do not reorder.

use serde_json::{Map, Value};

use crate::types::Segment;

/// Keys that may hold the segment array, tried in order.
pub const SEGMENT_KEYS: [&str; 4] = ["segments", "results", "matches", "clips"];

const ID_KEYS: &[&str] = &["id", "segmentId", "segment_id", "uuid"];
const CLIP_URL_KEYS: &[&str] = &["clipUrl", "clip_url", "url", "video_url", "clip"];
const STATUS_KEYS: &[&str] = &["status", "state", "label", "result"];
const SUMMARY_KEYS: &[&str] = &["summary", "caption", "description", "note"];
const TIMESTAMP_KEYS: &[&str] = &["timestamp", "timecode", "range"];
const SCORE_KEYS: &[&str] = &["score", "confidence", "match_score"];
const START_KEYS: &[&str] = &["startSeconds", "start", "start_seconds", "start_time"];
const END_KEYS: &[&str] = &["endSeconds", "end", "end_seconds", "end_time"];

type Locator = for<'a> fn(&'a Value) -> Option<&'a [Value]>;

/// Places a segment array may live, tried in order.
const LOCATORS: &[Locator] = &[top_level_array, keyed_array, nested_data_array];

/// Extract segments from an arbitrary payload. Never fails; unrecognized
/// shapes yield an empty list.
pub fn extract_segments(payload: &Value) -> Vec<Segment> {
    LOCATORS
        .iter()
        .find_map(|locate| locate(payload))
        .map(normalize_array)
        .unwrap_or_default()
}

fn top_level_array(payload: &Value) -> Option<&[Value]> {
    payload.as_array().map(Vec::as_slice)
}

fn keyed_array(payload: &Value) -> Option<&[Value]> {
    let object = payload.as_object()?;
    SEGMENT_KEYS
        .iter()
        .find_map(|key| object.get(*key).and_then(Value::as_array))
        .map(Vec::as_slice)
}

fn nested_data_array(payload: &Value) -> Option<&[Value]> {
    let data = payload.get("data")?;
    if !data.is_object() {
        return None;
    }
    keyed_array(data)
}

pub fn normalize_array(items: &[Value]) -> Vec<Segment> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| normalize_item(item, index))
        .collect()
}

/// Build a segment from one source item. `index` is its position in the
/// source array and backs the fallback id.
pub fn normalize_item(item: &Value, index: usize) -> Segment {
    let record = match item {
        Value::Object(map) => map.clone(),
        other => {
            let mut wrapper = Map::new();
            wrapper.insert("summary".to_string(), Value::String(display_value(other)));
            wrapper
        }
    };

    Segment {
        id: pick_string(&record, ID_KEYS).unwrap_or_else(|| format!("segment-{index}")),
        clip_url: pick_string(&record, CLIP_URL_KEYS),
        status: pick_string(&record, STATUS_KEYS),
        summary: pick_string(&record, SUMMARY_KEYS),
        timestamp_label: pick_string(&record, TIMESTAMP_KEYS),
        score: pick_number(&record, SCORE_KEYS),
        start_seconds: pick_number(&record, START_KEYS),
        end_seconds: pick_number(&record, END_KEYS),
        metadata: record,
    }
}

fn pick_string(source: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match source.get(*key) {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
        _ => None,
    })
}

fn pick_number(source: &Map<String, Value>, keys: &[&str]) -> Option<f64> {
    keys.iter()
        .find_map(|key| source.get(*key).and_then(to_number))
}

/// Finite number from a JSON number or a numeric string
pub fn to_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed.parse::<f64>().ok()?
        }
        _ => return None,
    };
    number.is_finite().then_some(number)
}

// Plain text form of a non-object item, used as its summary.
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => display_value(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Number(n) => number_text(n),
        other => other.to_string(),
    }
}

// Integral floats print without a fractional part, so 1.0 reads as "1".
fn number_text(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if !n.is_i64() && !n.is_u64() && f.fract() == 0.0 && f.abs() < 1e21 => {
            format!("{f:.0}")
        }
        _ => n.to_string(),
    }
}
