use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::segments::extract_segments;

/// One detected match interval, normalized for display
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_seconds: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_seconds: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clip_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Source record as the backend sent it
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

/// Body returned by the vision API.
///
/// The backend makes no promises about its shape, so this stays an untyped
/// JSON value and segments are pulled out on demand.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VisionResponse(pub Value);

impl VisionResponse {
    pub fn empty() -> Self {
        Self(Value::Object(Map::new()))
    }

    /// Wrap a body that was not valid JSON
    pub fn from_message(message: impl Into<String>) -> Self {
        let mut map = Map::new();
        map.insert("message".to_string(), Value::String(message.into()));
        Self(Value::Object(map))
    }

    pub fn message(&self) -> Option<&str> {
        self.0.get("message").and_then(Value::as_str)
    }

    pub fn detail(&self) -> Option<&str> {
        self.0.get("detail").and_then(Value::as_str)
    }

    pub fn segments(&self) -> Vec<Segment> {
        extract_segments(&self.0)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl From<Value> for VisionResponse {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
