//! Vision Core Library
//!
//! Submits videos to the vision API for face matching and description search,
//! tracks upload progress, and normalizes whatever the API returns into
//! display-ready segments.

pub mod action;
pub mod client;
pub mod config;
pub mod error;
pub mod format;
pub mod request;
pub mod segments;
pub mod types;
pub mod upload;

// Re-export commonly used items at crate root
pub use action::Action;
pub use client::{VisionClient, parse_response};
pub use config::{ApiConfig, DEFAULT_ORIGIN};
pub use error::{Result, VisionError};
pub use format::{
    StatusTone, format_score, format_segment_readable, format_segment_timestamp, format_timestamp,
};
pub use request::SubmissionParts;
pub use segments::extract_segments;
pub use types::{Segment, VisionResponse};
pub use upload::{INDETERMINATE_PROGRESS, ProgressHandler};
