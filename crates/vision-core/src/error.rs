use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VisionError {
    #[error("Upload a video file first.")]
    MissingVideo,

    #[error("A reference face image is required for face matching.")]
    MissingReference,

    #[error("Provide a clothing or accessory description to search for.")]
    MissingDescription,

    #[error("Network error while contacting the vision API.")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Non-2xx response. The message is the response body when the server sent one.
    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("Invalid API URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Failed to read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to build request: {0}")]
    Request(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, VisionError>;
