//! Streaming multipart parts that report upload progress.

use std::{
    io,
    path::Path,
    sync::{
        Arc,
        atomic::{AtomicU8, AtomicU64, Ordering},
    },
};

use futures::TryStreamExt;
use reqwest::multipart::Part;
use tokio::fs::{self, File};
use tokio_util::io::ReaderStream;

use crate::error::{Result, VisionError};

/// Receives upload progress as a percentage in `0..=100`.
pub type ProgressHandler = Arc<dyn Fn(u8) + Send + Sync>;

/// Reported once when the total upload size cannot be known.
pub const INDETERMINATE_PROGRESS: u8 = 50;

const NOT_REPORTED: u8 = u8::MAX;

/// Counts bytes handed to the transport and forwards percentage changes.
pub struct UploadProgress {
    total: Option<u64>,
    sent: AtomicU64,
    last_reported: AtomicU8,
    handler: Option<ProgressHandler>,
}

impl UploadProgress {
    pub fn new(total: Option<u64>, handler: Option<ProgressHandler>) -> Self {
        Self {
            total,
            sent: AtomicU64::new(0),
            last_reported: AtomicU8::new(NOT_REPORTED),
            handler,
        }
    }

    pub fn sent(&self) -> u64 {
        self.sent.load(Ordering::Relaxed)
    }

    /// Record `bytes` more sent and report if the percentage moved
    pub fn advance(&self, bytes: u64) {
        let sent = self.sent.fetch_add(bytes, Ordering::Relaxed) + bytes;
        if let Some(total) = self.total {
            self.report(percent(sent, total));
        }
    }

    /// Midpoint report used when exact progress is unavailable
    pub fn report_indeterminate(&self) {
        self.report(INDETERMINATE_PROGRESS);
    }

    fn report(&self, value: u8) {
        let Some(handler) = &self.handler else {
            return;
        };
        if self.last_reported.swap(value, Ordering::Relaxed) != value {
            tracing::trace!(progress = value, "upload progress");
            handler(value);
        }
    }
}

/// Rounded percentage of `sent` over `total`, clamped to 100
pub fn percent(sent: u64, total: u64) -> u8 {
    if total == 0 {
        return 100;
    }
    let scaled = (u128::from(sent) * 100 + u128::from(total) / 2) / u128::from(total);
    scaled.min(100) as u8
}

/// Size of a regular file, `None` for pipes, devices and the like.
/// Directories are rejected here so they never reach the request body.
pub async fn known_length(path: &Path) -> Result<Option<u64>> {
    let metadata = fs::metadata(path)
        .await
        .map_err(|source| VisionError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
    if metadata.is_dir() {
        return Err(VisionError::ReadFile {
            path: path.to_path_buf(),
            source: io::Error::from(io::ErrorKind::IsADirectory),
        });
    }
    Ok(metadata.is_file().then(|| metadata.len()))
}

/// Streamed file part whose chunks are counted by `progress`
pub async fn file_part(
    path: &Path,
    length: Option<u64>,
    progress: Arc<UploadProgress>,
) -> Result<Part> {
    let file = File::open(path)
        .await
        .map_err(|source| VisionError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;

    let stream =
        ReaderStream::new(file).inspect_ok(move |chunk| progress.advance(chunk.len() as u64));
    let body = reqwest::Body::wrap_stream(stream);

    let part = match length {
        Some(length) => Part::stream_with_length(body, length),
        None => Part::stream(body),
    };

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());

    Ok(part.file_name(file_name).mime_str(content_type(path))?)
}

/// Content type from the file extension
pub fn content_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "mp4" | "m4v" => "video/mp4",
        "mov" => "video/quicktime",
        "webm" => "video/webm",
        "mkv" => "video/x-matroska",
        "avi" => "video/x-msvideo",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "gif" => "image/gif",
        _ => "application/octet-stream",
    }
}
