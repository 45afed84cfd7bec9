use std::sync::Arc;

use reqwest::multipart::Form;
use tracing::Instrument;
use uuid::Uuid;

use crate::{
    action::Action,
    config::ApiConfig,
    error::{Result, VisionError},
    request::{Field, SubmissionParts},
    types::VisionResponse,
    upload::{ProgressHandler, UploadProgress, file_part, known_length},
};

/// HTTP client for the vision API.
///
/// Cloning is cheap and clones share the connection pool. Calls are
/// independent of each other; callers that want one request per action in
/// flight enforce that themselves.
#[derive(Clone, Debug)]
pub struct VisionClient {
    http: reqwest::Client,
    config: ApiConfig,
}

impl VisionClient {
    pub fn new(config: ApiConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("vision-console/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub async fn face_match(
        &self,
        parts: &SubmissionParts,
        on_progress: Option<ProgressHandler>,
    ) -> Result<VisionResponse> {
        self.submit(Action::FaceMatch, parts, on_progress).await
    }

    pub async fn description_search(
        &self,
        parts: &SubmissionParts,
        on_progress: Option<ProgressHandler>,
    ) -> Result<VisionResponse> {
        self.submit(Action::DescriptionSearch, parts, on_progress).await
    }

    /// Upload `parts` to the endpoint for `action` and parse the reply.
    ///
    /// Fails before sending anything when a required part is missing. A
    /// successful response whose body is not JSON is returned as a payload
    /// carrying the raw text under `message`.
    pub async fn submit(
        &self,
        action: Action,
        parts: &SubmissionParts,
        on_progress: Option<ProgressHandler>,
    ) -> Result<VisionResponse> {
        parts.validate(action)?;

        let request_id = Uuid::new_v4();
        let span = tracing::info_span!("submit", %action, %request_id);
        self.send(action, parts, on_progress).instrument(span).await
    }

    async fn send(
        &self,
        action: Action,
        parts: &SubmissionParts,
        on_progress: Option<ProgressHandler>,
    ) -> Result<VisionResponse> {
        let url = self.config.endpoint_url(action.endpoint())?;
        let fields = parts.fields(action);

        let mut total = Some(0u64);
        let mut lengths = Vec::with_capacity(fields.len());
        for (_, field) in &fields {
            let length = match field {
                Field::File(path) => known_length(path).await?,
                Field::Text(_) => Some(0),
            };
            total = total.zip(length).map(|(sum, len)| sum + len);
            lengths.push(length);
        }

        let progress = Arc::new(UploadProgress::new(total, on_progress));
        if total.is_none() {
            progress.report_indeterminate();
        }

        let mut form = Form::new();
        for ((name, field), length) in fields.into_iter().zip(lengths) {
            form = match field {
                Field::File(path) => {
                    form.part(name, file_part(path, length, Arc::clone(&progress)).await?)
                }
                Field::Text(text) => form.text(name, text.to_string()),
            };
        }

        tracing::info!(%url, upload_bytes = ?total, "submitting");

        let response = self
            .http
            .post(url.clone())
            .multipart(form)
            .send()
            .await
            .map_err(|source| VisionError::Network {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| VisionError::Network {
                url: url.to_string(),
                source,
            })?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "request failed");
            let message = if body.is_empty() {
                format!("Request failed with status {}", status.as_u16())
            } else {
                body
            };
            return Err(VisionError::Server {
                status: status.as_u16(),
                message,
            });
        }

        tracing::info!(
            status = status.as_u16(),
            sent_bytes = progress.sent(),
            "response received"
        );
        Ok(parse_response(&body))
    }
}

/// Decode a response body. Never fails: an empty body is an empty object and
/// anything that is not JSON comes back as `{ "message": body }`.
pub fn parse_response(body: &str) -> VisionResponse {
    if body.is_empty() {
        return VisionResponse::empty();
    }
    match serde_json::from_str(body) {
        Ok(value) => VisionResponse(value),
        Err(e) => {
            tracing::warn!(error = %e, "unable to parse API response as JSON");
            VisionResponse::from_message(body)
        }
    }
}
