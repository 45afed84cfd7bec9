use reqwest::Url;

use crate::error::{Result, VisionError};

/// Origin used for relative endpoints when none is configured.
pub const DEFAULT_ORIGIN: &str = "http://127.0.0.1:8000";

/// Where requests go.
///
/// With a base URL set every endpoint path is prefixed with it. Without one,
/// endpoint paths stay relative and are resolved against `origin`, which plays
/// the role of the reverse proxy sitting in front of the backend.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    base_url: Option<String>,
    origin: Url,
}

impl ApiConfig {
    pub fn new(base_url: Option<&str>, origin: &str) -> Result<Self> {
        let origin = Url::parse(origin.trim()).map_err(|e| VisionError::InvalidUrl {
            url: origin.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            base_url: base_url.and_then(normalize_base_url),
            origin,
        })
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    pub fn origin(&self) -> &Url {
        &self.origin
    }

    /// Prefix `endpoint` with the base URL, or leave it relative when unset
    pub fn resolve_path(&self, endpoint: &str) -> String {
        let endpoint = if endpoint.starts_with('/') {
            endpoint.to_string()
        } else {
            format!("/{endpoint}")
        };

        match &self.base_url {
            Some(base) => format!("{base}{endpoint}"),
            None => endpoint,
        }
    }

    /// Absolute URL for `endpoint`
    pub fn endpoint_url(&self, endpoint: &str) -> Result<Url> {
        let resolved = self.resolve_path(endpoint);
        let url = match Url::parse(&resolved) {
            Ok(url) => Ok(url),
            Err(_) => self.origin.join(&resolved),
        };
        url.map_err(|e| VisionError::InvalidUrl {
            url: resolved,
            reason: e.to_string(),
        })
    }
}

fn normalize_base_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.strip_suffix('/').unwrap_or(trimmed).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_base_keeps_paths_relative() {
        let config = ApiConfig::new(None, DEFAULT_ORIGIN).unwrap();
        assert_eq!(config.resolve_path("/api/face-match"), "/api/face-match");
        assert_eq!(config.resolve_path("api/face-match"), "/api/face-match");
        assert_eq!(
            config.endpoint_url("/api/face-match").unwrap().as_str(),
            "http://127.0.0.1:8000/api/face-match"
        );
    }

    #[test]
    fn blank_base_is_treated_as_unset() {
        let config = ApiConfig::new(Some("   "), DEFAULT_ORIGIN).unwrap();
        assert_eq!(config.base_url(), None);
    }

    #[test]
    fn base_url_is_trimmed_and_loses_trailing_slash() {
        let config = ApiConfig::new(Some(" https://vision.example.com/ "), DEFAULT_ORIGIN).unwrap();
        assert_eq!(config.base_url(), Some("https://vision.example.com"));
        assert_eq!(
            config.endpoint_url("/api/description-search").unwrap().as_str(),
            "https://vision.example.com/api/description-search"
        );
    }

    #[test]
    fn relative_base_resolves_against_origin() {
        let config = ApiConfig::new(Some("/vision"), "http://localhost:9000").unwrap();
        assert_eq!(
            config.endpoint_url("/api/face-match").unwrap().as_str(),
            "http://localhost:9000/vision/api/face-match"
        );
    }

    #[test]
    fn invalid_origin_is_rejected() {
        let err = ApiConfig::new(None, "not a url").unwrap_err();
        let VisionError::InvalidUrl { url, reason } = err else {
            panic!("expected InvalidUrl, got {err:?}");
        };
        assert_eq!(url, "not a url");
        assert!(!reason.is_empty());
    }
}
