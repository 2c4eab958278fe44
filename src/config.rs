//! Runtime configuration.
//!
//! Everything has a sensible default; environment variables override:
//! - `SCICHAT_BACKEND_URL` - base URL of the paper/question-answering backend
//! - `SCICHAT_BIND` - address the dashboard listens on
//! - `SCICHAT_REQUEST_TIMEOUT_SECS` - per-request timeout for backend calls
//! - `SCICHAT_MAX_UPLOAD_MB` - largest PDF accepted by the upload form

use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;
use url::Url;

pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_BIND: &str = "127.0.0.1:3000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_MAX_UPLOAD_MB: usize = 64;

pub const ENV_BACKEND_URL: &str = "SCICHAT_BACKEND_URL";
pub const ENV_BIND: &str = "SCICHAT_BIND";
pub const ENV_REQUEST_TIMEOUT: &str = "SCICHAT_REQUEST_TIMEOUT_SECS";
pub const ENV_MAX_UPLOAD_MB: &str = "SCICHAT_MAX_UPLOAD_MB";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid backend URL: {0}")]
    InvalidBackendUrl(String),
    #[error("Backend URL must use http or https, got {0}")]
    UnsupportedScheme(String),
    #[error("Invalid bind address {value}: {reason}")]
    InvalidBind { value: String, reason: String },
    #[error("Invalid request timeout {0:?}")]
    InvalidTimeout(String),
    #[error("Invalid upload size limit {0:?}")]
    InvalidUploadLimit(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Always ends with `/` so endpoint paths join underneath it.
    pub backend_url: Url,
    pub bind_addr: SocketAddr,
    pub request_timeout: Duration,
    /// Request body limit for `POST /upload`, in bytes.
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Missing keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend = lookup(ENV_BACKEND_URL).unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());
        let backend_url = validate_backend_url(&backend)?;

        let bind = lookup(ENV_BIND).unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind_addr = bind.parse().map_err(|e: std::net::AddrParseError| {
            ConfigError::InvalidBind {
                value: bind.clone(),
                reason: e.to_string(),
            }
        })?;

        let request_timeout = match lookup(ENV_REQUEST_TIMEOUT) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => return Err(ConfigError::InvalidTimeout(raw)),
            },
            None => Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        };

        let max_upload_mb = match lookup(ENV_MAX_UPLOAD_MB) {
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(mb) if mb > 0 => mb,
                _ => return Err(ConfigError::InvalidUploadLimit(raw)),
            },
            None => DEFAULT_MAX_UPLOAD_MB,
        };

        Ok(Self {
            backend_url,
            bind_addr,
            request_timeout,
            max_upload_bytes: max_upload_mb.saturating_mul(1024 * 1024),
        })
    }
}

/// Parse the backend base URL.
///
/// Plain HTTP is accepted because the backend normally runs next to the
/// dashboard. The path is normalised to end in `/` so that `Url::join`
/// appends endpoint names instead of replacing the last segment.
pub fn validate_backend_url(url_str: &str) -> Result<Url, ConfigError> {
    let mut url =
        Url::parse(url_str.trim()).map_err(|e| ConfigError::InvalidBackendUrl(e.to_string()))?;

    if url.scheme() != "https" && url.scheme() != "http" {
        return Err(ConfigError::UnsupportedScheme(url.scheme().to_string()));
    }

    if url.host_str().is_none() {
        return Err(ConfigError::InvalidBackendUrl("No host in URL".to_string()));
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url.set_query(None);
    url.set_fragment(None);

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(|_| None).unwrap();
        assert_eq!(config.backend_url.as_str(), "http://127.0.0.1:8000/");
        assert_eq!(config.bind_addr.to_string(), DEFAULT_BIND);
        assert_eq!(config.request_timeout, Duration::from_secs(120));
        assert_eq!(config.max_upload_bytes, 64 * 1024 * 1024);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            (ENV_BACKEND_URL, "https://papers.example.org/api"),
            (ENV_BIND, "0.0.0.0:8080"),
            (ENV_REQUEST_TIMEOUT, "30"),
            (ENV_MAX_UPLOAD_MB, "8"),
        ]))
        .unwrap();
        assert_eq!(config.backend_url.as_str(), "https://papers.example.org/api/");
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.max_upload_bytes, 8 * 1024 * 1024);
    }

    #[test]
    fn test_backend_url_keeps_path_prefix_on_join() {
        let url = validate_backend_url("http://localhost:8000/scichat").unwrap();
        assert_eq!(
            url.join("documents").unwrap().as_str(),
            "http://localhost:8000/scichat/documents"
        );
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        let result = validate_backend_url("ftp://example.org");
        assert!(matches!(result, Err(ConfigError::UnsupportedScheme(_))));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(
            validate_backend_url("not a url"),
            Err(ConfigError::InvalidBackendUrl(_))
        ));
    }

    #[test]
    fn test_rejects_bad_bind_and_timeout() {
        let bind = Config::from_lookup(lookup_from(&[(ENV_BIND, "localhost")]));
        assert!(matches!(bind, Err(ConfigError::InvalidBind { .. })));

        let timeout = Config::from_lookup(lookup_from(&[(ENV_REQUEST_TIMEOUT, "0")]));
        assert_eq!(timeout.unwrap_err(), ConfigError::InvalidTimeout("0".to_string()));

        let limit = Config::from_lookup(lookup_from(&[(ENV_MAX_UPLOAD_MB, "lots")]));
        assert_eq!(
            limit.unwrap_err(),
            ConfigError::InvalidUploadLimit("lots".to_string())
        );
    }
}
