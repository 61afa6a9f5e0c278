//! Blocking JSON transport to the content API.
//!
//! Uses the curl crate (libcurl). Calls run in the current thread; the content
//! client moves them onto `spawn_blocking` so async callers only suspend while
//! a request is in flight.

use serde_json::Value;
use std::time::Duration;

use super::FetchError;
use crate::config::SiteConfig;

/// JSON request/response transport. `path` is relative to the API base URL
/// and starts with `/`.
pub trait Transport: Send + Sync + 'static {
    fn get_json(&self, path: &str) -> Result<Value, FetchError>;
    fn post_json(&self, path: &str, body: &Value) -> Result<Value, FetchError>;
}

/// libcurl-backed transport.
#[derive(Debug, Clone)]
pub struct CurlTransport {
    base_url: String,
    connect_timeout: Option<Duration>,
    timeout: Option<Duration>,
}

impl CurlTransport {
    /// Transport without timeouts: a stalled request waits indefinitely.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            connect_timeout: None,
            timeout: None,
        }
    }

    pub fn from_config(cfg: &SiteConfig) -> Self {
        Self {
            base_url: cfg.base_url().to_string(),
            connect_timeout: cfg.connect_timeout(),
            timeout: cfg.request_timeout(),
        }
    }

    pub fn with_timeouts(mut self, connect: Option<Duration>, total: Option<Duration>) -> Self {
        self.connect_timeout = connect;
        self.timeout = total;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn perform(
        &self,
        method: &'static str,
        path: &str,
        body: Option<&[u8]>,
    ) -> Result<Value, FetchError> {
        let url = self.url_for(path);
        let mut response: Vec<u8> = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(&url)?;
        easy.follow_location(true)?;
        easy.max_redirections(5)?;
        if let Some(t) = self.connect_timeout {
            easy.connect_timeout(t)?;
        }
        if let Some(t) = self.timeout {
            easy.timeout(t)?;
        }

        let mut list = curl::easy::List::new();
        list.append("Accept: application/json")?;
        if let Some(body) = body {
            list.append("Content-Type: application/json")?;
            easy.post(true)?;
            easy.post_fields_copy(body)?;
        }
        easy.http_headers(list)?;

        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                response.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let status = easy.response_code()?;
        tracing::debug!("{} {} -> HTTP {} ({} bytes)", method, url, status, response.len());
        if !(200..300).contains(&status) {
            return Err(FetchError::Http {
                method,
                path: path.to_string(),
                status,
            });
        }

        decode_body(path, &response)
    }
}

impl Transport for CurlTransport {
    fn get_json(&self, path: &str) -> Result<Value, FetchError> {
        self.perform("GET", path, None)
    }

    fn post_json(&self, path: &str, body: &Value) -> Result<Value, FetchError> {
        let bytes = serde_json::to_vec(body).map_err(|source| FetchError::Decode {
            path: path.to_string(),
            source,
        })?;
        self.perform("POST", path, Some(&bytes))
    }
}

/// Parses a response body; an empty body reads as JSON `null`.
pub(crate) fn decode_body(path: &str, bytes: &[u8]) -> Result<Value, FetchError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(bytes).map_err(|source| FetchError::Decode {
        path: path.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn base_url_trailing_slash_is_dropped() {
        let t = CurlTransport::new("http://localhost:5001/api/");
        assert_eq!(t.base_url(), "http://localhost:5001/api");
        assert_eq!(t.url_for("/content/home"), "http://localhost:5001/api/content/home");
    }

    #[test]
    fn from_config_carries_timeouts() {
        let cfg = SiteConfig {
            request_timeout_secs: Some(9),
            ..SiteConfig::default()
        };
        let t = CurlTransport::from_config(&cfg);
        assert_eq!(t.timeout, Some(Duration::from_secs(9)));
        assert_eq!(t.connect_timeout, None);
    }

    #[test]
    fn decode_empty_body_is_null() {
        assert_eq!(decode_body("/forms/contact", b"").unwrap(), Value::Null);
        assert_eq!(decode_body("/forms/contact", b" \n").unwrap(), Value::Null);
    }

    #[test]
    fn decode_json_and_garbage() {
        assert_eq!(
            decode_body("/team", br#"{"teamMembers":[]}"#).unwrap(),
            json!({"teamMembers": []})
        );
        let err = decode_body("/team", b"<html>").unwrap_err();
        assert!(matches!(err, FetchError::Decode { .. }));
    }
}
