//! Thin JSON-over-HTTP helper.
//!
//! One request per call. A non-success status is turned into
//! [`AppError::Fetch`] carrying the status code and the raw body text;
//! anything else is decoded as JSON into the caller's type.

use crate::error::{AppError, Result};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// Per-request settings. `Default` is a bare GET.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub method: Method,
    pub headers: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            headers: Vec::new(),
            body: None,
        }
    }
}

impl FetchOptions {
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn json(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }
}

pub async fn fetch_json<T: DeserializeOwned>(
    client: &Client,
    url: &str,
    options: FetchOptions,
) -> Result<T> {
    let mut request = client.request(options.method.clone(), url);

    for (name, value) in &options.headers {
        request = request.header(name.as_str(), value.as_str());
    }

    if let Some(ref body) = options.body {
        request = request.json(body);
    }

    let response = request.send().await?;
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await?;
        warn!("{} {} failed with status {}", options.method, url, status);
        return Err(AppError::Fetch {
            status: status.as_u16(),
            body,
        });
    }

    let bytes = response.bytes().await?;
    debug!("{} {} returned {} bytes", options.method, url, bytes.len());

    serde_json::from_slice(&bytes).map_err(|e| AppError::Decode(e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options_are_plain_get() {
        let options = FetchOptions::default();
        assert_eq!(options.method, Method::GET);
        assert!(options.headers.is_empty());
        assert!(options.body.is_none());
    }

    #[test]
    fn test_builder_accumulates_headers() {
        let options = FetchOptions::default()
            .method(Method::POST)
            .header("x-one", "1")
            .header("x-two", "2")
            .json(serde_json::json!({"k": "v"}));

        assert_eq!(options.method, Method::POST);
        assert_eq!(options.headers.len(), 2);
        assert_eq!(options.headers[1], ("x-two".to_string(), "2".to_string()));
        assert!(options.body.is_some());
    }

    #[test]
    fn test_fetch_error_message_format() {
        let err = AppError::Fetch {
            status: 502,
            body: "bad gateway".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 502: bad gateway");
        assert_eq!(err.status(), Some(502));
    }
}
