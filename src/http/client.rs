//! Request executor for the attendance API
//!
//! Issues one HTTP call per [`EndpointRequest`] and classifies what came back
//! into exactly one [`Outcome`]. Network problems never surface as errors to
//! the caller; they become [`Outcome::TransportFailure`].

use anyhow::{Context, Result};
use reqwest::{Client, Method};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Per-request timeout used when nothing else is configured
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Maximum number of characters of a response body shown in diagnostics
const BODY_PREVIEW_CHARS: usize = 200;

/// Transport-level failures
#[derive(Error, Debug)]
pub enum HttpError {
    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Timeout after {0} seconds")]
    Timeout(u64),

    #[error("Connection refused to {0}")]
    ConnectionRefused(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Methods the harness issues
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    fn as_reqwest(self) -> Method {
        match self {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpMethod::Get => write!(f, "GET"),
            HttpMethod::Post => write!(f, "POST"),
        }
    }
}

/// Description of a single call: where, how, and which status is expected
#[derive(Clone, Debug, PartialEq)]
pub struct EndpointRequest {
    pub path: String,
    pub method: HttpMethod,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    pub expected_status: u16,
}

impl EndpointRequest {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method,
            query: Vec::new(),
            body: None,
            expected_status: 200,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self::new(HttpMethod::Post, path).body(body)
    }

    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn expect_status(mut self, status: u16) -> Self {
        self.expected_status = status;
        self
    }
}

impl fmt::Display for EndpointRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)?;
        if !self.query.is_empty() {
            let params: Vec<String> = self.query.iter().map(|(k, v)| format!("{k}={v}")).collect();
            write!(f, "?{}", params.join("&"))?;
        }
        Ok(())
    }
}

/// Classified result of one request
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    /// Timeout, refused connection, or any other failure before a status arrived
    TransportFailure(String),
    /// Expected status arrived but the body was not JSON
    DecodeFailure(String),
    /// A status other than the expected one arrived
    StatusMismatch {
        expected: u16,
        actual: u16,
        body: String,
    },
    /// Expected status with a JSON payload
    Success { status: u16, payload: Value },
}

impl Outcome {
    pub fn kind(&self) -> &'static str {
        match self {
            Outcome::TransportFailure(_) => "transport failure",
            Outcome::DecodeFailure(_) => "decode failure",
            Outcome::StatusMismatch { .. } => "status mismatch",
            Outcome::Success { .. } => "success",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::TransportFailure(message) => write!(f, "Request failed: {message}"),
            Outcome::DecodeFailure(raw) => {
                write!(f, "Invalid JSON response: {}", truncate(raw, BODY_PREVIEW_CHARS))
            }
            Outcome::StatusMismatch {
                expected,
                actual,
                body,
            } => write!(
                f,
                "Expected status {expected}, got {actual}: {}",
                truncate(body, BODY_PREVIEW_CHARS)
            ),
            Outcome::Success { status, .. } => write!(f, "Status {status}"),
        }
    }
}

/// Shorten text to at most `max` characters, marking the cut with `...`
pub fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

/// HTTP client bound to one API base URL
#[derive(Clone, Debug)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    timeout_secs: u64,
}

impl HttpClient {
    /// Create a client with the default timeout
    #[cfg(test)]
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT_SECS)
    }

    /// Create a client with a custom timeout
    pub fn with_timeout(base_url: impl Into<String>, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            timeout_secs,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    /// Build full URL
    fn build_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn classify(&self, err: reqwest::Error, url: &str) -> HttpError {
        if err.is_timeout() {
            HttpError::Timeout(self.timeout_secs)
        } else if err.is_connect() {
            HttpError::ConnectionRefused(url.to_string())
        } else if err.is_builder() {
            HttpError::InvalidUrl(url.to_string())
        } else {
            HttpError::RequestFailed(err.to_string())
        }
    }

    /// Issue one request and classify the response
    pub async fn execute(&self, request: &EndpointRequest) -> Outcome {
        let url = self.build_url(&request.path);
        debug!("Sending {} request to {}", request.method, url);

        let mut req_builder = self.client.request(request.method.as_reqwest(), &url);

        if !request.query.is_empty() {
            req_builder = req_builder.query(&request.query);
        }

        if let Some(body) = &request.body {
            req_builder = req_builder.json(body);
        }

        let start = std::time::Instant::now();

        let response = match req_builder.send().await {
            Ok(response) => response,
            Err(e) => return Outcome::TransportFailure(self.classify(e, &url).to_string()),
        };

        let status = response.status().as_u16();

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => return Outcome::TransportFailure(self.classify(e, &url).to_string()),
        };

        debug!(
            "Response: {} from {} in {}ms",
            status,
            url,
            start.elapsed().as_millis()
        );

        if status != request.expected_status {
            return Outcome::StatusMismatch {
                expected: request.expected_status,
                actual: status,
                body,
            };
        }

        match serde_json::from_str::<Value>(&body) {
            Ok(payload) => Outcome::Success { status, payload },
            Err(_) => Outcome::DecodeFailure(body),
        }
    }
}
