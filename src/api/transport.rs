//
//  scribe-cli
//  api/transport.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Request Transport
//!
//! The transport executes exactly one HTTP request and reports what came
//! back. It does not interpret status codes, retry, or rewrite paths; all of
//! that happens in [`ScribeClient`](super::ScribeClient).
//!
//! - [`ApiRequest`]: the immutable description of one logical call
//! - [`OutgoingRequest`]: what actually goes on the wire for one attempt
//! - [`Transport`]: the seam between the adaptive client and the network
//! - [`HttpTransport`]: the reqwest-backed implementation

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Client, Method};
use serde::Serialize;
use thiserror::Error;
use url::Url;

use super::common::{ApiError, ApiResult};

/// Network-level failures. None of these are retried by the client.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransportError {
    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("could not connect: {0}")]
    Connect(String),

    #[error("request failed: {0}")]
    Request(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_connect() {
            Self::Connect(err.to_string())
        } else {
            Self::Request(err.to_string())
        }
    }
}

/// One logical API call.
///
/// The path is the *logical* path (`/form-fills/3`); the client decides which
/// prefix it is finally sent under.
///
/// # Example
///
/// ```rust
/// use scribe_cli::api::ApiRequest;
/// use serde_json::json;
///
/// let request = ApiRequest::post("/transcriptions")
///     .query("language", "en")
///     .json_body(json!({"filename": "memo.m4a"}));
///
/// assert_eq!(request.path, "/transcriptions");
/// assert!(request.prefix_fallback);
/// ```
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: HeaderMap,
    pub body: Option<serde_json::Value>,
    /// Overrides the transport's default timeout (large uploads).
    pub timeout: Option<Duration>,
    /// Whether a 404 may be retried under the other path prefixes.
    pub prefix_fallback: bool,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: HeaderMap::new(),
            body: None,
            timeout: None,
            prefix_fallback: true,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers.extend(headers);
        self
    }

    pub fn json_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Serializes any value into the JSON body.
    pub fn serialized_body<B: Serialize>(self, body: &B) -> ApiResult<Self> {
        Ok(self.json_body(serde_json::to_value(body)?))
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Disables the prefix cascade for this call.
    ///
    /// Resource-family cascades use this: a 404 there means "try the next
    /// spelling", not "try the next prefix".
    pub fn without_prefix_fallback(mut self) -> Self {
        self.prefix_fallback = false;
        self
    }

    /// Same request, different path.
    pub fn with_path(&self, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..self.clone()
        }
    }
}

/// A single attempt as handed to the transport.
#[derive(Debug, Clone)]
pub struct OutgoingRequest {
    pub method: Method,
    /// Final, prefix-resolved path
    pub path: String,
    pub query: Vec<(String, String)>,
    /// Caller headers plus `Authorization` when a token is available
    pub headers: HeaderMap,
    pub body: Option<serde_json::Value>,
    pub timeout: Option<Duration>,
}

/// What the server sent back, whatever the status.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Executes one request against the backend.
///
/// Implementations return `Ok` for every HTTP response, including 4xx and
/// 5xx, and `Err` only when no response was obtained.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &OutgoingRequest) -> Result<RawResponse, TransportError>;
}

/// reqwest-backed [`Transport`] bound to a single base origin.
pub struct HttpTransport {
    http: Client,
    base_url: Url,
}

impl HttpTransport {
    /// Creates a transport for the given origin.
    ///
    /// # Parameters
    ///
    /// * `base_url` - Origin every path is resolved against, e.g. `https://scribe.example.com`
    /// * `timeout` - Default timeout for requests without their own override
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidRequest`] if the base URL is not an absolute
    /// http(s) URL, or [`ApiError::Transport`] if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> ApiResult<Self> {
        let base_url = parse_base_url(base_url)?;
        let http = Client::builder()
            .user_agent(format!("scribe/{}", crate::VERSION))
            .timeout(timeout)
            .build()
            .map_err(TransportError::from)?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Joins a root-relative path onto the origin, keeping any base path.
    fn url_for(&self, path: &str) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        if path.starts_with('/') {
            format!("{}{}", base, path)
        } else {
            format!("{}/{}", base, path)
        }
    }
}

/// Validates a configured base origin.
pub fn parse_base_url(base_url: &str) -> ApiResult<Url> {
    let url = Url::parse(base_url.trim())
        .map_err(|e| ApiError::InvalidRequest(format!("invalid base URL '{}': {}", base_url, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ApiError::InvalidRequest(format!(
            "base URL must use http or https: {}",
            base_url
        )));
    }

    Ok(url)
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &OutgoingRequest) -> Result<RawResponse, TransportError> {
        let url = self.url_for(&request.path);
        let mut builder = self
            .http
            .request(request.method.clone(), &url)
            .headers(request.headers.clone());

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.text().await?;

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}
