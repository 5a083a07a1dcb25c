//
//  scribe-cli
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Common API Types
//!
//! Shared error and response types used by the adaptive client, the fallback
//! cascades and every resource wrapper.
//!
//! # Overview
//!
//! - [`ApiError`] - Unified error type for all API operations
//! - [`ApiResponse`] - Normalized `{status, body}` pair returned to callers
//! - [`extract_error_message`] - Pulls a readable message out of an error body
//!
//! # Example
//!
//! ```rust
//! use scribe_cli::api::common::ApiError;
//!
//! fn describe(err: &ApiError) -> &'static str {
//!     match err {
//!         ApiError::FamilyRouteUnavailable { .. } => "feature unavailable on this server",
//!         ApiError::NotFound { .. } => "item not found",
//!         ApiError::Unauthorized { .. } => "please log in again",
//!         _ => "request failed",
//!     }
//! }
//! ```

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::transport::TransportError;

/// Result alias used throughout the API layer.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors that can cross the boundary of the adaptive client.
///
/// Internal retries (prefix fallback, family cascades, shape cascades) never
/// surface on their own; only the outcome that ends a strategy does.
///
/// # Variants
///
/// * `NotFound` - 404. Also what the caller sees once every prefix has been tried.
/// * `FamilyRouteUnavailable` - every candidate route of a resource family returned 404
/// * `Unauthorized` - 401; the stored token has already been cleared
/// * `Status` - any other non-success status (400/422 are shape rejections)
/// * `Transport` - network failure or timeout, never retried
/// * `Decode` - the body did not match the expected type
/// * `InvalidRequest` - the request could not be built locally
/// * `Credentials` - the login flow could not obtain or persist a token
#[derive(Error, Debug)]
pub enum ApiError {
    /// The server answered 404 for the path.
    #[error("Not found: {path}: {message}")]
    NotFound {
        /// The path that was dispatched last
        path: String,
        /// Message extracted from the response body
        message: String,
    },

    /// None of the candidate routes for a resource family exist on this server.
    #[error("The {family} service is not available on this server (tried {})", tried.join(", "))]
    FamilyRouteUnavailable {
        /// Human-readable family name, e.g. `form fills`
        family: String,
        /// Every path that was tried, in order
        tried: Vec<String>,
    },

    /// The token is missing, invalid or expired.
    #[error("Authentication required: {message}")]
    Unauthorized {
        /// Message extracted from the response body
        message: String,
    },

    /// Any other non-success HTTP status.
    #[error("API error ({status}): {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Message extracted from the response body
        message: String,
    },

    #[error("Network error: {0}")]
    Transport(#[from] TransportError),

    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The token could not be obtained, stored or cleared.
    #[error("Credential error: {0}")]
    Credentials(String),
}

impl ApiError {
    /// Builds the error matching a non-success status.
    pub fn from_status(status: u16, path: &str, body: &str) -> Self {
        let message = extract_error_message(status, body);
        match status {
            401 => Self::Unauthorized { message },
            404 => Self::NotFound {
                path: path.to_string(),
                message,
            },
            _ => Self::Status { status, message },
        }
    }

    /// The HTTP status behind this error, if there is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::NotFound { .. } => Some(404),
            Self::Unauthorized { .. } => Some(401),
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// Whether the server reached the route but refused the body's field names.
    ///
    /// Both 400 Bad Request and 422 Unprocessable Entity count.
    pub fn is_shape_rejection(&self) -> bool {
        matches!(self, Self::Status { status: 400 | 422, .. })
    }

    pub fn is_family_unavailable(&self) -> bool {
        matches!(self, Self::FamilyRouteUnavailable { .. })
    }
}

/// Extracts a user-friendly message from an error response body.
///
/// The backend is not consistent about its error envelope. The following
/// formats are recognised, in order:
///
/// ```json
/// {"message": "Human readable message"}
/// {"detail": "Human readable message"}
/// {"error": {"message": "Human readable message"}}
/// {"error": "Human readable message"}
/// {"errors": [{"message": "Human readable message"}]}
/// ```
///
/// If none match, the raw body is used; an empty body falls back to the
/// status code.
pub fn extract_error_message(status: u16, body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(message) = json.get("message").and_then(|m| m.as_str()) {
            return message.to_string();
        }

        // FastAPI style; `detail` may also be a list of validation errors
        if let Some(detail) = json.get("detail") {
            if let Some(text) = detail.as_str() {
                return text.to_string();
            }
            if let Some(msg) = detail
                .as_array()
                .and_then(|arr| arr.first())
                .and_then(|e| e.get("msg"))
                .and_then(|m| m.as_str())
            {
                return msg.to_string();
            }
        }

        if let Some(error) = json.get("error") {
            if let Some(message) = error.get("message").and_then(|m| m.as_str()) {
                return message.to_string();
            }
            if let Some(text) = error.as_str() {
                return text.to_string();
            }
        }

        if let Some(message) = json
            .get("errors")
            .and_then(|e| e.as_array())
            .and_then(|arr| arr.first())
            .and_then(|e| e.get("message"))
            .and_then(|m| m.as_str())
        {
            return message.to_string();
        }
    }

    let body = body.trim();
    if body.is_empty() {
        format!("HTTP {}", status)
    } else {
        body.to_string()
    }
}

/// A normalized successful response.
///
/// The body is always JSON; an empty response body becomes `null` and a
/// non-JSON body becomes a JSON string.
///
/// # Example
///
/// ```rust
/// use scribe_cli::api::common::ApiResponse;
/// use serde_json::json;
///
/// let response = ApiResponse::new(200, json!({"data": []}));
/// assert!(response.data().unwrap().as_array().unwrap().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    /// HTTP status code
    pub status: u16,
    /// Decoded response body
    pub body: serde_json::Value,
}

impl ApiResponse {
    pub fn new(status: u16, body: serde_json::Value) -> Self {
        Self { status, body }
    }

    /// Builds a response from raw body text.
    pub fn from_text(status: u16, text: &str) -> Self {
        let body = if text.trim().is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_str(text)
                .unwrap_or_else(|_| serde_json::Value::String(text.to_string()))
        };
        Self { status, body }
    }

    /// The payload, unwrapping a `{"data": ...}` envelope when present.
    pub fn data(&self) -> Option<&serde_json::Value> {
        match self.body.get("data") {
            Some(inner) => Some(inner),
            None if self.body.is_null() => None,
            None => Some(&self.body),
        }
    }

    /// Deserializes the (unwrapped) payload into `T`.
    pub fn json<T: DeserializeOwned>(&self) -> ApiResult<T> {
        let value = self.data().cloned().unwrap_or(serde_json::Value::Null);
        Ok(serde_json::from_value(value)?)
    }
}
