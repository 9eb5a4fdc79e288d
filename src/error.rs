// src/error.rs
//! Client error types with structured error handling.
//!
//! Error types form the vocabulary for failure modes in the client.
//! Each variant tells the story of what went wrong and where, enabling
//! pattern-based recovery without stringly-typed dispatch.

use crate::constants::{ERROR_BODY_PREVIEW_LENGTH, TOKEN_EXPIRED_PREFIX};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// TIDAL API failure kinds as a typed vocabulary.
///
/// Instead of matching against raw HTTP status codes at every call site,
/// the domain vocabulary is encoded in the type system. Each variant tells
/// you exactly what the service reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// The access token has expired — refresh and retry once
    AuthExpired,
    /// The requested object does not exist
    NotFound,
    /// Credentials lack permission for this resource
    AccessDenied,
    /// Rate limit exceeded — back off and retry later
    RateLimited,
    /// Request parameters failed the service's validation
    ValidationFailed,
    /// The service is temporarily unavailable
    Unavailable,
    /// HTTP status code fallback when no specific mapping applies
    Http(u16),
}

impl ApiErrorKind {
    /// Classifies an HTTP status code and (optional) parsed error body into
    /// the typed vocabulary.
    pub fn classify(status: u16, body: Option<&Value>) -> Self {
        if body.map(is_token_expired_body).unwrap_or(false) {
            return Self::AuthExpired;
        }
        match status {
            401 => Self::AuthExpired,
            403 => Self::AccessDenied,
            404 => Self::NotFound,
            400 | 422 => Self::ValidationFailed,
            429 => Self::RateLimited,
            500..=504 => Self::Unavailable,
            other => Self::Http(other),
        }
    }

    /// Whether this failure is transient and worth retrying later.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited | Self::Unavailable)
    }

    /// Whether this failure means the resource simply doesn't exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }

    /// Whether this failure is an expired access token.
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::AuthExpired)
    }
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AuthExpired => write!(f, "auth_expired"),
            Self::NotFound => write!(f, "not_found"),
            Self::AccessDenied => write!(f, "access_denied"),
            Self::RateLimited => write!(f, "rate_limited"),
            Self::ValidationFailed => write!(f, "validation_failed"),
            Self::Unavailable => write!(f, "unavailable"),
            Self::Http(code) => write!(f, "http_{}", code),
        }
    }
}

/// Main client error type.
#[derive(Error, Debug)]
pub enum TidalError {
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("A parser must be supplied: {0}")]
    MissingParser(String),

    #[error("Network failure: {0}")]
    NetworkFailure(#[from] reqwest::Error),

    /// A non-success response from the service, already classified.
    ///
    /// Carries the parsed error body so callers can introspect the exact
    /// response that failed without consulting shared mutable state.
    #[error("TIDAL API returned an error ({kind}, status {status}): {message}")]
    Api {
        kind: ApiErrorKind,
        status: u16,
        message: String,
        /// Parsed error body, when the response contained valid JSON.
        body: Option<Value>,
        /// Seconds to wait before retrying, from the `Retry-After` header.
        retry_after: Option<u64>,
    },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl TidalError {
    /// The classified failure kind, for `Api` errors.
    pub fn api_kind(&self) -> Option<&ApiErrorKind> {
        match self {
            Self::Api { kind, .. } => Some(kind),
            _ => None,
        }
    }

    /// The parsed error body the service returned, if any.
    pub fn error_body(&self) -> Option<&Value> {
        match self {
            Self::Api { body, .. } => body.as_ref(),
            _ => None,
        }
    }
}

// Allow converting from anyhow::Error, preserving the message.
impl From<anyhow::Error> for TidalError {
    fn from(err: anyhow::Error) -> Self {
        TidalError::Internal(err.to_string())
    }
}

impl From<serde_json::Error> for TidalError {
    fn from(err: serde_json::Error) -> Self {
        TidalError::MalformedResponse(err.to_string())
    }
}

/// Result type alias for convenience.
pub type Result<T, E = TidalError> = std::result::Result<T, E>;

/// Checks whether a parsed error body signals an expired access token.
///
/// The service reports expiry through a human-readable `userMessage`
/// beginning with a fixed sentence; there is no dedicated error code.
pub fn is_token_expired_body(body: &Value) -> bool {
    body.get("userMessage")
        .and_then(Value::as_str)
        .map(|msg| msg.starts_with(TOKEN_EXPIRED_PREFIX))
        .unwrap_or(false)
}

/// Extracts the most specific human-readable message from an error body.
///
/// The service uses two shapes: `{"errors": [{"detail": ...}]}` on the v2
/// surface and `{"userMessage": ...}` on v1.
pub fn error_body_message(body: &Value) -> Option<String> {
    if let Some(detail) = body
        .get("errors")
        .and_then(Value::as_array)
        .and_then(|errs| errs.first())
        .and_then(|e| e.get("detail"))
        .and_then(Value::as_str)
    {
        return Some(detail.to_string());
    }
    body.get("userMessage")
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Truncates a response body for log output.
pub(crate) fn body_preview(body: &str) -> String {
    if body.len() > ERROR_BODY_PREVIEW_LENGTH {
        let cut = body
            .char_indices()
            .take_while(|(i, _)| *i < ERROR_BODY_PREVIEW_LENGTH)
            .last()
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0);
        format!("{}...", &body[..cut])
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn classify_maps_statuses_to_kinds() {
        assert_eq!(ApiErrorKind::classify(404, None), ApiErrorKind::NotFound);
        assert_eq!(ApiErrorKind::classify(429, None), ApiErrorKind::RateLimited);
        assert_eq!(ApiErrorKind::classify(403, None), ApiErrorKind::AccessDenied);
        assert_eq!(
            ApiErrorKind::classify(400, None),
            ApiErrorKind::ValidationFailed
        );
        assert_eq!(ApiErrorKind::classify(503, None), ApiErrorKind::Unavailable);
        assert_eq!(ApiErrorKind::classify(418, None), ApiErrorKind::Http(418));
    }

    #[test]
    fn expired_token_body_wins_over_status() {
        let body = json!({ "userMessage": "The token has expired. (no session found)" });
        assert_eq!(
            ApiErrorKind::classify(401, Some(&body)),
            ApiErrorKind::AuthExpired
        );
        assert!(is_token_expired_body(&body));
        assert!(!is_token_expired_body(&json!({ "userMessage": "Nope" })));
    }

    #[test]
    fn error_body_message_prefers_detail() {
        let v2 = json!({ "errors": [{ "detail": "playlist not found" }] });
        assert_eq!(error_body_message(&v2).as_deref(), Some("playlist not found"));

        let v1 = json!({ "userMessage": "Asset is not available" });
        assert_eq!(
            error_body_message(&v1).as_deref(),
            Some("Asset is not available")
        );

        assert_eq!(error_body_message(&json!({})), None);
    }

    #[test]
    fn retryable_kinds() {
        assert!(ApiErrorKind::RateLimited.is_retryable());
        assert!(ApiErrorKind::Unavailable.is_retryable());
        assert!(!ApiErrorKind::NotFound.is_retryable());
    }
}
