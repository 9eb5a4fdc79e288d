// src/api/mod.rs
//! TIDAL API interaction — the request layer, the collection mapper,
//! and the parallel paginator.
//!
//! This module keeps a clear separation between I/O (the [`Transport`]
//! seam and the authenticated request layer), parsing (the mapper), and
//! orchestration (the paginator). Business logic depends on the
//! [`Transport`] trait, never on HTTP details.

pub mod client;
pub mod mapper;
pub mod paginator;
pub(crate) mod session;
pub mod transport;

use crate::error::Result;
use reqwest::{Method, StatusCode};
use serde_json::Value;
use std::collections::HashMap;

/// One fully-specified HTTP call, ready for a transport to execute.
///
/// Immutable once constructed; the request layer builds a fresh one for
/// the retry after a token refresh so the new authorization header is
/// picked up.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub method: Method,
    /// Absolute URL (base location already joined with the endpoint path).
    pub url: String,
    pub query: Vec<(String, String)>,
    /// Form-encoded body fields. Empty means no body.
    pub form: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
}

/// What a transport hands back: status, headers, and the raw body.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: StatusCode,
    /// Response headers with lower-cased names.
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Parses the body as JSON, if it is valid JSON at all.
    pub fn json(&self) -> Option<Value> {
        serde_json::from_str(&self.body).ok()
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    /// Seconds from the `Retry-After` header, when present and numeric.
    pub fn retry_after(&self) -> Option<u64> {
        self.header("retry-after").and_then(|v| v.trim().parse().ok())
    }
}

/// The ability to perform a single HTTP call.
///
/// This is the transport adapter boundary: DNS, TLS, connection pooling
/// and per-call timeouts live behind it. It is also the seam tests mock.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn call(&self, request: TransportRequest) -> Result<TransportResponse>;
}

// Re-export the public interface
pub use client::RequestClient;
pub use mapper::{map_json, map_json_typed, CatalogResolver, Mapped, TypeResolver};
pub use paginator::{fetch_all, FetchOptions, PageFailure, Paginated};
pub use transport::HttpTransport;
