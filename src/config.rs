// src/config.rs
//! Resolved session configuration — validated and ready to drive the
//! request layer and the paginator.

use crate::constants::{
    API_V1_LOCATION, API_V2_LOCATION, CLIENT_VERSION, DEFAULT_CHUNK_SIZE, DEFAULT_ITEM_LIMIT,
    DEFAULT_PAGE_WORKERS, DEFAULT_USER_AGENT, OAUTH_TOKEN_URL,
};
use std::time::Duration;

/// Configuration for a [`TidalSession`](crate::TidalSession).
///
/// Everything has a sensible default; overrides exist mostly for tests and
/// for pointing the client at a staging deployment.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Base URL for v1 catalog endpoints. Requests join their path onto this.
    pub api_v1_location: String,
    /// Base URL for v2 endpoints.
    pub api_v2_location: String,
    /// OAuth2 token endpoint used by the refresh-token grant.
    pub oauth_token_url: String,
    /// OAuth client id sent with refresh requests.
    pub client_id: Option<String>,
    /// OAuth client secret sent with refresh requests, when the grant needs one.
    pub client_secret: Option<String>,
    /// Default `limit` merged into every request's query parameters.
    pub item_limit: u32,
    /// Page size used by the parallel paginator.
    pub chunk_size: u32,
    /// Concurrent page fetches per pagination round.
    pub page_workers: usize,
    /// Per-request transport timeout.
    pub http_timeout: Duration,
    /// Value of the `User-Agent` header unless the caller supplies one.
    pub user_agent: String,
    /// Value of the `x-tidal-client-version` header.
    pub client_version: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            api_v1_location: API_V1_LOCATION.to_string(),
            api_v2_location: API_V2_LOCATION.to_string(),
            oauth_token_url: OAUTH_TOKEN_URL.to_string(),
            client_id: None,
            client_secret: None,
            item_limit: DEFAULT_ITEM_LIMIT,
            chunk_size: DEFAULT_CHUNK_SIZE,
            page_workers: DEFAULT_PAGE_WORKERS,
            http_timeout: Duration::from_secs(30),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            client_version: CLIENT_VERSION.to_string(),
        }
    }
}

impl SessionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the OAuth client id used by token refresh.
    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    /// Sets the OAuth client secret used by token refresh.
    pub fn with_client_secret(mut self, client_secret: impl Into<String>) -> Self {
        self.client_secret = Some(client_secret.into());
        self
    }

    /// Points the client at a different v1 API location.
    pub fn with_api_v1_location(mut self, location: impl Into<String>) -> Self {
        self.api_v1_location = location.into();
        self
    }

    /// Overrides pagination chunk size and worker count.
    pub fn with_pagination(mut self, chunk_size: u32, page_workers: usize) -> Self {
        self.chunk_size = chunk_size;
        self.page_workers = page_workers;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_operational_boundaries() {
        let config = SessionConfig::default();
        assert_eq!(config.chunk_size, DEFAULT_CHUNK_SIZE);
        assert_eq!(config.page_workers, DEFAULT_PAGE_WORKERS);
        assert_eq!(config.item_limit, DEFAULT_ITEM_LIMIT);
        assert!(config.api_v1_location.ends_with('/'));
    }

    #[test]
    fn builders_override_fields() {
        let config = SessionConfig::new()
            .with_client_id("abc")
            .with_pagination(25, 4);
        assert_eq!(config.client_id.as_deref(), Some("abc"));
        assert_eq!(config.chunk_size, 25);
        assert_eq!(config.page_workers, 4);
    }
}
