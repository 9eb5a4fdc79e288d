// src/api/client.rs
//! Authenticated request layer.
//!
//! Wraps a [`Transport`] and takes care of everything a raw call needs:
//! session parameter merging, client-identity headers, the bearer token,
//! the one-shot refresh-and-retry on token expiry, and mapping non-2xx
//! outcomes into the typed error vocabulary. The error value carries the
//! parsed error body, so there is no shared "latest error" state to race
//! on.

use super::mapper::{map_json, Mapped};
use super::session::SessionState;
use super::{Transport, TransportRequest, TransportResponse};
use crate::config::SessionConfig;
use crate::error::{
    body_preview, error_body_message, is_token_expired_body, ApiErrorKind, Result, TidalError,
};
use crate::types::Credentials;
use reqwest::Method;
use serde_json::Value;
use std::sync::Arc;
use url::Url;

/// Caller-supplied query or form parameters.
///
/// `None` values are dropped before the request is sent — the service
/// prefers its defaults over explicit empty values.
pub type Params<'a> = &'a [(&'a str, Option<String>)];

/// The authenticated request layer above the transport seam.
#[derive(Clone)]
pub struct RequestClient {
    transport: Arc<dyn Transport>,
    config: SessionConfig,
    state: Arc<SessionState>,
}

impl RequestClient {
    pub fn new(transport: Arc<dyn Transport>, config: SessionConfig) -> Self {
        Self {
            transport,
            config,
            state: Arc::new(SessionState::new()),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn credentials(&self) -> Option<Credentials> {
        self.state.credentials()
    }

    /// Installs (or replaces) the session credentials.
    pub fn set_credentials(&self, credentials: Credentials) {
        self.state.set_credentials(Some(credentials));
    }

    /// Drops the session credentials; subsequent requests go out unauthenticated.
    pub fn clear_credentials(&self) {
        self.state.set_credentials(None);
    }

    /// Builds one fully-specified call: URL joined onto the base location,
    /// fixed session parameters merged with caller parameters, identity
    /// and authorization headers injected.
    fn build_request(
        &self,
        method: &Method,
        path: &str,
        params: Params<'_>,
        form: Params<'_>,
        headers: &[(&str, &str)],
        base_url: Option<&str>,
    ) -> Result<TransportRequest> {
        let base = base_url.unwrap_or(&self.config.api_v1_location);
        let url = Url::parse(base)
            .and_then(|b| b.join(path))
            .map_err(|e| TidalError::Internal(format!("invalid request URL {:?}: {}", path, e)))?;

        let credentials = self.state.credentials();

        // Fixed session parameters first; caller values override by key,
        // and None-valued caller params are dropped, never sent.
        let mut query: Vec<(String, String)> = Vec::new();
        if let Some(creds) = &credentials {
            if let Some(session_id) = &creds.session_id {
                query.push(("sessionId".to_string(), session_id.clone()));
            }
            if let Some(country_code) = &creds.country_code {
                query.push(("countryCode".to_string(), country_code.clone()));
            }
        }
        query.push(("limit".to_string(), self.config.item_limit.to_string()));
        for (key, value) in params {
            if let Some(value) = value {
                query.retain(|(k, _)| k != key);
                query.push((key.to_string(), value.clone()));
            }
        }

        let form: Vec<(String, String)> = form
            .iter()
            .filter_map(|(k, v)| v.as_ref().map(|v| (k.to_string(), v.clone())))
            .collect();

        let mut all_headers: Vec<(String, String)> = headers
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let has_header = |headers: &[(String, String)], name: &str| {
            headers.iter().any(|(k, _)| k.eq_ignore_ascii_case(name))
        };
        if !has_header(&all_headers, "x-tidal-client-version") {
            all_headers.push((
                "x-tidal-client-version".to_string(),
                self.config.client_version.clone(),
            ));
        }
        if !has_header(&all_headers, "user-agent") {
            all_headers.push(("User-Agent".to_string(), self.config.user_agent.clone()));
        }
        if let Some(creds) = &credentials {
            all_headers.retain(|(k, _)| !k.eq_ignore_ascii_case("authorization"));
            all_headers.push(("authorization".to_string(), creds.authorization()));
        }

        Ok(TransportRequest {
            method: method.clone(),
            url: url.to_string(),
            query,
            form,
            headers: all_headers,
        })
    }

    /// Performs a single attempt: build, dispatch, no refresh, no mapping.
    pub async fn basic_request(
        &self,
        method: Method,
        path: &str,
        params: Params<'_>,
        form: Params<'_>,
        headers: &[(&str, &str)],
        base_url: Option<&str>,
    ) -> Result<TransportResponse> {
        let request = self.build_request(&method, path, params, form, headers, base_url)?;
        self.transport.call(request).await
    }

    /// Performs an authenticated request with the full contract: merged
    /// parameters, identity headers, at most one refresh-and-retry on
    /// token expiry, and error mapping on the final non-2xx outcome.
    ///
    /// The retry is an explicit second phase, not a recursive call: the
    /// request is rebuilt so the freshly-obtained token is picked up, and
    /// a second expiry inside the retry maps to an error like any other
    /// failure.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        params: Params<'_>,
        form: Params<'_>,
        headers: &[(&str, &str)],
        base_url: Option<&str>,
    ) -> Result<TransportResponse> {
        let observed_generation = self.state.generation();
        let response = self
            .basic_request(method.clone(), path, params, form, headers, base_url)
            .await?;
        if response.is_success() {
            return Ok(response);
        }

        let body = response.json();
        let expired = body.as_ref().map(is_token_expired_body).unwrap_or(false);
        let has_refresh_token = self
            .state
            .credentials()
            .and_then(|c| c.refresh_token)
            .is_some();

        if expired && has_refresh_token {
            log::debug!("The access token has expired, trying to refresh it");
            let refreshed = self
                .state
                .refresh(self.transport.as_ref(), &self.config, observed_generation)
                .await?;
            if refreshed {
                let retry = self
                    .basic_request(method, path, params, form, headers, base_url)
                    .await?;
                if retry.is_success() {
                    return Ok(retry);
                }
                return Err(map_api_failure(&retry));
            }
        } else {
            log::debug!("HTTP error on {}", response.status);
            log::debug!("Response text: {}", body_preview(&response.body));
        }

        Err(map_api_failure(&response))
    }

    /// GET convenience over [`RequestClient::request`].
    pub async fn get(&self, path: &str, params: Params<'_>) -> Result<TransportResponse> {
        self.request(Method::GET, path, params, &[], &[], None).await
    }

    /// POST with a form body.
    pub async fn post_form(
        &self,
        path: &str,
        params: Params<'_>,
        form: Params<'_>,
    ) -> Result<TransportResponse> {
        self.request(Method::POST, path, params, form, &[], None).await
    }

    /// PUT convenience. The v2 mutation endpoints take their arguments as
    /// query parameters, so this carries no form body.
    pub async fn put(
        &self,
        path: &str,
        params: Params<'_>,
        base_url: Option<&str>,
    ) -> Result<TransportResponse> {
        self.request(Method::PUT, path, params, &[], &[], base_url)
            .await
    }

    /// DELETE convenience.
    pub async fn delete(&self, path: &str, params: Params<'_>) -> Result<TransportResponse> {
        self.request(Method::DELETE, path, params, &[], &[], None)
            .await
    }

    /// GET + JSON body.
    pub async fn request_json(&self, path: &str, params: Params<'_>) -> Result<Value> {
        let response = self.get(path, params).await?;
        serde_json::from_str(&response.body).map_err(|e| {
            log::error!("Failed to parse response from {}: {}", path, e);
            TidalError::MalformedResponse(format!(
                "{} (body: {})",
                e,
                body_preview(&response.body)
            ))
        })
    }

    /// Reads a collection's total size from a minimal probe page.
    ///
    /// Paged endpoints report `totalNumberOfItems` on every page, so a
    /// `limit=1` request is enough to learn the count without fetching
    /// the collection.
    pub async fn collection_count(&self, path: &str) -> Result<u64> {
        let json = self
            .request_json(
                path,
                &[
                    ("limit", Some("1".to_string())),
                    ("offset", Some("0".to_string())),
                ],
            )
            .await?;
        json.get("totalNumberOfItems")
            .and_then(Value::as_u64)
            .ok_or_else(|| {
                TidalError::MalformedResponse(format!(
                    "{}: no totalNumberOfItems in page",
                    path
                ))
            })
    }

    /// Fetches `path` and maps the page through the collection mapper
    /// with a uniform parse function.
    pub async fn map_request<T>(
        &self,
        path: &str,
        params: Params<'_>,
        parse: impl Fn(&Value) -> Result<T>,
    ) -> Result<Mapped<T>> {
        let json = self.request_json(path, params).await?;
        map_json(&json, parse)
    }
}

/// Maps a final non-success response to a domain error, carrying the
/// parsed error body and any `Retry-After` hint along.
fn map_api_failure(response: &TransportResponse) -> TidalError {
    let status = response.status.as_u16();
    let body = response.json();
    let kind = ApiErrorKind::classify(status, body.as_ref());
    let message = body
        .as_ref()
        .and_then(error_body_message)
        .unwrap_or_else(|| format!("HTTP {}", response.status));

    log::info!("Request failed ({}): {}", kind, message);

    TidalError::Api {
        kind,
        status,
        message,
        body,
        retry_after: response.retry_after(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct NoopTransport;

    #[async_trait::async_trait]
    impl Transport for NoopTransport {
        async fn call(&self, _request: TransportRequest) -> Result<TransportResponse> {
            Ok(TransportResponse {
                status: reqwest::StatusCode::OK,
                headers: HashMap::new(),
                body: "{}".to_string(),
            })
        }
    }

    fn test_client() -> RequestClient {
        RequestClient::new(Arc::new(NoopTransport), SessionConfig::default())
    }

    fn test_credentials() -> Credentials {
        Credentials {
            token_type: "Bearer".to_string(),
            access_token: "tok".to_string(),
            refresh_token: Some("refresh".to_string()),
            session_id: Some("sess-1".to_string()),
            country_code: Some("NO".to_string()),
        }
    }

    #[test]
    fn none_params_are_dropped_and_some_override_defaults() {
        let client = test_client();
        client.set_credentials(test_credentials());

        let request = client
            .build_request(
                &Method::GET,
                "playlists/abc/tracks",
                &[
                    ("limit", Some("10".to_string())),
                    ("order", None),
                    ("offset", Some("50".to_string())),
                ],
                &[],
                &[],
                None,
            )
            .unwrap();

        let get = |key: &str| {
            request
                .query
                .iter()
                .filter(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
                .collect::<Vec<_>>()
        };
        assert_eq!(get("limit"), vec!["10"]);
        assert_eq!(get("offset"), vec!["50"]);
        assert_eq!(get("sessionId"), vec!["sess-1"]);
        assert_eq!(get("countryCode"), vec!["NO"]);
        assert!(get("order").is_empty());
    }

    #[test]
    fn identity_headers_injected_unless_supplied() {
        let client = test_client();
        client.set_credentials(test_credentials());

        let request = client
            .build_request(&Method::GET, "tracks/1", &[], &[], &[], None)
            .unwrap();
        let header = |name: &str| {
            request
                .headers
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(name))
                .map(|(_, v)| v.clone())
        };
        assert_eq!(
            header("x-tidal-client-version").as_deref(),
            Some(crate::constants::CLIENT_VERSION)
        );
        assert!(header("user-agent").is_some());
        assert_eq!(header("authorization").as_deref(), Some("Bearer tok"));

        // Caller-supplied identity headers win.
        let request = client
            .build_request(
                &Method::GET,
                "tracks/1",
                &[],
                &[],
                &[("User-Agent", "custom/1.0")],
                None,
            )
            .unwrap();
        let user_agents: Vec<_> = request
            .headers
            .iter()
            .filter(|(k, _)| k.eq_ignore_ascii_case("user-agent"))
            .collect();
        assert_eq!(user_agents.len(), 1);
        assert_eq!(user_agents[0].1, "custom/1.0");
    }

    #[test]
    fn paths_join_onto_the_base_location() {
        let client = test_client();
        let request = client
            .build_request(&Method::GET, "users/42/favorites/tracks", &[], &[], &[], None)
            .unwrap();
        assert_eq!(
            request.url,
            "https://api.tidal.com/v1/users/42/favorites/tracks"
        );

        let request = client
            .build_request(
                &Method::GET,
                "my-collection/playlists/folders",
                &[],
                &[],
                &[],
                Some("https://api.tidal.com/v2/"),
            )
            .unwrap();
        assert!(request.url.starts_with("https://api.tidal.com/v2/"));
    }

    #[test]
    fn unauthenticated_requests_carry_no_authorization() {
        let client = test_client();
        let request = client
            .build_request(&Method::GET, "tracks/1", &[], &[], &[], None)
            .unwrap();
        assert!(!request
            .headers
            .iter()
            .any(|(k, _)| k.eq_ignore_ascii_case("authorization")));
    }
}
