// src/api/session.rs
//! Shared credential state and the single-flight token refresh.
//!
//! Credentials are shared, mutable, single-writer-on-refresh state.
//! Concurrent requests may all discover an expired token at the same
//! time; the generation counter plus the async gate ensure exactly one
//! refresh call happens and every waiter retries with the fresh token.

use super::{Transport, TransportRequest};
use crate::config::SessionConfig;
use crate::error::{Result, TidalError};
use crate::types::Credentials;
use parking_lot::RwLock;
use reqwest::Method;
use serde::Deserialize;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex as AsyncMutex;

/// Successful response from the OAuth2 token endpoint.
#[derive(Debug, Deserialize)]
struct RefreshResponse {
    access_token: String,
    #[serde(default)]
    token_type: Option<String>,
}

pub(crate) struct SessionState {
    credentials: RwLock<Option<Credentials>>,
    /// Serializes refresh attempts. Held across the refresh network call,
    /// so it must be an async mutex.
    refresh_gate: AsyncMutex<()>,
    /// Bumped on every successful refresh. A request that observed
    /// generation N and then failed can tell whether someone else already
    /// refreshed while it waited for the gate.
    generation: AtomicU64,
}

impl SessionState {
    pub(crate) fn new() -> Self {
        Self {
            credentials: RwLock::new(None),
            refresh_gate: AsyncMutex::new(()),
            generation: AtomicU64::new(0),
        }
    }

    pub(crate) fn credentials(&self) -> Option<Credentials> {
        self.credentials.read().clone()
    }

    pub(crate) fn set_credentials(&self, credentials: Option<Credentials>) {
        *self.credentials.write() = credentials;
    }

    pub(crate) fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Refreshes the access token, at most once per expiry observation.
    ///
    /// `observed_generation` is the generation the caller saw when its
    /// request failed. Returns `true` when the caller should retry with
    /// refreshed credentials (whether this call or a concurrent one did
    /// the refreshing), `false` when no refresh was possible.
    pub(crate) async fn refresh(
        &self,
        transport: &dyn Transport,
        config: &SessionConfig,
        observed_generation: u64,
    ) -> Result<bool> {
        let _gate = self.refresh_gate.lock().await;

        // A concurrent request already refreshed while we waited.
        if self.generation() != observed_generation {
            log::debug!("Token already refreshed by a concurrent request");
            return Ok(true);
        }

        let Some(current) = self.credentials() else {
            return Ok(false);
        };
        let Some(refresh_token) = current.refresh_token.clone() else {
            return Ok(false);
        };
        let Some(client_id) = config.client_id.clone() else {
            log::warn!("Cannot refresh token: no client_id configured");
            return Ok(false);
        };

        let mut form = vec![
            ("client_id".to_string(), client_id),
            ("grant_type".to_string(), "refresh_token".to_string()),
            ("refresh_token".to_string(), refresh_token),
        ];
        if let Some(secret) = config.client_secret.clone() {
            form.push(("client_secret".to_string(), secret));
        }

        log::debug!("Refreshing access token");
        let response = transport
            .call(TransportRequest {
                method: Method::POST,
                url: config.oauth_token_url.clone(),
                query: vec![],
                form,
                headers: vec![],
            })
            .await?;

        if !response.is_success() {
            log::warn!(
                "Token refresh failed with status {}: {}",
                response.status,
                crate::error::body_preview(&response.body)
            );
            return Ok(false);
        }

        let refreshed: RefreshResponse = serde_json::from_str(&response.body)
            .map_err(|e| TidalError::MalformedResponse(format!("token response: {}", e)))?;

        {
            let mut guard = self.credentials.write();
            if let Some(creds) = guard.as_mut() {
                creds.access_token = refreshed.access_token;
                if let Some(token_type) = refreshed.token_type {
                    creds.token_type = token_type;
                }
            }
        }
        self.generation.fetch_add(1, Ordering::AcqRel);
        log::debug!("Access token refreshed");

        Ok(true)
    }
}
