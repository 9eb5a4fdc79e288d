// src/session.rs
//! The long-lived session: configuration, transport, credentials, and
//! the entry points into the catalog surfaces.

use crate::api::{HttpTransport, RequestClient, Transport};
use crate::config::SessionConfig;
use crate::error::{Result, TidalError};
use crate::favorites::Favorites;
use crate::model::Playlist;
use crate::playlist::PlaylistHandle;
use crate::types::Credentials;
use reqwest::Method;
use std::sync::Arc;

/// A TIDAL client session.
///
/// Cheap to clone; clones share credentials, so a token refresh in one
/// clone is visible to all.
#[derive(Clone)]
pub struct TidalSession {
    client: RequestClient,
}

impl TidalSession {
    /// Creates a session with the production HTTP transport.
    pub fn new(config: SessionConfig) -> Result<Self> {
        let transport = HttpTransport::new(config.http_timeout)?;
        Ok(Self {
            client: RequestClient::new(Arc::new(transport), config),
        })
    }

    /// Creates a session over an arbitrary transport. This is how tests
    /// drive the full stack without a network.
    pub fn with_transport(transport: Arc<dyn Transport>, config: SessionConfig) -> Self {
        Self {
            client: RequestClient::new(transport, config),
        }
    }

    /// Installs previously obtained credentials.
    pub fn load_credentials(&self, credentials: Credentials) {
        log::debug!("Loading session credentials");
        self.client.set_credentials(credentials);
    }

    /// Forgets the credentials; the session continues unauthenticated.
    pub fn logout(&self) {
        log::debug!("Clearing session credentials");
        self.client.clear_credentials();
    }

    pub fn is_logged_in(&self) -> bool {
        self.client.credentials().is_some()
    }

    /// The request layer, for endpoints this crate has no typed surface for.
    pub fn client(&self) -> &RequestClient {
        &self.client
    }

    /// A user's favorites collections.
    pub fn favorites(&self, user_id: u64) -> Favorites {
        Favorites::new(self.client.clone(), user_id)
    }

    /// A playlist handle, keyed by UUID.
    pub fn playlist(&self, uuid: &str) -> PlaylistHandle {
        PlaylistHandle::new(self.client.clone(), uuid)
    }

    /// Creates a playlist in the user's root folder and returns it.
    pub async fn create_playlist(&self, title: &str, description: &str) -> Result<Playlist> {
        let base = self.client.config().api_v2_location.clone();
        let response = self
            .client
            .request(
                Method::PUT,
                "my-collection/playlists/folders/create-playlist",
                &[
                    ("name", Some(title.to_string())),
                    ("description", Some(description.to_string())),
                    ("folderId", Some("root".to_string())),
                ],
                &[],
                &[],
                Some(&base),
            )
            .await?;
        let data = response
            .json()
            .and_then(|json| json.get("data").cloned())
            .filter(|data| data.get("uuid").is_some())
            .ok_or_else(|| {
                TidalError::MalformedResponse(
                    "no playlist in creation response".to_string(),
                )
            })?;
        Playlist::parse(&data)
    }

    /// One page of the playlists a user owns.
    pub async fn user_playlists(&self, user_id: u64) -> Result<Vec<Playlist>> {
        let mapped = self
            .client
            .map_request(
                &format!("users/{}/playlists", user_id),
                &[],
                Playlist::parse,
            )
            .await?;
        Ok(mapped.into_collection())
    }
}
