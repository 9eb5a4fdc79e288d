// src/playlist.rs
//! Playlist contents and management.
//!
//! `tracks` is the homogeneous view; `items` is the heterogeneous one
//! (a playlist can interleave tracks and videos), mapped per-item by the
//! declared type tag. Mutations address items by index and guard against
//! concurrent edits with the playlist's ETag via `If-None-Match`.

use crate::api::{
    fetch_all, map_json_typed, CatalogResolver, FetchOptions, Mapped, Paginated, RequestClient,
};
use crate::error::{Result, TidalError};
use crate::model::{CatalogItem, Playlist, Track};
use crate::types::{ItemOrder, OrderDirection};
use reqwest::Method;
use serde_json::Value;

/// Handle on one playlist, keyed by its UUID.
#[derive(Clone)]
pub struct PlaylistHandle {
    client: RequestClient,
    base: String,
}

impl PlaylistHandle {
    pub(crate) fn new(client: RequestClient, uuid: &str) -> Self {
        Self {
            client,
            base: format!("playlists/{}", uuid),
        }
    }

    /// Fetches the playlist metadata.
    pub async fn get(&self) -> Result<Playlist> {
        match self
            .client
            .map_request(&self.base, &[], Playlist::parse)
            .await?
        {
            Mapped::Single(playlist) => Ok(playlist),
            Mapped::Collection(_) => Err(TidalError::MalformedResponse(format!(
                "{}: expected a single object",
                self.base
            ))),
        }
    }

    /// One page of the playlist's tracks.
    pub async fn tracks(
        &self,
        limit: Option<u32>,
        offset: u32,
        order: Option<ItemOrder>,
        direction: Option<OrderDirection>,
    ) -> Result<Vec<Track>> {
        let params = [
            ("limit", limit.map(|l| l.to_string())),
            ("offset", Some(offset.to_string())),
            ("order", order.map(|o| o.as_str().to_string())),
            (
                "orderDirection",
                direction.map(|d| d.as_str().to_string()),
            ),
        ];
        let mapped = self
            .client
            .map_request(&format!("{}/tracks", self.base), &params, Track::parse)
            .await?;
        Ok(mapped.into_collection())
    }

    /// One page of the playlist's items: tracks and videos interleaved,
    /// each parsed by its declared type tag.
    pub async fn items(&self, limit: Option<u32>, offset: u32) -> Result<Vec<CatalogItem>> {
        let params = [
            ("limit", limit.map(|l| l.to_string())),
            ("offset", Some(offset.to_string())),
        ];
        let json = self
            .client
            .request_json(&format!("{}/items", self.base), &params)
            .await?;
        map_json_typed(&json, &CatalogResolver)
    }

    /// All tracks, fetched in parallel. Check
    /// [`Paginated::is_complete`] before treating the result as the full
    /// playlist.
    pub async fn tracks_all(
        &self,
        order: Option<ItemOrder>,
        direction: Option<OrderDirection>,
    ) -> Result<Paginated<Track>> {
        let config = self.client.config();
        let options = FetchOptions {
            chunk_size: config.chunk_size,
            workers: config.page_workers,
            timeout: None,
        };
        fetch_all(
            |limit, offset| self.tracks(Some(limit), offset, order, direction),
            Ok,
            options,
        )
        .await
    }

    /// All items (tracks and videos), fetched in parallel.
    pub async fn items_all(&self) -> Result<Paginated<CatalogItem>> {
        let config = self.client.config();
        let options = FetchOptions {
            chunk_size: config.chunk_size,
            workers: config.page_workers,
            timeout: None,
        };
        fetch_all(
            |limit, offset| self.items(Some(limit), offset),
            Ok,
            options,
        )
        .await
    }

    pub async fn tracks_count(&self) -> Result<u64> {
        self.client
            .collection_count(&format!("{}/tracks", self.base))
            .await
    }

    pub async fn items_count(&self) -> Result<u64> {
        self.client
            .collection_count(&format!("{}/items", self.base))
            .await
    }

    /// The playlist's current ETag, read fresh before every mutation so
    /// the `If-None-Match` guard reflects the latest known revision.
    async fn etag(&self) -> Result<Option<String>> {
        let response = self.client.get(&self.base, &[]).await?;
        Ok(response.header("etag").map(str::to_string))
    }

    /// Updates the playlist title and/or description. `None` leaves the
    /// field untouched server-side.
    pub async fn edit(&self, title: Option<&str>, description: Option<&str>) -> Result<()> {
        self.client
            .post_form(
                &self.base,
                &[],
                &[
                    ("title", title.map(str::to_string)),
                    ("description", description.map(str::to_string)),
                ],
            )
            .await?;
        Ok(())
    }

    /// Appends (or inserts at `position`) tracks to the playlist. Returns
    /// the ids the service actually added; duplicates are skipped unless
    /// `allow_duplicates`.
    pub async fn add_tracks(
        &self,
        track_ids: &[u64],
        position: Option<u32>,
        allow_duplicates: bool,
    ) -> Result<Vec<u64>> {
        let etag = self.etag().await?;
        let headers: Vec<(&str, &str)> = etag
            .as_deref()
            .map(|e| ("If-None-Match", e))
            .into_iter()
            .collect();
        let ids = track_ids
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(",");
        let form = [
            ("onArtifactNotFound", Some("SKIP".to_string())),
            ("trackIds", Some(ids)),
            ("toIndex", position.map(|p| p.to_string())),
            (
                "onDupes",
                Some(if allow_duplicates { "ADD" } else { "SKIP" }.to_string()),
            ),
        ];
        let response = self
            .client
            .request(
                Method::POST,
                &format!("{}/items", self.base),
                &[],
                &form,
                &headers,
                None,
            )
            .await?;
        let added = response
            .json()
            .and_then(|json| {
                json.get("addedItemIds")
                    .and_then(Value::as_array)
                    .map(|ids| ids.iter().filter_map(Value::as_u64).collect())
            })
            .unwrap_or_default();
        Ok(added)
    }

    /// Removes the items at the given positions.
    pub async fn remove_by_indices(&self, indices: &[u32]) -> Result<()> {
        let etag = self.etag().await?;
        let headers: Vec<(&str, &str)> = etag
            .as_deref()
            .map(|e| ("If-None-Match", e))
            .into_iter()
            .collect();
        let joined = indices
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(",");
        self.client
            .request(
                Method::DELETE,
                &format!("{}/items/{}", self.base, joined),
                &[],
                &[],
                &headers,
                None,
            )
            .await?;
        Ok(())
    }

    /// Removes the first occurrence of a track by its media id. Returns
    /// `false` when the track is not in the playlist.
    pub async fn remove_by_id(&self, media_id: u64) -> Result<bool> {
        let tracks = self.tracks(None, 0, None, None).await?;
        match tracks.iter().position(|t| t.id == media_id) {
            Some(index) => {
                self.remove_by_indices(&[index as u32]).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Moves the items at the given positions to `position`.
    pub async fn move_by_indices(&self, indices: &[u32], position: u32) -> Result<()> {
        let etag = self.etag().await?;
        let headers: Vec<(&str, &str)> = etag
            .as_deref()
            .map(|e| ("If-None-Match", e))
            .into_iter()
            .collect();
        let joined = indices
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(",");
        self.client
            .request(
                Method::POST,
                &format!("{}/items/{}", self.base, joined),
                &[],
                &[("toIndex", Some(position.to_string()))],
                &headers,
                None,
            )
            .await?;
        Ok(())
    }

    /// Moves a track to `position` by its media id. Returns `false` when
    /// the track is not in the playlist.
    pub async fn move_by_id(&self, media_id: u64, position: u32) -> Result<bool> {
        let tracks = self.tracks(None, 0, None, None).await?;
        match tracks.iter().position(|t| t.id == media_id) {
            Some(index) => {
                self.move_by_indices(&[index as u32], position).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Empties the playlist, removing items in chunks from the front.
    pub async fn clear(&self) -> Result<()> {
        let chunk = self.client.config().chunk_size as u64;
        loop {
            let count = self.tracks_count().await?;
            if count == 0 {
                return Ok(());
            }
            let indices: Vec<u32> = (0..count.min(chunk) as u32).collect();
            self.remove_by_indices(&indices).await?;
        }
    }

    /// Deletes the playlist itself.
    pub async fn delete(&self) -> Result<()> {
        self.client.delete(&self.base, &[]).await?;
        Ok(())
    }
}
