// src/favorites.rs
//! A user's favorites: tracks, videos, albums, artists, playlists, mixes.
//!
//! Single-page getters map straight through the collection mapper; the
//! `*_all` variants run the resilient parallel paginator on top of them.

use crate::api::{fetch_all, FetchOptions, Paginated, RequestClient};
use crate::error::Result;
use crate::model::{Album, Artist, Mix, Playlist, Track, Video};
use crate::types::{ItemOrder, OrderDirection};
use serde_json::Value;

/// Handle on one user's favorites collections.
#[derive(Clone)]
pub struct Favorites {
    client: RequestClient,
    base: String,
}

/// Builds the shared paging/ordering query parameters. Absent values
/// stay absent so the service applies its own defaults.
fn page_params(
    limit: Option<u32>,
    offset: u32,
    order: Option<ItemOrder>,
    direction: Option<OrderDirection>,
) -> Vec<(&'static str, Option<String>)> {
    vec![
        ("limit", limit.map(|l| l.to_string())),
        ("offset", Some(offset.to_string())),
        ("order", order.map(|o| o.as_str().to_string())),
        (
            "orderDirection",
            direction.map(|d| d.as_str().to_string()),
        ),
    ]
}

impl Favorites {
    pub(crate) fn new(client: RequestClient, user_id: u64) -> Self {
        Self {
            client,
            base: format!("users/{}/favorites", user_id),
        }
    }

    async fn collection<T>(
        &self,
        kind: &str,
        limit: Option<u32>,
        offset: u32,
        order: Option<ItemOrder>,
        direction: Option<OrderDirection>,
        parse: impl Fn(&Value) -> Result<T>,
    ) -> Result<Vec<T>> {
        let params = page_params(limit, offset, order, direction);
        let mapped = self
            .client
            .map_request(&format!("{}/{}", self.base, kind), &params, parse)
            .await?;
        Ok(mapped.into_collection())
    }

    /// Runs the parallel paginator over one favorites collection.
    async fn collection_all<T>(
        &self,
        kind: &str,
        order: Option<ItemOrder>,
        direction: Option<OrderDirection>,
        parse: impl Fn(&Value) -> Result<T> + Copy,
    ) -> Result<Paginated<T>> {
        let config = self.client.config();
        let options = FetchOptions {
            chunk_size: config.chunk_size,
            workers: config.page_workers,
            timeout: None,
        };
        fetch_all(
            |limit, offset| self.collection(kind, Some(limit), offset, order, direction, parse),
            Ok,
            options,
        )
        .await
    }

    pub async fn tracks(
        &self,
        limit: Option<u32>,
        offset: u32,
        order: Option<ItemOrder>,
        direction: Option<OrderDirection>,
    ) -> Result<Vec<Track>> {
        self.collection("tracks", limit, offset, order, direction, Track::parse)
            .await
    }

    pub async fn videos(
        &self,
        limit: Option<u32>,
        offset: u32,
        order: Option<ItemOrder>,
        direction: Option<OrderDirection>,
    ) -> Result<Vec<Video>> {
        self.collection("videos", limit, offset, order, direction, Video::parse)
            .await
    }

    pub async fn albums(
        &self,
        limit: Option<u32>,
        offset: u32,
        order: Option<ItemOrder>,
        direction: Option<OrderDirection>,
    ) -> Result<Vec<Album>> {
        self.collection("albums", limit, offset, order, direction, Album::parse)
            .await
    }

    pub async fn artists(
        &self,
        limit: Option<u32>,
        offset: u32,
        order: Option<ItemOrder>,
        direction: Option<OrderDirection>,
    ) -> Result<Vec<Artist>> {
        self.collection("artists", limit, offset, order, direction, Artist::parse)
            .await
    }

    pub async fn playlists(
        &self,
        limit: Option<u32>,
        offset: u32,
        order: Option<ItemOrder>,
        direction: Option<OrderDirection>,
    ) -> Result<Vec<Playlist>> {
        self.collection(
            "playlists",
            limit,
            offset,
            order,
            direction,
            Playlist::parse,
        )
        .await
    }

    pub async fn mixes(
        &self,
        limit: Option<u32>,
        offset: u32,
        order: Option<ItemOrder>,
        direction: Option<OrderDirection>,
    ) -> Result<Vec<Mix>> {
        self.collection("mixes", limit, offset, order, direction, Mix::parse)
            .await
    }

    /// All favorite tracks, fetched in parallel. Check
    /// [`Paginated::is_complete`] before treating the result as the full
    /// collection.
    pub async fn tracks_all(
        &self,
        order: Option<ItemOrder>,
        direction: Option<OrderDirection>,
    ) -> Result<Paginated<Track>> {
        self.collection_all("tracks", order, direction, Track::parse)
            .await
    }

    pub async fn albums_all(
        &self,
        order: Option<ItemOrder>,
        direction: Option<OrderDirection>,
    ) -> Result<Paginated<Album>> {
        self.collection_all("albums", order, direction, Album::parse)
            .await
    }

    pub async fn artists_all(
        &self,
        order: Option<ItemOrder>,
        direction: Option<OrderDirection>,
    ) -> Result<Paginated<Artist>> {
        self.collection_all("artists", order, direction, Artist::parse)
            .await
    }

    pub async fn playlists_all(
        &self,
        order: Option<ItemOrder>,
        direction: Option<OrderDirection>,
    ) -> Result<Paginated<Playlist>> {
        self.collection_all("playlists", order, direction, Playlist::parse)
            .await
    }

    pub async fn videos_all(
        &self,
        order: Option<ItemOrder>,
        direction: Option<OrderDirection>,
    ) -> Result<Paginated<Video>> {
        self.collection_all("videos", order, direction, Video::parse)
            .await
    }

    pub async fn mixes_all(
        &self,
        order: Option<ItemOrder>,
        direction: Option<OrderDirection>,
    ) -> Result<Paginated<Mix>> {
        self.collection_all("mixes", order, direction, Mix::parse)
            .await
    }

    pub async fn tracks_count(&self) -> Result<u64> {
        self.client
            .collection_count(&format!("{}/tracks", self.base))
            .await
    }

    pub async fn albums_count(&self) -> Result<u64> {
        self.client
            .collection_count(&format!("{}/albums", self.base))
            .await
    }

    pub async fn artists_count(&self) -> Result<u64> {
        self.client
            .collection_count(&format!("{}/artists", self.base))
            .await
    }

    pub async fn playlists_count(&self) -> Result<u64> {
        self.client
            .collection_count(&format!("{}/playlists", self.base))
            .await
    }

    pub async fn videos_count(&self) -> Result<u64> {
        self.client
            .collection_count(&format!("{}/videos", self.base))
            .await
    }

    pub async fn mixes_count(&self) -> Result<u64> {
        self.client
            .collection_count(&format!("{}/mixes", self.base))
            .await
    }

    /// Adds a track to the favorites.
    pub async fn add_track(&self, track_id: u64) -> Result<()> {
        self.client
            .post_form(
                &format!("{}/tracks", self.base),
                &[],
                &[("trackId", Some(track_id.to_string()))],
            )
            .await?;
        Ok(())
    }

    pub async fn add_album(&self, album_id: u64) -> Result<()> {
        self.client
            .post_form(
                &format!("{}/albums", self.base),
                &[],
                &[("albumId", Some(album_id.to_string()))],
            )
            .await?;
        Ok(())
    }

    pub async fn add_artist(&self, artist_id: u64) -> Result<()> {
        self.client
            .post_form(
                &format!("{}/artists", self.base),
                &[],
                &[("artistId", Some(artist_id.to_string()))],
            )
            .await?;
        Ok(())
    }

    /// Adds a video. The service wants an explicit page limit on this
    /// endpoint, unlike the other media mutations.
    pub async fn add_video(&self, video_id: u64) -> Result<()> {
        self.client
            .post_form(
                &format!("{}/videos", self.base),
                &[("limit", Some("100".to_string()))],
                &[("videoIds", Some(video_id.to_string()))],
            )
            .await?;
        Ok(())
    }

    /// Adds a playlist to the favorites (v2 endpoint; arguments travel as
    /// query parameters).
    pub async fn add_playlist(&self, uuid: &str) -> Result<()> {
        let base = self.client.config().api_v2_location.clone();
        self.client
            .put(
                "my-collection/playlists/folders/add-favorites",
                &[
                    ("folderId", Some("root".to_string())),
                    ("uuids", Some(uuid.to_string())),
                ],
                Some(&base),
            )
            .await?;
        Ok(())
    }

    /// Adds a mix or radio to the favorites (v2 endpoint).
    pub async fn add_mix(&self, mix_id: &str) -> Result<()> {
        let base = self.client.config().api_v2_location.clone();
        self.client
            .put(
                "favorites/mixes/add",
                &[
                    ("mixIds", Some(mix_id.to_string())),
                    ("onArtifactNotFound", Some("FAIL".to_string())),
                ],
                Some(&base),
            )
            .await?;
        Ok(())
    }

    pub async fn remove_track(&self, track_id: u64) -> Result<()> {
        self.client
            .delete(&format!("{}/tracks/{}", self.base, track_id), &[])
            .await?;
        Ok(())
    }

    pub async fn remove_album(&self, album_id: u64) -> Result<()> {
        self.client
            .delete(&format!("{}/albums/{}", self.base, album_id), &[])
            .await?;
        Ok(())
    }

    pub async fn remove_artist(&self, artist_id: u64) -> Result<()> {
        self.client
            .delete(&format!("{}/artists/{}", self.base, artist_id), &[])
            .await?;
        Ok(())
    }

    pub async fn remove_video(&self, video_id: u64) -> Result<()> {
        self.client
            .delete(&format!("{}/videos/{}", self.base, video_id), &[])
            .await?;
        Ok(())
    }

    /// Removes a playlist from the favorites (v2 endpoint; the playlist is
    /// addressed by a `trn:playlist:` resource name).
    pub async fn remove_playlist(&self, uuid: &str) -> Result<()> {
        let base = self.client.config().api_v2_location.clone();
        self.client
            .put(
                "my-collection/playlists/folders/remove",
                &[("trns", Some(format!("trn:playlist:{}", uuid)))],
                Some(&base),
            )
            .await?;
        Ok(())
    }

    pub async fn remove_mix(&self, mix_id: &str) -> Result<()> {
        let base = self.client.config().api_v2_location.clone();
        self.client
            .put(
                "favorites/mixes/remove",
                &[
                    ("mixIds", Some(mix_id.to_string())),
                    ("onArtifactNotFound", Some("FAIL".to_string())),
                ],
                Some(&base),
            )
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_order_params_stay_absent() {
        let params = page_params(Some(10), 50, None, None);
        assert_eq!(params[0], ("limit", Some("10".to_string())));
        assert_eq!(params[1], ("offset", Some("50".to_string())));
        assert_eq!(params[2], ("order", None));
        assert_eq!(params[3], ("orderDirection", None));
    }

    #[test]
    fn order_params_use_service_spelling() {
        let params = page_params(
            None,
            0,
            Some(ItemOrder::Date),
            Some(OrderDirection::Descending),
        );
        assert_eq!(params[2], ("order", Some("DATE".to_string())));
        assert_eq!(params[3], ("orderDirection", Some("DESC".to_string())));
    }
}
