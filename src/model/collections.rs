// src/model/collections.rs
//! Catalog collections: albums, artists, playlists, and mixes.

use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An album.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub number_of_tracks: Option<u32>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub date_added: Option<DateTime<Utc>>,
}

impl Album {
    pub fn parse(value: &Value) -> Result<Self> {
        Ok(serde_json::from_value(value.clone())?)
    }
}

/// An artist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artist {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub date_added: Option<DateTime<Utc>>,
}

impl Artist {
    pub fn parse(value: &Value) -> Result<Self> {
        Ok(serde_json::from_value(value.clone())?)
    }
}

/// A playlist. Playlists are keyed by UUID, unlike the numeric media ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    pub uuid: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub number_of_tracks: Option<u32>,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub date_added: Option<DateTime<Utc>>,
}

impl Playlist {
    pub fn parse(value: &Value) -> Result<Self> {
        Ok(serde_json::from_value(value.clone())?)
    }
}

/// A curated mix. Mixes carry opaque string ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mix {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub sub_title: Option<String>,
    #[serde(default)]
    pub date_added: Option<DateTime<Utc>>,
}

impl Mix {
    pub fn parse(value: &Value) -> Result<Self> {
        Ok(serde_json::from_value(value.clone())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn playlist_parses_uuid_key() {
        let value = json!({
            "uuid": "7ab5d2b6-93fb-4181-a008-a1d18e2cebfa",
            "title": "Morning",
            "numberOfTracks": 12,
            "created": "2023-01-15T08:30:00.000Z"
        });
        let playlist = Playlist::parse(&value).unwrap();
        assert_eq!(playlist.uuid, "7ab5d2b6-93fb-4181-a008-a1d18e2cebfa");
        assert_eq!(playlist.number_of_tracks, Some(12));
        assert!(playlist.created.is_some());
    }

    #[test]
    fn malformed_object_is_a_parse_error() {
        // Missing the mandatory title.
        assert!(Album::parse(&json!({ "id": 9 })).is_err());
    }
}
