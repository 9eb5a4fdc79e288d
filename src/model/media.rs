// src/model/media.rs
//! Playable media: tracks and videos.

use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A reference to the performing artist, as embedded in media objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtistRef {
    pub id: u64,
    pub name: String,
}

/// An audio track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub id: u64,
    pub title: String,
    /// Duration in seconds.
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub artist: Option<ArtistRef>,
    #[serde(default)]
    pub track_number: Option<u32>,
    /// When the track was added to the collection it was fetched from.
    /// Normalized by the mapper from the `created` envelope field.
    #[serde(default)]
    pub date_added: Option<DateTime<Utc>>,
}

impl Track {
    pub fn parse(value: &Value) -> Result<Self> {
        Ok(serde_json::from_value(value.clone())?)
    }
}

/// A music video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub artist: Option<ArtistRef>,
    #[serde(default)]
    pub date_added: Option<DateTime<Utc>>,
}

impl Video {
    pub fn parse(value: &Value) -> Result<Self> {
        Ok(serde_json::from_value(value.clone())?)
    }
}
