// src/model/mod.rs
//! Catalog domain model.
//!
//! Only the fields that identity, ordering, and display need — the full
//! TIDAL field schemas belong to the service, not to this client. Every
//! object exposes `date_added`, normalized by the collection mapper from
//! the per-endpoint `created` envelope field.

mod collections;
mod media;

pub use collections::{Album, Artist, Mix, Playlist};
pub use media::{ArtistRef, Track, Video};

use crate::error::{Result, TidalError};
use serde_json::Value;
use std::fmt;

/// Declared type tag of a catalog item, as found in heterogeneous pages.
///
/// Tags arrive in several spellings (`"track"`, `"TRACK"`, `"tracks"`);
/// parsing normalizes case and accepts the pluralized key scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemType {
    Track,
    Video,
    Album,
    Artist,
    Playlist,
    Mix,
}

impl ItemType {
    /// Parses a declared type tag, case-normalized and plural-tolerant.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_ascii_lowercase().as_str() {
            "track" | "tracks" => Some(Self::Track),
            "video" | "videos" => Some(Self::Video),
            "album" | "albums" => Some(Self::Album),
            "artist" | "artists" => Some(Self::Artist),
            "playlist" | "playlists" => Some(Self::Playlist),
            "mix" | "mixes" | "mixs" => Some(Self::Mix),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Track => "track",
            Self::Video => "video",
            Self::Album => "album",
            Self::Artist => "artist",
            Self::Playlist => "playlist",
            Self::Mix => "mix",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A catalog item of any type, from a heterogeneous page.
///
/// Closed union over everything a mixed feed can contain; the mapper
/// resolves each element's declared tag to the matching constructor
/// exactly once per item.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogItem {
    Track(Track),
    Video(Video),
    Album(Album),
    Artist(Artist),
    Playlist(Playlist),
    Mix(Mix),
}

impl CatalogItem {
    /// Parses an item whose type is declared by `tag`.
    ///
    /// This is the tag-to-constructor table behind heterogeneous mapping.
    pub fn parse_tagged(tag: &str, value: &Value) -> Result<Self> {
        let item_type = ItemType::from_tag(tag).ok_or_else(|| {
            TidalError::MalformedResponse(format!("unknown item type tag: {:?}", tag))
        })?;
        match item_type {
            ItemType::Track => Track::parse(value).map(Self::Track),
            ItemType::Video => Video::parse(value).map(Self::Video),
            ItemType::Album => Album::parse(value).map(Self::Album),
            ItemType::Artist => Artist::parse(value).map(Self::Artist),
            ItemType::Playlist => Playlist::parse(value).map(Self::Playlist),
            ItemType::Mix => Mix::parse(value).map(Self::Mix),
        }
    }

    pub fn item_type(&self) -> ItemType {
        match self {
            Self::Track(_) => ItemType::Track,
            Self::Video(_) => ItemType::Video,
            Self::Album(_) => ItemType::Album,
            Self::Artist(_) => ItemType::Artist,
            Self::Playlist(_) => ItemType::Playlist,
            Self::Mix(_) => ItemType::Mix,
        }
    }
}
