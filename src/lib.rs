// src/lib.rs
//! tidalrs — a client for the TIDAL streaming catalog API.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling** — `TidalError`, `ApiErrorKind`
//! - **Configuration** — `SessionConfig`
//! - **Session** — `TidalSession`, `Credentials`
//! - **Catalog surfaces** — `Favorites`, `PlaylistHandle`
//! - **Domain model** — `Track`, `Video`, `Album`, `Artist`, `Playlist`,
//!   `Mix`, `CatalogItem`
//! - **Request layer** — `RequestClient`, the `Transport` seam, the
//!   collection mapper, and the parallel paginator

pub mod api;
mod config;
mod constants;
mod error;
mod favorites;
mod model;
mod playlist;
mod session;
mod types;

// --- Error Handling ---
pub use crate::error::{ApiErrorKind, Result, TidalError};

// --- Configuration ---
pub use crate::config::SessionConfig;

// --- Session ---
pub use crate::session::TidalSession;
pub use crate::types::{Credentials, ItemOrder, OrderDirection};

// --- Catalog surfaces ---
pub use crate::favorites::Favorites;
pub use crate::playlist::PlaylistHandle;

// --- Domain Model ---
pub use crate::model::{
    Album, Artist, ArtistRef, CatalogItem, ItemType, Mix, Playlist, Track, Video,
};

// --- Request layer ---
pub use crate::api::{
    fetch_all, map_json, map_json_typed, CatalogResolver, FetchOptions, HttpTransport, Mapped,
    PageFailure, Paginated, RequestClient, Transport, TransportRequest, TransportResponse,
    TypeResolver,
};
