// src/constants.rs
//! Domain constants that define the operational boundaries of the client.
//!
//! Each constant is named for the domain concept it constrains, not its
//! technical role. Reading these constants should tell you the story of
//! how the client operates: where it talks to, how much it fetches per
//! round-trip, and how it recognizes an expired session.

// ---------------------------------------------------------------------------
// TIDAL API locations
// ---------------------------------------------------------------------------

/// Base location of the v1 catalog API.
pub const API_V1_LOCATION: &str = "https://api.tidal.com/v1/";

/// Base location of the v2 catalog API (playlist folders, newer favorites).
pub const API_V2_LOCATION: &str = "https://api.tidal.com/v2/";

/// OAuth2 token endpoint used for refresh-token grants.
pub const OAUTH_TOKEN_URL: &str = "https://auth.tidal.com/v1/oauth2/token";

// ---------------------------------------------------------------------------
// Client identity
// ---------------------------------------------------------------------------

/// Client version reported in the `x-tidal-client-version` header.
pub const CLIENT_VERSION: &str = "2025.7.16";

/// Default User-Agent. TIDAL serves the mobile API surface to Android
/// WebView agents, so we present one unless the caller overrides it.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Linux; Android 12; wv) \
    AppleWebKit/537.36 (KHTML, like Gecko) Version/4.0 Chrome/91.0.4472.114 \
    Safari/537.36";

// ---------------------------------------------------------------------------
// Pagination boundaries
// ---------------------------------------------------------------------------

/// Default `limit` merged into every request when the caller supplies none.
pub const DEFAULT_ITEM_LIMIT: u32 = 1000;

/// How many items one paginated page requests by default.
///
/// Several endpoints (playlist folders, v2 favorites) cap pages at 50,
/// so 50 is the largest chunk that behaves uniformly everywhere.
pub const DEFAULT_CHUNK_SIZE: u32 = 50;

/// How many page fetches run concurrently per pagination round.
///
/// Two in-flight requests already hides most of the per-request latency
/// without tripping the service's rate limiting on large collections.
pub const DEFAULT_PAGE_WORKERS: usize = 2;

/// Upper bound on concurrent page fetches, whatever the caller asks for.
pub const MAX_PAGE_WORKERS: usize = 32;

// ---------------------------------------------------------------------------
// Error recognition
// ---------------------------------------------------------------------------

/// Prefix of the `userMessage` the service returns when the access token
/// has expired. This exact sentinel triggers the one-shot refresh-and-retry.
pub const TOKEN_EXPIRED_PREFIX: &str = "The token has expired.";

/// Maximum characters shown when previewing error response bodies in logs.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 200;
