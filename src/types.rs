// src/types.rs
//! Small domain types shared across the client.

use serde::{Deserialize, Serialize};

/// Session credentials for the authenticated request layer.
///
/// Owned by the long-lived session, mutated in place only by the token
/// refresh path, and read (never mutated) by every request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    /// Token scheme, e.g. `"Bearer"`. Combined with the access token to
    /// form the `authorization` header.
    pub token_type: String,
    pub access_token: String,
    /// Long-lived token used to obtain a fresh access token. Without it,
    /// an expired session is a hard failure.
    pub refresh_token: Option<String>,
    /// Session identifier merged into every request's query parameters.
    pub session_id: Option<String>,
    /// Two-letter country code scoping catalog availability.
    pub country_code: Option<String>,
}

impl Credentials {
    /// The `authorization` header value, `"<token_type> <access_token>"`.
    pub fn authorization(&self) -> String {
        format!("{} {}", self.token_type, self.access_token)
    }
}

/// Ordering key accepted by collection endpoints (favorites, playlists).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemOrder {
    Name,
    Date,
    Artist,
    Album,
}

impl ItemOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "NAME",
            Self::Date => "DATE",
            Self::Artist => "ARTIST",
            Self::Album => "ALBUM",
        }
    }
}

/// Sort direction paired with [`ItemOrder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderDirection {
    Ascending,
    Descending,
}

impl OrderDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authorization_header_joins_type_and_token() {
        let creds = Credentials {
            token_type: "Bearer".to_string(),
            access_token: "abc123".to_string(),
            refresh_token: None,
            session_id: None,
            country_code: None,
        };
        assert_eq!(creds.authorization(), "Bearer abc123");
    }

    #[test]
    fn order_params_serialize_to_api_values() {
        assert_eq!(ItemOrder::Date.as_str(), "DATE");
        assert_eq!(OrderDirection::Descending.as_str(), "DESC");
    }
}
