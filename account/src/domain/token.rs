//! Credential pair issued to a user.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Identifier of a previously issued refresh token.
///
/// First issuance after signup has no predecessor, so callers pass `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenId(Uuid);

impl TokenId {
    /// Wrap an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

/// Access and refresh tokens, opaque to this service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    #[schema(example = "opaque-access-token")]
    access_token: String,
    #[schema(example = "opaque-refresh-token")]
    refresh_token: String,
}

impl TokenPair {
    /// Bundle an access and refresh token.
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
        }
    }

    /// Short-lived access token.
    pub fn access_token(&self) -> &str {
        self.access_token.as_str()
    }

    /// Long-lived refresh token.
    pub fn refresh_token(&self) -> &str {
        self.refresh_token.as_str()
    }
}
