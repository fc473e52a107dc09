//! Driven port for issuing credentials to a user.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{TokenId, TokenPair, User};

/// Failures raised by token service adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenServiceError {
    /// The issuer or its key store could not be reached.
    #[error("token service unavailable: {message}")]
    Unavailable { message: String },
    /// Token construction or signing failed.
    #[error("token issuance failed: {message}")]
    Issuance { message: String },
}

impl TokenServiceError {
    /// Build [`TokenServiceError::Unavailable`].
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Build [`TokenServiceError::Issuance`].
    pub fn issuance(message: impl Into<String>) -> Self {
        Self::Issuance {
            message: message.into(),
        }
    }
}

/// Port for issuing an access/refresh token pair.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenService: Send + Sync {
    /// Issue a pair for `user`, replacing `prior_token` when one is given.
    async fn new_pair_from_user(
        &self,
        user: &User,
        prior_token: Option<TokenId>,
    ) -> Result<TokenPair, TokenServiceError>;
}

/// Token service returning random opaque strings.
///
/// Stands in for a signing issuer so the binary can run stand-alone. The
/// tokens carry no claims and cannot be verified by anyone.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureTokenService;

#[async_trait]
impl TokenService for FixtureTokenService {
    async fn new_pair_from_user(
        &self,
        user: &User,
        _prior_token: Option<TokenId>,
    ) -> Result<TokenPair, TokenServiceError> {
        let access = format!("{}.{}", user.id().as_uuid().simple(), Uuid::new_v4().simple());
        let refresh = Uuid::new_v4().simple().to_string();
        Ok(TokenPair::new(access, refresh))
    }
}
