//! Signup domain service.
//!
//! Implements the [`SignupCommand`] driving port: validate the request,
//! create the user through [`UserService`], then issue the first token pair
//! through [`TokenService`]. Each step only runs when the previous one
//! succeeded.

mod validation;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, info, warn};

use crate::domain::ports::{
    SignupCommand, TokenService, TokenServiceError, UserService, UserServiceError,
};
use crate::domain::{Error, TokenPair, User};

pub use validation::{
    PASSWORD_MAX_CHARS, PASSWORD_MIN_CHARS, SignupRequest, SignupValidationError,
    signup_violations, validate_signup,
};

/// Outcome of a successful signup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedUp {
    user: User,
    tokens: TokenPair,
}

impl SignedUp {
    /// Bundle the created user with its tokens.
    pub fn new(user: User, tokens: TokenPair) -> Self {
        Self { user, tokens }
    }

    /// The created account.
    pub fn user(&self) -> &User {
        &self.user
    }

    /// Tokens issued for the account.
    pub fn tokens(&self) -> &TokenPair {
        &self.tokens
    }

    /// Consume the outcome, returning only the tokens.
    pub fn into_tokens(self) -> TokenPair {
        self.tokens
    }
}

/// Signup service implementing the driving port.
#[derive(Clone)]
pub struct SignupService<U, T> {
    users: Arc<U>,
    tokens: Arc<T>,
}

impl<U, T> SignupService<U, T> {
    /// Create a new service from the user and token ports.
    pub fn new(users: Arc<U>, tokens: Arc<T>) -> Self {
        Self { users, tokens }
    }
}

impl<U, T> SignupService<U, T>
where
    U: UserService,
    T: TokenService,
{
    fn map_user_error(error: UserServiceError) -> Error {
        match error {
            UserServiceError::EmailTaken { email } => Error::conflict("email", email),
            UserServiceError::Unavailable { message } => {
                Error::service_unavailable(format!("user service unavailable: {message}"))
            }
            UserServiceError::Internal { message } => {
                Error::internal(format!("user service error: {message}"))
            }
        }
    }

    fn map_token_error(error: TokenServiceError) -> Error {
        match error {
            TokenServiceError::Unavailable { message } => {
                Error::service_unavailable(format!("token service unavailable: {message}"))
            }
            TokenServiceError::Issuance { message } => {
                Error::internal(format!("token issuance failed: {message}"))
            }
        }
    }
}

#[async_trait]
impl<U, T> SignupCommand for SignupService<U, T>
where
    U: UserService,
    T: TokenService,
{
    async fn sign_up(&self, request: SignupRequest) -> Result<SignedUp, Error> {
        let new_user = validate_signup(request).map_err(|err| {
            debug!(violations = err.violations().len(), "signup request rejected");
            Error::from(err)
        })?;

        let user = self.users.sign_up(new_user).await.map_err(|err| {
            warn!(error = %err, "user creation failed");
            Self::map_user_error(err)
        })?;

        // No rollback: the account exists even if token issuance fails.
        let tokens = self
            .tokens
            .new_pair_from_user(&user, None)
            .await
            .map_err(|err| {
                error!(user_id = %user.id(), error = %err, "tokens not issued for created user");
                Self::map_token_error(err)
            })?;

        info!(user_id = %user.id(), "user signed up");
        Ok(SignedUp::new(user, tokens))
    }
}
