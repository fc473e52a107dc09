//! Recording test doubles for the driven signup ports.

use std::sync::{Arc, Mutex};

use account::domain::ports::{TokenService, TokenServiceError, UserService, UserServiceError};
use account::domain::{NewUser, TokenId, TokenPair, User, UserId};
use async_trait::async_trait;
use chrono::Utc;

/// Configurable outcome for [`RecordingUserService`].
#[derive(Clone)]
pub enum UserResponse {
    /// Create a user with a fresh id from the submitted email.
    Create,
    Err(UserServiceError),
}

/// One recorded `sign_up` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpCall {
    pub email: String,
    pub password: String,
}

#[derive(Clone)]
pub struct RecordingUserService {
    calls: Arc<Mutex<Vec<SignUpCall>>>,
    response: Arc<Mutex<UserResponse>>,
}

impl RecordingUserService {
    pub fn new(response: UserResponse) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            response: Arc::new(Mutex::new(response)),
        }
    }

    pub fn calls(&self) -> Vec<SignUpCall> {
        self.calls.lock().expect("user calls lock").clone()
    }
}

#[async_trait]
impl UserService for RecordingUserService {
    async fn sign_up(&self, user: NewUser) -> Result<User, UserServiceError> {
        self.calls.lock().expect("user calls lock").push(SignUpCall {
            email: user.email().to_owned(),
            password: user.password().to_owned(),
        });
        match self.response.lock().expect("user response lock").clone() {
            UserResponse::Create => {
                let now = Utc::now();
                Ok(User::new(UserId::random(), user.email(), now, now))
            }
            UserResponse::Err(error) => Err(error),
        }
    }
}

/// Configurable outcome for [`RecordingTokenService`].
#[derive(Clone)]
pub enum TokenResponse {
    Ok(TokenPair),
    Err(TokenServiceError),
}

#[derive(Clone)]
pub struct RecordingTokenService {
    calls: Arc<Mutex<Vec<(UserId, Option<TokenId>)>>>,
    response: Arc<Mutex<TokenResponse>>,
}

impl RecordingTokenService {
    pub fn new(response: TokenResponse) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            response: Arc::new(Mutex::new(response)),
        }
    }

    pub fn calls(&self) -> Vec<(UserId, Option<TokenId>)> {
        self.calls.lock().expect("token calls lock").clone()
    }
}

#[async_trait]
impl TokenService for RecordingTokenService {
    async fn new_pair_from_user(
        &self,
        user: &User,
        prior_token: Option<TokenId>,
    ) -> Result<TokenPair, TokenServiceError> {
        self.calls
            .lock()
            .expect("token calls lock")
            .push((user.id(), prior_token));
        match self.response.lock().expect("token response lock").clone() {
            TokenResponse::Ok(pair) => Ok(pair),
            TokenResponse::Err(error) => Err(error),
        }
    }
}
