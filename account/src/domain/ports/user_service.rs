//! Driven port for creating user accounts.
//!
//! The signup pipeline only needs one capability from the user subsystem:
//! persist a validated [`NewUser`] and hand back the stored [`User`]. How the
//! password is hashed and where the row lives is the adapter's business.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::domain::{NewUser, User, UserId};

/// Failures raised by user service adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserServiceError {
    /// An account already uses this email address.
    #[error("user with email {email} already exists")]
    EmailTaken { email: String },
    /// The backing store could not be reached or timed out.
    #[error("user service unavailable: {message}")]
    Unavailable { message: String },
    /// Any other failure inside the adapter.
    #[error("user service failed: {message}")]
    Internal { message: String },
}

impl UserServiceError {
    /// Build [`UserServiceError::EmailTaken`].
    pub fn email_taken(email: impl Into<String>) -> Self {
        Self::EmailTaken {
            email: email.into(),
        }
    }

    /// Build [`UserServiceError::Unavailable`].
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Build [`UserServiceError::Internal`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

/// Port for persisting new users.
///
/// Implementations must tolerate concurrent calls from in-flight requests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserService: Send + Sync {
    /// Create the account described by `user` and return the stored record.
    async fn sign_up(&self, user: NewUser) -> Result<User, UserServiceError>;
}

#[derive(Debug, Clone)]
struct StoredUser {
    user: User,
    salt: Uuid,
    password_digest: String,
}

/// In-memory user service used until a persistent adapter is wired.
///
/// Emails are unique case-insensitively. Passwords are kept only as a salted
/// SHA-256 digest.
#[derive(Debug, Default)]
pub struct InMemoryUserService {
    users: Mutex<HashMap<String, StoredUser>>,
}

impl InMemoryUserService {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of accounts created so far.
    pub fn len(&self) -> usize {
        self.users.lock().map(|users| users.len()).unwrap_or_default()
    }

    /// Whether no account has been created yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Look up a previously created account by email.
    pub fn find_by_email(&self, email: &str) -> Option<User> {
        let users = self.users.lock().ok()?;
        users.get(&email.to_lowercase()).map(|stored| stored.user.clone())
    }

    /// Check `password` against the stored digest for `email`.
    pub fn verify_password(&self, email: &str, password: &str) -> bool {
        let Ok(users) = self.users.lock() else {
            return false;
        };
        users
            .get(&email.to_lowercase())
            .is_some_and(|stored| digest(stored.salt, password) == stored.password_digest)
    }
}

fn digest(salt: Uuid, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

#[async_trait]
impl UserService for InMemoryUserService {
    async fn sign_up(&self, user: NewUser) -> Result<User, UserServiceError> {
        let key = user.email().to_lowercase();
        let mut users = self
            .users
            .lock()
            .map_err(|_| UserServiceError::internal("user store lock poisoned"))?;
        if users.contains_key(&key) {
            return Err(UserServiceError::email_taken(user.email()));
        }

        let now = Utc::now();
        let created = User::new(UserId::random(), user.email(), now, now);
        let salt = Uuid::new_v4();
        users.insert(
            key,
            StoredUser {
                user: created.clone(),
                salt,
                password_digest: digest(salt, user.password()),
            },
        );
        Ok(created)
    }
}
