//! User data model.
//!
//! [`NewUser`] is what the signup pipeline hands to the user service after
//! validation. [`User`] is what the user service hands back once the account
//! exists; identifiers, password hashing and timestamps belong to that
//! service.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use zeroize::Zeroizing;

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Generate a new random [`UserId`].
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

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

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validated signup data awaiting persistence.
///
/// ## Invariants
/// - `email` passed the signup email rule.
/// - `password` holds between 6 and 30 characters and is wiped from memory
///   on drop. `Debug` output never includes it.
///
/// Only the signup validator constructs this type outside tests.
#[derive(Clone, PartialEq, Eq)]
pub struct NewUser {
    email: String,
    password: Zeroizing<String>,
}

impl NewUser {
    pub(crate) fn new(email: String, password: String) -> Self {
        Self {
            email,
            password: Zeroizing::new(password),
        }
    }

    /// Email address as submitted.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Plain-text password for the user service to hash.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Application user as created by the user service.
///
/// # Examples
/// ```
/// use account::domain::{User, UserId};
/// use chrono::Utc;
///
/// let now = Utc::now();
/// let user = User::new(UserId::random(), "ada@example.com", now, now);
/// assert_eq!(user.email(), "ada@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    id: UserId,
    email: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl User {
    /// Build a user record.
    pub fn new(
        id: UserId,
        email: impl Into<String>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            email: email.into(),
            created_at,
            updated_at,
        }
    }

    /// Stable identifier.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Email address.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last modification timestamp.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
