//! Driving port for the signup use-case.
//!
//! Inbound adapters call this port with the deserialised request and receive
//! either the created account with its tokens or a classified [`Error`]. They
//! never see the driven ports behind it.

use async_trait::async_trait;

use crate::domain::{Error, SignedUp, SignupRequest};

/// Domain use-case port for account creation.
#[async_trait]
pub trait SignupCommand: Send + Sync {
    /// Validate `request`, create the user and issue its first token pair.
    async fn sign_up(&self, request: SignupRequest) -> Result<SignedUp, Error>;
}
