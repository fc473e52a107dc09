//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::SignupCommand;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub signup: Arc<dyn SignupCommand>,
}

impl HttpState {
    /// Construct state from the signup use-case.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use account::domain::SignupService;
    /// use account::domain::ports::{FixtureTokenService, InMemoryUserService};
    /// use account::inbound::http::state::HttpState;
    ///
    /// let service = SignupService::new(
    ///     Arc::new(InMemoryUserService::new()),
    ///     Arc::new(FixtureTokenService),
    /// );
    /// let state = HttpState::new(Arc::new(service));
    /// let _signup = state.signup.clone();
    /// ```
    pub fn new(signup: Arc<dyn SignupCommand>) -> Self {
        Self { signup }
    }
}
