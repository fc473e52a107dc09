//! Domain ports and supporting types for the hexagonal boundary.

mod signup_command;
mod token_service;
mod user_service;

pub use signup_command::SignupCommand;
#[cfg(test)]
pub use token_service::MockTokenService;
pub use token_service::{FixtureTokenService, TokenService, TokenServiceError};
#[cfg(test)]
pub use user_service::MockUserService;
pub use user_service::{InMemoryUserService, UserService, UserServiceError};
