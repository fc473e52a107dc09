//! HTTP inbound adapter exposing REST endpoints.

pub mod error;
pub mod signup;
pub mod state;

pub use error::ApiResult;
