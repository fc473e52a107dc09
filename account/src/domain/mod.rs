//! Domain primitives, ports and the signup service.
//!
//! Purpose: keep account creation transport agnostic. Inbound adapters talk
//! to [`ports::SignupCommand`]; driven adapters implement
//! [`ports::UserService`] and [`ports::TokenService`].
//!
//! Public surface:
//! - Error / ErrorCode: transport-neutral failure with a stable kind.
//! - FieldViolation / ConstraintTag: one failed field constraint.
//! - SignupRequest / SignupService / SignedUp: the signup use-case.
//! - User / NewUser / TokenPair: values crossing the driven ports.
//! - TraceId: task-local request correlation identifier.

pub mod error;
pub mod ports;
pub mod signup;
pub mod token;
pub mod trace_id;
pub mod user;
pub mod violation;

pub use self::error::{
    Error, ErrorCode, ErrorValidationError, INTERNAL_ERROR_MESSAGE, INVALID_ARGS_REASON,
    SERVICE_UNAVAILABLE_MESSAGE,
};
pub use self::signup::{
    PASSWORD_MAX_CHARS, PASSWORD_MIN_CHARS, SignedUp, SignupRequest, SignupService,
    SignupValidationError, signup_violations, validate_signup,
};
pub use self::token::{TokenId, TokenPair};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{NewUser, User, UserId};
pub use self::violation::{ConstraintTag, FieldViolation};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use account::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::conflict("email", "bob@bob.com"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
