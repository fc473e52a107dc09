//! Domain-level error types.
//!
//! These errors are transport agnostic. The HTTP adapter maps each
//! [`ErrorCode`] to a status code and a JSON envelope; nothing here knows
//! about HTTP.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{FieldViolation, TraceId};

/// Stable machine-readable error kind.
///
/// Serialises to the upper-case `type` strings clients match on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum ErrorCode {
    /// The request is malformed or fails validation.
    #[serde(rename = "BADREQUEST")]
    BadRequest,
    /// Authentication failed or is missing.
    #[serde(rename = "AUTHORIZATION")]
    Unauthorized,
    /// The resource being created already exists.
    #[serde(rename = "CONFLICT")]
    Conflict,
    /// The requested resource does not exist.
    #[serde(rename = "NOTFOUND")]
    NotFound,
    /// The request body exceeds the configured limit.
    #[serde(rename = "PAYLOADTOOLARGE")]
    PayloadTooLarge,
    /// The request body is not JSON.
    #[serde(rename = "UNSUPPORTEDMEDIATYPE")]
    UnsupportedMediaType,
    /// A collaborator could not be reached or timed out.
    #[serde(rename = "SERVICE_UNAVAILABLE")]
    ServiceUnavailable,
    /// An unexpected failure inside the service.
    #[serde(rename = "INTERNAL")]
    Internal,
}

impl ErrorCode {
    /// Client-safe message used when no specific message is available.
    #[must_use]
    pub fn default_message(self) -> &'static str {
        match self {
            Self::BadRequest => "Bad request. Reason: Invalid request parameters",
            Self::Unauthorized => "Unauthorized",
            Self::Conflict => "Resource already exists",
            Self::NotFound => "Resource not found",
            Self::PayloadTooLarge => "Request payload too large",
            Self::UnsupportedMediaType => "Unsupported media type",
            Self::ServiceUnavailable => SERVICE_UNAVAILABLE_MESSAGE,
            Self::Internal => INTERNAL_ERROR_MESSAGE,
        }
    }
}

/// Generic message returned to clients for internal failures.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error.";

/// Generic message returned to clients when a collaborator is unavailable.
pub const SERVICE_UNAVAILABLE_MESSAGE: &str = "Service unavailable or timed out";

/// Reason attached to validation failures that carry per-field violations.
pub const INVALID_ARGS_REASON: &str = "Invalid request parameters. See invalidArgs";

/// Validation errors emitted by [`Error::try_new`] and
/// [`Error::try_with_trace_id`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorValidationError {
    /// The message was empty once trimmed.
    #[error("error message must not be empty")]
    EmptyMessage,
    /// The trace identifier was empty once trimmed.
    #[error("trace identifier must not be empty")]
    EmptyTraceId,
}

/// Domain error payload.
///
/// ## Invariants
/// - `message` is non-empty once trimmed.
/// - `invalid_args` is only populated for [`ErrorCode::BadRequest`].
///
/// The trace identifier in scope at construction time is captured
/// automatically.
///
/// # Examples
/// ```
/// use account::domain::{Error, ErrorCode};
///
/// let err = Error::conflict("email", "bob@bob.com");
/// assert_eq!(err.code(), ErrorCode::Conflict);
/// assert_eq!(
///     err.message(),
///     "resource: email with value: bob@bob.com already exists"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    code: ErrorCode,
    message: String,
    trace_id: Option<String>,
    invalid_args: Vec<FieldViolation>,
}

impl Error {
    /// Create a new error.
    ///
    /// A blank message is replaced by [`ErrorCode::default_message`].
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        match Self::try_new(code, message) {
            Ok(error) => error,
            Err(_) => Self::build(code, code.default_message().to_owned()),
        }
    }

    /// Fallible constructor that validates the message content.
    pub fn try_new(
        code: ErrorCode,
        message: impl Into<String>,
    ) -> Result<Self, ErrorValidationError> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(ErrorValidationError::EmptyMessage);
        }
        Ok(Self::build(code, message))
    }

    fn build(code: ErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            trace_id: TraceId::current().map(|id| id.to_string()),
            invalid_args: Vec::new(),
        }
    }

    /// Stable machine-readable error kind.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Correlation identifier captured when the error was created.
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Per-field violations, in field declaration order.
    pub fn invalid_args(&self) -> &[FieldViolation] {
        self.invalid_args.as_slice()
    }

    /// Override the trace identifier.
    pub fn with_trace_id(mut self, trace_id: impl Into<String>) -> Self {
        self.trace_id = Some(trace_id.into());
        self
    }

    /// Override the trace identifier, rejecting blank values.
    pub fn try_with_trace_id(
        self,
        trace_id: impl Into<String>,
    ) -> Result<Self, ErrorValidationError> {
        let trace_id = trace_id.into();
        if trace_id.trim().is_empty() {
            return Err(ErrorValidationError::EmptyTraceId);
        }
        Ok(self.with_trace_id(trace_id))
    }

    /// Bad request with a human-readable reason and no field list.
    ///
    /// # Examples
    /// ```
    /// use account::domain::Error;
    ///
    /// let err = Error::bad_request("Malformed request body");
    /// assert_eq!(err.message(), "Bad request. Reason: Malformed request body");
    /// assert!(err.invalid_args().is_empty());
    /// ```
    pub fn bad_request(reason: impl std::fmt::Display) -> Self {
        Self::new(ErrorCode::BadRequest, format!("Bad request. Reason: {reason}"))
    }

    /// Bad request listing every violated field.
    pub fn invalid_arguments(violations: Vec<FieldViolation>) -> Self {
        let mut error = Self::bad_request(INVALID_ARGS_REASON);
        error.invalid_args = violations;
        error
    }

    /// Convenience constructor for [`ErrorCode::Unauthorized`].
    pub fn unauthorized(reason: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, reason)
    }

    /// Conflict on an existing resource identified by `resource` = `value`.
    pub fn conflict(resource: impl std::fmt::Display, value: impl std::fmt::Display) -> Self {
        Self::new(
            ErrorCode::Conflict,
            format!("resource: {resource} with value: {value} already exists"),
        )
    }

    /// Missing resource identified by `resource` = `value`.
    pub fn not_found(resource: impl std::fmt::Display, value: impl std::fmt::Display) -> Self {
        Self::new(
            ErrorCode::NotFound,
            format!("resource: {resource} with value: {value} not found"),
        )
    }

    /// Request body exceeded `limit` bytes.
    pub fn payload_too_large(limit: usize, actual: Option<usize>) -> Self {
        let message = match actual {
            Some(actual) => {
                format!("Max payload size of {limit} exceeded. Actual payload size: {actual}")
            }
            None => format!("Max payload size of {limit} exceeded"),
        };
        Self::new(ErrorCode::PayloadTooLarge, message)
    }

    /// Request body used a content type other than JSON.
    pub fn unsupported_media_type(reason: impl Into<String>) -> Self {
        Self::new(ErrorCode::UnsupportedMediaType, reason)
    }

    /// Collaborator unreachable. `detail` is for logs only.
    pub fn service_unavailable(detail: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, detail)
    }

    /// Unexpected failure. `detail` is for logs only.
    pub fn internal(detail: impl Into<String>) -> Self {
        Self::new(ErrorCode::Internal, detail)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}
