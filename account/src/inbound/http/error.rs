//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while allowing Actix
//! handlers to turn domain failures into consistent JSON responses and status
//! codes. [`classify`] is the single place deciding status and body.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::domain::{
    Error, ErrorCode, FieldViolation, INTERNAL_ERROR_MESSAGE, SERVICE_UNAVAILABLE_MESSAGE,
    TRACE_ID_HEADER,
};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Kind and message of a failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    #[serde(rename = "type")]
    #[schema(example = "BADREQUEST")]
    pub kind: ErrorCode,
    #[schema(example = "Bad request. Reason: Invalid request parameters. See invalidArgs")]
    pub message: String,
}

/// Wire shape of every error response.
///
/// ```text
/// {"error":{"type":"CONFLICT","message":"..."}}
/// {"error":{"type":"BADREQUEST","message":"..."},"invalidArgs":[...]}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
    #[serde(
        rename = "invalidArgs",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub invalid_args: Vec<FieldViolation>,
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::BadRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
        ErrorCode::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn client_message(error: &Error) -> &str {
    match error.code() {
        ErrorCode::Internal => INTERNAL_ERROR_MESSAGE,
        ErrorCode::ServiceUnavailable => SERVICE_UNAVAILABLE_MESSAGE,
        _ => error.message(),
    }
}

/// Map a domain error to its HTTP status and client-safe body.
///
/// # Examples
/// ```
/// use account::domain::Error;
/// use account::inbound::http::error::classify;
/// use actix_web::http::StatusCode;
///
/// let (status, body) = classify(&Error::internal("db password rejected"));
/// assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
/// assert_eq!(body.error.message, "Internal server error.");
/// ```
pub fn classify(error: &Error) -> (StatusCode, ErrorEnvelope) {
    let envelope = ErrorEnvelope {
        error: ErrorBody {
            kind: error.code(),
            message: client_message(error).to_owned(),
        },
        invalid_args: error.invalid_args().to_vec(),
    };
    (status_for(error.code()), envelope)
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let (status, envelope) = classify(self);
        if status.is_server_error() {
            error!(
                code = ?self.code(),
                trace_id = self.trace_id().unwrap_or_default(),
                detail = %self.message(),
                "request failed"
            );
        }

        let mut builder = HttpResponse::build(status);
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(envelope)
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to domain error");
        Error::internal(err.to_string())
    }
}
