//! Signup API handler.
//!
//! ```text
//! POST /signUp {"email":"bob@bob.com","password":"avalidpassword"}
//! ```

use actix_web::error::JsonPayloadError;
use actix_web::{HttpRequest, HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::{Error, SignupRequest, TokenPair};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ErrorEnvelope;
use crate::inbound::http::state::HttpState;

/// Default request body limit in bytes.
pub const DEFAULT_JSON_LIMIT: usize = 16 * 1024;

/// Success body for `POST /signUp`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SignupResponse {
    pub tokens: TokenPair,
}

/// Create an account and issue its first token pair.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use account::inbound::http::signup::sign_up;
///
/// let app = App::new().service(sign_up);
/// ```
#[utoipa::path(
    post,
    path = "/signUp",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created", body = SignupResponse),
        (status = 400, description = "Malformed body or invalid fields", body = ErrorEnvelope),
        (status = 409, description = "Email already registered", body = ErrorEnvelope),
        (status = 413, description = "Body too large", body = ErrorEnvelope),
        (status = 415, description = "Body is not JSON", body = ErrorEnvelope),
        (status = 500, description = "Internal server error", body = ErrorEnvelope),
        (status = 503, description = "Collaborator unavailable", body = ErrorEnvelope)
    ),
    tags = ["account"],
    operation_id = "signUp"
)]
#[post("/signUp")]
pub async fn sign_up(
    state: web::Data<HttpState>,
    payload: web::Json<SignupRequest>,
) -> ApiResult<HttpResponse> {
    let signed_up = state.signup.sign_up(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(SignupResponse {
        tokens: signed_up.into_tokens(),
    }))
}

fn map_json_error(err: JsonPayloadError, req: &HttpRequest) -> Error {
    debug!(error = %err, path = req.path(), "rejected request body");
    match err {
        JsonPayloadError::OverflowKnownLength { length, limit } => {
            Error::payload_too_large(limit, Some(length))
        }
        JsonPayloadError::Overflow { limit } => Error::payload_too_large(limit, None),
        JsonPayloadError::ContentType => Error::unsupported_media_type(format!(
            "{} only accepts Content-Type application/json",
            req.path()
        )),
        _ => Error::bad_request("Malformed request body"),
    }
}

/// JSON extractor configuration for account endpoints.
///
/// Bodies above `limit` bytes are rejected with 413, non-JSON content types
/// with 415 and unparsable bodies with 400.
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .content_type_required(true)
        .error_handler(|err, req| map_json_error(err, req).into())
}

#[cfg(test)]
mod tests;
