//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the signup endpoint together with its request,
//! success and error schemas. The document is served by Swagger UI in debug
//! builds and exported by the `openapi-dump` binary for external tooling.

use utoipa::OpenApi;

use crate::domain::{ConstraintTag, ErrorCode, FieldViolation, SignupRequest, TokenPair};
use crate::inbound::http::error::{ErrorBody, ErrorEnvelope};
use crate::inbound::http::signup::SignupResponse;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Account API",
        description = "Account creation for the authentication service."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(crate::inbound::http::signup::sign_up),
    components(schemas(
        SignupRequest,
        SignupResponse,
        TokenPair,
        ErrorEnvelope,
        ErrorBody,
        ErrorCode,
        FieldViolation,
        ConstraintTag
    )),
    tags(
        (name = "account", description = "Account lifecycle operations")
    )
)]
pub struct ApiDoc;
