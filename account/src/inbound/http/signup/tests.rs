//! Tests for the signup handler.

use std::sync::Arc;

use super::*;
use crate::Trace;
use crate::domain::ports::{
    MockTokenService, MockUserService, TokenServiceError, UserServiceError,
};
use crate::domain::{SignupService, TRACE_ID_HEADER, User, UserId};
use actix_web::http::{StatusCode, header};
use actix_web::{App, test as actix_test};
use chrono::Utc;
use rstest::rstest;
use serde_json::{Value, json};

const TEST_JSON_LIMIT: usize = 256;

fn stored_user(email: &str) -> User {
    let now = Utc::now();
    User::new(UserId::random(), email, now, now)
}

fn untouched_ports() -> (MockUserService, MockTokenService) {
    let mut users = MockUserService::new();
    users.expect_sign_up().never();
    let mut tokens = MockTokenService::new();
    tokens.expect_new_pair_from_user().never();
    (users, tokens)
}

async fn post_raw(
    users: MockUserService,
    tokens: MockTokenService,
    request: actix_test::TestRequest,
) -> (StatusCode, Option<String>, Value) {
    let service = SignupService::new(Arc::new(users), Arc::new(tokens));
    let state = HttpState::new(Arc::new(service));
    let app = actix_test::init_service(
        App::new()
            .wrap(Trace)
            .app_data(web::Data::new(state))
            .app_data(json_config(TEST_JSON_LIMIT))
            .service(sign_up),
    )
    .await;

    let response = actix_test::call_service(&app, request.uri("/signUp").to_request()).await;
    let status = response.status();
    let trace_id = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let body: Value = actix_test::read_body_json(response).await;
    (status, trace_id, body)
}

async fn post_json(
    users: MockUserService,
    tokens: MockTokenService,
    payload: Value,
) -> (StatusCode, Value) {
    let request = actix_test::TestRequest::post().set_json(payload);
    let (status, _, body) = post_raw(users, tokens, request).await;
    (status, body)
}

#[actix_web::test]
async fn empty_fields_produce_exact_validation_body() {
    let (users, tokens) = untouched_ports();
    let (status, body) = post_json(users, tokens, json!({"email": "", "password": ""})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({
            "error": {
                "type": "BADREQUEST",
                "message": "Bad request. Reason: Invalid request parameters. See invalidArgs"
            },
            "invalidArgs": [
                {"field": "Email", "value": "", "tag": "required", "param": ""},
                {"field": "Password", "value": "", "tag": "required", "param": ""}
            ]
        })
    );
}

#[actix_web::test]
async fn missing_fields_are_treated_as_empty() {
    let (users, tokens) = untouched_ports();
    let (status, body) = post_json(users, tokens, json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["invalidArgs"].as_array().map(Vec::len), Some(2));
}

#[rstest]
#[case(
    json!({"email": "bob@bob.com", "password": "supe"}),
    json!([{"field": "Password", "value": "supe", "tag": "gte", "param": "6"}])
)]
#[case(
    json!({
        "email": "bob@bob.com",
        "password": "super12324jhklafsdjhflkjweyruasdljkfhasdldfjkhasdkljhrleqwwjkrhlqwejrhasdflkjhasdf"
    }),
    json!([{
        "field": "Password",
        "value": "super12324jhklafsdjhflkjweyruasdljkfhasdldfjkhasdkljhrleqwwjkrhlqwejrhasdflkjhasdf",
        "tag": "lte",
        "param": "30"
    }])
)]
#[case(
    json!({"email": "bob@bob", "password": "avalidpassword"}),
    json!([{"field": "Email", "value": "bob@bob", "tag": "email", "param": ""}])
)]
#[actix_web::test]
async fn invalid_fields_are_rejected_without_calling_ports(
    #[case] payload: Value,
    #[case] expected_args: Value,
) {
    let (users, tokens) = untouched_ports();
    let (status, body) = post_json(users, tokens, payload).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["type"], "BADREQUEST");
    assert_eq!(body["invalidArgs"], expected_args);
}

#[actix_web::test]
async fn duplicate_email_returns_conflict_after_one_user_call() {
    let mut users = MockUserService::new();
    users
        .expect_sign_up()
        .withf(|user| user.email() == "bob@bob.com" && user.password() == "avalidpassword")
        .times(1)
        .return_once(|user| Err(UserServiceError::email_taken(user.email())));
    let mut tokens = MockTokenService::new();
    tokens.expect_new_pair_from_user().never();

    let (status, body) = post_json(
        users,
        tokens,
        json!({"email": "bob@bob.com", "password": "avalidpassword"}),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        body,
        json!({"error": {
            "type": "CONFLICT",
            "message": "resource: email with value: bob@bob.com already exists"
        }})
    );
}

#[actix_web::test]
async fn successful_signup_returns_created_with_tokens() {
    let mut users = MockUserService::new();
    users
        .expect_sign_up()
        .times(1)
        .return_once(|user| Ok(stored_user(user.email())));
    let mut tokens = MockTokenService::new();
    tokens
        .expect_new_pair_from_user()
        .withf(|user, prior| user.email() == "bob@bob.com" && prior.is_none())
        .times(1)
        .return_once(|_, _| Ok(TokenPair::new("access", "refresh")));

    let request = actix_test::TestRequest::post()
        .set_json(json!({"email": "bob@bob.com", "password": "avalidpassword"}));
    let (status, trace_id, body) = post_raw(users, tokens, request).await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(trace_id.is_some());
    assert_eq!(
        body,
        json!({"tokens": {"accessToken": "access", "refreshToken": "refresh"}})
    );
}

#[rstest]
#[case(
    TokenServiceError::issuance("hmac key missing"),
    StatusCode::INTERNAL_SERVER_ERROR,
    "INTERNAL",
    "Internal server error."
)]
#[case(
    TokenServiceError::unavailable("redis timeout"),
    StatusCode::SERVICE_UNAVAILABLE,
    "SERVICE_UNAVAILABLE",
    "Service unavailable or timed out"
)]
#[actix_web::test]
async fn token_failures_are_reported_without_detail(
    #[case] failure: TokenServiceError,
    #[case] expected_status: StatusCode,
    #[case] expected_type: &str,
    #[case] expected_message: &str,
) {
    let mut users = MockUserService::new();
    users
        .expect_sign_up()
        .times(1)
        .return_once(|user| Ok(stored_user(user.email())));
    let mut tokens = MockTokenService::new();
    tokens
        .expect_new_pair_from_user()
        .times(1)
        .return_once(move |_, _| Err(failure));

    let (status, body) = post_json(
        users,
        tokens,
        json!({"email": "bob@bob.com", "password": "avalidpassword"}),
    )
    .await;

    assert_eq!(status, expected_status);
    assert_eq!(
        body,
        json!({"error": {"type": expected_type, "message": expected_message}})
    );
}

#[rstest]
#[case("{\"email\": \"bob@bob.com\", ")]
#[case("[1, 2, 3]")]
#[case(r#"["bob@bob.com","avalidpassword"]"#)]
#[case("{\"email\": 5, \"password\": \"avalidpassword\"}")]
#[actix_web::test]
async fn malformed_bodies_are_bad_requests_without_field_list(#[case] raw: &'static str) {
    let (users, tokens) = untouched_ports();
    let request = actix_test::TestRequest::post()
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload(raw);
    let (status, trace_id, body) = post_raw(users, tokens, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(trace_id.is_some());
    assert_eq!(
        body,
        json!({"error": {
            "type": "BADREQUEST",
            "message": "Bad request. Reason: Malformed request body"
        }})
    );
}

#[actix_web::test]
async fn non_json_content_type_is_unsupported() {
    let (users, tokens) = untouched_ports();
    let request = actix_test::TestRequest::post()
        .insert_header((header::CONTENT_TYPE, "text/plain"))
        .set_payload("email=bob@bob.com");
    let (status, _, body) = post_raw(users, tokens, request).await;

    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(
        body,
        json!({"error": {
            "type": "UNSUPPORTEDMEDIATYPE",
            "message": "/signUp only accepts Content-Type application/json"
        }})
    );
}

#[actix_web::test]
async fn oversized_body_is_rejected() {
    let (users, tokens) = untouched_ports();
    let payload = json!({
        "email": "bob@bob.com",
        "password": "p".repeat(TEST_JSON_LIMIT),
    });
    let request = actix_test::TestRequest::post().set_json(payload);
    let (status, _, body) = post_raw(users, tokens, request).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["error"]["type"], "PAYLOADTOOLARGE");
    let message = body["error"]["message"].as_str().expect("message string");
    assert!(message.starts_with(&format!("Max payload size of {TEST_JSON_LIMIT} exceeded")));
}
