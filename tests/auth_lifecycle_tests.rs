//! Integration tests for logging in and keeping the session.
//!
//! These tests run the client against a wiremock server standing in for the
//! PurrSong endpoint.

mod common;

use common::{
    create_client, graphql_error, litter_box_locations, mount_cookie, mount_logins, operation,
    received_operations, COOKIE,
};
use lavviebot_api::{
    Email, EndpointUrl, LavviebotClient, LavviebotConfig, LavviebotError, Password, Session,
    RATE_LIMITED_MESSAGE,
};
use serde_json::json;
use wiremock::matchers::{header, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Lazy Login Tests
// ============================================================================

#[tokio::test]
async fn test_first_authenticated_call_logs_in_exactly_once() {
    let server = MockServer::start().await;
    mount_cookie(&server, 1).await;
    mount_logins(&server, &["tok-1"], false).await;
    Mock::given(method("POST"))
        .and(operation("IotMainDrawerLocations"))
        .and(header("cookie", COOKIE))
        .and(header("authorization", "tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(litter_box_locations()))
        .expect(2)
        .mount(&server)
        .await;

    let client = create_client(&server);
    client.discover_litter_boxes().await.unwrap();
    client.discover_litter_boxes().await.unwrap();

    assert_eq!(
        received_operations(&server).await,
        vec![
            "CheckServerStatus",
            "Login",
            "IotMainDrawerLocations",
            "IotMainDrawerLocations"
        ]
    );
}

#[tokio::test]
async fn test_concurrent_first_calls_share_one_login() {
    let server = MockServer::start().await;
    mount_cookie(&server, 1).await;
    mount_logins(&server, &["tok-1"], false).await;
    Mock::given(method("POST"))
        .and(operation("IotMainDrawerLocations"))
        .and(header("authorization", "tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(litter_box_locations()))
        .expect(3)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let (a, b, c) = tokio::join!(
        client.discover_litter_boxes(),
        client.discover_litter_boxes(),
        client.discover_litter_boxes()
    );

    assert!(a.is_ok() && b.is_ok() && c.is_ok());
}

// ============================================================================
// Explicit Authentication Tests
// ============================================================================

#[tokio::test]
async fn test_authenticate_returns_user_id_and_fills_session() {
    let server = MockServer::start().await;
    mount_cookie(&server, 1).await;
    mount_logins(&server, &["tok-1"], true).await;

    let client = create_client(&server);
    let user_id = client.authenticate().await.unwrap();
    let session = client.session().await;

    assert_eq!(user_id, 42);
    assert!(session.is_authenticated());
    assert_eq!(session.cookie.as_deref(), Some(COOKIE));
    assert_eq!(session.bearer_token.as_deref(), Some("tok-1"));
    assert_eq!(session.has_cat, Some(true));
}

#[tokio::test]
async fn test_authenticate_twice_runs_full_sequence_twice() {
    let server = MockServer::start().await;
    mount_cookie(&server, 2).await;
    mount_logins(&server, &["tok-1", "tok-2"], false).await;

    let client = create_client(&server);
    client.authenticate().await.unwrap();
    assert_eq!(client.session().await.bearer_token.as_deref(), Some("tok-1"));

    client.authenticate().await.unwrap();
    let session = client.session().await;
    assert_eq!(session.cookie.as_deref(), Some(COOKIE));
    assert_eq!(session.bearer_token.as_deref(), Some("tok-2"));
}

// ============================================================================
// Login Failure Tests
// ============================================================================

#[tokio::test]
async fn test_rejected_login_is_terminal_and_sends_nothing_else() {
    let server = MockServer::start().await;
    mount_cookie(&server, 1).await;
    Mock::given(method("POST"))
        .and(operation("Login"))
        .respond_with(graphql_error("Invalid email or password."))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(operation("IotMainDrawerLocations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(litter_box_locations()))
        .expect(0)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let result = client.discover_litter_boxes().await;

    assert!(matches!(
        result,
        Err(LavviebotError::Auth { message }) if message == "Invalid email or password."
    ));
    assert!(!client.session().await.is_authenticated());
}

#[tokio::test]
async fn test_failed_reauthentication_keeps_previous_session() {
    let server = MockServer::start().await;
    mount_cookie(&server, 1).await;
    mount_logins(&server, &["tok-1"], false).await;

    let client = create_client(&server);
    client.authenticate().await.unwrap();

    // The cookie endpoint now fails.
    server.reset().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let result = client.authenticate().await;
    assert!(matches!(result, Err(LavviebotError::Auth { .. })));

    let session = client.session().await;
    assert_eq!(session.bearer_token.as_deref(), Some("tok-1"));
}

#[tokio::test]
async fn test_throttled_status_check_is_rate_limited_without_login() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(operation("CheckServerStatus"))
        .respond_with(graphql_error(RATE_LIMITED_MESSAGE))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(operation("Login"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let result = client.authenticate().await;

    assert!(matches!(
        result,
        Err(LavviebotError::RateLimited { status: 200, ref message }) if message == RATE_LIMITED_MESSAGE
    ));
    assert_eq!(client.session().await, Session::default());
}

#[tokio::test]
async fn test_throttled_login_fails_first_call_with_rate_limited() {
    let server = MockServer::start().await;
    mount_cookie(&server, 1).await;
    Mock::given(method("POST"))
        .and(operation("Login"))
        .respond_with(graphql_error(RATE_LIMITED_MESSAGE))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(operation("IotMainDrawerLocations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(litter_box_locations()))
        .expect(0)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let result = client.discover_litter_boxes().await;

    assert!(matches!(
        result,
        Err(LavviebotError::RateLimited { status: 200, .. })
    ));
    assert_eq!(client.session().await, Session::default());
}

#[tokio::test]
async fn test_throttled_reauthentication_keeps_previous_session() {
    let server = MockServer::start().await;
    mount_cookie(&server, 1).await;
    mount_logins(&server, &["tok-1"], false).await;

    let client = create_client(&server);
    client.authenticate().await.unwrap();
    let before = client.session().await;

    server.reset().await;
    Mock::given(method("POST"))
        .and(operation("CheckServerStatus"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "errors": [{"message": RATE_LIMITED_MESSAGE}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = client.authenticate().await;

    assert!(matches!(
        result,
        Err(LavviebotError::RateLimited { status: 429, .. })
    ));
    assert_eq!(client.session().await, before);
}

#[tokio::test]
async fn test_unreachable_endpoint_is_network_error() {
    let config = LavviebotConfig::builder()
        .email(Email::new("owner@example.com").unwrap())
        .password(Password::new("secret").unwrap())
        .endpoint(EndpointUrl::new("http://127.0.0.1:1").unwrap())
        .build()
        .unwrap();
    let client = LavviebotClient::new(config).unwrap();

    let result = client.authenticate().await;
    assert!(matches!(result, Err(LavviebotError::Network(_))));
}
