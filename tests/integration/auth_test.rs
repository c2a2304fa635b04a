//! Integration tests for the auth endpoints: login, refresh, logout, me.

mod helpers;

use http::StatusCode;
use serde_json::json;

use helpers::{TestApp, test_config};

#[tokio::test]
async fn login_returns_access_token_and_refresh_cookie() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/login",
            Some(json!({ "username": "demo", "password": "demo" })),
            None,
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["accessToken"].as_str().is_some());
    assert_eq!(response.body["tokenType"], "Bearer");
    assert_eq!(response.body["expiresInSec"], 10);

    let cookie = response.set_cookie().expect("login sets the refresh cookie");
    assert!(cookie.starts_with("refresh_token="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));
    assert!(cookie.contains("Path=/auth/refresh"));
    assert!(cookie.contains("Max-Age=60"));
}

#[tokio::test]
async fn login_rejects_bad_credentials() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/login",
            Some(json!({ "username": "demo", "password": "wrong" })),
            None,
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["message"], "Bad credentials");
    assert!(response.set_cookie().is_none());
}

#[tokio::test]
async fn me_returns_subject_for_valid_token() {
    let app = TestApp::new();
    let (token, _) = app.login().await;

    let response = app.request("GET", "/me", None, Some(&token), None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["userId"], "user-1");
}

#[tokio::test]
async fn me_without_token_is_unauthorized() {
    let app = TestApp::new();

    let response = app.request("GET", "/me", None, None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn me_with_garbage_token_is_unauthorized() {
    let app = TestApp::new();

    let response = app
        .request("GET", "/me", None, Some("not-a-jwt"), None)
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn refresh_mints_a_working_access_token() {
    let app = TestApp::new();
    let (_, cookie) = app.login().await;
    let cookie = cookie.expect("login sets the refresh cookie");

    let response = app
        .request("POST", "/auth/refresh", None, None, Some(&cookie))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let token = response.body["accessToken"].as_str().unwrap().to_string();

    let me = app.request("GET", "/me", None, Some(&token), None).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["userId"], "user-1");
}

#[tokio::test]
async fn refresh_without_cookie_is_unauthorized() {
    let app = TestApp::new();

    let response = app.request("POST", "/auth/refresh", None, None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["message"], "Missing refresh cookie");
}

#[tokio::test]
async fn refresh_with_access_token_in_cookie_is_unauthorized() {
    let app = TestApp::new();
    let (token, _) = app.login().await;

    // An access token smuggled into the refresh cookie must not pass.
    let response = app
        .request(
            "POST",
            "/auth/refresh",
            None,
            None,
            Some(&format!("refresh_token={token}")),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_revokes_the_refresh_session() {
    let app = TestApp::new();
    let (_, cookie) = app.login().await;
    let cookie = cookie.expect("login sets the refresh cookie");

    let logout = app
        .request("POST", "/logout", None, None, Some(&cookie))
        .await;
    assert_eq!(logout.status, StatusCode::OK);

    // Logout clears the cookie on its scoped path.
    let cleared = logout.set_cookie().expect("logout clears the cookie");
    assert!(cleared.starts_with("refresh_token="));
    assert!(cleared.contains("Path=/auth/refresh"));

    // The token itself is still valid JWT-wise, but its session is gone.
    let response = app
        .request("POST", "/auth/refresh", None, None, Some(&cookie))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["message"], "Refresh session not found");
}

#[tokio::test]
async fn logout_without_cookie_still_succeeds_and_clears() {
    let app = TestApp::new();

    let response = app.request("POST", "/logout", None, None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "Logged out");

    // Browsers never send the path-scoped cookie to /logout, so the clear
    // instruction must be issued even when no cookie arrived.
    let cleared = response.set_cookie().expect("logout clears the cookie");
    assert!(cleared.starts_with("refresh_token="));
    assert!(cleared.contains("Path=/auth/refresh"));
    assert!(cleared.contains("Max-Age=0"));
}

#[tokio::test]
async fn logout_is_idempotent() {
    let app = TestApp::new();
    let (_, cookie) = app.login().await;
    let cookie = cookie.expect("login sets the refresh cookie");

    for _ in 0..2 {
        let response = app
            .request("POST", "/logout", None, None, Some(&cookie))
            .await;
        assert_eq!(response.status, StatusCode::OK);
    }
}

#[tokio::test]
async fn stage_one_login_sets_no_refresh_cookie() {
    let app = TestApp::with_config(test_config(1));

    let response = app
        .request(
            "POST",
            "/login",
            Some(json!({ "username": "demo", "password": "demo" })),
            None,
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["accessToken"].as_str().is_some());
    assert!(response.set_cookie().is_none());
}

#[tokio::test]
async fn stage_one_refresh_is_a_bad_request() {
    let app = TestApp::with_config(test_config(1));

    let response = app
        .request(
            "POST",
            "/auth/refresh",
            None,
            None,
            Some("refresh_token=whatever"),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn health_endpoint_is_open() {
    let app = TestApp::new();

    let response = app.request("GET", "/health", None, None, None).await;

    assert_eq!(response.status, StatusCode::OK);
}
