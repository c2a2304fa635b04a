//! Shared test helpers for integration tests.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use http::{HeaderMap, Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use authgate_api::{AppState, build_router};
use authgate_core::config::AppConfig;

/// A captured response: status, parsed JSON body, and headers.
pub struct TestResponse {
    /// HTTP status.
    pub status: StatusCode,
    /// Parsed JSON body (Null when the body is not JSON).
    pub body: Value,
    /// Response headers, for Set-Cookie assertions.
    pub headers: HeaderMap,
}

impl TestResponse {
    /// Returns the first Set-Cookie header value, if any.
    pub fn set_cookie(&self) -> Option<String> {
        self.headers
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .map(String::from)
    }

    /// Returns the `name=value` pair of the first Set-Cookie header.
    pub fn cookie_pair(&self) -> Option<String> {
        self.set_cookie()
            .map(|c| c.split(';').next().unwrap_or("").to_string())
    }
}

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
}

impl TestApp {
    /// Create a test application with refresh enabled (stage 2).
    pub fn new() -> Self {
        Self::with_config(test_config(2))
    }

    /// Create a test application from explicit configuration.
    pub fn with_config(config: AppConfig) -> Self {
        let state = AppState::new(config);
        Self {
            router: build_router(state),
        }
    }

    /// Perform a request against the router.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        bearer: Option<&str>,
        cookie: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(path);

        if let Some(token) = bearer {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie.to_string());
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router error");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("failed to read body");
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            body,
            headers,
        }
    }

    /// Log in with the demo credentials; returns (access token, refresh
    /// cookie pair).
    pub async fn login(&self) -> (String, Option<String>) {
        let response = self
            .request(
                "POST",
                "/login",
                Some(serde_json::json!({ "username": "demo", "password": "demo" })),
                None,
                None,
            )
            .await;

        assert_eq!(response.status, StatusCode::OK);
        let token = response.body["accessToken"]
            .as_str()
            .expect("login response carries an access token")
            .to_string();
        (token, response.cookie_pair())
    }
}

/// Configuration for tests: fixed secret, short TTLs, adjustable stage.
pub fn test_config(stage: u8) -> AppConfig {
    let mut config = AppConfig::default();
    config.auth.jwt_secret = "integration-test-secret".to_string();
    config.auth.access_ttl_seconds = 10;
    config.auth.refresh_ttl_seconds = 60;
    config.auth.stage = stage;
    config
}

/// Spawn the app on an ephemeral port; returns its base URL.
pub async fn spawn_app(config: AppConfig) -> String {
    let state = AppState::new(config);
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind test listener");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("server error");
    });

    format!("http://{addr}")
}
