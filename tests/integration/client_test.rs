//! End-to-end tests: the client crate against a live server instance.

mod helpers;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use futures::future::join_all;

use authgate_client::client::AuthClient;
use authgate_client::error::ClientError;
use authgate_client::token_cache::ChangeCause;

use helpers::{spawn_app, test_config};

#[tokio::test]
async fn expired_token_is_refreshed_transparently() {
    let base_url = spawn_app(test_config(2)).await;
    let client = AuthClient::connect(&base_url).expect("client builds");

    let refreshes = Arc::new(AtomicUsize::new(0));
    {
        let refreshes = Arc::clone(&refreshes);
        client.cache().subscribe(Arc::new(move |change| {
            if change.cause == ChangeCause::Refresh {
                refreshes.fetch_add(1, Ordering::SeqCst);
            }
        }));
    }

    client.login("demo", "demo").await.expect("login succeeds");

    let me = client.me().await.expect("me succeeds after login");
    assert_eq!(me["userId"], "user-1");
    assert_eq!(refreshes.load(Ordering::SeqCst), 0);

    // Simulate an expired access token: replace the cached token with
    // garbage so the next call gets a 401 and must refresh via the cookie.
    client
        .cache()
        .set("stale-token".to_string(), 1, ChangeCause::Login);

    let me = client.me().await.expect("me recovers via refresh");
    assert_eq!(me["userId"], "user-1");
    assert_eq!(refreshes.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn refresh_after_logout_is_rejected() {
    let base_url = spawn_app(test_config(2)).await;
    let client = AuthClient::connect(&base_url).expect("client builds");

    client.login("demo", "demo").await.expect("login succeeds");
    client.logout().await;

    assert!(client.cache().current().is_none());

    let err = client
        .restore_session()
        .await
        .expect_err("restore after logout must fail");
    assert!(matches!(err, ClientError::RefreshRejected(_)));
}

#[tokio::test]
async fn stale_token_call_after_logout_surfaces_rejection() {
    let base_url = spawn_app(test_config(2)).await;
    let client = AuthClient::connect(&base_url).expect("client builds");

    client.login("demo", "demo").await.expect("login succeeds");
    client.logout().await;

    // Install an unusable token: the call gets a 401, the refresh attempt
    // is rejected because the cookie is gone, and that rejection wins.
    client
        .cache()
        .set("stale-token".to_string(), 1, ChangeCause::Login);

    let err = client.me().await.expect_err("call after logout must fail");
    assert!(matches!(err, ClientError::RefreshRejected(_)));
    assert!(client.cache().current().is_none());
}

#[tokio::test]
async fn concurrent_calls_share_one_refresh() {
    let base_url = spawn_app(test_config(2)).await;
    let client = Arc::new(AuthClient::connect(&base_url).expect("client builds"));

    let refreshes = Arc::new(AtomicUsize::new(0));
    {
        let refreshes = Arc::clone(&refreshes);
        client.cache().subscribe(Arc::new(move |change| {
            if change.cause == ChangeCause::Refresh {
                refreshes.fetch_add(1, Ordering::SeqCst);
            }
        }));
    }

    client.login("demo", "demo").await.expect("login succeeds");
    client
        .cache()
        .set("stale-token".to_string(), 1, ChangeCause::Login);

    let calls = (0..8).map(|_| {
        let client = Arc::clone(&client);
        tokio::spawn(async move { client.me().await })
    });

    for result in join_all(calls).await {
        let me = result.expect("task completes").expect("call succeeds");
        assert_eq!(me["userId"], "user-1");
    }

    assert_eq!(refreshes.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn login_with_bad_credentials_fails_cleanly() {
    let base_url = spawn_app(test_config(2)).await;
    let client = AuthClient::connect(&base_url).expect("client builds");

    let err = client
        .login("demo", "wrong")
        .await
        .expect_err("bad password must fail");
    assert!(matches!(err, ClientError::BadCredentials(_)));
    assert!(client.cache().current().is_none());
}
