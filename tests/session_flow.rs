mod common;

use common::{build_app, mock_rejected_session, mock_session, test_config};
use learnhub::auth::{Navigation, Route};
use learnhub::client::ClientError;
use learnhub::models::TokenPair;
use mockito::{Matcher, Server};
use serde_json::json;

#[tokio::test]
async fn test_no_tokens_no_network() {
    let mut server = Server::new_async().await;
    let any = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;
    let dir = tempfile::tempdir().unwrap();
    let app = build_app(test_config(&server.url(), dir.path()));

    assert!(!app.verifier.check_authenticated().await);
    assert_eq!(
        app.guard.enter(Route::Resources).await,
        Navigation::Redirected {
            from: Route::Resources,
            to: Route::SignIn
        }
    );
    any.assert_async().await;
}

#[tokio::test]
async fn test_signin_persists_and_survives_restart() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/auth/signin")
        .match_body(Matcher::Json(
            json!({"email": "ada@example.com", "password": "pw"}),
        ))
        .with_status(200)
        .with_body(r#"{"access_token": "a1", "refresh_token": "r1", "token_type": "bearer"}"#)
        .create_async()
        .await;
    let session = mock_session(&mut server, "a1").await;
    let refresh = server
        .mock("POST", "/auth/refresh")
        .expect(0)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let app = build_app(test_config(&server.url(), dir.path()));
    app.auth().signin("ada@example.com", "pw").await.unwrap();

    // A fresh process reads the same token file.
    let restarted = build_app(test_config(&server.url(), dir.path()));
    assert_eq!(restarted.store.get(), TokenPair::new("a1", "r1"));
    assert_eq!(
        restarted.guard.enter(Route::Home).await,
        Navigation::Authorized(Route::Home)
    );

    session.assert_async().await;
    refresh.assert_async().await;
}

#[tokio::test]
async fn test_expired_access_token_refreshed_on_guarded_entry() {
    let mut server = Server::new_async().await;
    mock_rejected_session(&mut server, "old-a").await;
    server
        .mock("POST", "/auth/refresh")
        .match_body(Matcher::Json(json!({"refresh_token": "old-r"})))
        .with_status(200)
        .with_body(r#"{"access_token": "new-a", "refresh_token": "new-r", "token_type": "bearer"}"#)
        .expect(1)
        .create_async()
        .await;
    mock_session(&mut server, "new-a").await;

    let dir = tempfile::tempdir().unwrap();
    let app = build_app(test_config(&server.url(), dir.path()));
    app.store.save("old-a", "old-r");

    assert!(app.verifier.check_authenticated().await);
    assert_eq!(app.store.get(), TokenPair::new("new-a", "new-r"));
}

#[tokio::test]
async fn test_both_tokens_expired_clears_store() {
    let mut server = Server::new_async().await;
    mock_rejected_session(&mut server, "old-a").await;
    let refresh = server
        .mock("POST", "/auth/refresh")
        .with_status(401)
        .with_body(r#"{"detail": "Invalid refresh token"}"#)
        .expect(1)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let app = build_app(test_config(&server.url(), dir.path()));
    app.store.save("old-a", "old-r");

    assert!(!app.verifier.check_authenticated().await);
    assert!(app.store.get().is_empty());

    // Nothing left to send, so the next check stays local.
    assert!(!app.verifier.check_authenticated().await);
    refresh.assert_async().await;
}

#[tokio::test]
async fn test_gateway_refreshes_once_then_gives_up() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/resources")
        .match_header("authorization", "Bearer old-a")
        .with_status(401)
        .with_body(r#"{"detail": "Token has expired"}"#)
        .expect(1)
        .create_async()
        .await;
    server
        .mock("POST", "/auth/refresh")
        .with_status(200)
        .with_body(r#"{"access_token": "new-a", "refresh_token": "new-r", "token_type": "bearer"}"#)
        .expect(1)
        .create_async()
        .await;
    let retried = server
        .mock("GET", "/api/resources")
        .match_header("authorization", "Bearer new-a")
        .with_status(401)
        .with_body(r#"{"detail": "User not found"}"#)
        .expect(1)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let app = build_app(test_config(&server.url(), dir.path()));
    app.store.save("old-a", "old-r");

    let err = app.resources().list().await.unwrap_err();
    assert!(matches!(err, ClientError::Unauthorized { ref detail } if detail == "User not found"));
    retried.assert_async().await;
    assert_eq!(app.store.get(), TokenPair::new("new-a", "new-r"));
}

#[tokio::test]
async fn test_logout_clears_even_when_backend_fails() {
    let mut server = Server::new_async().await;
    let logout = server
        .mock("POST", "/auth/logout")
        .match_header("authorization", "Bearer a1")
        .match_body(Matcher::Json(json!({"refresh_token": "r1"})))
        .with_status(500)
        .expect(1)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let app = build_app(test_config(&server.url(), dir.path()));
    app.store.save("a1", "r1");

    app.auth().logout().await;

    logout.assert_async().await;
    assert!(app.store.get().is_empty());
    let restarted = build_app(test_config(&server.url(), dir.path()));
    assert!(restarted.store.get().is_empty());
}
