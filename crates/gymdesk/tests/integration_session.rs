//! Bearer tokens, session expiry and login persistence

mod common;

use gymdesk::session::{FileStorage, LOGIN_ROUTE, TOKEN_KEY};
use gymdesk::{Client, Error, LoginRequest, Role, SessionStorage};
use rstest::rstest;
use secrecy::ExposeSecret;
use std::sync::Arc;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn unauthenticated() -> ResponseTemplate {
    ResponseTemplate::new(401).set_body_string(r#"{"message":"Unauthenticated."}"#)
}

#[tokio::test]
async fn test_bearer_token_and_json_headers_are_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/workout-plans/my-plans"))
        .and(header("authorization", format!("Bearer {}", common::TEST_TOKEN).as_str()))
        .and(header("accept", "application/json"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(1)
        .mount(&server)
        .await;
    let (client, _) = common::client_with_token(&format!("{}/api", server.uri()));

    let plans = client.workout_plans().mine().await.unwrap();

    assert!(plans.is_empty());
    server.verify().await;
}

#[tokio::test]
async fn test_no_authorization_header_without_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/members"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .mount(&server)
        .await;
    let (client, _) = common::anonymous_client(&format!("{}/api", server.uri()));

    client.members().list().await.unwrap();

    let received = server.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
    assert!(!received[0].headers.contains_key("authorization"));
}

#[rstest]
#[case::members("members")]
#[case::payments("payments")]
#[case::memberships("memberships")]
#[case::workout_plans("workout-plans")]
#[tokio::test]
async fn test_401_clears_session_and_redirects_once(#[case] resource: &str) {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/api/{resource}")))
        .respond_with(unauthenticated())
        .expect(1)
        .mount(&server)
        .await;
    let (client, navigator) = common::client_with_token(&format!("{}/api", server.uri()));

    let err = match resource {
        "members" => client.members().list().await.map(|_| ()),
        "payments" => client.payments().list().await.map(|_| ()),
        "memberships" => client.memberships().list().await.map(|_| ()),
        _ => client.workout_plans().list().await.map(|_| ()),
    }
    .unwrap_err();

    assert!(matches!(err, Error::Unauthorized(_)));
    assert!(!client.session().is_authenticated());
    assert_eq!(navigator.routes(), vec![LOGIN_ROUTE.to_string()]);
    server.verify().await;
}

#[tokio::test]
async fn test_each_401_redirects_again() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/attendance/mark"))
        .respond_with(unauthenticated())
        .expect(2)
        .mount(&server)
        .await;
    let (client, navigator) = common::client_with_token(&format!("{}/api", server.uri()));

    let _ = client.attendance().mark().await;
    let _ = client.attendance().mark().await;

    assert_eq!(navigator.routes().len(), 2);
}

#[tokio::test]
async fn test_403_leaves_session_alone() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/payments"))
        .respond_with(ResponseTemplate::new(403).set_body_string(r#"{"message":"Forbidden"}"#))
        .mount(&server)
        .await;
    let (client, navigator) = common::client_with_token(&format!("{}/api", server.uri()));

    let err = client.payments().list().await.unwrap_err();

    assert!(matches!(err, Error::Forbidden(_)));
    assert!(client.session().is_authenticated());
    assert!(navigator.routes().is_empty());
}

#[tokio::test]
async fn test_login_persists_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/api/login"))
        .and(body_json(serde_json::json!({
            "email": "admin@gym.test",
            "password": "password"
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(common::load_response_fixture("auth_login")),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/api/user"))
        .and(header("authorization", "Bearer 1|QZp8mXc2vFhK0sLwR7nYtB3dGe"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            serde_json::from_str::<serde_json::Value>(&common::load_response_fixture("auth_login"))
                .unwrap()["user"]
                .clone(),
        ))
        .expect(1)
        .mount(&server)
        .await;
    let (client, _) = common::anonymous_client(&format!("{}/api", server.uri()));

    let auth = client
        .auth()
        .login(&LoginRequest::new("admin@gym.test", "password"))
        .await
        .unwrap();

    assert_eq!(auth.user.role, Role::Admin);
    let token = client.session().token().unwrap();
    assert_eq!(token.expose_secret(), "1|QZp8mXc2vFhK0sLwR7nYtB3dGe");
    assert_eq!(client.session().user().unwrap().email, "admin@gym.test");

    let me = client.auth().me().await.unwrap();
    assert_eq!(me.id, auth.user.id);
    server.verify().await;
}

#[tokio::test]
async fn test_failed_login_stores_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/api/login"))
        .respond_with(
            ResponseTemplate::new(422)
                .set_body_string(r#"{"message":"The provided credentials are incorrect."}"#),
        )
        .mount(&server)
        .await;
    let (client, navigator) = common::anonymous_client(&format!("{}/api", server.uri()));

    let err = client
        .auth()
        .login(&LoginRequest::new("admin@gym.test", "wrong"))
        .await
        .unwrap_err();

    assert_eq!(err.normalize().message, "The provided credentials are incorrect.");
    assert!(!client.session().is_authenticated());
    assert!(navigator.routes().is_empty());
}

#[tokio::test]
async fn test_logout_clears_session_even_when_server_fails() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/api/logout"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Server Error"))
        .mount(&server)
        .await;
    let (client, _) = common::client_with_token(&format!("{}/api", server.uri()));

    let err = client.auth().logout().await.unwrap_err();

    assert!(matches!(err, Error::InternalServerError(_)));
    assert!(!client.session().is_authenticated());
}

#[tokio::test]
async fn test_file_session_survives_restart() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/api/login"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(common::load_response_fixture("auth_login")),
        )
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("session.json");
    let base = format!("{}/api", server.uri());

    let client = Client::builder()
        .base_url(&base)
        .session_storage(Arc::new(FileStorage::open(&file).unwrap()))
        .build()
        .unwrap();
    client
        .auth()
        .login(&LoginRequest::new("admin@gym.test", "password"))
        .await
        .unwrap();
    drop(client);

    let reopened = FileStorage::open(&file).unwrap();
    assert_eq!(
        reopened.get(TOKEN_KEY).as_deref(),
        Some("1|QZp8mXc2vFhK0sLwR7nYtB3dGe")
    );
}
