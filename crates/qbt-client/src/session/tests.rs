//! Tests for the Session lifecycle.

use qbt_types::{AuthRejection, QbtError};

use super::Session;
use crate::testutil::{login_response, response};
use crate::transport::MockTransport;

fn logged_in_session() -> Session<MockTransport> {
    let mut session = Session::with_transport(MockTransport::new());
    session.authenticated = true;
    session
}

#[tokio::test]
async fn test_login_success_installs_cookies() {
    let mut mock = MockTransport::new();

    mock.expect_post_form()
        .withf(|endpoint, params| {
            endpoint == "api/v2/auth/login"
                && params.get("username") == Some("admin")
                && params.get("password") == Some("adminadmin")
        })
        .times(1)
        .returning(|_, _| Ok(login_response("SID=abc123; HttpOnly; path=/")));
    mock.expect_install_cookies()
        .withf(|headers| {
            headers
                .get("set-cookie")
                .is_some_and(|v| v.to_str().unwrap().starts_with("SID=abc123"))
        })
        .times(1)
        .return_const(());

    let mut session = Session::with_transport(mock);
    assert!(!session.is_authenticated());

    let result = session.login("admin", "adminadmin").await;

    assert!(result.unwrap());
    assert!(session.is_authenticated());
}

#[tokio::test]
async fn test_login_banned_ip() {
    let mut mock = MockTransport::new();

    mock.expect_post_form()
        .returning(|_, _| Ok(response(403, "Your IP address has been banned")));
    mock.expect_install_cookies().never();

    let mut session = logged_in_session();
    session.transport = mock;
    let result = session.login("admin", "adminadmin").await;

    match result {
        Err(QbtError::AuthenticationRejected { reason, status }) => {
            assert_eq!(reason, AuthRejection::IpBanned);
            assert_eq!(status, 403);
        }
        other => panic!("Expected AuthenticationRejected, got {other:?}"),
    }
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn test_login_unauthorized_status() {
    let mut mock = MockTransport::new();

    mock.expect_post_form()
        .returning(|_, _| Ok(response(401, "")));
    mock.expect_install_cookies().never();

    let mut session = Session::with_transport(mock);
    let result = session.login("admin", "wrong").await;

    match result {
        Err(QbtError::AuthenticationRejected { reason, status }) => {
            assert_eq!(reason, AuthRejection::InvalidCredentials);
            assert_eq!(status, 401);
        }
        other => panic!("Expected AuthenticationRejected, got {other:?}"),
    }
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn test_login_fails_body() {
    let mut mock = MockTransport::new();

    mock.expect_post_form()
        .returning(|_, _| Ok(response(200, "Fails.")));
    mock.expect_install_cookies().never();

    let mut session = Session::with_transport(mock);
    let result = session.login("admin", "wrong").await;

    match result {
        Err(QbtError::AuthenticationRejected { reason, status }) => {
            assert_eq!(reason, AuthRejection::InvalidCredentials);
            assert_eq!(status, 200);
        }
        other => panic!("Expected AuthenticationRejected, got {other:?}"),
    }
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn test_login_network_error_keeps_flag() {
    let mut mock = MockTransport::new();

    mock.expect_post_form()
        .returning(|_, _| Err(QbtError::Network("connection refused".to_string())));

    let mut session = logged_in_session();
    session.transport = mock;
    let result = session.login("admin", "adminadmin").await;

    assert!(matches!(result, Err(QbtError::Network(_))));
    assert!(session.is_authenticated());
}

#[tokio::test]
async fn test_logout_success() {
    let mut mock = MockTransport::new();

    mock.expect_get()
        .withf(|endpoint, params| endpoint == "api/v2/auth/logout" && params.is_empty())
        .times(1)
        .returning(|_, _| Ok(response(200, "")));

    let mut session = logged_in_session();
    session.transport = mock;
    let result = session.logout().await;

    assert!(!result.unwrap());
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn test_logout_failure_keeps_flag() {
    let mut mock = MockTransport::new();

    mock.expect_get()
        .returning(|_, _| Ok(response(500, "")));

    let mut session = logged_in_session();
    session.transport = mock;
    let result = session.logout().await;

    match result {
        Err(QbtError::BadResponse { status, .. }) => assert_eq!(status, 500),
        other => panic!("Expected BadResponse, got {other:?}"),
    }
    assert!(session.is_authenticated());
}

#[test]
fn test_default_base_url() {
    let session = Session::try_new(None).unwrap();
    assert_eq!(session.base_url().as_str(), "http://localhost:8080/");
    assert!(!session.is_authenticated());
}

#[test]
fn test_invalid_base_url() {
    let result = Session::try_new(Some("not-a-valid-url"));
    assert!(matches!(result, Err(QbtError::Request(_))));
}
