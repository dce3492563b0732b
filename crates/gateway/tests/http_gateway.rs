use std::time::Duration;

use gateway::{AuthGateway, GatewayConfig, HttpAuthGateway, TimeoutConfig};
use models::{Credentials, RegistrationRequest};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn gateway_for(server: &MockServer) -> HttpAuthGateway {
    let cfg = GatewayConfig {
        base_url: server.uri(),
        timeout: TimeoutConfig { connect_timeout_secs: 1, read_timeout_secs: 1, write_timeout_secs: 1 },
    };
    HttpAuthGateway::new(&cfg).expect("build gateway")
}

fn session_body() -> serde_json::Value {
    json!({
        "status": 200,
        "message": "Login successful",
        "data": {"token": "abc", "userId": 1, "email": "a@b.com", "name": "A", "role": "USER"}
    })
}

#[tokio::test]
async fn login_success_unwraps_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({"email": "a@b.com", "password": "secret1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(session_body()))
        .expect(1)
        .mount(&server)
        .await;

    let session = gateway_for(&server)
        .login(&Credentials::new("a@b.com", "secret1"))
        .await
        .expect("login ok");
    assert_eq!(session.token(), "abc");
    assert_eq!(session.user_id(), 1);
    assert_eq!(session.email(), "a@b.com");
}

#[tokio::test]
async fn register_sends_default_role_and_phone() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/register"))
        .and(body_json(json!({
            "name": "A", "email": "a@b.com", "password": "secret1",
            "phoneNumber": null, "role": "USER"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(session_body()))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = gateway_for(&server)
        .register(&RegistrationRequest::new("A", "a@b.com", "secret1", None))
        .await;
    assert!(outcome.is_ok());
}

#[tokio::test]
async fn server_message_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "status": 401, "message": "Invalid credentials", "data": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let failure = gateway_for(&server)
        .login(&Credentials::new("a@b.com", "wrong"))
        .await
        .unwrap_err();
    assert_eq!(failure.message(), Some("Invalid credentials"));
}

#[tokio::test]
async fn bare_error_status_uses_reason_phrase() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let failure = gateway_for(&server)
        .login(&Credentials::new("a@b.com", "pw"))
        .await
        .unwrap_err();
    assert_eq!(failure.message(), Some("Forbidden"));
}

#[tokio::test]
async fn bare_register_conflict_uses_fallback_not_reason() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/register"))
        .respond_with(ResponseTemplate::new(409))
        .mount(&server)
        .await;

    let failure = gateway_for(&server)
        .register(&RegistrationRequest::new("A", "a@b.com", "secret1", None))
        .await
        .unwrap_err();
    assert_eq!(failure.message(), Some("Registration failed"));
}

#[tokio::test]
async fn empty_token_is_not_a_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": 200,
            "data": {"token": "", "userId": 1, "email": "a@b.com", "name": "A", "role": "USER"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let failure = gateway_for(&server)
        .login(&Credentials::new("a@b.com", "pw"))
        .await
        .unwrap_err();
    assert_eq!(failure.message(), Some("malformed response: empty token"));
}

#[tokio::test]
async fn success_without_data_uses_message_or_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/register"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": 200, "data": null})))
        .mount(&server)
        .await;

    let failure = gateway_for(&server)
        .register(&RegistrationRequest::new("A", "a@b.com", "secret1", None))
        .await
        .unwrap_err();
    assert_eq!(failure.message(), Some("Registration failed"));
}

#[tokio::test]
async fn malformed_success_body_is_a_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let failure = gateway_for(&server)
        .login(&Credentials::new("a@b.com", "pw"))
        .await
        .unwrap_err();
    assert!(failure.to_string().starts_with("malformed response"), "{failure}");
}

#[tokio::test]
async fn slow_server_times_out_after_one_attempt() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(session_body()).set_delay(Duration::from_secs(5)))
        .expect(1)
        .mount(&server)
        .await;

    let failure = gateway_for(&server)
        .login(&Credentials::new("a@b.com", "pw"))
        .await
        .unwrap_err();
    assert_eq!(failure.message(), Some("timeout"));
}

#[tokio::test]
async fn validate_sends_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/validate"))
        .and(header("Authorization", "Bearer abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(session_body()))
        .expect(1)
        .mount(&server)
        .await;

    let session = gateway_for(&server).validate_token("abc").await.expect("valid");
    assert_eq!(session.name(), "A");
}

#[tokio::test]
async fn refused_connection_is_a_failure() {
    // bind then drop to get a port nobody listens on
    let port = std::net::TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap().port();
    let cfg = GatewayConfig { base_url: format!("http://127.0.0.1:{port}"), ..GatewayConfig::default() };
    let failure = HttpAuthGateway::new(&cfg)
        .unwrap()
        .login(&Credentials::new("a@b.com", "pw"))
        .await
        .unwrap_err();
    assert!(failure.message().is_some());
}
