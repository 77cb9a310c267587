//! `HttpTransport` tests against a local mock server.

use std::time::Duration;

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde_json::{json, Value};
use wiremock::matchers::{body_json, header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use stream_chat::{ChatClient, ClientConfig, Credentials, Error, RetryConfig};

fn client_for(server: &MockServer, retry: RetryConfig) -> ChatClient {
    let config = ClientConfig::default()
        .with_base_url(server.uri())
        .with_timeout(Duration::from_secs(5))
        .with_retry(retry);
    ChatClient::with_config(Credentials::new("key", "secret"), config).unwrap()
}

fn fast_retry() -> RetryConfig {
    RetryConfig::default()
        .with_max_retries(2)
        .with_delays(Duration::from_millis(1), Duration::from_millis(5))
}

#[tokio::test]
async fn test_signed_request_shape() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/moderation/mute"))
        .and(query_param("api_key", "key"))
        .and(header("stream-auth-type", "jwt"))
        .and(header("content-type", "application/json"))
        .and(header_exists("authorization"))
        .and(header_exists("x-stream-client"))
        .and(body_json(json!({"target_id": "spammer", "user_id": "jane"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"duration": "1.2ms"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, RetryConfig::no_retry());
    client.moderation().mute("spammer", "jane").await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let token = requests[0]
        .headers
        .get("authorization")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();

    let mut validation = Validation::new(Algorithm::HS256);
    validation.required_spec_claims.clear();
    let claims = decode::<Value>(&token, &DecodingKey::from_secret(b"secret"), &validation)
        .unwrap()
        .claims;
    assert_eq!(claims, json!({"server": true}));
}

#[tokio::test]
async fn test_query_and_decoding() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/devices"))
        .and(query_param("user_id", "jane"))
        .and(query_param("api_key", "key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "devices": [{"id": "d1", "user_id": "jane", "push_provider": "apn"}],
            "duration": "0.5ms"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, RetryConfig::no_retry());
    let devices = client.devices().list("jane").await.unwrap();
    assert_eq!(devices.len(), 1);
    assert_eq!(devices[0].id, "d1");
}

#[tokio::test]
async fn test_empty_success_body() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/users/jane"))
        .and(query_param("hard_delete", "true"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, RetryConfig::no_retry());
    client
        .users()
        .delete("jane", &[stream_chat::options::RequestOption::hard_delete()])
        .await
        .unwrap();
}

#[tokio::test]
async fn test_api_error_mapping() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/moderation/ban"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "code": 4,
            "message": "BanUser failed with error: \"target user does not exist\"",
            "StatusCode": 400
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, fast_retry());
    let err = client.moderation().ban("ghost", "admin", None).await.unwrap_err();

    match err {
        Error::Api { status, code, message, .. } => {
            assert_eq!(status, 400);
            assert_eq!(code, Some(4));
            assert!(message.contains("target user does not exist"));
        }
        other => panic!("Expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_rate_limit_not_retried_for_post() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/moderation/mute"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({"code": 9})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, fast_retry());
    let err = client.moderation().mute("a", "b").await.unwrap_err();
    assert!(matches!(err, Error::RateLimited { .. }));
}

#[tokio::test]
async fn test_rate_limit_with_malformed_reset_header() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/moderation/mute"))
        .respond_with(
            ResponseTemplate::new(429).insert_header("x-ratelimit-reset", "-9223372036854775808"),
        )
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/moderation/mute"))
        .respond_with(ResponseTemplate::new(429).insert_header("x-ratelimit-reset", "later"))
        .mount(&server)
        .await;

    let client = client_for(&server, RetryConfig::no_retry());

    let err = client.moderation().mute("a", "b").await.unwrap_err();
    assert!(matches!(err, Error::RateLimited { retry_after_secs: 0 }));

    let err = client.moderation().mute("a", "b").await.unwrap_err();
    assert!(matches!(err, Error::RateLimited { retry_after_secs: 60 }));
}

#[tokio::test]
async fn test_idempotent_request_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/jane/export"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .with_priority(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/users/jane/export"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "jane"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, fast_retry());
    let user = client.users().export("jane", &[]).await.unwrap();
    assert_eq!(user.id, "jane");
}

#[tokio::test]
async fn test_retries_exhausted() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/devices"))
        .respond_with(ResponseTemplate::new(502))
        .expect(3)
        .mount(&server)
        .await;

    let client = client_for(&server, fast_retry());
    let err = client.devices().list("jane").await.unwrap_err();
    assert!(err.is_server_error());
}

#[tokio::test]
async fn test_validation_never_reaches_server() {
    let server = MockServer::start().await;

    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server, RetryConfig::no_retry());
    assert!(client.moderation().mute("", "jane").await.is_err());
    assert!(client.users().export("", &[]).await.is_err());
    assert!(client.devices().delete("jane", "").await.is_err());
}
