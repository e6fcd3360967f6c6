//! End-to-end lookups through the HTTP surface with Secret Manager and the
//! metadata server mocked out.

use secretsd_core::ResolverConfig;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;
use common::TestServer;

const TOKEN_PATH: &str = "/computeMetadata/v1/instance/service-accounts/default/token";

async fn start_service(upstream: &MockServer) -> TestServer {
    let config = ResolverConfig::remote("acme-prod")
        .with_metadata_token_url(format!("{}{TOKEN_PATH}", upstream.uri()))
        .with_secret_manager_endpoint(format!("{}/v1beta1", upstream.uri()));
    let resolver = secretsd::from_config(&config).unwrap();
    TestServer::start(resolver).await
}

async fn get_secret(server: &TestServer, name: &str) -> (u16, String) {
    let response = reqwest::Client::new()
        .get(server.url("/get-secret"))
        .header("secret", name)
        .send()
        .await
        .unwrap();
    let status = response.status().as_u16();
    (status, response.text().await.unwrap())
}

#[tokio::test]
async fn test_secret_manager_value_is_served() {
    let upstream = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(TOKEN_PATH))
        .and(header("Metadata-Flavor", "Google"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "access_token": "tok" })))
        .expect(1)
        .mount(&upstream)
        .await;
    Mock::given(method("GET"))
        .and(path(
            "/v1beta1/projects/acme-prod/secrets/STRIPE_KEY/versions/latest:access",
        ))
        .and(header("Authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": 0,
            "status": "",
            "payload": { "data": "c2tfbGl2ZV8xMjM=" }
        })))
        .expect(1)
        .mount(&upstream)
        .await;

    let server = start_service(&upstream).await;
    let (status, body) = get_secret(&server, "STRIPE_KEY").await;

    assert_eq!(status, 200);
    assert_eq!(body, r#"{"name":"STRIPE_KEY","value":"sk_live_123"}"#);
}

#[tokio::test]
async fn test_secret_manager_error_code_serves_fallback() {
    let upstream = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "access_token": "tok" })))
        .mount(&upstream)
        .await;
    Mock::given(method("GET"))
        .and(path(
            "/v1beta1/projects/acme-prod/secrets/STRIPE_KEY/versions/latest:access",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": 403,
            "status": "insufficient scopes"
        })))
        .mount(&upstream)
        .await;

    let server = start_service(&upstream).await;
    let (status, body) = get_secret(&server, "STRIPE_KEY").await;

    assert_eq!(status, 200);
    assert_eq!(
        body,
        r#"{"name":"STRIPE_KEY","value":"default-for-STRIPE_KEY"}"#
    );
}

#[tokio::test]
async fn test_unreachable_metadata_server_serves_fallback() {
    let config = ResolverConfig::remote("acme-prod")
        .with_metadata_token_url("http://127.0.0.1:1/token")
        .with_secret_manager_endpoint("http://127.0.0.1:1/v1beta1");
    let server = TestServer::start(secretsd::from_config(&config).unwrap()).await;

    let (status, body) = get_secret(&server, "STRIPE_KEY").await;

    assert_eq!(status, 200);
    assert_eq!(
        body,
        r#"{"name":"STRIPE_KEY","value":"default-for-STRIPE_KEY"}"#
    );
}
