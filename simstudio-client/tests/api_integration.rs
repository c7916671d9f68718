//! Runs the reqwest transport against a local wiremock server.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use simstudio_client::{
    codes, ClientConfig, HttpRequestParts, HttpTransport, ReqwestTransport, WorkflowClient,
};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> WorkflowClient {
    // Trailing slash exercises base URL normalization end to end.
    let config = ClientConfig::new("test-key").with_base_url(format!("{}/", server.uri()));
    WorkflowClient::from_config(config).unwrap()
}

#[tokio::test]
async fn execute_round_trip() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/workflows/wf-123/execute"))
        .and(header("X-API-Key", "test-key"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({"user_id": "12345"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "output": {"answer": 42},
            "metadata": {"duration": 850},
            "totalDuration": 850
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = client
        .execute("wf-123", Some(&json!({"user_id": "12345"})))
        .await
        .unwrap();

    assert!(result.success);
    assert_eq!(result.output, Some(json!({"answer": 42})));
    assert_eq!(result.total_duration, Some(850.0));
}

#[tokio::test]
async fn execute_error_body_is_mapped() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/workflows/wf/execute"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": "Invalid API key",
            "code": "UNAUTHORIZED"
        })))
        .mount(&server)
        .await;

    let err = client_for(&server).execute("wf", None).await.unwrap_err();
    assert_eq!(err.message, "Invalid API key");
    assert_eq!(err.code(), Some(codes::UNAUTHORIZED));
    assert_eq!(err.http_status, Some(401));
}

#[tokio::test]
async fn execute_plain_text_error_uses_reason_phrase() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/workflows/missing/execute"))
        .respond_with(ResponseTemplate::new(404).set_body_string("nothing here"))
        .mount(&server)
        .await;

    let err = client_for(&server).execute("missing", None).await.unwrap_err();
    assert_eq!(err.message, "HTTP 404: Not Found");
    assert_eq!(err.code, None);
    assert_eq!(err.http_status, Some(404));
}

#[tokio::test]
async fn execute_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/workflows/slow/execute"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": true}))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .execute_with_timeout("slow", None, Duration::from_millis(200))
        .await
        .unwrap_err();
    assert_eq!(err.code(), Some(codes::TIMEOUT));
    assert_eq!(err.message, "Workflow execution timed out after 0.2 seconds");
    assert_eq!(err.http_status, None);
}

#[tokio::test]
async fn get_status_round_trip() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/workflows/wf/status"))
        .and(header("X-API-Key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "isDeployed": true,
            "deployedAt": "2023-01-01T00:00:00Z",
            "isPublished": true,
            "needsRedeployment": true
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let status = client.get_status("wf").await.unwrap();
    assert!(status.is_deployed);
    assert!(status.is_published);
    assert!(status.needs_redeployment);
    assert_eq!(status.deployed_at.as_deref(), Some("2023-01-01T00:00:00Z"));
    assert!(client.validate("wf").await);
}

#[tokio::test]
async fn validate_is_false_for_undeployed_workflow() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/workflows/wf/status"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": "Workflow is not deployed"
        })))
        .mount(&server)
        .await;

    assert!(!client_for(&server).validate("wf").await);
}

#[tokio::test]
async fn connection_refused_is_a_status_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = ClientConfig::new("k").with_base_url(format!("http://{addr}"));
    let client = WorkflowClient::from_config(config).unwrap();
    let err = client.get_status("wf").await.unwrap_err();
    assert_eq!(err.code(), Some(codes::STATUS_ERROR));
    assert!(err.message.starts_with("Failed to get workflow status: "));
    assert_eq!(err.http_status, None);
    assert!(!client.validate("wf").await);
}

#[tokio::test]
async fn updated_key_is_sent_on_next_call() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/workflows/wf/status"))
        .and(header("X-API-Key", "rotated-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"isDeployed": true})))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = client_for(&server);
    client.set_api_key("rotated-key");
    assert!(client.get_status("wf").await.unwrap().is_deployed);
}

#[tokio::test]
async fn custom_reqwest_client_can_be_supplied() {
    let server = MockServer::start().await;
    mount_ok_status(&server).await;

    let http = reqwest::Client::builder()
        .user_agent("custom-agent/1.0")
        .build()
        .unwrap();
    let client = WorkflowClient::with_transport(
        ClientConfig::new("test-key").with_base_url(server.uri()),
        Arc::new(ReqwestTransport::from_client(http)),
    );
    assert!(client.validate("wf").await);
}

async fn mount_ok_status(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/workflows/wf/status"))
        .and(header("user-agent", "custom-agent/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"isDeployed": true})))
        .mount(server)
        .await;
}

#[tokio::test]
async fn reqwest_transport_collects_response_headers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/workflows/wf/status"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-request-id", "req-42")
                .set_body_json(json!({"isDeployed": true})),
        )
        .mount(&server)
        .await;

    let transport = ReqwestTransport::new().unwrap();
    let req = HttpRequestParts {
        method: reqwest::Method::GET,
        url: format!("{}/api/workflows/wf/status", server.uri()).parse().unwrap(),
        headers: Default::default(),
        body: None,
    };
    let resp = transport.send(req, None).await.unwrap();
    assert_eq!(resp.status, 200);
    assert_eq!(resp.header("X-Request-Id"), Some("req-42"));
    assert_eq!(resp.content_type(), Some("application/json"));
}
