//! Integration tests for `OpenAiCompatibleGateway` against a mock provider.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use dilemma_core::generation::{GenerationError, GenerationGateway, GenerationRequest};
use dilemma_gateway::openai_gateway::{GatewayConfig, OpenAiCompatibleGateway};
use dilemma_gateway::retrying_gateway::{RetryPolicy, RetryingGateway};
use secrecy::SecretString;
use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn gateway_for(server: &MockServer) -> OpenAiCompatibleGateway {
    let config = GatewayConfig::new(SecretString::from("test-key".to_owned()))
        .with_base_url(format!("{}/openai/v1", server.uri()))
        .with_model("test-model")
        .with_request_timeout(Duration::from_secs(5));
    OpenAiCompatibleGateway::new(config).unwrap()
}

fn completion(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-1",
        "model": "test-model",
        "choices": [
            { "index": 0, "message": { "role": "assistant", "content": content }, "finish_reason": "stop" }
        ]
    })
}

fn request() -> GenerationRequest {
    GenerationRequest::new("Analyze this", 0.6, 600).with_system_prompt("You are an ethicist")
}

#[tokio::test]
async fn test_generate_returns_first_choice_content() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/openai/v1/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(json!({
            "model": "test-model",
            "max_tokens": 600,
            "messages": [
                { "role": "system", "content": "You are an ethicist" },
                { "role": "user", "content": "Analyze this" }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("**Utilitarian:** fine")))
        .expect(1)
        .mount(&server)
        .await;

    // Act
    let text = gateway_for(&server).generate(&request()).await.unwrap();

    // Assert
    assert_eq!(text, "**Utilitarian:** fine");
}

#[tokio::test]
async fn test_generate_maps_unauthorized_to_provider_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({ "error": { "message": "Invalid API Key" } })),
        )
        .mount(&server)
        .await;

    let result = gateway_for(&server).generate(&request()).await;

    assert_eq!(
        result,
        Err(GenerationError::Provider {
            status: 401,
            message: "Invalid API Key".into(),
        })
    );
}

#[tokio::test]
async fn test_generate_rejects_response_without_choices() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&server)
        .await;

    let result = gateway_for(&server).generate(&request()).await;

    assert!(matches!(result, Err(GenerationError::MalformedResponse(_))));
}

#[tokio::test]
async fn test_generate_rejects_non_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let result = gateway_for(&server).generate(&request()).await;

    assert!(matches!(result, Err(GenerationError::MalformedResponse(_))));
}

#[tokio::test]
async fn test_generate_reports_slow_provider_as_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion("late"))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;
    let config = GatewayConfig::new(SecretString::from("test-key".to_owned()))
        .with_base_url(server.uri())
        .with_request_timeout(Duration::from_millis(200));
    let gateway = OpenAiCompatibleGateway::new(config).unwrap();

    let result = gateway.generate(&request()).await;

    assert_eq!(result, Err(GenerationError::Timeout { after_ms: 200 }));
}

#[tokio::test]
async fn test_generate_reports_stalled_body_as_timeout() {
    // Arrange
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 4096];
        let _ = socket.read(&mut buf).await.unwrap();
        socket
            .write_all(
                b"HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: 512\r\n\r\n{\"choices\":",
            )
            .await
            .unwrap();
        socket.flush().await.unwrap();
        tokio::time::sleep(Duration::from_secs(5)).await;
    });
    let config = GatewayConfig::new(SecretString::from("test-key".to_owned()))
        .with_base_url(format!("http://{addr}"))
        .with_request_timeout(Duration::from_millis(300));
    let gateway = OpenAiCompatibleGateway::new(config).unwrap();

    // Act
    let result = gateway.generate(&request()).await;

    // Assert
    assert_eq!(result, Err(GenerationError::Timeout { after_ms: 300 }));
    assert!(result.unwrap_err().is_retryable());
    server.abort();
}

#[tokio::test]
async fn test_retrying_gateway_recovers_from_server_error() {
    // Arrange
    let server = MockServer::start().await;
    let attempts = AtomicU32::new(0);
    Mock::given(method("POST"))
        .and(path("/openai/v1/chat/completions"))
        .respond_with(move |_: &wiremock::Request| {
            if attempts.fetch_add(1, Ordering::SeqCst) == 0 {
                ResponseTemplate::new(503).set_body_string("overloaded")
            } else {
                ResponseTemplate::new(200).set_body_json(completion("recovered"))
            }
        })
        .expect(2)
        .mount(&server)
        .await;
    let gateway = RetryingGateway::new(
        Arc::new(gateway_for(&server)),
        RetryPolicy {
            attempt_timeout: Duration::from_secs(5),
            max_retries: 2,
            retry_delay: Duration::from_millis(1),
        },
    );

    // Act
    let text = gateway.generate(&request()).await.unwrap();

    // Assert
    assert_eq!(text, "recovered");
}
