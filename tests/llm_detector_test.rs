//! Integration tests for the model-backed detector against a mock server

use mockito::{Matcher, Server};
use serde_json::json;
use sniffnmask::config::{ApiToken, LlmConfig};
use sniffnmask::domain::DetectorError;
use sniffnmask::sanitization::detector::llm::LlmDetector;
use sniffnmask::sanitization::{DetectionStatus, EntityDetector};

const SOURCE: &str = "Hi, this is Rebecca Adams. Reach me at rebecca@example.com.";

fn config_for(base_url: &str) -> LlmConfig {
    LlmConfig {
        base_url: base_url.to_string(),
        model: "llama3.2:latest".to_string(),
        timeout_seconds: 5,
        ..LlmConfig::default()
    }
}

fn generate_body(answer: &str) -> String {
    json!({ "model": "llama3.2:latest", "response": answer, "done": true }).to_string()
}

#[tokio::test]
async fn test_detects_entities_from_model_answer() {
    let mut server = Server::new_async().await;
    let answer = r#"Here is what I found:
[
  {"type": "name", "text": "Rebecca Adams", "category": "mask", "replacement": "User"},
  {"type": "email", "text": "rebecca@example.com", "category": "mask", "replacement": "x@y.z"}
]"#;
    let mock = server
        .mock("POST", "/api/generate")
        .match_body(Matcher::PartialJson(json!({
            "model": "llama3.2:latest",
            "stream": false
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(generate_body(answer))
        .create_async()
        .await;

    let detector = LlmDetector::new(&config_for(&server.url())).unwrap();
    let detection = detector.detect(SOURCE).await;

    mock.assert_async().await;
    assert_eq!(detection.status, DetectionStatus::Completed);
    assert_eq!(detection.spans.len(), 2);
    assert_eq!(detection.unlocatable, 0);
    for span in &detection.spans {
        assert!(span.check(SOURCE).is_ok());
    }
    assert_eq!(detection.spans[0].start, 12);
}

#[tokio::test]
async fn test_prompt_carries_source_text() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/generate")
        .match_body(Matcher::Regex("Rebecca Adams".to_string()))
        .with_status(200)
        .with_body(generate_body("[]"))
        .create_async()
        .await;

    let detector = LlmDetector::new(&config_for(&server.url())).unwrap();
    let detection = detector.detect(SOURCE).await;

    mock.assert_async().await;
    assert_eq!(detection.status, DetectionStatus::Completed);
    assert!(detection.spans.is_empty());
}

#[tokio::test]
async fn test_garbage_answer_fails_with_no_spans() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/api/generate")
        .with_status(200)
        .with_body(generate_body("I'm sorry, I can't help with personal data."))
        .create_async()
        .await;

    let detector = LlmDetector::new(&config_for(&server.url())).unwrap();
    let detection = detector.detect(SOURCE).await;

    assert!(detection.spans.is_empty());
    assert!(matches!(
        detection.status,
        DetectionStatus::Failed(DetectorError::MalformedEntities(_))
    ));
}

#[tokio::test]
async fn test_non_json_envelope_fails() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/api/generate")
        .with_status(200)
        .with_body("<html>gateway</html>")
        .create_async()
        .await;

    let detector = LlmDetector::new(&config_for(&server.url())).unwrap();
    let detection = detector.detect(SOURCE).await;

    assert!(detection.spans.is_empty());
    assert!(matches!(
        detection.status,
        DetectionStatus::Failed(DetectorError::InvalidResponse(_))
    ));
}

#[tokio::test]
async fn test_server_error_fails() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/api/generate")
        .with_status(500)
        .with_body("model not loaded")
        .create_async()
        .await;

    let detector = LlmDetector::new(&config_for(&server.url())).unwrap();
    let detection = detector.detect(SOURCE).await;

    assert!(detection.spans.is_empty());
    match detection.status {
        DetectionStatus::Failed(DetectorError::ServerError { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "model not loaded");
        }
        other => panic!("expected server error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unreachable_backend_fails() {
    let detector = LlmDetector::new(&config_for("http://127.0.0.1:1")).unwrap();
    let detection = detector.detect(SOURCE).await;

    assert!(detection.spans.is_empty());
    assert!(matches!(
        detection.status,
        DetectionStatus::Failed(DetectorError::ConnectionFailed(_))
            | DetectionStatus::Failed(DetectorError::Timeout(_))
    ));
}

#[tokio::test]
async fn test_silent_backend_times_out() {
    // Accepts connections and holds them open without ever answering
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let silent = tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    let config = LlmConfig {
        timeout_seconds: 1,
        ..config_for(&format!("http://{addr}"))
    };
    let detector = LlmDetector::new(&config).unwrap();
    let detection = detector.detect(SOURCE).await;
    silent.abort();

    assert!(detection.spans.is_empty());
    assert_eq!(detection.unlocatable, 0);
    assert!(
        matches!(
            detection.status,
            DetectionStatus::Failed(DetectorError::Timeout(_))
        ),
        "expected timeout, got {:?}",
        detection.status
    );
}

#[tokio::test]
async fn test_unlocatable_entities_are_counted() {
    let mut server = Server::new_async().await;
    let answer = r#"[
  {"type": "name", "text": "Rebecca Adams", "category": "mask", "replacement": "User"},
  {"type": "phone", "text": "415-867-5309", "category": "mask", "replacement": "XXX"},
  {"type": "name", "text": "Rebecca"}
]"#;
    let _mock = server
        .mock("POST", "/api/generate")
        .with_status(200)
        .with_body(generate_body(answer))
        .create_async()
        .await;

    let detector = LlmDetector::new(&config_for(&server.url())).unwrap();
    let detection = detector.detect(SOURCE).await;

    assert_eq!(detection.status, DetectionStatus::Completed);
    assert_eq!(detection.spans.len(), 1);
    assert_eq!(detection.spans[0].text, "Rebecca Adams");
    assert_eq!(detection.unlocatable, 2);
}

#[tokio::test]
async fn test_api_key_sent_as_bearer_token() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/generate")
        .match_header("authorization", "Bearer gateway-token")
        .with_status(200)
        .with_body(generate_body("[]"))
        .create_async()
        .await;

    let config = LlmConfig {
        api_key: ApiToken::new("gateway-token"),
        ..config_for(&server.url())
    };
    let detector = LlmDetector::new(&config).unwrap();
    let detection = detector.detect(SOURCE).await;

    mock.assert_async().await;
    assert_eq!(detection.status, DetectionStatus::Completed);
}
