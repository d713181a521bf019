use trident::core::catalog::Catalog;
use trident::inference::{OllamaProvider, ProviderError, ResponseProvider, ResponseRequest};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Ollama Provider Tests
// ============================================================================

#[tokio::test]
async fn test_ollama_successful_generate() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .and(body_partial_json(serde_json::json!({
            "model": "deepseek-r1:8b",
            "stream": false,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "response": "Step by step: a linked list can be sorted with merge sort."
        })))
        .mount(&mock_server)
        .await;

    let provider = OllamaProvider::new(Some(mock_server.uri()));
    let catalog = Catalog::builtin();
    let model = catalog.get("local").unwrap();

    let reply = provider
        .generate(ResponseRequest {
            prompt: "sort a linked list",
            model,
        })
        .await
        .unwrap();

    assert_eq!(
        reply.content,
        "Step by step: a linked list can be sorted with merge sort."
    );
    assert!(
        reply.references.is_empty(),
        "Ollama replies never carry references"
    );
}

#[tokio::test]
async fn test_ollama_server_error_maps_to_api_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(500).set_body_string("model not loaded"))
        .mount(&mock_server)
        .await;

    let provider = OllamaProvider::new(Some(mock_server.uri()));
    let catalog = Catalog::builtin();
    let model = catalog.get("local").unwrap();

    let err = provider
        .generate(ResponseRequest {
            prompt: "hi",
            model,
        })
        .await
        .unwrap_err();

    match err {
        ProviderError::Api { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "model not loaded");
        }
        other => panic!("Expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_ollama_malformed_body_maps_to_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
        .mount(&mock_server)
        .await;

    let provider = OllamaProvider::new(Some(mock_server.uri()));
    let catalog = Catalog::builtin();
    let model = catalog.get("search").unwrap();

    let err = provider
        .generate(ResponseRequest {
            prompt: "hi",
            model,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::Parse(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_ollama_unreachable_maps_to_network_error() {
    // Nothing is listening on this port.
    let provider = OllamaProvider::new(Some("http://127.0.0.1:1".to_string()));
    let catalog = Catalog::builtin();
    let model = catalog.get("local").unwrap();

    let err = provider
        .generate(ResponseRequest {
            prompt: "hi",
            model,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::Network(_)), "got {:?}", err);
}
