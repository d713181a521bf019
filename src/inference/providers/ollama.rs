//! Ollama provider: real local inference over HTTP.
//!
//! Talks to the Ollama generate endpoint (`POST /api/generate`) with
//! `stream: false`, so the whole reply arrives as one JSON body. Replies
//! never carry references; search integration is out of scope.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::inference::{ModelReply, ProviderError, ResponseProvider, ResponseRequest};

const DEFAULT_BASE_URL: &str = "http://localhost:11434";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Serialize, Debug)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Deserialize, Debug)]
struct GenerateResponse {
    response: String,
}

pub struct OllamaProvider {
    base_url: String,
    client: reqwest::Client,
}

impl OllamaProvider {
    pub fn new(base_url: Option<String>) -> Self {
        let env_url = std::env::var("OLLAMA_BASE_URL").ok();
        let final_url = base_url
            .or(env_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();

        Self {
            base_url: final_url,
            client,
        }
    }
}

#[async_trait]
impl ResponseProvider for OllamaProvider {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn generate(&self, request: ResponseRequest<'_>) -> Result<ModelReply, ProviderError> {
        let body = GenerateRequest {
            model: &request.model.tag,
            prompt: request.prompt,
            stream: false,
        };

        info!(
            "Ollama request: model={} prompt_len={}",
            request.model.tag,
            request.prompt.len()
        );

        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        debug!("Ollama response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Ollama API error: {} - {}", status, err_body);
            return Err(ProviderError::Api {
                status,
                message: err_body,
            });
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))?;

        Ok(ModelReply {
            content: parsed.response,
            references: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_base_url_wins() {
        let provider = OllamaProvider::new(Some("http://10.0.0.2:11434".to_string()));
        assert_eq!(provider.base_url, "http://10.0.0.2:11434");
    }

    #[test]
    fn test_generate_request_serializes() {
        let body = GenerateRequest {
            model: "qwen2.5:7b",
            prompt: "hello",
            stream: false,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "qwen2.5:7b");
        assert_eq!(json["stream"], false);
    }
}
