use std::fmt;

use async_trait::async_trait;

use crate::core::catalog::ModelSpec;
use crate::core::message::Reference;

/// Errors that can occur during provider operations.
/// Variants carry enough info to determine retryability (future use).
#[derive(Debug)]
pub enum ProviderError {
    /// Provider misconfigured (bad URL, missing model tag). Not retryable.
    Config(String),
    /// Network-level failure (timeout, DNS, connection refused). Retryable.
    Network(String),
    /// API returned an error response. Retryable if status >= 500 or 429.
    Api { status: u16, message: String },
    /// Failed to parse the provider's response. Not retryable.
    Parse(String),
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::Config(msg) => write!(f, "config error: {msg}"),
            ProviderError::Network(msg) => write!(f, "network error: {msg}"),
            ProviderError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            ProviderError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ProviderError {}

/// Everything a provider needs to produce a reply.
pub struct ResponseRequest<'a> {
    pub prompt: &'a str,
    pub model: &'a ModelSpec,
}

/// A complete assistant reply. Replies resolve atomically as a whole;
/// there is no streaming path in this core.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelReply {
    pub content: String,
    pub references: Vec<Reference>,
}

/// The seam between the session core and whatever actually produces
/// replies. The state machine is invariant to the implementation: a stub
/// timer, a local inference call, or an HTTP round trip all look the same
/// from here.
#[async_trait]
pub trait ResponseProvider: Send + Sync {
    /// Returns the name of the provider.
    fn name(&self) -> &str;

    /// Produce one reply for the given prompt and model.
    async fn generate(&self, request: ResponseRequest<'_>) -> Result<ModelReply, ProviderError>;
}
