//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;

use async_trait::async_trait;

use crate::core::catalog::Catalog;
use crate::core::state::App;
use crate::inference::{ModelReply, ProviderError, ResponseProvider, ResponseRequest};

/// A no-op provider for tests that never reach real reply generation.
pub struct NoopProvider;

#[async_trait]
impl ResponseProvider for NoopProvider {
    fn name(&self) -> &str {
        "noop"
    }

    async fn generate(&self, _request: ResponseRequest<'_>) -> Result<ModelReply, ProviderError> {
        Ok(ModelReply {
            content: String::new(),
            references: Vec::new(),
        })
    }
}

/// Creates a test App with the builtin catalog and a NoopProvider.
pub fn test_app() -> App {
    App::new(Arc::new(NoopProvider), Catalog::builtin())
}
