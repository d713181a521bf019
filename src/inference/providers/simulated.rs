//! Simulated provider: canned replies after a fixed delay.
//!
//! This is the development stand-in for real inference. It fabricates a
//! mode-specific response and, for grounded models, attaches a fixed
//! reference pool (web pool for "search", entity pool for "entity").
//! Output is deterministic for a given (model, prompt) pair; only the
//! delay makes it feel asynchronous.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use tokio::time::sleep;

use crate::core::catalog::ModelSpec;
use crate::core::message::Reference;
use crate::inference::{ModelReply, ProviderError, ResponseProvider, ResponseRequest};

pub struct SimulatedProvider {
    delay: Duration,
}

impl SimulatedProvider {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl ResponseProvider for SimulatedProvider {
    fn name(&self) -> &str {
        "simulated"
    }

    async fn generate(&self, request: ResponseRequest<'_>) -> Result<ModelReply, ProviderError> {
        debug!(
            "Simulating reply for model={} ({} ms delay)",
            request.model.id,
            self.delay.as_millis()
        );
        sleep(self.delay).await;

        let references = reference_pool(request.model);
        let content = canned_response(request.model, request.prompt, references.len());

        Ok(ModelReply {
            content,
            references,
        })
    }
}

/// The fixed reference pool for a model. Offline models get nothing;
/// "entity" gets its own pool, every other grounded model gets the web
/// search pool.
fn reference_pool(model: &ModelSpec) -> Vec<Reference> {
    if !model.category.produces_references() {
        return Vec::new();
    }
    if model.id == "entity" {
        entity_references()
    } else {
        search_references()
    }
}

fn canned_response(model: &ModelSpec, prompt: &str, reference_count: usize) -> String {
    if !model.category.produces_references() {
        return format!(
            "[{} Mode - {}]\n\n\
             Thinking through this step by step...\n\n\
             The {} model excels at complex reasoning and code generation. \
             All processing happens entirely on-device with zero data transmission.\n\n\
             Analyzing: \"{}\"",
            model.name,
            model.model_name,
            model.model_name,
            truncate_chars(prompt, 80),
        );
    }

    if model.id == "entity" {
        format!(
            "[{} Mode - {}]\n\n\
             I've analyzed your input and extracted the relevant entities using \
             contextual references.\n\n\
             Processing with the Entity model, I identified relevant entities and \
             cross-referenced them with {} knowledge sources.\n\n\
             Query analyzed: \"{}\"\n\n\
             Relevant entity sources are available in the references panel.",
            model.name,
            model.model_name,
            reference_count,
            truncate_chars(prompt, 60),
        )
    } else {
        format!(
            "[{} Mode - {}]\n\n\
             I searched the web for relevant information about your query. \
             Here's what I found:\n\n\
             Based on {} sources retrieved, I can provide you with comprehensive \
             information about \"{}\".\n\n\
             The search results indicate several key findings from authoritative \
             sources. You can review all referenced sources in the panel on the right.",
            model.name,
            model.model_name,
            reference_count,
            truncate_chars(prompt, 60),
        )
    }
}

/// Truncate to at most `max` characters, appending "..." when cut.
/// Works on char boundaries, so multi-byte input is safe.
fn truncate_chars(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max).collect();
        format!("{}...", cut)
    }
}

fn reference(id: &str, title: &str, url: &str, domain: &str, snippet: &str) -> Reference {
    Reference {
        id: id.to_string(),
        title: title.to_string(),
        url: url.to_string(),
        domain: domain.to_string(),
        snippet: snippet.to_string(),
    }
}

/// The web-search pool used by the "search" model.
fn search_references() -> Vec<Reference> {
    vec![
        reference(
            "ref-1",
            "Understanding Large Language Models: A Comprehensive Guide",
            "https://learn.microsoft.com/en-us/ai/large-language-models",
            "learn.microsoft.com",
            "Large Language Models (LLMs) are deep learning models trained on massive \
             text datasets. They can generate, classify, and summarize text with \
             remarkable accuracy.",
        ),
        reference(
            "ref-2",
            "Qwen 2.5 Technical Report - Model Architecture and Training",
            "https://arxiv.org/abs/2024.qwen25",
            "arxiv.org",
            "Qwen 2.5 introduces improved attention mechanisms and a more efficient \
             tokenizer, resulting in better performance on benchmark tasks while \
             reducing computational overhead.",
        ),
        reference(
            "ref-3",
            "Local AI Deployment Best Practices",
            "https://azure.microsoft.com/en-us/solutions/local-ai",
            "azure.microsoft.com",
            "Learn how to deploy AI models locally for improved privacy, reduced \
             latency, and better control over your data with on-premise solutions.",
        ),
        reference(
            "ref-4",
            "Semantic Search Implementation with Transformer Models",
            "https://www.microsoft.com/en-us/research/semantic-search",
            "microsoft.com",
            "Semantic search leverages transformer-based embeddings to understand \
             query intent, delivering more relevant results compared to traditional \
             keyword matching.",
        ),
        reference(
            "ref-5",
            "Vector Database Comparison: Qdrant vs Pinecone vs Weaviate",
            "https://techcommunity.microsoft.com/vector-databases-comparison",
            "techcommunity.microsoft.com",
            "A detailed comparison of popular vector databases for AI applications, \
             including performance benchmarks, pricing, and integration capabilities.",
        ),
    ]
}

/// The entity-extraction pool used by the "entity" model.
fn entity_references() -> Vec<Reference> {
    vec![
        reference(
            "ent-1",
            "Named Entity Recognition with Modern LLMs",
            "https://www.microsoft.com/en-us/research/ner-llms",
            "microsoft.com",
            "Modern approaches to NER using large language models, including zero-shot \
             and few-shot entity extraction techniques for production systems.",
        ),
        reference(
            "ent-2",
            "Entity Extraction API - Cognitive Services",
            "https://learn.microsoft.com/en-us/azure/cognitive-services/entity-extraction",
            "learn.microsoft.com",
            "Extract named entities from unstructured text, including people, places, \
             organizations, quantities, and more.",
        ),
        reference(
            "ent-3",
            "Knowledge Graph Construction from Text Documents",
            "https://arxiv.org/abs/2024.knowledge-graphs",
            "arxiv.org",
            "Techniques for building knowledge graphs from text using entity \
             recognition and relation extraction, enabling structured knowledge \
             representation.",
        ),
    ]
}
