pub mod ollama;
pub mod simulated;

pub use ollama::OllamaProvider;
pub use simulated::SimulatedProvider;
