pub mod provider;
pub mod providers;

pub use provider::{ModelReply, ProviderError, ResponseProvider, ResponseRequest};
pub use providers::{OllamaProvider, SimulatedProvider};
