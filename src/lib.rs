//! Trident library exports for testing

use clap::ValueEnum;

pub mod core;
pub mod inference;
pub mod tui;

#[cfg(test)]
pub mod test_support;

/// Reply source selected on the command line.
#[derive(Clone, Debug, Default, ValueEnum)]
pub enum Provider {
    #[default]
    Simulated,
    Ollama,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Simulated => "simulated",
            Provider::Ollama => "ollama",
        }
    }
}
