//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.trident/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

use crate::core::catalog::{Catalog, ModelCategory, ModelSpec, ModelStatus};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TridentConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub simulated: SimulatedConfig,
    #[serde(default)]
    pub ollama: OllamaConfig,
    #[serde(default)]
    pub models: Vec<ModelEntry>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub default_provider: Option<String>,
    pub default_model: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SimulatedConfig {
    pub response_delay_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct OllamaConfig {
    pub base_url: Option<String>,
}

/// A `[[models]]` entry. When any entries are present they replace the
/// builtin catalog wholesale.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModelEntry {
    pub id: String,
    pub name: String,
    pub model_name: String,
    pub tag: String,
    pub params: Option<String>,
    /// "grounded" (replies carry references) or "offline". Defaults to offline.
    pub category: Option<ModelCategory>,
    /// Accent color as "#rrggbb".
    pub accent: Option<String>,
    pub description: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_RESPONSE_DELAY_MS: u64 = 1500;
pub const DEFAULT_OLLAMA_BASE_URL: &str = "http://localhost:11434";
const DEFAULT_ACCENT: (u8, u8, u8) = (0x0e, 0xa5, 0xe9);

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub provider: String,
    pub default_model: Option<String>,
    pub response_delay_ms: u64,
    pub ollama_base_url: String,
    pub catalog: Catalog,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.trident/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".trident").join("config.toml"))
}

/// Load config from `~/.trident/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `TridentConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<TridentConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(TridentConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(TridentConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: TridentConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &PathBuf) {
    let default_content = r##"# Trident Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# default_provider = "simulated"     # "simulated" or "ollama"
# default_model = "search"           # catalog id selected at startup

# [simulated]
# response_delay_ms = 1500

# [ollama]
# base_url = "http://localhost:11434"  # Or set OLLAMA_BASE_URL env var

# Defining any [[models]] entries replaces the builtin catalog.
# [[models]]
# id = "search"
# name = "Search"
# model_name = "Qwen 2.5 7B"
# tag = "qwen2.5:7b"
# params = "7B"
# category = "grounded"              # "grounded" or "offline"
# accent = "#0ea5e9"
# description = "Semantic search and document retrieval."
"##;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_provider` is from the CLI flag (None = not specified).
pub fn resolve(config: &TridentConfig, cli_provider: Option<&str>) -> ResolvedConfig {
    // Provider: CLI → env → config → default
    let provider = cli_provider
        .map(|s| s.to_string())
        .or_else(|| std::env::var("TRIDENT_PROVIDER").ok())
        .or_else(|| config.general.default_provider.clone())
        .unwrap_or_else(|| "simulated".to_string());

    // Ollama base URL: env → config → default
    let ollama_base_url = std::env::var("OLLAMA_BASE_URL")
        .ok()
        .or_else(|| config.ollama.base_url.clone())
        .unwrap_or_else(|| DEFAULT_OLLAMA_BASE_URL.to_string());

    let catalog = resolve_catalog(&config.models);

    ResolvedConfig {
        provider,
        default_model: config.general.default_model.clone(),
        response_delay_ms: config
            .simulated
            .response_delay_ms
            .unwrap_or(DEFAULT_RESPONSE_DELAY_MS),
        ollama_base_url,
        catalog,
    }
}

/// Build the catalog from `[[models]]` entries, falling back to the builtin
/// trio when no entries are present (or all are unusable).
fn resolve_catalog(entries: &[ModelEntry]) -> Catalog {
    if entries.is_empty() {
        return Catalog::builtin();
    }
    let models: Vec<ModelSpec> = entries.iter().map(entry_to_spec).collect();
    match Catalog::from_models(models) {
        Some(catalog) => catalog,
        None => {
            warn!("Config [[models]] entries were empty, using builtin catalog");
            Catalog::builtin()
        }
    }
}

fn entry_to_spec(entry: &ModelEntry) -> ModelSpec {
    let accent = entry
        .accent
        .as_deref()
        .and_then(parse_accent)
        .unwrap_or(DEFAULT_ACCENT);
    ModelSpec {
        id: entry.id.clone(),
        name: entry.name.clone(),
        model_name: entry.model_name.clone(),
        tag: entry.tag.clone(),
        params: entry.params.clone().unwrap_or_default(),
        accent,
        status: ModelStatus::Online,
        category: entry.category.unwrap_or(ModelCategory::Offline),
        description: entry.description.clone().unwrap_or_default(),
    }
}

/// Parse "#rrggbb" into an RGB triple. Returns None on malformed input.
fn parse_accent(s: &str) -> Option<(u8, u8, u8)> {
    let hex = s.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}
