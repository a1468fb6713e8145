//! Deployment configuration for the pharmaceutical supply-chain contracts
//!
//! This crate describes one deployment of the registry, escrow, price feed and
//! batch ledger contracts:
//! - Multiple config formats (TOML, YAML, JSON)
//! - Environment variable overrides (`PHARMA_CHAIN_*`)
//! - Field-by-field validation
//! - Presets for mainnet, testnet, and local environments
//! - Instantiate messages for every contract

mod config;
mod loader;
mod validation;

pub use config::*;
pub use loader::*;
pub use validation::*;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load config: {0}")]
    LoadError(String),

    #[error("Config validation failed: {0}")]
    ValidationError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config library error: {0}")]
    ConfigLibError(#[from] ::config::ConfigError),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
