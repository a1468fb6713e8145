//! Configuration loading from multiple sources

use crate::{ConfigError, DeploymentConfig, Result};
use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use std::path::Path;
use tracing::{debug, info, warn};

/// Prefix of environment variable overrides
pub const ENV_PREFIX: &str = "PHARMA_CHAIN";

/// Configuration loader with support for multiple formats and sources
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a file
    ///
    /// Supports TOML, YAML, and JSON formats based on file extension
    pub fn from_file(path: &Path) -> Result<DeploymentConfig> {
        let format = file_format(path)?;
        let content = std::fs::read_to_string(path)?;

        let config = match format {
            FileFormat::Yaml => Self::from_yaml(&content),
            FileFormat::Json => Self::from_json(&content),
            _ => Self::from_toml(&content),
        }?;

        info!(
            path = %path.display(),
            environment = ?config.network.environment,
            "Loaded deployment config"
        );
        Ok(config)
    }

    /// Load configuration from TOML string
    pub fn from_toml(content: &str) -> Result<DeploymentConfig> {
        toml::from_str(content).map_err(ConfigError::from)
    }

    /// Load configuration from YAML string
    pub fn from_yaml(content: &str) -> Result<DeploymentConfig> {
        serde_yaml::from_str(content).map_err(ConfigError::from)
    }

    /// Load configuration from JSON string
    pub fn from_json(content: &str) -> Result<DeploymentConfig> {
        serde_json::from_str(content).map_err(ConfigError::from)
    }

    /// Load configuration from environment variables
    ///
    /// Uses default prefix "PHARMA_CHAIN"
    pub fn from_env() -> Result<DeploymentConfig> {
        Self::from_env_with_prefix(ENV_PREFIX)
    }

    /// Load configuration from environment variables with custom prefix
    ///
    /// Environment variables should be in the format: PREFIX_SECTION__KEY
    /// For example: PHARMA_CHAIN_NETWORK__LOG_LEVEL=debug
    pub fn from_env_with_prefix(prefix: &str) -> Result<DeploymentConfig> {
        Self::builder().add_env(prefix).build()
    }

    /// Load configuration from file with environment variable overrides
    ///
    /// Environment variables take precedence over values from the file.
    pub fn from_file_with_env(path: &Path, env_prefix: &str) -> Result<DeploymentConfig> {
        match Self::builder().add_file(path, true).add_env(env_prefix).build() {
            Ok(config) => Ok(config),
            Err(ConfigError::ConfigLibError(e)) if path.exists() => {
                // A malformed override should not hide a valid file
                warn!(error = %e, prefix = env_prefix, "Ignoring environment overrides");
                Self::from_file(path)
            }
            Err(e) => Err(e),
        }
    }

    /// Build configuration using the config crate's builder pattern
    ///
    /// This allows for more complex configuration scenarios with multiple sources
    pub fn builder() -> ConfigLoaderBuilder {
        ConfigLoaderBuilder {
            builder: Config::builder(),
        }
    }
}

fn file_format(path: &Path) -> Result<FileFormat> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .ok_or_else(|| ConfigError::LoadError("No file extension found".to_string()))?;

    match extension {
        "toml" => Ok(FileFormat::Toml),
        "yaml" | "yml" => Ok(FileFormat::Yaml),
        "json" => Ok(FileFormat::Json),
        _ => Err(ConfigError::LoadError(format!(
            "Unsupported file extension: {extension}"
        ))),
    }
}

/// Builder for complex configuration loading scenarios
pub struct ConfigLoaderBuilder {
    builder: ConfigBuilder<config::builder::DefaultState>,
}

impl ConfigLoaderBuilder {
    /// Add a configuration file source
    pub fn add_file(mut self, path: &Path, required: bool) -> Self {
        let format = file_format(path).unwrap_or(FileFormat::Toml);
        debug!(path = %path.display(), required, "Adding config file source");

        self.builder = self
            .builder
            .add_source(File::from(path).format(format).required(required));
        self
    }

    /// Add environment variable source with prefix
    pub fn add_env(mut self, prefix: &str) -> Self {
        self.builder = self.builder.add_source(
            Environment::with_prefix(prefix)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );
        self
    }

    /// Set a default value for a key
    pub fn set_default(mut self, key: &str, value: &str) -> Result<Self> {
        self.builder = self.builder.set_default(key, value)?;
        Ok(self)
    }

    /// Build the final configuration
    pub fn build(self) -> Result<DeploymentConfig> {
        let config = self.builder.build()?;
        config.try_deserialize().map_err(ConfigError::from)
    }
}
