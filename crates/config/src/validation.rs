//! Configuration validation

use crate::{ConfigError, DeploymentConfig, Environment, Result};
use pharma_chain_types::price::MAX_FEED_DECIMALS;
use std::collections::HashSet;

/// Largest markup cap accepted (1000%)
pub const MAX_MARKUP_BPS: u64 = 100_000;

/// Validation error details
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate the entire deployment configuration
pub fn validate_config(config: &DeploymentConfig) -> Result<()> {
    let mut errors = Vec::new();
    let prefix = &config.network.address_prefix;

    // Validate network config
    if let Err(e) = validate_log_level(&config.network.log_level) {
        errors.push(e);
    }

    if config.network.chain_id.is_empty() {
        errors.push(ValidationError::new(
            "network.chain_id",
            "chain ID is required",
        ));
    }

    if prefix.is_empty() || !prefix.chars().all(|c| c.is_ascii_lowercase()) {
        errors.push(ValidationError::new(
            "network.address_prefix",
            "must be a non-empty lowercase bech32 prefix",
        ));
    }

    // Admins default to the deployer, which is never what a mainnet launch wants
    let admins = [
        ("registry.admin", &config.registry.admin),
        ("escrow.admin", &config.escrow.admin),
        ("ledger.admin", &config.ledger.admin),
    ];
    for (field, admin) in admins {
        match admin {
            Some(admin) => {
                if let Err(e) = validate_address(admin, prefix) {
                    errors.push(ValidationError::new(field, e));
                }
            }
            None if config.network.environment == Environment::Mainnet => {
                errors.push(ValidationError::new(
                    field,
                    "an explicit admin is required on mainnet",
                ));
            }
            None => {}
        }
    }

    // Validate initial role holders
    let role_lists = [
        ("registry.manufacturers", &config.registry.manufacturers),
        ("registry.distributors", &config.registry.distributors),
        ("registry.retailers", &config.registry.retailers),
    ];
    for (field, members) in role_lists {
        let unique: HashSet<_> = members.iter().collect();
        if unique.len() != members.len() {
            errors.push(ValidationError::new(field, "duplicate addresses found"));
        }

        for (idx, member) in members.iter().enumerate() {
            if let Err(e) = validate_address(member, prefix) {
                errors.push(ValidationError::new(format!("{field}[{idx}]"), e));
            }
        }
    }

    // Validate escrow config
    if let Err(e) = validate_denom(&config.escrow.denom) {
        errors.push(ValidationError::new("escrow.denom", e));
    }

    // Validate price feed config
    if config.price_feed.decimals > MAX_FEED_DECIMALS {
        errors.push(ValidationError::new(
            "price_feed.decimals",
            format!("must be <= {MAX_FEED_DECIMALS}"),
        ));
    }

    if config.price_feed.initial_answer <= 0 {
        errors.push(ValidationError::new(
            "price_feed.initial_answer",
            "must be greater than 0",
        ));
    }

    // Validate ledger config
    if let Some(bps) = config.ledger.max_markup_bps {
        if bps > MAX_MARKUP_BPS {
            errors.push(ValidationError::new(
                "ledger.max_markup_bps",
                format!("must be <= {MAX_MARKUP_BPS} (1000%)"),
            ));
        }
    }

    // Return all errors if any were found
    if !errors.is_empty() {
        let error_msg = errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        return Err(ConfigError::ValidationError(error_msg));
    }

    Ok(())
}

/// Validate an account address against the configured bech32 prefix
///
/// Only the shape is checked here; checksums are verified on chain.
pub fn validate_address(address: &str, prefix: &str) -> std::result::Result<(), String> {
    if address.trim().is_empty() {
        return Err("address cannot be empty".to_string());
    }

    let Some(data) = address.strip_prefix(prefix).and_then(|rest| rest.strip_prefix('1')) else {
        return Err(format!("address must start with '{prefix}1'"));
    };

    if data.is_empty() || !data.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()) {
        return Err("address must be lowercase bech32".to_string());
    }

    Ok(())
}

/// Validate a native denomination (3-128 chars, leading letter)
pub fn validate_denom(denom: &str) -> std::result::Result<(), String> {
    if !(3..=128).contains(&denom.len()) {
        return Err("denom must be 3 to 128 characters".to_string());
    }

    if !denom.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return Err("denom must start with a letter".to_string());
    }

    if !denom
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '/' | ':' | '.' | '_' | '-'))
    {
        return Err(format!("denom '{denom}' contains invalid characters"));
    }

    Ok(())
}

/// Validate log level
fn validate_log_level(level: &str) -> std::result::Result<(), ValidationError> {
    match level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ValidationError::new(
            "network.log_level",
            format!(
                "invalid log level '{level}', must be one of: trace, debug, info, warn, error"
            ),
        )),
    }
}
