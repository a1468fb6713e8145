//! Deployment description for the supply-chain contracts

use cosmwasm_std::Int128;
use pharma_chain_types::{escrow, ledger, price_feed, registry, Role, DEFAULT_DENOM};
use serde::{Deserialize, Serialize};

/// One deployment of the four contracts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[derive(Default)]
pub struct DeploymentConfig {
    /// Network configuration
    #[serde(default)]
    pub network: NetworkConfig,

    /// Role registry: admin and initial role holders
    #[serde(default)]
    pub registry: RegistryConfig,

    /// Escrow vault
    #[serde(default)]
    pub escrow: EscrowConfig,

    /// Price feed (mock aggregator)
    #[serde(default)]
    pub price_feed: PriceFeedConfig,

    /// Batch ledger
    #[serde(default)]
    pub ledger: LedgerConfig,
}

/// Network environment configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Environment type (mainnet, testnet, local)
    #[serde(default)]
    pub environment: Environment,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Chain the contracts are deployed to
    #[serde(default = "default_chain_id")]
    pub chain_id: String,

    /// Bech32 prefix of account addresses (e.g., "wasm")
    #[serde(default = "default_address_prefix")]
    pub address_prefix: String,
}

/// Environment types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[derive(Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Mainnet,
    Testnet,
    #[default]
    Local,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Initial admin; the deployer when unset
    #[serde(default)]
    pub admin: Option<String>,

    #[serde(default)]
    pub manufacturers: Vec<String>,

    #[serde(default)]
    pub distributors: Vec<String>,

    #[serde(default)]
    pub retailers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EscrowConfig {
    /// Admin allowed to settle on behalf of depositors; the deployer when unset
    #[serde(default)]
    pub admin: Option<String>,

    /// Payment denomination
    #[serde(default = "default_denom")]
    pub denom: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceFeedConfig {
    /// Decimals of the published answer
    #[serde(default = "default_feed_decimals")]
    pub decimals: u8,

    /// First answer published at instantiation
    #[serde(default = "default_initial_answer")]
    pub initial_answer: i64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LedgerConfig {
    #[serde(default)]
    pub admin: Option<String>,

    /// Cap on distributor markup in basis points; uncapped when unset
    #[serde(default)]
    pub max_markup_bps: Option<u64>,
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_chain_id() -> String {
    "localpharma-1".to_string()
}

fn default_address_prefix() -> String {
    "wasm".to_string()
}

fn default_denom() -> String {
    DEFAULT_DENOM.to_string()
}

fn default_feed_decimals() -> u8 {
    18
}

fn default_initial_answer() -> i64 {
    4_358_000
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            environment: Environment::Local,
            log_level: default_log_level(),
            chain_id: default_chain_id(),
            address_prefix: default_address_prefix(),
        }
    }
}

impl Default for EscrowConfig {
    fn default() -> Self {
        Self {
            admin: None,
            denom: default_denom(),
        }
    }
}

impl Default for PriceFeedConfig {
    fn default() -> Self {
        Self {
            decimals: default_feed_decimals(),
            initial_answer: default_initial_answer(),
        }
    }
}

impl DeploymentConfig {
    /// Built-in preset for an environment
    pub fn for_environment(environment: Environment) -> Self {
        match environment {
            Environment::Local => Self::local(),
            Environment::Testnet => Self::testnet(),
            Environment::Mainnet => Self::mainnet(),
        }
    }

    /// Single-node development chain with verbose logging and no markup cap
    pub fn local() -> Self {
        Self {
            network: NetworkConfig {
                environment: Environment::Local,
                log_level: "trace".to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    pub fn testnet() -> Self {
        Self {
            network: NetworkConfig {
                environment: Environment::Testnet,
                log_level: "debug".to_string(),
                chain_id: "pharma-testnet-1".to_string(),
                address_prefix: "wasm".to_string(),
            },
            price_feed: PriceFeedConfig {
                decimals: 8,
                initial_answer: 435_800_000_000,
            },
            ledger: LedgerConfig {
                admin: None,
                max_markup_bps: Some(10_000),
            },
            ..Default::default()
        }
    }

    /// Mainnet preset; admins must still be filled in before deploying
    pub fn mainnet() -> Self {
        Self {
            network: NetworkConfig {
                environment: Environment::Mainnet,
                log_level: "info".to_string(),
                chain_id: "pharma-1".to_string(),
                address_prefix: "wasm".to_string(),
            },
            price_feed: PriceFeedConfig {
                decimals: 8,
                initial_answer: 435_800_000_000,
            },
            ledger: LedgerConfig {
                admin: None,
                max_markup_bps: Some(5_000),
            },
            ..Default::default()
        }
    }

    pub fn registry_instantiate_msg(&self) -> registry::InstantiateMsg {
        registry::InstantiateMsg {
            admin: self.registry.admin.clone(),
        }
    }

    /// Grants the registry admin sends right after instantiation
    pub fn initial_grants(&self) -> Vec<registry::ExecuteMsg> {
        let grants = |role: Role, members: &[String]| {
            members
                .iter()
                .map(|address| registry::ExecuteMsg::Grant {
                    role,
                    address: address.clone(),
                })
                .collect::<Vec<_>>()
        };

        let mut msgs = grants(Role::Manufacturer, &self.registry.manufacturers);
        msgs.extend(grants(Role::Distributor, &self.registry.distributors));
        msgs.extend(grants(Role::Retailer, &self.registry.retailers));
        msgs
    }

    pub fn escrow_instantiate_msg(&self) -> escrow::InstantiateMsg {
        escrow::InstantiateMsg {
            admin: self.escrow.admin.clone(),
            denom: self.escrow.denom.clone(),
        }
    }

    pub fn price_feed_instantiate_msg(&self) -> price_feed::InstantiateMsg {
        price_feed::InstantiateMsg {
            decimals: self.price_feed.decimals,
            initial_answer: Int128::from(self.price_feed.initial_answer),
        }
    }

    /// Ledger instantiation, once the three collaborators have addresses
    pub fn ledger_instantiate_msg(
        &self,
        role_registry: impl Into<String>,
        escrow: impl Into<String>,
        price_feed: impl Into<String>,
    ) -> ledger::InstantiateMsg {
        ledger::InstantiateMsg {
            admin: self.ledger.admin.clone(),
            role_registry: role_registry.into(),
            escrow: escrow.into(),
            price_feed: price_feed.into(),
            denom: self.escrow.denom.clone(),
            max_markup_bps: self.ledger.max_markup_bps,
        }
    }
}
