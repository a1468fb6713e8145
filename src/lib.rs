//! Pharmaceutical batch custody on CosmWasm
//!
//! Batches move manufacturer -> distributor -> retailer through the
//! supply-chain ledger. Roles come from the role registry, every purchase is
//! held by the escrow vault until the next hop settles it, and quotes are
//! priced through the price feed.

pub use pharma_chain_config as config;
pub use pharma_chain_types as types;
pub use pharma_escrow as escrow;
pub use pharma_price_feed as price_feed;
pub use pharma_role_registry as role_registry;
pub use pharma_supply_chain as supply_chain;
