use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Uint128};
use cw_storage_plus::{Item, Map};
use pharma_chain_types::{BatchStatus, PaymentState, ReturnStatus};

#[cw_serde]
pub struct Config {
    /// Admin address (config updates)
    pub admin: Addr,
    /// Role registry consulted for every role-gated action
    pub role_registry: Addr,
    /// Escrow vault holding purchase payments
    pub escrow: Addr,
    /// Price feed used for quotes
    pub price_feed: Addr,
    /// Native payment denomination
    pub denom: String,
    /// Cap on distributor markup over the manufacturer price, in bps
    pub max_markup_bps: Option<u64>,
}

/// A purchase payment held in the escrow vault under this contract's namespace
#[cw_serde]
pub struct Payment {
    pub reference: String,
    pub payer: Addr,
    pub payee: Addr,
    pub amount: Uint128,
    pub state: PaymentState,
}

impl Payment {
    pub fn is_held(&self) -> bool {
        matches!(self.state, PaymentState::Held)
    }
}

#[cw_serde]
pub struct Batch {
    pub id: u64,
    /// Set at creation, never changes
    pub manufacturer: Addr,
    pub distributor: Option<Addr>,
    pub retailer: Option<Addr>,
    /// Current custodian
    pub holder: Addr,
    /// Unix timestamp (seconds)
    pub expiry: u64,
    /// Manufacturer price, fixed at creation
    pub price: Uint128,
    /// Price the distributor resells at
    pub resale_price: Option<Uint128>,
    /// Off-chain content identifier (e.g. an IPFS CID)
    pub content_ref: String,
    pub status: BatchStatus,
    pub created_at: u64,
    /// Distributor -> manufacturer payment
    pub distributor_payment: Option<Payment>,
    /// Retailer -> distributor payment
    pub retailer_payment: Option<Payment>,
}

impl Batch {
    pub fn is_expired(&self, now: u64) -> bool {
        now >= self.expiry
    }

    /// Price the next buyer has to pay
    pub fn current_price(&self) -> Uint128 {
        match self.status {
            BatchStatus::Created => self.price,
            _ => self.resale_price.unwrap_or(self.price),
        }
    }
}

#[cw_serde]
pub struct ReturnRequest {
    pub batch_id: u64,
    /// Holder asking to send the batch back
    pub requester: Addr,
    /// Seller the requester paid; may approve the return
    pub counterparty: Addr,
    pub reason: String,
    pub status: ReturnStatus,
    pub requested_at: u64,
    pub resolved_at: Option<u64>,
    pub resolved_by: Option<Addr>,
}

impl ReturnRequest {
    pub fn is_pending(&self) -> bool {
        matches!(self.status, ReturnStatus::Pending)
    }
}

pub const CONFIG: Item<Config> = Item::new("config");
pub const NEXT_BATCH_ID: Item<u64> = Item::new("next_batch_id");
pub const BATCHES: Map<u64, Batch> = Map::new("batches");
/// Latest return request per batch
pub const RETURN_REQUESTS: Map<u64, ReturnRequest> = Map::new("return_requests");
