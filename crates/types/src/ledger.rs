use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Uint128;

use crate::{BatchStatus, PaymentState, ReturnStatus};

#[cw_serde]
pub struct InstantiateMsg {
    /// Defaults to the instantiating address
    pub admin: Option<String>,
    pub role_registry: String,
    pub escrow: String,
    pub price_feed: String,
    pub denom: String,
    /// Cap on distributor markup in bps; None leaves resale pricing uncapped
    pub max_markup_bps: Option<u64>,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Register a new batch. Sender must be the manufacturer.
    CreateBatch {
        manufacturer: String,
        expiry: u64,
        price: Uint128,
        content_ref: String,
    },
    /// Buy a freshly created batch, paying the manufacturer price into escrow
    BuyAsDistributor { batch_id: u64, offer_price: Uint128 },
    /// Adjust the resale price before a retailer buys
    SetResalePrice { batch_id: u64, price: Uint128 },
    /// Buy from the distributor at the resale price
    BuyAsRetailer { batch_id: u64 },
    /// Retailer acknowledges receipt, releasing the distributor's payment.
    /// A registry admin may confirm in the retailer's place.
    ConfirmDelivery { batch_id: u64 },
    RequestReturn { batch_id: u64, reason: String },
    ResolveReturn { batch_id: u64, approve: bool },
    UpdateConfig {
        admin: Option<String>,
        role_registry: Option<String>,
        escrow: Option<String>,
        price_feed: Option<String>,
        max_markup_bps: Option<u64>,
        /// Drop the markup cap entirely; takes precedence over `max_markup_bps`
        #[serde(default)]
        clear_markup_cap: bool,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},

    #[returns(BatchResponse)]
    BatchDetails { batch_id: u64 },

    #[returns(ContentRefResponse)]
    ContentRef { batch_id: u64 },

    #[returns(BatchesResponse)]
    Batches {
        start_after: Option<u64>,
        limit: Option<u32>,
    },

    /// Current price of a batch converted through the price feed
    #[returns(BatchQuoteResponse)]
    BatchQuote { batch_id: u64 },

    #[returns(ReturnRequestResponse)]
    ReturnRequest { batch_id: u64 },
}

#[cw_serde]
pub struct ConfigResponse {
    pub admin: String,
    pub role_registry: String,
    pub escrow: String,
    pub price_feed: String,
    pub denom: String,
    pub max_markup_bps: Option<u64>,
    pub batch_count: u64,
}

#[cw_serde]
pub struct PaymentResponse {
    pub reference: String,
    pub payer: String,
    pub payee: String,
    pub amount: Uint128,
    pub state: PaymentState,
}

#[cw_serde]
pub struct BatchResponse {
    pub id: u64,
    pub manufacturer: String,
    pub distributor: Option<String>,
    pub retailer: Option<String>,
    pub holder: String,
    pub expiry: u64,
    pub price: Uint128,
    pub resale_price: Option<Uint128>,
    pub status: BatchStatus,
    pub created_at: u64,
    pub distributor_payment: Option<PaymentResponse>,
    pub retailer_payment: Option<PaymentResponse>,
}

#[cw_serde]
pub struct ContentRefResponse {
    pub batch_id: u64,
    pub content_ref: String,
}

#[cw_serde]
pub struct BatchesResponse {
    pub batches: Vec<BatchResponse>,
}

#[cw_serde]
pub struct BatchQuoteResponse {
    pub batch_id: u64,
    pub status: BatchStatus,
    /// Price the next buyer pays, in the native denom
    pub price: Uint128,
    pub denom: String,
    /// `price` scaled by the latest feed answer
    pub feed_value: Uint128,
    pub feed_decimals: u8,
    pub feed_round_id: u64,
    pub feed_updated_at: u64,
}

#[cw_serde]
pub struct ReturnRequestResponse {
    pub batch_id: u64,
    pub requester: String,
    pub counterparty: String,
    pub reason: String,
    pub status: ReturnStatus,
    pub requested_at: u64,
    pub resolved_at: Option<u64>,
    pub resolved_by: Option<String>,
}
