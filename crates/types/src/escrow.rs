//! Message interface of the escrow vault contract

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Uint128;

#[cw_serde]
pub struct InstantiateMsg {
    /// Admin allowed to release or refund any entry
    pub admin: Option<String>,
    /// Native denomination accepted for deposits
    pub denom: String,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Hold the attached funds for `payee`.
    /// The entry is keyed by (sender, reference).
    Deposit {
        reference: String,
        payer: String,
        payee: String,
        /// Strict variant: attached funds must equal this amount
        amount: Option<Uint128>,
    },
    /// Pay an outstanding entry out to its payee
    Release {
        /// Depositor of the entry; defaults to the sender and must be the sender
        depositor: Option<String>,
        reference: String,
        payee: String,
        amount: Uint128,
    },
    /// Return an outstanding entry to its payer
    Refund {
        depositor: Option<String>,
        reference: String,
    },
    /// Update config (admin only)
    UpdateConfig { admin: Option<String> },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},

    #[returns(EscrowResponse)]
    Escrow { depositor: String, reference: String },

    #[returns(EscrowsResponse)]
    EscrowsByPayer {
        payer: String,
        start_after: Option<(String, String)>,
        limit: Option<u32>,
    },
}

#[cw_serde]
pub struct ConfigResponse {
    pub admin: String,
    pub denom: String,
}

#[cw_serde]
pub struct EscrowResponse {
    pub reference: String,
    pub depositor: String,
    pub payer: String,
    pub payee: String,
    pub amount: Uint128,
    pub denom: String,
    pub status: String,
    pub outstanding: bool,
    pub released: bool,
    pub created_at: u64,
}

#[cw_serde]
pub struct EscrowsResponse {
    pub escrows: Vec<EscrowResponse>,
}
