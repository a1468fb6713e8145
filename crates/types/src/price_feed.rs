//! Read interface of a price feed, plus the admin setter of the mock feed

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Int128;

#[cw_serde]
pub struct InstantiateMsg {
    pub decimals: u8,
    pub initial_answer: Int128,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Publish a new answer (admin only)
    UpdateAnswer { answer: Int128 },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},

    #[returns(DecimalsResponse)]
    Decimals {},

    #[returns(LatestValueResponse)]
    LatestValue {},
}

#[cw_serde]
pub struct ConfigResponse {
    pub admin: String,
    pub decimals: u8,
}

#[cw_serde]
pub struct DecimalsResponse {
    pub decimals: u8,
}

#[cw_serde]
pub struct LatestValueResponse {
    pub value: Int128,
    pub round_id: u64,
    pub updated_at: u64,
}
