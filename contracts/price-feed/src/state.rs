use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Int128};
use cw_storage_plus::Item;

#[cw_serde]
pub struct Config {
    pub admin: Addr,
    pub decimals: u8,
}

#[cw_serde]
pub struct Round {
    pub round_id: u64,
    pub answer: Int128,
    pub updated_at: u64,
}

pub const CONFIG: Item<Config> = Item::new("config");
pub const LATEST_ROUND: Item<Round> = Item::new("latest_round");
