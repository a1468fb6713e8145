use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Uint128};
use cw_storage_plus::{Item, Map};

#[cw_serde]
pub struct Config {
    /// Admin address, may settle any entry
    pub admin: Addr,
    /// Accepted native denomination
    pub denom: String,
}

#[cw_serde]
pub struct EscrowEntry {
    /// Depositor-scoped reference
    pub reference: String,
    /// Account that created the entry (and may settle it)
    pub depositor: Addr,
    /// Account the funds belong to until release
    pub payer: Addr,
    /// Account paid on release
    pub payee: Addr,
    pub amount: Uint128,
    pub denom: String,
    pub status: EscrowStatus,
    pub created_at: u64,
}

impl EscrowEntry {
    pub fn is_outstanding(&self) -> bool {
        matches!(self.status, EscrowStatus::Outstanding)
    }
}

#[cw_serde]
pub enum EscrowStatus {
    Outstanding,
    Released,
    Refunded,
}

pub const CONFIG: Item<Config> = Item::new("config");
/// (depositor, reference) -> entry
pub const ESCROWS: Map<(&Addr, &str), EscrowEntry> = Map::new("escrows");
/// (payer, depositor, reference) index
pub const PAYER_ESCROWS: Map<(&Addr, &Addr, &str), bool> = Map::new("payer_escrows");
