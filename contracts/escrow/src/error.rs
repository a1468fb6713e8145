use cosmwasm_std::{StdError, Uint128};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Unauthorized")]
    Unauthorized {},

    #[error("{field} address cannot be zero")]
    InvalidParty { field: String },

    #[error("Insufficient payment sent: expected {expected}, got {got}")]
    InsufficientPayment { expected: Uint128, got: Uint128 },

    #[error("Invalid funds: expected {expected}, got {got}")]
    InvalidFunds { expected: String, got: String },

    #[error("Escrow not found: {depositor}/{reference}")]
    EscrowNotFound { depositor: String, reference: String },

    #[error("Escrow already exists: {reference}")]
    EscrowAlreadyExists { reference: String },

    #[error("Escrow already settled: {reference}")]
    AlreadyReleased { reference: String },

    #[error("Payee mismatch: escrow pays {expected}, release named {got}")]
    PayeeMismatch { expected: String, got: String },

    #[error("Amount mismatch: escrow holds {expected}, release asked {got}")]
    AmountMismatch { expected: Uint128, got: Uint128 },
}
