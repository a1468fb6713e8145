use cosmwasm_std::{StdError, Uint128};
use pharma_chain_types::{BatchStatus, PriceError, Role};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Price(#[from] PriceError),

    #[error("Unauthorized: {sender} cannot act as {role}")]
    Unauthorized { sender: String, role: Role },

    #[error("Address is frozen: {address}")]
    AddressFrozen { address: String },

    #[error("{field} address cannot be zero")]
    ZeroAddress { field: String },

    #[error("Invalid state for batch {batch_id}: {status}")]
    InvalidState { batch_id: u64, status: BatchStatus },

    #[error("Expiry {expiry} must be after the current time {now}")]
    ExpiredInput { expiry: u64, now: u64 },

    #[error("Batch {batch_id} expired at {expiry}")]
    Expired { batch_id: u64, expiry: u64 },

    #[error("Invalid price: {reason}")]
    InvalidPrice { reason: String },

    #[error("Insufficient payment: required {required}, paid {paid}")]
    InsufficientPayment { required: Uint128, paid: Uint128 },

    #[error("Invalid funds: expected {expected}, got {got}")]
    InvalidFunds { expected: String, got: String },

    #[error("Batch not found: {batch_id}")]
    NotFound { batch_id: u64 },

    #[error("Batch {batch_id} has a pending return request")]
    ReturnPending { batch_id: u64 },

    #[error("Return already requested for batch {batch_id}")]
    ReturnAlreadyPending { batch_id: u64 },

    #[error("No pending return for batch {batch_id}")]
    NoPendingReturn { batch_id: u64 },

    #[error("Return window closed for batch {batch_id}: payment already settled")]
    ReturnWindowClosed { batch_id: u64 },

    #[error("Payment for batch {batch_id} is not held in escrow")]
    PaymentNotHeld { batch_id: u64 },
}
