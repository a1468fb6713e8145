pub mod contract;
pub mod error;
pub mod handlers;
pub mod helpers;
pub mod msg;
pub mod queries;
pub mod requests;
pub mod state;

pub use crate::error::ContractError;
