use cosmwasm_std::StdError;
use pharma_chain_types::Role;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Unauthorized: {sender} is missing role {role}")]
    Unauthorized { sender: String, role: Role },

    #[error("Cannot {action} the zero address")]
    InvalidAddress { action: String },

    #[error("Address already exists: {role} {address}")]
    AlreadyAssigned { role: Role, address: String },

    #[error("Cannot revoke the last admin")]
    LastAdmin {},
}
