use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Unauthorized")]
    Unauthorized {},

    #[error("Unsupported feed precision: {decimals} decimals (max {max})")]
    UnsupportedDecimals { decimals: u8, max: u8 },
}
