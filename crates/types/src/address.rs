use cosmwasm_std::{Addr, Api, StdResult};

/// True for the empty/whitespace address, the stand-in for the zero address
pub fn is_null_address(address: &str) -> bool {
    address.trim().is_empty()
}

/// Validate an address that has already been checked for null-ness
pub fn validate(api: &dyn Api, address: &str) -> StdResult<Addr> {
    api.addr_validate(address.trim())
}
