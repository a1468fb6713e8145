//! Native price arithmetic shared by the ledger and off-chain tooling

use cosmwasm_std::{Int128, Uint128, Uint256};
use thiserror::Error;

/// Basis point denominator (100% = 10_000 bps)
pub const BPS_DENOMINATOR: u128 = 10_000;

/// Largest feed precision whose scale factor fits in a `u128`
pub const MAX_FEED_DECIMALS: u8 = 36;

#[derive(Error, Debug, PartialEq)]
pub enum PriceError {
    #[error("Price feed answer must be positive, got {answer}")]
    NonPositiveAnswer { answer: Int128 },

    #[error("Unsupported feed precision: {decimals} decimals")]
    UnsupportedDecimals { decimals: u8 },

    #[error("Price arithmetic overflow")]
    Overflow,
}

/// Convert a native amount into feed-denominated units.
///
/// `answer` is the feed's latest value scaled by `10^decimals`, so the result is
/// `amount * answer / 10^decimals`, rounded down.
pub fn to_feed_units(amount: Uint128, answer: Int128, decimals: u8) -> Result<Uint128, PriceError> {
    if answer.i128() <= 0 {
        return Err(PriceError::NonPositiveAnswer { answer });
    }
    if decimals > MAX_FEED_DECIMALS {
        return Err(PriceError::UnsupportedDecimals { decimals });
    }

    let scale = Uint256::from(10u128.pow(u32::from(decimals)));
    let product = amount.full_mul(Uint128::new(answer.i128() as u128));
    let value = product.checked_div(scale).map_err(|_| PriceError::Overflow)?;

    Uint128::try_from(value).map_err(|_| PriceError::Overflow)
}

/// Highest resale price a distributor may ask under a markup cap
pub fn max_resale_price(price: Uint128, max_markup_bps: u64) -> Result<Uint128, PriceError> {
    let numerator = BPS_DENOMINATOR
        .checked_add(u128::from(max_markup_bps))
        .ok_or(PriceError::Overflow)?;
    price
        .checked_multiply_ratio(numerator, BPS_DENOMINATOR)
        .map_err(|_| PriceError::Overflow)
}
