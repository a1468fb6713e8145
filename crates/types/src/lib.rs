pub mod address;
pub mod batch;
pub mod escrow;
pub mod ledger;
pub mod price;
pub mod price_feed;
pub mod registry;
pub mod role;

pub use address::is_null_address;
pub use batch::*;
pub use price::{max_resale_price, to_feed_units, PriceError, BPS_DENOMINATOR};
pub use role::*;

/// Denomination used when a deployment does not configure one
pub const DEFAULT_DENOM: &str = "uatom";
