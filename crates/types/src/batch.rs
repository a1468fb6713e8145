use std::fmt;

use cosmwasm_schema::cw_serde;

/// Custody stage of a batch
///
/// Transitions only move forward along
/// `Created -> WithDistributor -> WithRetailer`; `Returned` is terminal and
/// reachable from the two purchased stages through an approved return.
#[cw_serde]
#[derive(Copy, Eq)]
pub enum BatchStatus {
    Created,
    WithDistributor,
    WithRetailer,
    Returned,
}

impl BatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BatchStatus::Created => "created",
            BatchStatus::WithDistributor => "with_distributor",
            BatchStatus::WithRetailer => "with_retailer",
            BatchStatus::Returned => "returned",
        }
    }

    pub fn can_transition_to(&self, next: BatchStatus) -> bool {
        matches!(
            (self, next),
            (BatchStatus::Created, BatchStatus::WithDistributor)
                | (BatchStatus::WithDistributor, BatchStatus::WithRetailer)
                | (BatchStatus::WithDistributor, BatchStatus::Returned)
                | (BatchStatus::WithRetailer, BatchStatus::Returned)
        )
    }

    /// Whether a holder may ask to return the batch in this stage
    pub fn is_returnable(&self) -> bool {
        matches!(
            self,
            BatchStatus::WithDistributor | BatchStatus::WithRetailer
        )
    }
}

impl fmt::Display for BatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ledger-side view of an escrowed purchase payment
#[cw_serde]
#[derive(Copy, Eq)]
pub enum PaymentState {
    Held,
    Released,
    Refunded,
}

impl PaymentState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentState::Held => "held",
            PaymentState::Released => "released",
            PaymentState::Refunded => "refunded",
        }
    }
}

/// Lifecycle of a return request
#[cw_serde]
#[derive(Copy, Eq)]
pub enum ReturnStatus {
    Pending,
    Approved,
    Rejected,
}

impl ReturnStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReturnStatus::Pending => "pending",
            ReturnStatus::Approved => "approved",
            ReturnStatus::Rejected => "rejected",
        }
    }
}
