use cosmwasm_std::{
    to_json_binary, Addr, BankMsg, Coin, CosmosMsg, Deps, Event, MessageInfo, StdResult, Storage,
    Uint128, WasmMsg,
};
use pharma_chain_types::escrow::ExecuteMsg as EscrowExecuteMsg;
use pharma_chain_types::registry::{ParticipantResponse, QueryMsg as RegistryQueryMsg};
use pharma_chain_types::{max_resale_price, BatchStatus, Role};

use crate::error::ContractError;
use crate::msg::{BatchResponse, PaymentResponse, ReturnRequestResponse};
use crate::state::{Batch, Config, Payment, ReturnRequest, BATCHES, RETURN_REQUESTS};

/// Check with the role registry that `account` may act as `role` right now
pub fn ensure_role(
    deps: Deps,
    config: &Config,
    account: &Addr,
    role: Role,
) -> Result<(), ContractError> {
    let participant: ParticipantResponse = deps.querier.query_wasm_smart(
        config.role_registry.to_string(),
        &RegistryQueryMsg::Participant {
            address: account.to_string(),
        },
    )?;

    if participant.frozen && !role.is_admin() {
        return Err(ContractError::AddressFrozen {
            address: account.to_string(),
        });
    }
    if !participant.can_act_as(role) {
        return Err(ContractError::Unauthorized {
            sender: account.to_string(),
            role,
        });
    }
    Ok(())
}

/// Whether `account` currently holds the registry admin role
pub fn is_registry_admin(deps: Deps, config: &Config, account: &Addr) -> StdResult<bool> {
    let participant: ParticipantResponse = deps.querier.query_wasm_smart(
        config.role_registry.to_string(),
        &RegistryQueryMsg::Participant {
            address: account.to_string(),
        },
    )?;
    Ok(participant.can_act_as(Role::Admin))
}

pub fn load_batch(storage: &dyn Storage, batch_id: u64) -> Result<Batch, ContractError> {
    BATCHES
        .may_load(storage, batch_id)?
        .ok_or(ContractError::NotFound { batch_id })
}

pub fn ensure_status(batch: &Batch, expected: BatchStatus) -> Result<(), ContractError> {
    if batch.status != expected {
        return Err(ContractError::InvalidState {
            batch_id: batch.id,
            status: batch.status,
        });
    }
    Ok(())
}

pub fn ensure_not_expired(batch: &Batch, now: u64) -> Result<(), ContractError> {
    if batch.is_expired(now) {
        return Err(ContractError::Expired {
            batch_id: batch.id,
            expiry: batch.expiry,
        });
    }
    Ok(())
}

/// Purchases and confirmations wait until an open return is resolved
pub fn ensure_no_pending_return(storage: &dyn Storage, batch_id: u64) -> Result<(), ContractError> {
    match RETURN_REQUESTS.may_load(storage, batch_id)? {
        Some(request) if request.is_pending() => Err(ContractError::ReturnPending { batch_id }),
        _ => Ok(()),
    }
}

/// Validate a distributor's resale price against the configured markup cap
pub fn check_resale_price(
    config: &Config,
    batch: &Batch,
    offer: Uint128,
) -> Result<(), ContractError> {
    if offer.is_zero() {
        return Err(ContractError::InvalidPrice {
            reason: "resale price must be positive".to_string(),
        });
    }
    if let Some(bps) = config.max_markup_bps {
        let max = max_resale_price(batch.price, bps)?;
        if offer > max {
            return Err(ContractError::InvalidPrice {
                reason: format!("resale price {offer} exceeds markup cap {max}"),
            });
        }
    }
    Ok(())
}

/// Sum of the attached funds, rejecting anything outside the payment denom
pub fn paid_amount(info: &MessageInfo, denom: &str) -> Result<Uint128, ContractError> {
    if let Some(foreign) = info.funds.iter().find(|c| c.denom != denom) {
        return Err(ContractError::InvalidFunds {
            expected: denom.to_string(),
            got: foreign.denom.clone(),
        });
    }
    Ok(info.funds.iter().map(|c| c.amount).sum())
}

/// Take `required` out of the attached funds, returning the excess refund if any
pub fn collect_payment(
    info: &MessageInfo,
    denom: &str,
    required: Uint128,
) -> Result<Option<BankMsg>, ContractError> {
    let paid = paid_amount(info, denom)?;
    if paid < required {
        return Err(ContractError::InsufficientPayment { required, paid });
    }

    let excess = paid - required;
    if excess.is_zero() {
        return Ok(None);
    }
    Ok(Some(BankMsg::Send {
        to_address: info.sender.to_string(),
        amount: vec![Coin::new(excess, denom)],
    }))
}

pub fn payment_reference(batch_id: u64, buyer: Role) -> String {
    format!("batch-{batch_id}-{buyer}")
}

pub fn escrow_deposit_msg(config: &Config, payment: &Payment) -> StdResult<CosmosMsg> {
    Ok(WasmMsg::Execute {
        contract_addr: config.escrow.to_string(),
        msg: to_json_binary(&EscrowExecuteMsg::Deposit {
            reference: payment.reference.clone(),
            payer: payment.payer.to_string(),
            payee: payment.payee.to_string(),
            amount: Some(payment.amount),
        })?,
        funds: vec![Coin::new(payment.amount, &config.denom)],
    }
    .into())
}

pub fn escrow_release_msg(config: &Config, payment: &Payment) -> StdResult<CosmosMsg> {
    Ok(WasmMsg::Execute {
        contract_addr: config.escrow.to_string(),
        msg: to_json_binary(&EscrowExecuteMsg::Release {
            depositor: None,
            reference: payment.reference.clone(),
            payee: payment.payee.to_string(),
            amount: payment.amount,
        })?,
        funds: vec![],
    }
    .into())
}

pub fn escrow_refund_msg(config: &Config, payment: &Payment) -> StdResult<CosmosMsg> {
    Ok(WasmMsg::Execute {
        contract_addr: config.escrow.to_string(),
        msg: to_json_binary(&EscrowExecuteMsg::Refund {
            depositor: None,
            reference: payment.reference.clone(),
        })?,
        funds: vec![],
    }
    .into())
}

pub fn batch_created_event(batch_id: u64, timestamp: u64) -> Event {
    Event::new("BatchCreated")
        .add_attribute("batch_id", batch_id.to_string())
        .add_attribute("timestamp", timestamp.to_string())
}

pub fn distributor_purchased_event(batch_id: u64, distributor: &Addr) -> Event {
    Event::new("DistributorPurchased")
        .add_attribute("batch_id", batch_id.to_string())
        .add_attribute("distributor", distributor.as_str())
}

pub fn retailer_purchased_event(batch_id: u64, retailer: &Addr) -> Event {
    Event::new("RetailerPurchased")
        .add_attribute("batch_id", batch_id.to_string())
        .add_attribute("retailer", retailer.as_str())
}

fn payment_to_response(payment: Payment) -> PaymentResponse {
    PaymentResponse {
        reference: payment.reference,
        payer: payment.payer.to_string(),
        payee: payment.payee.to_string(),
        amount: payment.amount,
        state: payment.state,
    }
}

pub fn batch_to_response(batch: Batch) -> BatchResponse {
    BatchResponse {
        id: batch.id,
        manufacturer: batch.manufacturer.to_string(),
        distributor: batch.distributor.map(|a| a.to_string()),
        retailer: batch.retailer.map(|a| a.to_string()),
        holder: batch.holder.to_string(),
        expiry: batch.expiry,
        price: batch.price,
        resale_price: batch.resale_price,
        status: batch.status,
        created_at: batch.created_at,
        distributor_payment: batch.distributor_payment.map(payment_to_response),
        retailer_payment: batch.retailer_payment.map(payment_to_response),
    }
}

pub fn return_request_to_response(request: ReturnRequest) -> ReturnRequestResponse {
    ReturnRequestResponse {
        batch_id: request.batch_id,
        requester: request.requester.to_string(),
        counterparty: request.counterparty.to_string(),
        reason: request.reason,
        status: request.status,
        requested_at: request.requested_at,
        resolved_at: request.resolved_at,
        resolved_by: request.resolved_by.map(|a| a.to_string()),
    }
}
