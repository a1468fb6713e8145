//! Return requests: the current holder asks to send a batch back to the
//! seller it paid, and the seller (or a registry admin) approves or rejects.

use cosmwasm_std::{DepsMut, Env, Event, MessageInfo, Response};
use pharma_chain_types::{BatchStatus, PaymentState, ReturnStatus, Role};

use crate::error::ContractError;
use crate::helpers::{ensure_role, escrow_refund_msg, is_registry_admin, load_batch};
use crate::state::{Batch, Payment, ReturnRequest, BATCHES, CONFIG, RETURN_REQUESTS};

/// Role the holder acts under, and the payment it made, for a returnable batch
fn holder_payment(batch: &mut Batch) -> Result<(Role, &mut Payment), ContractError> {
    let batch_id = batch.id;
    if !batch.status.is_returnable() {
        return Err(ContractError::InvalidState {
            batch_id,
            status: batch.status,
        });
    }
    let (role, payment) = if batch.status == BatchStatus::WithDistributor {
        (Role::Distributor, batch.distributor_payment.as_mut())
    } else {
        (Role::Retailer, batch.retailer_payment.as_mut())
    };
    let payment = payment.ok_or(ContractError::PaymentNotHeld { batch_id })?;
    Ok((role, payment))
}

pub fn execute_request_return(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    batch_id: u64,
    reason: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let mut batch = load_batch(deps.storage, batch_id)?;
    let holder = batch.holder.clone();
    let (role, payment) = holder_payment(&mut batch)?;

    if info.sender != holder {
        return Err(ContractError::Unauthorized {
            sender: info.sender.to_string(),
            role,
        });
    }
    ensure_role(deps.as_ref(), &config, &info.sender, role)?;

    if let Some(existing) = RETURN_REQUESTS.may_load(deps.storage, batch_id)? {
        if existing.is_pending() {
            return Err(ContractError::ReturnAlreadyPending { batch_id });
        }
    }
    if !payment.is_held() {
        return Err(ContractError::ReturnWindowClosed { batch_id });
    }

    let request = ReturnRequest {
        batch_id,
        requester: info.sender.clone(),
        counterparty: payment.payee.clone(),
        reason: reason.clone(),
        status: ReturnStatus::Pending,
        requested_at: env.block.time.seconds(),
        resolved_at: None,
        resolved_by: None,
    };
    RETURN_REQUESTS.save(deps.storage, batch_id, &request)?;

    Ok(Response::new()
        .add_attribute("action", "request_return")
        .add_attribute("batch_id", batch_id.to_string())
        .add_event(
            Event::new("ReturnRequested")
                .add_attribute("batch_id", batch_id.to_string())
                .add_attribute("requester", info.sender.as_str())
                .add_attribute("reason", reason),
        ))
}

pub fn execute_resolve_return(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    batch_id: u64,
    approve: bool,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let mut request = RETURN_REQUESTS
        .may_load(deps.storage, batch_id)?
        .filter(|r| r.is_pending())
        .ok_or(ContractError::NoPendingReturn { batch_id })?;

    if info.sender != request.counterparty
        && !is_registry_admin(deps.as_ref(), &config, &info.sender)?
    {
        return Err(ContractError::Unauthorized {
            sender: info.sender.to_string(),
            role: Role::Admin,
        });
    }

    let mut response = Response::new();
    if approve {
        let mut batch = load_batch(deps.storage, batch_id)?;
        if !batch.status.can_transition_to(BatchStatus::Returned) {
            return Err(ContractError::InvalidState {
                batch_id,
                status: batch.status,
            });
        }

        let (_, payment) = holder_payment(&mut batch)?;
        if !payment.is_held() {
            return Err(ContractError::ReturnWindowClosed { batch_id });
        }
        payment.state = PaymentState::Refunded;
        response = response.add_message(escrow_refund_msg(&config, payment)?);

        batch.holder = request.counterparty.clone();
        batch.status = BatchStatus::Returned;
        BATCHES.save(deps.storage, batch_id, &batch)?;
    }

    request.status = if approve {
        ReturnStatus::Approved
    } else {
        ReturnStatus::Rejected
    };
    request.resolved_at = Some(env.block.time.seconds());
    request.resolved_by = Some(info.sender.clone());
    RETURN_REQUESTS.save(deps.storage, batch_id, &request)?;

    Ok(response
        .add_attribute("action", "resolve_return")
        .add_attribute("batch_id", batch_id.to_string())
        .add_attribute("status", request.status.as_str())
        .add_event(
            Event::new("ReturnResolved")
                .add_attribute("batch_id", batch_id.to_string())
                .add_attribute("approved", approve.to_string())
                .add_attribute("resolver", info.sender.as_str()),
        ))
}
