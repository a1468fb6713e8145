use cosmwasm_std::{DepsMut, Env, Event, MessageInfo, Response, Uint128};
use pharma_chain_types::{address, is_null_address, BatchStatus, PaymentState, Role};

use crate::error::ContractError;
use crate::helpers::{
    batch_created_event, check_resale_price, collect_payment, distributor_purchased_event,
    ensure_no_pending_return, ensure_not_expired, ensure_role, ensure_status, escrow_deposit_msg,
    escrow_release_msg, is_registry_admin, load_batch, payment_reference,
    retailer_purchased_event,
};
use crate::state::{Batch, Payment, BATCHES, CONFIG, NEXT_BATCH_ID};

pub fn execute_create_batch(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    manufacturer: String,
    expiry: u64,
    price: Uint128,
    content_ref: String,
) -> Result<Response, ContractError> {
    if is_null_address(&manufacturer) {
        return Err(ContractError::ZeroAddress {
            field: "Manufacturer".to_string(),
        });
    }

    let config = CONFIG.load(deps.storage)?;
    ensure_role(deps.as_ref(), &config, &info.sender, Role::Manufacturer)?;

    let manufacturer = address::validate(deps.api, &manufacturer)?;
    if manufacturer != info.sender {
        return Err(ContractError::Unauthorized {
            sender: info.sender.to_string(),
            role: Role::Manufacturer,
        });
    }

    let now = env.block.time.seconds();
    if expiry <= now {
        return Err(ContractError::ExpiredInput { expiry, now });
    }
    if price.is_zero() {
        return Err(ContractError::InvalidPrice {
            reason: "price must be positive".to_string(),
        });
    }

    let batch_id = NEXT_BATCH_ID.may_load(deps.storage)?.unwrap_or(1);
    NEXT_BATCH_ID.save(deps.storage, &(batch_id + 1))?;

    let batch = Batch {
        id: batch_id,
        manufacturer: manufacturer.clone(),
        distributor: None,
        retailer: None,
        holder: manufacturer,
        expiry,
        price,
        resale_price: None,
        content_ref,
        status: BatchStatus::Created,
        created_at: now,
        distributor_payment: None,
        retailer_payment: None,
    };
    BATCHES.save(deps.storage, batch_id, &batch)?;

    Ok(Response::new()
        .add_attribute("action", "create_batch")
        .add_attribute("batch_id", batch_id.to_string())
        .add_attribute("price", price)
        .add_event(batch_created_event(batch_id, now)))
}

pub fn execute_buy_as_distributor(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    batch_id: u64,
    offer_price: Uint128,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    ensure_role(deps.as_ref(), &config, &info.sender, Role::Distributor)?;

    let mut batch = load_batch(deps.storage, batch_id)?;
    ensure_no_pending_return(deps.storage, batch_id)?;
    ensure_status(&batch, BatchStatus::Created)?;
    ensure_not_expired(&batch, env.block.time.seconds())?;
    check_resale_price(&config, &batch, offer_price)?;

    let refund = collect_payment(&info, &config.denom, batch.price)?;

    let payment = Payment {
        reference: payment_reference(batch_id, Role::Distributor),
        payer: info.sender.clone(),
        payee: batch.manufacturer.clone(),
        amount: batch.price,
        state: PaymentState::Held,
    };
    let deposit = escrow_deposit_msg(&config, &payment)?;

    batch.holder = info.sender.clone();
    batch.distributor = Some(info.sender.clone());
    batch.resale_price = Some(offer_price);
    batch.status = BatchStatus::WithDistributor;
    batch.distributor_payment = Some(payment);
    BATCHES.save(deps.storage, batch_id, &batch)?;

    let mut response = Response::new()
        .add_message(deposit)
        .add_attribute("action", "buy_as_distributor")
        .add_attribute("batch_id", batch_id.to_string())
        .add_attribute("paid", batch.price)
        .add_attribute("resale_price", offer_price)
        .add_event(distributor_purchased_event(batch_id, &info.sender));
    if let Some(refund) = refund {
        response = response.add_message(refund);
    }
    Ok(response)
}

pub fn execute_set_resale_price(
    deps: DepsMut,
    info: MessageInfo,
    batch_id: u64,
    price: Uint128,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    ensure_role(deps.as_ref(), &config, &info.sender, Role::Distributor)?;

    let mut batch = load_batch(deps.storage, batch_id)?;
    ensure_no_pending_return(deps.storage, batch_id)?;
    ensure_status(&batch, BatchStatus::WithDistributor)?;
    if batch.holder != info.sender {
        return Err(ContractError::Unauthorized {
            sender: info.sender.to_string(),
            role: Role::Distributor,
        });
    }
    check_resale_price(&config, &batch, price)?;

    batch.resale_price = Some(price);
    BATCHES.save(deps.storage, batch_id, &batch)?;

    Ok(Response::new()
        .add_attribute("action", "set_resale_price")
        .add_attribute("batch_id", batch_id.to_string())
        .add_event(
            Event::new("ResalePriceUpdated")
                .add_attribute("batch_id", batch_id.to_string())
                .add_attribute("price", price),
        ))
}

pub fn execute_buy_as_retailer(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    batch_id: u64,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    ensure_role(deps.as_ref(), &config, &info.sender, Role::Retailer)?;

    let mut batch = load_batch(deps.storage, batch_id)?;
    ensure_no_pending_return(deps.storage, batch_id)?;
    ensure_status(&batch, BatchStatus::WithDistributor)?;
    ensure_not_expired(&batch, env.block.time.seconds())?;

    let resale_price = batch.current_price();
    let refund = collect_payment(&info, &config.denom, resale_price)?;

    let payment = Payment {
        reference: payment_reference(batch_id, Role::Retailer),
        payer: info.sender.clone(),
        payee: batch.holder.clone(),
        amount: resale_price,
        state: PaymentState::Held,
    };
    let mut messages = vec![escrow_deposit_msg(&config, &payment)?];

    // The distributor has been paid for: the manufacturer's entry settles now
    if let Some(upstream) = batch.distributor_payment.as_mut() {
        if upstream.is_held() {
            upstream.state = PaymentState::Released;
            messages.push(escrow_release_msg(&config, upstream)?);
        }
    }

    batch.holder = info.sender.clone();
    batch.retailer = Some(info.sender.clone());
    batch.status = BatchStatus::WithRetailer;
    batch.retailer_payment = Some(payment);
    BATCHES.save(deps.storage, batch_id, &batch)?;

    let mut response = Response::new()
        .add_messages(messages)
        .add_attribute("action", "buy_as_retailer")
        .add_attribute("batch_id", batch_id.to_string())
        .add_attribute("paid", resale_price)
        .add_event(retailer_purchased_event(batch_id, &info.sender));
    if let Some(refund) = refund {
        response = response.add_message(refund);
    }
    Ok(response)
}

pub fn execute_confirm_delivery(
    deps: DepsMut,
    info: MessageInfo,
    batch_id: u64,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let by_admin = is_registry_admin(deps.as_ref(), &config, &info.sender)?;
    if !by_admin {
        ensure_role(deps.as_ref(), &config, &info.sender, Role::Retailer)?;
    }

    let mut batch = load_batch(deps.storage, batch_id)?;
    ensure_no_pending_return(deps.storage, batch_id)?;
    ensure_status(&batch, BatchStatus::WithRetailer)?;
    if !by_admin && batch.holder != info.sender {
        return Err(ContractError::Unauthorized {
            sender: info.sender.to_string(),
            role: Role::Retailer,
        });
    }

    let payment = batch
        .retailer_payment
        .as_mut()
        .filter(|p| p.is_held())
        .ok_or(ContractError::PaymentNotHeld { batch_id })?;
    payment.state = PaymentState::Released;
    let release = escrow_release_msg(&config, payment)?;
    let amount = payment.amount;
    BATCHES.save(deps.storage, batch_id, &batch)?;

    Ok(Response::new()
        .add_message(release)
        .add_attribute("action", "confirm_delivery")
        .add_attribute("batch_id", batch_id.to_string())
        .add_attribute("released", amount)
        .add_event(
            Event::new("DeliveryConfirmed")
                .add_attribute("batch_id", batch_id.to_string())
                .add_attribute("retailer", batch.holder.as_str())
                .add_attribute("confirmed_by", info.sender.as_str()),
        ))
}

#[allow(clippy::too_many_arguments)]
pub fn execute_update_config(
    deps: DepsMut,
    info: MessageInfo,
    admin: Option<String>,
    role_registry: Option<String>,
    escrow: Option<String>,
    price_feed: Option<String>,
    max_markup_bps: Option<u64>,
    clear_markup_cap: bool,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    if info.sender != config.admin {
        return Err(ContractError::Unauthorized {
            sender: info.sender.to_string(),
            role: Role::Admin,
        });
    }

    if let Some(admin) = admin {
        config.admin = deps.api.addr_validate(&admin)?;
    }
    if let Some(role_registry) = role_registry {
        config.role_registry = deps.api.addr_validate(&role_registry)?;
    }
    if let Some(escrow) = escrow {
        config.escrow = deps.api.addr_validate(&escrow)?;
    }
    if let Some(price_feed) = price_feed {
        config.price_feed = deps.api.addr_validate(&price_feed)?;
    }
    if clear_markup_cap {
        config.max_markup_bps = None;
    } else if let Some(bps) = max_markup_bps {
        config.max_markup_bps = Some(bps);
    }

    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new().add_attribute("action", "update_config"))
}
