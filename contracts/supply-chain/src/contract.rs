#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_json_binary, Addr, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdError, StdResult,
};
use pharma_chain_types::{address, is_null_address};

use crate::error::ContractError;
use crate::handlers::{
    execute_buy_as_distributor, execute_buy_as_retailer, execute_confirm_delivery,
    execute_create_batch, execute_set_resale_price, execute_update_config,
};
use crate::msg::{ExecuteMsg, InstantiateMsg, QueryMsg};
use crate::queries::{
    query_batch, query_batch_quote, query_batches, query_config, query_content_ref,
    query_return_request,
};
use crate::requests::{execute_request_return, execute_resolve_return};
use crate::state::{Config, CONFIG, NEXT_BATCH_ID};

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    let admin = match msg.admin {
        Some(admin) => deps.api.addr_validate(&admin)?,
        None => info.sender,
    };

    let role_registry = collaborator(deps.as_ref(), "Role registry", &msg.role_registry)?;
    let escrow = collaborator(deps.as_ref(), "Escrow", &msg.escrow)?;
    let price_feed = collaborator(deps.as_ref(), "Price feed", &msg.price_feed)?;

    if msg.denom.trim().is_empty() {
        return Err(StdError::generic_err("denom must not be empty").into());
    }

    let config = Config {
        admin,
        role_registry,
        escrow,
        price_feed,
        denom: msg.denom,
        max_markup_bps: msg.max_markup_bps,
    };
    CONFIG.save(deps.storage, &config)?;
    NEXT_BATCH_ID.save(deps.storage, &1)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("admin", config.admin.as_str())
        .add_attribute("denom", config.denom))
}

fn collaborator(deps: Deps, field: &str, addr: &str) -> Result<Addr, ContractError> {
    if is_null_address(addr) {
        return Err(ContractError::ZeroAddress {
            field: field.to_string(),
        });
    }
    Ok(address::validate(deps.api, addr)?)
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::CreateBatch {
            manufacturer,
            expiry,
            price,
            content_ref,
        } => execute_create_batch(deps, env, info, manufacturer, expiry, price, content_ref),
        ExecuteMsg::BuyAsDistributor {
            batch_id,
            offer_price,
        } => execute_buy_as_distributor(deps, env, info, batch_id, offer_price),
        ExecuteMsg::SetResalePrice { batch_id, price } => {
            execute_set_resale_price(deps, info, batch_id, price)
        }
        ExecuteMsg::BuyAsRetailer { batch_id } => {
            execute_buy_as_retailer(deps, env, info, batch_id)
        }
        ExecuteMsg::ConfirmDelivery { batch_id } => {
            execute_confirm_delivery(deps, info, batch_id)
        }
        ExecuteMsg::RequestReturn { batch_id, reason } => {
            execute_request_return(deps, env, info, batch_id, reason)
        }
        ExecuteMsg::ResolveReturn { batch_id, approve } => {
            execute_resolve_return(deps, env, info, batch_id, approve)
        }
        ExecuteMsg::UpdateConfig {
            admin,
            role_registry,
            escrow,
            price_feed,
            max_markup_bps,
            clear_markup_cap,
        } => execute_update_config(
            deps,
            info,
            admin,
            role_registry,
            escrow,
            price_feed,
            max_markup_bps,
            clear_markup_cap,
        ),
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::BatchDetails { batch_id } => to_json_binary(&query_batch(deps, batch_id)?),
        QueryMsg::ContentRef { batch_id } => to_json_binary(&query_content_ref(deps, batch_id)?),
        QueryMsg::Batches { start_after, limit } => {
            to_json_binary(&query_batches(deps, start_after, limit)?)
        }
        QueryMsg::BatchQuote { batch_id } => to_json_binary(&query_batch_quote(deps, batch_id)?),
        QueryMsg::ReturnRequest { batch_id } => {
            to_json_binary(&query_return_request(deps, batch_id)?)
        }
    }
}
