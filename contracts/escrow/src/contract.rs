#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_json_binary, Addr, BankMsg, Binary, Coin, Deps, DepsMut, Env, Event, MessageInfo, Order,
    Response, StdResult, Uint128,
};
use cw_storage_plus::Bound;
use pharma_chain_types::{address, is_null_address};

use crate::error::ContractError;
use crate::msg::{
    ConfigResponse, EscrowResponse, EscrowsResponse, ExecuteMsg, InstantiateMsg, QueryMsg,
};
use crate::state::{Config, EscrowEntry, EscrowStatus, CONFIG, ESCROWS, PAYER_ESCROWS};

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
    let config = Config {
        admin,
        denom: msg.denom,
    };
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("admin", config.admin)
        .add_attribute("denom", config.denom))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::Deposit {
            reference,
            payer,
            payee,
            amount,
        } => execute_deposit(deps, env, info, reference, payer, payee, amount),
        ExecuteMsg::Release {
            depositor,
            reference,
            payee,
            amount,
        } => execute_release(deps, info, depositor, reference, payee, amount),
        ExecuteMsg::Refund {
            depositor,
            reference,
        } => execute_refund(deps, info, depositor, reference),
        ExecuteMsg::UpdateConfig { admin } => execute_update_config(deps, info, admin),
    }
}

fn execute_deposit(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    reference: String,
    payer: String,
    payee: String,
    amount: Option<Uint128>,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let payer = party(deps.as_ref(), &payer, "Payer")?;
    let payee = party(deps.as_ref(), &payee, "Payee")?;

    let paid = paid_amount(&info, &config.denom)?;
    if paid.is_zero() {
        return Err(ContractError::InsufficientPayment {
            expected: amount.unwrap_or(Uint128::one()),
            got: paid,
        });
    }
    if let Some(expected) = amount {
        if paid != expected {
            return Err(ContractError::InsufficientPayment {
                expected,
                got: paid,
            });
        }
    }

    if ESCROWS.has(deps.storage, (&info.sender, &reference)) {
        return Err(ContractError::EscrowAlreadyExists { reference });
    }

    let entry = EscrowEntry {
        reference: reference.clone(),
        depositor: info.sender.clone(),
        payer: payer.clone(),
        payee: payee.clone(),
        amount: paid,
        denom: config.denom,
        status: EscrowStatus::Outstanding,
        created_at: env.block.time.seconds(),
    };

    ESCROWS.save(deps.storage, (&info.sender, &reference), &entry)?;
    PAYER_ESCROWS.save(deps.storage, (&payer, &info.sender, &reference), &true)?;

    Ok(Response::new()
        .add_attribute("action", "deposit")
        .add_attribute("reference", &reference)
        .add_attribute("depositor", info.sender.as_str())
        .add_attribute("amount", paid)
        .add_event(
            Event::new("EscrowDeposited")
                .add_attribute("depositor", info.sender)
                .add_attribute("reference", reference)
                .add_attribute("payer", payer)
                .add_attribute("payee", payee)
                .add_attribute("amount", paid),
        ))
}

fn execute_release(
    deps: DepsMut,
    info: MessageInfo,
    depositor: Option<String>,
    reference: String,
    payee: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    if is_null_address(&payee) {
        return Err(ContractError::InvalidParty {
            field: "Payee".to_string(),
        });
    }

    let (depositor, mut entry) = load_settleable(deps.as_ref(), &info, depositor, &reference)?;

    let payee = address::validate(deps.api, &payee)?;
    if payee != entry.payee {
        return Err(ContractError::PayeeMismatch {
            expected: entry.payee.to_string(),
            got: payee.to_string(),
        });
    }
    if amount != entry.amount {
        return Err(ContractError::AmountMismatch {
            expected: entry.amount,
            got: amount,
        });
    }

    // Effects before interaction: the entry is settled before any funds move
    entry.status = EscrowStatus::Released;
    ESCROWS.save(deps.storage, (&depositor, &reference), &entry)?;

    let send_msg = BankMsg::Send {
        to_address: entry.payee.to_string(),
        amount: vec![Coin {
            denom: entry.denom.clone(),
            amount: entry.amount,
        }],
    };

    Ok(Response::new()
        .add_message(send_msg)
        .add_attribute("action", "release")
        .add_attribute("reference", &reference)
        .add_attribute("payee", entry.payee.as_str())
        .add_attribute("amount", entry.amount)
        .add_event(
            Event::new("EscrowReleased")
                .add_attribute("depositor", depositor)
                .add_attribute("reference", reference)
                .add_attribute("payee", entry.payee)
                .add_attribute("amount", entry.amount),
        ))
}

fn execute_refund(
    deps: DepsMut,
    info: MessageInfo,
    depositor: Option<String>,
    reference: String,
) -> Result<Response, ContractError> {
    let (depositor, mut entry) = load_settleable(deps.as_ref(), &info, depositor, &reference)?;

    entry.status = EscrowStatus::Refunded;
    ESCROWS.save(deps.storage, (&depositor, &reference), &entry)?;

    let refund_msg = BankMsg::Send {
        to_address: entry.payer.to_string(),
        amount: vec![Coin {
            denom: entry.denom.clone(),
            amount: entry.amount,
        }],
    };

    Ok(Response::new()
        .add_message(refund_msg)
        .add_attribute("action", "refund")
        .add_attribute("reference", &reference)
        .add_attribute("payer", entry.payer.as_str())
        .add_attribute("amount", entry.amount)
        .add_event(
            Event::new("EscrowRefunded")
                .add_attribute("depositor", depositor)
                .add_attribute("reference", reference)
                .add_attribute("payer", entry.payer)
                .add_attribute("amount", entry.amount),
        ))
}

fn execute_update_config(
    deps: DepsMut,
    info: MessageInfo,
    admin: Option<String>,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;

    if info.sender != config.admin {
        return Err(ContractError::Unauthorized {});
    }

    if let Some(admin) = admin {
        config.admin = deps.api.addr_validate(&admin)?;
    }

    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new().add_attribute("action", "update_config"))
}

/// Validate a payer/payee argument, mapping the null address to `InvalidParty`
fn party(deps: Deps, address: &str, field: &str) -> Result<Addr, ContractError> {
    if is_null_address(address) {
        return Err(ContractError::InvalidParty {
            field: field.to_string(),
        });
    }
    Ok(address::validate(deps.api, address)?)
}

/// Sum of the accepted denom in `info.funds`; any other denom is rejected
fn paid_amount(info: &MessageInfo, denom: &str) -> Result<Uint128, ContractError> {
    if let Some(foreign) = info.funds.iter().find(|c| c.denom != denom) {
        return Err(ContractError::InvalidFunds {
            expected: denom.to_string(),
            got: foreign.denom.clone(),
        });
    }
    Ok(info.funds.iter().map(|c| c.amount).sum())
}

/// Load an outstanding entry for settlement. Only the depositor may settle
/// its own entries; the vault admin has no override.
fn load_settleable(
    deps: Deps,
    info: &MessageInfo,
    depositor: Option<String>,
    reference: &str,
) -> Result<(Addr, EscrowEntry), ContractError> {
    let depositor = match depositor {
        Some(depositor) => deps.api.addr_validate(&depositor)?,
        None => info.sender.clone(),
    };

    if info.sender != depositor {
        return Err(ContractError::Unauthorized {});
    }

    let entry = ESCROWS
        .may_load(deps.storage, (&depositor, reference))?
        .ok_or_else(|| ContractError::EscrowNotFound {
            depositor: depositor.to_string(),
            reference: reference.to_string(),
        })?;

    if !entry.is_outstanding() {
        return Err(ContractError::AlreadyReleased {
            reference: reference.to_string(),
        });
    }

    Ok((depositor, entry))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::Escrow {
            depositor,
            reference,
        } => to_json_binary(&query_escrow(deps, depositor, reference)?),
        QueryMsg::EscrowsByPayer {
            payer,
            start_after,
            limit,
        } => to_json_binary(&query_escrows_by_payer(deps, payer, start_after, limit)?),
    }
}

fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        admin: config.admin.to_string(),
        denom: config.denom,
    })
}

fn query_escrow(deps: Deps, depositor: String, reference: String) -> StdResult<EscrowResponse> {
    let depositor = deps.api.addr_validate(&depositor)?;
    let entry = ESCROWS.load(deps.storage, (&depositor, &reference))?;
    Ok(escrow_to_response(entry))
}

fn query_escrows_by_payer(
    deps: Deps,
    payer: String,
    start_after: Option<(String, String)>,
    limit: Option<u32>,
) -> StdResult<EscrowsResponse> {
    let payer = deps.api.addr_validate(&payer)?;
    let limit = limit.unwrap_or(30).min(100) as usize;

    let start = start_after
        .map(|(depositor, reference)| {
            deps.api
                .addr_validate(&depositor)
                .map(|depositor| (depositor, reference))
        })
        .transpose()?;
    let min = start
        .as_ref()
        .map(|(depositor, reference)| Bound::exclusive((depositor, reference.as_str())));

    let escrows = PAYER_ESCROWS
        .sub_prefix(&payer)
        .keys(deps.storage, min, None, Order::Ascending)
        .take(limit)
        .map(|key| {
            let (depositor, reference) = key?;
            ESCROWS
                .load(deps.storage, (&depositor, &reference))
                .map(escrow_to_response)
        })
        .collect::<StdResult<Vec<_>>>()?;

    Ok(EscrowsResponse { escrows })
}

fn escrow_to_response(entry: EscrowEntry) -> EscrowResponse {
    let status = match entry.status {
        EscrowStatus::Outstanding => "outstanding",
        EscrowStatus::Released => "released",
        EscrowStatus::Refunded => "refunded",
    };

    EscrowResponse {
        outstanding: entry.is_outstanding(),
        released: matches!(entry.status, EscrowStatus::Released),
        status: status.to_string(),
        reference: entry.reference,
        depositor: entry.depositor.to_string(),
        payer: entry.payer.to_string(),
        payee: entry.payee.to_string(),
        amount: entry.amount,
        denom: entry.denom,
        created_at: entry.created_at,
    }
}
