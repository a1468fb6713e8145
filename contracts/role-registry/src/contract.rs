#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_json_binary, Addr, Binary, Deps, DepsMut, Env, Event, MessageInfo, Order, Response,
    StdResult, Storage,
};
use cw_storage_plus::Bound;
use pharma_chain_types::{address, is_null_address, Role};

use crate::error::ContractError;
use crate::msg::{
    ConfigResponse, ExecuteMsg, HasRoleResponse, InstantiateMsg, IsFrozenResponse,
    MembersResponse, ParticipantResponse, QueryMsg,
};
use crate::state::{ADMIN_COUNT, FROZEN, ROLE_MEMBERS};

const DEFAULT_LIMIT: u32 = 30;
const MAX_LIMIT: u32 = 100;

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    let admin = match msg.admin {
        Some(admin) => target_address(deps.as_ref(), &admin, "grant a role to")?,
        None => info.sender.clone(),
    };

    ROLE_MEMBERS.save(deps.storage, (Role::Admin.as_str(), &admin), &true)?;
    ADMIN_COUNT.save(deps.storage, &1)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_event(role_granted_event(Role::Admin, &admin, &info.sender)))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::Grant { role, address } => execute_grant(deps, info, role, address),
        ExecuteMsg::Revoke { role, address } => execute_revoke(deps, info, role, address),
        ExecuteMsg::Freeze { address } => execute_freeze(deps, info, address),
        ExecuteMsg::Unfreeze { address } => execute_unfreeze(deps, info, address),
    }
}

fn execute_grant(
    deps: DepsMut,
    info: MessageInfo,
    role: Role,
    address: String,
) -> Result<Response, ContractError> {
    ensure_admin(deps.storage, &info.sender)?;
    let account = target_address(deps.as_ref(), &address, "grant a role to")?;

    if ROLE_MEMBERS.has(deps.storage, (role.as_str(), &account)) {
        return Err(ContractError::AlreadyAssigned {
            role,
            address: account.to_string(),
        });
    }

    ROLE_MEMBERS.save(deps.storage, (role.as_str(), &account), &true)?;
    if role.is_admin() {
        ADMIN_COUNT.update(deps.storage, |count| -> StdResult<u64> { Ok(count + 1) })?;
    }

    Ok(Response::new()
        .add_attribute("action", "grant")
        .add_attribute("role", role.as_str())
        .add_attribute("account", account.as_str())
        .add_event(role_granted_event(role, &account, &info.sender)))
}

fn execute_revoke(
    deps: DepsMut,
    info: MessageInfo,
    role: Role,
    address: String,
) -> Result<Response, ContractError> {
    ensure_admin(deps.storage, &info.sender)?;
    let account = target_address(deps.as_ref(), &address, "revoke a role from")?;

    let mut response = Response::new()
        .add_attribute("action", "revoke")
        .add_attribute("role", role.as_str())
        .add_attribute("account", account.as_str());

    if remove_role(deps.storage, role, &account)? {
        response = response.add_event(role_revoked_event(role, &account, &info.sender));
    }

    Ok(response)
}

fn execute_freeze(
    deps: DepsMut,
    info: MessageInfo,
    address: String,
) -> Result<Response, ContractError> {
    ensure_admin(deps.storage, &info.sender)?;
    let account = target_address(deps.as_ref(), &address, "freeze")?;

    let mut response = Response::new()
        .add_attribute("action", "freeze")
        .add_attribute("account", account.as_str());

    for role in Role::OPERATIONAL {
        if remove_role(deps.storage, role, &account)? {
            response = response.add_event(role_revoked_event(role, &account, &info.sender));
        }
    }

    FROZEN.save(deps.storage, &account, &true)?;

    Ok(response.add_event(Event::new("AddressFrozen").add_attribute("account", account)))
}

fn execute_unfreeze(
    deps: DepsMut,
    info: MessageInfo,
    address: String,
) -> Result<Response, ContractError> {
    ensure_admin(deps.storage, &info.sender)?;
    let account = target_address(deps.as_ref(), &address, "unfreeze")?;

    FROZEN.remove(deps.storage, &account);

    Ok(Response::new()
        .add_attribute("action", "unfreeze")
        .add_attribute("account", account.as_str())
        .add_event(Event::new("AddressUnfrozen").add_attribute("account", account)))
}

fn ensure_admin(storage: &dyn Storage, sender: &Addr) -> Result<(), ContractError> {
    if !ROLE_MEMBERS.has(storage, (Role::Admin.as_str(), sender)) {
        return Err(ContractError::Unauthorized {
            sender: sender.to_string(),
            role: Role::Admin,
        });
    }
    Ok(())
}

/// Reject the null address before bech32 validation so callers get a domain error
fn target_address(deps: Deps, address: &str, action: &str) -> Result<Addr, ContractError> {
    if is_null_address(address) {
        return Err(ContractError::InvalidAddress {
            action: action.to_string(),
        });
    }
    Ok(address::validate(deps.api, address)?)
}

/// Returns whether the role was held
fn remove_role(storage: &mut dyn Storage, role: Role, account: &Addr) -> Result<bool, ContractError> {
    if !ROLE_MEMBERS.has(storage, (role.as_str(), account)) {
        return Ok(false);
    }

    if role.is_admin() {
        let count = ADMIN_COUNT.load(storage)?;
        if count <= 1 {
            return Err(ContractError::LastAdmin {});
        }
        ADMIN_COUNT.save(storage, &(count - 1))?;
    }

    ROLE_MEMBERS.remove(storage, (role.as_str(), account));
    Ok(true)
}

fn role_granted_event(role: Role, account: &Addr, sender: &Addr) -> Event {
    Event::new("RoleGranted")
        .add_attribute("role", role.as_str())
        .add_attribute("account", account.as_str())
        .add_attribute("sender", sender.as_str())
}

fn role_revoked_event(role: Role, account: &Addr, sender: &Addr) -> Event {
    Event::new("RoleRevoked")
        .add_attribute("role", role.as_str())
        .add_attribute("account", account.as_str())
        .add_attribute("sender", sender.as_str())
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::HasRole { address, role } => to_json_binary(&query_has_role(deps, address, role)?),
        QueryMsg::IsFrozen { address } => to_json_binary(&query_is_frozen(deps, address)?),
        QueryMsg::Participant { address } => to_json_binary(&query_participant(deps, address)?),
        QueryMsg::Members {
            role,
            start_after,
            limit,
        } => to_json_binary(&query_members(deps, role, start_after, limit)?),
    }
}

fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    Ok(ConfigResponse {
        admin_count: ADMIN_COUNT.load(deps.storage)?,
    })
}

fn query_has_role(deps: Deps, address: String, role: Role) -> StdResult<HasRoleResponse> {
    let account = deps.api.addr_validate(&address)?;
    Ok(HasRoleResponse {
        has_role: ROLE_MEMBERS.has(deps.storage, (role.as_str(), &account)),
    })
}

fn query_is_frozen(deps: Deps, address: String) -> StdResult<IsFrozenResponse> {
    let account = deps.api.addr_validate(&address)?;
    Ok(IsFrozenResponse {
        frozen: FROZEN.has(deps.storage, &account),
    })
}

fn query_participant(deps: Deps, address: String) -> StdResult<ParticipantResponse> {
    let account = deps.api.addr_validate(&address)?;
    let roles = Role::ALL
        .into_iter()
        .filter(|role| ROLE_MEMBERS.has(deps.storage, (role.as_str(), &account)))
        .collect();

    Ok(ParticipantResponse {
        address: account.to_string(),
        roles,
        frozen: FROZEN.has(deps.storage, &account),
    })
}

fn query_members(
    deps: Deps,
    role: Role,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<MembersResponse> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start = start_after
        .map(|addr| deps.api.addr_validate(&addr))
        .transpose()?;
    let min = start.as_ref().map(Bound::exclusive);

    let members = ROLE_MEMBERS
        .prefix(role.as_str())
        .keys(deps.storage, min, None, Order::Ascending)
        .take(limit)
        .map(|key| key.map(|addr| addr.to_string()))
        .collect::<StdResult<Vec<_>>>()?;

    Ok(MembersResponse { role, members })
}
