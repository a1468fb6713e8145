/// Adversarial tests for the role registry
///
/// - Privilege escalation by non-admins
/// - Frozen participants regaining power
/// - Locking the registry by removing every admin

use cosmwasm_std::testing::{message_info, mock_dependencies, mock_env, MockApi};
use cosmwasm_std::{from_json, Addr};

use pharma_chain_types::Role;
use pharma_role_registry::contract::{execute, instantiate, query};
use pharma_role_registry::error::ContractError;
use pharma_role_registry::msg::{ExecuteMsg, InstantiateMsg, ParticipantResponse, QueryMsg};

struct TestAddrs {
    admin: Addr,
    manufacturer: Addr,
    attacker: Addr,
}

fn test_addrs(api: &MockApi) -> TestAddrs {
    TestAddrs {
        admin: api.addr_make("admin"),
        manufacturer: api.addr_make("manufacturer"),
        attacker: api.addr_make("attacker"),
    }
}

fn setup_contract() -> (
    cosmwasm_std::OwnedDeps<
        cosmwasm_std::MemoryStorage,
        cosmwasm_std::testing::MockApi,
        cosmwasm_std::testing::MockQuerier,
    >,
    TestAddrs,
) {
    let mut deps = mock_dependencies();
    let addrs = test_addrs(&deps.api);

    instantiate(
        deps.as_mut(),
        mock_env(),
        message_info(&addrs.admin, &[]),
        InstantiateMsg { admin: None },
    )
    .unwrap();

    (deps, addrs)
}

fn participant(
    deps: &cosmwasm_std::OwnedDeps<
        cosmwasm_std::MemoryStorage,
        cosmwasm_std::testing::MockApi,
        cosmwasm_std::testing::MockQuerier,
    >,
    address: &Addr,
) -> ParticipantResponse {
    from_json(
        query(
            deps.as_ref(),
            mock_env(),
            QueryMsg::Participant {
                address: address.to_string(),
            },
        )
        .unwrap(),
    )
    .unwrap()
}

// ═══════════════════════════════════════════════════════════════════════════
// PRIVILEGE ESCALATION
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_attacker_cannot_grant_self_admin() {
    let (mut deps, addrs) = setup_contract();

    let err = execute(
        deps.as_mut(),
        mock_env(),
        message_info(&addrs.attacker, &[]),
        ExecuteMsg::Grant {
            role: Role::Admin,
            address: addrs.attacker.to_string(),
        },
    )
    .unwrap_err();

    assert!(matches!(err, ContractError::Unauthorized { .. }));
    assert!(participant(&deps, &addrs.attacker).roles.is_empty());
}

#[test]
fn test_operational_role_does_not_confer_admin_powers() {
    let (mut deps, addrs) = setup_contract();
    execute(
        deps.as_mut(),
        mock_env(),
        message_info(&addrs.admin, &[]),
        ExecuteMsg::Grant {
            role: Role::Manufacturer,
            address: addrs.manufacturer.to_string(),
        },
    )
    .unwrap();

    // A manufacturer cannot revoke itself out of the registry's books...
    let err = execute(
        deps.as_mut(),
        mock_env(),
        message_info(&addrs.manufacturer, &[]),
        ExecuteMsg::Revoke {
            role: Role::Manufacturer,
            address: addrs.manufacturer.to_string(),
        },
    )
    .unwrap_err();
    assert!(matches!(err, ContractError::Unauthorized { .. }));

    // ...nor unfreeze anyone
    let err = execute(
        deps.as_mut(),
        mock_env(),
        message_info(&addrs.manufacturer, &[]),
        ExecuteMsg::Unfreeze {
            address: addrs.attacker.to_string(),
        },
    )
    .unwrap_err();
    assert!(matches!(err, ContractError::Unauthorized { .. }));
}

// ═══════════════════════════════════════════════════════════════════════════
// FROZEN PARTICIPANTS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_role_granted_while_frozen_cannot_be_used() {
    let (mut deps, addrs) = setup_contract();

    for msg in [
        ExecuteMsg::Freeze {
            address: addrs.manufacturer.to_string(),
        },
        ExecuteMsg::Grant {
            role: Role::Manufacturer,
            address: addrs.manufacturer.to_string(),
        },
    ] {
        execute(deps.as_mut(), mock_env(), message_info(&addrs.admin, &[]), msg).unwrap();
    }

    let p = participant(&deps, &addrs.manufacturer);
    assert!(p.roles.contains(&Role::Manufacturer));
    assert!(p.frozen);
    assert!(!p.can_act_as(Role::Manufacturer));
}

#[test]
fn test_frozen_flag_survives_role_removal() {
    let (mut deps, addrs) = setup_contract();

    for msg in [
        ExecuteMsg::Grant {
            role: Role::Retailer,
            address: addrs.attacker.to_string(),
        },
        ExecuteMsg::Freeze {
            address: addrs.attacker.to_string(),
        },
        ExecuteMsg::Revoke {
            role: Role::Retailer,
            address: addrs.attacker.to_string(),
        },
    ] {
        execute(deps.as_mut(), mock_env(), message_info(&addrs.admin, &[]), msg).unwrap();
    }

    assert!(participant(&deps, &addrs.attacker).frozen);
}

// ═══════════════════════════════════════════════════════════════════════════
// GOVERNANCE LOCKOUT
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_registry_always_keeps_an_admin() {
    let (mut deps, addrs) = setup_contract();

    let err = execute(
        deps.as_mut(),
        mock_env(),
        message_info(&addrs.admin, &[]),
        ExecuteMsg::Revoke {
            role: Role::Admin,
            address: addrs.admin.to_string(),
        },
    )
    .unwrap_err();
    assert!(matches!(err, ContractError::LastAdmin {}));

    // Freezing an admin leaves its admin role in place
    execute(
        deps.as_mut(),
        mock_env(),
        message_info(&addrs.admin, &[]),
        ExecuteMsg::Freeze {
            address: addrs.admin.to_string(),
        },
    )
    .unwrap();
    assert!(participant(&deps, &addrs.admin).can_act_as(Role::Admin));
}
