#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_json_binary, Binary, Deps, DepsMut, Env, Int128, MessageInfo, Response, StdResult,
};
use pharma_chain_types::price::MAX_FEED_DECIMALS;

use crate::error::ContractError;
use crate::msg::{
    ConfigResponse, DecimalsResponse, ExecuteMsg, InstantiateMsg, LatestValueResponse, QueryMsg,
};
use crate::state::{Config, Round, CONFIG, LATEST_ROUND};

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    if msg.decimals > MAX_FEED_DECIMALS {
        return Err(ContractError::UnsupportedDecimals {
            decimals: msg.decimals,
            max: MAX_FEED_DECIMALS,
        });
    }

    CONFIG.save(
        deps.storage,
        &Config {
            admin: info.sender,
            decimals: msg.decimals,
        },
    )?;
    LATEST_ROUND.save(
        deps.storage,
        &Round {
            round_id: 1,
            answer: msg.initial_answer,
            updated_at: env.block.time.seconds(),
        },
    )?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("decimals", msg.decimals.to_string())
        .add_attribute("answer", msg.initial_answer.to_string()))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::UpdateAnswer { answer } => execute_update_answer(deps, env, info, answer),
    }
}

fn execute_update_answer(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    answer: Int128,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.admin {
        return Err(ContractError::Unauthorized {});
    }

    let round = LATEST_ROUND.update(deps.storage, |round| -> StdResult<Round> {
        Ok(Round {
            round_id: round.round_id + 1,
            answer,
            updated_at: env.block.time.seconds(),
        })
    })?;

    Ok(Response::new()
        .add_attribute("action", "update_answer")
        .add_attribute("round_id", round.round_id.to_string())
        .add_attribute("answer", answer.to_string()))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => {
            let config = CONFIG.load(deps.storage)?;
            to_json_binary(&ConfigResponse {
                admin: config.admin.to_string(),
                decimals: config.decimals,
            })
        }
        QueryMsg::Decimals {} => to_json_binary(&DecimalsResponse {
            decimals: CONFIG.load(deps.storage)?.decimals,
        }),
        QueryMsg::LatestValue {} => {
            let round = LATEST_ROUND.load(deps.storage)?;
            to_json_binary(&LatestValueResponse {
                value: round.answer,
                round_id: round.round_id,
                updated_at: round.updated_at,
            })
        }
    }
}
