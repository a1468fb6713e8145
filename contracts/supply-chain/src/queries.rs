use cosmwasm_std::{Deps, Order, StdError, StdResult};
use cw_storage_plus::Bound;
use pharma_chain_types::price_feed::{
    DecimalsResponse, LatestValueResponse, QueryMsg as PriceFeedQueryMsg,
};
use pharma_chain_types::to_feed_units;

use crate::helpers::{batch_to_response, return_request_to_response};
use crate::msg::{
    BatchQuoteResponse, BatchResponse, BatchesResponse, ConfigResponse, ContentRefResponse,
    ReturnRequestResponse,
};
use crate::state::{Batch, BATCHES, CONFIG, NEXT_BATCH_ID, RETURN_REQUESTS};

const DEFAULT_LIMIT: u32 = 30;
const MAX_LIMIT: u32 = 100;

fn batch_or_not_found(deps: Deps, batch_id: u64) -> StdResult<Batch> {
    BATCHES
        .may_load(deps.storage, batch_id)?
        .ok_or_else(|| StdError::not_found(format!("Batch {batch_id}")))
}

pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    let next_id = NEXT_BATCH_ID.may_load(deps.storage)?.unwrap_or(1);
    Ok(ConfigResponse {
        admin: config.admin.to_string(),
        role_registry: config.role_registry.to_string(),
        escrow: config.escrow.to_string(),
        price_feed: config.price_feed.to_string(),
        denom: config.denom,
        max_markup_bps: config.max_markup_bps,
        batch_count: next_id - 1,
    })
}

pub fn query_batch(deps: Deps, batch_id: u64) -> StdResult<BatchResponse> {
    batch_or_not_found(deps, batch_id).map(batch_to_response)
}

pub fn query_content_ref(deps: Deps, batch_id: u64) -> StdResult<ContentRefResponse> {
    let batch = batch_or_not_found(deps, batch_id)?;
    Ok(ContentRefResponse {
        batch_id,
        content_ref: batch.content_ref,
    })
}

pub fn query_batches(
    deps: Deps,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<BatchesResponse> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start = start_after.map(Bound::exclusive);

    let batches = BATCHES
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| item.map(|(_, batch)| batch_to_response(batch)))
        .collect::<StdResult<Vec<_>>>()?;

    Ok(BatchesResponse { batches })
}

pub fn query_batch_quote(deps: Deps, batch_id: u64) -> StdResult<BatchQuoteResponse> {
    let config = CONFIG.load(deps.storage)?;
    let batch = batch_or_not_found(deps, batch_id)?;
    let price = batch.current_price();

    let decimals: DecimalsResponse = deps
        .querier
        .query_wasm_smart(config.price_feed.to_string(), &PriceFeedQueryMsg::Decimals {})?;
    let latest: LatestValueResponse = deps
        .querier
        .query_wasm_smart(config.price_feed.to_string(), &PriceFeedQueryMsg::LatestValue {})?;

    let feed_value = to_feed_units(price, latest.value, decimals.decimals)
        .map_err(|e| StdError::generic_err(e.to_string()))?;

    Ok(BatchQuoteResponse {
        batch_id,
        status: batch.status,
        price,
        denom: config.denom,
        feed_value,
        feed_decimals: decimals.decimals,
        feed_round_id: latest.round_id,
        feed_updated_at: latest.updated_at,
    })
}

pub fn query_return_request(deps: Deps, batch_id: u64) -> StdResult<ReturnRequestResponse> {
    RETURN_REQUESTS
        .may_load(deps.storage, batch_id)?
        .map(return_request_to_response)
        .ok_or_else(|| StdError::not_found(format!("Return request for batch {batch_id}")))
}
