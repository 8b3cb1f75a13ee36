//! Query handlers for the registry contract.

use common::bytes32_to_hex;
use common::factory::{compute_address_for_code, template_checksum};
use common::manager::{AuthorizedTargetResponse, IsInstanceResponse, TokenDestinationsResponse};
use common::schedule::Schedule;
use cosmwasm_std::{Addr, Deps, Env, Order, StdResult};
use cw_storage_plus::Bound;

use crate::execute::creation_salt;
use crate::msg::{
    AuthorizedCallsResponse, ComputeAddressResponse, ConfigResponse, InstanceInfo,
    InstancesResponse, SisterInstanceResponse, SourceInstanceResponse,
};
use crate::state::{
    AUTHORIZED_CALLS, CONFIG, INSTANCES, SISTER_BRIDGE, SISTER_BY_SOURCE, SOURCE_BY_SISTER,
    TOKEN_DESTINATIONS,
};

const DEFAULT_LIMIT: u32 = 10;
const MAX_LIMIT: u32 = 30;

pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    let sister_bridge = SISTER_BRIDGE.may_load(deps.storage)?;
    Ok(ConfigResponse {
        template_checksum: template_checksum(&deps.querier, config.template_code_id)?,
        owner: config.owner,
        asset: config.asset,
        template_code_id: config.template_code_id,
        gateway: sister_bridge.as_ref().map(|b| b.gateway.clone()),
        counterpart_bridge: sister_bridge.map(|b| b.counterpart_bridge),
    })
}

// ============================================================================
// Allow-lists
// ============================================================================

pub fn query_authorized_target(deps: Deps, signature: String) -> StdResult<AuthorizedTargetResponse> {
    let target = AUTHORIZED_CALLS.may_load(deps.storage, &signature)?;
    Ok(AuthorizedTargetResponse { signature, target })
}

pub fn query_authorized_calls(
    deps: Deps,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<AuthorizedCallsResponse> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start = start_after.as_deref().map(Bound::exclusive);

    let calls = AUTHORIZED_CALLS
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| {
            let (signature, target) = item?;
            Ok(AuthorizedTargetResponse {
                signature,
                target: Some(target),
            })
        })
        .collect::<StdResult<Vec<_>>>()?;

    Ok(AuthorizedCallsResponse { calls })
}

pub fn query_token_destinations(deps: Deps) -> StdResult<TokenDestinationsResponse> {
    let destinations = TOKEN_DESTINATIONS
        .keys(deps.storage, None, None, Order::Ascending)
        .collect::<StdResult<Vec<Addr>>>()?;
    Ok(TokenDestinationsResponse { destinations })
}

// ============================================================================
// Instances
// ============================================================================

pub fn query_is_instance(deps: Deps, address: String) -> StdResult<IsInstanceResponse> {
    let is_instance = match deps.api.addr_validate(&address) {
        Ok(addr) => INSTANCES.has(deps.storage, &addr),
        Err(_) => false,
    };
    Ok(IsInstanceResponse { is_instance })
}

pub fn query_instances(
    deps: Deps,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<InstancesResponse> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start_addr = start_after
        .map(|addr| deps.api.addr_validate(&addr))
        .transpose()?;
    let start = start_addr.as_ref().map(Bound::exclusive);

    let instances = INSTANCES
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| {
            let (address, record) = item?;
            Ok(InstanceInfo {
                address,
                owner: record.owner,
                beneficiary: record.beneficiary,
                managed_amount: record.managed_amount,
                created_at: record.created_at,
                sister_source: record.sister_source,
            })
        })
        .collect::<StdResult<Vec<_>>>()?;

    Ok(InstancesResponse { instances })
}

/// Predicted address of a registry-created instance
pub fn query_compute_address(
    deps: Deps,
    env: Env,
    owner: String,
    beneficiary: String,
    schedule: Schedule,
) -> StdResult<ComputeAddressResponse> {
    let config = CONFIG.load(deps.storage)?;
    let owner = deps.api.addr_validate(&owner)?;
    let beneficiary = deps.api.addr_validate(&beneficiary)?;
    let salt = creation_salt(&owner, &beneficiary, &schedule);
    let address =
        compute_address_for_code(deps, &env.contract.address, config.template_code_id, &salt)?;
    Ok(ComputeAddressResponse {
        address,
        salt: bytes32_to_hex(&salt),
    })
}

// ============================================================================
// Sister Instances
// ============================================================================

pub fn query_sister_instance(deps: Deps, source: String) -> StdResult<SisterInstanceResponse> {
    let sister = SISTER_BY_SOURCE.may_load(deps.storage, &source)?;
    Ok(SisterInstanceResponse { source, sister })
}

pub fn query_source_instance(deps: Deps, sister: String) -> StdResult<SourceInstanceResponse> {
    let sister = deps.api.addr_validate(&sister)?;
    let source = SOURCE_BY_SISTER.may_load(deps.storage, &sister)?;
    Ok(SourceInstanceResponse { sister, source })
}
