//! Query handlers for the migration bridge contract.

use cosmwasm_std::{Deps, StdResult};

use crate::msg::{
    ConfigResponse, EscrowResponse, MigratedTargetResponse, SisterManagerResponse,
    SisterOwnerResponse,
};
use crate::state::{CONFIG, ESCROW, MIGRATED_TARGETS, SISTER_MANAGERS, SISTER_OWNERS};

pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        owner: config.owner,
        asset: config.asset,
        gateway: config.gateway,
        escrow_denom: config.escrow_denom,
        protocol: config.protocol,
    })
}

pub fn query_escrow(deps: Deps, instance: String) -> StdResult<EscrowResponse> {
    let config = CONFIG.load(deps.storage)?;
    let instance = deps.api.addr_validate(&instance)?;
    let amount = ESCROW.may_load(deps.storage, &instance)?.unwrap_or_default();
    Ok(EscrowResponse {
        instance,
        amount,
        denom: config.escrow_denom,
    })
}

pub fn query_migrated_target(deps: Deps, instance: String) -> StdResult<MigratedTargetResponse> {
    let instance = deps.api.addr_validate(&instance)?;
    let target = MIGRATED_TARGETS.may_load(deps.storage, &instance)?;
    Ok(MigratedTargetResponse { instance, target })
}

pub fn query_sister_manager(deps: Deps, manager: String) -> StdResult<SisterManagerResponse> {
    let manager = deps.api.addr_validate(&manager)?;
    let sister_manager = SISTER_MANAGERS.may_load(deps.storage, &manager)?;
    Ok(SisterManagerResponse {
        manager,
        sister_manager,
    })
}

pub fn query_sister_owner(deps: Deps, owner: String) -> StdResult<SisterOwnerResponse> {
    let owner = deps.api.addr_validate(&owner)?;
    let sister_owner = SISTER_OWNERS.may_load(deps.storage, &owner)?;
    Ok(SisterOwnerResponse { owner, sister_owner })
}
