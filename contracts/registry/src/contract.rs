//! Registry Contract - Entry Points
//!
//! - `execute/` - Execute message handlers
//! - `query` - Query message handlers

use common::factory::template_checksum;
use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult,
};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::execute::{
    execute_add_token_destination, execute_create_custody_instance, execute_on_incoming_transfer,
    execute_remove_token_destination, execute_set_authorized_call, execute_set_authorized_calls,
    execute_set_sister_bridge, execute_set_template, execute_transfer_ownership,
    execute_unset_authorized_call, execute_withdraw,
};
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query::{
    query_authorized_calls, query_authorized_target, query_compute_address, query_config,
    query_instances, query_is_instance, query_sister_instance, query_source_instance,
    query_token_destinations,
};
use crate::state::{Config, CONFIG, CONTRACT_NAME, CONTRACT_VERSION};

// ============================================================================
// Instantiate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    // Fails if the template code is not stored
    template_checksum(&deps.querier, msg.template_code_id)?;

    let config = Config {
        owner: deps.api.addr_validate(&msg.owner)?,
        asset: deps.api.addr_validate(&msg.asset)?,
        template_code_id: msg.template_code_id,
    };
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("owner", config.owner)
        .add_attribute("asset", config.asset)
        .add_attribute("template_code_id", config.template_code_id.to_string()))
}

// ============================================================================
// Execute
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::CreateCustodyInstance {
            owner,
            beneficiary,
            schedule,
        } => execute_create_custody_instance(deps, env, info, owner, beneficiary, schedule),

        // Allow-lists
        ExecuteMsg::SetAuthorizedCall { signature, target } => {
            execute_set_authorized_call(deps, info, signature, target)
        }
        ExecuteMsg::SetAuthorizedCalls { calls } => execute_set_authorized_calls(deps, info, calls),
        ExecuteMsg::UnsetAuthorizedCall { signature } => {
            execute_unset_authorized_call(deps, info, signature)
        }
        ExecuteMsg::AddTokenDestination { address } => {
            execute_add_token_destination(deps, info, address)
        }
        ExecuteMsg::RemoveTokenDestination { address } => {
            execute_remove_token_destination(deps, info, address)
        }

        // Admin
        ExecuteMsg::SetTemplate { code_id } => execute_set_template(deps, info, code_id),
        ExecuteMsg::Withdraw { amount } => execute_withdraw(deps, info, amount),
        ExecuteMsg::TransferOwnership { owner } => execute_transfer_ownership(deps, info, owner),

        // Destination-side bridge
        ExecuteMsg::SetSisterBridge {
            gateway,
            counterpart_bridge,
        } => execute_set_sister_bridge(deps, info, gateway, counterpart_bridge),
        ExecuteMsg::OnIncomingTransfer {
            sender,
            amount,
            payload,
        } => execute_on_incoming_transfer(deps, env, info, sender, amount, payload),
    }
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::AuthorizedTarget { signature } => {
            to_json_binary(&query_authorized_target(deps, signature)?)
        }
        QueryMsg::AuthorizedCalls { start_after, limit } => {
            to_json_binary(&query_authorized_calls(deps, start_after, limit)?)
        }
        QueryMsg::TokenDestinations {} => to_json_binary(&query_token_destinations(deps)?),
        QueryMsg::IsInstance { address } => to_json_binary(&query_is_instance(deps, address)?),
        QueryMsg::Instances { start_after, limit } => {
            to_json_binary(&query_instances(deps, start_after, limit)?)
        }
        QueryMsg::ComputeAddress {
            owner,
            beneficiary,
            schedule,
        } => to_json_binary(&query_compute_address(
            deps,
            env,
            owner,
            beneficiary,
            schedule,
        )?),
        QueryMsg::SisterInstance { source } => {
            to_json_binary(&query_sister_instance(deps, source)?)
        }
        QueryMsg::SourceInstance { sister } => {
            to_json_binary(&query_source_instance(deps, sister)?)
        }
    }
}

// ============================================================================
// Migrate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("method", "migrate")
        .add_attribute("version", CONTRACT_VERSION))
}
