//! Custody Instance Contract - Entry Points
//!
//! - `execute/` - Execute message handlers
//! - `query` - Query message handlers

use cosmwasm_std::{
    entry_point, to_json_binary, Api, Binary, Deps, DepsMut, Env, MessageInfo, Reply, Response,
    StdResult, Uint128,
};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::execute::{
    execute_accept_lock, execute_approve_protocol, execute_cancel_lock,
    execute_change_beneficiary, execute_forward, execute_release, execute_revoke,
    execute_revoke_protocol, execute_set_manager, execute_transfer_ownership,
    execute_withdraw_surplus, handle_forward_reply,
};
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query::{query_info, query_releasable, query_surplus, query_vesting};
use crate::state::{
    Config, Ledger, CONFIG, CONTRACT_NAME, CONTRACT_VERSION, FORWARD_REPLY_ID, LEDGER,
};

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
    initialize(deps, msg)
}

/// Store identities and schedule. Runs exactly once per instance.
pub fn initialize(deps: DepsMut, msg: InstantiateMsg) -> Result<Response, ContractError> {
    if CONFIG.may_load(deps.storage)?.is_some() {
        return Err(ContractError::AlreadyInitialized);
    }

    let owner = validate_address(deps.api, &msg.owner, "owner")?;
    let beneficiary = validate_address(deps.api, &msg.beneficiary, "beneficiary")?;
    let manager = validate_address(deps.api, &msg.manager, "manager")?;
    let asset = validate_address(deps.api, &msg.asset, "asset")?;
    msg.schedule.validate()?;

    // Instances mirrored from the source chain start accepted and carry the
    // source ledger forward.
    let (ledger, sister_source) = match msg.sister {
        Some(origin) => {
            let carried = origin.released_amount.checked_add(origin.used_amount)?;
            if carried > msg.schedule.managed_amount {
                return Err(ContractError::InvalidSisterLedger);
            }
            if origin.source.is_empty() {
                return Err(ContractError::EmptyAddress {
                    field: "sister source".to_string(),
                });
            }
            let ledger = Ledger {
                released_amount: origin.released_amount,
                used_amount: origin.used_amount,
                is_accepted: true,
                is_revoked: false,
                vested_at_revoke: None,
            };
            (ledger, Some(origin.source))
        }
        None => {
            let ledger = Ledger {
                released_amount: Uint128::zero(),
                used_amount: Uint128::zero(),
                is_accepted: false,
                is_revoked: false,
                vested_at_revoke: None,
            };
            (ledger, None)
        }
    };

    let config = Config {
        owner,
        beneficiary,
        manager,
        asset,
        schedule: msg.schedule,
        sister_source,
    };
    CONFIG.save(deps.storage, &config)?;
    LEDGER.save(deps.storage, &ledger)?;

    Ok(Response::new()
        .add_attribute("method", "initialize")
        .add_attribute("owner", config.owner)
        .add_attribute("beneficiary", config.beneficiary)
        .add_attribute("manager", config.manager)
        .add_attribute("managed_amount", config.schedule.managed_amount)
        .add_attribute("start_time", config.schedule.start_time.to_string())
        .add_attribute("end_time", config.schedule.end_time.to_string())
        .add_attribute("periods", config.schedule.periods.to_string()))
}

pub(crate) fn validate_address(
    api: &dyn Api,
    address: &str,
    field: &str,
) -> Result<cosmwasm_std::Addr, ContractError> {
    if address.is_empty() {
        return Err(ContractError::EmptyAddress {
            field: field.to_string(),
        });
    }
    Ok(api.addr_validate(address)?)
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
        // Beneficiary operations
        ExecuteMsg::AcceptLock {} => execute_accept_lock(deps, info),
        ExecuteMsg::ChangeBeneficiary { beneficiary } => {
            execute_change_beneficiary(deps, info, beneficiary)
        }
        ExecuteMsg::Release {} => execute_release(deps, env, info),
        ExecuteMsg::WithdrawSurplus { amount } => {
            execute_withdraw_surplus(deps, env, info, amount)
        }
        ExecuteMsg::ApproveProtocol {} => execute_approve_protocol(deps, env, info),
        ExecuteMsg::RevokeProtocol {} => execute_revoke_protocol(deps, env, info),
        ExecuteMsg::Forward { signature, msg } => {
            execute_forward(deps, env, info, signature, msg)
        }

        // Owner operations
        ExecuteMsg::CancelLock {} => execute_cancel_lock(deps, env, info),
        ExecuteMsg::Revoke {} => execute_revoke(deps, env, info),
        ExecuteMsg::SetManager { manager } => execute_set_manager(deps, info, manager),
        ExecuteMsg::TransferOwnership { owner } => execute_transfer_ownership(deps, info, owner),
    }
}

// ============================================================================
// Reply
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(deps: DepsMut, env: Env, msg: Reply) -> Result<Response, ContractError> {
    match msg.id {
        FORWARD_REPLY_ID => handle_forward_reply(deps, env, msg.result),
        id => Err(ContractError::UnknownReplyId { id }),
    }
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Info {} => to_json_binary(&query_info(deps)?),
        QueryMsg::Vesting {} => to_json_binary(&query_vesting(deps, env)?),
        QueryMsg::Releasable {} => to_json_binary(&query_releasable(deps, env)?),
        QueryMsg::Surplus {} => to_json_binary(&query_surplus(deps, env)?),
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
