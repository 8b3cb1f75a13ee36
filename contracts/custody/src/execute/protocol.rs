//! Protocol access handlers: token destination approvals and forwarded calls.
//!
//! Authorizations are read live from the registry on every call.

use common::dispatch::call_signature;
use common::manager::{AuthorizedTargetResponse, ManagerQueryMsg, TokenDestinationsResponse};
use common::schedule::Revocability;
use cosmwasm_std::{
    to_json_binary, Addr, Binary, CosmosMsg, Deps, DepsMut, Env, MessageInfo, Response, StdError,
    SubMsg, SubMsgResult, Uint128, WasmMsg,
};
use cw20::{AllowanceResponse, Cw20ExecuteMsg, Cw20QueryMsg};
use cw_utils::parse_execute_response_data;

use crate::error::ContractError;
use crate::state::{
    asset_balance, Config, PendingForward, CONFIG, FORWARD_REPLY_ID, LEDGER, PENDING_FORWARD,
};

// ============================================================================
// Token Destinations
// ============================================================================

/// Grant unlimited allowance to every registry token destination.
pub fn execute_approve_protocol(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.beneficiary {
        return Err(ContractError::UnauthorizedBeneficiary);
    }

    let destinations = token_destinations(deps.as_ref(), &config)?;
    if destinations.is_empty() {
        return Err(ContractError::NoTokenDestinations);
    }

    let mut messages: Vec<CosmosMsg> = vec![];
    for spender in &destinations {
        let current = allowance(deps.as_ref(), &config.asset, &env.contract.address, spender)?;
        let missing = Uint128::MAX - current;
        if !missing.is_zero() {
            messages.push(allowance_msg(
                &config.asset,
                Cw20ExecuteMsg::IncreaseAllowance {
                    spender: spender.to_string(),
                    amount: missing,
                    expires: None,
                },
            )?);
        }
    }

    Ok(Response::new()
        .add_messages(messages)
        .add_attribute("method", "approve_protocol")
        .add_attribute("destinations", destinations.len().to_string()))
}

/// Clear allowances for every registry token destination.
pub fn execute_revoke_protocol(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.beneficiary {
        return Err(ContractError::UnauthorizedBeneficiary);
    }

    let destinations = token_destinations(deps.as_ref(), &config)?;
    if destinations.is_empty() {
        return Err(ContractError::NoTokenDestinations);
    }

    let mut messages: Vec<CosmosMsg> = vec![];
    for spender in &destinations {
        let current = allowance(deps.as_ref(), &config.asset, &env.contract.address, spender)?;
        if !current.is_zero() {
            messages.push(allowance_msg(
                &config.asset,
                Cw20ExecuteMsg::DecreaseAllowance {
                    spender: spender.to_string(),
                    amount: current,
                    expires: None,
                },
            )?);
        }
    }

    Ok(Response::new()
        .add_messages(messages)
        .add_attribute("method", "revoke_protocol")
        .add_attribute("destinations", destinations.len().to_string()))
}

fn token_destinations(deps: Deps, config: &Config) -> Result<Vec<Addr>, ContractError> {
    let response: TokenDestinationsResponse = deps
        .querier
        .query_wasm_smart(&config.manager, &ManagerQueryMsg::TokenDestinations {})?;
    Ok(response.destinations)
}

fn allowance(deps: Deps, asset: &Addr, owner: &Addr, spender: &Addr) -> Result<Uint128, ContractError> {
    let response: AllowanceResponse = deps.querier.query_wasm_smart(
        asset,
        &Cw20QueryMsg::Allowance {
            owner: owner.to_string(),
            spender: spender.to_string(),
        },
    )?;
    Ok(response.allowance)
}

fn allowance_msg(asset: &Addr, msg: Cw20ExecuteMsg) -> Result<CosmosMsg, ContractError> {
    Ok(CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: asset.to_string(),
        msg: to_json_binary(&msg)?,
        funds: vec![],
    }))
}

// ============================================================================
// Forwarded Calls
// ============================================================================

/// Relay an authorized call to its registered target.
///
/// The target sees this instance as the caller. A failure in the target
/// aborts the whole transaction with the target's error.
pub fn execute_forward(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    signature: String,
    msg: Binary,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.beneficiary {
        return Err(ContractError::UnauthorizedBeneficiary);
    }
    if PENDING_FORWARD.may_load(deps.storage)?.is_some() {
        return Err(ContractError::ForwardInProgress);
    }

    let actual = call_signature(&msg)?;
    if actual != signature {
        return Err(ContractError::SignatureMismatch { signature, actual });
    }

    let authorized: AuthorizedTargetResponse = deps.querier.query_wasm_smart(
        &config.manager,
        &ManagerQueryMsg::AuthorizedTarget {
            signature: signature.clone(),
        },
    )?;
    let target = authorized
        .target
        .ok_or_else(|| ContractError::UnauthorizedCall {
            signature: signature.clone(),
        })?;

    let balance_before = asset_balance(&deps.querier, &config.asset, &env.contract.address)?;
    PENDING_FORWARD.save(
        deps.storage,
        &PendingForward {
            signature: signature.clone(),
            target: target.clone(),
            balance_before,
        },
    )?;

    let call = WasmMsg::Execute {
        contract_addr: target.to_string(),
        msg,
        funds: info.funds,
    };

    Ok(Response::new()
        .add_submessage(SubMsg::reply_on_success(call, FORWARD_REPLY_ID))
        .add_attribute("method", "forward")
        .add_attribute("signature", signature)
        .add_attribute("target", target))
}

/// Settle the used-amount ledger after a forwarded call and pass the
/// target's result data back to the caller.
pub fn handle_forward_reply(
    deps: DepsMut,
    env: Env,
    result: SubMsgResult,
) -> Result<Response, ContractError> {
    let response = result.into_result().map_err(StdError::generic_err)?;
    let pending = PENDING_FORWARD.load(deps.storage)?;
    PENDING_FORWARD.remove(deps.storage);

    let config = CONFIG.load(deps.storage)?;
    let mut ledger = LEDGER.load(deps.storage)?;
    let balance_after = asset_balance(&deps.querier, &config.asset, &env.contract.address)?;

    if balance_after < pending.balance_before {
        let spent = pending.balance_before - balance_after;
        ledger.used_amount = ledger.used_amount.checked_add(spent)?;
    } else {
        let returned = balance_after - pending.balance_before;
        ledger.used_amount = ledger.used_amount.saturating_sub(returned);
    }

    if config.schedule.revocable == Revocability::Enabled {
        let vested = ledger.vested_amount(&config.schedule, env.block.time.seconds());
        if ledger.used_amount.checked_add(ledger.released_amount)? > vested {
            return Err(ContractError::UsedExceedsVested {
                used: ledger.used_amount,
                released: ledger.released_amount,
                vested,
            });
        }
    }
    LEDGER.save(deps.storage, &ledger)?;

    let mut res = Response::new()
        .add_attribute("method", "forward_settled")
        .add_attribute("signature", pending.signature)
        .add_attribute("target", pending.target)
        .add_attribute("used_amount", ledger.used_amount);
    // Reply data wraps the target's result in MsgExecuteContractResponse
    if let Some(data) = response.data {
        if let Some(inner) = parse_execute_response_data(&data)?.data {
            res = res.set_data(inner);
        }
    }
    Ok(res)
}
