//! Lock lifecycle and release handlers.

use common::schedule::{surplus, total_outstanding, Revocability};
use cosmwasm_std::{DepsMut, Env, MessageInfo, Response, Uint128};

use crate::error::ContractError;
use crate::state::{asset_balance, transfer_msg, CONFIG, LEDGER};

/// Beneficiary accepts the lock. Accepting twice is a no-op.
pub fn execute_accept_lock(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.beneficiary {
        return Err(ContractError::UnauthorizedBeneficiary);
    }

    let mut ledger = LEDGER.load(deps.storage)?;
    let already_accepted = ledger.is_accepted;
    if !already_accepted {
        ledger.is_accepted = true;
        LEDGER.save(deps.storage, &ledger)?;
    }

    Ok(Response::new()
        .add_attribute("method", "accept_lock")
        .add_attribute("already_accepted", already_accepted.to_string()))
}

/// Owner takes the whole balance back before the beneficiary accepted.
pub fn execute_cancel_lock(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.owner {
        return Err(ContractError::Unauthorized);
    }

    let ledger = LEDGER.load(deps.storage)?;
    if ledger.is_accepted {
        return Err(ContractError::CannotCancelAccepted);
    }

    let balance = asset_balance(&deps.querier, &config.asset, &env.contract.address)?;
    let mut response = Response::new();
    if !balance.is_zero() {
        response = response.add_message(transfer_msg(&config.asset, &config.owner, balance)?);
    }

    Ok(response
        .add_attribute("method", "cancel_lock")
        .add_attribute("owner", config.owner)
        .add_attribute("amount", balance))
}

/// Release everything currently releasable to the beneficiary.
pub fn execute_release(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.beneficiary {
        return Err(ContractError::UnauthorizedBeneficiary);
    }

    let mut ledger = LEDGER.load(deps.storage)?;
    let now = env.block.time.seconds();
    let balance = asset_balance(&deps.querier, &config.asset, &env.contract.address)?;
    let amount = ledger.releasable_amount(&config.schedule, now, balance)?;
    if amount.is_zero() {
        return Err(ContractError::NoAvailableTokens);
    }

    ledger.released_amount = ledger.released_amount.checked_add(amount)?;
    LEDGER.save(deps.storage, &ledger)?;

    Ok(Response::new()
        .add_message(transfer_msg(&config.asset, &config.beneficiary, amount)?)
        .add_attribute("method", "release")
        .add_attribute("beneficiary", config.beneficiary)
        .add_attribute("amount", amount)
        .add_attribute("released_amount", ledger.released_amount))
}

/// Withdraw funds held above what is still owed.
pub fn execute_withdraw_surplus(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.beneficiary {
        return Err(ContractError::UnauthorizedBeneficiary);
    }
    if amount.is_zero() {
        return Err(ContractError::ZeroAmount);
    }

    let ledger = LEDGER.load(deps.storage)?;
    let balance = asset_balance(&deps.querier, &config.asset, &env.contract.address)?;
    let outstanding = total_outstanding(config.schedule.managed_amount, ledger.released_amount)?;
    let available = surplus(balance, outstanding);
    if amount > available {
        return Err(ContractError::AmountExceedsSurplus {
            requested: amount,
            surplus: available,
        });
    }

    Ok(Response::new()
        .add_message(transfer_msg(&config.asset, &config.beneficiary, amount)?)
        .add_attribute("method", "withdraw_surplus")
        .add_attribute("beneficiary", config.beneficiary)
        .add_attribute("amount", amount))
}

/// Owner reclaims unvested funds. Vesting freezes at the current vested
/// amount; already vested funds stay releasable.
pub fn execute_revoke(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.owner {
        return Err(ContractError::Unauthorized);
    }
    if config.schedule.revocable != Revocability::Enabled {
        return Err(ContractError::NotRevocable);
    }

    let mut ledger = LEDGER.load(deps.storage)?;
    if ledger.is_revoked {
        return Err(ContractError::AlreadyRevoked);
    }

    let vested = config.schedule.vested_amount(env.block.time.seconds());
    let unvested = config.schedule.managed_amount.checked_sub(vested)?;
    if unvested.is_zero() {
        return Err(ContractError::NoUnvestedTokens);
    }

    ledger.is_revoked = true;
    ledger.vested_at_revoke = Some(vested);
    LEDGER.save(deps.storage, &ledger)?;

    Ok(Response::new()
        .add_message(transfer_msg(&config.asset, &config.owner, unvested)?)
        .add_attribute("method", "revoke")
        .add_attribute("owner", config.owner)
        .add_attribute("unvested_amount", unvested)
        .add_attribute("vested_amount", vested))
}
