//! Gas escrow ledger handlers.
//!
//! Escrow is kept in the native denom and is only ever spent on delivery
//! costs or paid out by these handlers.

use cosmwasm_std::{coins, Addr, BankMsg, DepsMut, MessageInfo, Response, Storage, Uint128};

use crate::error::ContractError;
use crate::state::{CONFIG, ESCROW};

/// Credit the attached coin to `instance`. Permissionless so anyone can
/// sponsor delivery costs.
pub fn execute_deposit_escrow(
    deps: DepsMut,
    info: MessageInfo,
    instance: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let instance = deps.api.addr_validate(&instance)?;

    let amount = match info.funds.as_slice() {
        [coin] if coin.denom == config.escrow_denom && !coin.amount.is_zero() => coin.amount,
        _ => {
            return Err(ContractError::InvalidEscrowFunds {
                denom: config.escrow_denom,
            })
        }
    };

    let balance = ESCROW
        .may_load(deps.storage, &instance)?
        .unwrap_or_default()
        .checked_add(amount)?;
    ESCROW.save(deps.storage, &instance, &balance)?;

    Ok(Response::new()
        .add_attribute("method", "deposit_escrow")
        .add_attribute("instance", instance)
        .add_attribute("sponsor", info.sender)
        .add_attribute("amount", amount)
        .add_attribute("escrow", balance))
}

/// The instance sends part of its escrow to `destination`.
pub fn execute_withdraw_escrow(
    deps: DepsMut,
    info: MessageInfo,
    destination: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let destination = deps.api.addr_validate(&destination)?;
    if destination == info.sender {
        return Err(ContractError::InvalidEscrowDestination);
    }

    if amount.is_zero() {
        return Err(ContractError::ZeroAmount);
    }
    let remaining = debit_escrow(deps.storage, &info.sender, amount)?;

    Ok(Response::new()
        .add_message(BankMsg::Send {
            to_address: destination.to_string(),
            amount: coins(amount.u128(), config.escrow_denom),
        })
        .add_attribute("method", "withdraw_escrow")
        .add_attribute("instance", info.sender)
        .add_attribute("destination", destination)
        .add_attribute("amount", amount)
        .add_attribute("escrow", remaining))
}

/// The protocol contract reclaims escrow it spent on the instance's behalf.
pub fn execute_pull_escrow(
    deps: DepsMut,
    info: MessageInfo,
    instance: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if config.protocol.as_ref() != Some(&info.sender) {
        return Err(ContractError::UnauthorizedProtocol);
    }

    if amount.is_zero() {
        return Err(ContractError::ZeroAmount);
    }
    let instance = deps.api.addr_validate(&instance)?;
    let remaining = debit_escrow(deps.storage, &instance, amount)?;

    Ok(Response::new()
        .add_message(BankMsg::Send {
            to_address: info.sender.to_string(),
            amount: coins(amount.u128(), config.escrow_denom),
        })
        .add_attribute("method", "pull_escrow")
        .add_attribute("instance", instance)
        .add_attribute("amount", amount)
        .add_attribute("escrow", remaining))
}

/// Subtract from an instance's escrow, failing if it does not cover `amount`.
pub(crate) fn debit_escrow(
    storage: &mut dyn Storage,
    instance: &Addr,
    amount: Uint128,
) -> Result<Uint128, ContractError> {
    let available = ESCROW.may_load(storage, instance)?.unwrap_or_default();
    if available < amount {
        return Err(ContractError::InsufficientEscrow {
            required: amount,
            available,
        });
    }
    let remaining = available - amount;
    ESCROW.save(storage, instance, &remaining)?;
    Ok(remaining)
}
