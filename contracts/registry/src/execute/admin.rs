//! Admin handlers.
//!
//! This module handles:
//! - Template replacement
//! - Ownership transfer
//! - Asset withdrawal
//! - Destination-side bridge configuration

use common::factory::template_checksum;
use cosmwasm_std::{DepsMut, MessageInfo, Response, Uint128};
use custody::state::transfer_msg;

use crate::error::ContractError;
use crate::state::{SisterBridge, CONFIG, SISTER_BRIDGE};

use super::authorization::ensure_owner;
use super::create::validate_address;

/// Use another stored code for new deployments. Existing instances and
/// their predicted addresses are unaffected.
pub fn execute_set_template(
    deps: DepsMut,
    info: MessageInfo,
    code_id: u64,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    if info.sender != config.owner {
        return Err(ContractError::Unauthorized);
    }

    let checksum = template_checksum(&deps.querier, code_id)?;
    config.template_code_id = code_id;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "set_template")
        .add_attribute("code_id", code_id.to_string())
        .add_attribute("checksum", checksum.to_hex()))
}

pub fn execute_withdraw(
    deps: DepsMut,
    info: MessageInfo,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.owner {
        return Err(ContractError::Unauthorized);
    }
    if amount.is_zero() {
        return Err(ContractError::ZeroAmount);
    }

    Ok(Response::new()
        .add_message(transfer_msg(&config.asset, &config.owner, amount)?)
        .add_attribute("method", "withdraw")
        .add_attribute("recipient", config.owner)
        .add_attribute("amount", amount))
}

pub fn execute_transfer_ownership(
    deps: DepsMut,
    info: MessageInfo,
    owner: String,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    if info.sender != config.owner {
        return Err(ContractError::Unauthorized);
    }

    let previous = config.owner;
    config.owner = validate_address(deps.as_ref(), &owner, "owner")?;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "transfer_ownership")
        .add_attribute("previous", previous)
        .add_attribute("owner", config.owner))
}

/// Accept migrated custody delivered by `gateway` on behalf of
/// `counterpart_bridge`.
pub fn execute_set_sister_bridge(
    deps: DepsMut,
    info: MessageInfo,
    gateway: String,
    counterpart_bridge: String,
) -> Result<Response, ContractError> {
    ensure_owner(deps.storage, &info)?;

    let sister_bridge = SisterBridge {
        gateway: validate_address(deps.as_ref(), &gateway, "gateway")?,
        counterpart_bridge: validate_address(
            deps.as_ref(),
            &counterpart_bridge,
            "counterpart bridge",
        )?
        .into_string(),
    };
    SISTER_BRIDGE.save(deps.storage, &sister_bridge)?;

    Ok(Response::new()
        .add_attribute("method", "set_sister_bridge")
        .add_attribute("gateway", sister_bridge.gateway)
        .add_attribute("counterpart_bridge", sister_bridge.counterpart_bridge))
}
