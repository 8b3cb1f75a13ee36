//! Role reassignment handlers.

use cosmwasm_std::{DepsMut, MessageInfo, Response};

use crate::contract::validate_address;
use crate::error::ContractError;
use crate::state::CONFIG;

/// Beneficiary hands its role to another address.
pub fn execute_change_beneficiary(
    deps: DepsMut,
    info: MessageInfo,
    beneficiary: String,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    if info.sender != config.beneficiary {
        return Err(ContractError::UnauthorizedBeneficiary);
    }

    let previous = config.beneficiary;
    config.beneficiary = validate_address(deps.api, &beneficiary, "beneficiary")?;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "change_beneficiary")
        .add_attribute("previous", previous)
        .add_attribute("beneficiary", config.beneficiary))
}

/// Point the instance at another registry.
pub fn execute_set_manager(
    deps: DepsMut,
    info: MessageInfo,
    manager: String,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    if info.sender != config.owner {
        return Err(ContractError::Unauthorized);
    }

    let previous = config.manager;
    config.manager = validate_address(deps.api, &manager, "manager")?;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "set_manager")
        .add_attribute("previous", previous)
        .add_attribute("manager", config.manager))
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
    config.owner = validate_address(deps.api, &owner, "owner")?;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "transfer_ownership")
        .add_attribute("previous", previous)
        .add_attribute("owner", config.owner))
}
