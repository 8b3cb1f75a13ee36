//! Admin handlers.
//!
//! This module handles:
//! - Sister registry registration
//! - Owner remaps between chains
//! - Escrow protocol contract
//! - Ownership transfer

use cosmwasm_std::{DepsMut, HexBinary, MessageInfo, Response, StdError};

use crate::error::ContractError;
use crate::state::{SisterManager, CONFIG, SISTER_MANAGERS, SISTER_OWNERS};

/// Register the sister-chain registry for a local registry. Sister
/// addresses are predicted from `template_checksum`, so it must match the
/// custody code the sister registry deploys.
pub fn execute_set_sister_manager(
    deps: DepsMut,
    info: MessageInfo,
    manager: String,
    sister_manager: String,
    template_checksum: HexBinary,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.owner {
        return Err(ContractError::Unauthorized);
    }
    if template_checksum.len() != 32 {
        return Err(StdError::generic_err("Template checksum must be 32 bytes").into());
    }

    let manager = deps.api.addr_validate(&manager)?;
    let sister = SisterManager {
        registry: deps.api.addr_validate(&sister_manager)?,
        template_checksum,
    };
    SISTER_MANAGERS.save(deps.storage, &manager, &sister)?;

    Ok(Response::new()
        .add_attribute("method", "set_sister_manager")
        .add_attribute("manager", manager)
        .add_attribute("sister_manager", sister.registry)
        .add_attribute("template_checksum", sister.template_checksum.to_hex()))
}

pub fn execute_set_sister_owner(
    deps: DepsMut,
    info: MessageInfo,
    owner: String,
    sister_owner: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.owner {
        return Err(ContractError::Unauthorized);
    }

    let owner = deps.api.addr_validate(&owner)?;
    let sister_owner = deps.api.addr_validate(&sister_owner)?;
    SISTER_OWNERS.save(deps.storage, &owner, &sister_owner)?;

    Ok(Response::new()
        .add_attribute("method", "set_sister_owner")
        .add_attribute("owner", owner)
        .add_attribute("sister_owner", sister_owner))
}

pub fn execute_set_protocol(
    deps: DepsMut,
    info: MessageInfo,
    protocol: Option<String>,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    if info.sender != config.owner {
        return Err(ContractError::Unauthorized);
    }

    config.protocol = protocol
        .map(|addr| deps.api.addr_validate(&addr))
        .transpose()?;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "set_protocol")
        .add_attribute(
            "protocol",
            config
                .protocol
                .map(|addr| addr.to_string())
                .unwrap_or_else(|| "none".to_string()),
        ))
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
    config.owner = deps.api.addr_validate(&owner)?;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "transfer_ownership")
        .add_attribute("previous", previous)
        .add_attribute("owner", config.owner))
}
