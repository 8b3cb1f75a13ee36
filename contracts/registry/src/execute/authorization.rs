//! Allow-list handlers: forwarded call targets and token destinations.
//!
//! Instances read these live on every forwarded call or approval, so a
//! change here takes effect immediately for every instance.

use common::dispatch::validate_signature;
use cosmwasm_std::{Addr, DepsMut, MessageInfo, Response, Storage};

use crate::error::ContractError;
use crate::msg::AuthorizedCall;
use crate::state::{AUTHORIZED_CALLS, CONFIG, TOKEN_DESTINATIONS};

use super::create::validate_address;

// ============================================================================
// Authorized Calls
// ============================================================================

pub fn execute_set_authorized_call(
    mut deps: DepsMut,
    info: MessageInfo,
    signature: String,
    target: String,
) -> Result<Response, ContractError> {
    ensure_owner(deps.storage, &info)?;
    let target = store_authorized_call(&mut deps, &signature, &target)?;

    Ok(Response::new()
        .add_attribute("method", "set_authorized_call")
        .add_attribute("signature", signature)
        .add_attribute("target", target))
}

/// Batch variant; every entry overwrites its signature.
pub fn execute_set_authorized_calls(
    mut deps: DepsMut,
    info: MessageInfo,
    calls: Vec<AuthorizedCall>,
) -> Result<Response, ContractError> {
    ensure_owner(deps.storage, &info)?;

    let mut response = Response::new()
        .add_attribute("method", "set_authorized_calls")
        .add_attribute("count", calls.len().to_string());
    for call in calls {
        let target = store_authorized_call(&mut deps, &call.signature, &call.target)?;
        response = response.add_attribute(call.signature, target);
    }
    Ok(response)
}

pub fn execute_unset_authorized_call(
    deps: DepsMut,
    info: MessageInfo,
    signature: String,
) -> Result<Response, ContractError> {
    ensure_owner(deps.storage, &info)?;
    if !AUTHORIZED_CALLS.has(deps.storage, &signature) {
        return Err(ContractError::CallNotFound { signature });
    }
    AUTHORIZED_CALLS.remove(deps.storage, &signature);

    Ok(Response::new()
        .add_attribute("method", "unset_authorized_call")
        .add_attribute("signature", signature))
}

fn store_authorized_call(
    deps: &mut DepsMut,
    signature: &str,
    target: &str,
) -> Result<Addr, ContractError> {
    validate_signature(signature)?;
    let target = validate_address(deps.as_ref(), target, "target")?;
    AUTHORIZED_CALLS.save(deps.storage, signature, &target)?;
    Ok(target)
}

// ============================================================================
// Token Destinations
// ============================================================================

pub fn execute_add_token_destination(
    deps: DepsMut,
    info: MessageInfo,
    address: String,
) -> Result<Response, ContractError> {
    ensure_owner(deps.storage, &info)?;
    let destination = validate_address(deps.as_ref(), &address, "destination")?;
    if TOKEN_DESTINATIONS.has(deps.storage, &destination) {
        return Err(ContractError::DestinationExists { address });
    }
    TOKEN_DESTINATIONS.save(deps.storage, &destination, &true)?;

    Ok(Response::new()
        .add_attribute("method", "add_token_destination")
        .add_attribute("destination", destination))
}

pub fn execute_remove_token_destination(
    deps: DepsMut,
    info: MessageInfo,
    address: String,
) -> Result<Response, ContractError> {
    ensure_owner(deps.storage, &info)?;
    let destination = deps.api.addr_validate(&address)?;
    if !TOKEN_DESTINATIONS.has(deps.storage, &destination) {
        return Err(ContractError::DestinationNotFound { address });
    }
    TOKEN_DESTINATIONS.remove(deps.storage, &destination);

    Ok(Response::new()
        .add_attribute("method", "remove_token_destination")
        .add_attribute("destination", destination))
}

pub(crate) fn ensure_owner(storage: &dyn Storage, info: &MessageInfo) -> Result<(), ContractError> {
    let config = CONFIG.load(storage)?;
    if info.sender != config.owner {
        return Err(ContractError::Unauthorized);
    }
    Ok(())
}
