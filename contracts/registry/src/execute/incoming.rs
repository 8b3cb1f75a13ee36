//! Destination-side migration delivery.
//!
//! The gateway has already credited this registry with `amount` when the
//! hook runs. The first delivery for a source instance deploys its sister
//! at the address the source-side bridge predicted; later deliveries, and
//! duplicates, top up that same sister.

use common::{bytes32_to_hex, TransferredCustody};
use cosmwasm_std::{Binary, DepsMut, Env, MessageInfo, Response, Uint128};
use custody::msg::{InstantiateMsg as CustodyInstantiateMsg, SisterOrigin};
use custody::state::transfer_msg;

use crate::error::ContractError;
use crate::state::{
    InstanceRecord, CONFIG, INSTANCES, SISTER_BRIDGE, SISTER_BY_SOURCE, SOURCE_BY_SISTER,
};

use super::create::{deploy_instance, validate_address};

pub fn execute_on_incoming_transfer(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    sender: String,
    amount: Uint128,
    payload: Binary,
) -> Result<Response, ContractError> {
    let sister_bridge = SISTER_BRIDGE
        .may_load(deps.storage)?
        .ok_or(ContractError::SisterBridgeNotConfigured)?;
    if info.sender != sister_bridge.gateway {
        return Err(ContractError::UnauthorizedGateway);
    }
    if sender != sister_bridge.counterpart_bridge {
        return Err(ContractError::UnauthorizedSender { sender });
    }

    let transferred = TransferredCustody::decode(payload.as_slice())?;
    let config = CONFIG.load(deps.storage)?;
    let source = transferred.source.to_string();

    if let Some(sister) = SISTER_BY_SOURCE.may_load(deps.storage, &source)? {
        let mut response = Response::new();
        if !amount.is_zero() {
            response = response.add_message(transfer_msg(&config.asset, &sister, amount)?);
        }
        return Ok(response
            .add_attribute("method", "sister_instance_topped_up")
            .add_attribute("source", source)
            .add_attribute("sister", sister)
            .add_attribute("amount", amount));
    }

    let owner = validate_address(deps.as_ref(), transferred.owner.as_str(), "owner")?;
    let beneficiary =
        validate_address(deps.as_ref(), transferred.beneficiary.as_str(), "beneficiary")?;
    let salt = transferred.salt();
    let init = CustodyInstantiateMsg {
        owner: owner.to_string(),
        beneficiary: beneficiary.to_string(),
        manager: env.contract.address.to_string(),
        asset: config.asset.to_string(),
        schedule: transferred.schedule.clone(),
        sister: Some(SisterOrigin {
            source: source.clone(),
            released_amount: transferred.released_amount,
            used_amount: transferred.used_amount,
        }),
    };
    let (sister, messages) = deploy_instance(deps.as_ref(), &env, &config, &salt, &init, amount)?;

    INSTANCES.save(
        deps.storage,
        &sister,
        &InstanceRecord {
            owner,
            beneficiary,
            managed_amount: transferred.schedule.managed_amount,
            created_at: env.block.time.seconds(),
            sister_source: Some(source.clone()),
        },
    )?;
    SISTER_BY_SOURCE.save(deps.storage, &source, &sister)?;
    SOURCE_BY_SISTER.save(deps.storage, &sister, &source)?;

    Ok(Response::new()
        .add_messages(messages)
        .add_attribute("method", "sister_instance_created")
        .add_attribute("source", source)
        .add_attribute("sister", sister)
        .add_attribute("salt", bytes32_to_hex(&salt))
        .add_attribute("amount", amount))
}
