//! Deterministic custody instance deployment.

use common::factory::{compute_address_for_code, deploy_msg};
use common::hash::push_bytes;
use common::schedule::Schedule;
use common::{bytes32_to_hex, keccak256};
use cosmwasm_std::{Addr, CosmosMsg, Deps, DepsMut, Env, MessageInfo, Response, Uint128};
use custody::msg::InstantiateMsg as CustodyInstantiateMsg;
use custody::state::{asset_balance, transfer_msg};

use crate::error::ContractError;
use crate::state::{Config, InstanceRecord, CONFIG, INSTANCES};

/// Salt for a registry-created instance: keccak256 over the encoded
/// constructor arguments.
pub fn creation_salt(owner: &Addr, beneficiary: &Addr, schedule: &Schedule) -> [u8; 32] {
    let mut preimage = Vec::new();
    push_bytes(&mut preimage, owner.as_bytes());
    push_bytes(&mut preimage, beneficiary.as_bytes());
    schedule.encode_into(&mut preimage);
    keccak256(&preimage)
}

/// Deploy a custody instance and fund it from the registry balance.
pub fn execute_create_custody_instance(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    owner: String,
    beneficiary: String,
    schedule: Schedule,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.owner {
        return Err(ContractError::Unauthorized);
    }

    let owner = validate_address(deps.as_ref(), &owner, "owner")?;
    let beneficiary = validate_address(deps.as_ref(), &beneficiary, "beneficiary")?;
    schedule.validate()?;

    let available = asset_balance(&deps.querier, &config.asset, &env.contract.address)?;
    if available < schedule.managed_amount {
        return Err(ContractError::InsufficientBalance {
            required: schedule.managed_amount,
            available,
        });
    }

    let salt = creation_salt(&owner, &beneficiary, &schedule);
    let init = CustodyInstantiateMsg {
        owner: owner.to_string(),
        beneficiary: beneficiary.to_string(),
        manager: env.contract.address.to_string(),
        asset: config.asset.to_string(),
        schedule: schedule.clone(),
        sister: None,
    };
    let (address, messages) =
        deploy_instance(deps.as_ref(), &env, &config, &salt, &init, schedule.managed_amount)?;

    INSTANCES.save(
        deps.storage,
        &address,
        &InstanceRecord {
            owner,
            beneficiary,
            managed_amount: schedule.managed_amount,
            created_at: env.block.time.seconds(),
            sister_source: None,
        },
    )?;

    Ok(Response::new()
        .add_messages(messages)
        .add_attribute("method", "create_custody_instance")
        .add_attribute("instance", address)
        .add_attribute("salt", bytes32_to_hex(&salt))
        .add_attribute("managed_amount", schedule.managed_amount))
}

/// Predict the instance address, then build the deployment and funding
/// messages. Deployment and initialization run as one instantiate message.
pub(crate) fn deploy_instance(
    deps: Deps,
    env: &Env,
    config: &Config,
    salt: &[u8; 32],
    init: &CustodyInstantiateMsg,
    funding: Uint128,
) -> Result<(Addr, Vec<CosmosMsg>), ContractError> {
    let address =
        compute_address_for_code(deps, &env.contract.address, config.template_code_id, salt)?;
    if INSTANCES.has(deps.storage, &address) {
        return Err(ContractError::InstanceExists {
            address: address.to_string(),
        });
    }

    let deploy = deploy_msg(
        config.template_code_id,
        salt,
        format!("custody {}", bytes32_to_hex(salt)),
        None,
        init,
    )?;
    let mut messages = vec![CosmosMsg::Wasm(deploy)];
    if !funding.is_zero() {
        messages.push(transfer_msg(&config.asset, &address, funding)?);
    }
    Ok((address, messages))
}

pub(crate) fn validate_address(deps: Deps, address: &str, field: &str) -> Result<Addr, ContractError> {
    if address.is_empty() {
        return Err(ContractError::EmptyAddress {
            field: field.to_string(),
        });
    }
    Ok(deps.api.addr_validate(address)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::schedule::Revocability;

    fn schedule() -> Schedule {
        Schedule {
            managed_amount: Uint128::new(1_000),
            start_time: 100,
            end_time: 1_300,
            periods: 12,
            release_start_time: 0,
            vesting_cliff_time: 0,
            revocable: Revocability::Disabled,
        }
    }

    #[test]
    fn test_creation_salt_binds_arguments() {
        let owner = Addr::unchecked("owner");
        let beneficiary = Addr::unchecked("beneficiary");
        let base = creation_salt(&owner, &beneficiary, &schedule());

        assert_eq!(base, creation_salt(&owner, &beneficiary, &schedule()));
        assert_ne!(base, creation_salt(&beneficiary, &owner, &schedule()));

        let mut other = schedule();
        other.revocable = Revocability::Enabled;
        assert_ne!(base, creation_salt(&owner, &beneficiary, &other));
    }
}
