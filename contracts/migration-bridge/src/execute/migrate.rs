//! Migration handlers. Both are called by a custody instance forwarding an
//! authorized call, so the caller is the instance itself.

use common::factory::compute_address;
use common::gateway::GatewayExecuteMsg;
use common::manager::{IsInstanceResponse, ManagerQueryMsg};
use common::schedule::Revocability;
use common::{bytes32_to_hex, GasParams, TransferredCustody};
use cosmwasm_std::{
    coins, to_json_binary, Addr, CosmosMsg, Deps, DepsMut, Env, MessageInfo, Response, Uint128,
    WasmMsg,
};
use cw20::Cw20ExecuteMsg;
use custody::msg::{InfoResponse, QueryMsg as CustodyQueryMsg};
use custody::state::asset_balance;

use crate::error::ContractError;
use crate::msg::MigrateResponse;
use crate::state::{Config, MigratedTarget, CONFIG, ESCROW, MIGRATED_TARGETS, SISTER_MANAGERS, SISTER_OWNERS};

use super::escrow::debit_escrow;

/// Hand `amount` of the calling instance's balance to the gateway for
/// delivery to its sister instance.
///
/// The instance must have approved this bridge to spend the asset.
pub fn execute_migrate(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    amount: Uint128,
    beneficiary: String,
    gas: GasParams,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let instance = info.sender;
    let custody = load_instance(deps.as_ref(), &config, &instance)?;

    let sister_manager = SISTER_MANAGERS
        .may_load(deps.storage, &custody.manager)?
        .ok_or_else(|| ContractError::SisterManagerNotRegistered {
            manager: custody.manager.to_string(),
        })?;
    if !custody.is_accepted {
        return Err(ContractError::NotAccepted);
    }
    if custody.schedule.revocable == Revocability::Enabled {
        return Err(ContractError::RevocableNotMigratable);
    }
    let existing = MIGRATED_TARGETS.may_load(deps.storage, &instance)?;
    if existing.as_ref().is_some_and(|target| target.manual) {
        return Err(ContractError::ManuallyPinned);
    }
    if amount.is_zero() {
        return Err(ContractError::ZeroAmount);
    }

    let balance = asset_balance(&deps.querier, &config.asset, &instance)?;
    if balance < amount {
        return Err(ContractError::InsufficientBalance {
            required: amount,
            available: balance,
        });
    }
    let required = gas.required_value()?;
    let available = ESCROW.may_load(deps.storage, &instance)?.unwrap_or_default();
    if available < required {
        return Err(ContractError::InsufficientEscrow {
            required,
            available,
        });
    }

    let (sister_owner, sister_beneficiary, fixed) = match existing {
        Some(target) => {
            let (Some(owner), Some(fixed_beneficiary)) =
                (target.sister_owner.clone(), target.sister_beneficiary.clone())
            else {
                return Err(ContractError::ManuallyPinned);
            };
            if beneficiary != fixed_beneficiary.as_str() {
                return Err(ContractError::BeneficiaryMismatch {
                    expected: fixed_beneficiary.to_string(),
                });
            }
            (owner, fixed_beneficiary, Some(target.address))
        }
        None => {
            if beneficiary.is_empty() {
                return Err(ContractError::EmptyAddress {
                    field: "beneficiary".to_string(),
                });
            }
            let sister_beneficiary = deps.api.addr_validate(&beneficiary)?;
            if deps
                .querier
                .query_wasm_contract_info(&sister_beneficiary)
                .is_ok()
            {
                return Err(ContractError::BeneficiaryIsContract {
                    address: sister_beneficiary.to_string(),
                });
            }
            let sister_owner = SISTER_OWNERS
                .may_load(deps.storage, &custody.owner)?
                .ok_or_else(|| ContractError::SisterOwnerNotRegistered {
                    owner: custody.owner.to_string(),
                })?;
            (sister_owner, sister_beneficiary, None)
        }
    };

    let transferred = TransferredCustody {
        source: instance.clone(),
        owner: sister_owner,
        beneficiary: sister_beneficiary,
        schedule: custody.schedule,
        released_amount: custody.released_amount,
        used_amount: custody.used_amount,
    };
    let salt = transferred.salt();

    let sister = match fixed {
        Some(address) => address,
        None => {
            let address = compute_address(
                deps.api,
                sister_manager.template_checksum.as_slice(),
                &sister_manager.registry,
                &salt,
            )?;
            MIGRATED_TARGETS.save(
                deps.storage,
                &instance,
                &MigratedTarget {
                    address: address.clone(),
                    manual: false,
                    sister_owner: Some(transferred.owner.clone()),
                    sister_beneficiary: Some(transferred.beneficiary.clone()),
                },
            )?;
            address
        }
    };

    let remaining = debit_escrow(deps.storage, &instance, required)?;

    let mut messages: Vec<CosmosMsg> = vec![
        cw20_msg(
            &config.asset,
            Cw20ExecuteMsg::TransferFrom {
                owner: instance.to_string(),
                recipient: env.contract.address.to_string(),
                amount,
            },
        )?,
        cw20_msg(
            &config.asset,
            Cw20ExecuteMsg::IncreaseAllowance {
                spender: config.gateway.to_string(),
                amount,
                expires: None,
            },
        )?,
    ];
    let funds = if required.is_zero() {
        vec![]
    } else {
        coins(required.u128(), &config.escrow_denom)
    };
    messages.push(CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: config.gateway.to_string(),
        msg: to_json_binary(&GatewayExecuteMsg::OutboundTransfer {
            token: config.asset.to_string(),
            recipient: sister_manager.registry.to_string(),
            amount,
            gas,
            payload: transferred.encode(),
        })?,
        funds,
    }));

    Ok(Response::new()
        .add_messages(messages)
        .set_data(to_json_binary(&MigrateResponse {
            sister: sister.clone(),
        })?)
        .add_attribute("method", "migrate")
        .add_attribute("instance", instance)
        .add_attribute("sister", sister)
        .add_attribute("sister_manager", sister_manager.registry)
        .add_attribute("amount", amount)
        .add_attribute("escrow_spent", required)
        .add_attribute("escrow", remaining)
        .add_attribute("salt", bytes32_to_hex(&salt)))
}

/// Fix the sister address of a fully vested instance without moving
/// funds. Automatic migration is disabled for the instance afterwards.
pub fn execute_set_sister_address_manually(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    address: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let instance = info.sender;
    let custody = load_instance(deps.as_ref(), &config, &instance)?;

    if env.block.time.seconds() <= custody.schedule.end_time {
        return Err(ContractError::NotFullyVested);
    }
    if MIGRATED_TARGETS.has(deps.storage, &instance) {
        return Err(ContractError::AlreadyMigrated);
    }
    if address.is_empty() {
        return Err(ContractError::EmptyAddress {
            field: "sister address".to_string(),
        });
    }
    let sister = deps.api.addr_validate(&address)?;

    MIGRATED_TARGETS.save(
        deps.storage,
        &instance,
        &MigratedTarget {
            address: sister.clone(),
            manual: true,
            sister_owner: None,
            sister_beneficiary: None,
        },
    )?;

    Ok(Response::new()
        .add_attribute("method", "set_sister_address_manually")
        .add_attribute("instance", instance)
        .add_attribute("sister", sister))
}

/// Custody state of `instance`, after checking it was created by its
/// registry and holds the bridged asset.
fn load_instance(deps: Deps, config: &Config, instance: &Addr) -> Result<InfoResponse, ContractError> {
    let not_instance = || ContractError::NotCustodyInstance {
        address: instance.to_string(),
    };

    let custody: InfoResponse = deps
        .querier
        .query_wasm_smart(instance, &CustodyQueryMsg::Info {})
        .map_err(|_| not_instance())?;
    let registered: IsInstanceResponse = deps
        .querier
        .query_wasm_smart(
            &custody.manager,
            &ManagerQueryMsg::IsInstance {
                address: instance.to_string(),
            },
        )
        .map_err(|_| not_instance())?;
    if !registered.is_instance {
        return Err(not_instance());
    }
    if custody.asset != config.asset {
        return Err(ContractError::WrongAsset {
            asset: custody.asset.to_string(),
        });
    }
    Ok(custody)
}

fn cw20_msg(asset: &Addr, msg: Cw20ExecuteMsg) -> Result<CosmosMsg, ContractError> {
    Ok(CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: asset.to_string(),
        msg: to_json_binary(&msg)?,
        funds: vec![],
    }))
}
