//! Migration Bridge Contract - Entry Points
//!
//! - `execute/` - Execute message handlers
//! - `query` - Query message handlers

use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult,
};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::execute::{
    execute_deposit_escrow, execute_migrate, execute_pull_escrow,
    execute_set_sister_address_manually, execute_set_protocol, execute_set_sister_manager,
    execute_set_sister_owner, execute_transfer_ownership, execute_withdraw_escrow,
};
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query::{
    query_config, query_escrow, query_migrated_target, query_sister_manager, query_sister_owner,
};
use crate::state::{Config, CONFIG, CONTRACT_NAME, CONTRACT_VERSION};

// ============================================================================
// Instantiate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    if msg.escrow_denom.is_empty() {
        return Err(cosmwasm_std::StdError::generic_err("Escrow denom cannot be empty").into());
    }

    let config = Config {
        owner: deps.api.addr_validate(&msg.owner)?,
        asset: deps.api.addr_validate(&msg.asset)?,
        gateway: deps.api.addr_validate(&msg.gateway)?,
        escrow_denom: msg.escrow_denom,
        protocol: msg
            .protocol
            .map(|addr| deps.api.addr_validate(&addr))
            .transpose()?,
    };
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("owner", config.owner)
        .add_attribute("asset", config.asset)
        .add_attribute("gateway", config.gateway)
        .add_attribute("escrow_denom", config.escrow_denom))
}

// ============================================================================
// Execute
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        // Escrow
        ExecuteMsg::DepositEscrow { instance } => execute_deposit_escrow(deps, info, instance),
        ExecuteMsg::WithdrawEscrow {
            destination,
            amount,
        } => execute_withdraw_escrow(deps, info, destination, amount),
        ExecuteMsg::PullEscrow { instance, amount } => {
            execute_pull_escrow(deps, info, instance, amount)
        }

        // Migration
        ExecuteMsg::Migrate {
            amount,
            beneficiary,
            gas,
        } => execute_migrate(deps, env, info, amount, beneficiary, gas),
        ExecuteMsg::SetSisterAddressManually { address } => {
            execute_set_sister_address_manually(deps, env, info, address)
        }

        // Admin
        ExecuteMsg::SetSisterManager {
            manager,
            sister_manager,
            template_checksum,
        } => execute_set_sister_manager(deps, info, manager, sister_manager, template_checksum),
        ExecuteMsg::SetSisterOwner {
            owner,
            sister_owner,
        } => execute_set_sister_owner(deps, info, owner, sister_owner),
        ExecuteMsg::SetProtocol { protocol } => execute_set_protocol(deps, info, protocol),
        ExecuteMsg::TransferOwnership { owner } => execute_transfer_ownership(deps, info, owner),
    }
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::Escrow { instance } => to_json_binary(&query_escrow(deps, instance)?),
        QueryMsg::MigratedTarget { instance } => {
            to_json_binary(&query_migrated_target(deps, instance)?)
        }
        QueryMsg::SisterManager { manager } => {
            to_json_binary(&query_sister_manager(deps, manager)?)
        }
        QueryMsg::SisterOwner { owner } => to_json_binary(&query_sister_owner(deps, owner)?),
    }
}

// ============================================================================
// Migrate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("method", "migrate")
        .add_attribute("version", CONTRACT_VERSION))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmwasm_std::testing::{mock_dependencies, mock_env, mock_info};
    use cosmwasm_std::{coins, Uint128};

    use crate::msg::EscrowResponse;

    fn init(deps: DepsMut) {
        let msg = InstantiateMsg {
            owner: "owner".to_string(),
            asset: "asset".to_string(),
            gateway: "gateway".to_string(),
            escrow_denom: "uluna".to_string(),
            protocol: Some("protocol".to_string()),
        };
        instantiate(deps, mock_env(), mock_info("owner", &[]), msg).unwrap();
    }

    fn escrow(deps: Deps, instance: &str) -> Uint128 {
        let res: EscrowResponse = cosmwasm_std::from_json(
            query(
                deps,
                mock_env(),
                QueryMsg::Escrow {
                    instance: instance.to_string(),
                },
            )
            .unwrap(),
        )
        .unwrap();
        res.amount
    }

    #[test]
    fn test_deposit_escrow_requires_single_escrow_coin() {
        let mut deps = mock_dependencies();
        init(deps.as_mut());

        let deposit = ExecuteMsg::DepositEscrow {
            instance: "instance".to_string(),
        };
        let err = execute(
            deps.as_mut(),
            mock_env(),
            mock_info("sponsor", &coins(100, "uusd")),
            deposit.clone(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            ContractError::InvalidEscrowFunds {
                denom: "uluna".to_string()
            }
        );
        let err = execute(
            deps.as_mut(),
            mock_env(),
            mock_info("sponsor", &[]),
            deposit.clone(),
        )
        .unwrap_err();
        assert!(matches!(err, ContractError::InvalidEscrowFunds { .. }));

        execute(
            deps.as_mut(),
            mock_env(),
            mock_info("sponsor", &coins(100, "uluna")),
            deposit.clone(),
        )
        .unwrap();
        execute(
            deps.as_mut(),
            mock_env(),
            mock_info("other_sponsor", &coins(50, "uluna")),
            deposit,
        )
        .unwrap();
        assert_eq!(escrow(deps.as_ref(), "instance"), Uint128::new(150));
    }

    #[test]
    fn test_withdraw_and_pull_escrow() {
        let mut deps = mock_dependencies();
        init(deps.as_mut());
        execute(
            deps.as_mut(),
            mock_env(),
            mock_info("sponsor", &coins(100, "uluna")),
            ExecuteMsg::DepositEscrow {
                instance: "instance".to_string(),
            },
        )
        .unwrap();

        let err = execute(
            deps.as_mut(),
            mock_env(),
            mock_info("instance", &[]),
            ExecuteMsg::WithdrawEscrow {
                destination: "instance".to_string(),
                amount: Uint128::new(10),
            },
        )
        .unwrap_err();
        assert_eq!(err, ContractError::InvalidEscrowDestination);

        let err = execute(
            deps.as_mut(),
            mock_env(),
            mock_info("instance", &[]),
            ExecuteMsg::WithdrawEscrow {
                destination: "beneficiary".to_string(),
                amount: Uint128::new(101),
            },
        )
        .unwrap_err();
        assert_eq!(
            err,
            ContractError::InsufficientEscrow {
                required: Uint128::new(101),
                available: Uint128::new(100),
            }
        );

        let res = execute(
            deps.as_mut(),
            mock_env(),
            mock_info("instance", &[]),
            ExecuteMsg::WithdrawEscrow {
                destination: "beneficiary".to_string(),
                amount: Uint128::new(30),
            },
        )
        .unwrap();
        assert_eq!(res.messages.len(), 1);
        assert_eq!(escrow(deps.as_ref(), "instance"), Uint128::new(70));

        let err = execute(
            deps.as_mut(),
            mock_env(),
            mock_info("sponsor", &[]),
            ExecuteMsg::PullEscrow {
                instance: "instance".to_string(),
                amount: Uint128::new(20),
            },
        )
        .unwrap_err();
        assert_eq!(err, ContractError::UnauthorizedProtocol);

        execute(
            deps.as_mut(),
            mock_env(),
            mock_info("protocol", &[]),
            ExecuteMsg::PullEscrow {
                instance: "instance".to_string(),
                amount: Uint128::new(20),
            },
        )
        .unwrap();
        assert_eq!(escrow(deps.as_ref(), "instance"), Uint128::new(50));
    }
}
