//! Integration tests for the custody instance contract using cw-multi-test.
//!
//! A mock registry answers authorization queries and a mock protocol
//! contract stands in for any authorized target.

use common::schedule::{Revocability, Schedule};
use cosmwasm_std::{to_json_binary, Addr, Binary, Empty, Uint128};
use cw20::{AllowanceResponse, BalanceResponse, Cw20Coin, Cw20ExecuteMsg, Cw20QueryMsg};
use cw_multi_test::{App, AppResponse, ContractWrapper, Executor};

use custody::msg::{AmountResponse, ExecuteMsg, InfoResponse, InstantiateMsg, QueryMsg, VestingResponse};
use custody::ContractError;

const MANAGED: u128 = 1_200_000;
const PERIODS: u64 = 12;
const PERIOD: u64 = 2_592_000;

// ============================================================================
// Mock registry
// ============================================================================

mod mock_manager {
    use common::manager::{
        AuthorizedTargetResponse, IsInstanceResponse, ManagerQueryMsg, TokenDestinationsResponse,
    };
    use cosmwasm_schema::cw_serde;
    use cosmwasm_std::{
        to_json_binary, Addr, Binary, Deps, DepsMut, Empty, Env, MessageInfo, Response, StdResult,
    };
    use cw_storage_plus::{Item, Map};

    const DESTINATIONS: Item<Vec<Addr>> = Item::new("destinations");
    const CALLS: Map<&str, Addr> = Map::new("calls");

    #[cw_serde]
    pub struct InstantiateMsg {
        pub destinations: Vec<String>,
        pub calls: Vec<(String, String)>,
    }

    pub fn instantiate(
        deps: DepsMut,
        _env: Env,
        _info: MessageInfo,
        msg: InstantiateMsg,
    ) -> StdResult<Response> {
        let destinations = msg.destinations.into_iter().map(Addr::unchecked).collect();
        DESTINATIONS.save(deps.storage, &destinations)?;
        for (signature, target) in msg.calls {
            CALLS.save(deps.storage, &signature, &Addr::unchecked(target))?;
        }
        Ok(Response::new())
    }

    pub fn execute(_deps: DepsMut, _env: Env, _info: MessageInfo, _msg: Empty) -> StdResult<Response> {
        Ok(Response::new())
    }

    pub fn query(deps: Deps, _env: Env, msg: ManagerQueryMsg) -> StdResult<Binary> {
        match msg {
            ManagerQueryMsg::AuthorizedTarget { signature } => {
                let target = CALLS.may_load(deps.storage, &signature)?;
                to_json_binary(&AuthorizedTargetResponse { signature, target })
            }
            ManagerQueryMsg::TokenDestinations {} => to_json_binary(&TokenDestinationsResponse {
                destinations: DESTINATIONS.load(deps.storage)?,
            }),
            ManagerQueryMsg::IsInstance { .. } => {
                to_json_binary(&IsInstanceResponse { is_instance: false })
            }
        }
    }
}

// ============================================================================
// Mock protocol target
// ============================================================================

mod mock_protocol {
    use cosmwasm_schema::cw_serde;
    use cosmwasm_std::{
        to_json_binary, Addr, Binary, Deps, DepsMut, Empty, Env, MessageInfo, Response, StdError,
        StdResult, Uint128, WasmMsg,
    };
    use cw20::Cw20ExecuteMsg;
    use cw_storage_plus::Item;

    const ASSET: Item<Addr> = Item::new("asset");

    #[cw_serde]
    pub struct InstantiateMsg {
        pub asset: String,
    }

    #[cw_serde]
    pub enum ExecuteMsg {
        Stake { amount: Uint128 },
        Unstake { amount: Uint128 },
        Refuse {},
    }

    pub fn instantiate(
        deps: DepsMut,
        _env: Env,
        _info: MessageInfo,
        msg: InstantiateMsg,
    ) -> StdResult<Response> {
        ASSET.save(deps.storage, &Addr::unchecked(msg.asset))?;
        Ok(Response::new())
    }

    pub fn execute(deps: DepsMut, env: Env, info: MessageInfo, msg: ExecuteMsg) -> StdResult<Response> {
        let asset = ASSET.load(deps.storage)?;
        match msg {
            ExecuteMsg::Stake { amount } => Ok(Response::new()
                .add_message(WasmMsg::Execute {
                    contract_addr: asset.to_string(),
                    msg: to_json_binary(&Cw20ExecuteMsg::TransferFrom {
                        owner: info.sender.to_string(),
                        recipient: env.contract.address.to_string(),
                        amount,
                    })?,
                    funds: vec![],
                })
                .set_data(Binary::from(b"staked".to_vec()))),
            ExecuteMsg::Unstake { amount } => Ok(Response::new().add_message(WasmMsg::Execute {
                contract_addr: asset.to_string(),
                msg: to_json_binary(&Cw20ExecuteMsg::Transfer {
                    recipient: info.sender.to_string(),
                    amount,
                })?,
                funds: vec![],
            })),
            ExecuteMsg::Refuse {} => Err(StdError::generic_err("target refused the call")),
        }
    }

    pub fn query(_deps: Deps, _env: Env, _msg: Empty) -> StdResult<Binary> {
        to_json_binary(&Empty {})
    }
}

// ============================================================================
// Test Setup
// ============================================================================

fn contract_custody() -> Box<dyn cw_multi_test::Contract<Empty>> {
    let contract = ContractWrapper::new(
        custody::contract::execute,
        custody::contract::instantiate,
        custody::contract::query,
    )
    .with_reply(custody::contract::reply);
    Box::new(contract)
}

fn contract_cw20() -> Box<dyn cw_multi_test::Contract<Empty>> {
    let contract = ContractWrapper::new(
        cw20_base::contract::execute,
        cw20_base::contract::instantiate,
        cw20_base::contract::query,
    );
    Box::new(contract)
}

fn contract_manager() -> Box<dyn cw_multi_test::Contract<Empty>> {
    Box::new(ContractWrapper::new(
        mock_manager::execute,
        mock_manager::instantiate,
        mock_manager::query,
    ))
}

fn contract_protocol() -> Box<dyn cw_multi_test::Contract<Empty>> {
    Box::new(ContractWrapper::new(
        mock_protocol::execute,
        mock_protocol::instantiate,
        mock_protocol::query,
    ))
}

#[allow(dead_code)]
struct TestEnv {
    app: App,
    custody: Addr,
    token: Addr,
    protocol: Addr,
    owner: Addr,
    beneficiary: Addr,
    start: u64,
}

fn setup(revocable: Revocability) -> TestEnv {
    let mut app = App::default();
    let owner = Addr::unchecked("terra1owner");
    let beneficiary = Addr::unchecked("terra1beneficiary");

    let cw20_code = app.store_code(contract_cw20());
    let custody_code = app.store_code(contract_custody());
    let manager_code = app.store_code(contract_manager());
    let protocol_code = app.store_code(contract_protocol());

    let token = app
        .instantiate_contract(
            cw20_code,
            owner.clone(),
            &cw20_base::msg::InstantiateMsg {
                name: "Custody Token".to_string(),
                symbol: "CUST".to_string(),
                decimals: 6,
                initial_balances: vec![Cw20Coin {
                    address: owner.to_string(),
                    amount: Uint128::new(10 * MANAGED),
                }],
                mint: None,
                marketing: None,
            },
            &[],
            "token",
            None,
        )
        .unwrap();

    let protocol = app
        .instantiate_contract(
            protocol_code,
            owner.clone(),
            &mock_protocol::InstantiateMsg {
                asset: token.to_string(),
            },
            &[],
            "protocol",
            None,
        )
        .unwrap();

    let manager = app
        .instantiate_contract(
            manager_code,
            owner.clone(),
            &mock_manager::InstantiateMsg {
                destinations: vec![protocol.to_string()],
                calls: vec![
                    ("stake".to_string(), protocol.to_string()),
                    ("unstake".to_string(), protocol.to_string()),
                    ("refuse".to_string(), protocol.to_string()),
                ],
            },
            &[],
            "manager",
            None,
        )
        .unwrap();

    let start = app.block_info().time.seconds() + 100;
    let custody = app
        .instantiate_contract(
            custody_code,
            manager.clone(),
            &InstantiateMsg {
                owner: owner.to_string(),
                beneficiary: beneficiary.to_string(),
                manager: manager.to_string(),
                asset: token.to_string(),
                schedule: Schedule {
                    managed_amount: Uint128::new(MANAGED),
                    start_time: start,
                    end_time: start + PERIODS * PERIOD,
                    periods: PERIODS,
                    release_start_time: 0,
                    vesting_cliff_time: 0,
                    revocable,
                },
                sister: None,
            },
            &[],
            "custody",
            None,
        )
        .unwrap();

    app.execute_contract(
        owner.clone(),
        token.clone(),
        &Cw20ExecuteMsg::Transfer {
            recipient: custody.to_string(),
            amount: Uint128::new(MANAGED),
        },
        &[],
    )
    .unwrap();

    TestEnv {
        app,
        custody,
        token,
        protocol,
        owner,
        beneficiary,
        start,
    }
}

fn balance(app: &App, token: &Addr, holder: &Addr) -> Uint128 {
    let res: BalanceResponse = app
        .wrap()
        .query_wasm_smart(
            token,
            &Cw20QueryMsg::Balance {
                address: holder.to_string(),
            },
        )
        .unwrap();
    res.balance
}

fn info(app: &App, custody: &Addr) -> InfoResponse {
    app.wrap()
        .query_wasm_smart(custody, &QueryMsg::Info {})
        .unwrap()
}

fn vesting(app: &App, custody: &Addr) -> VestingResponse {
    app.wrap()
        .query_wasm_smart(custody, &QueryMsg::Vesting {})
        .unwrap()
}

fn set_time(app: &mut App, seconds: u64) {
    app.update_block(|block| {
        block.time = cosmwasm_std::Timestamp::from_seconds(seconds);
    });
}

fn per_period() -> Uint128 {
    Uint128::new(MANAGED / PERIODS as u128)
}

fn forward(env: &mut TestEnv, msg: &mock_protocol::ExecuteMsg) -> Result<AppResponse, String> {
    let msg = to_json_binary(msg).unwrap();
    let signature = common::dispatch::call_signature(&msg).unwrap();
    env.app
        .execute_contract(
            env.beneficiary.clone(),
            env.custody.clone(),
            &ExecuteMsg::Forward { signature, msg },
            &[],
        )
        .map_err(|e| e.root_cause().to_string())
}

// ============================================================================
// Release Tests
// ============================================================================

#[test]
fn test_release_follows_schedule() {
    let mut env = setup(Revocability::Disabled);

    let res = env.app.execute_contract(
        env.beneficiary.clone(),
        env.custody.clone(),
        &ExecuteMsg::Release {},
        &[],
    );
    let err_str = res.unwrap_err().root_cause().to_string();
    assert_eq!(err_str, ContractError::NoAvailableTokens.to_string());

    set_time(&mut env.app, env.start + 3 * PERIOD);
    env.app
        .execute_contract(
            env.beneficiary.clone(),
            env.custody.clone(),
            &ExecuteMsg::Release {},
            &[],
        )
        .unwrap();
    assert_eq!(
        balance(&env.app, &env.token, &env.beneficiary),
        per_period() * Uint128::new(3)
    );

    // Nothing new unlocked within the same period
    set_time(&mut env.app, env.start + 4 * PERIOD - 1);
    let res = env.app.execute_contract(
        env.beneficiary.clone(),
        env.custody.clone(),
        &ExecuteMsg::Release {},
        &[],
    );
    assert!(res.is_err());

    // Released amount only grows and ends at the managed amount
    let mut last_released = info(&env.app, &env.custody).released_amount;
    for step in 4..=PERIODS {
        set_time(&mut env.app, env.start + step * PERIOD + 1);
        env.app
            .execute_contract(
                env.beneficiary.clone(),
                env.custody.clone(),
                &ExecuteMsg::Release {},
                &[],
            )
            .unwrap();
        let released = info(&env.app, &env.custody).released_amount;
        assert!(released > last_released);
        assert!(released <= Uint128::new(MANAGED));
        last_released = released;
    }
    assert_eq!(last_released, Uint128::new(MANAGED));
    assert_eq!(
        balance(&env.app, &env.token, &env.beneficiary),
        Uint128::new(MANAGED)
    );
}

#[test]
fn test_only_beneficiary_releases() {
    let mut env = setup(Revocability::Disabled);
    set_time(&mut env.app, env.start + 2 * PERIOD);

    let res = env.app.execute_contract(
        env.owner.clone(),
        env.custody.clone(),
        &ExecuteMsg::Release {},
        &[],
    );
    let err_str = res.unwrap_err().root_cause().to_string();
    assert_eq!(err_str, ContractError::UnauthorizedBeneficiary.to_string());
}

#[test]
fn test_vesting_query_reports_schedule() {
    let mut env = setup(Revocability::Enabled);
    set_time(&mut env.app, env.start + 5 * PERIOD + 10);

    let v = vesting(&env.app, &env.custody);
    assert_eq!(v.current_period, 6);
    assert_eq!(v.passed_periods, 5);
    assert_eq!(v.period_duration, PERIOD);
    assert_eq!(v.amount_per_period, per_period());
    assert_eq!(v.available_amount, per_period() * Uint128::new(5));
    assert_eq!(v.vested_amount, per_period() * Uint128::new(5));
    assert_eq!(v.releasable_amount, per_period() * Uint128::new(5));
    assert_eq!(v.total_outstanding, Uint128::new(MANAGED));
    assert_eq!(v.surplus, Uint128::zero());
}

// ============================================================================
// Acceptance & Cancellation Tests
// ============================================================================

#[test]
fn test_accept_is_idempotent_and_blocks_cancel() {
    let mut env = setup(Revocability::Disabled);

    for _ in 0..2 {
        env.app
            .execute_contract(
                env.beneficiary.clone(),
                env.custody.clone(),
                &ExecuteMsg::AcceptLock {},
                &[],
            )
            .unwrap();
    }
    assert!(info(&env.app, &env.custody).is_accepted);

    let res = env.app.execute_contract(
        env.owner.clone(),
        env.custody.clone(),
        &ExecuteMsg::CancelLock {},
        &[],
    );
    let err_str = res.unwrap_err().root_cause().to_string();
    assert_eq!(err_str, ContractError::CannotCancelAccepted.to_string());
}

#[test]
fn test_cancel_before_accept_returns_balance() {
    let mut env = setup(Revocability::Disabled);
    let owner_before = balance(&env.app, &env.token, &env.owner);

    env.app
        .execute_contract(
            env.owner.clone(),
            env.custody.clone(),
            &ExecuteMsg::CancelLock {},
            &[],
        )
        .unwrap();

    assert_eq!(balance(&env.app, &env.token, &env.custody), Uint128::zero());
    assert_eq!(
        balance(&env.app, &env.token, &env.owner),
        owner_before + Uint128::new(MANAGED)
    );
}

// ============================================================================
// Revocation Tests
// ============================================================================

#[test]
fn test_revoke_returns_unvested_and_freezes_vesting() {
    let mut env = setup(Revocability::Enabled);
    let owner_before = balance(&env.app, &env.token, &env.owner);

    set_time(&mut env.app, env.start + 2 * PERIOD);
    env.app
        .execute_contract(
            env.owner.clone(),
            env.custody.clone(),
            &ExecuteMsg::Revoke {},
            &[],
        )
        .unwrap();

    let vested = per_period() * Uint128::new(2);
    assert_eq!(
        balance(&env.app, &env.token, &env.owner),
        owner_before + Uint128::new(MANAGED) - vested
    );
    assert!(info(&env.app, &env.custody).is_revoked);

    let res = env.app.execute_contract(
        env.owner.clone(),
        env.custody.clone(),
        &ExecuteMsg::Revoke {},
        &[],
    );
    let err_str = res.unwrap_err().root_cause().to_string();
    assert_eq!(err_str, ContractError::AlreadyRevoked.to_string());

    // Vesting stays frozen while the step schedule keeps moving
    set_time(&mut env.app, env.start + 8 * PERIOD);
    let v = vesting(&env.app, &env.custody);
    assert_eq!(v.vested_amount, vested);
    assert_eq!(v.available_amount, per_period() * Uint128::new(8));
    assert_eq!(v.releasable_amount, vested);

    // Already vested funds remain releasable after revocation
    env.app
        .execute_contract(
            env.beneficiary.clone(),
            env.custody.clone(),
            &ExecuteMsg::Release {},
            &[],
        )
        .unwrap();
    assert_eq!(balance(&env.app, &env.token, &env.beneficiary), vested);
    assert_eq!(balance(&env.app, &env.token, &env.custody), Uint128::zero());

    set_time(&mut env.app, env.start + 20 * PERIOD);
    let res = env.app.execute_contract(
        env.beneficiary.clone(),
        env.custody.clone(),
        &ExecuteMsg::Release {},
        &[],
    );
    assert!(res.is_err());
}

#[test]
fn test_revoke_requires_enabled_revocability() {
    for revocable in [Revocability::Disabled, Revocability::NotSet] {
        let mut env = setup(revocable);
        set_time(&mut env.app, env.start + PERIOD);
        let res = env.app.execute_contract(
            env.owner.clone(),
            env.custody.clone(),
            &ExecuteMsg::Revoke {},
            &[],
        );
        let err_str = res.unwrap_err().root_cause().to_string();
        assert_eq!(err_str, ContractError::NotRevocable.to_string());
    }
}

#[test]
fn test_revoke_only_owner() {
    let mut env = setup(Revocability::Enabled);
    let res = env.app.execute_contract(
        env.beneficiary.clone(),
        env.custody.clone(),
        &ExecuteMsg::Revoke {},
        &[],
    );
    let err_str = res.unwrap_err().root_cause().to_string();
    assert_eq!(err_str, ContractError::Unauthorized.to_string());
}

// ============================================================================
// Surplus Tests
// ============================================================================

#[test]
fn test_withdraw_surplus() {
    let mut env = setup(Revocability::Disabled);
    env.app
        .execute_contract(
            env.owner.clone(),
            env.token.clone(),
            &Cw20ExecuteMsg::Transfer {
                recipient: env.custody.to_string(),
                amount: Uint128::new(500),
            },
            &[],
        )
        .unwrap();

    let surplus: AmountResponse = env
        .app
        .wrap()
        .query_wasm_smart(&env.custody, &QueryMsg::Surplus {})
        .unwrap();
    assert_eq!(surplus.amount, Uint128::new(500));

    let res = env.app.execute_contract(
        env.beneficiary.clone(),
        env.custody.clone(),
        &ExecuteMsg::WithdrawSurplus {
            amount: Uint128::new(501),
        },
        &[],
    );
    let err_str = res.unwrap_err().root_cause().to_string();
    assert_eq!(
        err_str,
        ContractError::AmountExceedsSurplus {
            requested: Uint128::new(501),
            surplus: Uint128::new(500),
        }
        .to_string()
    );

    env.app
        .execute_contract(
            env.beneficiary.clone(),
            env.custody.clone(),
            &ExecuteMsg::WithdrawSurplus {
                amount: Uint128::new(500),
            },
            &[],
        )
        .unwrap();
    assert_eq!(
        balance(&env.app, &env.token, &env.beneficiary),
        Uint128::new(500)
    );
    assert_eq!(
        balance(&env.app, &env.token, &env.custody),
        Uint128::new(MANAGED)
    );
}

// ============================================================================
// Role Tests
// ============================================================================

#[test]
fn test_change_beneficiary() {
    let mut env = setup(Revocability::Disabled);

    let res = env.app.execute_contract(
        env.beneficiary.clone(),
        env.custody.clone(),
        &ExecuteMsg::ChangeBeneficiary {
            beneficiary: String::new(),
        },
        &[],
    );
    let err_str = res.unwrap_err().root_cause().to_string();
    assert_eq!(
        err_str,
        ContractError::EmptyAddress {
            field: "beneficiary".to_string()
        }
        .to_string()
    );

    let successor = Addr::unchecked("terra1successor");
    env.app
        .execute_contract(
            env.beneficiary.clone(),
            env.custody.clone(),
            &ExecuteMsg::ChangeBeneficiary {
                beneficiary: successor.to_string(),
            },
            &[],
        )
        .unwrap();
    assert_eq!(info(&env.app, &env.custody).beneficiary, successor);

    set_time(&mut env.app, env.start + PERIOD);
    let res = env.app.execute_contract(
        env.beneficiary.clone(),
        env.custody.clone(),
        &ExecuteMsg::Release {},
        &[],
    );
    assert!(res.is_err());
    env.app
        .execute_contract(successor.clone(), env.custody.clone(), &ExecuteMsg::Release {}, &[])
        .unwrap();
    assert_eq!(balance(&env.app, &env.token, &successor), per_period());
}

// ============================================================================
// Protocol Access & Forwarding Tests
// ============================================================================

fn approve_protocol(env: &mut TestEnv) {
    env.app
        .execute_contract(
            env.beneficiary.clone(),
            env.custody.clone(),
            &ExecuteMsg::ApproveProtocol {},
            &[],
        )
        .unwrap();
}

fn allowance(env: &TestEnv) -> Uint128 {
    let res: AllowanceResponse = env
        .app
        .wrap()
        .query_wasm_smart(
            &env.token,
            &Cw20QueryMsg::Allowance {
                owner: env.custody.to_string(),
                spender: env.protocol.to_string(),
            },
        )
        .unwrap();
    res.allowance
}

#[test]
fn test_approve_and_revoke_protocol() {
    let mut env = setup(Revocability::Disabled);

    approve_protocol(&mut env);
    assert_eq!(allowance(&env), Uint128::MAX);

    // Approving again keeps the allowance unlimited
    approve_protocol(&mut env);
    assert_eq!(allowance(&env), Uint128::MAX);

    env.app
        .execute_contract(
            env.beneficiary.clone(),
            env.custody.clone(),
            &ExecuteMsg::RevokeProtocol {},
            &[],
        )
        .unwrap();
    assert_eq!(allowance(&env), Uint128::zero());

    let res = forward(
        &mut env,
        &mock_protocol::ExecuteMsg::Stake {
            amount: Uint128::new(10),
        },
    );
    assert!(res.is_err());
}

#[test]
fn test_forward_tracks_used_amount() {
    let mut env = setup(Revocability::Disabled);
    approve_protocol(&mut env);

    let res = forward(
        &mut env,
        &mock_protocol::ExecuteMsg::Stake {
            amount: Uint128::new(400),
        },
    )
    .unwrap();
    assert_eq!(res.data, Some(Binary::from(b"staked".to_vec())));
    assert_eq!(
        balance(&env.app, &env.token, &env.protocol),
        Uint128::new(400)
    );
    assert_eq!(info(&env.app, &env.custody).used_amount, Uint128::new(400));

    forward(
        &mut env,
        &mock_protocol::ExecuteMsg::Unstake {
            amount: Uint128::new(150),
        },
    )
    .unwrap();
    assert_eq!(info(&env.app, &env.custody).used_amount, Uint128::new(250));
}

#[test]
fn test_forward_rejects_unauthorized_calls() {
    let mut env = setup(Revocability::Disabled);

    // Signature not registered
    let res = env.app.execute_contract(
        env.beneficiary.clone(),
        env.custody.clone(),
        &ExecuteMsg::Forward {
            signature: "withdraw".to_string(),
            msg: Binary::from(br#"{"withdraw":{}}"#.to_vec()),
        },
        &[],
    );
    let err_str = res.unwrap_err().root_cause().to_string();
    assert_eq!(
        err_str,
        ContractError::UnauthorizedCall {
            signature: "withdraw".to_string()
        }
        .to_string()
    );

    // Registered signature smuggling a different call
    let res = env.app.execute_contract(
        env.beneficiary.clone(),
        env.custody.clone(),
        &ExecuteMsg::Forward {
            signature: "stake".to_string(),
            msg: to_json_binary(&mock_protocol::ExecuteMsg::Unstake {
                amount: Uint128::new(1),
            })
            .unwrap(),
        },
        &[],
    );
    let err_str = res.unwrap_err().root_cause().to_string();
    assert_eq!(
        err_str,
        ContractError::SignatureMismatch {
            signature: "stake".to_string(),
            actual: "unstake".to_string(),
        }
        .to_string()
    );

    // Only the beneficiary forwards
    let res = env.app.execute_contract(
        env.owner.clone(),
        env.custody.clone(),
        &ExecuteMsg::Forward {
            signature: "refuse".to_string(),
            msg: to_json_binary(&mock_protocol::ExecuteMsg::Refuse {}).unwrap(),
        },
        &[],
    );
    let err_str = res.unwrap_err().root_cause().to_string();
    assert_eq!(err_str, ContractError::UnauthorizedBeneficiary.to_string());
}

#[test]
fn test_forward_propagates_target_failure() {
    let mut env = setup(Revocability::Disabled);
    let res = forward(&mut env, &mock_protocol::ExecuteMsg::Refuse {});
    let err_str = res.unwrap_err();
    assert!(
        err_str.contains("target refused the call"),
        "Expected target error, got: {}",
        err_str
    );
    assert_eq!(info(&env.app, &env.custody).used_amount, Uint128::zero());
}

#[test]
fn test_forward_cannot_use_unvested_funds() {
    let mut env = setup(Revocability::Enabled);
    approve_protocol(&mut env);
    set_time(&mut env.app, env.start + PERIOD);

    let res = forward(
        &mut env,
        &mock_protocol::ExecuteMsg::Stake {
            amount: per_period() + Uint128::new(1),
        },
    );
    let err_str = res.unwrap_err();
    assert_eq!(
        err_str,
        ContractError::UsedExceedsVested {
            used: per_period() + Uint128::new(1),
            released: Uint128::zero(),
            vested: per_period(),
        }
        .to_string()
    );
    assert_eq!(
        balance(&env.app, &env.token, &env.custody),
        Uint128::new(MANAGED)
    );

    forward(
        &mut env,
        &mock_protocol::ExecuteMsg::Stake {
            amount: per_period(),
        },
    )
    .unwrap();
}

#[test]
fn test_revocable_funds_in_protocols_are_not_releasable() {
    let mut env = setup(Revocability::Enabled);
    approve_protocol(&mut env);
    set_time(&mut env.app, env.start + PERIOD);
    let owner_before = balance(&env.app, &env.token, &env.owner);

    // Everything vested goes to the protocol
    forward(
        &mut env,
        &mock_protocol::ExecuteMsg::Stake {
            amount: per_period(),
        },
    )
    .unwrap();
    assert_eq!(vesting(&env.app, &env.custody).releasable_amount, Uint128::zero());

    let res = env.app.execute_contract(
        env.beneficiary.clone(),
        env.custody.clone(),
        &ExecuteMsg::Release {},
        &[],
    );
    let err_str = res.unwrap_err().root_cause().to_string();
    assert_eq!(err_str, ContractError::NoAvailableTokens.to_string());

    // The unvested remainder is still there for the owner
    env.app
        .execute_contract(
            env.owner.clone(),
            env.custody.clone(),
            &ExecuteMsg::Revoke {},
            &[],
        )
        .unwrap();
    assert_eq!(
        balance(&env.app, &env.token, &env.owner),
        owner_before + Uint128::new(MANAGED) - per_period()
    );
    assert_eq!(balance(&env.app, &env.token, &env.custody), Uint128::zero());
    assert_eq!(balance(&env.app, &env.token, &env.beneficiary), Uint128::zero());
}

#[test]
fn test_revocable_released_funds_cannot_be_used_again() {
    let mut env = setup(Revocability::Enabled);
    approve_protocol(&mut env);
    set_time(&mut env.app, env.start + PERIOD);

    env.app
        .execute_contract(
            env.beneficiary.clone(),
            env.custody.clone(),
            &ExecuteMsg::Release {},
            &[],
        )
        .unwrap();
    assert_eq!(balance(&env.app, &env.token, &env.beneficiary), per_period());

    let err_str = forward(
        &mut env,
        &mock_protocol::ExecuteMsg::Stake {
            amount: Uint128::new(1),
        },
    )
    .unwrap_err();
    assert_eq!(
        err_str,
        ContractError::UsedExceedsVested {
            used: Uint128::new(1),
            released: per_period(),
            vested: per_period(),
        }
        .to_string()
    );
    assert_eq!(info(&env.app, &env.custody).used_amount, Uint128::zero());
}
