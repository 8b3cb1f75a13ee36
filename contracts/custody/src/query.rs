//! Query handlers for the custody instance contract.

use common::schedule::{surplus, total_outstanding};
use cosmwasm_std::{Deps, Env, StdResult};

use crate::msg::{AmountResponse, InfoResponse, VestingResponse};
use crate::state::{asset_balance, CONFIG, LEDGER};

pub fn query_info(deps: Deps) -> StdResult<InfoResponse> {
    let config = CONFIG.load(deps.storage)?;
    let ledger = LEDGER.load(deps.storage)?;
    Ok(InfoResponse {
        owner: config.owner,
        beneficiary: config.beneficiary,
        manager: config.manager,
        asset: config.asset,
        schedule: config.schedule,
        released_amount: ledger.released_amount,
        used_amount: ledger.used_amount,
        is_accepted: ledger.is_accepted,
        is_revoked: ledger.is_revoked,
        sister_source: config.sister_source,
    })
}

/// All schedule figures at the current block time.
pub fn query_vesting(deps: Deps, env: Env) -> StdResult<VestingResponse> {
    let config = CONFIG.load(deps.storage)?;
    let ledger = LEDGER.load(deps.storage)?;
    let now = env.block.time.seconds();
    let schedule = &config.schedule;

    let current_balance = asset_balance(&deps.querier, &config.asset, &env.contract.address)?;
    let outstanding = total_outstanding(schedule.managed_amount, ledger.released_amount)?;

    Ok(VestingResponse {
        current_time: now,
        current_balance,
        current_period: schedule.current_period(now),
        passed_periods: schedule.passed_periods(now),
        period_duration: schedule.period_duration(),
        amount_per_period: schedule.amount_per_period(),
        available_amount: schedule.available_amount(now),
        vested_amount: ledger.vested_amount(schedule, now),
        releasable_amount: ledger.releasable_amount(schedule, now, current_balance)?,
        total_outstanding: outstanding,
        surplus: surplus(current_balance, outstanding),
    })
}

pub fn query_releasable(deps: Deps, env: Env) -> StdResult<AmountResponse> {
    let config = CONFIG.load(deps.storage)?;
    let ledger = LEDGER.load(deps.storage)?;
    let balance = asset_balance(&deps.querier, &config.asset, &env.contract.address)?;
    Ok(AmountResponse {
        amount: ledger.releasable_amount(&config.schedule, env.block.time.seconds(), balance)?,
    })
}

pub fn query_surplus(deps: Deps, env: Env) -> StdResult<AmountResponse> {
    let config = CONFIG.load(deps.storage)?;
    let ledger = LEDGER.load(deps.storage)?;
    let balance = asset_balance(&deps.querier, &config.asset, &env.contract.address)?;
    let outstanding = total_outstanding(config.schedule.managed_amount, ledger.released_amount)?;
    Ok(AmountResponse {
        amount: surplus(balance, outstanding),
    })
}
