//! State definitions for the custody instance contract

use common::schedule::{Revocability, Schedule};
use cosmwasm_schema::cw_serde;
use cosmwasm_std::{to_json_binary, Addr, CosmosMsg, QuerierWrapper, StdResult, Uint128, WasmMsg};
use cw20::{BalanceResponse, Cw20ExecuteMsg, Cw20QueryMsg};
use cw_storage_plus::Item;

/// Identities and immutable schedule
#[cw_serde]
pub struct Config {
    /// May revoke, cancel before acceptance and reassign the manager
    pub owner: Addr,
    /// Receives releases and drives forwarded calls
    pub beneficiary: Addr,
    /// Registry queried for authorizations and token destinations
    pub manager: Addr,
    /// The single CW20 asset under custody
    pub asset: Addr,
    pub schedule: Schedule,
    /// Source-chain instance when this one was created by a migration
    pub sister_source: Option<String>,
}

/// Mutable accounting and lifecycle flags
#[cw_serde]
pub struct Ledger {
    /// Paid out to the beneficiary; never decreases
    pub released_amount: Uint128,
    /// Moved into authorized protocol contracts and not yet returned
    pub used_amount: Uint128,
    pub is_accepted: bool,
    pub is_revoked: bool,
    /// Vested amount frozen at revocation
    pub vested_at_revoke: Option<Uint128>,
}

impl Ledger {
    pub fn vested_amount(&self, schedule: &Schedule, now: u64) -> Uint128 {
        match self.vested_at_revoke {
            Some(frozen) => frozen,
            None => schedule.vested_amount(now),
        }
    }

    pub fn releasable_amount(
        &self,
        schedule: &Schedule,
        now: u64,
        current_balance: Uint128,
    ) -> StdResult<Uint128> {
        let mut releasable =
            schedule.releasable_amount(now, self.released_amount, current_balance)?;
        if let Some(frozen) = self.vested_at_revoke {
            releasable = releasable.min(frozen.checked_sub(self.released_amount)?);
        }
        // Funds held by protocols count against the vested amount
        if schedule.revocable == Revocability::Enabled {
            let headroom = self
                .vested_amount(schedule, now)
                .saturating_sub(self.released_amount)
                .saturating_sub(self.used_amount);
            releasable = releasable.min(headroom);
        }
        Ok(releasable)
    }
}

/// Snapshot taken before a forwarded call
#[cw_serde]
pub struct PendingForward {
    pub signature: String,
    pub target: Addr,
    pub balance_before: Uint128,
}

// ============================================================================
// Constants
// ============================================================================

/// Contract name for cw2 migration info
pub const CONTRACT_NAME: &str = "crates.io:custody";

/// Contract version for cw2 migration info
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Reply id for forwarded calls
pub const FORWARD_REPLY_ID: u64 = 1;

// ============================================================================
// Storage
// ============================================================================

pub const CONFIG: Item<Config> = Item::new("config");

pub const LEDGER: Item<Ledger> = Item::new("ledger");

pub const PENDING_FORWARD: Item<PendingForward> = Item::new("pending_forward");

// ============================================================================
// Asset helpers
// ============================================================================

pub fn asset_balance(querier: &QuerierWrapper, asset: &Addr, holder: &Addr) -> StdResult<Uint128> {
    let response: BalanceResponse = querier.query_wasm_smart(
        asset,
        &Cw20QueryMsg::Balance {
            address: holder.to_string(),
        },
    )?;
    Ok(response.balance)
}

pub fn transfer_msg(asset: &Addr, recipient: &Addr, amount: Uint128) -> StdResult<CosmosMsg> {
    Ok(CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: asset.to_string(),
        msg: to_json_binary(&Cw20ExecuteMsg::Transfer {
            recipient: recipient.to_string(),
            amount,
        })?,
        funds: vec![],
    }))
}
