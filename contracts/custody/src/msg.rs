//! Message types for the custody instance contract

use common::schedule::Schedule;
use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary, Uint128};

/// Migrate message
#[cw_serde]
pub struct MigrateMsg {}

/// Initializer payload, executed by the registry at deployment
#[cw_serde]
pub struct InstantiateMsg {
    pub owner: String,
    pub beneficiary: String,
    /// Registry that authorizes forwarded calls
    pub manager: String,
    /// CW20 asset under custody
    pub asset: String,
    pub schedule: Schedule,
    /// Set when the instance mirrors a migrated source-chain instance
    pub sister: Option<SisterOrigin>,
}

/// Ledger carried over from the source-chain instance
#[cw_serde]
pub struct SisterOrigin {
    pub source: String,
    pub released_amount: Uint128,
    pub used_amount: Uint128,
}

#[cw_serde]
pub enum ExecuteMsg {
    // ========================================================================
    // Beneficiary
    // ========================================================================
    /// Accept the lock. Idempotent.
    AcceptLock {},

    /// Hand the beneficiary role to another address
    ChangeBeneficiary { beneficiary: String },

    /// Release everything currently releasable to the beneficiary
    Release {},

    /// Withdraw funds held above the outstanding amount
    WithdrawSurplus { amount: Uint128 },

    /// Grant unlimited asset allowance to every registry token destination
    ApproveProtocol {},

    /// Clear the allowances granted by `ApproveProtocol`
    RevokeProtocol {},

    /// Relay `msg` (with attached funds) to the target the registry has
    /// authorized for `signature`. `signature` must be the top-level variant
    /// of `msg`.
    Forward { signature: String, msg: Binary },

    // ========================================================================
    // Owner
    // ========================================================================
    /// Return the whole balance to the owner; only before acceptance
    CancelLock {},

    /// Return unvested funds to the owner and freeze vesting
    Revoke {},

    SetManager { manager: String },

    TransferOwnership { owner: String },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(InfoResponse)]
    Info {},

    /// Schedule and ledger figures at the current block time
    #[returns(VestingResponse)]
    Vesting {},

    #[returns(AmountResponse)]
    Releasable {},

    #[returns(AmountResponse)]
    Surplus {},
}

#[cw_serde]
pub struct InfoResponse {
    pub owner: Addr,
    pub beneficiary: Addr,
    pub manager: Addr,
    pub asset: Addr,
    pub schedule: Schedule,
    pub released_amount: Uint128,
    pub used_amount: Uint128,
    pub is_accepted: bool,
    pub is_revoked: bool,
    pub sister_source: Option<String>,
}

#[cw_serde]
pub struct VestingResponse {
    pub current_time: u64,
    pub current_balance: Uint128,
    pub current_period: u64,
    pub passed_periods: u64,
    pub period_duration: u64,
    pub amount_per_period: Uint128,
    pub available_amount: Uint128,
    pub vested_amount: Uint128,
    pub releasable_amount: Uint128,
    pub total_outstanding: Uint128,
    pub surplus: Uint128,
}

#[cw_serde]
pub struct AmountResponse {
    pub amount: Uint128,
}
