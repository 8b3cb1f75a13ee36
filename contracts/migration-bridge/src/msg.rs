//! Message types for the migration bridge contract

use common::GasParams;
use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, HexBinary, Uint128};

use crate::state::{MigratedTarget, SisterManager};

/// Migrate message
#[cw_serde]
pub struct MigrateMsg {}

#[cw_serde]
pub struct InstantiateMsg {
    pub owner: String,
    /// CW20 asset instances hold
    pub asset: String,
    pub gateway: String,
    /// Native denom the gas escrow is kept in
    pub escrow_denom: String,
    pub protocol: Option<String>,
}

#[cw_serde]
pub enum ExecuteMsg {
    // ========================================================================
    // Escrow
    // ========================================================================
    /// Credit `instance` with the attached escrow coin. Anyone may sponsor.
    DepositEscrow { instance: String },

    /// Called by the instance: send part of its escrow elsewhere
    WithdrawEscrow { destination: String, amount: Uint128 },

    /// Called by the protocol contract: reclaim sponsored escrow
    PullEscrow { instance: String, amount: Uint128 },

    // ========================================================================
    // Migration (called by the instance through `Forward`)
    // ========================================================================
    /// Move `amount` of the instance balance to its sister instance.
    ///
    /// The first call fixes the sister address and beneficiary; later calls
    /// must name the same beneficiary. Success means the transfer was handed
    /// to the gateway, not that the sister chain processed it.
    Migrate {
        amount: Uint128,
        beneficiary: String,
        gas: GasParams,
    },

    /// Declare the sister address of a fully vested, never migrated
    /// instance. Disables `Migrate` for that instance.
    SetSisterAddressManually { address: String },

    // ========================================================================
    // Admin
    // ========================================================================
    SetSisterManager {
        manager: String,
        sister_manager: String,
        template_checksum: HexBinary,
    },

    SetSisterOwner { owner: String, sister_owner: String },

    SetProtocol { protocol: Option<String> },

    TransferOwnership { owner: String },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},

    #[returns(EscrowResponse)]
    Escrow { instance: String },

    #[returns(MigratedTargetResponse)]
    MigratedTarget { instance: String },

    #[returns(SisterManagerResponse)]
    SisterManager { manager: String },

    #[returns(SisterOwnerResponse)]
    SisterOwner { owner: String },
}

// ============================================================================
// Responses
// ============================================================================

#[cw_serde]
pub struct ConfigResponse {
    pub owner: Addr,
    pub asset: Addr,
    pub gateway: Addr,
    pub escrow_denom: String,
    pub protocol: Option<Addr>,
}

#[cw_serde]
pub struct EscrowResponse {
    pub instance: Addr,
    pub amount: Uint128,
    pub denom: String,
}

#[cw_serde]
pub struct MigratedTargetResponse {
    pub instance: Addr,
    pub target: Option<MigratedTarget>,
}

#[cw_serde]
pub struct SisterManagerResponse {
    pub manager: Addr,
    pub sister_manager: Option<SisterManager>,
}

#[cw_serde]
pub struct SisterOwnerResponse {
    pub owner: Addr,
    pub sister_owner: Option<Addr>,
}

/// Result data of `Migrate`
#[cw_serde]
pub struct MigrateResponse {
    pub sister: Addr,
}
