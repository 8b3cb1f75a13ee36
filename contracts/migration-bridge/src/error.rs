//! Error types for the migration bridge contract

use cosmwasm_std::{OverflowError, StdError, Uint128};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Overflow(#[from] OverflowError),

    // ========================================================================
    // Authorization Errors
    // ========================================================================

    #[error("Unauthorized: only owner can perform this action")]
    Unauthorized,

    #[error("Unauthorized: only the protocol contract can pull escrow")]
    UnauthorizedProtocol,

    #[error("Caller is not a custody instance of a registered registry: {address}")]
    NotCustodyInstance { address: String },

    // ========================================================================
    // Escrow Errors
    // ========================================================================

    #[error("Escrow deposit must be a single non-zero {denom} coin")]
    InvalidEscrowFunds { denom: String },

    #[error("Insufficient escrow: required {required}, available {available}")]
    InsufficientEscrow { required: Uint128, available: Uint128 },

    #[error("Escrow cannot be withdrawn to the instance itself")]
    InvalidEscrowDestination,

    #[error("Amount cannot be zero")]
    ZeroAmount,

    // ========================================================================
    // Migration Errors
    // ========================================================================

    #[error("Instance asset {asset} is not the bridged asset")]
    WrongAsset { asset: String },

    #[error("No sister manager registered for {manager}")]
    SisterManagerNotRegistered { manager: String },

    #[error("No sister owner registered for {owner}")]
    SisterOwnerNotRegistered { owner: String },

    #[error("Lock must be accepted before migration")]
    NotAccepted,

    #[error("Revocable instances cannot migrate")]
    RevocableNotMigratable,

    #[error("Sister address was set manually; migration is disabled")]
    ManuallyPinned,

    #[error("Insufficient balance: required {required}, available {available}")]
    InsufficientBalance { required: Uint128, available: Uint128 },

    #[error("Empty address: {field}")]
    EmptyAddress { field: String },

    #[error("Sister beneficiary cannot be a contract: {address}")]
    BeneficiaryIsContract { address: String },

    #[error("Sister beneficiary already fixed to {expected}")]
    BeneficiaryMismatch { expected: String },

    #[error("Instance has already migrated")]
    AlreadyMigrated,

    #[error("Instance schedule has not ended")]
    NotFullyVested,
}
