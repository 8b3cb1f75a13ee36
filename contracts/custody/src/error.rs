//! Error types for the custody instance contract

use common::ScheduleError;
use cosmwasm_std::{OverflowError, StdError, Uint128};
use cw_utils::ParseReplyError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Overflow(#[from] OverflowError),

    #[error("{0}")]
    Schedule(#[from] ScheduleError),

    #[error("{0}")]
    ParseReply(#[from] ParseReplyError),

    // ========================================================================
    // Authorization Errors
    // ========================================================================

    #[error("Unauthorized: only owner can perform this action")]
    Unauthorized,

    #[error("Unauthorized: only beneficiary can perform this action")]
    UnauthorizedBeneficiary,

    #[error("Call not authorized by registry: {signature}")]
    UnauthorizedCall { signature: String },

    #[error("Signature {signature} does not match forwarded message {actual}")]
    SignatureMismatch { signature: String, actual: String },

    // ========================================================================
    // Initialization Errors
    // ========================================================================

    #[error("Already initialized")]
    AlreadyInitialized,

    #[error("Empty address: {field}")]
    EmptyAddress { field: String },

    #[error("Sister ledger exceeds managed amount")]
    InvalidSisterLedger,

    // ========================================================================
    // Lock State Errors
    // ========================================================================

    #[error("Cannot cancel accepted contract")]
    CannotCancelAccepted,

    #[error("Contract is non-revocable")]
    NotRevocable,

    #[error("Already revoked")]
    AlreadyRevoked,

    #[error("No available unvested amount")]
    NoUnvestedTokens,

    #[error("No available releasable amount")]
    NoAvailableTokens,

    // ========================================================================
    // Amount Errors
    // ========================================================================

    #[error("Amount cannot be zero")]
    ZeroAmount,

    #[error("Amount requested {requested} is greater than surplus available {surplus}")]
    AmountExceedsSurplus { requested: Uint128, surplus: Uint128 },

    #[error("Cannot use more tokens than vested amount: used {used}, released {released}, vested {vested}")]
    UsedExceedsVested {
        used: Uint128,
        released: Uint128,
        vested: Uint128,
    },

    // ========================================================================
    // Forwarding Errors
    // ========================================================================

    #[error("No token destinations registered")]
    NoTokenDestinations,

    #[error("A forwarded call is already in progress")]
    ForwardInProgress,

    #[error("Unknown reply id: {id}")]
    UnknownReplyId { id: u64 },
}
