//! Error types for the registry contract

use common::ScheduleError;
use cosmwasm_std::{OverflowError, StdError, Uint128};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Overflow(#[from] OverflowError),

    #[error("{0}")]
    Schedule(#[from] ScheduleError),

    // ========================================================================
    // Authorization Errors
    // ========================================================================

    #[error("Unauthorized: only owner can perform this action")]
    Unauthorized,

    #[error("Unauthorized: only the gateway can deliver incoming transfers")]
    UnauthorizedGateway,

    #[error("Unexpected sender {sender}: not the counterpart bridge")]
    UnauthorizedSender { sender: String },

    // ========================================================================
    // Instance Errors
    // ========================================================================

    #[error("Insufficient balance: required {required}, available {available}")]
    InsufficientBalance { required: Uint128, available: Uint128 },

    #[error("Instance already exists at {address}")]
    InstanceExists { address: String },

    #[error("Empty address: {field}")]
    EmptyAddress { field: String },

    // ========================================================================
    // Allow-list Errors
    // ========================================================================

    #[error("No authorized call for signature: {signature}")]
    CallNotFound { signature: String },

    #[error("Token destination already added: {address}")]
    DestinationExists { address: String },

    #[error("Token destination not found: {address}")]
    DestinationNotFound { address: String },

    #[error("Amount cannot be zero")]
    ZeroAmount,

    // ========================================================================
    // Sister Bridge Errors
    // ========================================================================

    #[error("Sister bridge is not configured")]
    SisterBridgeNotConfigured,
}
