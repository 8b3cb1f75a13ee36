//! Custody Instance Contract - One Token Lock per Beneficiary
//!
//! Holds a managed amount of a single CW20 asset and releases it to the
//! beneficiary following a step schedule.
//!
//! # Lifecycle
//! 1. The registry deploys and initializes the instance in one transaction
//! 2. The beneficiary accepts the lock (required before migration)
//! 3. The beneficiary releases unlocked funds over time
//! 4. The owner may revoke unvested funds if the schedule is revocable
//!
//! # Forwarding
//! The beneficiary may relay calls to protocol contracts the registry has
//! authorized. The instance appears as the caller, and the asset it moves
//! out is tracked as used.

pub mod contract;
pub mod error;
mod execute;
pub mod msg;
mod query;
pub mod state;

pub use crate::error::ContractError;
