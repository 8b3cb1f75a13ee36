//! Common - Shared Types and Pure Logic for the Custody Contracts
//!
//! Everything that must produce identical results on both chains lives here,
//! so the source-side bridge and the destination-side registry derive the
//! same salts, payloads and addresses from one implementation.
//!
//! - `schedule` - vesting/lock step schedule math
//! - `factory` - deterministic (`instantiate2`) address prediction and deployment
//! - `migration` - cross-domain payload codec and salt derivation
//! - `dispatch` - forwarded-call signature rules
//! - `gateway` - messaging channel interface
//! - `manager` - registry query interface consumed by custody instances

pub mod dispatch;
pub mod factory;
pub mod gateway;
pub mod hash;
pub mod manager;
pub mod migration;
pub mod schedule;

pub use crate::gateway::GasParams;
pub use crate::hash::{bytes32_to_hex, keccak256};
pub use crate::migration::TransferredCustody;
pub use crate::schedule::{Revocability, Schedule, ScheduleError};
