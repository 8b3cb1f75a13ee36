//! Migration Bridge Contract - Source Side
//!
//! Moves a custody instance's balance to its sister instance on the other
//! chain through an asynchronous gateway.
//!
//! # Ledgers
//! - Escrow: native-denom credit per instance, spent on delivery costs
//! - Asset: pulled from the instance and handed to the gateway
//!
//! The two are never mixed.
//!
//! # Guarantees
//! The sister address is fixed at the first migration and derived from
//! data that never changes, so repeated migrations and duplicate deliveries
//! all land on the same sister. A successful `Migrate` is a promise of
//! delivery, not a confirmation: nothing is reported back from the sister
//! chain.

pub mod contract;
pub mod error;
mod execute;
pub mod msg;
mod query;
pub mod state;

pub use crate::error::ContractError;
