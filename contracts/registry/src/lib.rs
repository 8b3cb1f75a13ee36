//! Registry Contract - Custody Instance Factory and Authorization Store
//!
//! Creates custody instances at deterministic addresses and owns the
//! allow-lists every instance consults: forwarded call targets and token
//! destinations.
//!
//! # Destination-side migration
//! On the sister chain the registry also receives migrated custody. The
//! gateway credits it with the transferred amount and calls
//! `OnIncomingTransfer`; the registry deploys the mirrored instance at the
//! address the source-side bridge predicted, or tops it up if it already
//! exists.

pub mod contract;
pub mod error;
mod execute;
pub mod msg;
mod query;
pub mod state;

pub use crate::error::ContractError;
