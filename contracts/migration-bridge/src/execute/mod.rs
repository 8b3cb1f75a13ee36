//! Execute message handlers for the migration bridge contract.
//!
//! - `escrow` - Gas escrow deposits, withdrawals and protocol pulls
//! - `migrate` - Migration and manual sister address declaration
//! - `admin` - Sister registries, owner remaps, protocol and ownership

mod admin;
mod escrow;
mod migrate;

pub use admin::*;
pub use escrow::*;
pub use migrate::*;
