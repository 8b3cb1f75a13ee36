//! Execute message handlers for the registry contract.
//!
//! - `create` - Deterministic instance deployment
//! - `authorization` - Call and token destination allow-lists
//! - `admin` - Template, ownership and asset withdrawal
//! - `incoming` - Destination-side migration delivery

mod admin;
mod authorization;
mod create;
mod incoming;

pub use admin::*;
pub use authorization::*;
pub use create::*;
pub use incoming::*;
