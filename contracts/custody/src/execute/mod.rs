//! Execute handlers for the custody instance contract.
//!
//! - `lock` - accept, cancel, release, surplus withdrawal and revocation
//! - `protocol` - token destination approvals and forwarded calls
//! - `admin` - role reassignment

mod admin;
mod lock;
mod protocol;

pub use admin::*;
pub use lock::*;
pub use protocol::*;
