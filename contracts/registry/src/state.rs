//! State definitions for the registry contract

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Uint128};
use cw_storage_plus::{Item, Map};

/// Registry configuration
#[cw_serde]
pub struct Config {
    /// Manages allow-lists and creates instances
    pub owner: Addr,
    /// The single CW20 asset every instance holds
    pub asset: Addr,
    /// Stored custody instance code used as deployment template
    pub template_code_id: u64,
}

/// Destination-side bridge settings
#[cw_serde]
pub struct SisterBridge {
    /// Local gateway endpoint that delivers incoming transfers
    pub gateway: Addr,
    /// Source-side bridge on the other chain
    pub counterpart_bridge: String,
}

/// Instance created by this registry
#[cw_serde]
pub struct InstanceRecord {
    pub owner: Addr,
    pub beneficiary: Addr,
    pub managed_amount: Uint128,
    pub created_at: u64,
    /// Source-chain instance for mirrored instances
    pub sister_source: Option<String>,
}

// ============================================================================
// Constants
// ============================================================================

/// Contract name for cw2 migration info
pub const CONTRACT_NAME: &str = "crates.io:custody-registry";

/// Contract version for cw2 migration info
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Storage
// ============================================================================

pub const CONFIG: Item<Config> = Item::new("config");

pub const SISTER_BRIDGE: Item<SisterBridge> = Item::new("sister_bridge");

/// Forwarded call signature -> target contract
pub const AUTHORIZED_CALLS: Map<&str, Addr> = Map::new("authorized_calls");

/// Addresses instances may approve to spend the asset
pub const TOKEN_DESTINATIONS: Map<&Addr, bool> = Map::new("token_destinations");

/// Instances created by this registry
pub const INSTANCES: Map<&Addr, InstanceRecord> = Map::new("instances");

/// Source-chain instance -> local sister instance
pub const SISTER_BY_SOURCE: Map<&str, Addr> = Map::new("sister_by_source");

/// Local sister instance -> source-chain instance
pub const SOURCE_BY_SISTER: Map<&Addr, String> = Map::new("source_by_sister");
