//! State definitions for the migration bridge contract

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, HexBinary, Uint128};
use cw_storage_plus::{Item, Map};

/// Bridge configuration
#[cw_serde]
pub struct Config {
    pub owner: Addr,
    /// The only asset this bridge migrates
    pub asset: Addr,
    /// Source-side gateway endpoint
    pub gateway: Addr,
    /// Native denom of the gas escrow
    pub escrow_denom: String,
    /// Single contract allowed to pull escrow
    pub protocol: Option<Addr>,
}

/// Counterpart of a local registry
#[cw_serde]
pub struct SisterManager {
    /// Registry on the sister chain that deploys sister instances
    pub registry: Addr,
    /// Checksum of the sister registry's custody template
    pub template_checksum: HexBinary,
}

/// Where an instance's custody lives on the sister chain
#[cw_serde]
pub struct MigratedTarget {
    pub address: Addr,
    /// Set by `SetSisterAddressManually`; migration is disabled for good
    pub manual: bool,
    /// Identities fixed at the first migration
    pub sister_owner: Option<Addr>,
    pub sister_beneficiary: Option<Addr>,
}

// ============================================================================
// Constants
// ============================================================================

/// Contract name for cw2 migration info
pub const CONTRACT_NAME: &str = "crates.io:custody-migration-bridge";

/// Contract version for cw2 migration info
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Storage
// ============================================================================

pub const CONFIG: Item<Config> = Item::new("config");

/// Gas escrow per instance, in `escrow_denom`
pub const ESCROW: Map<&Addr, Uint128> = Map::new("escrow");

/// Sister-chain target per instance, set at most once
pub const MIGRATED_TARGETS: Map<&Addr, MigratedTarget> = Map::new("migrated_targets");

/// Local registry -> sister registry
pub const SISTER_MANAGERS: Map<&Addr, SisterManager> = Map::new("sister_managers");

/// Local owner -> owner on the sister chain
pub const SISTER_OWNERS: Map<&Addr, Addr> = Map::new("sister_owners");
