//! Message types for the registry contract

use common::manager::{AuthorizedTargetResponse, IsInstanceResponse, TokenDestinationsResponse};
use common::schedule::Schedule;
use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary, HexBinary, Uint128};

/// Migrate message
#[cw_serde]
pub struct MigrateMsg {}

#[cw_serde]
pub struct InstantiateMsg {
    pub owner: String,
    /// CW20 asset held by every instance
    pub asset: String,
    /// Stored custody instance code
    pub template_code_id: u64,
}

/// One forwarded call authorization
#[cw_serde]
pub struct AuthorizedCall {
    pub signature: String,
    pub target: String,
}

#[cw_serde]
pub enum ExecuteMsg {
    // ========================================================================
    // Instances
    // ========================================================================
    /// Deploy a custody instance and fund it with `managed_amount` from the
    /// registry's own balance.
    CreateCustodyInstance {
        owner: String,
        beneficiary: String,
        schedule: Schedule,
    },

    // ========================================================================
    // Allow-lists
    // ========================================================================
    /// Map a forwarded call signature to its target, replacing any previous
    /// target.
    SetAuthorizedCall { signature: String, target: String },

    SetAuthorizedCalls { calls: Vec<AuthorizedCall> },

    UnsetAuthorizedCall { signature: String },

    AddTokenDestination { address: String },

    RemoveTokenDestination { address: String },

    // ========================================================================
    // Admin
    // ========================================================================
    /// Replace the template used for new deployments
    SetTemplate { code_id: u64 },

    /// Send asset held by the registry to the owner
    Withdraw { amount: Uint128 },

    TransferOwnership { owner: String },

    // ========================================================================
    // Destination-side bridge
    // ========================================================================
    /// Configure the gateway and source-side bridge this registry accepts
    /// migrated custody from.
    SetSisterBridge {
        gateway: String,
        counterpart_bridge: String,
    },

    /// Called by the gateway after crediting the registry with `amount`
    OnIncomingTransfer {
        sender: String,
        amount: Uint128,
        payload: Binary,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},

    /// Target authorized for a forwarded call signature
    #[returns(AuthorizedTargetResponse)]
    AuthorizedTarget { signature: String },

    /// All call authorizations, ordered by signature
    #[returns(AuthorizedCallsResponse)]
    AuthorizedCalls {
        start_after: Option<String>,
        limit: Option<u32>,
    },

    #[returns(TokenDestinationsResponse)]
    TokenDestinations {},

    /// Whether the address is an instance created by this registry
    #[returns(IsInstanceResponse)]
    IsInstance { address: String },

    #[returns(InstancesResponse)]
    Instances {
        start_after: Option<String>,
        limit: Option<u32>,
    },

    /// Address `CreateCustodyInstance` would deploy to for these arguments
    #[returns(ComputeAddressResponse)]
    ComputeAddress {
        owner: String,
        beneficiary: String,
        schedule: Schedule,
    },

    /// Local instance mirroring a source-chain instance
    #[returns(SisterInstanceResponse)]
    SisterInstance { source: String },

    /// Source-chain instance a local instance mirrors
    #[returns(SourceInstanceResponse)]
    SourceInstance { sister: String },
}

// ============================================================================
// Responses
// ============================================================================

#[cw_serde]
pub struct ConfigResponse {
    pub owner: Addr,
    pub asset: Addr,
    pub template_code_id: u64,
    pub template_checksum: HexBinary,
    pub gateway: Option<Addr>,
    pub counterpart_bridge: Option<String>,
}

#[cw_serde]
pub struct AuthorizedCallsResponse {
    pub calls: Vec<AuthorizedTargetResponse>,
}

#[cw_serde]
pub struct InstanceInfo {
    pub address: Addr,
    pub owner: Addr,
    pub beneficiary: Addr,
    pub managed_amount: Uint128,
    pub created_at: u64,
    pub sister_source: Option<String>,
}

#[cw_serde]
pub struct InstancesResponse {
    pub instances: Vec<InstanceInfo>,
}

#[cw_serde]
pub struct ComputeAddressResponse {
    pub address: Addr,
    /// Deployment salt as 0x-prefixed hex
    pub salt: String,
}

#[cw_serde]
pub struct SisterInstanceResponse {
    pub source: String,
    pub sister: Option<Addr>,
}

#[cw_serde]
pub struct SourceInstanceResponse {
    pub sister: Addr,
    pub source: Option<String>,
}
