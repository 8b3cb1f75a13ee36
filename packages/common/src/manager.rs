//! Registry queries consumed by custody instances and the bridge.
//!
//! Custody instances never cache the allow-lists; they query the registry
//! they were created by on every call that needs authorization.

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Addr;

#[cw_serde]
#[derive(QueryResponses)]
pub enum ManagerQueryMsg {
    /// Target authorized for a forwarded call signature
    #[returns(AuthorizedTargetResponse)]
    AuthorizedTarget { signature: String },

    /// Addresses custody instances may approve to spend the asset
    #[returns(TokenDestinationsResponse)]
    TokenDestinations {},

    /// Whether the address is a custody instance created by this registry
    #[returns(IsInstanceResponse)]
    IsInstance { address: String },
}

#[cw_serde]
pub struct AuthorizedTargetResponse {
    pub signature: String,
    pub target: Option<Addr>,
}

#[cw_serde]
pub struct TokenDestinationsResponse {
    pub destinations: Vec<Addr>,
}

#[cw_serde]
pub struct IsInstanceResponse {
    pub is_instance: bool,
}
