//! Deterministic deployment of custody instances.
//!
//! Addresses follow the `instantiate2` scheme: a hash of the template code
//! checksum, the deployer's canonical address and a salt. The address is
//! therefore known before anything is deployed, on this chain or the sister
//! chain, as long as the deployer and template checksum are known.

use cosmwasm_std::{
    instantiate2_address, to_json_binary, Addr, Api, Binary, Deps, HexBinary, QuerierWrapper,
    StdError, StdResult, WasmMsg,
};
use serde::Serialize;

/// Predict the address `deployer` gets when instantiating the code with
/// `checksum` under `salt`.
pub fn compute_address(
    api: &dyn Api,
    checksum: &[u8],
    deployer: &Addr,
    salt: &[u8],
) -> StdResult<Addr> {
    let creator = api.addr_canonicalize(deployer.as_str())?;
    let canonical = instantiate2_address(checksum, &creator, salt)
        .map_err(|e| StdError::generic_err(format!("Address derivation failed: {e}")))?;
    api.addr_humanize(&canonical)
}

/// Checksum of a stored template
pub fn template_checksum(querier: &QuerierWrapper, code_id: u64) -> StdResult<HexBinary> {
    Ok(querier.query_wasm_code_info(code_id)?.checksum)
}

/// Predict the address for a stored template on this chain
pub fn compute_address_for_code(
    deps: Deps,
    deployer: &Addr,
    code_id: u64,
    salt: &[u8],
) -> StdResult<Addr> {
    let checksum = template_checksum(&deps.querier, code_id)?;
    compute_address(deps.api, checksum.as_slice(), deployer, salt)
}

/// Build the deployment message. The initializer runs as the instantiate
/// message, so a failing initializer reverts the deployment with it.
pub fn deploy_msg<T: Serialize>(
    code_id: u64,
    salt: &[u8],
    label: String,
    admin: Option<String>,
    init_msg: &T,
) -> StdResult<WasmMsg> {
    Ok(WasmMsg::Instantiate2 {
        admin,
        code_id,
        label,
        msg: to_json_binary(init_msg)?,
        funds: vec![],
        salt: Binary::from(salt.to_vec()),
    })
}
