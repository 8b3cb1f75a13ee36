//! Rules for forwarded calls.
//!
//! A forwarded call is identified by its signature: the snake_case name of the
//! top-level variant of the JSON execute message. The registry maps each
//! signature to exactly one target, and a custody instance only relays a
//! message whose top-level variant equals the signature it was authorized
//! under. An authorization can never be reused for a different call shape.

use std::collections::BTreeMap;

use cosmwasm_std::{from_json, Binary, StdError, StdResult};
use serde::de::IgnoredAny;

/// Maximum signature length in bytes
pub const MAX_SIGNATURE_LEN: usize = 64;

/// Signatures are snake_case identifiers (`[a-z][a-z0-9_]*`)
pub fn validate_signature(signature: &str) -> StdResult<()> {
    let mut chars = signature.chars();
    let valid = signature.len() <= MAX_SIGNATURE_LEN
        && chars.next().is_some_and(|c| c.is_ascii_lowercase())
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
    if !valid {
        return Err(StdError::generic_err(format!(
            "Invalid call signature: {signature:?}"
        )));
    }
    Ok(())
}

/// Extract the signature of an execute message
pub fn call_signature(msg: &Binary) -> StdResult<String> {
    let parsed: BTreeMap<String, IgnoredAny> = from_json(msg)
        .map_err(|_| StdError::generic_err("Forwarded message must be a single-variant object"))?;
    if parsed.len() != 1 {
        return Err(StdError::generic_err(
            "Forwarded message must be a single-variant object",
        ));
    }
    let signature = parsed
        .into_iter()
        .next()
        .map(|(key, _)| key)
        .ok_or_else(|| StdError::generic_err("Forwarded message is empty"))?;
    validate_signature(&signature)?;
    Ok(signature)
}
