//! Messaging channel interface.
//!
//! The gateway is an external collaborator: it accepts an outbound transfer
//! together with prepaid delivery value and, at some unknown later time,
//! credits the recipient on the other chain and invokes its inbound hook.
//! Nothing is reported back to the sending transaction.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Binary, StdResult, Uint128};

/// Delivery budget for one outbound message
#[cw_serde]
pub struct GasParams {
    /// Gas limit for executing the message on the destination chain
    pub max_gas: u64,
    /// Price bid per unit of destination gas
    pub gas_price_bid: Uint128,
    /// Flat cost of submitting the message
    pub max_submission_cost: Uint128,
}

impl GasParams {
    /// Value that must accompany the outbound message
    pub fn required_value(&self) -> StdResult<Uint128> {
        let execution = self.gas_price_bid.checked_mul(Uint128::from(self.max_gas))?;
        Ok(self.max_submission_cost.checked_add(execution)?)
    }
}

/// Source-side gateway entry point
#[cw_serde]
pub enum GatewayExecuteMsg {
    /// Pull `amount` of `token` from the sender (allowance required) and
    /// deliver it with `payload` to `recipient` on the other chain.
    OutboundTransfer {
        token: String,
        recipient: String,
        amount: Uint128,
        gas: GasParams,
        payload: Binary,
    },
}

/// Hook invoked by the destination-side gateway on the recipient, after the
/// recipient has been credited with `amount`.
#[cw_serde]
pub enum InboundHookMsg {
    OnIncomingTransfer {
        /// Sender on the source chain
        sender: String,
        amount: Uint128,
        payload: Binary,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_value() {
        let gas = GasParams {
            max_gas: 1_000_000,
            gas_price_bid: Uint128::new(3),
            max_submission_cost: Uint128::new(500),
        };
        assert_eq!(gas.required_value().unwrap(), Uint128::new(3_000_500));

        let overflow = GasParams {
            max_gas: u64::MAX,
            gas_price_bid: Uint128::MAX,
            max_submission_cost: Uint128::zero(),
        };
        assert!(overflow.required_value().is_err());
    }
}
