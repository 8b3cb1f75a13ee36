//! Cross-domain migration payload codec and salt derivation.
//!
//! The source-side bridge predicts the sister instance address from this salt,
//! and the destination-side registry deploys with the same salt after decoding
//! the payload, so both sides must share this single implementation.
//!
//! # Payload layout (32-byte words)
//! - source, owner, beneficiary: length word + bytes right-padded to a word
//! - managed_amount (uint128), start_time, end_time, periods,
//!   release_start_time, vesting_cliff_time, revocable (uint64 words)
//! - released_amount, used_amount (uint128 words)
//!
//! The salt is `keccak256` over everything except the last two words, which
//! change between repeated migrations of the same instance.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Binary, StdError, StdResult, Uint128};

use crate::hash::{keccak256, push_bytes, u128_word, WORD};
use crate::schedule::{Revocability, Schedule};

/// Custody state carried to the sister chain
#[cw_serde]
pub struct TransferredCustody {
    /// Custody instance on the source chain
    pub source: Addr,
    /// Owner on the destination chain (already remapped)
    pub owner: Addr,
    /// Beneficiary on the destination chain
    pub beneficiary: Addr,
    pub schedule: Schedule,
    /// Released on the source chain when the message was sent
    pub released_amount: Uint128,
    /// Used on the source chain when the message was sent
    pub used_amount: Uint128,
}

impl TransferredCustody {
    /// Encoding of the immutable fields; the salt preimage
    pub fn identity_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(WORD * 16);
        push_bytes(&mut out, self.source.as_bytes());
        push_bytes(&mut out, self.owner.as_bytes());
        push_bytes(&mut out, self.beneficiary.as_bytes());
        self.schedule.encode_into(&mut out);
        out
    }

    /// Salt for the sister instance deployment
    pub fn salt(&self) -> [u8; 32] {
        keccak256(&self.identity_bytes())
    }

    pub fn encode(&self) -> Binary {
        let mut out = self.identity_bytes();
        out.extend_from_slice(&u128_word(self.released_amount.u128()));
        out.extend_from_slice(&u128_word(self.used_amount.u128()));
        Binary::from(out)
    }

    /// Decode a payload. Addresses are returned unchecked; the receiver
    /// validates them against its own chain.
    pub fn decode(payload: &[u8]) -> StdResult<Self> {
        let mut reader = WordReader::new(payload);
        let source = Addr::unchecked(reader.next_string()?);
        let owner = Addr::unchecked(reader.next_string()?);
        let beneficiary = Addr::unchecked(reader.next_string()?);
        let managed_amount = Uint128::new(reader.next_u128()?);
        let start_time = reader.next_u64()?;
        let end_time = reader.next_u64()?;
        let periods = reader.next_u64()?;
        let release_start_time = reader.next_u64()?;
        let vesting_cliff_time = reader.next_u64()?;
        let revocable = Revocability::from_u64(reader.next_u64()?)
            .ok_or_else(|| malformed("unknown revocability"))?;
        let released_amount = Uint128::new(reader.next_u128()?);
        let used_amount = Uint128::new(reader.next_u128()?);
        reader.finish()?;

        Ok(TransferredCustody {
            source,
            owner,
            beneficiary,
            schedule: Schedule {
                managed_amount,
                start_time,
                end_time,
                periods,
                release_start_time,
                vesting_cliff_time,
                revocable,
            },
            released_amount,
            used_amount,
        })
    }
}

fn malformed(reason: &str) -> StdError {
    StdError::generic_err(format!("Malformed migration payload: {reason}"))
}

struct WordReader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> WordReader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    fn take(&mut self, len: usize) -> StdResult<&'a [u8]> {
        let end = self
            .offset
            .checked_add(len)
            .filter(|end| *end <= self.data.len())
            .ok_or_else(|| malformed("unexpected end of data"))?;
        let slice = &self.data[self.offset..end];
        self.offset = end;
        Ok(slice)
    }

    fn next_u64(&mut self) -> StdResult<u64> {
        let word = self.take(WORD)?;
        if word[..24].iter().any(|b| *b != 0) {
            return Err(malformed("uint64 word overflow"));
        }
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&word[24..]);
        Ok(u64::from_be_bytes(bytes))
    }

    fn next_u128(&mut self) -> StdResult<u128> {
        let word = self.take(WORD)?;
        if word[..16].iter().any(|b| *b != 0) {
            return Err(malformed("uint128 word overflow"));
        }
        let mut bytes = [0u8; 16];
        bytes.copy_from_slice(&word[16..]);
        Ok(u128::from_be_bytes(bytes))
    }

    fn next_string(&mut self) -> StdResult<String> {
        let len = usize::try_from(self.next_u64()?).map_err(|_| malformed("length overflow"))?;
        let padded = len.div_ceil(WORD) * WORD;
        let data = self.take(padded)?;
        if data[len..].iter().any(|b| *b != 0) {
            return Err(malformed("non-zero padding"));
        }
        String::from_utf8(data[..len].to_vec()).map_err(|_| malformed("invalid utf-8 address"))
    }

    fn finish(&self) -> StdResult<()> {
        if self.offset != self.data.len() {
            return Err(malformed("trailing bytes"));
        }
        Ok(())
    }
}
