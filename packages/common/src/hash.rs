//! Hashing and 32-byte word encoding helpers.
//!
//! Payloads and salts are laid out as big-endian, left-padded 32-byte words,
//! so the byte layout is fixed regardless of which chain computes it.

use tiny_keccak::{Hasher, Keccak};

/// Size of one encoded word in bytes
pub const WORD: usize = 32;

/// Compute keccak256 hash of arbitrary data
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(data);
    let mut output = [0u8; 32];
    hasher.finalize(&mut output);
    output
}

/// Convert 32-byte hash to hex string (for attributes/logging)
pub fn bytes32_to_hex(bytes: &[u8; 32]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// u64 left-padded into a word; the value occupies bytes 24-31
pub fn u64_word(value: u64) -> [u8; WORD] {
    let mut word = [0u8; WORD];
    word[24..].copy_from_slice(&value.to_be_bytes());
    word
}

/// u128 left-padded into a word; the value occupies bytes 16-31
pub fn u128_word(value: u128) -> [u8; WORD] {
    let mut word = [0u8; WORD];
    word[16..].copy_from_slice(&value.to_be_bytes());
    word
}

/// Append a length-prefixed byte string: one length word, then the data
/// right-padded to a whole number of words.
pub fn push_bytes(out: &mut Vec<u8>, data: &[u8]) {
    out.extend_from_slice(&u64_word(data.len() as u64));
    out.extend_from_slice(data);
    let rem = data.len() % WORD;
    if rem != 0 {
        out.extend(std::iter::repeat(0u8).take(WORD - rem));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keccak256_basic() {
        // keccak256("hello") = 0x1c8aff950685c2ed4bc3174f3472287b56d9517b9c948127319a09a7a36deac8
        let result = keccak256(b"hello");
        assert_eq!(
            bytes32_to_hex(&result),
            "0x1c8aff950685c2ed4bc3174f3472287b56d9517b9c948127319a09a7a36deac8"
        );
    }

    #[test]
    fn test_word_padding() {
        let word = u128_word(1_000_000_000_000_000_000);
        assert_eq!(&word[0..16], &[0u8; 16]);

        let word = u64_word(42);
        assert_eq!(&word[0..24], &[0u8; 24]);
        assert_eq!(word[31], 42);
    }

    #[test]
    fn test_push_bytes_pads_to_word_boundary() {
        let mut out = Vec::new();
        push_bytes(&mut out, b"terra1abc");
        assert_eq!(out.len(), 64);
        assert_eq!(out[31], 9);
        assert_eq!(&out[32..41], b"terra1abc");
        assert!(out[41..].iter().all(|b| *b == 0));

        let mut exact = Vec::new();
        push_bytes(&mut exact, &[7u8; 32]);
        assert_eq!(exact.len(), 64);
    }
}
