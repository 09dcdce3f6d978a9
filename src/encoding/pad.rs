//! Hex padding and tracking-id derivation helpers

use alloy::primitives::{keccak256, Address};

use crate::error::{Error, Result};

/// Left-pads a hex value to a fixed byte width.
///
/// `pad_hex("0x1", 4)` yields `0x00000001`; a value that already fills the
/// width exactly passes through unchanged. A value wider than the target
/// fails with [`Error::EncodingSize`] citing both lengths.
pub fn pad_hex(value: &str, size: usize) -> Result<String> {
    let digits = value.strip_prefix("0x").unwrap_or(value);
    let hex_chars = size * 2;

    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(Error::Encoding(format!("Invalid hex value: {value}")));
    }
    if digits.len() > hex_chars {
        return Err(Error::EncodingSize {
            len: digits.len(),
            max: size,
            hex_chars,
        });
    }

    Ok(format!("0x{digits:0>hex_chars$}"))
}

/// Derives a pseudo-address from an arbitrary tracking string by hashing it
/// and keeping the first 20 bytes of the digest.
///
/// Used for off-chain attribution fields such as `paymentReceiver` and
/// `refundReceiver`. This is a one-way, collision-tolerant derivation, not a
/// cryptographic commitment: two distinct strings are not guaranteed to stay
/// distinguishable after truncation, though the collision probability is
/// negligible for attribution purposes.
pub fn derive_tracking_address(id: &str) -> Address {
    let digest = keccak256(id.as_bytes());
    Address::from_slice(&digest[..20])
}
