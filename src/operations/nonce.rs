//! ERC-4337 two-dimensional nonce packing

use alloy::primitives::U256;

use crate::error::{Error, Result};

/// Packs a 192-bit key and 64-bit sequence into the 256-bit nonce the
/// EntryPoint expects: `(key << 64) | sequence`.
///
/// Both components are range-checked; a value that does not fit its bit
/// width fails instead of silently truncating.
pub fn encode_nonce(key: U256, sequence: U256) -> Result<U256> {
    if key.bit_len() > 192 {
        return Err(Error::NonceOverflow {
            field: "key",
            bits: 192,
        });
    }
    if sequence.bit_len() > 64 {
        return Err(Error::NonceOverflow {
            field: "sequence",
            bits: 64,
        });
    }
    Ok((key << 64) | sequence)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_nonce() {
        let nonce = encode_nonce(U256::from(5), U256::from(3)).unwrap();
        assert_eq!(nonce, (U256::from(5) << 64) + U256::from(3));
    }

    #[test]
    fn test_zero_key_passes_sequence_through() {
        let nonce = encode_nonce(U256::ZERO, U256::from(42)).unwrap();
        assert_eq!(nonce, U256::from(42));
    }

    #[test]
    fn test_key_overflow_fails() {
        let too_big = U256::from(1) << 192;
        let err = encode_nonce(too_big, U256::ZERO).unwrap_err();
        assert!(matches!(
            err,
            Error::NonceOverflow {
                field: "key",
                bits: 192
            }
        ));

        // Max 192-bit key is fine
        let max_key = (U256::from(1) << 192) - U256::from(1);
        assert!(encode_nonce(max_key, U256::ZERO).is_ok());
    }

    #[test]
    fn test_sequence_overflow_fails() {
        let too_big = U256::from(1) << 64;
        let err = encode_nonce(U256::ZERO, too_big).unwrap_err();
        assert!(matches!(
            err,
            Error::NonceOverflow {
                field: "sequence",
                bits: 64
            }
        ));

        let max_seq = (U256::from(1) << 64) - U256::from(1);
        assert!(encode_nonce(U256::ZERO, max_seq).is_ok());
    }
}
