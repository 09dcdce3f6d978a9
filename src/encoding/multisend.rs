//! MultiSend transaction encoding
//!
//! The MultiSend contract expects transactions in a packed format:
//! - operation: 1 byte (0 = Call, 1 = DelegateCall)
//! - to: 20 bytes
//! - value: 32 bytes big-endian
//! - data length: 32 bytes big-endian
//! - data: variable length
//!
//! Calls are concatenated in order with no separators, and the resulting
//! buffer is the single `transactions` argument to `multiSend`.

use alloy::primitives::{Address, Bytes, U256};

use crate::error::{Error, Result};
use crate::types::{MetaTransactionData, Operation, SafeCall};

/// Encodes a single transaction in MultiSend packed format
pub fn encode_transaction(call: &impl SafeCall) -> Vec<u8> {
    let data = call.data();
    let data_len = data.len();

    // 1 + 20 + 32 + 32 + data_len
    let mut encoded = Vec::with_capacity(85 + data_len);

    encoded.push(call.operation().as_u8());
    encoded.extend_from_slice(call.to().as_slice());
    encoded.extend_from_slice(&call.value().to_be_bytes::<32>());
    encoded.extend_from_slice(&U256::from(data_len).to_be_bytes::<32>());
    encoded.extend_from_slice(&data);

    encoded
}

/// Encodes a batch for the MultiSend contract, order preserved exactly
pub fn encode_multi_send(calls: &[impl SafeCall]) -> Result<Bytes> {
    if calls.is_empty() {
        return Err(Error::NoCalls);
    }

    let mut encoded = Vec::new();
    for call in calls {
        encoded.extend(encode_transaction(call));
    }

    Ok(Bytes::from(encoded))
}

/// Encodes a batch for the MultiSendCallOnly contract.
///
/// The contract reverts on DelegateCall, so the batch is rejected here with
/// [`Error::InvalidOperation`] before anything reaches the chain.
pub fn encode_multi_send_call_only(calls: &[impl SafeCall]) -> Result<Bytes> {
    for (index, call) in calls.iter().enumerate() {
        if call.operation().is_delegate() {
            return Err(Error::InvalidOperation {
                index,
                to: call.to(),
            });
        }
    }
    encode_multi_send(calls)
}

/// Decodes a MultiSend `transactions` buffer back into its calls.
///
/// Inverse of [`encode_multi_send`]: order, operation flags and payload
/// bytes are preserved exactly.
pub fn decode_multi_send(encoded: &[u8]) -> Result<Vec<MetaTransactionData>> {
    let mut calls = Vec::new();
    let mut cursor = 0usize;

    while cursor < encoded.len() {
        if encoded.len() - cursor < 85 {
            return Err(Error::Encoding(format!(
                "Truncated MultiSend call header at byte {cursor}"
            )));
        }

        let operation = Operation::from_u8(encoded[cursor]).ok_or_else(|| {
            Error::Encoding(format!(
                "Invalid operation byte 0x{:02x} at offset {cursor}",
                encoded[cursor]
            ))
        })?;
        cursor += 1;

        let to = Address::from_slice(&encoded[cursor..cursor + 20]);
        cursor += 20;

        let value = U256::from_be_slice(&encoded[cursor..cursor + 32]);
        cursor += 32;

        let data_len = U256::from_be_slice(&encoded[cursor..cursor + 32]);
        cursor += 32;
        let data_len = usize::try_from(data_len)
            .map_err(|_| Error::Encoding(format!("Call data length {data_len} too large")))?;

        if encoded.len() - cursor < data_len {
            return Err(Error::Encoding(format!(
                "Call data truncated: expected {data_len} bytes at offset {cursor}"
            )));
        }
        let data = encoded[cursor..cursor + data_len].to_vec();
        cursor += data_len;

        calls.push(MetaTransactionData {
            to,
            value,
            data: data.into(),
            operation,
        });
    }

    Ok(calls)
}
