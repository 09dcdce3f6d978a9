//! EIP-1271 contract signature validation

use alloy::primitives::{Address, Bytes, B256};
use alloy::sol_types::SolCall;

use crate::contracts::{ICompatibilityFallbackHandler, EIP1271_MAGIC_VALUE};
use crate::provider::ChainProvider;

/// Asks a contract whether it considers `signature` valid for `hash`.
///
/// Valid means the call returned data whose first four bytes equal the
/// EIP-1271 magic value `0x1626ba7e`. A revert, a transport failure or any
/// other return value all report `false`; this is a query and never raises.
pub async fn is_valid_eip1271_signature<P: ChainProvider>(
    provider: &P,
    validator: Address,
    hash: B256,
    signature: &Bytes,
) -> bool {
    let call = ICompatibilityFallbackHandler::isValidSignatureCall {
        _dataHash: hash,
        _signature: signature.clone(),
    };

    match provider.call(validator, call.abi_encode().into()).await {
        Ok(returned) => returned.len() >= 4 && returned[..4] == EIP1271_MAGIC_VALUE,
        Err(_) => false,
    }
}
