//! EIP-712 hashing for Safe transactions
//!
//! The SafeTx struct hash has been stable since 1.0.0, but the domain
//! separator changed in 1.3.0: earlier versions hash only the verifying
//! contract, 1.3.0+ also hash the chain id. Selecting the wrong domain
//! produces a hash no owner ever signed.

use alloy::primitives::{keccak256, Address, B256, U256};

use crate::contracts::{
    DOMAIN_SEPARATOR_TYPEHASH, LEGACY_DOMAIN_SEPARATOR_TYPEHASH, SAFE_TX_TYPEHASH,
};
use crate::registry::SafeVersion;
use crate::types::SafeTransactionData;

/// Computes the domain separator for a Safe at a given contract version
pub fn compute_domain_separator(version: SafeVersion, chain_id: u64, safe_address: Address) -> B256 {
    if version.domain_includes_chain_id() {
        return compute_chain_domain_separator(chain_id, safe_address);
    }

    let mut addr_word = [0u8; 32];
    addr_word[12..].copy_from_slice(safe_address.as_slice());

    let mut encoded = Vec::with_capacity(64);
    encoded.extend_from_slice(&LEGACY_DOMAIN_SEPARATOR_TYPEHASH);
    encoded.extend_from_slice(&addr_word);

    keccak256(&encoded)
}

/// Computes the chain-aware EIP-712 domain separator for an arbitrary
/// verifying contract. Also the domain the Safe4337Module signs under, with
/// the module as the verifying contract.
pub fn compute_chain_domain_separator(chain_id: u64, verifying_contract: Address) -> B256 {
    let mut addr_word = [0u8; 32];
    addr_word[12..].copy_from_slice(verifying_contract.as_slice());

    let mut encoded = Vec::with_capacity(96);
    encoded.extend_from_slice(&DOMAIN_SEPARATOR_TYPEHASH);
    encoded.extend_from_slice(&U256::from(chain_id).to_be_bytes::<32>());
    encoded.extend_from_slice(&addr_word);

    keccak256(&encoded)
}

/// Computes the struct hash for SafeTx
///
/// safeTxHash = keccak256(abi.encode(
///     SAFE_TX_TYPEHASH,
///     to, value, keccak256(data), operation,
///     safeTxGas, baseGas, gasPrice, gasToken, refundReceiver, nonce
/// ))
pub fn compute_safe_tx_struct_hash(tx: &SafeTransactionData) -> B256 {
    let mut encoded = Vec::with_capacity(352);

    encoded.extend_from_slice(&SAFE_TX_TYPEHASH);

    let mut to_word = [0u8; 32];
    to_word[12..].copy_from_slice(tx.to.as_slice());
    encoded.extend_from_slice(&to_word);

    encoded.extend_from_slice(&tx.value.to_be_bytes::<32>());
    encoded.extend_from_slice(keccak256(&tx.data).as_slice());

    let mut op_word = [0u8; 32];
    op_word[31] = tx.operation.as_u8();
    encoded.extend_from_slice(&op_word);

    encoded.extend_from_slice(&tx.safe_tx_gas.to_be_bytes::<32>());
    encoded.extend_from_slice(&tx.base_gas.to_be_bytes::<32>());
    encoded.extend_from_slice(&tx.gas_price.to_be_bytes::<32>());

    let mut gas_token_word = [0u8; 32];
    gas_token_word[12..].copy_from_slice(tx.gas_token.as_slice());
    encoded.extend_from_slice(&gas_token_word);

    let mut refund_word = [0u8; 32];
    refund_word[12..].copy_from_slice(tx.refund_receiver.as_slice());
    encoded.extend_from_slice(&refund_word);

    encoded.extend_from_slice(&tx.nonce.to_be_bytes::<32>());

    keccak256(&encoded)
}

/// Computes the final EIP-712 hash to sign
///
/// hash = keccak256("\x19\x01" || domainSeparator || structHash)
pub fn compute_transaction_hash(domain_separator: B256, struct_hash: B256) -> B256 {
    let mut encoded = Vec::with_capacity(66);
    encoded.extend_from_slice(&[0x19, 0x01]);
    encoded.extend_from_slice(domain_separator.as_slice());
    encoded.extend_from_slice(struct_hash.as_slice());
    keccak256(&encoded)
}

/// Computes the complete transaction hash owners sign, for a Safe of the
/// given version on the given chain
pub fn compute_safe_transaction_hash(
    version: SafeVersion,
    chain_id: u64,
    safe_address: Address,
    tx: &SafeTransactionData,
) -> B256 {
    let domain_separator = compute_domain_separator(version, chain_id, safe_address);
    let struct_hash = compute_safe_tx_struct_hash(tx);
    compute_transaction_hash(domain_separator, struct_hash)
}
