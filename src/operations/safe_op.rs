//! SafeOp construction and hashing
//!
//! The Safe4337Module does not sign raw user operations. Owners sign a SafeOp
//! struct under the module's EIP-712 domain, and the module re-derives that
//! hash during validation. The struct layout differs between module v0.2.0
//! (EntryPoint v0.6) and v0.3.0 (EntryPoint v0.7): gas fields shrink to
//! uint128 and the verification/call and priority/max orderings swap.

use std::collections::BTreeMap;

use alloy::primitives::{keccak256, Address, Bytes, B256, U256};

use crate::contracts::{safe_op_v06_typehash, safe_op_v07_typehash, SAFE_OP_V06_TYPE, SAFE_OP_V07_TYPE};
use crate::encoding::{compute_chain_domain_separator, compute_transaction_hash};
use crate::signing::{encode_signatures, SafeSignature};

use super::user_op::{UserOperationV06, UserOperationV07};

/// Gas estimations a bundler returns for a user operation.
///
/// Fields left as `None` keep the operation's current values, so partial
/// estimation responses apply cleanly.
#[derive(Debug, Clone, Default)]
pub struct GasEstimation {
    /// Gas limit for the execution phase
    pub call_gas_limit: Option<U256>,
    /// Gas limit for the validation phase
    pub verification_gas_limit: Option<U256>,
    /// Bundler overhead gas
    pub pre_verification_gas: Option<U256>,
    /// EIP-1559 max fee
    pub max_fee_per_gas: Option<U256>,
    /// EIP-1559 priority fee
    pub max_priority_fee_per_gas: Option<U256>,
    /// Paymaster validation gas, v0.7 only
    pub paymaster_verification_gas_limit: Option<U256>,
    /// Paymaster post-op gas, v0.7 only
    pub paymaster_post_op_gas_limit: Option<U256>,
}

/// Context shared by every SafeOp of one Safe on one chain
#[derive(Debug, Clone)]
pub struct SafeOperationOptions {
    /// Chain the operation targets
    pub chain_id: u64,
    /// Safe4337Module address, the EIP-712 verifying contract
    pub module_address: Address,
    /// EntryPoint the operation is submitted through
    pub entry_point: Address,
    /// Signature validity start, 48-bit unix timestamp (0 for immediate)
    pub valid_after: u64,
    /// Signature validity end, 48-bit unix timestamp (0 for no expiry)
    pub valid_until: u64,
}

/// Behavior shared by both SafeOp generations
pub trait SafeOperation {
    /// Applies bundler gas estimations, leaving unset fields untouched
    fn add_estimations(&mut self, estimations: &GasEstimation);

    /// Records an owner signature, replacing a previous one from the same
    /// signer
    fn add_signature(&mut self, signature: SafeSignature);

    /// Aggregates the recorded owner signatures in ascending signer order
    fn encoded_signatures(&self) -> Bytes;

    /// Builds the module-level signature: validAfter (6 bytes) followed by
    /// validUntil (6 bytes) followed by the aggregated owner signatures
    fn packed_signature(&self) -> Bytes;

    /// EIP-712 hash owners sign, under the module's domain
    fn operation_hash(&self) -> B256;

    /// The SafeOp type string of this generation
    fn eip712_type(&self) -> &'static str;
}

fn word_from_address(addr: Address) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[12..].copy_from_slice(addr.as_slice());
    word
}

fn pack_validity_window(valid_after: u64, valid_until: u64, signatures: Bytes) -> Bytes {
    let mut packed = Vec::with_capacity(12 + signatures.len());
    packed.extend_from_slice(&valid_after.to_be_bytes()[2..]);
    packed.extend_from_slice(&valid_until.to_be_bytes()[2..]);
    packed.extend_from_slice(&signatures);
    Bytes::from(packed)
}

/// SafeOp for Safe4337Module v0.2.0 / EntryPoint v0.6
#[derive(Debug, Clone)]
pub struct SafeOperationV06 {
    user_operation: UserOperationV06,
    options: SafeOperationOptions,
    signatures: BTreeMap<Address, SafeSignature>,
}

impl SafeOperationV06 {
    /// Wraps a v0.6 user operation with its module context
    pub fn new(user_operation: UserOperationV06, options: SafeOperationOptions) -> Self {
        Self {
            user_operation,
            options,
            signatures: BTreeMap::new(),
        }
    }

    /// The module context
    pub fn options(&self) -> &SafeOperationOptions {
        &self.options
    }

    /// Number of owner signatures recorded so far
    pub fn signature_count(&self) -> usize {
        self.signatures.len()
    }

    /// Returns the user operation with the current packed signature applied,
    /// ready for bundler submission
    pub fn get_user_operation(&self) -> UserOperationV06 {
        let mut op = self.user_operation.clone();
        op.signature = self.packed_signature();
        op
    }

    /// Struct hash of the v0.6 SafeOp
    fn struct_hash(&self) -> B256 {
        let op = &self.user_operation;
        let mut encoded = Vec::with_capacity(14 * 32);
        encoded.extend_from_slice(safe_op_v06_typehash().as_slice());
        encoded.extend_from_slice(&word_from_address(op.sender));
        encoded.extend_from_slice(&op.nonce.to_be_bytes::<32>());
        encoded.extend_from_slice(keccak256(&op.init_code).as_slice());
        encoded.extend_from_slice(keccak256(&op.call_data).as_slice());
        encoded.extend_from_slice(&op.call_gas_limit.to_be_bytes::<32>());
        encoded.extend_from_slice(&op.verification_gas_limit.to_be_bytes::<32>());
        encoded.extend_from_slice(&op.pre_verification_gas.to_be_bytes::<32>());
        encoded.extend_from_slice(&op.max_fee_per_gas.to_be_bytes::<32>());
        encoded.extend_from_slice(&op.max_priority_fee_per_gas.to_be_bytes::<32>());
        encoded.extend_from_slice(keccak256(&op.paymaster_and_data).as_slice());
        encoded.extend_from_slice(&U256::from(self.options.valid_after).to_be_bytes::<32>());
        encoded.extend_from_slice(&U256::from(self.options.valid_until).to_be_bytes::<32>());
        encoded.extend_from_slice(&word_from_address(self.options.entry_point));
        keccak256(&encoded)
    }
}

impl SafeOperation for SafeOperationV06 {
    fn add_estimations(&mut self, estimations: &GasEstimation) {
        let op = &mut self.user_operation;
        if let Some(v) = estimations.call_gas_limit {
            op.call_gas_limit = v;
        }
        if let Some(v) = estimations.verification_gas_limit {
            op.verification_gas_limit = v;
        }
        if let Some(v) = estimations.pre_verification_gas {
            op.pre_verification_gas = v;
        }
        if let Some(v) = estimations.max_fee_per_gas {
            op.max_fee_per_gas = v;
        }
        if let Some(v) = estimations.max_priority_fee_per_gas {
            op.max_priority_fee_per_gas = v;
        }
    }

    fn add_signature(&mut self, signature: SafeSignature) {
        self.signatures.insert(signature.signer, signature);
    }

    fn encoded_signatures(&self) -> Bytes {
        encode_signatures(self.signatures.values())
    }

    fn packed_signature(&self) -> Bytes {
        pack_validity_window(
            self.options.valid_after,
            self.options.valid_until,
            self.encoded_signatures(),
        )
    }

    fn operation_hash(&self) -> B256 {
        let domain =
            compute_chain_domain_separator(self.options.chain_id, self.options.module_address);
        compute_transaction_hash(domain, self.struct_hash())
    }

    fn eip712_type(&self) -> &'static str {
        SAFE_OP_V06_TYPE
    }
}

/// SafeOp for Safe4337Module v0.3.0 / EntryPoint v0.7
#[derive(Debug, Clone)]
pub struct SafeOperationV07 {
    user_operation: UserOperationV07,
    options: SafeOperationOptions,
    signatures: BTreeMap<Address, SafeSignature>,
}

impl SafeOperationV07 {
    /// Wraps a v0.7 user operation with its module context
    pub fn new(user_operation: UserOperationV07, options: SafeOperationOptions) -> Self {
        Self {
            user_operation,
            options,
            signatures: BTreeMap::new(),
        }
    }

    /// The module context
    pub fn options(&self) -> &SafeOperationOptions {
        &self.options
    }

    /// Number of owner signatures recorded so far
    pub fn signature_count(&self) -> usize {
        self.signatures.len()
    }

    /// Returns the user operation with the current packed signature applied,
    /// ready for bundler submission
    pub fn get_user_operation(&self) -> UserOperationV07 {
        let mut op = self.user_operation.clone();
        op.signature = self.packed_signature();
        op
    }

    /// Struct hash of the v0.7 SafeOp. Gas fields are uint128 in the type
    /// string but still occupy full words in the ABI encoding; only the field
    /// order changes from v0.6.
    fn struct_hash(&self) -> B256 {
        let op = &self.user_operation;
        let mut encoded = Vec::with_capacity(14 * 32);
        encoded.extend_from_slice(safe_op_v07_typehash().as_slice());
        encoded.extend_from_slice(&word_from_address(op.sender));
        encoded.extend_from_slice(&op.nonce.to_be_bytes::<32>());
        encoded.extend_from_slice(keccak256(op.init_code()).as_slice());
        encoded.extend_from_slice(keccak256(&op.call_data).as_slice());
        encoded.extend_from_slice(&op.verification_gas_limit.to_be_bytes::<32>());
        encoded.extend_from_slice(&op.call_gas_limit.to_be_bytes::<32>());
        encoded.extend_from_slice(&op.pre_verification_gas.to_be_bytes::<32>());
        encoded.extend_from_slice(&op.max_priority_fee_per_gas.to_be_bytes::<32>());
        encoded.extend_from_slice(&op.max_fee_per_gas.to_be_bytes::<32>());
        encoded.extend_from_slice(keccak256(op.paymaster_and_data()).as_slice());
        encoded.extend_from_slice(&U256::from(self.options.valid_after).to_be_bytes::<32>());
        encoded.extend_from_slice(&U256::from(self.options.valid_until).to_be_bytes::<32>());
        encoded.extend_from_slice(&word_from_address(self.options.entry_point));
        keccak256(&encoded)
    }
}

impl SafeOperation for SafeOperationV07 {
    fn add_estimations(&mut self, estimations: &GasEstimation) {
        let op = &mut self.user_operation;
        if let Some(v) = estimations.call_gas_limit {
            op.call_gas_limit = v;
        }
        if let Some(v) = estimations.verification_gas_limit {
            op.verification_gas_limit = v;
        }
        if let Some(v) = estimations.pre_verification_gas {
            op.pre_verification_gas = v;
        }
        if let Some(v) = estimations.max_fee_per_gas {
            op.max_fee_per_gas = v;
        }
        if let Some(v) = estimations.max_priority_fee_per_gas {
            op.max_priority_fee_per_gas = v;
        }
        if let Some(v) = estimations.paymaster_verification_gas_limit {
            op.paymaster_verification_gas_limit = v;
        }
        if let Some(v) = estimations.paymaster_post_op_gas_limit {
            op.paymaster_post_op_gas_limit = v;
        }
    }

    fn add_signature(&mut self, signature: SafeSignature) {
        self.signatures.insert(signature.signer, signature);
    }

    fn encoded_signatures(&self) -> Bytes {
        encode_signatures(self.signatures.values())
    }

    fn packed_signature(&self) -> Bytes {
        pack_validity_window(
            self.options.valid_after,
            self.options.valid_until,
            self.encoded_signatures(),
        )
    }

    fn operation_hash(&self) -> B256 {
        let domain =
            compute_chain_domain_separator(self.options.chain_id, self.options.module_address);
        compute_transaction_hash(domain, self.struct_hash())
    }

    fn eip712_type(&self) -> &'static str {
        SAFE_OP_V07_TYPE
    }
}
