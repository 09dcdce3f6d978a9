//! Safe transaction data and in-flight signature collection

use std::collections::BTreeMap;

use alloy::primitives::{Address, Bytes, U256};
use serde::{Deserialize, Serialize};

use super::Operation;
use crate::signing::{encode_signatures, SafeSignature};

/// The full EIP-712 SafeTx field set. Immutable once hashed: the nonce must
/// match the Safe's on-chain nonce at execution time or the contract reverts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafeTransactionData {
    /// Target address
    pub to: Address,
    /// Value to send
    pub value: U256,
    /// Calldata
    pub data: Bytes,
    /// Operation type
    pub operation: Operation,
    /// Gas limit for the inner Safe transaction
    pub safe_tx_gas: U256,
    /// Base gas (overhead outside the inner call)
    pub base_gas: U256,
    /// Gas price for refund calculation
    pub gas_price: U256,
    /// Token used for gas refund (address(0) for ETH)
    pub gas_token: Address,
    /// Address receiving the gas refund
    pub refund_receiver: Address,
    /// Safe nonce
    pub nonce: U256,
}

impl SafeTransactionData {
    /// Creates transaction data with zeroed gas/refund fields
    pub fn new(to: Address, value: U256, data: impl Into<Bytes>, operation: Operation) -> Self {
        Self {
            to,
            value,
            data: data.into(),
            operation,
            safe_tx_gas: U256::ZERO,
            base_gas: U256::ZERO,
            gas_price: U256::ZERO,
            gas_token: Address::ZERO,
            refund_receiver: Address::ZERO,
            nonce: U256::ZERO,
        }
    }

    /// Sets the safe transaction gas
    pub fn with_safe_tx_gas(mut self, gas: U256) -> Self {
        self.safe_tx_gas = gas;
        self
    }

    /// Sets the base gas
    pub fn with_base_gas(mut self, gas: U256) -> Self {
        self.base_gas = gas;
        self
    }

    /// Sets the refund gas price
    pub fn with_gas_price(mut self, gas_price: U256) -> Self {
        self.gas_price = gas_price;
        self
    }

    /// Sets the refund token
    pub fn with_gas_token(mut self, gas_token: Address) -> Self {
        self.gas_token = gas_token;
        self
    }

    /// Sets the refund receiver
    pub fn with_refund_receiver(mut self, refund_receiver: Address) -> Self {
        self.refund_receiver = refund_receiver;
        self
    }

    /// Sets the nonce
    pub fn with_nonce(mut self, nonce: U256) -> Self {
        self.nonce = nonce;
        self
    }
}

/// A Safe transaction being assembled: immutable transaction data plus the
/// signatures collected so far, keyed by signer address.
///
/// The map holds at most one signature per signer; adding a second signature
/// for the same signer replaces the first.
#[derive(Debug, Clone)]
pub struct SafeTransaction {
    /// The transaction fields covered by the EIP-712 hash
    pub data: SafeTransactionData,
    signatures: BTreeMap<Address, SafeSignature>,
}

impl SafeTransaction {
    /// Wraps transaction data with an empty signature set
    pub fn new(data: SafeTransactionData) -> Self {
        Self {
            data,
            signatures: BTreeMap::new(),
        }
    }

    /// Adds or replaces the signature for its signer
    pub fn add_signature(&mut self, signature: SafeSignature) {
        self.signatures.insert(signature.signer, signature);
    }

    /// Returns the signature for a signer, if collected
    pub fn signature_for(&self, signer: Address) -> Option<&SafeSignature> {
        self.signatures.get(&signer)
    }

    /// Returns the collected signatures in ascending signer-address order
    pub fn signatures(&self) -> impl Iterator<Item = &SafeSignature> {
        self.signatures.values()
    }

    /// Number of distinct signers collected
    pub fn signature_count(&self) -> usize {
        self.signatures.len()
    }

    /// Produces the signature blob expected by `execTransaction`: static
    /// parts sorted ascending by signer address, dynamic parts appended
    pub fn encoded_signatures(&self) -> Bytes {
        encode_signatures(self.signatures.values())
    }
}
