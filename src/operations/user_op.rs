//! ERC-4337 user operations for both EntryPoint generations
//!
//! v0.6 carries flat gas fields plus opaque `initCode`/`paymasterAndData`
//! blobs. v0.7 splits deployment into `factory`/`factoryData`, breaks the
//! paymaster blob into addressed fields, and packs gas limits pairwise into
//! 32-byte words for on-chain submission.

use alloy::primitives::{Address, Bytes, U256};
use serde::{Deserialize, Serialize};

use crate::contracts::{PackedUserOperationV06, PackedUserOperationV07};

/// UserOperation for EntryPoint v0.6
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserOperationV06 {
    /// The account sending the operation (the Safe)
    pub sender: Address,
    /// Packed 2D nonce
    pub nonce: U256,
    /// Factory address + deployment calldata, empty for deployed accounts
    pub init_code: Bytes,
    /// Calldata executed by the account
    pub call_data: Bytes,
    /// Gas limit for the execution phase
    pub call_gas_limit: U256,
    /// Gas limit for the validation phase
    pub verification_gas_limit: U256,
    /// Gas paid to the bundler for pre-execution overhead
    pub pre_verification_gas: U256,
    /// EIP-1559 max fee
    pub max_fee_per_gas: U256,
    /// EIP-1559 priority fee
    pub max_priority_fee_per_gas: U256,
    /// Paymaster address + data, empty when self-funded
    pub paymaster_and_data: Bytes,
    /// Module signature: validAfter || validUntil || owner signatures
    pub signature: Bytes,
}

impl UserOperationV06 {
    /// Converts to the sol struct submitted to the EntryPoint
    pub fn to_packed(&self) -> PackedUserOperationV06 {
        PackedUserOperationV06 {
            sender: self.sender,
            nonce: self.nonce,
            initCode: self.init_code.clone(),
            callData: self.call_data.clone(),
            callGasLimit: self.call_gas_limit,
            verificationGasLimit: self.verification_gas_limit,
            preVerificationGas: self.pre_verification_gas,
            maxFeePerGas: self.max_fee_per_gas,
            maxPriorityFeePerGas: self.max_priority_fee_per_gas,
            paymasterAndData: self.paymaster_and_data.clone(),
            signature: self.signature.clone(),
        }
    }
}

/// UserOperation for EntryPoint v0.7
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserOperationV07 {
    /// The account sending the operation (the Safe)
    pub sender: Address,
    /// Packed 2D nonce
    pub nonce: U256,
    /// Account factory, `None` for deployed accounts
    pub factory: Option<Address>,
    /// Calldata passed to the factory
    pub factory_data: Bytes,
    /// Calldata executed by the account
    pub call_data: Bytes,
    /// Gas limit for the execution phase
    pub call_gas_limit: U256,
    /// Gas limit for the validation phase
    pub verification_gas_limit: U256,
    /// Gas paid to the bundler for pre-execution overhead
    pub pre_verification_gas: U256,
    /// EIP-1559 max fee
    pub max_fee_per_gas: U256,
    /// EIP-1559 priority fee
    pub max_priority_fee_per_gas: U256,
    /// Paymaster address, `None` when self-funded
    pub paymaster: Option<Address>,
    /// Gas limit for paymaster validation
    pub paymaster_verification_gas_limit: U256,
    /// Gas limit for the paymaster post-op call
    pub paymaster_post_op_gas_limit: U256,
    /// Extra paymaster calldata
    pub paymaster_data: Bytes,
    /// Module signature: validAfter || validUntil || owner signatures
    pub signature: Bytes,
}

impl UserOperationV07 {
    /// Rebuilds the v0.6-style `initCode` blob: factory address followed by
    /// its calldata, or empty when no deployment is needed
    pub fn init_code(&self) -> Bytes {
        match self.factory {
            None => Bytes::default(),
            Some(factory) => {
                let mut blob = Vec::with_capacity(20 + self.factory_data.len());
                blob.extend_from_slice(factory.as_slice());
                blob.extend_from_slice(&self.factory_data);
                Bytes::from(blob)
            }
        }
    }

    /// Packs paymaster fields into the on-chain blob:
    /// paymaster (20) || verificationGasLimit (16) || postOpGasLimit (16) || data
    pub fn paymaster_and_data(&self) -> Bytes {
        let Some(paymaster) = self.paymaster else {
            return Bytes::default();
        };

        let mut blob = Vec::with_capacity(20 + 16 + 16 + self.paymaster_data.len());
        blob.extend_from_slice(paymaster.as_slice());
        blob.extend_from_slice(&self.paymaster_verification_gas_limit.to_be_bytes::<32>()[16..]);
        blob.extend_from_slice(&self.paymaster_post_op_gas_limit.to_be_bytes::<32>()[16..]);
        blob.extend_from_slice(&self.paymaster_data);
        Bytes::from(blob)
    }

    /// Converts to the packed sol struct submitted to the EntryPoint
    pub fn to_packed(&self) -> PackedUserOperationV07 {
        PackedUserOperationV07 {
            sender: self.sender,
            nonce: self.nonce,
            initCode: self.init_code(),
            callData: self.call_data.clone(),
            accountGasLimits: pack_account_gas_limits(
                self.verification_gas_limit,
                self.call_gas_limit,
            )
            .into(),
            preVerificationGas: self.pre_verification_gas,
            gasFees: pack_gas_fees(self.max_priority_fee_per_gas, self.max_fee_per_gas).into(),
            paymasterAndData: self.paymaster_and_data(),
            signature: self.signature.clone(),
        }
    }
}

/// A user operation of either EntryPoint generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserOperation {
    /// EntryPoint v0.6 shape
    V06(UserOperationV06),
    /// EntryPoint v0.7 shape
    V07(UserOperationV07),
}

/// Packs gas limits for v0.7: verificationGasLimit (16 bytes) || callGasLimit (16 bytes)
pub fn pack_account_gas_limits(verification_gas_limit: U256, call_gas_limit: U256) -> [u8; 32] {
    let mut packed = [0u8; 32];
    packed[..16].copy_from_slice(&verification_gas_limit.to_be_bytes::<32>()[16..]);
    packed[16..].copy_from_slice(&call_gas_limit.to_be_bytes::<32>()[16..]);
    packed
}

/// Packs fees for v0.7: maxPriorityFeePerGas (16 bytes) || maxFeePerGas (16 bytes)
pub fn pack_gas_fees(max_priority_fee_per_gas: U256, max_fee_per_gas: U256) -> [u8; 32] {
    let mut packed = [0u8; 32];
    packed[..16].copy_from_slice(&max_priority_fee_per_gas.to_be_bytes::<32>()[16..]);
    packed[16..].copy_from_slice(&max_fee_per_gas.to_be_bytes::<32>()[16..]);
    packed
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    #[test]
    fn test_pack_account_gas_limits() {
        let packed = pack_account_gas_limits(U256::from(0x0102), U256::from(0x0304));
        assert_eq!(packed[14..16], [0x01, 0x02]);
        assert_eq!(packed[30..32], [0x03, 0x04]);
        assert!(packed[..14].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_pack_gas_fees() {
        let packed = pack_gas_fees(U256::from(2_000_000_000u64), U256::from(30_000_000_000u64));
        assert_eq!(
            U256::from_be_slice(&packed[..16]),
            U256::from(2_000_000_000u64)
        );
        assert_eq!(
            U256::from_be_slice(&packed[16..]),
            U256::from(30_000_000_000u64)
        );
    }

    #[test]
    fn test_v07_init_code_without_factory() {
        let op = UserOperationV07::default();
        assert!(op.init_code().is_empty());
    }

    #[test]
    fn test_v07_init_code_with_factory() {
        let factory = address!("0x1111111111111111111111111111111111111111");
        let op = UserOperationV07 {
            factory: Some(factory),
            factory_data: Bytes::from(vec![0xaa, 0xbb]),
            ..Default::default()
        };

        let init_code = op.init_code();
        assert_eq!(&init_code[..20], factory.as_slice());
        assert_eq!(&init_code[20..], &[0xaa, 0xbb]);
    }

    #[test]
    fn test_v07_paymaster_and_data_layout() {
        let paymaster = address!("0x2222222222222222222222222222222222222222");
        let op = UserOperationV07 {
            paymaster: Some(paymaster),
            paymaster_verification_gas_limit: U256::from(0x10),
            paymaster_post_op_gas_limit: U256::from(0x20),
            paymaster_data: Bytes::from(vec![0x01, 0x02, 0x03]),
            ..Default::default()
        };

        let blob = op.paymaster_and_data();
        assert_eq!(blob.len(), 20 + 16 + 16 + 3);
        assert_eq!(&blob[..20], paymaster.as_slice());
        assert_eq!(blob[35], 0x10);
        assert_eq!(blob[51], 0x20);
        assert_eq!(&blob[52..], &[0x01, 0x02, 0x03]);

        let unfunded = UserOperationV07::default();
        assert!(unfunded.paymaster_and_data().is_empty());
    }

    #[test]
    fn test_v06_to_packed_is_lossless() {
        let op = UserOperationV06 {
            sender: address!("0x3333333333333333333333333333333333333333"),
            nonce: U256::from(7),
            call_data: Bytes::from(vec![0x01]),
            call_gas_limit: U256::from(100_000),
            ..Default::default()
        };

        let packed = op.to_packed();
        assert_eq!(packed.sender, op.sender);
        assert_eq!(packed.nonce, op.nonce);
        assert_eq!(packed.callGasLimit, op.call_gas_limit);
    }
}
