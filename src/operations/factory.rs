//! Entry-point resolution and SafeOp construction
//!
//! The entry-point address decides everything downstream: which user
//! operation shape is accepted, which Safe4337Module verifies the signature
//! and which SafeOp type string owners sign. An address that is not a
//! registered deployment fails resolution outright rather than being treated
//! as some default generation.

use alloy::primitives::{Address, Bytes, B256};

use crate::contracts::{
    ENTRYPOINT_V06_ADDRESS, ENTRYPOINT_V07_ADDRESS, SAFE_4337_MODULE_V06, SAFE_4337_MODULE_V07,
};
use crate::error::{Error, Result};
use crate::signing::SafeSignature;

use super::safe_op::{
    GasEstimation, SafeOperation, SafeOperationOptions, SafeOperationV06, SafeOperationV07,
};
use super::user_op::UserOperation;

const MAX_VALIDITY_TIMESTAMP: u64 = (1 << 48) - 1;

/// EntryPoint contract generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryPointVersion {
    /// EntryPoint v0.6, paired with Safe4337Module v0.2.0
    V06,
    /// EntryPoint v0.7, paired with Safe4337Module v0.3.0
    V07,
}

impl EntryPointVersion {
    /// Resolves the generation from a deployed entry-point address.
    ///
    /// Unrecognized addresses are an error: guessing a generation would
    /// produce hashes the paired module rejects.
    pub fn from_address(entry_point: Address) -> Result<Self> {
        if entry_point == ENTRYPOINT_V06_ADDRESS {
            Ok(Self::V06)
        } else if entry_point == ENTRYPOINT_V07_ADDRESS {
            Ok(Self::V07)
        } else {
            Err(Error::UnknownEntryPoint(entry_point))
        }
    }

    /// The canonical entry-point address of this generation
    pub fn address(&self) -> Address {
        match self {
            Self::V06 => ENTRYPOINT_V06_ADDRESS,
            Self::V07 => ENTRYPOINT_V07_ADDRESS,
        }
    }

    /// The Safe4337Module deployment paired with this generation
    pub fn module_address(&self) -> Address {
        match self {
            Self::V06 => SAFE_4337_MODULE_V06,
            Self::V07 => SAFE_4337_MODULE_V07,
        }
    }
}

/// A SafeOp of either generation behind one interface
#[derive(Debug, Clone)]
pub enum AnySafeOperation {
    /// Module v0.2.0 operation
    V06(SafeOperationV06),
    /// Module v0.3.0 operation
    V07(SafeOperationV07),
}

impl AnySafeOperation {
    /// The wrapped user operation with the current packed signature applied
    pub fn get_user_operation(&self) -> UserOperation {
        match self {
            Self::V06(op) => UserOperation::V06(op.get_user_operation()),
            Self::V07(op) => UserOperation::V07(op.get_user_operation()),
        }
    }
}

impl SafeOperation for AnySafeOperation {
    fn add_estimations(&mut self, estimations: &GasEstimation) {
        match self {
            Self::V06(op) => op.add_estimations(estimations),
            Self::V07(op) => op.add_estimations(estimations),
        }
    }

    fn add_signature(&mut self, signature: SafeSignature) {
        match self {
            Self::V06(op) => op.add_signature(signature),
            Self::V07(op) => op.add_signature(signature),
        }
    }

    fn encoded_signatures(&self) -> Bytes {
        match self {
            Self::V06(op) => op.encoded_signatures(),
            Self::V07(op) => op.encoded_signatures(),
        }
    }

    fn packed_signature(&self) -> Bytes {
        match self {
            Self::V06(op) => op.packed_signature(),
            Self::V07(op) => op.packed_signature(),
        }
    }

    fn operation_hash(&self) -> B256 {
        match self {
            Self::V06(op) => op.operation_hash(),
            Self::V07(op) => op.operation_hash(),
        }
    }

    fn eip712_type(&self) -> &'static str {
        match self {
            Self::V06(op) => op.eip712_type(),
            Self::V07(op) => op.eip712_type(),
        }
    }
}

/// Builds a SafeOp for the generation the options' entry point belongs to.
///
/// The user operation shape must match the resolved generation, and the
/// validity window must fit the module's uint48 timestamps.
pub fn new_safe_operation(
    user_operation: UserOperation,
    options: SafeOperationOptions,
) -> Result<AnySafeOperation> {
    if options.valid_after > MAX_VALIDITY_TIMESTAMP {
        return Err(Error::ValidityOverflow {
            field: "valid_after",
        });
    }
    if options.valid_until > MAX_VALIDITY_TIMESTAMP {
        return Err(Error::ValidityOverflow {
            field: "valid_until",
        });
    }

    let version = EntryPointVersion::from_address(options.entry_point)?;

    match (version, user_operation) {
        (EntryPointVersion::V06, UserOperation::V06(op)) => {
            Ok(AnySafeOperation::V06(SafeOperationV06::new(op, options)))
        }
        (EntryPointVersion::V07, UserOperation::V07(op)) => {
            Ok(AnySafeOperation::V07(SafeOperationV07::new(op, options)))
        }
        (EntryPointVersion::V06, UserOperation::V07(_)) => Err(Error::EntryPointMismatch {
            expected: "v0.6",
            entry_point: options.entry_point,
        }),
        (EntryPointVersion::V07, UserOperation::V06(_)) => Err(Error::EntryPointMismatch {
            expected: "v0.7",
            entry_point: options.entry_point,
        }),
    }
}
