//! Error types for safe-core

use alloy::primitives::Address;
use thiserror::Error;

use crate::registry::{ContractFamily, SafeVersion};

/// Result type alias for safe-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when encoding, resolving or signing Safe transactions
#[derive(Debug, Error)]
pub enum Error {
    /// No contract descriptor exists for the requested (family, version) pair
    #[error("No {family} deployment descriptor for version {version}")]
    UnsupportedVersion {
        /// Contract family that was requested
        family: ContractFamily,
        /// Version that was requested
        version: SafeVersion,
    },

    /// The resolved descriptor has no address for the requested chain
    #[error("No {family} v{version} deployment address for chain {chain_id}")]
    NoDeploymentAddress {
        /// Contract family that was resolved
        family: ContractFamily,
        /// Version that was resolved
        version: SafeVersion,
        /// Chain the lookup was made for
        chain_id: u64,
    },

    /// A DelegateCall was routed through a call-only batching path
    #[error("MultiSendCallOnly cannot batch DelegateCall operations (call #{index} to {to})")]
    InvalidOperation {
        /// Position of the offending call in the batch
        index: usize,
        /// Target of the offending call
        to: Address,
    },

    /// Fixed-size padding target is smaller than the data being padded
    #[error("Value length {len} exceeds the {max}-byte ({hex_chars} hex char) padding target")]
    EncodingSize {
        /// Hex-digit length of the value being padded
        len: usize,
        /// Requested field width in bytes
        max: usize,
        /// Requested field width in hex characters
        hex_chars: usize,
    },

    /// The entry-point address is not a registered v0.6 or v0.7 deployment
    #[error("Unknown ERC-4337 entry point {0}, expected a registered v0.6 or v0.7 address")]
    UnknownEntryPoint(Address),

    /// A 4337 nonce component does not fit its bit width
    #[error("Nonce {field} does not fit in {bits} bits")]
    NonceOverflow {
        /// Which nonce component overflowed
        field: &'static str,
        /// Bit width of the component
        bits: u32,
    },

    /// A SafeOp validity timestamp does not fit the uint48 the module expects
    #[error("Validity timestamp {field} does not fit in 48 bits")]
    ValidityOverflow {
        /// Which timestamp overflowed
        field: &'static str,
    },

    /// The user operation shape does not match the entry point generation
    #[error("A {expected} user operation is required for entry point {entry_point}")]
    EntryPointMismatch {
        /// Expected user operation shape
        expected: &'static str,
        /// The resolved entry point
        entry_point: Address,
    },

    /// Failed to reach the RPC provider
    #[error("Provider error: {0}")]
    Provider(String),

    /// Failed to fetch data from the blockchain
    #[error("Failed to fetch {what}: {reason}")]
    Fetch {
        /// What was being fetched
        what: &'static str,
        /// Underlying failure
        reason: String,
    },

    /// Safe contract not deployed at the given address
    #[error("Safe not deployed at {0}")]
    SafeNotDeployed(Address),

    /// Signature generation failed
    #[error("Failed to sign: {0}")]
    Signing(String),

    /// Encoding error
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// No calls supplied to a batch encoder
    #[error("No calls added to batch")]
    NoCalls,
}

impl From<alloy::transports::RpcError<alloy::transports::TransportErrorKind>> for Error {
    fn from(err: alloy::transports::RpcError<alloy::transports::TransportErrorKind>) -> Self {
        Error::Provider(err.to_string())
    }
}

impl From<alloy::contract::Error> for Error {
    fn from(err: alloy::contract::Error) -> Self {
        Error::Provider(err.to_string())
    }
}

impl From<alloy::signers::Error> for Error {
    fn from(err: alloy::signers::Error) -> Self {
        Error::Signing(err.to_string())
    }
}
