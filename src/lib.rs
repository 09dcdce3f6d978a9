//! # safe-core
//!
//! Encoding and signing core for Safe smart-account wallets, covering
//! contract versions 1.1.1 through 1.5.0.
//!
//! The crate resolves versioned contract deployments, batches calls through
//! MultiSend, computes the version-correct EIP-712 transaction hashes,
//! aggregates owner signatures into the blob `execTransaction` verifies, and
//! builds ERC-4337 SafeOps for both EntryPoint generations.
//!
//! ## Example
//!
//! ```no_run
//! use alloy::primitives::{address, U256};
//! use safe_core::encoding::{compute_safe_transaction_hash, encode_multi_send};
//! use safe_core::registry::SafeVersion;
//! use safe_core::types::{MetaTransactionData, SafeTransaction, SafeTransactionData, Operation};
//!
//! # fn main() -> safe_core::Result<()> {
//! let transfer = MetaTransactionData::call(
//!     address!("0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48"),
//!     vec![],
//! );
//! let batch = encode_multi_send(&[transfer])?;
//!
//! let safe = address!("0x1234567890123456789012345678901234567890");
//! let tx = SafeTransactionData::new(safe, U256::ZERO, batch, Operation::DelegateCall);
//! let hash = compute_safe_transaction_hash(SafeVersion::V1_4_1, 1, safe, &tx);
//! # let _ = hash;
//! # Ok(())
//! # }
//! ```

pub mod contracts;
pub mod create2;
pub mod encoding;
pub mod error;
pub mod facade;
pub mod operations;
pub mod provider;
pub mod registry;
pub mod signing;
pub mod types;

pub use error::{Error, Result};

pub use create2::{
    compute_create2_address, compute_proxy_address, encode_setup_call, proxy_init_code_hash,
    SafeSetupConfig,
};
pub use facade::{
    CreateCallContract, FallbackHandlerContract, MultiSendContract, SafeContract,
    SafeProxyFactoryContract, SignMessageLibContract, SimulateTxAccessorContract,
};
pub use provider::{ChainProvider, RpcProvider, SafeSigner};
pub use registry::{ContractDescriptor, ContractFamily, ContractRegistry, SafeVersion};
pub use signing::{SafeSignature, SignatureKind};
pub use types::{
    MetaTransactionData, Operation, SafeCall, SafeTransaction, SafeTransactionData, TypedCall,
};
