//! Signature model: canonical representation, aggregation and validation

mod ecdsa;
mod eip1271;
mod signature;

pub use ecdsa::{approved_hash_signature, sign_eth_message, sign_safe_hash, validate_signature_bytes};
pub use eip1271::is_valid_eip1271_signature;
pub use signature::{encode_signatures, SafeSignature, SignatureKind};
