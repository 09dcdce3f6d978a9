//! Deterministic byte-level encodings owned by the core

mod eip712;
mod multisend;
mod pad;

pub use eip712::{
    compute_chain_domain_separator, compute_domain_separator, compute_safe_transaction_hash,
    compute_safe_tx_struct_hash, compute_transaction_hash,
};
pub use multisend::{
    decode_multi_send, encode_multi_send, encode_multi_send_call_only, encode_transaction,
};
pub use pad::{derive_tracking_address, pad_hex};
