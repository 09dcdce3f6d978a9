//! Canonical signature representation and aggregation
//!
//! The Safe contract verifies signatures as one blob: the 65-byte static
//! parts of all signatures concatenated in ascending signer-address order,
//! followed by the dynamic parts of contract and passkey signatures. The
//! verification loop walks owners in address order, so emitting signatures
//! out of order makes the contract reject the whole batch.

use alloy::primitives::{Address, Bytes, U256};
use serde::{Deserialize, Serialize};

/// How a signature was produced, which determines its wire layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignatureKind {
    /// 65-byte ECDSA signature over the EIP-712 hash (v = 27/28)
    Eoa,
    /// 65-byte ECDSA signature over the EIP-191 prefixed hash (v = 31/32)
    EthSign,
    /// On-chain approved hash marker (v = 1)
    ApprovedHash,
    /// EIP-1271 contract signature, dynamic length (v = 0)
    Contract,
    /// WebAuthn/passkey signature, dynamic length (v = 0)
    Passkey,
}

/// A single owner's signature over a Safe transaction or operation hash
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafeSignature {
    /// The owner this signature belongs to
    pub signer: Address,
    /// Raw signature bytes: 65 bytes for static kinds, arbitrary length
    /// for contract and passkey signatures
    pub data: Bytes,
    /// Signature kind
    pub kind: SignatureKind,
}

impl SafeSignature {
    /// Creates a signature record
    pub fn new(signer: Address, data: impl Into<Bytes>, kind: SignatureKind) -> Self {
        Self {
            signer,
            data: data.into(),
            kind,
        }
    }

    /// Whether this signature carries a dynamic part in the aggregate blob
    pub fn is_dynamic(&self) -> bool {
        matches!(self.kind, SignatureKind::Contract | SignatureKind::Passkey)
    }

    /// Returns the 65-byte static part.
    ///
    /// For static kinds this is the signature itself. For dynamic kinds it is
    /// a pointer record: signer address left-padded to 32 bytes, the byte
    /// offset of the dynamic part within the blob, and the 0x00 type marker.
    pub fn static_part(&self, dynamic_offset: usize) -> Vec<u8> {
        if self.is_dynamic() {
            let mut part = Vec::with_capacity(65);
            let mut signer_word = [0u8; 32];
            signer_word[12..].copy_from_slice(self.signer.as_slice());
            part.extend_from_slice(&signer_word);
            part.extend_from_slice(&U256::from(dynamic_offset).to_be_bytes::<32>());
            part.push(0x00);
            part
        } else {
            self.data.to_vec()
        }
    }

    /// Returns the dynamic part: a 32-byte length word followed by the raw
    /// signature bytes. The bytes keep their exact length, only the length
    /// word is a full 32-byte field. Empty for static kinds.
    pub fn dynamic_part(&self) -> Vec<u8> {
        if !self.is_dynamic() {
            return Vec::new();
        }
        let mut part = Vec::with_capacity(32 + self.data.len());
        part.extend_from_slice(&U256::from(self.data.len()).to_be_bytes::<32>());
        part.extend_from_slice(&self.data);
        part
    }
}

/// Aggregates signatures into the single blob `execTransaction` expects.
///
/// Signatures are sorted ascending by signer address (as a 160-bit integer)
/// regardless of iteration order, so the output is invariant under
/// permutation of insertion order.
pub fn encode_signatures<'a>(signatures: impl Iterator<Item = &'a SafeSignature>) -> Bytes {
    let mut sorted: Vec<&SafeSignature> = signatures.collect();
    sorted.sort_by_key(|sig| sig.signer);

    let static_len = 65 * sorted.len();
    let mut static_region = Vec::with_capacity(static_len);
    let mut dynamic_region = Vec::new();

    for sig in &sorted {
        static_region.extend_from_slice(&sig.static_part(static_len + dynamic_region.len()));
        dynamic_region.extend_from_slice(&sig.dynamic_part());
    }

    static_region.extend_from_slice(&dynamic_region);
    Bytes::from(static_region)
}
