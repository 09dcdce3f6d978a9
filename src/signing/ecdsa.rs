//! ECDSA signature generation for Safe transactions

use alloy::primitives::{Address, Bytes, B256};
use alloy::signers::Signer;

use crate::error::{Error, Result};

use super::{SafeSignature, SignatureKind};

/// Signs an EIP-712 hash and formats it for Safe
///
/// Safe expects signatures in the format: r (32 bytes) || s (32 bytes) || v (1 byte)
/// where v is adjusted to be 27 or 28
pub async fn sign_safe_hash<S: Signer>(signer: &S, hash: B256) -> Result<Bytes> {
    let signature = signer.sign_hash(&hash).await?;

    let r = signature.r();
    let s = signature.s();
    let v = signature.v();

    // v is a bool (y_parity) in alloy - true means odd (28), false means even (27)
    let v_byte = if v { 28u8 } else { 27u8 };

    let mut sig_bytes = Vec::with_capacity(65);
    sig_bytes.extend_from_slice(&r.to_be_bytes::<32>());
    sig_bytes.extend_from_slice(&s.to_be_bytes::<32>());
    sig_bytes.push(v_byte);

    Ok(Bytes::from(sig_bytes))
}

/// Signs a hash as an EIP-191 prefixed message and formats it for Safe
///
/// The "\x19Ethereum Signed Message:\n32" prefix is applied before signing
/// and v is shifted to 31/32 so the contract knows to re-apply the prefix
/// during verification.
pub async fn sign_eth_message<S: Signer + Sync>(signer: &S, hash: B256) -> Result<Bytes> {
    let signature = signer.sign_message(hash.as_slice()).await?;

    let r = signature.r();
    let s = signature.s();
    let v = signature.v();

    // eth_sign signatures carry v = 27/28 + 4
    let v_byte = if v { 32u8 } else { 31u8 };

    let mut sig_bytes = Vec::with_capacity(65);
    sig_bytes.extend_from_slice(&r.to_be_bytes::<32>());
    sig_bytes.extend_from_slice(&s.to_be_bytes::<32>());
    sig_bytes.push(v_byte);

    Ok(Bytes::from(sig_bytes))
}

/// Builds the signature marker for an owner that approved the hash on-chain
/// via `approveHash`: r = owner address, s = 0, v = 1
pub fn approved_hash_signature(owner: Address) -> SafeSignature {
    let mut sig_bytes = Vec::with_capacity(65);

    let mut r = [0u8; 32];
    r[12..].copy_from_slice(owner.as_slice());
    sig_bytes.extend_from_slice(&r);

    sig_bytes.extend_from_slice(&[0u8; 32]);
    sig_bytes.push(1);

    SafeSignature::new(owner, sig_bytes, SignatureKind::ApprovedHash)
}

/// Validates that a static signature is 65 bytes with a recognized v value
pub fn validate_signature_bytes(signature: &[u8]) -> Result<()> {
    if signature.len() != 65 {
        return Err(Error::Signing(format!(
            "Invalid signature length: expected 65, got {}",
            signature.len()
        )));
    }

    let v = signature[64];
    // Valid v values: 0 (contract), 1 (approved hash), 27/28 (ECDSA), 31/32 (eth_sign)
    if !matches!(v, 0 | 1 | 27 | 28 | 31 | 32) {
        return Err(Error::Signing(format!("Invalid signature v value: {v}")));
    }

    Ok(())
}
