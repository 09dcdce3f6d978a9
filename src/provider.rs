//! Provider and signer capabilities
//!
//! The encoding core never talks to a node directly. Reads and writes go
//! through the [`ChainProvider`] trait and signing goes through [`SafeSigner`],
//! so facades stay polymorphic over how the application reaches the chain.

use std::future::Future;

use alloy::network::{AnyNetwork, TransactionBuilder};
use alloy::primitives::{Address, Bytes, TxHash, B256, U256};
use alloy::providers::Provider;
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::Signer;

use crate::error::{Error, Result};
use crate::signing::sign_safe_hash;

/// Read/write access to a chain, as needed by the contract facades
pub trait ChainProvider: Send + Sync {
    /// Performs an `eth_call` against `to` with the given calldata
    fn call(&self, to: Address, data: Bytes) -> impl Future<Output = Result<Bytes>> + Send;

    /// Submits a signed transaction and returns its hash
    fn send_transaction(
        &self,
        to: Address,
        data: Bytes,
        value: U256,
    ) -> impl Future<Output = Result<TxHash>> + Send;

    /// Returns the chain id the provider is connected to
    fn chain_id(&self) -> impl Future<Output = Result<u64>> + Send;

    /// Returns whether the address has code deployed
    fn is_contract_deployed(&self, address: Address) -> impl Future<Output = Result<bool>> + Send;
}

/// Capability of producing Safe-format (r || s || v) signatures over a hash
pub trait SafeSigner: Send + Sync {
    /// Returns the signer's address
    fn address(&self) -> Address;

    /// Signs a 32-byte hash, returning a 65-byte r || s || v signature
    /// with v adjusted to 27/28
    fn sign_hash(&self, hash: B256) -> impl Future<Output = Result<Bytes>> + Send;
}

impl SafeSigner for PrivateKeySigner {
    fn address(&self) -> Address {
        Signer::address(self)
    }

    async fn sign_hash(&self, hash: B256) -> Result<Bytes> {
        sign_safe_hash(self, hash).await
    }
}

/// [`ChainProvider`] adapter over any alloy provider
#[derive(Debug, Clone)]
pub struct RpcProvider<P> {
    inner: P,
}

impl<P> RpcProvider<P>
where
    P: Provider<AnyNetwork> + Clone + 'static,
{
    /// Wraps an alloy provider
    pub fn new(inner: P) -> Self {
        Self { inner }
    }

    /// Returns the wrapped provider
    pub fn inner(&self) -> &P {
        &self.inner
    }
}

impl<P> ChainProvider for RpcProvider<P>
where
    P: Provider<AnyNetwork> + Clone + 'static,
{
    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes> {
        let request = <AnyNetwork as alloy::network::Network>::TransactionRequest::default()
            .with_to(to)
            .with_input(data);
        let output = self.inner.call(request).await?;
        Ok(output)
    }

    async fn send_transaction(&self, to: Address, data: Bytes, value: U256) -> Result<TxHash> {
        let request = <AnyNetwork as alloy::network::Network>::TransactionRequest::default()
            .with_to(to)
            .with_input(data)
            .with_value(value);
        let pending = self
            .inner
            .send_transaction(request)
            .await
            .map_err(|e| Error::Provider(e.to_string()))?;
        Ok(*pending.tx_hash())
    }

    async fn chain_id(&self) -> Result<u64> {
        let chain_id = self
            .inner
            .get_chain_id()
            .await
            .map_err(|e| Error::Provider(e.to_string()))?;
        Ok(chain_id)
    }

    async fn is_contract_deployed(&self, address: Address) -> Result<bool> {
        let code = self
            .inner
            .get_code_at(address)
            .await
            .map_err(|e| Error::Fetch {
                what: "contract code",
                reason: e.to_string(),
            })?;
        Ok(!code.is_empty())
    }
}
