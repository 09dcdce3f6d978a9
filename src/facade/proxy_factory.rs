//! Facade over the SafeProxyFactory

use alloy::primitives::{Address, Bytes, TxHash, U256};
use alloy::sol_types::SolCall;

use crate::contracts::ISafeProxyFactory;
use crate::create2::compute_create2_address;
use crate::error::{Error, Result};
use crate::provider::ChainProvider;
use crate::registry::{ContractFamily, ContractRegistry, SafeVersion};

/// Typed access to a deployed SafeProxyFactory
#[derive(Debug, Clone)]
pub struct SafeProxyFactoryContract<P> {
    provider: P,
    address: Address,
}

impl<P: ChainProvider> SafeProxyFactoryContract<P> {
    /// Creates a facade at a known address
    pub fn new(provider: P, address: Address) -> Self {
        Self { provider, address }
    }

    /// Resolves the deployment for a Safe version on a chain
    pub fn resolve(
        provider: P,
        registry: &ContractRegistry,
        version: SafeVersion,
        chain_id: u64,
    ) -> Result<Self> {
        let address =
            registry.resolve_address(ContractFamily::SafeProxyFactory, version, chain_id)?;
        Ok(Self::new(provider, address))
    }

    /// The deployed address
    pub fn address(&self) -> Address {
        self.address
    }

    /// Encodes a `createProxyWithNonce` call
    pub fn encode_create_proxy_with_nonce(
        &self,
        singleton: Address,
        initializer: Bytes,
        salt_nonce: U256,
    ) -> Bytes {
        ISafeProxyFactory::createProxyWithNonceCall {
            _singleton: singleton,
            initializer,
            saltNonce: salt_nonce,
        }
        .abi_encode()
        .into()
    }

    /// Deploys a proxy pointing at `singleton`, initialized with the given
    /// setup calldata
    pub async fn create_proxy_with_nonce(
        &self,
        singleton: Address,
        initializer: Bytes,
        salt_nonce: U256,
    ) -> Result<TxHash> {
        let data = self.encode_create_proxy_with_nonce(singleton, initializer, salt_nonce);
        self.provider
            .send_transaction(self.address, data, U256::ZERO)
            .await
    }

    /// Fetches the proxy creation bytecode used for CREATE2 derivation
    pub async fn proxy_creation_code(&self) -> Result<Bytes> {
        let call = ISafeProxyFactory::proxyCreationCodeCall {};
        let returned = self
            .provider
            .call(self.address, call.abi_encode().into())
            .await
            .map_err(|e| Error::Fetch {
                what: "proxy creation code",
                reason: e.to_string(),
            })?;
        ISafeProxyFactory::proxyCreationCodeCall::abi_decode_returns(&returned)
            .map_err(|e| Error::Encoding(e.to_string()))
    }

    /// Predicts the address a proxy would be deployed at for the given
    /// singleton, initializer and salt nonce
    pub async fn predict_proxy_address(
        &self,
        singleton: Address,
        initializer: &Bytes,
        salt_nonce: U256,
    ) -> Result<Address> {
        let creation_code = self.proxy_creation_code().await?;
        Ok(compute_create2_address(
            self.address,
            singleton,
            initializer,
            salt_nonce,
            &creation_code,
        ))
    }
}
