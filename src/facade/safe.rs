//! Facade over a deployed Safe singleton/proxy

use alloy::primitives::{Address, Bytes, TxHash, B256, U256};
use alloy::sol_types::SolCall;

use crate::contracts::{ISafe, ISafeLegacy, SENTINEL_MODULES};
use crate::encoding::compute_safe_transaction_hash;
use crate::error::{Error, Result};
use crate::provider::ChainProvider;
use crate::registry::SafeVersion;
use crate::signing::is_valid_eip1271_signature;
use crate::types::{SafeTransaction, SafeTransactionData};

/// Page size used when walking the module linked list
const MODULE_PAGE_SIZE: usize = 10;

/// Typed access to one deployed Safe.
///
/// The version is fixed at construction and drives every version-specific
/// branch; it never changes for the lifetime of the facade.
#[derive(Debug, Clone)]
pub struct SafeContract<P> {
    provider: P,
    address: Address,
    version: SafeVersion,
    chain_id: u64,
}

impl<P: ChainProvider> SafeContract<P> {
    /// Creates a facade for a Safe at a known version and chain
    pub fn new(provider: P, address: Address, version: SafeVersion, chain_id: u64) -> Self {
        Self {
            provider,
            address,
            version,
            chain_id,
        }
    }

    /// Creates a facade, fetching the chain id from the provider and
    /// verifying the Safe has code
    pub async fn connect(provider: P, address: Address, version: SafeVersion) -> Result<Self> {
        if !provider.is_contract_deployed(address).await? {
            return Err(Error::SafeNotDeployed(address));
        }
        let chain_id = provider.chain_id().await?;
        Ok(Self::new(provider, address, version, chain_id))
    }

    /// The Safe's address
    pub fn address(&self) -> Address {
        self.address
    }

    /// The contract version this facade was resolved for
    pub fn version(&self) -> SafeVersion {
        self.version
    }

    /// The chain this Safe lives on
    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    async fn read<C: SolCall>(&self, call: C, what: &'static str) -> Result<C::Return> {
        let returned = self
            .provider
            .call(self.address, call.abi_encode().into())
            .await
            .map_err(|e| Error::Fetch {
                what,
                reason: e.to_string(),
            })?;
        C::abi_decode_returns(&returned).map_err(|e| Error::Encoding(e.to_string()))
    }

    /// Returns the current nonce of the Safe
    pub async fn nonce(&self) -> Result<U256> {
        self.read(ISafe::nonceCall {}, "nonce").await
    }

    /// Returns the signature threshold
    pub async fn get_threshold(&self) -> Result<u64> {
        let threshold = self.read(ISafe::getThresholdCall {}, "threshold").await?;
        u64::try_from(threshold)
            .map_err(|_| Error::Encoding(format!("Threshold {threshold} does not fit in u64")))
    }

    /// Returns the owner set
    pub async fn get_owners(&self) -> Result<Vec<Address>> {
        self.read(ISafe::getOwnersCall {}, "owners").await
    }

    /// Checks whether an address is an owner
    pub async fn is_owner(&self, owner: Address) -> Result<bool> {
        self.read(ISafe::isOwnerCall { owner }, "is_owner").await
    }

    /// Checks whether a module is enabled
    pub async fn is_module_enabled(&self, module: Address) -> Result<bool> {
        self.read(ISafe::isModuleEnabledCall { module }, "is_module_enabled")
            .await
    }

    /// Returns the contract version string reported on-chain
    pub async fn version_on_chain(&self) -> Result<String> {
        self.read(ISafe::VERSIONCall {}, "version").await
    }

    /// Lists all enabled modules.
    ///
    /// Safes older than 1.3.0 expose the whole list through `getModules`;
    /// newer ones only have `getModulesPaginated`, so pages are concatenated
    /// until the linked list returns to the sentinel (or stops advancing).
    pub async fn get_modules(&self) -> Result<Vec<Address>> {
        if !self.version.supports_paginated_modules() {
            return self.read(ISafeLegacy::getModulesCall {}, "modules").await;
        }

        let mut modules = Vec::new();
        let mut start = SENTINEL_MODULES;
        loop {
            let page = self
                .read(
                    ISafe::getModulesPaginatedCall {
                        start,
                        pageSize: U256::from(MODULE_PAGE_SIZE),
                    },
                    "modules page",
                )
                .await?;

            modules.extend_from_slice(&page.array);

            let next = page.next;
            // The list terminates back at the sentinel; a zero or repeated
            // next pointer means the list is exhausted or malformed.
            if next == SENTINEL_MODULES
                || next == Address::ZERO
                || next == start
                || page.array.is_empty()
            {
                break;
            }
            start = next;
        }
        Ok(modules)
    }

    /// Computes the EIP-712 hash owners must sign for this transaction,
    /// using the domain shape of this Safe's version
    pub fn transaction_hash(&self, tx: &SafeTransactionData) -> B256 {
        compute_safe_transaction_hash(self.version, self.chain_id, self.address, tx)
    }

    /// Asks the Safe (via its fallback handler) whether a signature is valid
    /// for a message hash. Reverts and mismatches report `false`.
    pub async fn is_valid_signature(&self, hash: B256, signature: &Bytes) -> bool {
        is_valid_eip1271_signature(&self.provider, self.address, hash, signature).await
    }

    /// Encodes an `execTransaction` call for this transaction and signature blob
    pub fn encode_exec_transaction(&self, tx: &SafeTransactionData, signatures: Bytes) -> Bytes {
        ISafe::execTransactionCall {
            to: tx.to,
            value: tx.value,
            data: tx.data.clone(),
            operation: tx.operation.as_u8(),
            safeTxGas: tx.safe_tx_gas,
            baseGas: tx.base_gas,
            gasPrice: tx.gas_price,
            gasToken: tx.gas_token,
            refundReceiver: tx.refund_receiver,
            signatures,
        }
        .abi_encode()
        .into()
    }

    /// Encodes an `approveHash` call
    pub fn encode_approve_hash(&self, hash: B256) -> Bytes {
        ISafe::approveHashCall {
            hashToApprove: hash,
        }
        .abi_encode()
        .into()
    }

    /// Submits a fully signed transaction through the provider
    pub async fn exec_transaction(&self, tx: &SafeTransaction) -> Result<TxHash> {
        let data = self.encode_exec_transaction(&tx.data, tx.encoded_signatures());
        self.provider
            .send_transaction(self.address, data, U256::ZERO)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Operation;
    use alloy::primitives::address;
    use alloy::sol_types::SolValue;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Provider stub replaying a queue of pre-encoded call responses
    struct ScriptedProvider {
        responses: Mutex<VecDeque<Bytes>>,
    }

    impl ScriptedProvider {
        fn new(responses: Vec<Bytes>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
            }
        }
    }

    impl ChainProvider for ScriptedProvider {
        async fn call(&self, _to: Address, _data: Bytes) -> Result<Bytes> {
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| Error::Provider("no scripted response".to_string()))
        }

        async fn send_transaction(
            &self,
            _to: Address,
            _data: Bytes,
            _value: U256,
        ) -> Result<TxHash> {
            Ok(TxHash::ZERO)
        }

        async fn chain_id(&self) -> Result<u64> {
            Ok(1)
        }

        async fn is_contract_deployed(&self, _address: Address) -> Result<bool> {
            Ok(true)
        }
    }

    fn safe_address() -> Address {
        address!("0x1234567890123456789012345678901234567890")
    }

    fn modules_page(array: Vec<Address>, next: Address) -> Bytes {
        (array, next).abi_encode_params().into()
    }

    #[tokio::test]
    async fn test_legacy_module_listing_uses_get_modules() {
        let modules = vec![
            address!("0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"),
            address!("0xbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb"),
        ];
        // Single response: the whole list at once
        let provider = ScriptedProvider::new(vec![modules.abi_encode().into()]);
        let safe = SafeContract::new(provider, safe_address(), SafeVersion::V1_2_0, 1);

        assert_eq!(safe.get_modules().await.unwrap(), modules);
    }

    #[tokio::test]
    async fn test_paginated_module_listing_concatenates_pages() {
        let page1: Vec<Address> = (1..=10)
            .map(|i| Address::from_slice(&[i as u8; 20]))
            .collect();
        let page2 = vec![address!("0xcccccccccccccccccccccccccccccccccccccccc")];

        let provider = ScriptedProvider::new(vec![
            modules_page(page1.clone(), *page1.last().unwrap()),
            modules_page(page2.clone(), SENTINEL_MODULES),
        ]);
        let safe = SafeContract::new(provider, safe_address(), SafeVersion::V1_3_0, 1);

        let all = safe.get_modules().await.unwrap();
        assert_eq!(all.len(), 11);
        assert_eq!(&all[..10], &page1[..]);
        assert_eq!(all[10], page2[0]);
    }

    #[tokio::test]
    async fn test_paginated_listing_stops_on_looping_next_pointer() {
        let looping = address!("0xdddddddddddddddddddddddddddddddddddddddd");
        let provider = ScriptedProvider::new(vec![
            modules_page(vec![looping; 10], looping),
            modules_page(vec![looping; 10], looping),
        ]);
        let safe = SafeContract::new(provider, safe_address(), SafeVersion::V1_4_1, 1);

        // Second page reports the same next pointer it was started from
        let all = safe.get_modules().await.unwrap();
        assert_eq!(all.len(), 20);
    }

    #[tokio::test]
    async fn test_reads_decode_returns() {
        let provider = ScriptedProvider::new(vec![
            U256::from(3).abi_encode().into(),  // nonce
            U256::from(2).abi_encode().into(),  // threshold
            true.abi_encode().into(),           // isOwner
        ]);
        let safe = SafeContract::new(provider, safe_address(), SafeVersion::V1_4_1, 1);

        assert_eq!(safe.nonce().await.unwrap(), U256::from(3));
        assert_eq!(safe.get_threshold().await.unwrap(), 2);
        assert!(safe.is_owner(safe_address()).await.unwrap());
    }

    #[tokio::test]
    async fn test_oversized_threshold_is_an_error_not_a_panic() {
        let provider = ScriptedProvider::new(vec![U256::MAX.abi_encode().into()]);
        let safe = SafeContract::new(provider, safe_address(), SafeVersion::V1_4_1, 1);

        let err = safe.get_threshold().await.unwrap_err();
        assert!(matches!(err, Error::Encoding(_)));
    }

    #[test]
    fn test_encode_exec_transaction_selector() {
        let provider = ScriptedProvider::new(vec![]);
        let safe = SafeContract::new(provider, safe_address(), SafeVersion::V1_4_1, 1);

        let tx = SafeTransactionData::new(
            address!("0x1111111111111111111111111111111111111111"),
            U256::ZERO,
            vec![],
            Operation::Call,
        );
        let encoded = safe.encode_exec_transaction(&tx, Bytes::new());

        // execTransaction selector 0x6a761202
        assert_eq!(&encoded[..4], &[0x6a, 0x76, 0x12, 0x02]);
    }

    #[test]
    fn test_transaction_hash_uses_version_domain() {
        let tx = SafeTransactionData::new(
            address!("0x1111111111111111111111111111111111111111"),
            U256::ZERO,
            vec![],
            Operation::Call,
        );

        let old = SafeContract::new(
            ScriptedProvider::new(vec![]),
            safe_address(),
            SafeVersion::V1_1_1,
            1,
        );
        let new = SafeContract::new(
            ScriptedProvider::new(vec![]),
            safe_address(),
            SafeVersion::V1_4_1,
            1,
        );

        assert_ne!(old.transaction_hash(&tx), new.transaction_hash(&tx));
    }
}
