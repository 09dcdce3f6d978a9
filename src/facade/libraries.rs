//! Facades over the Safe library contracts
//!
//! MultiSend, CreateCall, SignMessageLib and SimulateTxAccessor are pure
//! encoders: they produce calldata that runs inside a Safe transaction
//! (usually via DelegateCall). The fallback handler facade is the one that
//! reads the chain.

use alloy::primitives::{Address, Bytes, B256, U256};
use alloy::sol_types::SolCall;

use crate::contracts::{
    ICompatibilityFallbackHandler, ICreateCall, IMultiSend, ISignMessageLib, ISimulateTxAccessor,
};
use crate::error::{Error, Result};
use crate::provider::ChainProvider;
use crate::registry::{ContractFamily, ContractRegistry, SafeVersion};
use crate::signing::is_valid_eip1271_signature;
use crate::types::{MetaTransactionData, Operation, SafeCall};
use crate::encoding::{encode_multi_send, encode_multi_send_call_only};

/// Facade over MultiSend or MultiSendCallOnly
#[derive(Debug, Clone)]
pub struct MultiSendContract {
    address: Address,
    call_only: bool,
}

impl MultiSendContract {
    /// Creates a facade at a known address
    pub fn new(address: Address, call_only: bool) -> Self {
        Self { address, call_only }
    }

    /// Resolves the deployment matching a Safe version on a chain.
    /// Safe 1.2.0 maps to the 1.1.1 MultiSend it shipped with.
    pub fn resolve(
        registry: &ContractRegistry,
        version: SafeVersion,
        chain_id: u64,
        call_only: bool,
    ) -> Result<Self> {
        let family = if call_only {
            ContractFamily::MultiSendCallOnly
        } else {
            ContractFamily::MultiSend
        };
        let address =
            registry.resolve_address(family, version.companion_multi_send_version(), chain_id)?;
        Ok(Self::new(address, call_only))
    }

    /// The deployed address
    pub fn address(&self) -> Address {
        self.address
    }

    /// Whether this facade targets the call-only variant
    pub fn is_call_only(&self) -> bool {
        self.call_only
    }

    /// Encodes a `multiSend` call wrapping the packed batch.
    /// The call-only variant rejects DelegateCall batches up front.
    pub fn encode_batch(&self, calls: &[impl SafeCall]) -> Result<Bytes> {
        let transactions = if self.call_only {
            encode_multi_send_call_only(calls)?
        } else {
            encode_multi_send(calls)?
        };
        Ok(IMultiSend::multiSendCall { transactions }.abi_encode().into())
    }

    /// Builds the Safe transaction payload for a batch: a DelegateCall into
    /// the MultiSend contract carrying the packed calls
    pub fn batch_transaction(&self, calls: &[impl SafeCall]) -> Result<MetaTransactionData> {
        let data = self.encode_batch(calls)?;
        Ok(MetaTransactionData {
            to: self.address,
            value: U256::ZERO,
            data,
            operation: Operation::DelegateCall,
        })
    }
}

/// Facade over the CreateCall deployment library
#[derive(Debug, Clone)]
pub struct CreateCallContract {
    address: Address,
}

impl CreateCallContract {
    /// Creates a facade at a known address
    pub fn new(address: Address) -> Self {
        Self { address }
    }

    /// Resolves the deployment for a Safe version on a chain
    pub fn resolve(
        registry: &ContractRegistry,
        version: SafeVersion,
        chain_id: u64,
    ) -> Result<Self> {
        let address = registry.resolve_address(ContractFamily::CreateCall, version, chain_id)?;
        Ok(Self::new(address))
    }

    /// The deployed address
    pub fn address(&self) -> Address {
        self.address
    }

    /// Encodes a `performCreate` call
    pub fn encode_perform_create(&self, value: U256, deployment_data: Bytes) -> Bytes {
        ICreateCall::performCreateCall {
            value,
            deploymentData: deployment_data,
        }
        .abi_encode()
        .into()
    }

    /// Encodes a `performCreate2` call
    pub fn encode_perform_create2(&self, value: U256, deployment_data: Bytes, salt: B256) -> Bytes {
        ICreateCall::performCreate2Call {
            value,
            deploymentData: deployment_data,
            salt,
        }
        .abi_encode()
        .into()
    }
}

/// Facade over SignMessageLib, always invoked via DelegateCall
#[derive(Debug, Clone)]
pub struct SignMessageLibContract {
    address: Address,
}

impl SignMessageLibContract {
    /// Creates a facade at a known address
    pub fn new(address: Address) -> Self {
        Self { address }
    }

    /// Resolves the deployment for a Safe version on a chain
    pub fn resolve(
        registry: &ContractRegistry,
        version: SafeVersion,
        chain_id: u64,
    ) -> Result<Self> {
        let address =
            registry.resolve_address(ContractFamily::SignMessageLib, version, chain_id)?;
        Ok(Self::new(address))
    }

    /// The deployed address
    pub fn address(&self) -> Address {
        self.address
    }

    /// Builds the Safe transaction marking a message as signed on-chain
    pub fn sign_message_transaction(&self, message: Bytes) -> MetaTransactionData {
        let data: Bytes = ISignMessageLib::signMessageCall { _data: message }
            .abi_encode()
            .into();
        MetaTransactionData {
            to: self.address,
            value: U256::ZERO,
            data,
            operation: Operation::DelegateCall,
        }
    }
}

/// Facade over SimulateTxAccessor, invoked via DelegateCall from the Safe
#[derive(Debug, Clone)]
pub struct SimulateTxAccessorContract {
    address: Address,
}

/// Decoded result of a `simulate` accessor call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationOutcome {
    /// Gas consumed by the inner call
    pub estimate: U256,
    /// Whether the inner call succeeded
    pub success: bool,
    /// Raw return data of the inner call
    pub return_data: Bytes,
}

impl SimulateTxAccessorContract {
    /// Creates a facade at a known address
    pub fn new(address: Address) -> Self {
        Self { address }
    }

    /// Resolves the deployment for a Safe version on a chain
    pub fn resolve(
        registry: &ContractRegistry,
        version: SafeVersion,
        chain_id: u64,
    ) -> Result<Self> {
        let address =
            registry.resolve_address(ContractFamily::SimulateTxAccessor, version, chain_id)?;
        Ok(Self::new(address))
    }

    /// The deployed address
    pub fn address(&self) -> Address {
        self.address
    }

    /// Encodes a `simulate` call for the given inner transaction
    pub fn encode_simulate(&self, tx: &MetaTransactionData) -> Bytes {
        ISimulateTxAccessor::simulateCall {
            to: tx.to,
            value: tx.value,
            data: tx.data.clone(),
            operation: tx.operation.as_u8(),
        }
        .abi_encode()
        .into()
    }

    /// Decodes the return data of a `simulate` call
    pub fn decode_simulation(&self, returned: &[u8]) -> Result<SimulationOutcome> {
        let decoded = ISimulateTxAccessor::simulateCall::abi_decode_returns(returned)
            .map_err(|e| Error::Encoding(e.to_string()))?;
        Ok(SimulationOutcome {
            estimate: decoded.estimate,
            success: decoded.success,
            return_data: decoded.returnData,
        })
    }
}

/// Facade over a deployed CompatibilityFallbackHandler
#[derive(Debug, Clone)]
pub struct FallbackHandlerContract<P> {
    provider: P,
    address: Address,
}

impl<P: ChainProvider> FallbackHandlerContract<P> {
    /// Creates a facade at a known address
    pub fn new(provider: P, address: Address) -> Self {
        Self { provider, address }
    }

    /// The deployed address
    pub fn address(&self) -> Address {
        self.address
    }

    /// EIP-1271 check: does this handler consider the signature valid for
    /// the hash? Reverts and mismatches report `false`, never an error.
    pub async fn is_valid_signature(&self, hash: B256, signature: &Bytes) -> bool {
        is_valid_eip1271_signature(&self.provider, self.address, hash, signature).await
    }

    /// Returns the Safe-specific hash for a raw message
    pub async fn get_message_hash(&self, message: Bytes) -> Result<B256> {
        let call = ICompatibilityFallbackHandler::getMessageHashCall { message };
        let returned = self
            .provider
            .call(self.address, call.abi_encode().into())
            .await
            .map_err(|e| Error::Fetch {
                what: "message hash",
                reason: e.to_string(),
            })?;
        ICompatibilityFallbackHandler::getMessageHashCall::abi_decode_returns(&returned)
            .map_err(|e| Error::Encoding(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    fn registry() -> ContractRegistry {
        ContractRegistry::new()
    }

    #[test]
    fn test_multi_send_resolution_maps_1_2_0_to_1_1_1() {
        let contract =
            MultiSendContract::resolve(&registry(), SafeVersion::V1_2_0, 1, false).unwrap();
        assert_eq!(
            contract.address(),
            address!("8D29bE29923b68abfDD21e541b9374737B49cdAD")
        );
    }

    #[test]
    fn test_multi_send_call_only_resolution() {
        let contract =
            MultiSendContract::resolve(&registry(), SafeVersion::V1_4_1, 1, true).unwrap();
        assert_eq!(
            contract.address(),
            address!("9641d764fc13c8B624c04430C7356C1C7C8102e2")
        );
        assert!(contract.is_call_only());
    }

    #[test]
    fn test_batch_transaction_is_delegate_call() {
        let contract = MultiSendContract::new(
            address!("0x38869bf66a61cF6bDB996A6aE40D5853Fd43B526"),
            false,
        );
        let calls = vec![MetaTransactionData::call(
            address!("0x1111111111111111111111111111111111111111"),
            vec![0x01],
        )];

        let tx = contract.batch_transaction(&calls).unwrap();
        assert_eq!(tx.to, contract.address());
        assert_eq!(tx.operation, Operation::DelegateCall);
        // multiSend selector 0x8d80ff0a
        assert_eq!(&tx.data[..4], &[0x8d, 0x80, 0xff, 0x0a]);
    }

    #[test]
    fn test_call_only_batch_rejects_delegate_call() {
        let contract = MultiSendContract::new(
            address!("0x9641d764fc13c8B624c04430C7356C1C7C8102e2"),
            true,
        );
        let calls = vec![MetaTransactionData::delegate_call(
            address!("0x1111111111111111111111111111111111111111"),
            vec![],
        )];

        assert!(matches!(
            contract.batch_transaction(&calls).unwrap_err(),
            Error::InvalidOperation { index: 0, .. }
        ));
    }

    #[test]
    fn test_sign_message_transaction_shape() {
        let lib = SignMessageLibContract::resolve(&registry(), SafeVersion::V1_4_1, 1).unwrap();
        let tx = lib.sign_message_transaction(Bytes::from(vec![0x42; 32]));

        assert_eq!(tx.operation, Operation::DelegateCall);
        assert_eq!(tx.to, lib.address());
        // signMessage selector 0x85a5affe
        assert_eq!(&tx.data[..4], &[0x85, 0xa5, 0xaf, 0xfe]);
    }

    #[test]
    fn test_create_call_encoding_selectors() {
        let create = CreateCallContract::resolve(&registry(), SafeVersion::V1_4_1, 1).unwrap();

        let data = create.encode_perform_create(U256::ZERO, Bytes::from(vec![0x60, 0x80]));
        // performCreate selector 0x4c8c9ea1
        assert_eq!(&data[..4], &[0x4c, 0x8c, 0x9e, 0xa1]);

        let data2 = create.encode_perform_create2(
            U256::ZERO,
            Bytes::from(vec![0x60, 0x80]),
            B256::repeat_byte(0x01),
        );
        // performCreate2 selector 0x4847be6f
        assert_eq!(&data2[..4], &[0x48, 0x47, 0xbe, 0x6f]);
    }

    #[test]
    fn test_simulate_round_trip() {
        use alloy::sol_types::SolValue;

        let accessor =
            SimulateTxAccessorContract::resolve(&registry(), SafeVersion::V1_3_0, 1).unwrap();
        let inner = MetaTransactionData::call(
            address!("0x1111111111111111111111111111111111111111"),
            vec![0xde, 0xad],
        );

        let encoded = accessor.encode_simulate(&inner);
        assert!(!encoded.is_empty());

        let returned = (U256::from(21_000), true, Bytes::from(vec![0x01]))
            .abi_encode_params();
        let outcome = accessor.decode_simulation(&returned).unwrap();
        assert_eq!(outcome.estimate, U256::from(21_000));
        assert!(outcome.success);
        assert_eq!(outcome.return_data, Bytes::from(vec![0x01]));
    }
}
