//! Contract ABI definitions for the Safe contract suite
//!
//! Interfaces cover every version from 1.1.1 through 1.5.0. Where a selector
//! changed between releases (module listing) both generations are declared and
//! the facade picks one based on the resolved version.

use alloy::primitives::{address, keccak256, Address, B256};
use alloy::sol;

sol! {
    /// Safe singleton interface (1.3.0+ selectors)
    #[sol(rpc)]
    interface ISafe {
        /// Execute a transaction (requires valid signatures)
        function execTransaction(
            address to,
            uint256 value,
            bytes calldata data,
            uint8 operation,
            uint256 safeTxGas,
            uint256 baseGas,
            uint256 gasPrice,
            address gasToken,
            address payable refundReceiver,
            bytes memory signatures
        ) external payable returns (bool success);

        /// Returns the current nonce of the Safe
        function nonce() external view returns (uint256 nonce);

        /// Returns the threshold (number of required signatures)
        function getThreshold() external view returns (uint256 threshold);

        /// Returns array of owners
        function getOwners() external view returns (address[] memory owners);

        /// Checks if an address is an owner
        function isOwner(address owner) external view returns (bool isOwner);

        /// Checks if a module is enabled
        function isModuleEnabled(address module) external view returns (bool);

        /// Returns one page of enabled modules, starting after `start`
        function getModulesPaginated(address start, uint256 pageSize)
            external
            view
            returns (address[] memory array, address next);

        /// Marks a transaction hash as approved by the calling owner
        function approveHash(bytes32 hashToApprove) external;

        /// Returns the domain separator for EIP-712 signing
        function domainSeparator() external view returns (bytes32);

        /// Computes the hash of a Safe transaction
        function getTransactionHash(
            address to,
            uint256 value,
            bytes calldata data,
            uint8 operation,
            uint256 safeTxGas,
            uint256 baseGas,
            uint256 gasPrice,
            address gasToken,
            address refundReceiver,
            uint256 _nonce
        ) external view returns (bytes32);

        /// Verifies the supplied signatures against a data hash
        function checkSignatures(
            bytes32 dataHash,
            bytes memory data,
            bytes memory signatures
        ) external view;

        /// Returns the contract version string
        function VERSION() external view returns (string memory);

        event ExecutionSuccess(bytes32 indexed txHash, uint256 payment);
        event ExecutionFailure(bytes32 indexed txHash, uint256 payment);
        event SafeReceived(address indexed sender, uint256 value);
    }

    /// Module listing selector removed in 1.3.0, needed for 1.1.1/1.2.0 Safes
    #[sol(rpc)]
    interface ISafeLegacy {
        /// Returns all enabled modules in one call
        function getModules() external view returns (address[] memory);
    }

    /// Safe setup call, identical across supported versions
    #[sol(rpc)]
    interface ISafeSetup {
        function setup(
            address[] calldata _owners,
            uint256 _threshold,
            address to,
            bytes calldata data,
            address fallbackHandler,
            address paymentToken,
            uint256 payment,
            address payable paymentReceiver
        ) external;
    }

    /// MultiSend interface for batching multiple calls
    #[sol(rpc)]
    interface IMultiSend {
        /// Sends multiple transactions in a single call
        /// @param transactions Packed encoding of transactions:
        ///        operation (1 byte) | to (20 bytes) | value (32 bytes) | data length (32 bytes) | data
        function multiSend(bytes memory transactions) external payable;
    }

    /// MultiSendCallOnly - same as MultiSend but rejects DelegateCall
    #[sol(rpc)]
    interface IMultiSendCallOnly {
        function multiSend(bytes memory transactions) external payable;
    }

    /// CREATE/CREATE2 deployment helper library
    #[sol(rpc)]
    interface ICreateCall {
        function performCreate(uint256 value, bytes memory deploymentData)
            external
            returns (address newContract);

        function performCreate2(uint256 value, bytes memory deploymentData, bytes32 salt)
            external
            returns (address newContract);

        event ContractCreation(address newContract);
    }

    /// On-chain message signing library, invoked via DelegateCall
    #[sol(rpc)]
    interface ISignMessageLib {
        function signMessage(bytes calldata _data) external;

        function getMessageHash(bytes memory message) external view returns (bytes32);
    }

    /// Accessor for simulating Safe transactions, invoked via DelegateCall
    #[sol(rpc)]
    interface ISimulateTxAccessor {
        function simulate(address to, uint256 value, bytes calldata data, uint8 operation)
            external
            returns (uint256 estimate, bool success, bytes memory returnData);
    }

    /// Fallback handler exposing EIP-1271 validation for a Safe
    #[sol(rpc)]
    interface ICompatibilityFallbackHandler {
        /// Returns the magic value 0x1626ba7e when the signature is valid
        function isValidSignature(bytes32 _dataHash, bytes calldata _signature)
            external
            view
            returns (bytes4);

        function getMessageHash(bytes memory message) external view returns (bytes32);
    }

    /// Factory deploying Safe proxies via CREATE2
    #[sol(rpc)]
    interface ISafeProxyFactory {
        function createProxyWithNonce(
            address _singleton,
            bytes memory initializer,
            uint256 saltNonce
        ) external returns (address proxy);

        function proxyCreationCode() external pure returns (bytes memory);

        event ProxyCreation(address indexed proxy, address singleton);
    }

    /// ERC20 interface for common token operations
    #[sol(rpc)]
    interface IERC20 {
        function transfer(address to, uint256 amount) external returns (bool);
        function approve(address spender, uint256 amount) external returns (bool);
        function transferFrom(address from, address to, uint256 amount) external returns (bool);
        function balanceOf(address account) external view returns (uint256);
        function allowance(address owner, address spender) external view returns (uint256);

        event Transfer(address indexed from, address indexed to, uint256 value);
        event Approval(address indexed owner, address indexed spender, uint256 value);
    }

    /// UserOperation as submitted to EntryPoint v0.6
    #[derive(Debug, Default)]
    struct PackedUserOperationV06 {
        address sender;
        uint256 nonce;
        bytes initCode;
        bytes callData;
        uint256 callGasLimit;
        uint256 verificationGasLimit;
        uint256 preVerificationGas;
        uint256 maxFeePerGas;
        uint256 maxPriorityFeePerGas;
        bytes paymasterAndData;
        bytes signature;
    }

    /// PackedUserOperation as submitted to EntryPoint v0.7+.
    /// Gas limits and fees are each packed into a bytes32 pair.
    #[derive(Debug, Default)]
    struct PackedUserOperationV07 {
        address sender;
        uint256 nonce;
        bytes initCode;
        bytes callData;
        bytes32 accountGasLimits;
        uint256 preVerificationGas;
        bytes32 gasFees;
        bytes paymasterAndData;
        bytes signature;
    }

    /// EntryPoint surface shared by v0.6 and v0.7
    #[sol(rpc)]
    interface IEntryPoint {
        /// Returns the next nonce for (sender, key)
        function getNonce(address sender, uint192 key) external view returns (uint256 nonce);

        function balanceOf(address account) external view returns (uint256);
    }
}

/// Module list terminator used by `getModulesPaginated`.
/// The Safe's internal linked list starts and ends at this sentinel.
pub const SENTINEL_MODULES: Address = address!("0000000000000000000000000000000000000001");

/// EIP-1271 success marker: first four bytes of a valid `isValidSignature` response
pub const EIP1271_MAGIC_VALUE: [u8; 4] = [0x16, 0x26, 0xba, 0x7e];

/// EIP-712 type hash for the SafeTx struct, unchanged since 1.0.0
/// keccak256("SafeTx(address to,uint256 value,bytes data,uint8 operation,uint256 safeTxGas,uint256 baseGas,uint256 gasPrice,address gasToken,address refundReceiver,uint256 nonce)")
pub const SAFE_TX_TYPEHASH: [u8; 32] = [
    0xbb, 0x83, 0x10, 0xd4, 0x86, 0x36, 0x8d, 0xb6, 0xbd, 0x6f, 0x84, 0x94, 0x02, 0xfd, 0xd7, 0x3a,
    0xd5, 0x3d, 0x31, 0x6b, 0x5a, 0x4b, 0x26, 0x44, 0xad, 0x6e, 0xfe, 0x0f, 0x94, 0x12, 0x86, 0xd8,
];

/// EIP-712 domain type hash used from 1.3.0 onward
/// keccak256("EIP712Domain(uint256 chainId,address verifyingContract)")
pub const DOMAIN_SEPARATOR_TYPEHASH: [u8; 32] = [
    0x47, 0xe7, 0x95, 0x34, 0xa2, 0x45, 0x95, 0x2e, 0x8b, 0x16, 0x89, 0x3a, 0x33, 0x6b, 0x85, 0xa3,
    0xd9, 0xea, 0x9f, 0xa8, 0xc5, 0x73, 0xf3, 0xd8, 0x03, 0xaf, 0xb9, 0x2a, 0x79, 0x46, 0x92, 0x18,
];

/// EIP-712 domain type hash used before 1.3.0 (no chain id in the domain)
/// keccak256("EIP712Domain(address verifyingContract)")
pub const LEGACY_DOMAIN_SEPARATOR_TYPEHASH: [u8; 32] = [
    0x03, 0x5a, 0xff, 0x83, 0xd8, 0x69, 0x37, 0xd3, 0x5b, 0x32, 0xe0, 0x4f, 0x0d, 0xdc, 0x6f, 0xf4,
    0x69, 0x29, 0x0e, 0xef, 0x2f, 0x1b, 0x69, 0x2d, 0x8a, 0x81, 0x5c, 0x89, 0x40, 0x4d, 0x47, 0x49,
];

/// SafeOp type string signed through the Safe4337Module for EntryPoint v0.6
pub const SAFE_OP_V06_TYPE: &str = "SafeOp(address safe,uint256 nonce,bytes initCode,bytes callData,uint256 callGasLimit,uint256 verificationGasLimit,uint256 preVerificationGas,uint256 maxFeePerGas,uint256 maxPriorityFeePerGas,bytes paymasterAndData,uint48 validAfter,uint48 validUntil,address entryPoint)";

/// SafeOp type string for EntryPoint v0.7: gas limits move to uint128 and the
/// verification/call and priority/max fee orderings are swapped
pub const SAFE_OP_V07_TYPE: &str = "SafeOp(address safe,uint256 nonce,bytes initCode,bytes callData,uint128 verificationGasLimit,uint128 callGasLimit,uint256 preVerificationGas,uint128 maxPriorityFeePerGas,uint128 maxFeePerGas,bytes paymasterAndData,uint48 validAfter,uint48 validUntil,address entryPoint)";

/// Type hash of [`SAFE_OP_V06_TYPE`]
pub fn safe_op_v06_typehash() -> B256 {
    keccak256(SAFE_OP_V06_TYPE.as_bytes())
}

/// Type hash of [`SAFE_OP_V07_TYPE`]
pub fn safe_op_v07_typehash() -> B256 {
    keccak256(SAFE_OP_V07_TYPE.as_bytes())
}

/// Canonical EntryPoint v0.6 address
pub const ENTRYPOINT_V06_ADDRESS: Address = address!("5FF137D4b0FDCD49DcA30c7CF57E578a026d2789");

/// Canonical EntryPoint v0.7 address
pub const ENTRYPOINT_V07_ADDRESS: Address = address!("0000000071727De22E5E9d8BAf0edAc6f37da032");

/// Safe4337Module v0.2.0, pairs with EntryPoint v0.6
pub const SAFE_4337_MODULE_V06: Address = address!("a581c4A4DB7175302464fF3C06380BC3270b4037");

/// Safe4337Module v0.3.0, pairs with EntryPoint v0.7
pub const SAFE_4337_MODULE_V07: Address = address!("75cf11467937ce3F2f357CE24ffc3DBF8fD5c226");

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::keccak256;

    #[test]
    fn test_safe_tx_typehash() {
        let computed = keccak256(
            "SafeTx(address to,uint256 value,bytes data,uint8 operation,uint256 safeTxGas,uint256 baseGas,uint256 gasPrice,address gasToken,address refundReceiver,uint256 nonce)"
        );
        assert_eq!(computed.as_slice(), &SAFE_TX_TYPEHASH);
    }

    #[test]
    fn test_domain_separator_typehash() {
        let computed = keccak256("EIP712Domain(uint256 chainId,address verifyingContract)");
        assert_eq!(computed.as_slice(), &DOMAIN_SEPARATOR_TYPEHASH);
    }

    #[test]
    fn test_legacy_domain_separator_typehash() {
        let computed = keccak256("EIP712Domain(address verifyingContract)");
        assert_eq!(computed.as_slice(), &LEGACY_DOMAIN_SEPARATOR_TYPEHASH);
    }

    #[test]
    fn test_safe_op_typehashes_differ() {
        assert_ne!(safe_op_v06_typehash(), safe_op_v07_typehash());
    }
}
