//! Call types batched into Safe transactions

use alloy::primitives::{Address, Bytes, U256};
use alloy::sol_types::SolCall;
use serde::{Deserialize, Serialize};

use super::Operation;

/// Trait for anything that can be batched into a MultiSend payload
pub trait SafeCall {
    /// Returns the target address
    fn to(&self) -> Address;

    /// Returns the value to send (in wei)
    fn value(&self) -> U256;

    /// Returns the calldata
    fn data(&self) -> Bytes;

    /// Returns the operation type (Call or DelegateCall)
    fn operation(&self) -> Operation;
}

/// A single atomic call: target, value, calldata and operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaTransactionData {
    /// Target address
    pub to: Address,
    /// Value to send
    pub value: U256,
    /// Calldata
    pub data: Bytes,
    /// Operation type
    pub operation: Operation,
}

impl MetaTransactionData {
    /// Creates a new call with the given parameters
    pub fn new(to: Address, value: U256, data: impl Into<Bytes>) -> Self {
        Self {
            to,
            value,
            data: data.into(),
            operation: Operation::Call,
        }
    }

    /// Creates a zero-value call
    pub fn call(to: Address, data: impl Into<Bytes>) -> Self {
        Self::new(to, U256::ZERO, data)
    }

    /// Creates a delegate call
    pub fn delegate_call(to: Address, data: impl Into<Bytes>) -> Self {
        Self {
            to,
            value: U256::ZERO,
            data: data.into(),
            operation: Operation::DelegateCall,
        }
    }

    /// Sets the operation type
    pub fn with_operation(mut self, operation: Operation) -> Self {
        self.operation = operation;
        self
    }

    /// Sets the value
    pub fn with_value(mut self, value: U256) -> Self {
        self.value = value;
        self
    }
}

impl SafeCall for MetaTransactionData {
    fn to(&self) -> Address {
        self.to
    }

    fn value(&self) -> U256 {
        self.value
    }

    fn data(&self) -> Bytes {
        self.data.clone()
    }

    fn operation(&self) -> Operation {
        self.operation
    }
}

/// A typed call wrapping a sol! macro generated call type
#[derive(Debug, Clone)]
pub struct TypedCall<C: SolCall> {
    /// Target address
    pub to: Address,
    /// Value to send
    pub value: U256,
    /// The typed call data
    pub call: C,
    /// Operation type
    pub operation: Operation,
}

impl<C: SolCall> TypedCall<C> {
    /// Creates a new TypedCall
    pub fn new(to: Address, call: C) -> Self {
        Self {
            to,
            value: U256::ZERO,
            call,
            operation: Operation::Call,
        }
    }

    /// Sets the value
    pub fn with_value(mut self, value: U256) -> Self {
        self.value = value;
        self
    }

    /// Sets the operation type
    pub fn with_operation(mut self, operation: Operation) -> Self {
        self.operation = operation;
        self
    }
}

impl<C: SolCall + Clone> SafeCall for TypedCall<C> {
    fn to(&self) -> Address {
        self.to
    }

    fn value(&self) -> U256 {
        self.value
    }

    fn data(&self) -> Bytes {
        self.call.abi_encode().into()
    }

    fn operation(&self) -> Operation {
        self.operation
    }
}

impl<C: SolCall + Clone> From<TypedCall<C>> for MetaTransactionData {
    fn from(typed: TypedCall<C>) -> Self {
        MetaTransactionData {
            to: typed.to,
            value: typed.value,
            data: typed.call.abi_encode().into(),
            operation: typed.operation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contracts::IERC20;
    use alloy::primitives::address;

    #[test]
    fn test_call_new() {
        let to = address!("0x1234567890123456789012345678901234567890");
        let value = U256::from(1000);
        let data = Bytes::from(vec![0x01, 0x02, 0x03]);

        let call = MetaTransactionData::new(to, value, data.clone());

        assert_eq!(call.to(), to);
        assert_eq!(call.value(), value);
        assert_eq!(call.data(), data);
        assert_eq!(call.operation(), Operation::Call);
    }

    #[test]
    fn test_delegate_call() {
        let to = address!("0x1234567890123456789012345678901234567890");
        let call = MetaTransactionData::delegate_call(to, vec![0x01]);

        assert_eq!(call.value(), U256::ZERO);
        assert_eq!(call.operation(), Operation::DelegateCall);
    }

    #[test]
    fn test_meta_transaction_json_round_trip() {
        let call = MetaTransactionData::new(
            address!("0x2791Bca1f2de4661ED88A30C99A7a9449Aa84174"),
            U256::from(1000),
            vec![0xa9, 0x05, 0x9c, 0xbb],
        )
        .with_operation(Operation::DelegateCall);

        let json = serde_json::to_string(&call).unwrap();
        // Bytes serialize as 0x-prefixed hex
        assert!(json.contains("\"0xa9059cbb\""));

        let decoded: MetaTransactionData = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, call);
    }

    #[test]
    fn test_typed_call_conversion() {
        let token = address!("0x2791Bca1f2de4661ED88A30C99A7a9449Aa84174");
        let recipient = address!("0x1111111111111111111111111111111111111111");
        let typed = TypedCall::new(
            token,
            IERC20::transferCall {
                to: recipient,
                amount: U256::from(5000),
            },
        );

        let meta: MetaTransactionData = typed.into();
        assert_eq!(meta.to, token);
        // transfer(address,uint256) selector
        assert_eq!(&meta.data[..4], &[0xa9, 0x05, 0x9c, 0xbb]);
    }
}
