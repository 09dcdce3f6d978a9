//! ERC-4337 Safe operations
//!
//! User-operation construction for both EntryPoint generations, nonce
//! packing, and the SafeOp EIP-712 hashing the Safe4337Module verifies.

mod factory;
mod nonce;
mod safe_op;
mod user_op;

pub use factory::{new_safe_operation, AnySafeOperation, EntryPointVersion};
pub use nonce::encode_nonce;
pub use safe_op::{
    GasEstimation, SafeOperation, SafeOperationOptions, SafeOperationV06, SafeOperationV07,
};
pub use user_op::{
    pack_account_gas_limits, pack_gas_fees, UserOperation, UserOperationV06, UserOperationV07,
};
