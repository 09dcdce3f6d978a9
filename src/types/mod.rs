//! Type definitions for Safe transactions

mod call;
mod operation;
mod transaction;

pub use call::{MetaTransactionData, SafeCall, TypedCall};
pub use operation::Operation;
pub use transaction::{SafeTransaction, SafeTransactionData};
