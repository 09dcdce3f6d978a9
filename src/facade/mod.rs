//! Typed facades over the Safe contract suite
//!
//! One parametrized facade per contract family, generic over the
//! [`ChainProvider`](crate::provider::ChainProvider) capability. Version
//! differences (legacy module listing, domain separator shape) are branch
//! points driven by the resolved [`SafeVersion`](crate::registry::SafeVersion),
//! not separate types.

mod libraries;
mod proxy_factory;
mod safe;

pub use libraries::{
    CreateCallContract, FallbackHandlerContract, MultiSendContract, SignMessageLibContract,
    SimulateTxAccessorContract, SimulationOutcome,
};
pub use proxy_factory::SafeProxyFactoryContract;
pub use safe::SafeContract;
