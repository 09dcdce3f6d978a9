//! Version registry for Safe contract deployments
//!
//! Maps (contract family, semantic version, chain id) to a descriptor holding
//! the canonical deployment address plus any per-network overrides. Resolution
//! is pure: the same inputs always produce the same descriptor.

mod deployments;

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Contract families shipped with each Safe release
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ContractFamily {
    /// The Safe singleton (L1 variant)
    Safe,
    /// The Safe singleton with L2 event emission
    SafeL2,
    /// Batching contract, allows DelegateCall
    MultiSend,
    /// Batching contract, Call operations only
    MultiSendCallOnly,
    /// CREATE/CREATE2 deployment helper
    CreateCall,
    /// On-chain message signing library
    SignMessageLib,
    /// Accessor used for simulating transactions via DelegateCall
    SimulateTxAccessor,
    /// Fallback handler implementing EIP-1271 and friends
    CompatibilityFallbackHandler,
    /// Factory deploying Safe proxies via CREATE2
    SafeProxyFactory,
}

impl fmt::Display for ContractFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ContractFamily::Safe => "Safe",
            ContractFamily::SafeL2 => "SafeL2",
            ContractFamily::MultiSend => "MultiSend",
            ContractFamily::MultiSendCallOnly => "MultiSendCallOnly",
            ContractFamily::CreateCall => "CreateCall",
            ContractFamily::SignMessageLib => "SignMessageLib",
            ContractFamily::SimulateTxAccessor => "SimulateTxAccessor",
            ContractFamily::CompatibilityFallbackHandler => "CompatibilityFallbackHandler",
            ContractFamily::SafeProxyFactory => "SafeProxyFactory",
        };
        f.write_str(name)
    }
}

/// Supported Safe contract versions, oldest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SafeVersion {
    /// Safe v1.1.1
    V1_1_1,
    /// Safe v1.2.0
    V1_2_0,
    /// Safe v1.3.0, first release with L2 variant and paginated modules
    V1_3_0,
    /// Safe v1.4.1
    V1_4_1,
    /// Safe v1.5.0
    V1_5_0,
}

impl SafeVersion {
    /// All versions the registry knows about
    pub const ALL: [SafeVersion; 5] = [
        SafeVersion::V1_1_1,
        SafeVersion::V1_2_0,
        SafeVersion::V1_3_0,
        SafeVersion::V1_4_1,
        SafeVersion::V1_5_0,
    ];

    /// Returns the semantic version string
    pub fn as_str(&self) -> &'static str {
        match self {
            SafeVersion::V1_1_1 => "1.1.1",
            SafeVersion::V1_2_0 => "1.2.0",
            SafeVersion::V1_3_0 => "1.3.0",
            SafeVersion::V1_4_1 => "1.4.1",
            SafeVersion::V1_5_0 => "1.5.0",
        }
    }

    /// Whether module listing uses `getModulesPaginated` instead of the
    /// legacy `getModules` selector
    pub fn supports_paginated_modules(&self) -> bool {
        *self >= SafeVersion::V1_3_0
    }

    /// Whether the EIP-712 domain separator includes the chain id.
    /// Versions before 1.3.0 hash only the verifying contract.
    pub fn domain_includes_chain_id(&self) -> bool {
        *self >= SafeVersion::V1_3_0
    }

    /// The version of the MultiSend family deployed alongside this Safe
    /// release. Safe 1.2.0 shipped no MultiSend of its own and reuses the
    /// 1.1.1 deployment.
    pub fn companion_multi_send_version(&self) -> SafeVersion {
        match self {
            SafeVersion::V1_1_1 | SafeVersion::V1_2_0 => SafeVersion::V1_1_1,
            other => *other,
        }
    }
}

impl fmt::Display for SafeVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SafeVersion {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "1.1.1" => Ok(SafeVersion::V1_1_1),
            "1.2.0" => Ok(SafeVersion::V1_2_0),
            "1.3.0" => Ok(SafeVersion::V1_3_0),
            "1.4.1" => Ok(SafeVersion::V1_4_1),
            "1.5.0" => Ok(SafeVersion::V1_5_0),
            other => Err(format!("Unknown Safe version: {other}")),
        }
    }
}

/// Resolved deployment information for one (family, version) pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractDescriptor {
    /// Contract family
    pub family: ContractFamily,
    /// Contract version
    pub version: SafeVersion,
    /// Canonical CREATE2 deployment address shared across most networks.
    /// `None` for releases that are rolled out network by network.
    pub default_address: Option<Address>,
    /// Per-network address overrides, keyed by chain id
    pub network_addresses: BTreeMap<u64, Address>,
}

impl ContractDescriptor {
    /// Returns the deployment address for the given chain, preferring a
    /// network-specific override over the canonical default
    pub fn address_for(&self, chain_id: u64) -> Result<Address> {
        if let Some(address) = self.network_addresses.get(&chain_id) {
            return Ok(*address);
        }
        self.default_address.ok_or(Error::NoDeploymentAddress {
            family: self.family,
            version: self.version,
            chain_id,
        })
    }
}

/// Registry of known Safe contract deployments.
///
/// Ships with the canonical address tables and accepts per-network custom
/// addresses for networks where the canonical CREATE2 deployment is absent
/// (or for releases, like 1.5.0, that have no single canonical address yet).
#[derive(Debug, Clone, Default)]
pub struct ContractRegistry {
    custom: BTreeMap<(ContractFamily, u64), Address>,
}

impl ContractRegistry {
    /// Creates a registry with only the canonical deployment tables
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a custom deployment address for a family on one network.
    /// Custom addresses take precedence over the canonical tables.
    pub fn with_custom_address(
        mut self,
        family: ContractFamily,
        chain_id: u64,
        address: Address,
    ) -> Self {
        self.custom.insert((family, chain_id), address);
        self
    }

    /// Resolves the descriptor for a (family, version) pair.
    ///
    /// Fails with [`Error::UnsupportedVersion`] when the pair was never
    /// deployed (e.g. `SafeL2` before 1.3.0).
    pub fn resolve(
        &self,
        family: ContractFamily,
        version: SafeVersion,
    ) -> Result<ContractDescriptor> {
        let default_address = deployments::canonical_address(family, version)?;
        let network_addresses = self
            .custom
            .iter()
            .filter(|((f, _), _)| *f == family)
            .map(|((_, chain_id), address)| (*chain_id, *address))
            .collect();
        Ok(ContractDescriptor {
            family,
            version,
            default_address,
            network_addresses,
        })
    }

    /// Resolves a (family, version) pair straight to its address on a chain
    pub fn resolve_address(
        &self,
        family: ContractFamily,
        version: SafeVersion,
        chain_id: u64,
    ) -> Result<Address> {
        self.resolve(family, version)?.address_for(chain_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    #[test]
    fn test_resolve_safe_versions() {
        let registry = ContractRegistry::new();

        let v141 = registry
            .resolve(ContractFamily::Safe, SafeVersion::V1_4_1)
            .unwrap();
        assert_eq!(
            v141.default_address,
            Some(address!("41675C099F32341bf84BFc5382aF534df5C7461a"))
        );

        let v130 = registry
            .resolve(ContractFamily::Safe, SafeVersion::V1_3_0)
            .unwrap();
        assert_eq!(
            v130.default_address,
            Some(address!("d9Db270c1B5E3Bd161E8c8503c55cEABeE709552"))
        );
    }

    #[test]
    fn test_resolve_unsupported_pair() {
        let registry = ContractRegistry::new();
        // No L2 singleton existed before 1.3.0
        let err = registry
            .resolve(ContractFamily::SafeL2, SafeVersion::V1_1_1)
            .unwrap_err();
        assert!(matches!(err, Error::UnsupportedVersion { .. }));
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let registry = ContractRegistry::new();
        let a = registry
            .resolve(ContractFamily::MultiSend, SafeVersion::V1_3_0)
            .unwrap();
        let b = registry
            .resolve(ContractFamily::MultiSend, SafeVersion::V1_3_0)
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_custom_address_override() {
        let custom = address!("00000000000000000000000000000000deadbeef");
        let registry = ContractRegistry::new().with_custom_address(
            ContractFamily::Safe,
            324, // zkSync Era uses non-canonical deployments
            custom,
        );

        let descriptor = registry
            .resolve(ContractFamily::Safe, SafeVersion::V1_4_1)
            .unwrap();
        assert_eq!(descriptor.address_for(324).unwrap(), custom);
        // Other chains still resolve to the canonical address
        assert_eq!(
            descriptor.address_for(1).unwrap(),
            address!("41675C099F32341bf84BFc5382aF534df5C7461a")
        );
    }

    #[test]
    fn test_no_default_address_for_1_5_0() {
        let registry = ContractRegistry::new();
        let descriptor = registry
            .resolve(ContractFamily::Safe, SafeVersion::V1_5_0)
            .unwrap();
        assert_eq!(descriptor.default_address, None);
        let err = descriptor.address_for(1).unwrap_err();
        assert!(matches!(err, Error::NoDeploymentAddress { .. }));
    }

    #[test]
    fn test_version_ordering_and_quirks() {
        assert!(SafeVersion::V1_2_0 < SafeVersion::V1_3_0);
        assert!(!SafeVersion::V1_2_0.supports_paginated_modules());
        assert!(SafeVersion::V1_3_0.supports_paginated_modules());
        assert!(!SafeVersion::V1_1_1.domain_includes_chain_id());
        assert!(SafeVersion::V1_4_1.domain_includes_chain_id());
    }

    #[test]
    fn test_version_parse_round_trip() {
        for version in SafeVersion::ALL {
            assert_eq!(version.as_str().parse::<SafeVersion>().unwrap(), version);
        }
        assert!("2.0.0".parse::<SafeVersion>().is_err());
    }

    #[test]
    fn test_companion_multi_send_version() {
        assert_eq!(
            SafeVersion::V1_2_0.companion_multi_send_version(),
            SafeVersion::V1_1_1
        );
        assert_eq!(
            SafeVersion::V1_4_1.companion_multi_send_version(),
            SafeVersion::V1_4_1
        );
    }
}
