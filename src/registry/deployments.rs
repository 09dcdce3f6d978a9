//! Canonical Safe deployment addresses
//!
//! These are the CREATE2 deterministic-deployment addresses shared across
//! networks, taken from the safe-deployments registry. Networks with
//! non-canonical deployments (zkSync Era, some appchains) register overrides
//! through [`ContractRegistry::with_custom_address`](super::ContractRegistry::with_custom_address).

use alloy::primitives::{address, Address};

use super::{ContractFamily, SafeVersion};
use crate::error::{Error, Result};

/// Returns the canonical address for a (family, version) pair.
///
/// `Ok(None)` means the pair is a known release without a single canonical
/// address (1.5.0 is rolled out per network). `Err` means the pair never
/// existed as a deployment.
pub(super) fn canonical_address(
    family: ContractFamily,
    version: SafeVersion,
) -> Result<Option<Address>> {
    use ContractFamily as F;
    use SafeVersion as V;

    let unsupported = || Error::UnsupportedVersion { family, version };

    let address = match (family, version) {
        (F::Safe, V::V1_1_1) => Some(address!("34CfAC646f301356fAa8B21e94227e3583Fe3F5F")),
        (F::Safe, V::V1_2_0) => Some(address!("6851D6fDFAfD08c0295C392436245E5bc78B0185")),
        (F::Safe, V::V1_3_0) => Some(address!("d9Db270c1B5E3Bd161E8c8503c55cEABeE709552")),
        (F::Safe, V::V1_4_1) => Some(address!("41675C099F32341bf84BFc5382aF534df5C7461a")),
        (F::Safe, V::V1_5_0) => None,

        (F::SafeL2, V::V1_3_0) => Some(address!("3E5c63644E683549055b9Be8653de26E0B4CD36E")),
        (F::SafeL2, V::V1_4_1) => Some(address!("29fcB43b46531BcA003ddC8FCB67FFE91900C762")),
        (F::SafeL2, V::V1_5_0) => None,

        (F::MultiSend, V::V1_1_1) => Some(address!("8D29bE29923b68abfDD21e541b9374737B49cdAD")),
        (F::MultiSend, V::V1_3_0) => Some(address!("A238CBeb142c10Ef7Ad8442C6D1f9E89e07e7761")),
        (F::MultiSend, V::V1_4_1) => Some(address!("38869bf66a61cF6bDB996A6aE40D5853Fd43B526")),
        (F::MultiSend, V::V1_5_0) => None,

        (F::MultiSendCallOnly, V::V1_3_0) => {
            Some(address!("40A2aCCbd92BCA938b02010E17A5b8929b49130D"))
        }
        (F::MultiSendCallOnly, V::V1_4_1) => {
            Some(address!("9641d764fc13c8B624c04430C7356C1C7C8102e2"))
        }
        (F::MultiSendCallOnly, V::V1_5_0) => None,

        (F::CreateCall, V::V1_3_0) => Some(address!("7cbB62EaA69F79e6873cD1ecB2392971036cFAa4")),
        (F::CreateCall, V::V1_4_1) => Some(address!("9b35Af71d77eaf8d7e40252370304687390A1A52")),
        (F::CreateCall, V::V1_5_0) => None,

        (F::SignMessageLib, V::V1_3_0) => {
            Some(address!("A65387F16B013cf2Af4605Ad8aA5ec25a2cbA3a2"))
        }
        (F::SignMessageLib, V::V1_4_1) => {
            Some(address!("d53cd0aB83D845Ac265BE939c57F53AD838012c9"))
        }
        (F::SignMessageLib, V::V1_5_0) => None,

        (F::SimulateTxAccessor, V::V1_3_0) => {
            Some(address!("59AD6735bCd8152B84860Cb256dD9e96b85F69Da"))
        }
        (F::SimulateTxAccessor, V::V1_4_1) => {
            Some(address!("3d4BA2E0884aa488718476ca2FB8Efc291A46199"))
        }
        (F::SimulateTxAccessor, V::V1_5_0) => None,

        (F::CompatibilityFallbackHandler, V::V1_3_0) => {
            Some(address!("f48f2B2d2a534e402487b3ee7C18c33Aec0Fe5e4"))
        }
        (F::CompatibilityFallbackHandler, V::V1_4_1) => {
            Some(address!("fd0732Dc9E303f09fCEf3a7388Ad10A83459Ec99"))
        }
        (F::CompatibilityFallbackHandler, V::V1_5_0) => None,

        (F::SafeProxyFactory, V::V1_1_1) => {
            Some(address!("76E2cFc1F5Fa8F6a5b3fC4c8F4788F0116861F9B"))
        }
        (F::SafeProxyFactory, V::V1_3_0) => {
            Some(address!("a6B71E26C5e0845f74c812102Ca7114b6a896AB2"))
        }
        (F::SafeProxyFactory, V::V1_4_1) => {
            Some(address!("4e1DCf7AD4e460CfD30791CCC4F9c8a4f820ec67"))
        }
        (F::SafeProxyFactory, V::V1_5_0) => None,

        _ => return Err(unsupported()),
    };

    Ok(address)
}
