pub mod fork_data;

use alloy_primitives::{B256, FixedBytes, aliases::B32, fixed_bytes};

use crate::fork_data::ForkData;

/// Domain type scoping signatures to builder-registration messages.
pub const DOMAIN_APPLICATION_BUILDER: B32 = fixed_bytes!("0x00000001");

/// A 32-byte signature domain: 4-byte domain type followed by the first
/// 28 bytes of the fork data root.
pub type Domain = B256;

/// BLS12-381 public key bytes, the identity of a validator on the chain.
pub type BlsPublicKey = FixedBytes<48>;

/// BLS12-381 signature bytes.
pub type BlsSignature = FixedBytes<96>;

/// Chain-scoped constants derived once at startup and injected into every
/// downstream service that validates registration signatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainDomainParameters {
    pub genesis_fork_version: B32,
    pub builder_domain: Domain,
}

impl ChainDomainParameters {
    /// Derive the builder domain from the genesis fork version. The genesis
    /// validators root is pinned to zero, matching how relays scope
    /// registration signatures across networks.
    pub fn derive(genesis_fork_version: B32) -> Self {
        Self {
            genesis_fork_version,
            builder_domain: compute_domain(
                DOMAIN_APPLICATION_BUILDER,
                genesis_fork_version,
                B256::ZERO,
            ),
        }
    }
}

/// Return the signature domain for ``domain_type`` on the fork identified by
/// ``fork_version`` and ``genesis_validators_root``.
pub fn compute_domain(domain_type: B32, fork_version: B32, genesis_validators_root: B256) -> Domain {
    let fork_data_root = ForkData {
        current_version: fork_version,
        genesis_validators_root,
    }
    .compute_fork_data_root();

    let mut domain = [0u8; 32];
    domain[..4].copy_from_slice(domain_type.as_slice());
    domain[4..].copy_from_slice(&fork_data_root[..28]);
    Domain::from(domain)
}
