use alloy_primitives::{B256, aliases::B32};
use serde::{Deserialize, Serialize};
use tree_hash::TreeHash;
use tree_hash_derive::TreeHash;

#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize, TreeHash)]
pub struct ForkData {
    pub current_version: B32,
    pub genesis_validators_root: B256,
}

impl ForkData {
    /// Return the 32-byte fork data root for the ``current_version`` and
    /// ``genesis_validators_root``. This is used primarily in signature domains to avoid
    /// collisions across forks/chains.
    pub fn compute_fork_data_root(&self) -> B256 {
        self.tree_hash_root()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fork_data_root_changes_with_inputs() {
        let base = ForkData {
            current_version: B32::ZERO,
            genesis_validators_root: B256::ZERO,
        };
        let other_version = ForkData {
            current_version: B32::from([0, 0, 0, 1]),
            ..base
        };
        let other_root = ForkData {
            genesis_validators_root: B256::repeat_byte(1),
            ..base
        };

        assert_ne!(base.compute_fork_data_root(), other_version.compute_fork_data_root());
        assert_ne!(base.compute_fork_data_root(), other_root.compute_fork_data_root());
    }
}
