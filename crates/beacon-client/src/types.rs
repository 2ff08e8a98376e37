use alloy_primitives::{B256, aliases::B32};
use harness_chain::BlsPublicKey;
use serde::{Deserialize, Serialize};

/// Wrapper matching the `{"data": ...}` envelope of beacon API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataResponse<T> {
    pub data: T,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncStatus {
    #[serde(with = "serde_utils::quoted_u64")]
    pub head_slot: u64,
    #[serde(with = "serde_utils::quoted_u64")]
    pub sync_distance: u64,
    pub is_syncing: bool,
}

impl SyncStatus {
    pub fn is_synced(&self) -> bool {
        !self.is_syncing
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenesisDetails {
    #[serde(with = "serde_utils::quoted_u64")]
    pub genesis_time: u64,
    pub genesis_validators_root: B256,
    pub genesis_fork_version: B32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidatorSummary {
    #[serde(with = "serde_utils::quoted_u64")]
    pub index: u64,
    pub validator: ValidatorDescription,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidatorDescription {
    pub pubkey: BlsPublicKey,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sync_status_deserializes_quoted_slots() {
        let status: DataResponse<SyncStatus> = serde_json::from_str(
            r#"{"data":{"head_slot":"12345","sync_distance":"0","is_syncing":false}}"#,
        )
        .unwrap();
        assert_eq!(status.data.head_slot, 12345);
        assert!(status.data.is_synced());
    }

    #[test]
    fn genesis_details_deserialize() {
        let genesis: DataResponse<GenesisDetails> = serde_json::from_str(
            r#"{"data":{
                "genesis_time":"1606824023",
                "genesis_validators_root":"0x4b363db94e286120d76eb905340fdd4e54bfe9f06bf33ff6cf5ad27f511bfe95",
                "genesis_fork_version":"0x00000000"
            }}"#,
        )
        .unwrap();
        assert_eq!(genesis.data.genesis_time, 1606824023);
        assert_eq!(genesis.data.genesis_fork_version, B32::ZERO);
    }
}
