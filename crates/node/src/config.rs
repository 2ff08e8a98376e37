use alloy_primitives::{B256, hex};
use anyhow::Context;

/// Well-known development key, never used on a real network.
pub const DEFAULT_SECRET_KEY: &str =
    "5eae315483f028b5cdd5d1090ff0c7618b18737ea9bf3c35047189db22835c48";

pub const DEFAULT_API_LISTEN_ADDR: &str = "127.0.0.1";
pub const DEFAULT_API_LISTEN_PORT: u16 = 5555;
pub const DEFAULT_BEACON_CLIENT_ADDR: &str = "http://localhost:8000";

/// When placeholder registrations are seeded during startup.
///
/// The two policies are mutually exclusive deployment modes, not a fallback
/// chain: `Immediate` bulk-inserts placeholders for every known validator as
/// soon as infrastructure is up; `SignalGated` waits for the API layer's
/// first validator-duty update and then forces a duty recomputation instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeedingPolicy {
    Immediate,
    #[default]
    SignalGated,
}

/// Knobs the sequencer itself consumes. The chain client is constructed by
/// the caller and passed in, so its address is not part of this config.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    pub api_listen_addr: String,
    pub api_listen_port: u16,
    pub api_secret_key: String,
    pub seeding_policy: SeedingPolicy,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            api_listen_addr: DEFAULT_API_LISTEN_ADDR.to_string(),
            api_listen_port: DEFAULT_API_LISTEN_PORT,
            api_secret_key: DEFAULT_SECRET_KEY.to_string(),
            seeding_policy: SeedingPolicy::default(),
        }
    }
}

/// Decode the relay API secret key: 32 bytes of hex, `0x` prefix optional.
pub fn decode_secret_key(secret_key: &str) -> anyhow::Result<B256> {
    let bytes = hex::decode(secret_key.trim_start_matches("0x"))
        .context("incorrect secret key provided")?;
    B256::try_from(bytes.as_slice()).context("incorrect secret key provided")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_default_secret_key() {
        assert!(decode_secret_key(DEFAULT_SECRET_KEY).is_ok());
    }

    #[test]
    fn accepts_0x_prefix() {
        let plain = decode_secret_key(DEFAULT_SECRET_KEY).unwrap();
        let prefixed = decode_secret_key(&format!("0x{DEFAULT_SECRET_KEY}")).unwrap();
        assert_eq!(plain, prefixed);
    }

    #[test]
    fn rejects_non_hex_and_wrong_length() {
        assert!(decode_secret_key("not-hex").is_err());
        assert!(decode_secret_key("0xdeadbeef").is_err());
    }
}
