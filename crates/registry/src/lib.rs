use std::collections::HashMap;

use alloy_primitives::Address;
use harness_chain::{BlsPublicKey, BlsSignature};
use parking_lot::Mutex;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("registration not found for validator {0}")]
    NotFound(BlsPublicKey),
}

/// A validator's most recently submitted registration: who gets paid and the
/// signature covering that declaration. A write always replaces the whole
/// record, never individual fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationRecord {
    pub index: u64,
    pub public_key: BlsPublicKey,
    pub fee_recipient: Address,
    pub signature: BlsSignature,
}

impl RegistrationRecord {
    /// A force-seeded placeholder: zero fee recipient and zero signature, so
    /// downstream duty computation has data before any real registration
    /// arrives.
    pub fn placeholder(index: u64, public_key: BlsPublicKey) -> Self {
        Self {
            index,
            public_key,
            fee_recipient: Address::ZERO,
            signature: BlsSignature::ZERO,
        }
    }
}

/// Concurrency-safe in-memory mapping from validator identity to its latest
/// registration, standing in for the relay's persistent database.
///
/// A single coarse mutex guards the whole map: every operation is atomic per
/// call, writes to the same identity are linearized in call order, and the
/// last writer wins. A production store may shard by identity, as long as
/// those two guarantees hold.
#[derive(Debug, Default)]
pub struct RegistrationStore {
    registrations: Mutex<HashMap<BlsPublicKey, RegistrationRecord>>,
}

impl RegistrationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upsert by public key. Always succeeds; any existing record for that
    /// identity is replaced.
    pub fn save(&self, record: RegistrationRecord) {
        self.registrations
            .lock()
            .insert(record.public_key, record);
    }

    pub fn get(&self, public_key: &BlsPublicKey) -> Result<RegistrationRecord, RegistryError> {
        self.registrations
            .lock()
            .get(public_key)
            .cloned()
            .ok_or(RegistryError::NotFound(*public_key))
    }

    /// Return the registrations for the subset of `public_keys` that have one.
    /// Missing identities are silently omitted, not an error.
    pub fn get_many(&self, public_keys: &[BlsPublicKey]) -> Vec<RegistrationRecord> {
        let registrations = self.registrations.lock();
        public_keys
            .iter()
            .filter_map(|public_key| registrations.get(public_key).cloned())
            .collect()
    }

    /// Return every stored registration. The `timestamp_only` projection is
    /// accepted for interface parity with the relay's database contract but
    /// full records are always returned.
    pub fn get_all(&self, _timestamp_only: bool) -> Vec<RegistrationRecord> {
        self.registrations.lock().values().cloned().collect()
    }

    pub fn count(&self) -> usize {
        self.registrations.lock().len()
    }
}
