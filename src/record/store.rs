//! Record Store
//!
//! An explicit store object over the local agent's persistent
//! key-value area. Most-recent-first ordering, best-effort
//! durability: serialization or persistence failures degrade to an
//! empty store or a dropped write, logged but never propagated as a
//! blocking error.

use tracing::{debug, warn};

use crate::commit::ProofDigest;
use crate::ledger::KeyValueStore;
use super::proof::ProofRecord;

/// Store configuration.
#[derive(Clone, Debug)]
pub struct StoreConfig {
    /// Key the serialized record list is saved under.
    pub key: String,
    /// File path for file-backed stores.
    pub path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            key: "proofmark.records".to_string(),
            path: "proofmark-store.json".to_string(),
        }
    }
}

impl StoreConfig {
    /// Create config from environment variables, falling back to the
    /// defaults for anything unset.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            key: std::env::var("PROOFMARK_STORE_KEY").unwrap_or(defaults.key),
            path: std::env::var("PROOFMARK_STORE_PATH").unwrap_or(defaults.path),
        }
    }
}

/// An ordered collection of proof records with injected persistence.
///
/// Insertion order is most-recent-first. No uniqueness constraint on
/// digests: duplicate uploads at different timestamps are distinct
/// valid records, and deduplication is a policy for callers.
pub struct ProofRecordStore<S: KeyValueStore> {
    records: Vec<ProofRecord>,
    kv: S,
    key: String,
}

impl<S: KeyValueStore> ProofRecordStore<S> {
    /// Open the store, rehydrating from the persistent area.
    ///
    /// A missing or malformed payload rehydrates as an empty store;
    /// no error escapes.
    pub fn open(kv: S, config: &StoreConfig) -> Self {
        let records = match kv.load(&config.key) {
            Some(raw) => match serde_json::from_str::<Vec<ProofRecord>>(&raw) {
                Ok(records) => records,
                Err(err) => {
                    warn!(key = %config.key, %err, "corrupt record store payload, starting empty");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };
        debug!(count = records.len(), "record store opened");
        Self {
            records,
            kv,
            key: config.key.clone(),
        }
    }

    /// The records, most recent first.
    pub fn records(&self) -> &[ProofRecord] {
        &self.records
    }

    /// Number of held records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Find a record by its digest.
    pub fn find(&self, digest: &ProofDigest) -> Option<&ProofRecord> {
        self.records.iter().find(|r| &r.proof == digest)
    }

    /// Insert a record at the front and flush.
    pub fn insert(&mut self, record: ProofRecord) {
        self.records.insert(0, record);
        self.flush();
    }

    /// Replace the record matching `prior` in place and flush.
    /// Returns false when no record matches.
    pub fn replace(&mut self, prior: &ProofDigest, record: ProofRecord) -> bool {
        match self.records.iter().position(|r| &r.proof == prior) {
            Some(idx) => {
                self.records[idx] = record;
                self.flush();
                true
            }
            None => false,
        }
    }

    /// Serialize and save the whole store, best-effort. A failed save
    /// keeps the in-memory state authoritative for this session.
    pub fn flush(&mut self) {
        let payload = match serde_json::to_string(&self.records) {
            Ok(payload) => payload,
            Err(err) => {
                warn!(%err, "record store serialization failed, skipping save");
                return;
            }
        };
        if let Err(err) = self.kv.save(&self.key, &payload) {
            warn!(%err, "record store save failed, continuing in memory");
        }
    }
}
