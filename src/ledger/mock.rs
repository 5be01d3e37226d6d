//! In-Process Collaborators
//!
//! Stand-ins for the external collaborators: a deterministic mock
//! ledger, a fixed local identity, in-memory and file-backed key-value
//! stores, and a placeholder-synthesizing uploader. The demo binary
//! runs against these; tests use them to drive the lifecycle manager
//! through every phase without any network.

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use sha3::{Digest, Keccak256};
use tracing::debug;

use crate::cid::ContentToken;
use crate::commit::OwnerAddress;
use super::event::LedgerRecord;
use super::{
    AnchorError, AnchorReceipt, ContentUploader, IdentityProvider, KeyValueStore, LedgerAnchor,
    StoreError, UploadError,
};

/// Current wall-clock time in seconds since epoch, clamped at zero.
fn wall_clock_ts() -> u64 {
    chrono::Utc::now().timestamp().max(0) as u64
}

/// A deterministic in-process ledger.
///
/// Anchoring builds the on-ledger record and derives the transaction
/// hash from its canonical encoding, so receipts are reproducible for
/// identical inputs at a fixed time.
#[derive(Debug, Clone)]
pub struct MockLedger {
    signer: Option<OwnerAddress>,
    fixed_ts: Option<u64>,
}

impl MockLedger {
    /// Ledger with a connected signing identity and wall-clock time.
    pub fn new(signer: OwnerAddress) -> Self {
        Self {
            signer: Some(signer),
            fixed_ts: None,
        }
    }

    /// Ledger with no connected identity; every anchor call fails with
    /// the distinguishable no-identity condition.
    pub fn disconnected() -> Self {
        Self {
            signer: None,
            fixed_ts: None,
        }
    }

    /// Pin the ledger-recorded time (reproducible receipts in tests).
    pub fn at_time(mut self, ts: u64) -> Self {
        self.fixed_ts = Some(ts);
        self
    }
}

#[async_trait]
impl LedgerAnchor for MockLedger {
    async fn anchor(&self, cid: &str) -> Result<AnchorReceipt, AnchorError> {
        let owner = self.signer.clone().ok_or(AnchorError::NoIdentity)?;
        let ts = self.fixed_ts.unwrap_or_else(wall_clock_ts);

        let record = LedgerRecord::new(owner.clone(), cid.to_string(), ts);
        let tx_hash = format!("0x{}", hex::encode(Keccak256::digest(record.encode())));
        debug!(cid, tx_hash = %tx_hash, ts, "mock ledger anchored record");

        Ok(AnchorReceipt { tx_hash, owner, ts })
    }
}

/// A ledger that is never reachable. Exercises the local-only
/// fallback path.
#[derive(Debug, Clone, Default)]
pub struct FailingLedger;

#[async_trait]
impl LedgerAnchor for FailingLedger {
    async fn anchor(&self, _cid: &str) -> Result<AnchorReceipt, AnchorError> {
        Err(AnchorError::Unreachable("no ledger configured".to_string()))
    }
}

/// A fixed local identity, possibly absent.
#[derive(Debug, Clone, Default)]
pub struct LocalIdentity(Option<OwnerAddress>);

impl LocalIdentity {
    /// Identity provider holding a connected owner.
    pub fn connected(owner: OwnerAddress) -> Self {
        Self(Some(owner))
    }

    /// Identity provider with nothing connected.
    pub fn disconnected() -> Self {
        Self(None)
    }
}

impl IdentityProvider for LocalIdentity {
    fn current_owner(&self) -> Option<OwnerAddress> {
        self.0.clone()
    }
}

/// In-memory key-value store.
///
/// `fail_writes` simulates an unreliable persistence area.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    map: HashMap<String, String>,
    /// When set, every save fails.
    pub fail_writes: bool,
}

impl MemoryStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with one entry (e.g. a corrupt payload).
    pub fn seeded(key: &str, value: &str) -> Self {
        let mut map = HashMap::new();
        map.insert(key.to_string(), value.to_string());
        Self {
            map,
            fail_writes: false,
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> Option<String> {
        self.map.get(key).cloned()
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::Write("simulated write failure".to_string()));
        }
        self.map.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// File-backed key-value store: one JSON object per file.
///
/// Unreadable or malformed files read as absent, honoring the
/// best-effort cache contract.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Store backed by the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_map(&self) -> HashMap<String, String> {
        std::fs::read_to_string(&self.path)
            .ok()
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default()
    }
}

impl KeyValueStore for FileStore {
    fn load(&self, key: &str) -> Option<String> {
        self.read_map().remove(key)
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut map = self.read_map();
        map.insert(key.to_string(), value.to_string());
        let payload = serde_json::to_string_pretty(&map)
            .map_err(|e| StoreError::Write(e.to_string()))?;
        std::fs::write(&self.path, payload).map_err(|e| StoreError::Write(e.to_string()))
    }
}

/// Uploader with no remote content-addressing backend: synthesizes the
/// reserved-prefix placeholder token from the content bytes.
#[derive(Debug, Clone, Default)]
pub struct LocalUploader;

#[async_trait]
impl ContentUploader for LocalUploader {
    async fn upload(&self, bytes: &[u8]) -> Result<ContentToken, UploadError> {
        Ok(ContentToken::local_for(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commit::commit_parts;

    const OWNER: &str = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";

    fn owner() -> OwnerAddress {
        OwnerAddress::parse(OWNER).unwrap()
    }

    #[tokio::test]
    async fn test_mock_ledger_receipt_is_recomputable() {
        let ledger = MockLedger::new(owner()).at_time(1_700_000_000);
        let receipt = ledger.anchor("QmTest").await.unwrap();

        assert_eq!(receipt.owner, owner());
        assert_eq!(receipt.ts, 1_700_000_000);

        // The receipt corresponds to a valid on-ledger record.
        let record = LedgerRecord::new(receipt.owner.clone(), "QmTest".to_string(), receipt.ts);
        assert!(record.validate().is_ok());
        assert_eq!(record.proof, commit_parts("QmTest", &receipt.owner, receipt.ts));
    }

    #[tokio::test]
    async fn test_mock_ledger_deterministic_tx_hash() {
        let ledger = MockLedger::new(owner()).at_time(42);
        let a = ledger.anchor("QmTest").await.unwrap();
        let b = ledger.anchor("QmTest").await.unwrap();
        assert_eq!(a.tx_hash, b.tx_hash);

        let c = ledger.anchor("QmOther").await.unwrap();
        assert_ne!(a.tx_hash, c.tx_hash);
    }

    #[tokio::test]
    async fn test_disconnected_ledger_reports_no_identity() {
        let ledger = MockLedger::disconnected();
        assert_eq!(
            ledger.anchor("QmTest").await.unwrap_err(),
            AnchorError::NoIdentity
        );
    }

    #[tokio::test]
    async fn test_failing_ledger_unreachable() {
        let err = FailingLedger.anchor("QmTest").await.unwrap_err();
        assert!(matches!(err, AnchorError::Unreachable(_)));
    }

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert!(store.load("k").is_none());
        store.save("k", "v").unwrap();
        assert_eq!(store.load("k").as_deref(), Some("v"));
    }

    #[test]
    fn test_memory_store_simulated_failure() {
        let mut store = MemoryStore::new();
        store.fail_writes = true;
        assert!(store.save("k", "v").is_err());
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let mut store = FileStore::new(&path);
        assert!(store.load("records").is_none());
        store.save("records", "[1,2,3]").unwrap();

        // A fresh handle sees the persisted value.
        let reopened = FileStore::new(&path);
        assert_eq!(reopened.load("records").as_deref(), Some("[1,2,3]"));
    }

    #[test]
    fn test_file_store_corrupt_file_reads_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "not json {{{").unwrap();

        let store = FileStore::new(&path);
        assert!(store.load("records").is_none());
    }

    #[tokio::test]
    async fn test_local_uploader_synthesizes_placeholder() {
        let token = LocalUploader.upload(b"file bytes").await.unwrap();
        assert!(token.is_placeholder());
    }
}
