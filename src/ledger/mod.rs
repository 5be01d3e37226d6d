//! External Interface Contracts
//!
//! Boundary traits for the collaborators the lifecycle manager depends
//! on, plus the bit-exact on-ledger record format and ABI document
//! normalization.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   LEDGER BOUNDARY                           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  mod.rs      - Collaborator traits and boundary errors      │
//! │  event.rs    - On-ledger record format (cross-verifiable)   │
//! │  abi.rs      - Contract ABI document normalization          │
//! │  mock.rs     - In-process collaborators (demo + tests)      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The core never retries, never times out, and never cancels an
//! in-flight call; bounded latency, if required, is imposed by the
//! implementation behind these traits.

pub mod abi;
pub mod event;
pub mod mock;

use async_trait::async_trait;
use thiserror::Error;

use crate::cid::ContentToken;
use crate::commit::OwnerAddress;

/// Successful result of an anchoring call.
///
/// The ledger independently reports the signing owner and its recorded
/// time; both feed the commitment, so the published digest is
/// recomputable by any third party from on-ledger data alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorReceipt {
    /// Ledger transaction reference (`0x`-prefixed hash).
    pub tx_hash: String,
    /// Owner that signed the anchoring transaction.
    pub owner: OwnerAddress,
    /// Ledger-recorded time, seconds since epoch.
    pub ts: u64,
}

/// Anchoring failures. All of them degrade to a local-only record at
/// the caller's discretion; none are fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnchorError {
    /// The caller has not established a signing identity.
    #[error("no signing identity available")]
    NoIdentity,

    /// The ledger could not be reached.
    #[error("anchoring ledger unreachable: {0}")]
    Unreachable(String),

    /// The ledger rejected the anchoring transaction.
    #[error("ledger rejected anchoring transaction: {0}")]
    Rejected(String),
}

/// Local persistent store failures. Recovered by treating the store as
/// empty (reads) or dropping the write (best-effort cache policy).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Read failed.
    #[error("persistent store read failed: {0}")]
    Read(String),

    /// Write failed.
    #[error("persistent store write failed: {0}")]
    Write(String),
}

/// Content upload failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    /// No content-addressing backend reachable.
    #[error("content-addressing backend unreachable: {0}")]
    Unreachable(String),
}

/// Records a commitment on an external append-only ledger.
///
/// Implementations must be idempotent-safe to retry; the core itself
/// never retries.
#[async_trait]
pub trait LedgerAnchor: Send + Sync {
    /// Anchor a content token, returning the ledger's reference,
    /// the signing owner, and the ledger-recorded time.
    async fn anchor(&self, cid: &str) -> Result<AnchorReceipt, AnchorError>;
}

/// Supplies the locally-known owner identity, if any.
pub trait IdentityProvider: Send + Sync {
    /// The current owner, or `None` when no identity is connected.
    fn current_owner(&self) -> Option<OwnerAddress>;
}

/// Durable key-value area of the local agent. Unreliable by contract:
/// callers treat failures as an empty store.
pub trait KeyValueStore: Send {
    /// Load a previously saved value, `None` if absent or unreadable.
    fn load(&self, key: &str) -> Option<String>;

    /// Save a value.
    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Accepts raw file bytes and returns a content token.
///
/// Implementations without a reachable content-addressing backend fall
/// back to a locally-synthesized placeholder token, distinguishable by
/// its reserved prefix.
#[async_trait]
pub trait ContentUploader: Send + Sync {
    /// Upload content bytes, returning their token.
    async fn upload(&self, bytes: &[u8]) -> Result<ContentToken, UploadError>;
}

pub use abi::{normalize_abi, AbiDocument, AbiEntry, AbiError, AbiParam, ContractInterface};
pub use event::{LedgerRecord, LedgerRecordError, META_LEN};
pub use mock::{FailingLedger, FileStore, LocalIdentity, LocalUploader, MemoryStore, MockLedger};
