//! # Proofmark
//!
//! Deterministic proof-of-authorship commitments: bind a content
//! identifier to an owner address and a timestamp, optionally anchor
//! the commitment on an append-only ledger, and re-derive it later to
//! verify the claim without the original content.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       PROOFMARK                             │
//! ├─────────────────────────────────────────────────────────────┤
//! │  cid/            - Content addressing resolver              │
//! │  ├── token.rs    - Canonical token shapes + validation      │
//! │  └── resolve.rs  - Raw identifier normalization, gateways   │
//! │                                                             │
//! │  commit/         - Commitment function (pure)               │
//! │  ├── address.rs  - EIP-55 owner address normalization       │
//! │  └── digest.rs   - keccak-256 commitment packing            │
//! │                                                             │
//! │  record/         - Proof record lifecycle                   │
//! │  ├── proof.rs    - Aggregate + recompute-and-compare verify │
//! │  ├── store.rs    - Ordered store, best-effort persistence   │
//! │  ├── manager.rs  - Create / persist / verify / late-anchor  │
//! │  └── export.rs   - Portable proof certificate (JSON)        │
//! │                                                             │
//! │  ledger/         - External interface contracts             │
//! │  ├── mod.rs      - Collaborator traits                      │
//! │  ├── event.rs    - Bit-exact on-ledger record format        │
//! │  ├── abi.rs      - ABI document normalization               │
//! │  └── mock.rs     - In-process collaborators                 │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Commitment Guarantee
//!
//! The commitment function is **pure and order-sensitive**: for
//! identical `(token, owner, timestamp)` inputs it returns
//! byte-identical 32-byte digests, and changing or permuting any
//! field changes the digest. The packing is
//! `keccak256(token_utf8 || owner_20 || ts_be_32)`, using the
//! anchoring ledger's own primitive, so any independent verifier can
//! recompute a published digest straight from on-ledger data.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod cid;
pub mod commit;
pub mod ledger;
pub mod record;

// Re-export commonly used types
pub use cid::{display_urls, resolve_token, ContentToken, GatewayConfig, TokenKind};
pub use commit::{commit, commit_parts, AddressError, OwnerAddress, ProofDigest};
pub use ledger::{
    AnchorError, AnchorReceipt, ContentUploader, IdentityProvider, KeyValueStore, LedgerAnchor,
    LedgerRecord, StoreError, UploadError,
};
pub use record::{
    CreateError, LateAnchorError, LifecycleManager, ProofCertificate, ProofRecord,
    ProofRecordStore, RecordMeta, StoreConfig, VerifyError,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
