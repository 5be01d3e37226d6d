//! Proof Record Lifecycle
//!
//! The aggregate record type, its ordered local store, the lifecycle
//! manager orchestrating create / persist / verify / late-anchor, and
//! the portable certificate interchange format.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  RECORD LIFECYCLE                           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  proof.rs    - ProofRecord aggregate + verification         │
//! │  store.rs    - Ordered store over injected persistence      │
//! │  manager.rs  - Create / persist / verify / late-anchor      │
//! │  export.rs   - Portable proof certificate (JSON)            │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod export;
pub mod manager;
pub mod proof;
pub mod store;

pub use export::{CertificateError, ProofCertificate};
pub use manager::{CreateError, LateAnchorError, LifecycleManager};
pub use proof::{ProofRecord, RecordMeta, VerifyError};
pub use store::{ProofRecordStore, StoreConfig};
