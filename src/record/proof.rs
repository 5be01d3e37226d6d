//! Proof Records
//!
//! The aggregate entity binding a content token to an owner and a
//! timestamp through its commitment digest. A record is only as good
//! as the invariant `proof == commit(cid, owner, ts)`; anything
//! failing it is corrupt or tampered and must be flagged, never
//! silently trusted.

use serde::{Serialize, Deserialize};
use thiserror::Error;

use crate::cid::ContentToken;
use crate::commit::{commit_parts, OwnerAddress, ProofDigest};

/// A proof-of-authorship record.
///
/// Created at upload-completion time; immutable once anchored. A
/// record may exist unanchored (local-only) indefinitely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofRecord {
    /// Canonical content token.
    pub cid: ContentToken,
    /// Normalized owner address.
    pub owner: OwnerAddress,
    /// Commitment digest over (cid, owner, ts).
    pub proof: ProofDigest,
    /// Seconds since epoch; ledger-recorded when anchored, wall-clock
    /// otherwise.
    pub ts: u64,
    /// Ledger transaction reference, when anchored. Independent
    /// corroboration only; never part of the digest.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub tx_hash: Option<String>,
    /// Optional display title.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub title: Option<String>,
    /// Optional display description.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,
}

/// Verification failure: the stored digest is not the recomputed one.
///
/// Always surfaced to the caller; a mismatch may indicate tampering.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerifyError {
    /// Recomputed digest differs from the stored digest.
    #[error("proof digest mismatch: stored {stored}, recomputed {recomputed}")]
    Mismatch {
        /// Digest carried by the record.
        stored: ProofDigest,
        /// Digest recomputed from the record's fields.
        recomputed: ProofDigest,
    },
}

/// Descriptive metadata attached to a record at creation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordMeta {
    /// Display title.
    pub title: Option<String>,
    /// Display description.
    pub description: Option<String>,
}

impl RecordMeta {
    /// Metadata with a title only.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            description: None,
        }
    }
}

impl ProofRecord {
    /// Build a record, computing its digest from the given triple.
    pub fn new(
        cid: ContentToken,
        owner: OwnerAddress,
        ts: u64,
        tx_hash: Option<String>,
        meta: RecordMeta,
    ) -> Self {
        let proof = commit_parts(cid.value(), &owner, ts);
        ProofRecord {
            cid,
            owner,
            proof,
            ts,
            tx_hash,
            title: meta.title,
            description: meta.description,
        }
    }

    /// Recompute the commitment from the record's fields and compare
    /// byte-for-byte against the stored digest.
    ///
    /// Success means the record is internally consistent; it does not
    /// by itself prove non-repudiation (that corroboration comes from
    /// the ledger anchor, if present).
    pub fn verify(&self) -> Result<(), VerifyError> {
        let recomputed = commit_parts(self.cid.value(), &self.owner, self.ts);
        if recomputed != self.proof {
            return Err(VerifyError::Mismatch {
                stored: self.proof,
                recomputed,
            });
        }
        Ok(())
    }

    /// Whether this record carries a ledger anchor reference.
    pub fn is_anchored(&self) -> bool {
        self.tx_hash.is_some()
    }
}
