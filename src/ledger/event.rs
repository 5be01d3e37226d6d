//! On-Ledger Record Format
//!
//! The bit-exact shape of a published anchoring event:
//! `(owner, proof, cid, timestamp, meta)` where `meta` is a 32-byte
//! reserved-zero field. The published proof must equal
//! `commit(cid, owner, timestamp)`; that equality is the cross-system
//! contract letting any independent verifier recompute and check a
//! digest straight from ledger data.

use thiserror::Error;

use crate::commit::{commit_parts, OwnerAddress, ProofDigest};

/// Length of the reserved meta field.
pub const META_LEN: usize = 32;

/// A record as published on the anchoring ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerRecord {
    /// Owner that signed the anchoring transaction.
    pub owner: OwnerAddress,
    /// Published commitment digest.
    pub proof: ProofDigest,
    /// Content token string, taken as published.
    pub cid: String,
    /// Ledger-recorded time, seconds since epoch.
    pub timestamp: u64,
    /// Reserved field, must be all zeroes.
    pub meta: [u8; META_LEN],
}

/// Consistency failures of a published record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerRecordError {
    /// Published proof does not match the recomputed commitment.
    #[error("published proof does not match commit(cid, owner, timestamp)")]
    ProofMismatch,

    /// Reserved field carries data.
    #[error("reserved meta field must be all zeroes")]
    MetaNotZero,
}

impl LedgerRecord {
    /// Build a consistent record for publication: the proof is computed
    /// from the other fields and the meta field is zeroed.
    pub fn new(owner: OwnerAddress, cid: String, timestamp: u64) -> Self {
        let proof = commit_parts(&cid, &owner, timestamp);
        LedgerRecord {
            owner,
            proof,
            cid,
            timestamp,
            meta: [0u8; META_LEN],
        }
    }

    /// Check the record's internal consistency as an independent
    /// verifier would: recompute the commitment from the published
    /// fields and require byte equality, and require the reserved
    /// field to be zero.
    pub fn validate(&self) -> Result<(), LedgerRecordError> {
        if self.meta != [0u8; META_LEN] {
            return Err(LedgerRecordError::MetaNotZero);
        }
        let recomputed = commit_parts(&self.cid, &self.owner, self.timestamp);
        if recomputed != self.proof {
            return Err(LedgerRecordError::ProofMismatch);
        }
        Ok(())
    }

    /// Canonical byte encoding of the record.
    ///
    /// Fixed-width fields plus a length-prefixed cid (the cid is not
    /// in the digest-bearing packing here, so the prefix costs
    /// nothing and keeps the framing unambiguous):
    ///
    /// ```text
    /// owner(20) || proof(32) || cid_len u64 BE || cid utf-8 ||
    /// timestamp u64 BE || meta(32)
    /// ```
    pub fn encode(&self) -> Vec<u8> {
        let cid_bytes = self.cid.as_bytes();
        let mut out = Vec::with_capacity(20 + 32 + 8 + cid_bytes.len() + 8 + META_LEN);
        out.extend_from_slice(self.owner.bytes());
        out.extend_from_slice(self.proof.as_bytes());
        out.extend_from_slice(&(cid_bytes.len() as u64).to_be_bytes());
        out.extend_from_slice(cid_bytes);
        out.extend_from_slice(&self.timestamp.to_be_bytes());
        out.extend_from_slice(&self.meta);
        out
    }
}
