//! Lifecycle Manager
//!
//! Orchestrates the phases of a proof record: create (anchor-preferred
//! with an explicit local fallback), persist (front-insert plus
//! best-effort save), verify (recompute and compare), and late
//! anchoring (re-keyed under the fresh ledger timestamp).
//!
//! Single logical thread of control: the manager is mutated only in
//! direct response to a completed user action, so store order is
//! completion order and no locking is needed.

use thiserror::Error;
use tracing::{info, warn};

use crate::cid::ContentToken;
use crate::commit::ProofDigest;
use crate::ledger::{
    AnchorError, IdentityProvider, KeyValueStore, LedgerAnchor,
};
use super::proof::{ProofRecord, RecordMeta, VerifyError};
use super::store::ProofRecordStore;

/// Current wall-clock time in seconds since epoch, clamped at zero.
fn wall_clock_ts() -> u64 {
    chrono::Utc::now().timestamp().max(0) as u64
}

/// Creation failures. Anchoring problems are not among them: those
/// degrade to a local-only record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CreateError {
    /// Neither the ledger nor the local identity yielded an owner.
    #[error("no owner identity available for a local-only record")]
    NoOwner,
}

/// Late-anchoring failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LateAnchorError {
    /// The anchoring call itself failed.
    #[error(transparent)]
    Anchor(#[from] AnchorError),

    /// No record with the given digest is held.
    #[error("no record with digest {0}")]
    UnknownRecord(ProofDigest),

    /// The record already carries a ledger anchor; anchoring is
    /// append-only.
    #[error("record {0} is already anchored")]
    AlreadyAnchored(ProofDigest),
}

/// The proof record lifecycle manager.
///
/// Owns the record store; consumes the anchoring ledger and identity
/// collaborators. The ledger is optional: without one, every creation
/// is local-only.
pub struct LifecycleManager<L, I, S>
where
    L: LedgerAnchor,
    I: IdentityProvider,
    S: KeyValueStore,
{
    ledger: Option<L>,
    identity: I,
    store: ProofRecordStore<S>,
}

impl<L, I, S> LifecycleManager<L, I, S>
where
    L: LedgerAnchor,
    I: IdentityProvider,
    S: KeyValueStore,
{
    /// Build a manager over an opened store.
    pub fn new(ledger: Option<L>, identity: I, store: ProofRecordStore<S>) -> Self {
        Self {
            ledger,
            identity,
            store,
        }
    }

    /// The held records, most recent first.
    pub fn records(&self) -> &[ProofRecord] {
        self.store.records()
    }

    /// Find a held record by its digest.
    pub fn find(&self, digest: &ProofDigest) -> Option<&ProofRecord> {
        self.store.find(digest)
    }

    /// Create phase: commit to an uploaded token and persist the
    /// resulting record.
    ///
    /// The anchoring ledger is preferred for the (owner, timestamp)
    /// pair; on any anchoring failure the manager falls back, with a
    /// visible notice, to the local identity and wall-clock time. The
    /// fallback is this explicit policy, not a hidden catch: only a
    /// missing local identity makes creation fail.
    pub async fn create(
        &mut self,
        token: ContentToken,
        meta: RecordMeta,
    ) -> Result<ProofRecord, CreateError> {
        let anchored = match &self.ledger {
            Some(ledger) => match ledger.anchor(token.value()).await {
                Ok(receipt) => Some(receipt),
                Err(err) => {
                    warn!(%err, cid = %token, "anchoring unavailable, creating local-only record");
                    None
                }
            },
            None => None,
        };

        let (owner, ts, tx_hash) = match anchored {
            Some(receipt) => (receipt.owner, receipt.ts, Some(receipt.tx_hash)),
            None => {
                let owner = self
                    .identity
                    .current_owner()
                    .ok_or(CreateError::NoOwner)?;
                (owner, wall_clock_ts(), None)
            }
        };

        let record = ProofRecord::new(token, owner, ts, tx_hash, meta);
        info!(
            proof = %record.proof,
            anchored = record.is_anchored(),
            "proof record created"
        );
        self.store.insert(record.clone());
        Ok(record)
    }

    /// Verify phase: recompute a record's digest and compare
    /// byte-for-byte. A mismatch is always surfaced, never
    /// auto-corrected.
    pub fn verify(&self, record: &ProofRecord) -> Result<(), VerifyError> {
        record.verify()
    }

    /// Verify every held record, returning the digests that failed.
    pub fn verify_all(&self) -> Vec<(ProofDigest, VerifyError)> {
        self.store
            .records()
            .iter()
            .filter_map(|r| r.verify().err().map(|e| (r.proof, e)))
            .collect()
    }

    /// Late-anchoring phase: anchor a previously local-only record.
    ///
    /// The digest is deliberately re-keyed under the ledger's fresh
    /// (owner, timestamp) pair, so the updated record's digest
    /// generally differs from its predecessor's. The record is
    /// replaced in place, matched by its prior digest.
    pub async fn late_anchor(
        &mut self,
        prior: &ProofDigest,
    ) -> Result<ProofRecord, LateAnchorError> {
        let existing = self
            .store
            .find(prior)
            .ok_or(LateAnchorError::UnknownRecord(*prior))?;
        if existing.is_anchored() {
            return Err(LateAnchorError::AlreadyAnchored(*prior));
        }

        let ledger = self
            .ledger
            .as_ref()
            .ok_or_else(|| AnchorError::Unreachable("no ledger configured".to_string()))?;

        let cid = existing.cid.clone();
        let meta = RecordMeta::from(existing);

        let receipt = ledger.anchor(cid.value()).await?;
        let updated = ProofRecord::new(cid, receipt.owner, receipt.ts, Some(receipt.tx_hash), meta);

        info!(prior = %prior, now = %updated.proof, "record re-keyed by late anchoring");
        self.store.replace(prior, updated.clone());
        Ok(updated)
    }

    /// Final best-effort flush, for agent shutdown.
    pub fn shutdown(mut self) {
        self.store.flush();
    }
}
