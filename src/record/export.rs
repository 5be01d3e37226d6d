//! Portable Proof Certificates
//!
//! The JSON interchange format for a downloaded proof certificate.
//! Field names and the hex rendering of `proof` are fixed: any two
//! implementations must agree on them, so a certificate produced here
//! verifies anywhere and vice versa.

use serde::{Serialize, Deserialize};
use thiserror::Error;

use crate::cid::ContentToken;
use crate::commit::{AddressError, OwnerAddress, ProofDigest};
use super::proof::{ProofRecord, RecordMeta};

/// A portable proof certificate.
///
/// Wire shape: `{cid, owner, proof, ts, txHash?, title?, description?}`
/// with `proof` as hex with no internal whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofCertificate {
    /// Canonical content token string.
    pub cid: String,
    /// Checksummed owner address.
    pub owner: String,
    /// Hex-encoded commitment digest.
    pub proof: String,
    /// Seconds since epoch.
    pub ts: u64,
    /// Ledger transaction reference, when anchored.
    #[serde(rename = "txHash", skip_serializing_if = "Option::is_none", default)]
    pub tx_hash: Option<String>,
    /// Optional display title.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub title: Option<String>,
    /// Optional display description.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,
}

/// Certificate import failures.
#[derive(Debug, Error)]
pub enum CertificateError {
    /// The document is not valid certificate JSON.
    #[error("malformed certificate document: {0}")]
    Json(#[from] serde_json::Error),

    /// The `cid` field is not a valid content token.
    #[error("certificate cid is not a valid content token: {0:?}")]
    Cid(String),

    /// The `owner` field failed address normalization.
    #[error(transparent)]
    Owner(#[from] AddressError),

    /// The `proof` field is not a 32-byte hex digest.
    #[error("certificate proof is not a 32-byte hex digest: {0:?}")]
    Proof(String),
}

impl ProofCertificate {
    /// Export a record as a certificate.
    pub fn from_record(record: &ProofRecord) -> Self {
        ProofCertificate {
            cid: record.cid.value().to_string(),
            owner: record.owner.as_str().to_string(),
            proof: record.proof.to_hex(),
            ts: record.ts,
            tx_hash: record.tx_hash.clone(),
            title: record.title.clone(),
            description: record.description.clone(),
        }
    }

    /// Serialize to the canonical JSON document.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Parse a certificate document.
    pub fn from_json(raw: &str) -> Result<Self, CertificateError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Reconstruct a record from the certificate, re-validating every
    /// field at the boundary. The caller still decides whether to
    /// trust it; `verify()` on the result checks the digest equality.
    pub fn into_record(self) -> Result<ProofRecord, CertificateError> {
        let cid = ContentToken::parse(&self.cid).ok_or(CertificateError::Cid(self.cid))?;
        let owner = OwnerAddress::parse(&self.owner)?;
        let proof = ProofDigest::parse(&self.proof)
            .map_err(|_| CertificateError::Proof(self.proof.clone()))?;
        Ok(ProofRecord {
            cid,
            owner,
            proof,
            ts: self.ts,
            tx_hash: self.tx_hash,
            title: self.title,
            description: self.description,
        })
    }
}

impl From<&ProofRecord> for ProofCertificate {
    fn from(record: &ProofRecord) -> Self {
        ProofCertificate::from_record(record)
    }
}

/// Convenience: reconstruct metadata from a record for re-keying.
impl From<&ProofRecord> for RecordMeta {
    fn from(record: &ProofRecord) -> Self {
        RecordMeta {
            title: record.title.clone(),
            description: record.description.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OWNER: &str = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";
    const V0: &str = "QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG";

    fn record() -> ProofRecord {
        ProofRecord::new(
            ContentToken::parse(V0).unwrap(),
            OwnerAddress::parse(OWNER).unwrap(),
            1_700_000_000,
            Some("0xabc123".to_string()),
            RecordMeta {
                title: Some("artwork".to_string()),
                description: Some("first edition".to_string()),
            },
        )
    }

    #[test]
    fn test_wire_field_names() {
        let cert = ProofCertificate::from_record(&record());
        let json = cert.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        for field in ["cid", "owner", "proof", "ts", "txHash", "title", "description"] {
            assert!(value.get(field).is_some(), "missing field {field}");
        }
        // Exactly the interchange fields, nothing extra.
        assert_eq!(value.as_object().unwrap().len(), 7);
    }

    #[test]
    fn test_proof_is_whitespace_free_hex() {
        let cert = ProofCertificate::from_record(&record());
        assert!(!cert.proof.contains(char::is_whitespace));
        assert!(cert.proof.starts_with("0x"));
        assert_eq!(cert.proof.len(), 66);
    }

    #[test]
    fn test_optional_fields_omitted_when_absent() {
        let mut rec = record();
        rec.tx_hash = None;
        rec.title = None;
        rec.description = None;

        let json = ProofCertificate::from_record(&rec).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value.as_object().unwrap().len(), 4);
    }

    #[test]
    fn test_round_trip_verifies() {
        let original = record();
        let json = ProofCertificate::from_record(&original).to_json().unwrap();

        let imported = ProofCertificate::from_json(&json)
            .unwrap()
            .into_record()
            .unwrap();
        assert_eq!(imported, original);
        assert!(imported.verify().is_ok());
    }

    #[test]
    fn test_import_accepts_bare_hex_proof() {
        let mut cert = ProofCertificate::from_record(&record());
        cert.proof = cert.proof.trim_start_matches("0x").to_string();
        assert!(cert.into_record().is_ok());
    }

    #[test]
    fn test_import_rejects_bad_fields() {
        let good = ProofCertificate::from_record(&record());

        let mut bad_cid = good.clone();
        bad_cid.cid = "!!".to_string();
        assert!(matches!(bad_cid.into_record(), Err(CertificateError::Cid(_))));

        let mut bad_owner = good.clone();
        bad_owner.owner = "not-an-address".to_string();
        assert!(matches!(bad_owner.into_record(), Err(CertificateError::Owner(_))));

        let mut bad_proof = good;
        bad_proof.proof = "0x1234".to_string();
        assert!(matches!(bad_proof.into_record(), Err(CertificateError::Proof(_))));
    }

    #[test]
    fn test_tampered_certificate_fails_verify() {
        let mut cert = ProofCertificate::from_record(&record());
        cert.ts += 1;
        let imported = cert.into_record().unwrap();
        assert!(imported.verify().is_err());
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert!(matches!(
            ProofCertificate::from_json("{ nope"),
            Err(CertificateError::Json(_))
        ));
    }
}
