//! Commitment Function
//!
//! The single source of truth for turning a (token, owner, timestamp)
//! triple into a proof digest. Deterministic, order-sensitive, no I/O.

use serde::{Serialize, Deserialize};
use sha3::{Digest, Keccak256};
use thiserror::Error;

use super::address::{AddressError, OwnerAddress};

/// Length of a proof digest in bytes.
pub const DIGEST_LEN: usize = 32;

/// A fixed-size opaque commitment digest.
///
/// Byte-identical for identical inputs; not reversible to its inputs
/// by a holder who does not already know all three.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct ProofDigest([u8; DIGEST_LEN]);

/// A string failed to parse as a 32-byte hex digest.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("proof digest must be 32 bytes of hex, got {0:?}")]
pub struct DigestParseError(pub String);

impl ProofDigest {
    /// Wrap raw digest bytes.
    pub fn from_bytes(bytes: [u8; DIGEST_LEN]) -> Self {
        ProofDigest(bytes)
    }

    /// Parse a hex string, with or without a `0x` prefix.
    pub fn parse(input: &str) -> Result<Self, DigestParseError> {
        let hex_part = input.strip_prefix("0x").unwrap_or(input);
        let decoded =
            hex::decode(hex_part).map_err(|_| DigestParseError(input.to_string()))?;
        let bytes: [u8; DIGEST_LEN] = decoded
            .try_into()
            .map_err(|_| DigestParseError(input.to_string()))?;
        Ok(ProofDigest(bytes))
    }

    /// The raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    /// Lowercase `0x`-prefixed hex rendering, no internal whitespace.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl std::fmt::Display for ProofDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl std::fmt::Debug for ProofDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ProofDigest({})", self.to_hex())
    }
}

impl From<ProofDigest> for String {
    fn from(digest: ProofDigest) -> String {
        digest.to_hex()
    }
}

impl TryFrom<String> for ProofDigest {
    type Error = DigestParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        ProofDigest::parse(&value)
    }
}

/// Commit to a (token, owner, timestamp) triple.
///
/// The owner string is normalized first and the call fails fast on an
/// invalid address. The token is taken as an opaque string: the caller
/// is responsible for having resolved it beforehand.
pub fn commit(token: &str, owner: &str, ts: u64) -> Result<ProofDigest, AddressError> {
    let owner = OwnerAddress::parse(owner)?;
    Ok(commit_parts(token, &owner, ts))
}

/// Commit with an already-normalized owner.
///
/// Packing: UTF-8 bytes of the token, then the 20-byte owner, then the
/// timestamp as a 32-byte big-endian unsigned integer, hashed with
/// keccak-256 (the anchoring ledger's primitive, so any independent
/// verifier can recompute the published digest).
///
/// The token is the sole variable-length field and sits first, ahead of
/// fixed-width fields only, so the packing is unambiguous without a
/// length prefix. Extending the triple with another variable-length
/// field would require reframing, which would break compatibility with
/// already-published digests.
pub fn commit_parts(token: &str, owner: &OwnerAddress, ts: u64) -> ProofDigest {
    let mut hasher = Keccak256::new();
    hasher.update(token.as_bytes());
    hasher.update(owner.bytes());
    hasher.update(ts_be32(ts));
    ProofDigest(hasher.finalize().into())
}

/// Encode a timestamp as a 32-byte big-endian unsigned integer.
fn ts_be32(ts: u64) -> [u8; 32] {
    let mut out = [0u8; 32];
    out[24..].copy_from_slice(&ts.to_be_bytes());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const OWNER: &str = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";
    const OTHER_OWNER: &str = "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359";

    #[test]
    fn test_commit_deterministic() {
        let a = commit("QmTest", OWNER, 1_700_000_000).unwrap();
        let b = commit("QmTest", OWNER, 1_700_000_000).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.as_bytes().len(), DIGEST_LEN);
    }

    #[test]
    fn test_commit_owner_case_insensitive() {
        // Normalization means casing of a valid address never changes
        // the digest.
        let a = commit("QmTest", OWNER, 1).unwrap();
        let b = commit("QmTest", &OWNER.to_lowercase(), 1).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_commit_sensitive_to_each_field() {
        let base = commit("QmTest", OWNER, 1_700_000_000).unwrap();

        let token_changed = commit("QmTesu", OWNER, 1_700_000_000).unwrap();
        let owner_changed = commit("QmTest", OTHER_OWNER, 1_700_000_000).unwrap();
        let ts_changed = commit("QmTest", OWNER, 1_700_000_001).unwrap();

        assert_ne!(base, token_changed);
        assert_ne!(base, owner_changed);
        assert_ne!(base, ts_changed);
    }

    #[test]
    fn test_commit_invalid_owner_fails_fast() {
        assert!(commit("QmTest", "not-an-address", 1).is_err());
        assert!(commit("QmTest", "0x1234", 1).is_err());
    }

    #[test]
    fn test_ts_encoding_width() {
        let encoded = ts_be32(1);
        assert_eq!(encoded.len(), 32);
        assert_eq!(encoded[31], 1);
        assert!(encoded[..31].iter().all(|&b| b == 0));

        let max = ts_be32(u64::MAX);
        assert!(max[..24].iter().all(|&b| b == 0));
        assert!(max[24..].iter().all(|&b| b == 0xff));
    }

    #[test]
    fn test_digest_hex_round_trip() {
        let digest = commit("QmTest", OWNER, 42).unwrap();
        let hex = digest.to_hex();
        assert!(hex.starts_with("0x"));
        assert_eq!(hex.len(), 2 + DIGEST_LEN * 2);
        assert!(!hex.contains(char::is_whitespace));

        assert_eq!(ProofDigest::parse(&hex).unwrap(), digest);
        // Bare hex accepted too.
        assert_eq!(ProofDigest::parse(&hex[2..]).unwrap(), digest);
    }

    #[test]
    fn test_digest_parse_rejects_bad_input() {
        assert!(ProofDigest::parse("0x1234").is_err());
        assert!(ProofDigest::parse("zz").is_err());
        assert!(ProofDigest::parse("").is_err());
    }

    #[test]
    fn test_serde_round_trip() {
        let digest = commit("QmTest", OWNER, 7).unwrap();
        let json = serde_json::to_string(&digest).unwrap();
        let back: ProofDigest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, digest);
    }
}
