//! Owner Address Normalization
//!
//! Checksum-validated account identifiers (EIP-55). Commitment inputs
//! must normalize through here; nothing downstream ever sees an
//! unnormalized address.

use serde::{Serialize, Deserialize};
use sha3::{Digest, Keccak256};
use thiserror::Error;

/// Length of the binary form of an address.
pub const ADDRESS_LEN: usize = 20;

/// Errors raised by address normalization.
///
/// Either variant is the fail-fast "invalid owner address" condition:
/// commitment computation refuses to proceed with unnormalized input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    /// Input is not `0x` followed by 40 hex characters.
    #[error("owner address must be 0x followed by 40 hex characters, got {got:?}")]
    Malformed {
        /// The rejected input.
        got: String,
    },

    /// Mixed-case input whose casing does not match the EIP-55
    /// checksum.
    #[error("owner address failed checksum validation: {got}")]
    ChecksumMismatch {
        /// The rejected input.
        got: String,
    },
}

/// A normalized, checksum-validated owner address.
///
/// Carries both the canonical checksummed string and the 20-byte
/// binary form used in commitment packing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct OwnerAddress {
    checksummed: String,
    bytes: [u8; ADDRESS_LEN],
}

impl OwnerAddress {
    /// Parse and normalize an address string.
    ///
    /// All-lowercase and all-uppercase hex is accepted and normalized
    /// to the checksummed form. Mixed-case hex must already match the
    /// checksum exactly, otherwise it is rejected (a mixed-case
    /// mismatch usually means a transcription error).
    pub fn parse(input: &str) -> Result<OwnerAddress, AddressError> {
        let trimmed = input.trim();
        let malformed = || AddressError::Malformed {
            got: input.to_string(),
        };

        let hex_part = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .ok_or_else(malformed)?;

        if hex_part.len() != ADDRESS_LEN * 2 || !hex_part.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(malformed());
        }

        let lower = hex_part.to_ascii_lowercase();
        let checksummed = checksum_encode(&lower);

        let has_lower = hex_part.chars().any(|c| c.is_ascii_lowercase());
        let has_upper = hex_part.chars().any(|c| c.is_ascii_uppercase());
        if has_lower && has_upper && hex_part != &checksummed[2..] {
            return Err(AddressError::ChecksumMismatch {
                got: input.to_string(),
            });
        }

        let mut bytes = [0u8; ADDRESS_LEN];
        // Infallible: 40 hex chars validated above.
        if let Ok(decoded) = hex::decode(&lower) {
            bytes.copy_from_slice(&decoded);
        }

        Ok(OwnerAddress { checksummed, bytes })
    }

    /// The canonical checksummed string (`0x`-prefixed).
    pub fn as_str(&self) -> &str {
        &self.checksummed
    }

    /// The 20-byte binary form.
    pub fn bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.bytes
    }
}

impl std::fmt::Display for OwnerAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.checksummed)
    }
}

impl From<OwnerAddress> for String {
    fn from(addr: OwnerAddress) -> String {
        addr.checksummed
    }
}

impl TryFrom<String> for OwnerAddress {
    type Error = AddressError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        OwnerAddress::parse(&value)
    }
}

/// EIP-55 checksum encoding of 40 lowercase hex characters.
///
/// A hex letter is uppercased when the corresponding nibble of
/// keccak-256 over the lowercase hex string is >= 8.
fn checksum_encode(lower: &str) -> String {
    let hash = Keccak256::digest(lower.as_bytes());

    let mut out = String::with_capacity(2 + lower.len());
    out.push_str("0x");
    for (i, c) in lower.chars().enumerate() {
        let nibble = if i % 2 == 0 {
            hash[i / 2] >> 4
        } else {
            hash[i / 2] & 0x0f
        };
        if c.is_ascii_alphabetic() && nibble >= 8 {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
    }
    out
}
