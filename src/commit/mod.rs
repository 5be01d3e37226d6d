//! Commitment Function
//!
//! Deterministically reduces a (content token, owner address, unix
//! timestamp) triple to a fixed-size proof digest:
//!
//! ```text
//! digest = keccak256( token_utf8 || owner_20_bytes || ts_32_bytes_be )
//! ```
//!
//! Pure functions only; address normalization is the single failure
//! mode and it fails fast.

pub mod address;
pub mod digest;

pub use address::{AddressError, OwnerAddress, ADDRESS_LEN};
pub use digest::{commit, commit_parts, DigestParseError, ProofDigest, DIGEST_LEN};
