//! Content Token Shapes
//!
//! Canonical representation of a content-addressed identifier (CID).
//! A token is derived once, at the moment a raw identifier string is
//! normalized, and is immutable thereafter.

use serde::{Serialize, Deserialize};
use sha2::{Sha256, Digest};
use thiserror::Error;

/// Length of a legacy (v0) CID string.
pub const CIDV0_LEN: usize = 46;

/// Prefix of a legacy (v0) CID string.
pub const CIDV0_PREFIX: &str = "Qm";

/// Prefix of a base32 (v1) CID string.
pub const CIDV1_PREFIX: &str = "bafy";

/// Minimum length of a base32 (v1) CID string. Shorter `bafy` strings
/// fall through to the relaxed rule, where they fail on length.
pub const CIDV1_MIN_LEN: usize = 8;

/// Reserved prefix for locally-synthesized placeholder tokens.
///
/// Content that never reached a content-addressing backend gets a
/// placeholder derived from its bytes. The prefix keeps placeholders
/// structurally distinguishable from genuine tokens, so a verifier can
/// detect "unaddressed" content.
pub const LOCAL_PREFIX: &str = "local-";

/// Relaxed-form length bounds (exclusive on both ends).
const RELAXED_MIN: usize = 20;
const RELAXED_MAX: usize = 128;

/// Provenance class of a content token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// Legacy CID: 46 characters, `Qm` prefix, base58btc alphabet.
    CidV0,
    /// Base32 CID: `bafy` prefix, lowercase base32 alphabet.
    CidV1,
    /// Relaxed alphanumeric form of unknown provenance.
    Unknown,
    /// Locally-synthesized placeholder for unaddressed content.
    Local,
}

/// A canonical content token.
///
/// Construction always goes through shape validation; a held token is
/// guaranteed to match one of the accepted shapes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct ContentToken {
    value: String,
    kind: TokenKind,
}

/// A string failed every accepted token shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("not a valid content token: {0:?}")]
pub struct TokenParseError(pub String);

impl ContentToken {
    /// Validate a candidate string against the accepted shapes.
    ///
    /// Strict shapes are tried first (v0, then v1, then placeholder),
    /// then the relaxed alphanumeric rule. Returns `None` when nothing
    /// matches; an absent token is a normal outcome, not an error.
    pub fn parse(candidate: &str) -> Option<ContentToken> {
        let kind = classify(candidate)?;
        Some(ContentToken {
            value: candidate.to_string(),
            kind,
        })
    }

    /// Synthesize a placeholder token for content bytes that never
    /// reached a content-addressing backend.
    pub fn local_for(bytes: &[u8]) -> ContentToken {
        let digest = Sha256::digest(bytes);
        ContentToken {
            value: format!("{}{}", LOCAL_PREFIX, hex::encode(digest)),
            kind: TokenKind::Local,
        }
    }

    /// The canonical token string.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Provenance class of this token.
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Whether this token is a locally-synthesized placeholder.
    pub fn is_placeholder(&self) -> bool {
        self.kind == TokenKind::Local
    }
}

impl std::fmt::Display for ContentToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.value)
    }
}

impl From<ContentToken> for String {
    fn from(token: ContentToken) -> String {
        token.value
    }
}

impl TryFrom<String> for ContentToken {
    type Error = TokenParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        ContentToken::parse(&value).ok_or(TokenParseError(value))
    }
}

/// Classify a candidate string, or return `None` if no shape matches.
fn classify(candidate: &str) -> Option<TokenKind> {
    if candidate.is_empty() {
        return None;
    }

    if let Some(rest) = candidate.strip_prefix(LOCAL_PREFIX) {
        // Placeholders carry the full sha-256 of the content bytes.
        if rest.len() == 64 && rest.chars().all(is_lower_hex) {
            return Some(TokenKind::Local);
        }
        return None;
    }

    if candidate.len() == CIDV0_LEN
        && candidate.starts_with(CIDV0_PREFIX)
        && candidate.chars().all(is_base58)
    {
        return Some(TokenKind::CidV0);
    }

    if candidate.starts_with(CIDV1_PREFIX)
        && candidate.len() >= CIDV1_MIN_LEN
        && candidate.chars().all(is_base32)
    {
        return Some(TokenKind::CidV1);
    }

    // Relaxed rule: alphanumeric, length strictly between the bounds.
    if candidate.len() > RELAXED_MIN
        && candidate.len() < RELAXED_MAX
        && candidate.chars().all(|c| c.is_ascii_alphanumeric())
    {
        return Some(TokenKind::Unknown);
    }

    None
}

/// Base58btc alphabet (no 0, O, I, l).
fn is_base58(c: char) -> bool {
    c.is_ascii_alphanumeric() && !matches!(c, '0' | 'O' | 'I' | 'l')
}

/// Lowercase base32 alphabet used by v1 CIDs.
fn is_base32(c: char) -> bool {
    matches!(c, 'a'..='z' | '2'..='7')
}

fn is_lower_hex(c: char) -> bool {
    matches!(c, '0'..='9' | 'a'..='f')
}
