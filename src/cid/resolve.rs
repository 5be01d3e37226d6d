//! Token Resolution
//!
//! Normalizes the textual representations a content identifier shows up
//! in (bare token, `ipfs://` URI, gateway URL) into a canonical
//! [`ContentToken`], and builds externally-resolvable display URLs for
//! a canonical token.

use super::token::{ContentToken, TokenKind};

/// URI scheme prefix recognized during resolution.
pub const IPFS_SCHEME: &str = "ipfs://";

/// Gateway path segment recognized during resolution.
pub const GATEWAY_SEGMENT: &str = "/ipfs/";

/// Resolve an arbitrary raw identifier string to a canonical token.
///
/// Stripping rules apply in a fixed order so results are deterministic
/// regardless of which representation was supplied:
///
/// 1. strip the `ipfs://` scheme prefix
/// 2. strip through a `/ipfs/` gateway path segment
/// 3. strip any trailing path / query / fragment
///
/// The remainder is trimmed and validated against the accepted token
/// shapes. Total and side-effect free; `None` is a normal outcome for
/// unresolvable input, not an error.
pub fn resolve_token(raw: Option<&str>) -> Option<ContentToken> {
    let mut rest = raw?.trim();
    if rest.is_empty() {
        return None;
    }

    // 1. Scheme strip.
    if let Some(stripped) = rest.strip_prefix(IPFS_SCHEME) {
        rest = stripped;
    }

    // 2. Gateway path strip: take what follows the segment.
    if let Some(idx) = rest.find(GATEWAY_SEGMENT) {
        rest = &rest[idx + GATEWAY_SEGMENT.len()..];
    }

    // 3. Trailing segment strip.
    for sep in ['/', '?', '#'] {
        if let Some(idx) = rest.find(sep) {
            rest = &rest[..idx];
        }
    }

    ContentToken::parse(rest.trim())
}

/// Gateway endpoints used to build display URLs.
///
/// Endpoints are URL prefixes the token string is appended to.
#[derive(Clone, Debug)]
pub struct GatewayConfig {
    /// Preferred gateway, first in the produced sequence.
    pub primary: String,
    /// Fallback gateway, second in the produced sequence.
    pub secondary: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            primary: "https://ipfs.io/ipfs/".to_string(),
            secondary: "https://gateway.pinata.cloud/ipfs/".to_string(),
        }
    }
}

impl GatewayConfig {
    /// Create config from environment variables, falling back to the
    /// defaults for anything unset.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            primary: std::env::var("PROOFMARK_GATEWAY_PRIMARY").unwrap_or(defaults.primary),
            secondary: std::env::var("PROOFMARK_GATEWAY_SECONDARY").unwrap_or(defaults.secondary),
        }
    }

    /// Build externally-resolvable URLs for a token, in preference
    /// order. Empty for an absent token and for local placeholders,
    /// which no gateway can resolve. Pure; no network access.
    pub fn display_urls(&self, token: Option<&ContentToken>) -> Vec<String> {
        match token {
            Some(token) if token.kind() != TokenKind::Local => vec![
                format!("{}{}", self.primary, token.value()),
                format!("{}{}", self.secondary, token.value()),
            ],
            _ => Vec::new(),
        }
    }
}

/// Build display URLs with the default gateway set.
pub fn display_urls(token: Option<&ContentToken>) -> Vec<String> {
    GatewayConfig::default().display_urls(token)
}
