//! Content Addressing Resolver
//!
//! Converts the textual representations a content identifier arrives in
//! (bare token, `ipfs://` URI, gateway URL) into one canonical
//! [`ContentToken`], and renders canonical tokens back out as
//! gateway-resolvable display URLs.
//!
//! Leaf component: no dependencies on the rest of the crate.

pub mod resolve;
pub mod token;

pub use resolve::{display_urls, resolve_token, GatewayConfig, GATEWAY_SEGMENT, IPFS_SCHEME};
pub use token::{ContentToken, TokenKind, TokenParseError, LOCAL_PREFIX};
