//! Property tests for the commitment function and token resolution.

use proptest::prelude::*;

use proofmark::{commit, resolve_token, OwnerAddress};

/// Arbitrary 20-byte address rendered as lowercase hex.
fn arb_owner() -> impl Strategy<Value = String> {
    proptest::array::uniform20(any::<u8>()).prop_map(|bytes| format!("0x{}", hex::encode(bytes)))
}

/// Arbitrary opaque token string (relaxed alphanumeric shape).
fn arb_token() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9]{21,90}"
}

proptest! {
    // Identical inputs, byte-identical digests.
    #[test]
    fn commit_is_deterministic(token in arb_token(), owner in arb_owner(), ts in any::<u64>()) {
        let a = commit(&token, &owner, ts).unwrap();
        let b = commit(&token, &owner, ts).unwrap();
        prop_assert_eq!(a, b);
    }

    // Any change to the timestamp changes the digest.
    #[test]
    fn commit_sensitive_to_ts(token in arb_token(), owner in arb_owner(), ts in 0..u64::MAX - 1) {
        let a = commit(&token, &owner, ts).unwrap();
        let b = commit(&token, &owner, ts + 1).unwrap();
        prop_assert_ne!(a, b);
    }

    // Different owners never share a digest for the same token and time.
    #[test]
    fn commit_sensitive_to_owner(
        token in arb_token(),
        owner_a in arb_owner(),
        owner_b in arb_owner(),
        ts in any::<u64>(),
    ) {
        prop_assume!(owner_a.to_lowercase() != owner_b.to_lowercase());
        let a = commit(&token, &owner_a, ts).unwrap();
        let b = commit(&token, &owner_b, ts).unwrap();
        prop_assert_ne!(a, b);
    }

    // Token casing is significant (tokens are opaque strings), and a
    // one-character change changes the digest.
    #[test]
    fn commit_sensitive_to_token(token in arb_token(), owner in arb_owner(), ts in any::<u64>()) {
        let mut altered = token.clone();
        altered.push('x');
        let a = commit(&token, &owner, ts).unwrap();
        let b = commit(&altered, &owner, ts).unwrap();
        prop_assert_ne!(a, b);
    }

    // Owner casing is not significant: normalization happens first.
    #[test]
    fn commit_normalizes_owner_case(token in arb_token(), owner in arb_owner(), ts in any::<u64>()) {
        let upper = format!("0x{}", owner[2..].to_uppercase());
        let a = commit(&token, &owner, ts).unwrap();
        let b = commit(&token, &upper, ts).unwrap();
        prop_assert_eq!(a, b);
    }

    // Parsing a normalized address again is a fixed point.
    #[test]
    fn owner_normalization_idempotent(owner in arb_owner()) {
        let once = OwnerAddress::parse(&owner).unwrap();
        let twice = OwnerAddress::parse(once.as_str()).unwrap();
        prop_assert_eq!(once, twice);
    }

    // Re-resolving an already-canonical token returns it unchanged.
    #[test]
    fn resolution_idempotent(token in arb_token()) {
        if let Some(resolved) = resolve_token(Some(&token)) {
            let again = resolve_token(Some(resolved.value())).unwrap();
            prop_assert_eq!(resolved, again);
        }
    }

    // Every representation of the same identifier resolves to the same
    // canonical token.
    #[test]
    fn resolution_representation_independent(token in arb_token()) {
        let bare = resolve_token(Some(&token));
        prop_assume!(bare.is_some());
        let bare = bare.unwrap();

        let uri = format!("ipfs://{token}");
        let gateway = format!("https://ipfs.io/ipfs/{token}/nested/file.bin?x=1");
        prop_assert_eq!(resolve_token(Some(&uri)).unwrap(), bare.clone());
        prop_assert_eq!(resolve_token(Some(&gateway)).unwrap(), bare);
    }

    // Resolution is total: arbitrary junk yields absent, never a panic.
    #[test]
    fn resolution_never_panics(raw in ".{0,200}") {
        let _ = resolve_token(Some(&raw));
    }
}
