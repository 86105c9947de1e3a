// crates/wayfinder-core/tests/proptest_authorize.rs
// ============================================================================
// Module: Authorization Predicate Property Tests
// Description: Randomized checks of the capability subset law.
// ============================================================================
//! ## Overview
//! Proves that the authorization predicate is exactly the subset relation:
//! allowed iff every required token is granted, with the empty requirement
//! always allowed.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Test-only assertions and helpers are permitted."
)]

use proptest::prelude::*;
use wayfinder_core::Capability;
use wayfinder_core::CapabilitySet;
use wayfinder_core::authorize;

/// Strategy producing small capability sets over a narrow token alphabet.
fn capability_set() -> impl Strategy<Value = CapabilitySet> {
    prop::collection::btree_set("[A-E]", 0..5)
        .prop_map(|tokens| tokens.into_iter().map(Capability::new).collect())
}

proptest! {
    #[test]
    fn authorize_is_the_subset_relation(required in capability_set(), granted in capability_set()) {
        let expected = required.iter().all(|token| granted.contains(token));
        prop_assert_eq!(authorize(&required, &granted), expected);
    }

    #[test]
    fn empty_requirement_is_always_allowed(granted in capability_set()) {
        prop_assert!(authorize(&CapabilitySet::new(), &granted));
    }

    #[test]
    fn grant_extension_never_revokes(required in capability_set(), granted in capability_set(), extra in capability_set()) {
        if authorize(&required, &granted) {
            let wider: CapabilitySet =
                granted.iter().chain(extra.iter()).cloned().collect();
            prop_assert!(authorize(&required, &wider));
        }
    }
}
