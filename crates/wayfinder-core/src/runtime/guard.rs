// crates/wayfinder-core/src/runtime/guard.rs
// ============================================================================
// Module: Wayfinder Route Guard
// Description: Authorization predicate and per-chain capability checks.
// Purpose: Deny activation of any chain whose requirements exceed the grant.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! The guard evaluates the authorization predicate once per matched node,
//! root to terminal, before any loader or resolver work begins for that
//! node. A single failing node denies the entire attempt; partial activation
//! of a chain is never permitted. The guard does not distinguish why access
//! is denied from whether the target exists — a denied match and a
//! structurally absent match are different outcomes produced by different
//! stages.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::attempt::MatchedChain;
use crate::core::session::CapabilitySet;

// ============================================================================
// SECTION: Authorization Predicate
// ============================================================================

/// Returns true iff `required` is empty or a subset of `granted`.
#[must_use]
pub fn authorize(required: &CapabilitySet, granted: &CapabilitySet) -> bool {
    required.is_empty() || granted.contains_all(required)
}

// ============================================================================
// SECTION: Guard Verdict
// ============================================================================

/// Outcome of guarding one chain.
///
/// # Invariants
/// - `Denied` names the first failing segment for diagnostics only; the
///   user-visible outcome does not reveal which node failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardVerdict {
    /// Every node in the chain passed the predicate.
    Allowed,
    /// Some node failed the predicate.
    Denied {
        /// Display form of the first failing segment.
        segment: String,
    },
}

impl GuardVerdict {
    /// Returns true when the verdict permits activation.
    #[must_use]
    pub const fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }
}

// ============================================================================
// SECTION: Route Guard
// ============================================================================

/// Evaluates the authorization predicate along matched chains.
#[derive(Debug, Clone, Copy, Default)]
pub struct RouteGuard;

impl RouteGuard {
    /// Creates a route guard.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Checks every node of the chain against the granted capabilities.
    #[must_use]
    pub fn check(&self, chain: &MatchedChain, granted: &CapabilitySet) -> GuardVerdict {
        for node in &chain.nodes {
            if !authorize(&node.required, granted) {
                return GuardVerdict::Denied {
                    segment: node.segment.clone(),
                };
            }
        }
        GuardVerdict::Allowed
    }

    /// Checks a suffix of newly matched nodes, starting at `from`.
    ///
    /// Used when matching resumes inside a loaded module so that nodes are
    /// guarded exactly once.
    #[must_use]
    pub fn check_from(
        &self,
        chain: &MatchedChain,
        from: usize,
        granted: &CapabilitySet,
    ) -> GuardVerdict {
        for node in chain.nodes.iter().skip(from) {
            if !authorize(&node.required, granted) {
                return GuardVerdict::Denied {
                    segment: node.segment.clone(),
                };
            }
        }
        GuardVerdict::Allowed
    }
}
