// crates/wayfinder-core/src/core/attempt.rs
// ============================================================================
// Module: Wayfinder Navigation Attempts
// Description: Target paths, matched chains, outcomes, and activation records.
// Purpose: Capture the ephemeral state of one user-initiated navigation.
// Dependencies: crate::core::{entities, identifiers, routes, session}, serde
// ============================================================================

//! ## Overview
//! A navigation attempt is created when navigation starts and settles when the
//! destination activates or the attempt is redirected or superseded. The
//! attempt is owned exclusively by the pipeline; a newer attempt supersedes
//! any still-pending older one.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::core::entities::DomainEntity;
use crate::core::identifiers::AttemptId;
use crate::core::identifiers::OutletName;
use crate::core::identifiers::TitleKey;
use crate::core::identifiers::ViewId;
use crate::core::routes::ResolverBinding;
use crate::core::routes::RouteNode;
use crate::core::session::CapabilitySet;

// ============================================================================
// SECTION: Target Path
// ============================================================================

/// Normalized navigation target.
///
/// # Invariants
/// - Segments contain no separators; an empty segment list is the root path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetPath {
    /// Path segments in order.
    segments: Vec<String>,
}

impl TargetPath {
    /// Parses a target path, tolerating leading, trailing, and doubled
    /// separators.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let segments =
            raw.split('/').filter(|part| !part.is_empty()).map(ToString::to_string).collect();
        Self {
            segments,
        }
    }

    /// Returns the segments in order.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Returns true when the target is the root path.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for TargetPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("/");
        }
        for segment in &self.segments {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}

impl From<&str> for TargetPath {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

// ============================================================================
// SECTION: Matched Chains
// ============================================================================

/// Per-node data retained from a matched route node.
///
/// # Invariants
/// - Field values are snapshots of the immutable table (or a loaded module)
///   and never change after matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedNode {
    /// Display form of the matched segment.
    pub segment: String,
    /// Capabilities required by the node.
    pub required: CapabilitySet,
    /// Resolver bindings declared on the node.
    pub resolvers: Vec<ResolverBinding>,
    /// Destination view, when the node is activatable.
    pub view: Option<ViewId>,
    /// Title key declared on the node.
    pub title_key: Option<TitleKey>,
}

impl MatchedNode {
    /// Snapshots the matching-relevant fields of a route node.
    #[must_use]
    pub fn from_route(node: &RouteNode) -> Self {
        Self {
            segment: node.segment.to_string(),
            required: node.required.clone(),
            resolvers: node.resolvers.clone(),
            view: node.view.clone(),
            title_key: node.title_key.clone(),
        }
    }
}

/// Ordered root-to-terminal chain produced by matching one slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchedChain {
    /// Matched nodes from root to terminal.
    pub nodes: Vec<MatchedNode>,
    /// Path parameters resolved while matching.
    pub params: BTreeMap<String, String>,
}

impl MatchedChain {
    /// Returns the terminal node of the chain, if any.
    #[must_use]
    pub fn terminal(&self) -> Option<&MatchedNode> {
        self.nodes.last()
    }

    /// Returns the deepest declared title key in the chain.
    #[must_use]
    pub fn title_key(&self) -> Option<&TitleKey> {
        self.nodes.iter().rev().find_map(|node| node.title_key.as_ref())
    }
}

// ============================================================================
// SECTION: Attempt Outcomes
// ============================================================================

/// Settled state of one navigation attempt.
///
/// # Invariants
/// - Variants are stable for reporting and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttemptOutcome {
    /// Attempt has not settled yet.
    Pending,
    /// Destination view activated.
    Activated,
    /// Guard denied some node in a matched chain.
    Denied,
    /// No route chain matched the target structurally.
    NotFound,
    /// Module loading or entity resolution failed.
    ResolutionFailed,
    /// A newer attempt superseded this one before it settled.
    Superseded,
}

/// Report returned to the caller of a navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationReport {
    /// Attempt identity.
    pub attempt: AttemptId,
    /// Requested target.
    pub target: TargetPath,
    /// Settled outcome.
    pub outcome: AttemptOutcome,
    /// Fallback destination activated instead, when redirected.
    pub redirected_to: Option<TargetPath>,
}

// ============================================================================
// SECTION: Activation
// ============================================================================

/// Published state of the active destination.
///
/// # Invariants
/// - Exactly one activation is published at a time; a newer successful
///   attempt replaces it atomically from the pipeline's perspective.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activation {
    /// Attempt that produced the activation.
    pub attempt: AttemptId,
    /// Target the activation belongs to.
    pub target: TargetPath,
    /// Primary destination view.
    pub view: ViewId,
    /// Secondary views keyed by outlet name.
    pub outlets: BTreeMap<OutletName, ViewId>,
    /// Entities resolved for the destination, keyed by binding name.
    pub entities: BTreeMap<String, DomainEntity>,
    /// Path parameters resolved while matching.
    pub params: BTreeMap<String, String>,
}
