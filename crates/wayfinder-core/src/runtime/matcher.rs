// crates/wayfinder-core/src/runtime/matcher.rs
// ============================================================================
// Module: Wayfinder Route Matching
// Description: Deterministic structural matching of targets against the table.
// Purpose: Produce matched chains, module suspensions, and outlet chains.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! Matching is deterministic and order-sensitive: siblings are searched in
//! declaration order with literal segments tried before dynamic identifier
//! segments at the same depth, and the first full structural match wins. Once
//! a node is committed there is no backtracking across already-consumed
//! segments. A node carrying a lazy module suspends matching; the engine
//! resumes inside the loaded routes after the module materializes.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::attempt::MatchedChain;
use crate::core::attempt::MatchedNode;
use crate::core::identifiers::ModuleId;
use crate::core::identifiers::OutletName;
use crate::core::routes::RouteNode;
use crate::core::routes::RouteTable;
use crate::core::routes::Segment;
use crate::core::session::CapabilitySet;
use crate::interfaces::LoadedModule;

// ============================================================================
// SECTION: Match Errors
// ============================================================================

/// Structural matching errors.
///
/// # Invariants
/// - A structural miss is distinct from a guard denial; the two redirect to
///   different fallback destinations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MatchError {
    /// No route chain consumes the target.
    #[error("no route matches the target")]
    NoRoute,
}

// ============================================================================
// SECTION: Match Results
// ============================================================================

/// Suspension left behind when matching reaches a lazy module node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suspension {
    /// Module that must be materialized to continue.
    pub module: ModuleId,
    /// Segments not yet consumed.
    pub remaining: Vec<String>,
}

/// Result of matching one slot as far as the static declarations allow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialMatch {
    /// Chain matched so far.
    pub chain: MatchedChain,
    /// Pending module suspension, absent when the chain is complete.
    pub suspension: Option<Suspension>,
}

// ============================================================================
// SECTION: Primary Matching
// ============================================================================

/// Matches the target against the primary-slot roots of the table.
///
/// # Errors
///
/// Returns [`MatchError::NoRoute`] when no chain consumes the target.
pub fn match_primary(table: &RouteTable, segments: &[String]) -> Result<PartialMatch, MatchError> {
    let roots: Vec<&RouteNode> = table.primary_roots().collect();
    match_nodes(&roots, segments)
}

/// Resumes matching inside a loaded module.
///
/// Falls back to the module's default view when the loaded routes do not
/// consume an exhausted target.
///
/// # Errors
///
/// Returns [`MatchError::NoRoute`] when the loaded routes do not consume the
/// remaining segments.
pub fn match_module(module: &LoadedModule, segments: &[String]) -> Result<PartialMatch, MatchError> {
    let roots: Vec<&RouteNode> = module.routes.iter().collect();
    match match_nodes(&roots, segments) {
        Ok(partial) => Ok(partial),
        Err(MatchError::NoRoute) if segments.is_empty() => {
            module.view.as_ref().map_or(Err(MatchError::NoRoute), |view| {
                let mut chain = MatchedChain::default();
                chain.nodes.push(MatchedNode {
                    segment: String::new(),
                    required: CapabilitySet::new(),
                    resolvers: Vec::new(),
                    view: Some(view.clone()),
                    title_key: None,
                });
                Ok(PartialMatch {
                    chain,
                    suspension: None,
                })
            })
        }
        Err(err) => Err(err),
    }
}

/// Matches the target against a sibling group and descends greedily.
fn match_nodes(roots: &[&RouteNode], segments: &[String]) -> Result<PartialMatch, MatchError> {
    let mut chain = MatchedChain::default();
    let mut remaining = segments;
    let Some(step) = pick(roots, remaining) else {
        return Err(MatchError::NoRoute);
    };
    let mut node = commit(&mut chain, &mut remaining, step);
    loop {
        if remaining.is_empty() {
            let children: Vec<&RouteNode> = node.children.iter().collect();
            if let Some(step) = pick(&children, remaining) {
                node = commit(&mut chain, &mut remaining, step);
                continue;
            }
            if node.view.is_some() {
                return Ok(PartialMatch {
                    chain,
                    suspension: None,
                });
            }
            if let Some(module) = &node.module {
                return Ok(PartialMatch {
                    chain,
                    suspension: Some(Suspension {
                        module: module.clone(),
                        remaining: Vec::new(),
                    }),
                });
            }
            return Err(MatchError::NoRoute);
        }
        let children: Vec<&RouteNode> = node.children.iter().collect();
        if let Some(step) = pick(&children, remaining) {
            node = commit(&mut chain, &mut remaining, step);
            continue;
        }
        if let Some(module) = &node.module {
            return Ok(PartialMatch {
                chain,
                suspension: Some(Suspension {
                    module: module.clone(),
                    remaining: remaining.to_vec(),
                }),
            });
        }
        return Err(MatchError::NoRoute);
    }
}

/// One committed matching step.
struct Step<'a> {
    /// Node selected at this depth.
    node: &'a RouteNode,
    /// Number of target segments consumed.
    consumed: usize,
    /// Captured parameter, when the segment was dynamic.
    param: Option<(String, String)>,
}

/// Selects the first matching sibling for the current target position.
///
/// Literal siblings are tried before dynamic ones at the same depth; an
/// empty-segment sibling is only eligible once the target is exhausted.
fn pick<'a>(siblings: &[&'a RouteNode], remaining: &[String]) -> Option<Step<'a>> {
    if remaining.is_empty() {
        return siblings
            .iter()
            .copied()
            .find(|node| matches!(node.segment, Segment::Empty))
            .map(|node| Step {
                node,
                consumed: 0,
                param: None,
            });
    }
    let target = &remaining[0];
    for &node in siblings {
        if let Segment::Literal(value) = &node.segment
            && value == target
        {
            return Some(Step {
                node,
                consumed: 1,
                param: None,
            });
        }
    }
    for &node in siblings {
        if let Segment::Param(name) = &node.segment {
            return Some(Step {
                node,
                consumed: 1,
                param: Some((name.clone(), target.clone())),
            });
        }
    }
    None
}

/// Appends a step to the chain and advances the target position.
fn commit<'a>(
    chain: &mut MatchedChain,
    remaining: &mut &[String],
    step: Step<'a>,
) -> &'a RouteNode {
    if let Some((name, value)) = step.param {
        chain.params.insert(name, value);
    }
    chain.nodes.push(MatchedNode::from_route(step.node));
    *remaining = &remaining[step.consumed..];
    step.node
}

// ============================================================================
// SECTION: Outlet Matching
// ============================================================================

/// Matches secondary-slot chains independently from the same target.
///
/// Each outlet root is matched by longest prefix; the chain is truncated to
/// the deepest node carrying a view. An outlet whose root does not match, or
/// whose matched prefix carries no view, simply does not activate.
#[must_use]
pub fn match_outlets(
    table: &RouteTable,
    segments: &[String],
) -> Vec<(OutletName, MatchedChain)> {
    let mut chains = Vec::new();
    for (outlet, root) in table.outlet_roots() {
        if let Some(chain) = match_prefix(root, segments) {
            chains.push((outlet.clone(), chain));
        }
    }
    chains
}

/// Matches one outlet subtree by longest prefix.
fn match_prefix(root: &RouteNode, segments: &[String]) -> Option<MatchedChain> {
    let mut chain = MatchedChain::default();
    let consumed = match &root.segment {
        Segment::Empty => 0,
        Segment::Literal(value) => {
            if segments.first() != Some(value) {
                return None;
            }
            1
        }
        Segment::Param(name) => {
            let value = segments.first()?;
            chain.params.insert(name.clone(), value.clone());
            1
        }
    };
    chain.nodes.push(MatchedNode::from_route(root));
    let mut remaining = &segments[consumed..];
    let mut node = root;
    loop {
        let children: Vec<&RouteNode> = node.children.iter().collect();
        let Some(step) = pick(&children, remaining) else {
            break;
        };
        node = commit(&mut chain, &mut remaining, step);
    }
    // Truncate to the deepest activatable node.
    while chain.nodes.last().is_some_and(|last| last.view.is_none()) {
        chain.nodes.pop();
    }
    if chain.nodes.is_empty() {
        return None;
    }
    Some(chain)
}
