// crates/wayfinder-core/tests/matching.rs
// ============================================================================
// Module: Route Matching Tests
// Description: Tests for structural matching, precedence, and outlet chains.
// ============================================================================
//! ## Overview
//! Validates deterministic matching: literal-before-dynamic precedence,
//! declaration order, module suspensions, and secondary-slot chains.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Tests use unwrap on deterministic route fixtures."
)]

use wayfinder_core::TargetPath;
use wayfinder_core::runtime::MatchError;
use wayfinder_core::runtime::match_module;
use wayfinder_core::runtime::match_outlets;
use wayfinder_core::runtime::match_primary;

mod common;
use crate::common::task_module;
use crate::common::test_table;

// ============================================================================
// SECTION: Target Paths
// ============================================================================

#[test]
fn test_target_path_normalizes_separators() {
    let path = TargetPath::parse("//team/7//view/");
    assert_eq!(path.segments(), ["team", "7", "view"]);
    assert_eq!(path.to_string(), "/team/7/view");
    assert!(TargetPath::parse("/").is_root());
}

// ============================================================================
// SECTION: Primary Matching
// ============================================================================

#[test]
fn test_root_path_matches_empty_root() {
    let table = test_table();
    let target = TargetPath::parse("/");
    let partial = match_primary(&table, target.segments()).unwrap();
    assert!(partial.suspension.is_none());
    let terminal = partial.chain.terminal().unwrap();
    assert_eq!(terminal.view.as_ref().unwrap().as_str(), "home");
}

#[test]
fn test_literal_wins_over_dynamic_at_same_depth() {
    let table = test_table();
    let target = TargetPath::parse("/team/new");
    let partial = match_primary(&table, target.segments()).unwrap();
    let terminal = partial.chain.terminal().unwrap();
    assert_eq!(terminal.view.as_ref().unwrap().as_str(), "team-edit");
    assert!(partial.chain.params.is_empty());
}

#[test]
fn test_dynamic_segment_captures_identifier() {
    let table = test_table();
    let target = TargetPath::parse("/team/7/view");
    let partial = match_primary(&table, target.segments()).unwrap();
    assert_eq!(partial.chain.params.get("id").map(String::as_str), Some("7"));
    let terminal = partial.chain.terminal().unwrap();
    assert_eq!(terminal.view.as_ref().unwrap().as_str(), "team-detail");
    assert_eq!(terminal.resolvers.len(), 1);
}

#[test]
fn test_unmatched_target_is_no_route() {
    let table = test_table();
    let target = TargetPath::parse("/unknown");
    assert_eq!(match_primary(&table, target.segments()), Err(MatchError::NoRoute));
}

#[test]
fn test_overrun_target_is_no_route() {
    let table = test_table();
    let target = TargetPath::parse("/team/7/view/extra");
    assert_eq!(match_primary(&table, target.segments()), Err(MatchError::NoRoute));
}

#[test]
fn test_module_node_suspends_with_remaining_segments() {
    let table = test_table();
    let target = TargetPath::parse("/task/42/view");
    let partial = match_primary(&table, target.segments()).unwrap();
    let suspension = partial.suspension.expect("module node suspends");
    assert_eq!(suspension.module.as_str(), "task");
    assert_eq!(suspension.remaining, ["42", "view"]);
}

#[test]
fn test_deepest_title_key_wins() {
    let table = test_table();
    let target = TargetPath::parse("/team/7/view");
    let partial = match_primary(&table, target.segments()).unwrap();
    assert_eq!(partial.chain.title_key().unwrap().as_str(), "title.team.detail");
}

// ============================================================================
// SECTION: Module Matching
// ============================================================================

#[test]
fn test_module_routes_resume_matching() {
    let module = task_module();
    let partial = match_module(&module, &["42".to_string(), "view".to_string()]).unwrap();
    assert!(partial.suspension.is_none());
    let terminal = partial.chain.terminal().unwrap();
    assert_eq!(terminal.view.as_ref().unwrap().as_str(), "task-view");
    assert_eq!(partial.chain.params.get("id").map(String::as_str), Some("42"));
}

#[test]
fn test_module_empty_child_is_default_destination() {
    let module = task_module();
    let partial = match_module(&module, &[]).unwrap();
    let terminal = partial.chain.terminal().unwrap();
    assert_eq!(terminal.view.as_ref().unwrap().as_str(), "task-list");
}

// ============================================================================
// SECTION: Outlet Matching
// ============================================================================

#[test]
fn test_outlet_chain_is_computed_independently() {
    let table = test_table();
    let target = TargetPath::parse("/team/7/view");
    let outlets = match_outlets(&table, target.segments());
    assert_eq!(outlets.len(), 1);
    let (outlet, chain) = &outlets[0];
    assert_eq!(outlet.as_str(), "sidenav");
    let terminal = chain.terminal().unwrap();
    assert_eq!(terminal.view.as_ref().unwrap().as_str(), "sidenav");
}

#[test]
fn test_outlet_matches_root_target() {
    let table = test_table();
    let outlets = match_outlets(&table, TargetPath::parse("/").segments());
    assert_eq!(outlets.len(), 1);
}
