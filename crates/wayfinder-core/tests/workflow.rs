// crates/wayfinder-core/tests/workflow.rs
// ============================================================================
// Module: Relationship Workflow Tests
// Description: Tests for the confirmation-gated relationship mutation.
// ============================================================================
//! ## Overview
//! Validates the workflow state machine: cancellation sends nothing, a
//! confirmed success signals staleness without touching any local list, a
//! failure surfaces an error, and double confirmation is rejected.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Tests use unwrap on deterministic collaborator fakes."
)]

use std::sync::Arc;
use std::sync::atomic::Ordering;

use wayfinder_core::EntityId;
use wayfinder_core::HostSignal;
use wayfinder_core::RelationshipLink;
use wayfinder_core::RelationshipOp;
use wayfinder_core::RelationshipWorkflow;
use wayfinder_core::WorkflowError;
use wayfinder_core::WorkflowPhase;

mod common;
use crate::common::ScriptedStore;
use crate::common::TestTranslator;

/// Returns the employee 7 ~ profession 3 link used across these tests.
fn link() -> RelationshipLink {
    RelationshipLink::new(EntityId::new("7"), EntityId::new("3"))
}

// ============================================================================
// SECTION: Confirmation Prompt
// ============================================================================

#[tokio::test]
async fn test_begin_presents_both_identities_without_mutating() {
    let store = ScriptedStore::new();
    let mutations = Arc::clone(&store.mutations);
    let workflow = RelationshipWorkflow::new(store, TestTranslator::new());

    let prompt = workflow
        .begin(link(), RelationshipOp::Detach, "Erna Mustermann", "Welder")
        .await
        .unwrap();
    assert_eq!(prompt, "T:workflow.detach.confirm employee=Erna Mustermann profession=Welder");
    assert_eq!(workflow.phase(), WorkflowPhase::Confirming);
    assert_eq!(mutations.load(Ordering::SeqCst), 0);
}

// ============================================================================
// SECTION: Cancellation
// ============================================================================

#[tokio::test]
async fn test_cancel_sends_nothing() {
    let store = ScriptedStore::new();
    let mutations = Arc::clone(&store.mutations);
    let workflow = RelationshipWorkflow::new(store, TestTranslator::new());

    workflow.begin(link(), RelationshipOp::Detach, "Erna", "Welder").await.unwrap();
    workflow.cancel().unwrap();
    assert_eq!(workflow.phase(), WorkflowPhase::Cancelled);
    assert_eq!(mutations.load(Ordering::SeqCst), 0);

    // Cancelled is idle-equivalent: a fresh confirmation may begin.
    workflow.begin(link(), RelationshipOp::Detach, "Erna", "Welder").await.unwrap();
    assert_eq!(workflow.phase(), WorkflowPhase::Confirming);
}

#[tokio::test]
async fn test_cancel_without_confirmation_is_rejected() {
    let workflow = RelationshipWorkflow::new(ScriptedStore::new(), TestTranslator::new());
    assert_eq!(workflow.cancel(), Err(WorkflowError::NotConfirming));
}

// ============================================================================
// SECTION: Confirmed Mutations
// ============================================================================

#[tokio::test]
async fn test_confirmed_success_signals_stale_relationships() {
    let store = ScriptedStore::new();
    let mutations = Arc::clone(&store.mutations);
    let workflow = RelationshipWorkflow::new(store, TestTranslator::new());

    workflow.begin(link(), RelationshipOp::Detach, "Erna", "Welder").await.unwrap();
    let signal = workflow.confirm().await.unwrap();
    assert_eq!(signal, HostSignal::RelationshipsStale);
    assert_eq!(workflow.phase(), WorkflowPhase::SettledSuccess);
    assert_eq!(mutations.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_failed_mutation_signals_error_without_local_edits() {
    let store = ScriptedStore::new();
    store.set_fail_mutations(true);
    let mutations = Arc::clone(&store.mutations);
    let workflow = RelationshipWorkflow::new(store, TestTranslator::new());

    workflow.begin(link(), RelationshipOp::Detach, "Erna", "Welder").await.unwrap();
    let signal = workflow.confirm().await.unwrap();
    assert_eq!(
        signal,
        HostSignal::MutationFailed {
            reason: "relationship mutation failed: mutation rejected".to_string(),
        }
    );
    assert_eq!(workflow.phase(), WorkflowPhase::SettledError);
    assert_eq!(mutations.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_second_confirmation_is_rejected_not_queued() {
    let store = ScriptedStore::new();
    let mutations = Arc::clone(&store.mutations);
    let workflow = RelationshipWorkflow::new(store, TestTranslator::new());

    workflow.begin(link(), RelationshipOp::Detach, "Erna", "Welder").await.unwrap();
    workflow.confirm().await.unwrap();
    assert_eq!(workflow.confirm().await, Err(WorkflowError::NotConfirming));
    assert_eq!(mutations.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_begin_while_confirming_is_rejected() {
    let workflow = RelationshipWorkflow::new(ScriptedStore::new(), TestTranslator::new());
    workflow.begin(link(), RelationshipOp::Detach, "Erna", "Welder").await.unwrap();
    let second = workflow.begin(link(), RelationshipOp::Attach, "Erna", "Welder").await;
    assert_eq!(second, Err(WorkflowError::AlreadyActive));
}
