// crates/wayfinder-core/tests/title.rs
// ============================================================================
// Module: Title Strategy Tests
// Description: Tests for title derivation, fallback, and stale discards.
// ============================================================================
//! ## Overview
//! Validates the title round-trip: a declared key produces its translation, a
//! route without a key falls back to the default key, and a lookup that
//! settles after a newer attempt has activated is discarded.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Tests use unwrap on deterministic collaborator fakes."
)]

use std::sync::Arc;
use std::sync::atomic::AtomicU64;

use tokio::sync::Notify;
use wayfinder_core::AttemptId;
use wayfinder_core::AttemptOutcome;
use wayfinder_core::InMemoryTitleSink;
use wayfinder_core::NavigationConfig;
use wayfinder_core::NavigationEngine;
use wayfinder_core::TitleKey;
use wayfinder_core::TitleOutcome;
use wayfinder_core::TitlePhase;
use wayfinder_core::TitleStrategy;

mod common;
use crate::common::FixedCaps;
use crate::common::RecordingLoader;
use crate::common::ScriptedStore;
use crate::common::TestTranslator;
use crate::common::task_module;
use crate::common::test_table;

// ============================================================================
// SECTION: Strategy Unit Behavior
// ============================================================================

#[tokio::test]
async fn test_declared_key_produces_its_translation() {
    let sink = InMemoryTitleSink::new();
    let strategy =
        TitleStrategy::new(TestTranslator::new(), sink.clone(), TitleKey::new("title.default"));
    let current = AtomicU64::new(3);

    let key = TitleKey::new("title.teams");
    let outcome = strategy.apply(Some(&key), AttemptId::new(3), &current).await;
    assert_eq!(outcome, TitleOutcome::Written("T:title.teams".to_string()));
    assert_eq!(sink.current().as_deref(), Some("T:title.teams"));
    assert_eq!(strategy.phase(), TitlePhase::Idle);
}

#[tokio::test]
async fn test_missing_key_falls_back_to_default() {
    let sink = InMemoryTitleSink::new();
    let strategy =
        TitleStrategy::new(TestTranslator::new(), sink.clone(), TitleKey::new("title.default"));
    let current = AtomicU64::new(1);

    let outcome = strategy.apply(None, AttemptId::new(1), &current).await;
    assert_eq!(outcome, TitleOutcome::Written("T:title.default".to_string()));
}

#[tokio::test]
async fn test_stale_lookup_is_discarded() {
    let sink = InMemoryTitleSink::new();
    let strategy =
        TitleStrategy::new(TestTranslator::new(), sink.clone(), TitleKey::new("title.default"));
    let current = AtomicU64::new(5);

    // The originating attempt is no longer current.
    let key = TitleKey::new("title.teams");
    let outcome = strategy.apply(Some(&key), AttemptId::new(4), &current).await;
    assert_eq!(outcome, TitleOutcome::DiscardedStale);
    assert_eq!(sink.current(), None);
    assert_eq!(strategy.phase(), TitlePhase::Idle);
}

// ============================================================================
// SECTION: Engine Integration
// ============================================================================

#[tokio::test]
async fn test_slow_lookup_cannot_overwrite_newer_page_title() {
    let gate = Arc::new(Notify::new());
    let sink = InMemoryTitleSink::new();
    let engine = NavigationEngine::new(
        test_table(),
        NavigationConfig::default(),
        FixedCaps::granting(&["USER"]),
        RecordingLoader::new(vec![task_module()]),
        ScriptedStore::new(),
        TestTranslator::gated("title.teams", Arc::clone(&gate)),
        sink.clone(),
    )
    .expect("engine fixtures are valid");
    let engine = Arc::new(engine);

    // N1 activates `/team` and suspends in its title lookup.
    let first = tokio::spawn({
        let engine = Arc::clone(&engine);
        async move { engine.navigate("/team").await }
    });
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
    assert_eq!(engine.active().unwrap().view.as_str(), "team-list");

    // N2 activates and titles `/misc` while N1's lookup is still pending.
    let second = engine.navigate("/misc").await;
    assert_eq!(second.outcome, AttemptOutcome::Activated);
    assert_eq!(sink.current().as_deref(), Some("T:title.default"));

    // N1's lookup resolves late and must be discarded.
    gate.notify_one();
    let first = first.await.unwrap();
    assert_eq!(first.outcome, AttemptOutcome::Activated);
    assert_eq!(engine.active().unwrap().view.as_str(), "misc");
    assert_eq!(sink.current().as_deref(), Some("T:title.default"));
}
