// crates/wayfinder-core/src/runtime/title.rs
// ============================================================================
// Module: Wayfinder Title Strategy
// Description: Localized page-title derivation for activated destinations.
// Purpose: Keep the visible title synchronized with the active destination.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! After a successful activation the strategy derives the title key from the
//! deepest matched node that declares one (falling back to a fixed default
//! key), resolves it through the translation collaborator, and writes the
//! localized text to the title sink. A lookup that settles after a newer
//! attempt has activated is discarded: the strategy re-checks the attempt
//! identity before writing, so a slow lookup can never overwrite the title
//! of a page the user has already left.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Mutex;
use std::sync::PoisonError;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

use crate::core::identifiers::AttemptId;
use crate::core::identifiers::TitleKey;
use crate::interfaces::TitleSink;
use crate::interfaces::Translator;

// ============================================================================
// SECTION: Strategy State
// ============================================================================

/// Title strategy phases.
///
/// # Invariants
/// - The strategy is `Idle` whenever no lookup is pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitlePhase {
    /// No lookup pending.
    Idle,
    /// A lookup for the current attempt is pending.
    Titling,
}

/// Outcome of one title application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TitleOutcome {
    /// The localized title was written to the sink.
    Written(String),
    /// The lookup settled after a newer attempt activated; nothing written.
    DiscardedStale,
}

// ============================================================================
// SECTION: Title Strategy
// ============================================================================

/// Derives and applies localized page titles.
#[derive(Debug)]
pub struct TitleStrategy<T, K> {
    /// Translation collaborator.
    translator: T,
    /// Visible title sink.
    sink: K,
    /// Fixed key used when no matched node declares one.
    default_key: TitleKey,
    /// Current phase, observable by tests.
    phase: Mutex<TitlePhase>,
}

impl<T: Translator, K: TitleSink> TitleStrategy<T, K> {
    /// Creates a strategy with the given collaborators and default key.
    pub fn new(translator: T, sink: K, default_key: TitleKey) -> Self {
        Self {
            translator,
            sink,
            default_key,
            phase: Mutex::new(TitlePhase::Idle),
        }
    }

    /// Returns the current phase.
    #[must_use]
    pub fn phase(&self) -> TitlePhase {
        *self.phase.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Applies the title for an activation.
    ///
    /// `attempt` identifies the originating navigation and `current` is the
    /// engine's supersession token; the sink is only written while the
    /// attempt is still the current one.
    pub async fn apply(
        &self,
        key: Option<&TitleKey>,
        attempt: AttemptId,
        current: &AtomicU64,
    ) -> TitleOutcome {
        let key = key.unwrap_or(&self.default_key);
        self.set_phase(TitlePhase::Titling);
        let title = self.translator.lookup(key.as_str(), &[]).await;
        let outcome = if current.load(Ordering::SeqCst) == attempt.value() {
            self.sink.set_title(title.clone());
            TitleOutcome::Written(title)
        } else {
            TitleOutcome::DiscardedStale
        };
        self.set_phase(TitlePhase::Idle);
        outcome
    }

    /// Updates the observable phase.
    fn set_phase(&self, phase: TitlePhase) {
        *self.phase.lock().unwrap_or_else(PoisonError::into_inner) = phase;
    }
}
