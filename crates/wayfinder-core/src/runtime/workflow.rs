// crates/wayfinder-core/src/runtime/workflow.rs
// ============================================================================
// Module: Wayfinder Relationship Workflow
// Description: Confirmation-gated mutation of employee-profession links.
// Purpose: Mutate a relationship exactly once and reconcile view state after.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! The workflow gates every relationship mutation behind an explicit
//! confirmation: Idle → Confirming → (Mutating → Settled) | Cancelled.
//! Confirming presents the two entity identities and mutates nothing. A
//! confirmed mutation issues exactly one call to the persistence
//! collaborator; on success the hosting view is signalled that its local
//! relationship list is stale and must be re-derived from the server. The
//! workflow never edits a view's cached list to guess the new state, and a
//! second confirmation while a mutation is in flight is rejected, not
//! queued.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Mutex;
use std::sync::PoisonError;

use thiserror::Error;

use crate::core::entities::RelationshipLink;
use crate::core::entities::RelationshipOp;
use crate::interfaces::EntityStore;
use crate::interfaces::MessageArg;
use crate::interfaces::Translator;

// ============================================================================
// SECTION: Workflow Phases
// ============================================================================

/// Observable workflow phases.
///
/// # Invariants
/// - At most one mutation call is in flight per workflow instance; the
///   `Mutating` phase covers exactly that window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowPhase {
    /// Nothing requested.
    Idle,
    /// Awaiting explicit confirmation; nothing mutated yet.
    Confirming,
    /// Mutation call in flight.
    Mutating,
    /// Mutation settled successfully.
    SettledSuccess,
    /// Mutation settled with an error.
    SettledError,
    /// Confirmation was declined before anything was sent.
    Cancelled,
}

/// Internal workflow state.
#[derive(Debug, Clone, PartialEq, Eq)]
enum WorkflowState {
    /// Nothing requested.
    Idle,
    /// Awaiting confirmation for the given link and operation.
    Confirming {
        /// Link presented for confirmation.
        link: RelationshipLink,
        /// Operation to apply on confirmation.
        op: RelationshipOp,
    },
    /// Mutation call in flight.
    Mutating,
    /// Mutation settled successfully.
    SettledSuccess,
    /// Mutation settled with an error.
    SettledError {
        /// Collaborator-reported reason.
        reason: String,
    },
    /// Confirmation was declined.
    Cancelled,
}

impl WorkflowState {
    /// Returns the observable phase for the state.
    const fn phase(&self) -> WorkflowPhase {
        match self {
            Self::Idle => WorkflowPhase::Idle,
            Self::Confirming { .. } => WorkflowPhase::Confirming,
            Self::Mutating => WorkflowPhase::Mutating,
            Self::SettledSuccess => WorkflowPhase::SettledSuccess,
            Self::SettledError { .. } => WorkflowPhase::SettledError,
            Self::Cancelled => WorkflowPhase::Cancelled,
        }
    }
}

// ============================================================================
// SECTION: Signals and Errors
// ============================================================================

/// Signal delivered to the hosting view when a mutation settles.
///
/// # Invariants
/// - `RelationshipsStale` obliges the view to re-derive its relationship
///   list from the authoritative server copy; the workflow has not touched
///   any local list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostSignal {
    /// The mutation succeeded; the view's local relationship list is stale.
    RelationshipsStale,
    /// The mutation failed; the view should surface an error and keep its
    /// local list untouched.
    MutationFailed {
        /// Collaborator-reported reason.
        reason: String,
    },
}

/// Workflow protocol errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorkflowError {
    /// A confirmation or mutation is already in progress.
    #[error("relationship workflow already active")]
    AlreadyActive,
    /// The workflow is not awaiting confirmation.
    #[error("relationship workflow is not awaiting confirmation")]
    NotConfirming,
}

// ============================================================================
// SECTION: Relationship Workflow
// ============================================================================

/// Confirmation-gated relationship mutation workflow.
#[derive(Debug)]
pub struct RelationshipWorkflow<S, T> {
    /// Persistence collaborator.
    store: S,
    /// Translation collaborator for the confirmation prompt.
    translator: T,
    /// Current state.
    state: Mutex<WorkflowState>,
}

impl<S: EntityStore, T: Translator> RelationshipWorkflow<S, T> {
    /// Creates an idle workflow over the given collaborators.
    pub fn new(store: S, translator: T) -> Self {
        Self {
            store,
            translator,
            state: Mutex::new(WorkflowState::Idle),
        }
    }

    /// Returns the observable phase.
    #[must_use]
    pub fn phase(&self) -> WorkflowPhase {
        self.lock().phase()
    }

    /// Enters Confirming for the given link and returns the localized
    /// confirmation prompt, parameterized by the two entity names.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::AlreadyActive`] when a confirmation or
    /// mutation is already in progress.
    pub async fn begin(
        &self,
        link: RelationshipLink,
        op: RelationshipOp,
        employee_name: &str,
        profession_name: &str,
    ) -> Result<String, WorkflowError> {
        {
            let mut state = self.lock();
            match *state {
                WorkflowState::Confirming { .. } | WorkflowState::Mutating => {
                    return Err(WorkflowError::AlreadyActive);
                }
                _ => {
                    *state = WorkflowState::Confirming {
                        link,
                        op,
                    };
                }
            }
        }
        let key = match op {
            RelationshipOp::Attach => "workflow.attach.confirm",
            RelationshipOp::Detach => "workflow.detach.confirm",
        };
        let args = [
            MessageArg::new("employee", employee_name),
            MessageArg::new("profession", profession_name),
        ];
        Ok(self.translator.lookup(key, &args).await)
    }

    /// Declines the pending confirmation; nothing is sent.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::NotConfirming`] when no confirmation is
    /// pending.
    pub fn cancel(&self) -> Result<(), WorkflowError> {
        let mut state = self.lock();
        match *state {
            WorkflowState::Confirming { .. } => {
                *state = WorkflowState::Cancelled;
                Ok(())
            }
            _ => Err(WorkflowError::NotConfirming),
        }
    }

    /// Confirms the pending mutation and issues exactly one call to the
    /// persistence collaborator.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::NotConfirming`] when no confirmation is
    /// pending, including while an earlier confirmation is still mutating.
    pub async fn confirm(&self) -> Result<HostSignal, WorkflowError> {
        let (link, op) = {
            let mut state = self.lock();
            match state.clone() {
                WorkflowState::Confirming {
                    link,
                    op,
                } => {
                    *state = WorkflowState::Mutating;
                    (link, op)
                }
                _ => return Err(WorkflowError::NotConfirming),
            }
        };
        match self.store.mutate_relationship(&link, op).await {
            Ok(()) => {
                *self.lock() = WorkflowState::SettledSuccess;
                Ok(HostSignal::RelationshipsStale)
            }
            Err(err) => {
                let reason = err.to_string();
                *self.lock() = WorkflowState::SettledError {
                    reason: reason.clone(),
                };
                Ok(HostSignal::MutationFailed {
                    reason,
                })
            }
        }
    }

    /// Locks the state, recovering from poisoning.
    fn lock(&self) -> std::sync::MutexGuard<'_, WorkflowState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
