// crates/wayfinder-core/src/interfaces/mod.rs
// ============================================================================
// Module: Wayfinder Interfaces
// Description: Collaborator-agnostic interfaces for the navigation pipeline.
// Purpose: Define the contract surfaces used by the Wayfinder runtime.
// Dependencies: crate::core, async-trait, serde, thiserror
// ============================================================================

//! ## Overview
//! Interfaces define how the navigation pipeline integrates with external
//! collaborators without embedding backend-specific details: authentication,
//! view/module loading, entity persistence, translation, and the visible
//! title sink. Implementations must fail closed on missing or invalid data.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::PoisonError;

use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::entities::DomainEntity;
use crate::core::entities::EntityKind;
use crate::core::entities::RelationshipLink;
use crate::core::entities::RelationshipOp;
use crate::core::identifiers::EntityId;
use crate::core::identifiers::ModuleId;
use crate::core::identifiers::ViewId;
use crate::core::routes::RouteNode;
use crate::core::session::CapabilitySet;
use crate::core::session::SessionHolder;

// ============================================================================
// SECTION: Capability Source
// ============================================================================

/// Read-only view of the session's granted capabilities.
///
/// Consumed by the route guard; written only by the authentication
/// collaborator.
pub trait CapabilitySource: Send + Sync {
    /// Returns the capabilities granted to the current principal, empty when
    /// logged out.
    fn granted(&self) -> CapabilitySet;

    /// Returns true when an authenticated session is present.
    fn authenticated(&self) -> bool;
}

impl CapabilitySource for SessionHolder {
    fn granted(&self) -> CapabilitySet {
        Self::granted(self)
    }

    fn authenticated(&self) -> bool {
        Self::authenticated(self)
    }
}

// ============================================================================
// SECTION: View Loader
// ============================================================================

/// Module materialized by the lazy loader.
///
/// # Invariants
/// - `routes` obey the same validation rules as the static table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedModule {
    /// Module identity.
    pub module: ModuleId,
    /// Default view shown when the module node itself is the destination.
    pub view: Option<ViewId>,
    /// Nested route table contributed by the module.
    pub routes: Vec<RouteNode>,
}

/// Module loading errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Underlying chunk could not be fetched.
    #[error("module '{module}' unavailable: {reason}")]
    Unavailable {
        /// Module that failed to load.
        module: ModuleId,
        /// Collaborator-reported reason.
        reason: String,
    },
    /// Loaded routes failed validation.
    #[error("module '{module}' invalid: {reason}")]
    Invalid {
        /// Module that failed validation.
        module: ModuleId,
        /// Validation failure description.
        reason: String,
    },
}

/// Asynchronous view/module loader.
///
/// Failures here are navigation failures, not view errors; the pipeline
/// converts them into a redirect.
#[async_trait]
pub trait ViewLoader: Send + Sync {
    /// Materializes the module for the given identifier.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] when the module cannot be fetched or its routes
    /// are invalid.
    async fn load(&self, module: &ModuleId) -> Result<Arc<LoadedModule>, LoadError>;
}

// ============================================================================
// SECTION: Entity Store
// ============================================================================

/// Entity fetch errors.
///
/// # Invariants
/// - `NotFound` and `Transport` redirect to different fallback destinations;
///   implementations must not conflate them.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Identifier does not resolve to an existing entity.
    #[error("{kind} '{id}' not found")]
    NotFound {
        /// Requested entity kind.
        kind: EntityKind,
        /// Requested identifier.
        id: EntityId,
    },
    /// Infrastructural fetch failure.
    #[error("entity fetch failed: {0}")]
    Transport(String),
}

/// Relationship mutation errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum MutationError {
    /// The link to detach does not exist.
    #[error("relationship {employee_id}~{profession_id} not found")]
    LinkNotFound {
        /// Employee side of the missing link.
        employee_id: EntityId,
        /// Profession side of the missing link.
        profession_id: EntityId,
    },
    /// Infrastructural mutation failure.
    #[error("relationship mutation failed: {0}")]
    Transport(String),
}

/// Persistence collaborator for entity reads and relationship mutations.
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// Fetches an entity by kind and identifier.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::NotFound`] when the identifier does not resolve
    /// and [`FetchError::Transport`] on infrastructural failure.
    async fn fetch_by_id(&self, kind: EntityKind, id: &EntityId)
    -> Result<DomainEntity, FetchError>;

    /// Applies a relationship mutation for the given link.
    ///
    /// # Errors
    ///
    /// Returns [`MutationError`] when the mutation is rejected or fails.
    async fn mutate_relationship(
        &self,
        link: &RelationshipLink,
        op: RelationshipOp,
    ) -> Result<(), MutationError>;
}

// ============================================================================
// SECTION: Translator
// ============================================================================

/// Named argument substituted into a localized message template.
///
/// # Invariants
/// - `name` matches a placeholder without braces (for example, `employee`).
/// - `value` is preformatted and safe for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageArg {
    /// Placeholder name used in message templates.
    pub name: &'static str,
    /// Formatted value substituted for the placeholder.
    pub value: String,
}

impl MessageArg {
    /// Constructs a message argument from a name and displayable value.
    #[must_use]
    pub fn new(name: &'static str, value: impl Into<String>) -> Self {
        Self {
            name,
            value: value.into(),
        }
    }
}

/// Asynchronous translation collaborator.
///
/// A missing key must fall back to a stable string (catalog implementations
/// fall back to the key itself) rather than fail the caller.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Resolves the localized string for a catalog key.
    async fn lookup(&self, key: &str, args: &[MessageArg]) -> String;
}

// ============================================================================
// SECTION: Title Sink
// ============================================================================

/// Write-only slot representing the visible page title.
pub trait TitleSink: Send + Sync {
    /// Writes the localized title.
    fn set_title(&self, title: String);
}

/// In-memory title sink for tests and demos.
#[derive(Debug, Default, Clone)]
pub struct InMemoryTitleSink {
    /// Last written title.
    title: Arc<Mutex<Option<String>>>,
}

impl InMemoryTitleSink {
    /// Creates an empty title sink.
    #[must_use]
    pub fn new() -> Self {
        Self {
            title: Arc::new(Mutex::new(None)),
        }
    }

    /// Returns the last written title, if any.
    #[must_use]
    pub fn current(&self) -> Option<String> {
        self.title.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl TitleSink for InMemoryTitleSink {
    fn set_title(&self, title: String) {
        *self.title.lock().unwrap_or_else(PoisonError::into_inner) = Some(title);
    }
}

// ============================================================================
// SECTION: Serialization Support
// ============================================================================

/// Wire form of a relationship mutation request, shared by HTTP stores.
///
/// # Invariants
/// - Field names are stable for the persistence collaborator contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipMutation {
    /// Employee side of the link.
    pub employee_id: EntityId,
    /// Profession side of the link.
    pub profession_id: EntityId,
    /// Operation applied to the link.
    pub op: RelationshipOp,
}
