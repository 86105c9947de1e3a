// crates/wayfinder-providers/src/registry.rs
// ============================================================================
// Module: Store Registry
// Description: Registry routing entity access to per-kind store backends.
// Purpose: Route fetches by entity kind with policy checks.
// Dependencies: wayfinder-core
// ============================================================================

//! ## Overview
//! The store registry resolves entity fetches by entity kind and enforces
//! allowlist and denylist policies. It implements the core
//! [`wayfinder_core::EntityStore`] interface so the navigation engine and the
//! relationship workflow integrate without knowing backend details.
//! Relationship mutations are routed to the employee backend, which owns the
//! authoritative side of the link.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use async_trait::async_trait;
use wayfinder_core::DomainEntity;
use wayfinder_core::EntityId;
use wayfinder_core::EntityKind;
use wayfinder_core::EntityStore;
use wayfinder_core::FetchError;
use wayfinder_core::MutationError;
use wayfinder_core::RelationshipLink;
use wayfinder_core::RelationshipOp;

// ============================================================================
// SECTION: Access Policy
// ============================================================================

/// Access policy controlling which entity kinds may be served.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreAccessPolicy {
    /// Optional allowlist of entity kinds.
    pub allowlist: Option<BTreeSet<EntityKind>>,
    /// Explicit denylist of entity kinds.
    pub denylist: BTreeSet<EntityKind>,
}

impl StoreAccessPolicy {
    /// Returns a policy that permits all entity kinds.
    #[must_use]
    pub const fn allow_all() -> Self {
        Self {
            allowlist: None,
            denylist: BTreeSet::new(),
        }
    }

    /// Returns true when the entity kind is allowed by policy.
    #[must_use]
    pub fn is_allowed(&self, kind: EntityKind) -> bool {
        if self.denylist.contains(&kind) {
            return false;
        }
        if let Some(allowlist) = &self.allowlist {
            return allowlist.contains(&kind);
        }
        true
    }
}

impl Default for StoreAccessPolicy {
    fn default() -> Self {
        Self::allow_all()
    }
}

// ============================================================================
// SECTION: Store Registry
// ============================================================================

/// Entity store registry with policy enforcement.
pub struct StoreRegistry {
    /// Store backends keyed by entity kind.
    backends: BTreeMap<EntityKind, Box<dyn EntityStore>>,
    /// Access control policy for store usage.
    policy: StoreAccessPolicy,
}

impl StoreRegistry {
    /// Creates a new registry with the provided policy.
    #[must_use]
    pub fn new(policy: StoreAccessPolicy) -> Self {
        Self {
            backends: BTreeMap::new(),
            policy,
        }
    }

    /// Registers a backend for the given entity kind.
    pub fn register_backend(
        &mut self,
        kind: EntityKind,
        backend: impl EntityStore + 'static,
    ) {
        self.backends.insert(kind, Box::new(backend));
    }

    /// Returns the configured policy.
    #[must_use]
    pub const fn policy(&self) -> &StoreAccessPolicy {
        &self.policy
    }

    /// Resolves the backend for a kind, enforcing policy.
    fn backend_for(&self, kind: EntityKind) -> Result<&dyn EntityStore, FetchError> {
        if !self.policy.is_allowed(kind) {
            return Err(FetchError::Transport(format!("store '{kind}' denied by policy")));
        }
        self.backends
            .get(&kind)
            .map(|backend| backend.as_ref())
            .ok_or_else(|| FetchError::Transport(format!("no backend for '{kind}'")))
    }
}

#[async_trait]
impl EntityStore for StoreRegistry {
    async fn fetch_by_id(
        &self,
        kind: EntityKind,
        id: &EntityId,
    ) -> Result<DomainEntity, FetchError> {
        self.backend_for(kind)?.fetch_by_id(kind, id).await
    }

    async fn mutate_relationship(
        &self,
        link: &RelationshipLink,
        op: RelationshipOp,
    ) -> Result<(), MutationError> {
        let backend = self.backend_for(EntityKind::Employee).map_err(|err| {
            MutationError::Transport(err.to_string())
        })?;
        backend.mutate_relationship(link, op).await
    }
}
