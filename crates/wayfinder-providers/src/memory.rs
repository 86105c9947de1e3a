// crates/wayfinder-providers/src/memory.rs
// ============================================================================
// Module: In-Memory Entity Store
// Description: Simple in-memory entity store for tests and demos.
// Purpose: Provide a deterministic store implementation without external deps.
// Dependencies: wayfinder-core
// ============================================================================

//! ## Overview
//! This module provides a simple in-memory implementation of
//! [`wayfinder_core::EntityStore`] for tests and local demos. Relationship
//! mutations edit the authoritative employee record with set semantics:
//! attaching an existing link is a no-op, detaching an absent link fails.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;

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
// SECTION: In-Memory Store
// ============================================================================

/// In-memory entity store for tests and demos.
#[derive(Debug, Default, Clone)]
pub struct InMemoryEntityStore {
    /// Entity map protected by a mutex.
    entities: Arc<Mutex<BTreeMap<(EntityKind, EntityId), DomainEntity>>>,
}

impl InMemoryEntityStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entities: Arc::new(Mutex::new(BTreeMap::new())),
        }
    }

    /// Inserts or replaces an entity.
    pub fn insert(&self, entity: DomainEntity) {
        let key = (entity.kind(), entity.id().clone());
        self.lock().insert(key, entity);
    }

    /// Returns the number of stored entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true when the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Locks the entity map, recovering from poisoning.
    fn lock(&self) -> MutexGuard<'_, BTreeMap<(EntityKind, EntityId), DomainEntity>> {
        self.entities.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl EntityStore for InMemoryEntityStore {
    async fn fetch_by_id(
        &self,
        kind: EntityKind,
        id: &EntityId,
    ) -> Result<DomainEntity, FetchError> {
        self.lock().get(&(kind, id.clone())).cloned().ok_or(FetchError::NotFound {
            kind,
            id: id.clone(),
        })
    }

    async fn mutate_relationship(
        &self,
        link: &RelationshipLink,
        op: RelationshipOp,
    ) -> Result<(), MutationError> {
        let mut entities = self.lock();
        let key = (EntityKind::Employee, link.employee_id.clone());
        let Some(DomainEntity::Employee(employee)) = entities.get_mut(&key) else {
            return Err(MutationError::Transport(format!(
                "employee '{}' not found",
                link.employee_id
            )));
        };
        match op {
            RelationshipOp::Attach => {
                if !employee.profession_ids.contains(&link.profession_id) {
                    employee.profession_ids.push(link.profession_id.clone());
                }
                Ok(())
            }
            RelationshipOp::Detach => {
                let before = employee.profession_ids.len();
                employee.profession_ids.retain(|profession| profession != &link.profession_id);
                if employee.profession_ids.len() == before {
                    return Err(MutationError::LinkNotFound {
                        employee_id: link.employee_id.clone(),
                        profession_id: link.profession_id.clone(),
                    });
                }
                Ok(())
            }
        }
    }
}
