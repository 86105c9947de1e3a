// crates/wayfinder-core/src/core/entities.rs
// ============================================================================
// Module: Wayfinder Domain Entities
// Description: Serializable records for the managed business entities.
// Purpose: Provide the closed entity union resolved ahead of view activation.
// Dependencies: crate::core::identifiers, serde
// ============================================================================

//! ## Overview
//! The application manages four entity kinds: teams, employees, tasks, and
//! professions. Resolvers fetch these records before a resolver-bound route
//! activates; the relationship mutation workflow links and unlinks employees
//! and professions. The union is closed so that every consumer can match
//! exhaustively.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::EntityId;

// ============================================================================
// SECTION: Entity Kind
// ============================================================================

/// Entity kinds served by the persistence collaborators.
///
/// # Invariants
/// - Variants are stable for serialization and store routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// Team of employees.
    Team,
    /// Employee record.
    Employee,
    /// Task record.
    Task,
    /// Profession (qualification) record.
    Profession,
}

impl EntityKind {
    /// Returns the stable path segment used by HTTP stores.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Team => "team",
            Self::Employee => "employee",
            Self::Task => "task",
            Self::Profession => "profession",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Entity Records
// ============================================================================

/// Team of employees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    /// Team identifier.
    pub id: EntityId,
    /// Display name.
    pub name: String,
    /// Member employee identifiers.
    pub employee_ids: Vec<EntityId>,
}

/// Employee record.
///
/// # Invariants
/// - `profession_ids` reflects the authoritative server copy; views must not
///   edit it locally after a relationship mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Employee identifier.
    pub id: EntityId,
    /// Display name.
    pub name: String,
    /// Professions linked to the employee.
    pub profession_ids: Vec<EntityId>,
}

/// Task record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Task identifier.
    pub id: EntityId,
    /// Task subject line.
    pub subject: String,
    /// Assigned employee, if any.
    pub assignee_id: Option<EntityId>,
}

/// Profession (qualification) record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profession {
    /// Profession identifier.
    pub id: EntityId,
    /// Display name.
    pub name: String,
}

// ============================================================================
// SECTION: Entity Union
// ============================================================================

/// Closed union of the resolvable domain entities.
///
/// # Invariants
/// - Variants are stable for serialization and resolver hand-off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum DomainEntity {
    /// Team record.
    Team(Team),
    /// Employee record.
    Employee(Employee),
    /// Task record.
    Task(Task),
    /// Profession record.
    Profession(Profession),
}

impl DomainEntity {
    /// Returns the kind of the wrapped record.
    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        match self {
            Self::Team(_) => EntityKind::Team,
            Self::Employee(_) => EntityKind::Employee,
            Self::Task(_) => EntityKind::Task,
            Self::Profession(_) => EntityKind::Profession,
        }
    }

    /// Returns the identifier of the wrapped record.
    #[must_use]
    pub const fn id(&self) -> &EntityId {
        match self {
            Self::Team(team) => &team.id,
            Self::Employee(employee) => &employee.id,
            Self::Task(task) => &task.id,
            Self::Profession(profession) => &profession.id,
        }
    }
}

// ============================================================================
// SECTION: Relationship Link
// ============================================================================

/// Association between one employee and one profession.
///
/// # Invariants
/// - Identified by the identifier pair; the in-memory copy held by a view is
///   advisory and must be reconciled with the server after any mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipLink {
    /// Employee side of the link.
    pub employee_id: EntityId,
    /// Profession side of the link.
    pub profession_id: EntityId,
}

impl RelationshipLink {
    /// Creates a link between the given employee and profession.
    #[must_use]
    pub const fn new(employee_id: EntityId, profession_id: EntityId) -> Self {
        Self {
            employee_id,
            profession_id,
        }
    }
}

/// Mutation applied to a relationship link.
///
/// # Invariants
/// - Variants are stable for serialization and store contracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipOp {
    /// Creates the link.
    Attach,
    /// Removes the link.
    Detach,
}

impl RelationshipOp {
    /// Returns the stable label for the operation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Attach => "attach",
            Self::Detach => "detach",
        }
    }
}
