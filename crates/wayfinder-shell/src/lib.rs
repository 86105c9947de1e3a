// crates/wayfinder-shell/src/lib.rs
// ============================================================================
// Module: Wayfinder Application Shell
// Description: Route tree, module registry, and engine assembly.
// Purpose: Wire the navigation engine for the workforce application.
// Dependencies: wayfinder-core, wayfinder-i18n, wayfinder-providers
// ============================================================================

//! ## Overview
//! The shell owns what the rest of the workspace leaves abstract: the
//! concrete route tree, the application module registry, and the wiring of
//! the engine with the session holder, catalog translator, store registry,
//! and title sink. Demo seeding helpers cover local runs and tests.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod modules;
pub mod routes;

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;
use wayfinder_core::CapabilitySet;
use wayfinder_core::DomainEntity;
use wayfinder_core::Employee;
use wayfinder_core::EngineSetupError;
use wayfinder_core::EntityId;
use wayfinder_core::EntityKind;
use wayfinder_core::InMemoryTitleSink;
use wayfinder_core::NavigationConfig;
use wayfinder_core::NavigationEngine;
use wayfinder_core::Profession;
use wayfinder_core::PrincipalId;
use wayfinder_core::RouteTableError;
use wayfinder_core::Session;
use wayfinder_core::SessionHolder;
use wayfinder_core::Task;
use wayfinder_core::Team;
use wayfinder_i18n::CatalogTranslator;
use wayfinder_providers::InMemoryEntityStore;
use wayfinder_providers::StoreAccessPolicy;
use wayfinder_providers::StoreRegistry;

pub use modules::StaticModuleLoader;
pub use routes::CAP_ADMIN;
pub use routes::CAP_MANAGER;
pub use routes::CAP_USER;
pub use routes::application_routes;

// ============================================================================
// SECTION: Shell Errors
// ============================================================================

/// Shell assembly errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum ShellError {
    /// The application route tree failed validation.
    #[error("route table invalid: {0}")]
    Routes(#[from] RouteTableError),
    /// The engine rejected the table or fallback configuration.
    #[error("engine setup failed: {0}")]
    Engine(#[from] EngineSetupError),
}

// ============================================================================
// SECTION: Engine Assembly
// ============================================================================

/// Concrete engine type assembled by the shell.
pub type ShellEngine = NavigationEngine<
    SessionHolder,
    StaticModuleLoader,
    StoreRegistry,
    CatalogTranslator,
    InMemoryTitleSink,
>;

/// Assembles the navigation engine for the application.
///
/// # Errors
///
/// Returns [`ShellError`] when the route tree or fallback configuration is
/// invalid.
pub fn build_engine(
    session: SessionHolder,
    stores: StoreRegistry,
    translator: CatalogTranslator,
    sink: InMemoryTitleSink,
) -> Result<ShellEngine, ShellError> {
    let table = application_routes()?;
    let engine = NavigationEngine::new(
        table,
        NavigationConfig::default(),
        session,
        StaticModuleLoader::with_application_modules(),
        stores,
        translator,
        sink,
    )?;
    Ok(engine)
}

/// Returns a session for the given principal and capability tokens.
#[must_use]
pub fn session_for(principal: &str, tokens: &[&str]) -> Session {
    let granted: CapabilitySet = tokens.iter().copied().collect();
    Session::new(PrincipalId::new(principal), granted)
}

// ============================================================================
// SECTION: Demo Data
// ============================================================================

/// Seeds an in-memory store with the demo workforce records.
#[must_use]
pub fn demo_store() -> InMemoryEntityStore {
    let store = InMemoryEntityStore::new();
    store.insert(DomainEntity::Team(Team {
        id: EntityId::new("1"),
        name: "Assembly".to_string(),
        employee_ids: vec![EntityId::new("7")],
    }));
    store.insert(DomainEntity::Employee(Employee {
        id: EntityId::new("7"),
        name: "Erna Mustermann".to_string(),
        profession_ids: vec![EntityId::new("3")],
    }));
    store.insert(DomainEntity::Task(Task {
        id: EntityId::new("42"),
        subject: "Renew welding certificate".to_string(),
        assignee_id: Some(EntityId::new("7")),
    }));
    store.insert(DomainEntity::Profession(Profession {
        id: EntityId::new("3"),
        name: "Welder".to_string(),
    }));
    store
}

/// Builds a store registry serving every entity kind from the demo store.
#[must_use]
pub fn demo_registry() -> StoreRegistry {
    let store = demo_store();
    let mut registry = StoreRegistry::new(StoreAccessPolicy::allow_all());
    registry.register_backend(EntityKind::Team, store.clone());
    registry.register_backend(EntityKind::Employee, store.clone());
    registry.register_backend(EntityKind::Task, store.clone());
    registry.register_backend(EntityKind::Profession, store);
    registry
}
