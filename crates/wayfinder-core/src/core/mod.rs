// crates/wayfinder-core/src/core/mod.rs
// ============================================================================
// Module: Wayfinder Core Types
// Description: Canonical identifier, session, entity, route, and attempt types.
// Purpose: Provide stable, serializable types for the navigation pipeline.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! Wayfinder core types define the route table, the session and capability
//! model, the managed domain entities, and the ephemeral navigation-attempt
//! records. These types are the canonical source of truth for every runtime
//! surface built on top of them.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod attempt;
pub mod entities;
pub mod identifiers;
pub mod routes;
pub mod session;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use attempt::Activation;
pub use attempt::AttemptOutcome;
pub use attempt::MatchedChain;
pub use attempt::MatchedNode;
pub use attempt::NavigationReport;
pub use attempt::TargetPath;
pub use entities::DomainEntity;
pub use entities::Employee;
pub use entities::EntityKind;
pub use entities::Profession;
pub use entities::RelationshipLink;
pub use entities::RelationshipOp;
pub use entities::Task;
pub use entities::Team;
pub use identifiers::AttemptId;
pub use identifiers::Capability;
pub use identifiers::EntityId;
pub use identifiers::ModuleId;
pub use identifiers::OutletName;
pub use identifiers::PrincipalId;
pub use identifiers::TitleKey;
pub use identifiers::ViewId;
pub use routes::RedirectMap;
pub use routes::ResolverBinding;
pub use routes::RouteNode;
pub use routes::RouteTable;
pub use routes::RouteTableError;
pub use routes::Segment;
pub use routes::validate_module_routes;
pub use session::CapabilitySet;
pub use session::Session;
pub use session::SessionHolder;
