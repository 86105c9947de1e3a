// crates/wayfinder-core/src/lib.rs
// ============================================================================
// Module: Wayfinder Core Library
// Description: Public API surface for the Wayfinder navigation core.
// Purpose: Expose core types, interfaces, and runtime helpers.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Wayfinder core implements the route authorization and resolution pipeline
//! for a multi-entity business application: a validated declarative route
//! table, a capability guard, lazy module materialization, entity resolvers,
//! a localized title strategy, and the confirmation-gated relationship
//! mutation workflow. It is backend-agnostic and integrates through explicit
//! collaborator interfaces.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use crate::core::*;

pub use interfaces::CapabilitySource;
pub use interfaces::EntityStore;
pub use interfaces::FetchError;
pub use interfaces::InMemoryTitleSink;
pub use interfaces::LoadError;
pub use interfaces::LoadedModule;
pub use interfaces::MessageArg;
pub use interfaces::MutationError;
pub use interfaces::RelationshipMutation;
pub use interfaces::TitleSink;
pub use interfaces::Translator;
pub use interfaces::ViewLoader;
pub use runtime::CachingLoader;
pub use runtime::EngineSetupError;
pub use runtime::GuardVerdict;
pub use runtime::HostSignal;
pub use runtime::MatchError;
pub use runtime::NavigationConfig;
pub use runtime::NavigationEngine;
pub use runtime::RelationshipWorkflow;
pub use runtime::ResolveFailure;
pub use runtime::RouteGuard;
pub use runtime::TitleOutcome;
pub use runtime::TitlePhase;
pub use runtime::TitleStrategy;
pub use runtime::WorkflowError;
pub use runtime::WorkflowPhase;
pub use runtime::authorize;
