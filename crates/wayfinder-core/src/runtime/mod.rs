// crates/wayfinder-core/src/runtime/mod.rs
// ============================================================================
// Module: Wayfinder Runtime
// Description: Matching, guarding, loading, resolving, titling, and workflow.
// Purpose: Execute navigation attempts against the collaborator interfaces.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! Runtime modules implement the route authorization and resolution
//! pipeline. Every external surface must navigate through the same engine to
//! preserve the supersession invariant and the failure taxonomy.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod engine;
pub mod guard;
pub mod loader;
pub mod matcher;
pub mod resolver;
pub mod title;
pub mod workflow;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use engine::EngineSetupError;
pub use engine::NavigationConfig;
pub use engine::NavigationEngine;
pub use guard::GuardVerdict;
pub use guard::RouteGuard;
pub use guard::authorize;
pub use loader::CachingLoader;
pub use matcher::MatchError;
pub use matcher::PartialMatch;
pub use matcher::Suspension;
pub use matcher::match_module;
pub use matcher::match_outlets;
pub use matcher::match_primary;
pub use resolver::ResolveFailure;
pub use resolver::resolve_bindings;
pub use title::TitleOutcome;
pub use title::TitlePhase;
pub use title::TitleStrategy;
pub use workflow::HostSignal;
pub use workflow::RelationshipWorkflow;
pub use workflow::WorkflowError;
pub use workflow::WorkflowPhase;
