// crates/wayfinder-core/src/runtime/engine.rs
// ============================================================================
// Module: Wayfinder Navigation Engine
// Description: Match, guard, load, resolve, activate, and title one attempt.
// Purpose: Execute every user-initiated navigation through one canonical path.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! The navigation engine is the single canonical execution path for
//! Wayfinder. Every attempt flows match → guard → load → resolve → activate
//! → title, and every failure resolves locally into a redirect; nothing
//! escapes the engine as an unhandled fault. A new attempt supersedes any
//! still-pending one: each asynchronous completion re-checks the attempt
//! identity before producing an observable effect, so superseded work runs
//! to completion with its result discarded.
//!
//! Failure priority across stages is fixed: guard outranks loader, loader
//! outranks resolver. Resolver work never starts until every needed module
//! load has settled, so the loader/resolver race cannot be observed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

use thiserror::Error;

use crate::core::attempt::Activation;
use crate::core::attempt::AttemptOutcome;
use crate::core::attempt::MatchedChain;
use crate::core::attempt::NavigationReport;
use crate::core::attempt::TargetPath;
use crate::core::identifiers::AttemptId;
use crate::core::identifiers::TitleKey;
use crate::core::identifiers::ViewId;
use crate::core::routes::RedirectMap;
use crate::core::routes::RouteTable;
use crate::interfaces::CapabilitySource;
use crate::interfaces::EntityStore;
use crate::interfaces::LoadError;
use crate::interfaces::TitleSink;
use crate::interfaces::Translator;
use crate::interfaces::ViewLoader;
use crate::runtime::guard::GuardVerdict;
use crate::runtime::guard::RouteGuard;
use crate::runtime::loader::CachingLoader;
use crate::runtime::matcher::MatchError;
use crate::runtime::matcher::match_module;
use crate::runtime::matcher::match_outlets;
use crate::runtime::matcher::match_primary;
use crate::runtime::resolver::ResolveFailure;
use crate::runtime::resolver::resolve_bindings;
use crate::runtime::title::TitlePhase;
use crate::runtime::title::TitleStrategy;

// ============================================================================
// SECTION: Engine Configuration
// ============================================================================

/// Configuration for the navigation engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationConfig {
    /// Fixed fallback destinations per failure kind.
    pub redirects: RedirectMap,
    /// Title key applied when no matched node declares one.
    pub default_title_key: TitleKey,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            redirects: RedirectMap::default(),
            default_title_key: TitleKey::new("title.default"),
        }
    }
}

/// Engine construction errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineSetupError {
    /// A fallback destination has no route in the table.
    #[error("fallback destination '{path}' matches no route")]
    FallbackMissing {
        /// Offending destination path.
        path: String,
    },
    /// A fallback destination is behind a capability requirement.
    #[error("fallback destination '{path}' requires capabilities")]
    FallbackGuarded {
        /// Offending destination path.
        path: String,
    },
    /// A fallback destination carries resolver bindings.
    #[error("fallback destination '{path}' carries resolver bindings")]
    FallbackResolverBound {
        /// Offending destination path.
        path: String,
    },
}

// ============================================================================
// SECTION: Internal Failure Taxonomy
// ============================================================================

/// Internal settlement of one drive through the pipeline.
#[derive(Debug, Error)]
enum NavFailure {
    /// A newer attempt superseded this one.
    #[error("attempt superseded")]
    Superseded,
    /// No route chain matched the target.
    #[error("no route matched")]
    NoRoute,
    /// The guard denied some node in a matched chain.
    #[error("guard denied (authenticated: {authenticated})")]
    Denied {
        /// Whether an authenticated session was present.
        authenticated: bool,
    },
    /// Module loading failed.
    #[error("module load failed: {0}")]
    Load(LoadError),
    /// A resolver binding found no entity.
    #[error("entity resolution failed: {0}")]
    EntityMissing(ResolveFailure),
    /// A resolver binding failed infrastructurally.
    #[error("entity fetch transport failure: {0}")]
    Transport(ResolveFailure),
}

// ============================================================================
// SECTION: Navigation Engine
// ============================================================================

/// Navigation engine generic over the collaborator interfaces.
#[derive(Debug)]
pub struct NavigationEngine<C, L, S, T, K> {
    /// Immutable route table.
    table: RouteTable,
    /// Engine configuration.
    config: NavigationConfig,
    /// Authentication collaborator.
    capabilities: C,
    /// Module loader behind the idempotent cache.
    loader: CachingLoader<L>,
    /// Persistence collaborator for resolver bindings.
    store: S,
    /// Title strategy over the translation collaborator and title sink.
    title: TitleStrategy<T, K>,
    /// Route guard.
    guard: RouteGuard,
    /// Supersession token; the identity of the current attempt.
    current: AtomicU64,
    /// Published activation slot.
    active: Mutex<Option<Activation>>,
}

impl<C, L, S, T, K> NavigationEngine<C, L, S, T, K>
where
    C: CapabilitySource,
    L: ViewLoader,
    S: EntityStore,
    T: Translator,
    K: TitleSink,
{
    /// Creates an engine over the given table, configuration, and
    /// collaborators.
    ///
    /// # Errors
    ///
    /// Returns [`EngineSetupError`] when a fallback destination is missing
    /// from the table, guarded, or resolver-bound.
    pub fn new(
        table: RouteTable,
        config: NavigationConfig,
        capabilities: C,
        loader: L,
        store: S,
        translator: T,
        sink: K,
    ) -> Result<Self, EngineSetupError> {
        validate_fallbacks(&table, &config.redirects)?;
        let default_title_key = config.default_title_key.clone();
        Ok(Self {
            table,
            config,
            capabilities,
            loader: CachingLoader::new(loader),
            store,
            title: TitleStrategy::new(translator, sink, default_title_key),
            guard: RouteGuard::new(),
            current: AtomicU64::new(0),
            active: Mutex::new(None),
        })
    }

    /// Returns the identity of the current attempt.
    #[must_use]
    pub fn current_attempt(&self) -> AttemptId {
        AttemptId::new(self.current.load(Ordering::SeqCst))
    }

    /// Returns the published activation, if any.
    #[must_use]
    pub fn active(&self) -> Option<Activation> {
        self.lock_active().clone()
    }

    /// Returns the title strategy phase.
    #[must_use]
    pub fn title_phase(&self) -> TitlePhase {
        self.title.phase()
    }

    /// Executes one user-initiated navigation.
    ///
    /// The returned report names the settled outcome and, when the attempt
    /// was redirected, the fallback destination that activated instead.
    pub async fn navigate(&self, target: &str) -> NavigationReport {
        let attempt = AttemptId::new(self.current.fetch_add(1, Ordering::SeqCst) + 1);
        let target = TargetPath::parse(target);
        tracing::debug!(attempt = attempt.value(), target = %target, "navigation started");
        match self.drive(attempt, &target, false).await {
            Ok(()) => NavigationReport {
                attempt,
                target,
                outcome: AttemptOutcome::Activated,
                redirected_to: None,
            },
            Err(NavFailure::Superseded) => NavigationReport {
                attempt,
                target,
                outcome: AttemptOutcome::Superseded,
                redirected_to: None,
            },
            Err(failure) => {
                let (outcome, destination) = self.settle(&failure);
                tracing::warn!(
                    attempt = attempt.value(),
                    target = %target,
                    destination,
                    "navigation failed: {failure}",
                );
                let redirected_to = self.redirect(attempt, destination).await;
                NavigationReport {
                    attempt,
                    target,
                    outcome,
                    redirected_to,
                }
            }
        }
    }

    /// Maps a failure to its outcome and fallback destination.
    fn settle(&self, failure: &NavFailure) -> (AttemptOutcome, &str) {
        let redirects = &self.config.redirects;
        match failure {
            NavFailure::NoRoute => (AttemptOutcome::NotFound, redirects.not_found.as_str()),
            NavFailure::Denied {
                authenticated,
            } => {
                let destination = if *authenticated {
                    redirects.access_denied.as_str()
                } else {
                    redirects.login.as_str()
                };
                (AttemptOutcome::Denied, destination)
            }
            NavFailure::Load(_) | NavFailure::Transport(_) => {
                (AttemptOutcome::ResolutionFailed, redirects.generic_error.as_str())
            }
            NavFailure::EntityMissing(_) => {
                (AttemptOutcome::ResolutionFailed, redirects.not_found.as_str())
            }
            // Superseded attempts are settled before reaching here.
            NavFailure::Superseded => (AttemptOutcome::Superseded, redirects.not_found.as_str()),
        }
    }

    /// Drives one attempt through match, guard, load, resolve, and activate.
    ///
    /// Redirect drives (`is_redirect`) reuse the same path but do not title
    /// the fallback page and never redirect again on failure.
    async fn drive(
        &self,
        attempt: AttemptId,
        target: &TargetPath,
        is_redirect: bool,
    ) -> Result<(), NavFailure> {
        let segments = target.segments();
        let partial = match_primary(&self.table, segments).map_err(|MatchError::NoRoute| {
            NavFailure::NoRoute
        })?;
        let mut chain = partial.chain;
        let mut suspension = partial.suspension;
        let granted = self.capabilities.granted();
        let mut guarded_from = 0;

        // Secondary chains are computed independently from the same target
        // and must independently pass the guard before any loader work.
        let outlets = match_outlets(&self.table, segments);
        let mut outlet_views: BTreeMap<_, ViewId> = BTreeMap::new();
        for (outlet, outlet_chain) in &outlets {
            if let GuardVerdict::Denied {
                segment,
            } = self.guard.check(outlet_chain, &granted)
            {
                tracing::debug!(
                    attempt = attempt.value(),
                    outlet = outlet.as_str(),
                    segment = segment.as_str(),
                    "outlet guard denied",
                );
                return Err(NavFailure::Denied {
                    authenticated: self.capabilities.authenticated(),
                });
            }
            if let Some(outlet_view) = outlet_chain.terminal().and_then(|node| node.view.clone()) {
                outlet_views.insert(outlet.clone(), outlet_view);
            }
        }

        loop {
            // Guard newly matched nodes before any loader work for them.
            if let GuardVerdict::Denied {
                segment,
            } = self.guard.check_from(&chain, guarded_from, &granted)
            {
                tracing::debug!(attempt = attempt.value(), segment = segment.as_str(), "guard denied");
                return Err(NavFailure::Denied {
                    authenticated: self.capabilities.authenticated(),
                });
            }
            guarded_from = chain.nodes.len();

            let Some(pending) = suspension.take() else {
                break;
            };
            let module = self.loader.load(&pending.module).await.map_err(NavFailure::Load)?;
            if !self.is_current(attempt) {
                return Err(NavFailure::Superseded);
            }
            let resumed = match_module(&module, &pending.remaining)
                .map_err(|MatchError::NoRoute| NavFailure::NoRoute)?;
            chain.params.extend(resumed.chain.params);
            chain.nodes.extend(resumed.chain.nodes);
            suspension = resumed.suspension;
        }

        let view = chain
            .terminal()
            .and_then(|terminal| terminal.view.clone())
            .ok_or(NavFailure::NoRoute)?;

        let bindings = chain.terminal().map(|node| node.resolvers.clone()).unwrap_or_default();
        let entities =
            resolve_bindings(&self.store, &bindings, &chain.params).await.map_err(
                |failure| match failure {
                    missing @ ResolveFailure::EntityMissing { .. } => {
                        NavFailure::EntityMissing(missing)
                    }
                    transport @ ResolveFailure::Transport { .. } => NavFailure::Transport(transport),
                },
            )?;
        if !self.is_current(attempt) {
            return Err(NavFailure::Superseded);
        }

        let title_key = chain.title_key().cloned();
        self.publish(Activation {
            attempt,
            target: target.clone(),
            view,
            outlets: outlet_views,
            entities,
            params: chain.params.clone(),
        });
        tracing::debug!(attempt = attempt.value(), target = %target, "destination activated");

        if !is_redirect {
            self.title.apply(title_key.as_ref(), attempt, &self.current).await;
        }
        Ok(())
    }

    /// Activates a fallback destination for a failed attempt.
    ///
    /// Returns the destination when it activated; a superseded or broken
    /// fallback leaves the previous activation in place.
    async fn redirect(&self, attempt: AttemptId, destination: &str) -> Option<TargetPath> {
        if !self.is_current(attempt) {
            return None;
        }
        let target = TargetPath::parse(destination);
        match self.drive(attempt, &target, true).await {
            Ok(()) => Some(target),
            Err(failure) => {
                tracing::error!(
                    attempt = attempt.value(),
                    destination,
                    "fallback activation failed: {failure}",
                );
                None
            }
        }
    }

    /// Publishes an activation while the attempt is current.
    fn publish(&self, activation: Activation) {
        *self.lock_active() = Some(activation);
    }

    /// Returns true while the attempt is still the current one.
    fn is_current(&self, attempt: AttemptId) -> bool {
        self.current.load(Ordering::SeqCst) == attempt.value()
    }

    /// Locks the activation slot, recovering from poisoning.
    fn lock_active(&self) -> MutexGuard<'_, Option<Activation>> {
        self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// ============================================================================
// SECTION: Fallback Validation
// ============================================================================

/// Validates the fallback destinations against the static table.
///
/// Destinations resolved through a lazy module are checked at load time by
/// the same route validation rules; statically matched destinations must be
/// public and resolver-free here.
fn validate_fallbacks(table: &RouteTable, redirects: &RedirectMap) -> Result<(), EngineSetupError> {
    let destinations = [
        redirects.access_denied.as_str(),
        redirects.not_found.as_str(),
        redirects.login.as_str(),
        redirects.generic_error.as_str(),
    ];
    for destination in destinations {
        let target = TargetPath::parse(destination);
        let partial = match_primary(table, target.segments()).map_err(|MatchError::NoRoute| {
            EngineSetupError::FallbackMissing {
                path: destination.to_string(),
            }
        })?;
        if partial.suspension.is_some() {
            continue;
        }
        validate_fallback_chain(destination, &partial.chain)?;
    }
    Ok(())
}

/// Checks that a statically matched fallback chain is public and
/// resolver-free.
fn validate_fallback_chain(
    destination: &str,
    chain: &MatchedChain,
) -> Result<(), EngineSetupError> {
    for node in &chain.nodes {
        if !node.required.is_empty() {
            return Err(EngineSetupError::FallbackGuarded {
                path: destination.to_string(),
            });
        }
    }
    if chain.terminal().is_some_and(|terminal| !terminal.resolvers.is_empty()) {
        return Err(EngineSetupError::FallbackResolverBound {
            path: destination.to_string(),
        });
    }
    Ok(())
}
