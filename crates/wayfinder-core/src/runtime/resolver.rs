// crates/wayfinder-core/src/runtime/resolver.rs
// ============================================================================
// Module: Wayfinder Resolver Execution
// Description: Concurrent execution of a node's resolver bindings.
// Purpose: Fetch every required entity before the destination activates.
// Dependencies: crate::core, crate::interfaces, futures
// ============================================================================

//! ## Overview
//! All resolver bindings on the terminal node run concurrently; the node
//! activates only once every binding settles successfully. A missing or
//! empty path parameter fails the binding before any fetch is issued. When
//! several bindings fail, entity-not-found outranks transport failure so the
//! user-visible fallback page does not depend on completion order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use futures::future::join_all;
use thiserror::Error;

use crate::core::entities::DomainEntity;
use crate::core::identifiers::EntityId;
use crate::core::routes::ResolverBinding;
use crate::interfaces::EntityStore;
use crate::interfaces::FetchError;

// ============================================================================
// SECTION: Resolution Errors
// ============================================================================

/// Failure of a resolver binding set.
///
/// # Invariants
/// - `EntityMissing` redirects to the not-found destination, `Transport` to
///   the generic-error destination.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveFailure {
    /// A binding's identifier did not resolve to an existing entity, or the
    /// path parameter was absent.
    #[error("resolver binding '{binding}' found no entity")]
    EntityMissing {
        /// Failing binding name.
        binding: String,
    },
    /// A binding failed for infrastructural reasons.
    #[error("resolver binding '{binding}' failed: {reason}")]
    Transport {
        /// Failing binding name.
        binding: String,
        /// Collaborator-reported reason.
        reason: String,
    },
}

// ============================================================================
// SECTION: Binding Execution
// ============================================================================

/// Runs every binding concurrently and collects the resolved entities.
///
/// # Errors
///
/// Returns [`ResolveFailure`] when any binding fails; entity-not-found
/// outranks transport failure when several do.
pub async fn resolve_bindings<S: EntityStore>(
    store: &S,
    bindings: &[ResolverBinding],
    params: &BTreeMap<String, String>,
) -> Result<BTreeMap<String, DomainEntity>, ResolveFailure> {
    let futures = bindings.iter().map(|binding| resolve_one(store, binding, params));
    let settled = join_all(futures).await;

    let mut entities = BTreeMap::new();
    let mut transport: Option<ResolveFailure> = None;
    for (binding, result) in bindings.iter().zip(settled) {
        match result {
            Ok(entity) => {
                entities.insert(binding.name.clone(), entity);
            }
            Err(failure @ ResolveFailure::EntityMissing { .. }) => return Err(failure),
            Err(failure @ ResolveFailure::Transport { .. }) => {
                transport.get_or_insert(failure);
            }
        }
    }
    if let Some(failure) = transport {
        return Err(failure);
    }
    Ok(entities)
}

/// Resolves one binding against the store.
async fn resolve_one<S: EntityStore>(
    store: &S,
    binding: &ResolverBinding,
    params: &BTreeMap<String, String>,
) -> Result<DomainEntity, ResolveFailure> {
    let Some(raw) = params.get(&binding.param).filter(|value| !value.is_empty()) else {
        return Err(ResolveFailure::EntityMissing {
            binding: binding.name.clone(),
        });
    };
    let id = EntityId::new(raw.clone());
    match store.fetch_by_id(binding.kind, &id).await {
        Ok(entity) => Ok(entity),
        Err(FetchError::NotFound { .. }) => Err(ResolveFailure::EntityMissing {
            binding: binding.name.clone(),
        }),
        Err(FetchError::Transport(reason)) => Err(ResolveFailure::Transport {
            binding: binding.name.clone(),
            reason,
        }),
    }
}
