// crates/wayfinder-core/src/runtime/loader.rs
// ============================================================================
// Module: Wayfinder Module Cache
// Description: Idempotent caching wrapper around the view loader collaborator.
// Purpose: Reuse previously loaded modules instead of re-fetching them.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! Successive navigations to the same module within a session reuse the
//! previously loaded factory rather than fetching it again. The cache also
//! validates loaded routes once, on first materialization, with the same
//! rules the static table enforces at startup.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::PoisonError;

use crate::core::identifiers::ModuleId;
use crate::core::routes::validate_module_routes;
use crate::interfaces::LoadError;
use crate::interfaces::LoadedModule;
use crate::interfaces::ViewLoader;

// ============================================================================
// SECTION: Caching Loader
// ============================================================================

/// Idempotent per-module cache over a [`ViewLoader`].
///
/// # Invariants
/// - A second load of the same module returns the same shared allocation and
///   performs no underlying fetch.
/// - Failed loads are not cached; a later navigation may retry.
#[derive(Debug)]
pub struct CachingLoader<L> {
    /// Underlying loader collaborator.
    inner: L,
    /// Loaded modules keyed by identifier.
    cache: Mutex<BTreeMap<ModuleId, Arc<LoadedModule>>>,
}

impl<L: ViewLoader> CachingLoader<L> {
    /// Wraps the given loader with an empty cache.
    #[must_use]
    pub fn new(inner: L) -> Self {
        Self {
            inner,
            cache: Mutex::new(BTreeMap::new()),
        }
    }

    /// Materializes a module, reusing the cached copy when present.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] when the underlying fetch fails or the loaded
    /// routes are invalid.
    pub async fn load(&self, module: &ModuleId) -> Result<Arc<LoadedModule>, LoadError> {
        if let Some(cached) = self.lock().get(module) {
            return Ok(Arc::clone(cached));
        }
        let loaded = self.inner.load(module).await?;
        validate_module_routes(&loaded.routes).map_err(|err| LoadError::Invalid {
            module: module.clone(),
            reason: err.to_string(),
        })?;
        self.lock().insert(module.clone(), Arc::clone(&loaded));
        Ok(loaded)
    }

    /// Locks the cache, recovering from poisoning.
    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<ModuleId, Arc<LoadedModule>>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
