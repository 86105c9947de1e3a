// crates/wayfinder-core/src/core/session.rs
// ============================================================================
// Module: Wayfinder Session
// Description: Principal identity, granted capabilities, and the session holder.
// Purpose: Provide the read-only capability context consumed by the route guard.
// Dependencies: crate::core::identifiers, serde
// ============================================================================

//! ## Overview
//! The session captures the authenticated principal and the capability tokens
//! granted at login. The pipeline only ever reads this state; the
//! authentication collaborator is the single writer through
//! [`SessionHolder::login`] and [`SessionHolder::logout`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::PoisonError;

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::Capability;
use crate::core::identifiers::PrincipalId;

// ============================================================================
// SECTION: Capability Set
// ============================================================================

/// Ordered set of capability tokens.
///
/// # Invariants
/// - Membership order is stable for deterministic presentation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CapabilitySet {
    /// Capability tokens held by the set.
    tokens: BTreeSet<Capability>,
}

impl CapabilitySet {
    /// Creates an empty capability set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tokens: BTreeSet::new(),
        }
    }

    /// Returns true when the set holds no tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Returns the number of tokens in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Inserts a capability token.
    pub fn insert(&mut self, capability: Capability) {
        self.tokens.insert(capability);
    }

    /// Returns true when the set holds the given token.
    #[must_use]
    pub fn contains(&self, capability: &Capability) -> bool {
        self.tokens.contains(capability)
    }

    /// Returns true when every token of `required` is held by this set.
    #[must_use]
    pub fn contains_all(&self, required: &Self) -> bool {
        required.tokens.is_subset(&self.tokens)
    }

    /// Iterates over the tokens in order.
    pub fn iter(&self) -> impl Iterator<Item = &Capability> {
        self.tokens.iter()
    }
}

impl FromIterator<Capability> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
        Self {
            tokens: iter.into_iter().collect(),
        }
    }
}

impl<'a> FromIterator<&'a str> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        iter.into_iter().map(Capability::from).collect()
    }
}

// ============================================================================
// SECTION: Session
// ============================================================================

/// Authenticated session spanning login to logout.
///
/// # Invariants
/// - `granted` is fixed for the session lifetime; capability changes require
///   a fresh login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Identity of the authenticated principal.
    pub principal: PrincipalId,
    /// Capability tokens granted to the principal.
    pub granted: CapabilitySet,
}

impl Session {
    /// Creates a session for the given principal and granted capabilities.
    #[must_use]
    pub const fn new(principal: PrincipalId, granted: CapabilitySet) -> Self {
        Self {
            principal,
            granted,
        }
    }
}

// ============================================================================
// SECTION: Session Holder
// ============================================================================

/// Process-wide session slot with a single writer.
///
/// # Invariants
/// - Only the authentication collaborator calls [`SessionHolder::login`] and
///   [`SessionHolder::logout`]; the pipeline reads through
///   [`SessionHolder::granted`] and [`SessionHolder::authenticated`].
#[derive(Debug, Default, Clone)]
pub struct SessionHolder {
    /// Current session, absent when logged out.
    current: Arc<Mutex<Option<Session>>>,
}

impl SessionHolder {
    /// Creates an empty (logged-out) session holder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            current: Arc::new(Mutex::new(None)),
        }
    }

    /// Installs the session produced by a successful login.
    pub fn login(&self, session: Session) {
        *self.lock() = Some(session);
    }

    /// Clears the session at logout.
    pub fn logout(&self) {
        *self.lock() = None;
    }

    /// Returns true when a session is installed.
    #[must_use]
    pub fn authenticated(&self) -> bool {
        self.lock().is_some()
    }

    /// Returns the granted capabilities, empty when logged out.
    #[must_use]
    pub fn granted(&self) -> CapabilitySet {
        self.lock().as_ref().map(|session| session.granted.clone()).unwrap_or_default()
    }

    /// Returns the authenticated principal, if any.
    #[must_use]
    pub fn principal(&self) -> Option<PrincipalId> {
        self.lock().as_ref().map(|session| session.principal.clone())
    }

    /// Locks the slot, recovering from poisoning.
    fn lock(&self) -> std::sync::MutexGuard<'_, Option<Session>> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
