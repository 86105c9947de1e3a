// crates/wayfinder-core/src/core/routes.rs
// ============================================================================
// Module: Wayfinder Route Table
// Description: Declarative route tree, construction-time validation, redirects.
// Purpose: Provide the immutable route table matched on every navigation.
// Dependencies: crate::core::{entities, identifiers, session}, serde, thiserror
// ============================================================================

//! ## Overview
//! The route table is a static declarative tree constructed once at startup
//! and immutable for the process lifetime. Ambiguous declarations are
//! rejected at construction rather than resolved silently by match order:
//! duplicate literal siblings, more than one dynamic sibling at one depth,
//! and resolver bindings without a supplying path parameter are all
//! construction errors.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::entities::EntityKind;
use crate::core::identifiers::ModuleId;
use crate::core::identifiers::OutletName;
use crate::core::identifiers::TitleKey;
use crate::core::identifiers::ViewId;
use crate::core::session::CapabilitySet;

// ============================================================================
// SECTION: Path Segments
// ============================================================================

/// One declared path segment of a route node.
///
/// # Invariants
/// - `Literal` values contain no `/`.
/// - `Param` names are non-empty and unique along any root-to-leaf path.
/// - `Empty` consumes no target segment and marks default children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Segment {
    /// Fixed path segment matched verbatim.
    Literal(String),
    /// Dynamic identifier segment captured under the given parameter name.
    Param(String),
    /// Segment that matches without consuming target input.
    Empty,
}

impl Segment {
    /// Returns a literal segment.
    #[must_use]
    pub fn literal(value: impl Into<String>) -> Self {
        Self::Literal(value.into())
    }

    /// Returns a dynamic identifier segment.
    #[must_use]
    pub fn param(name: impl Into<String>) -> Self {
        Self::Param(name.into())
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => f.write_str(value),
            Self::Param(name) => write!(f, ":{name}"),
            Self::Empty => f.write_str(""),
        }
    }
}

// ============================================================================
// SECTION: Resolver Bindings
// ============================================================================

/// Named association between a data fetch and a path parameter.
///
/// # Invariants
/// - `param` must be supplied by the segment of the bound node or one of its
///   ancestors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverBinding {
    /// Name under which the resolved entity is handed to the view.
    pub name: String,
    /// Entity kind fetched by the binding.
    pub kind: EntityKind,
    /// Path parameter supplying the entity identifier.
    pub param: String,
}

impl ResolverBinding {
    /// Creates a resolver binding.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: EntityKind, param: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            param: param.into(),
        }
    }
}

// ============================================================================
// SECTION: Route Nodes
// ============================================================================

/// One node of the declarative route tree.
///
/// # Invariants
/// - A node carries at most one of `module` and non-empty `children`.
/// - A node with children delegates matching to the deepest matching
///   descendant.
/// - `outlet` is only honored on root nodes; it names the secondary slot the
///   subtree renders into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteNode {
    /// Declared path segment.
    pub segment: Segment,
    /// Capabilities required to activate this node; empty means public.
    pub required: CapabilitySet,
    /// Resolver bindings executed before activation.
    pub resolvers: Vec<ResolverBinding>,
    /// View factory key for an activatable destination.
    pub view: Option<ViewId>,
    /// Lazily materialized nested route table.
    pub module: Option<ModuleId>,
    /// Statically declared children.
    pub children: Vec<RouteNode>,
    /// Named secondary slot for the subtree.
    pub outlet: Option<OutletName>,
    /// Catalog key for the page title.
    pub title_key: Option<TitleKey>,
}

impl RouteNode {
    /// Creates a node with the given segment and no other declarations.
    #[must_use]
    pub fn new(segment: Segment) -> Self {
        Self {
            segment,
            required: CapabilitySet::new(),
            resolvers: Vec::new(),
            view: None,
            module: None,
            children: Vec::new(),
            outlet: None,
            title_key: None,
        }
    }

    /// Sets the required capability set.
    #[must_use]
    pub fn with_required(mut self, required: CapabilitySet) -> Self {
        self.required = required;
        self
    }

    /// Appends a resolver binding.
    #[must_use]
    pub fn with_resolver(mut self, binding: ResolverBinding) -> Self {
        self.resolvers.push(binding);
        self
    }

    /// Sets the destination view.
    #[must_use]
    pub fn with_view(mut self, view: ViewId) -> Self {
        self.view = Some(view);
        self
    }

    /// Sets the lazily loaded module.
    #[must_use]
    pub fn with_module(mut self, module: ModuleId) -> Self {
        self.module = Some(module);
        self
    }

    /// Appends a statically declared child.
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// Sets the secondary slot name.
    #[must_use]
    pub fn with_outlet(mut self, outlet: OutletName) -> Self {
        self.outlet = Some(outlet);
        self
    }

    /// Sets the title key.
    #[must_use]
    pub fn with_title(mut self, title_key: TitleKey) -> Self {
        self.title_key = Some(title_key);
        self
    }
}

// ============================================================================
// SECTION: Validation Errors
// ============================================================================

/// Route table construction errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteTableError {
    /// Two sibling nodes declare the same literal segment.
    #[error("duplicate literal segment '{segment}' among siblings")]
    DuplicateLiteral {
        /// Conflicting literal value.
        segment: String,
    },
    /// More than one dynamic sibling at one depth makes matching ambiguous.
    #[error("multiple dynamic segments among siblings (':{first}' and ':{second}')")]
    AmbiguousParams {
        /// First declared parameter name.
        first: String,
        /// Second declared parameter name.
        second: String,
    },
    /// More than one empty sibling at one depth makes matching ambiguous.
    #[error("multiple empty segments among siblings")]
    AmbiguousEmpty,
    /// A dynamic segment declares an empty parameter name.
    #[error("dynamic segment with empty parameter name")]
    EmptyParamName,
    /// A literal segment contains a path separator.
    #[error("literal segment '{segment}' contains '/'")]
    LiteralWithSeparator {
        /// Offending literal value.
        segment: String,
    },
    /// A node declares both a lazy module and static children.
    #[error("node '{segment}' declares both a module and static children")]
    ModuleWithChildren {
        /// Display form of the offending segment.
        segment: String,
    },
    /// A parameter name is redeclared along one root-to-leaf path.
    #[error("parameter ':{param}' redeclared along one path")]
    ShadowedParam {
        /// Redeclared parameter name.
        param: String,
    },
    /// A resolver binding references a parameter no ancestor-or-self supplies.
    #[error("resolver binding '{binding}' references unknown parameter ':{param}'")]
    UnboundResolverParam {
        /// Binding name.
        binding: String,
        /// Missing parameter name.
        param: String,
    },
    /// An outlet name appears below the root level.
    #[error("outlet '{outlet}' declared below the root level")]
    NestedOutlet {
        /// Offending outlet name.
        outlet: String,
    },
}

// ============================================================================
// SECTION: Route Table
// ============================================================================

/// Immutable, validated route tree.
///
/// # Invariants
/// - Construction rejects ambiguous declarations; afterwards the tree never
///   changes for the process lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTable {
    /// Root nodes in declaration order.
    roots: Vec<RouteNode>,
}

impl RouteTable {
    /// Validates the declared roots and constructs the table.
    ///
    /// # Errors
    ///
    /// Returns [`RouteTableError`] when the declarations are ambiguous or
    /// structurally invalid.
    pub fn new(roots: Vec<RouteNode>) -> Result<Self, RouteTableError> {
        validate_siblings(&roots, true)?;
        for root in &roots {
            let mut params = BTreeSet::new();
            validate_node(root, &mut params, true)?;
        }
        Ok(Self {
            roots,
        })
    }

    /// Returns the primary-slot root nodes in declaration order.
    pub fn primary_roots(&self) -> impl Iterator<Item = &RouteNode> {
        self.roots.iter().filter(|node| node.outlet.is_none())
    }

    /// Returns the secondary-slot root nodes in declaration order.
    pub fn outlet_roots(&self) -> impl Iterator<Item = (&OutletName, &RouteNode)> {
        self.roots.iter().filter_map(|node| node.outlet.as_ref().map(|outlet| (outlet, node)))
    }
}

/// Validates lazily loaded module routes.
///
/// The mount point is not visible at load time, so the ancestor-parameter
/// rule for resolver bindings is deferred to resolver execution.
///
/// # Errors
///
/// Returns [`RouteTableError`] when the loaded declarations are ambiguous or
/// structurally invalid.
pub fn validate_module_routes(routes: &[RouteNode]) -> Result<(), RouteTableError> {
    validate_siblings(routes, false)?;
    for route in routes {
        let mut params = BTreeSet::new();
        validate_node(route, &mut params, false)?;
    }
    Ok(())
}

/// Validates one sibling group for ambiguous declarations.
fn validate_siblings(siblings: &[RouteNode], at_root: bool) -> Result<(), RouteTableError> {
    let mut literals = BTreeSet::new();
    let mut param: Option<&str> = None;
    let mut saw_empty = false;
    for node in siblings {
        if !at_root
            && let Some(outlet) = &node.outlet
        {
            return Err(RouteTableError::NestedOutlet {
                outlet: outlet.as_str().to_string(),
            });
        }
        // Outlet roots match independently of the primary tree, so they do
        // not participate in sibling ambiguity checks.
        if at_root && node.outlet.is_some() {
            continue;
        }
        match &node.segment {
            Segment::Literal(value) => {
                if value.contains('/') {
                    return Err(RouteTableError::LiteralWithSeparator {
                        segment: value.clone(),
                    });
                }
                if !literals.insert(value.clone()) {
                    return Err(RouteTableError::DuplicateLiteral {
                        segment: value.clone(),
                    });
                }
            }
            Segment::Param(name) => {
                if name.is_empty() {
                    return Err(RouteTableError::EmptyParamName);
                }
                if let Some(first) = param {
                    return Err(RouteTableError::AmbiguousParams {
                        first: first.to_string(),
                        second: name.clone(),
                    });
                }
                param = Some(name);
            }
            Segment::Empty => {
                if saw_empty {
                    return Err(RouteTableError::AmbiguousEmpty);
                }
                saw_empty = true;
            }
        }
    }
    Ok(())
}

/// Validates one node and its static subtree.
///
/// `params` carries the parameter names supplied along the path so far;
/// `check_bindings` controls whether resolver bindings must find their
/// parameter among them.
fn validate_node(
    node: &RouteNode,
    params: &mut BTreeSet<String>,
    check_bindings: bool,
) -> Result<(), RouteTableError> {
    let mut added = false;
    if let Segment::Param(name) = &node.segment {
        if name.is_empty() {
            return Err(RouteTableError::EmptyParamName);
        }
        if !params.insert(name.clone()) {
            return Err(RouteTableError::ShadowedParam {
                param: name.clone(),
            });
        }
        added = true;
    }
    if node.module.is_some() && !node.children.is_empty() {
        return Err(RouteTableError::ModuleWithChildren {
            segment: node.segment.to_string(),
        });
    }
    if check_bindings {
        for binding in &node.resolvers {
            if !params.contains(&binding.param) {
                return Err(RouteTableError::UnboundResolverParam {
                    binding: binding.name.clone(),
                    param: binding.param.clone(),
                });
            }
        }
    }
    validate_siblings(&node.children, false)?;
    for child in &node.children {
        validate_node(child, params, check_bindings)?;
    }
    if added
        && let Segment::Param(name) = &node.segment
    {
        params.remove(name);
    }
    Ok(())
}

// ============================================================================
// SECTION: Redirect Destinations
// ============================================================================

/// Fixed logical destinations used when an attempt cannot activate.
///
/// # Invariants
/// - Destinations are plain public paths; their routes must not carry
///   capability requirements or resolver bindings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectMap {
    /// Destination for guard denials with an authenticated session.
    pub access_denied: String,
    /// Destination for structural and entity not-found failures.
    pub not_found: String,
    /// Destination for guard denials without an authenticated session.
    pub login: String,
    /// Destination for infrastructural load and transport failures.
    pub generic_error: String,
}

impl Default for RedirectMap {
    fn default() -> Self {
        Self {
            access_denied: "/accessdenied".to_string(),
            not_found: "/404".to_string(),
            login: "/login".to_string(),
            generic_error: "/error".to_string(),
        }
    }
}
