// crates/wayfinder-shell/src/routes.rs
// ============================================================================
// Module: Application Route Tree
// Description: Declarative route table for the workforce application.
// Purpose: Declare the team, employee, task, training, and admin areas.
// Dependencies: wayfinder-core
// ============================================================================

//! ## Overview
//! The application route tree is declared once at startup and validated by
//! the core table constructor. Every business area is a lazily loaded
//! module behind its capability requirement; the fallback pages are public
//! leaves, and the persistent navigation region renders into the `sidenav`
//! outlet.

// ============================================================================
// SECTION: Imports
// ============================================================================

use wayfinder_core::CapabilitySet;
use wayfinder_core::ModuleId;
use wayfinder_core::OutletName;
use wayfinder_core::RouteNode;
use wayfinder_core::RouteTable;
use wayfinder_core::RouteTableError;
use wayfinder_core::Segment;
use wayfinder_core::TitleKey;
use wayfinder_core::ViewId;

// ============================================================================
// SECTION: Capability Tokens
// ============================================================================

/// Base capability required for the business areas.
pub const CAP_USER: &str = "USER";
/// Capability required for create and edit destinations.
pub const CAP_MANAGER: &str = "MANAGER";
/// Capability required for the administration area.
pub const CAP_ADMIN: &str = "ADMIN";

/// Returns a capability set over the given tokens.
fn caps(tokens: &[&str]) -> CapabilitySet {
    tokens.iter().copied().collect()
}

// ============================================================================
// SECTION: Route Table
// ============================================================================

/// Declares and validates the application route table.
///
/// # Errors
///
/// Returns [`RouteTableError`] when the declarations are ambiguous; the
/// shipped tree is expected to validate.
pub fn application_routes() -> Result<RouteTable, RouteTableError> {
    let roots = vec![
        RouteNode::new(Segment::Empty)
            .with_view(ViewId::new("home"))
            .with_title(TitleKey::new("title.home")),
        RouteNode::new(Segment::literal("login"))
            .with_view(ViewId::new("login"))
            .with_title(TitleKey::new("title.login")),
        RouteNode::new(Segment::literal("404"))
            .with_view(ViewId::new("not-found"))
            .with_title(TitleKey::new("title.notfound")),
        RouteNode::new(Segment::literal("accessdenied"))
            .with_view(ViewId::new("access-denied"))
            .with_title(TitleKey::new("title.accessdenied")),
        RouteNode::new(Segment::literal("error"))
            .with_view(ViewId::new("generic-error"))
            .with_title(TitleKey::new("title.error")),
        RouteNode::new(Segment::literal("team"))
            .with_required(caps(&[CAP_USER]))
            .with_module(ModuleId::new("team")),
        RouteNode::new(Segment::literal("employee"))
            .with_required(caps(&[CAP_USER]))
            .with_module(ModuleId::new("employee")),
        RouteNode::new(Segment::literal("task"))
            .with_required(caps(&[CAP_USER]))
            .with_module(ModuleId::new("task")),
        RouteNode::new(Segment::literal("training"))
            .with_required(caps(&[CAP_USER]))
            .with_module(ModuleId::new("training")),
        RouteNode::new(Segment::literal("admin"))
            .with_required(caps(&[CAP_ADMIN]))
            .with_module(ModuleId::new("admin")),
        RouteNode::new(Segment::Empty)
            .with_outlet(OutletName::new("sidenav"))
            .with_view(ViewId::new("sidenav")),
    ];
    RouteTable::new(roots)
}
