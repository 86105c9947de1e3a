// crates/wayfinder-shell/src/modules.rs
// ============================================================================
// Module: Application Module Registry
// Description: Static module registry backing the lazy view loader.
// Purpose: Materialize the nested route tables of the business areas.
// Dependencies: wayfinder-core
// ============================================================================

//! ## Overview
//! Each business area contributes a lazily materialized module: a default
//! list destination, a literal `new` destination, and dynamic identifier
//! destinations for detail and edit views. Literal segments are declared
//! before the dynamic sibling so `new` never collides with an identifier.
//! The registry is the application's concrete [`ViewLoader`]; the engine
//! caches what it materializes.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use wayfinder_core::CapabilitySet;
use wayfinder_core::EntityKind;
use wayfinder_core::LoadError;
use wayfinder_core::LoadedModule;
use wayfinder_core::ModuleId;
use wayfinder_core::ResolverBinding;
use wayfinder_core::RouteNode;
use wayfinder_core::Segment;
use wayfinder_core::TitleKey;
use wayfinder_core::ViewId;
use wayfinder_core::ViewLoader;

use crate::routes::CAP_MANAGER;

// ============================================================================
// SECTION: Module Construction
// ============================================================================

/// Returns the manager-only capability set.
fn manager_caps() -> CapabilitySet {
    [CAP_MANAGER].iter().copied().collect()
}

/// Builds one business-area module with list, new, detail, and edit routes.
fn area_module(
    module: &str,
    kind: EntityKind,
    binding: &str,
    view_prefix: &str,
    title_prefix: &str,
) -> LoadedModule {
    LoadedModule {
        module: ModuleId::new(module),
        view: None,
        routes: vec![
            RouteNode::new(Segment::Empty)
                .with_view(ViewId::new(format!("{view_prefix}-list")))
                .with_title(TitleKey::new(format!("{title_prefix}s"))),
            RouteNode::new(Segment::literal("new"))
                .with_required(manager_caps())
                .with_view(ViewId::new(format!("{view_prefix}-edit")))
                .with_title(TitleKey::new(format!("{title_prefix}.new"))),
            RouteNode::new(Segment::param("id"))
                .with_child(
                    RouteNode::new(Segment::literal("view"))
                        .with_resolver(ResolverBinding::new(binding, kind, "id"))
                        .with_view(ViewId::new(format!("{view_prefix}-detail")))
                        .with_title(TitleKey::new(format!("{title_prefix}.detail"))),
                )
                .with_child(
                    RouteNode::new(Segment::literal("edit"))
                        .with_required(manager_caps())
                        .with_resolver(ResolverBinding::new(binding, kind, "id"))
                        .with_view(ViewId::new(format!("{view_prefix}-edit")))
                        .with_title(TitleKey::new(format!("{title_prefix}.edit"))),
                ),
        ],
    }
}

/// Builds the task module, whose detail route keeps the historical
/// `task.view` title key.
fn task_module() -> LoadedModule {
    LoadedModule {
        module: ModuleId::new("task"),
        view: None,
        routes: vec![
            RouteNode::new(Segment::Empty)
                .with_view(ViewId::new("task-list"))
                .with_title(TitleKey::new("title.tasks")),
            RouteNode::new(Segment::literal("new"))
                .with_required(manager_caps())
                .with_view(ViewId::new("task-edit"))
                .with_title(TitleKey::new("title.task.new")),
            RouteNode::new(Segment::param("id"))
                .with_child(
                    RouteNode::new(Segment::literal("view"))
                        .with_resolver(ResolverBinding::new("task", EntityKind::Task, "id"))
                        .with_view(ViewId::new("task-view"))
                        .with_title(TitleKey::new("title.task.view")),
                )
                .with_child(
                    RouteNode::new(Segment::literal("edit"))
                        .with_required(manager_caps())
                        .with_resolver(ResolverBinding::new("task", EntityKind::Task, "id"))
                        .with_view(ViewId::new("task-edit"))
                        .with_title(TitleKey::new("title.task.edit")),
                ),
        ],
    }
}

/// Builds the administration module.
fn admin_module() -> LoadedModule {
    LoadedModule {
        module: ModuleId::new("admin"),
        view: None,
        routes: vec![
            RouteNode::new(Segment::Empty)
                .with_view(ViewId::new("admin-panel"))
                .with_title(TitleKey::new("title.admin")),
        ],
    }
}

// ============================================================================
// SECTION: Static Module Loader
// ============================================================================

/// Static module registry implementing the lazy view loader.
#[derive(Debug, Default)]
pub struct StaticModuleLoader {
    /// Modules keyed by identifier.
    modules: BTreeMap<ModuleId, LoadedModule>,
}

impl StaticModuleLoader {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            modules: BTreeMap::new(),
        }
    }

    /// Creates the registry with every application module registered.
    #[must_use]
    pub fn with_application_modules() -> Self {
        let mut loader = Self::new();
        loader.register(area_module("team", EntityKind::Team, "team", "team", "title.team"));
        loader.register(area_module(
            "employee",
            EntityKind::Employee,
            "employee",
            "employee",
            "title.employee",
        ));
        loader.register(task_module());
        loader.register(area_module(
            "training",
            EntityKind::Profession,
            "profession",
            "training",
            "title.training",
        ));
        loader.register(admin_module());
        loader
    }

    /// Registers a module.
    pub fn register(&mut self, module: LoadedModule) {
        self.modules.insert(module.module.clone(), module);
    }
}

#[async_trait]
impl ViewLoader for StaticModuleLoader {
    async fn load(&self, module: &ModuleId) -> Result<Arc<LoadedModule>, LoadError> {
        self.modules.get(module).map(|loaded| Arc::new(loaded.clone())).ok_or_else(|| {
            LoadError::Unavailable {
                module: module.clone(),
                reason: "unknown module".to_string(),
            }
        })
    }
}
