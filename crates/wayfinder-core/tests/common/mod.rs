// crates/wayfinder-core/tests/common/mod.rs
// =============================================================================
// Module: Core Test Helpers
// Description: Shared collaborator fakes and route fixtures for core tests.
// Purpose: Reduce duplication across integration tests for wayfinder-core.
// =============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]
#![allow(clippy::expect_used, reason = "Fixtures fail fast on invalid declarations.")]

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::PoisonError;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use async_trait::async_trait;
use tokio::sync::Notify;
use wayfinder_core::CapabilitySet;
use wayfinder_core::CapabilitySource;
use wayfinder_core::DomainEntity;
use wayfinder_core::EntityId;
use wayfinder_core::EntityKind;
use wayfinder_core::EntityStore;
use wayfinder_core::FetchError;
use wayfinder_core::LoadError;
use wayfinder_core::LoadedModule;
use wayfinder_core::MessageArg;
use wayfinder_core::ModuleId;
use wayfinder_core::MutationError;
use wayfinder_core::OutletName;
use wayfinder_core::RelationshipLink;
use wayfinder_core::RelationshipOp;
use wayfinder_core::ResolverBinding;
use wayfinder_core::RouteNode;
use wayfinder_core::RouteTable;
use wayfinder_core::Segment;
use wayfinder_core::Task;
use wayfinder_core::Team;
use wayfinder_core::TitleKey;
use wayfinder_core::Translator;
use wayfinder_core::ViewId;
use wayfinder_core::ViewLoader;

/// Capability source with a fixed grant.
pub struct FixedCaps {
    /// Granted capabilities.
    pub granted: CapabilitySet,
    /// Whether a session is present.
    pub authenticated: bool,
}

impl FixedCaps {
    /// Returns an authenticated source granting the given tokens.
    pub fn granting(tokens: &[&str]) -> Self {
        Self {
            granted: tokens.iter().copied().collect(),
            authenticated: true,
        }
    }

    /// Returns a logged-out source with no grant.
    pub fn logged_out() -> Self {
        Self {
            granted: CapabilitySet::new(),
            authenticated: false,
        }
    }
}

impl CapabilitySource for FixedCaps {
    fn granted(&self) -> CapabilitySet {
        self.granted.clone()
    }

    fn authenticated(&self) -> bool {
        self.authenticated
    }
}

/// View loader over a fixed module map, counting underlying fetches.
pub struct RecordingLoader {
    /// Modules served by the loader.
    modules: BTreeMap<ModuleId, LoadedModule>,
    /// Modules that fail to load.
    failing: BTreeSet<ModuleId>,
    /// Number of underlying fetches observed.
    pub loads: Arc<AtomicUsize>,
}

impl RecordingLoader {
    /// Creates a loader over the given modules.
    pub fn new(modules: Vec<LoadedModule>) -> Self {
        Self {
            modules: modules.into_iter().map(|module| (module.module.clone(), module)).collect(),
            failing: BTreeSet::new(),
            loads: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Marks a module as failing to load.
    pub fn failing(mut self, module: &str) -> Self {
        self.failing.insert(ModuleId::new(module));
        self
    }
}

#[async_trait]
impl ViewLoader for RecordingLoader {
    async fn load(&self, module: &ModuleId) -> Result<Arc<LoadedModule>, LoadError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        if self.failing.contains(module) {
            return Err(LoadError::Unavailable {
                module: module.clone(),
                reason: "chunk fetch failed".to_string(),
            });
        }
        self.modules.get(module).map(|loaded| Arc::new(loaded.clone())).ok_or_else(|| {
            LoadError::Unavailable {
                module: module.clone(),
                reason: "unknown module".to_string(),
            }
        })
    }
}

/// Entity store over a fixed entity map with optional fault injection.
#[derive(Default)]
pub struct ScriptedStore {
    /// Entities keyed by kind and identifier.
    entities: Mutex<BTreeMap<(EntityKind, EntityId), DomainEntity>>,
    /// Gate awaited before any fetch completes, when set.
    fetch_gate: Option<Arc<Notify>>,
    /// Simulates a transport outage for fetches.
    transport_down: AtomicBool,
    /// Fails the next mutation, when set.
    fail_mutations: AtomicBool,
    /// Number of fetches issued.
    pub fetches: Arc<AtomicUsize>,
    /// Number of mutation calls issued.
    pub mutations: Arc<AtomicUsize>,
}

impl ScriptedStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an entity.
    pub fn insert(&self, entity: DomainEntity) {
        let key = (entity.kind(), entity.id().clone());
        self.entities.lock().unwrap_or_else(PoisonError::into_inner).insert(key, entity);
    }

    /// Gates every fetch on the given notifier.
    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.fetch_gate = Some(gate);
        self
    }

    /// Simulates a transport outage for fetches.
    pub fn set_transport_down(&self, down: bool) {
        self.transport_down.store(down, Ordering::SeqCst);
    }

    /// Fails every following mutation call.
    pub fn set_fail_mutations(&self, fail: bool) {
        self.fail_mutations.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl EntityStore for ScriptedStore {
    async fn fetch_by_id(
        &self,
        kind: EntityKind,
        id: &EntityId,
    ) -> Result<DomainEntity, FetchError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.fetch_gate {
            gate.notified().await;
        }
        if self.transport_down.load(Ordering::SeqCst) {
            return Err(FetchError::Transport("store unreachable".to_string()));
        }
        let entities = self.entities.lock().unwrap_or_else(PoisonError::into_inner);
        entities.get(&(kind, id.clone())).cloned().ok_or(FetchError::NotFound {
            kind,
            id: id.clone(),
        })
    }

    async fn mutate_relationship(
        &self,
        link: &RelationshipLink,
        op: RelationshipOp,
    ) -> Result<(), MutationError> {
        self.mutations.fetch_add(1, Ordering::SeqCst);
        if self.fail_mutations.load(Ordering::SeqCst) {
            return Err(MutationError::Transport("mutation rejected".to_string()));
        }
        let _ = (link, op);
        Ok(())
    }
}

/// Deterministic translator rendering `T:{key}`, with an optional gated key.
#[derive(Default)]
pub struct TestTranslator {
    /// Key whose lookups await the gate.
    gated_key: Option<String>,
    /// Gate awaited for the gated key.
    gate: Option<Arc<Notify>>,
}

impl TestTranslator {
    /// Creates an ungated translator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gates lookups of one key on the given notifier.
    pub fn gated(key: &str, gate: Arc<Notify>) -> Self {
        Self {
            gated_key: Some(key.to_string()),
            gate: Some(gate),
        }
    }
}

#[async_trait]
impl Translator for TestTranslator {
    async fn lookup(&self, key: &str, args: &[MessageArg]) -> String {
        if let (Some(gated), Some(gate)) = (&self.gated_key, &self.gate)
            && gated == key
        {
            gate.notified().await;
        }
        let mut rendered = format!("T:{key}");
        for arg in args {
            rendered.push_str(&format!(" {}={}", arg.name, arg.value));
        }
        rendered
    }
}

/// Returns the shared test route table.
///
/// Layout: public fallback pages, a guarded `admin` leaf, a guarded `team`
/// area with literal-before-dynamic children, a lazily loaded `task` area,
/// an untitled `misc` leaf, and a persistent `sidenav` outlet.
pub fn test_table() -> RouteTable {
    let team = RouteNode::new(Segment::literal("team"))
        .with_required(["USER"].iter().copied().collect())
        .with_view(ViewId::new("team-list"))
        .with_title(TitleKey::new("title.teams"))
        .with_child(
            RouteNode::new(Segment::literal("new"))
                .with_view(ViewId::new("team-edit"))
                .with_title(TitleKey::new("title.team.new")),
        )
        .with_child(
            RouteNode::new(Segment::param("id"))
                .with_child(
                    RouteNode::new(Segment::literal("view"))
                        .with_resolver(ResolverBinding::new("team", EntityKind::Team, "id"))
                        .with_view(ViewId::new("team-detail"))
                        .with_title(TitleKey::new("title.team.detail")),
                )
                .with_child(
                    RouteNode::new(Segment::literal("edit"))
                        .with_required(["MANAGER"].iter().copied().collect())
                        .with_resolver(ResolverBinding::new("team", EntityKind::Team, "id"))
                        .with_view(ViewId::new("team-edit"))
                        .with_title(TitleKey::new("title.team.edit")),
                ),
        );
    let roots = vec![
        RouteNode::new(Segment::Empty)
            .with_view(ViewId::new("home"))
            .with_title(TitleKey::new("title.home")),
        RouteNode::new(Segment::literal("login"))
            .with_view(ViewId::new("login"))
            .with_title(TitleKey::new("title.login")),
        RouteNode::new(Segment::literal("404"))
            .with_view(ViewId::new("notfound"))
            .with_title(TitleKey::new("title.notfound")),
        RouteNode::new(Segment::literal("accessdenied"))
            .with_view(ViewId::new("accessdenied"))
            .with_title(TitleKey::new("title.accessdenied")),
        RouteNode::new(Segment::literal("error"))
            .with_view(ViewId::new("error"))
            .with_title(TitleKey::new("title.error")),
        RouteNode::new(Segment::literal("admin"))
            .with_required(["ADMIN"].iter().copied().collect())
            .with_view(ViewId::new("admin"))
            .with_title(TitleKey::new("title.admin")),
        team,
        RouteNode::new(Segment::literal("task"))
            .with_required(["USER"].iter().copied().collect())
            .with_module(ModuleId::new("task")),
        RouteNode::new(Segment::literal("misc")).with_view(ViewId::new("misc")),
        RouteNode::new(Segment::Empty)
            .with_outlet(OutletName::new("sidenav"))
            .with_view(ViewId::new("sidenav")),
    ];
    RouteTable::new(roots).expect("test table is valid")
}

/// Returns the lazily loaded `task` module.
pub fn task_module() -> LoadedModule {
    LoadedModule {
        module: ModuleId::new("task"),
        view: None,
        routes: vec![
            RouteNode::new(Segment::Empty)
                .with_view(ViewId::new("task-list"))
                .with_title(TitleKey::new("title.tasks")),
            RouteNode::new(Segment::literal("new"))
                .with_view(ViewId::new("task-edit"))
                .with_title(TitleKey::new("title.task.new")),
            RouteNode::new(Segment::param("id")).with_child(
                RouteNode::new(Segment::literal("view"))
                    .with_resolver(ResolverBinding::new("task", EntityKind::Task, "id"))
                    .with_view(ViewId::new("task-view"))
                    .with_title(TitleKey::new("title.task.view")),
            ),
        ],
    }
}

/// Returns a team record for fixtures.
pub fn team_entity(id: &str, name: &str) -> DomainEntity {
    DomainEntity::Team(Team {
        id: EntityId::new(id),
        name: name.to_string(),
        employee_ids: Vec::new(),
    })
}

/// Returns a task record for fixtures.
pub fn task_entity(id: &str, subject: &str) -> DomainEntity {
    DomainEntity::Task(Task {
        id: EntityId::new(id),
        subject: subject.to_string(),
        assignee_id: None,
    })
}
