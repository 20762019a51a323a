//! Route Rebuild Tests
//!
//! End-to-end behaviour of a route rebuild:
//! - Candidate index is computed once per cycle and reset at its end
//! - A claimed pair leaves the candidate set for later alteration passes
//! - Collected names take precedence over alteration claims
//! - Missing views are skipped without failing the rebuild
//! - The final name index is persisted under the well-known state key
//! - A failed rebuild leaves no stale candidates or names behind

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use serde_json::json;
use viewroutes::config::{RoutingConfig, VIEW_ROUTE_NAMES_KEY};
use viewroutes::events::EventDispatcher;
use viewroutes::routing::{
    Route, RouteBuilder, RouteCollection, RouteSource, RouteSubscriber, RoutingError,
    RoutingResult, StaticRouteSource, ViewDisplayPair,
};
use viewroutes::state::{MemoryStateStore, StateStore};
use viewroutes::views::{
    ApplicableViews, ConfiguredViewFactory, DisplayConfig, MemoryViewStorage, ViewConfig,
    ViewExecutable, ViewLister,
};

// =============================================================================
// Helper Functions
// =============================================================================

/// Lister counting how often the candidate set is queried
struct CountingLister {
    inner: ApplicableViews,
    calls: AtomicUsize,
}

impl CountingLister {
    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ViewLister for CountingLister {
    fn route_producing_views(&self) -> Vec<(Box<dyn ViewExecutable>, String)> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.route_producing_views()
    }
}

/// Route source that fails while `fail` is set
struct FlakySource {
    fail: Arc<AtomicBool>,
}

impl RouteSource for FlakySource {
    fn provider(&self) -> &str {
        "flaky"
    }

    fn routes(&self) -> RoutingResult<RouteCollection> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(RoutingError::Source {
                provider: "flaky".into(),
                message: "backend unavailable".into(),
            });
        }
        let mut routes = RouteCollection::new();
        routes.add("flaky.status", Route::new("/flaky/status"));
        Ok(routes)
    }
}

struct Fixture {
    storage: Arc<MemoryViewStorage>,
    lister: Arc<CountingLister>,
    state: Arc<MemoryStateStore>,
}

impl Fixture {
    fn new(views: Vec<ViewConfig>) -> Self {
        let storage = Arc::new(MemoryViewStorage::with_views(views));
        let lister = Arc::new(CountingLister {
            inner: ApplicableViews::new(storage.clone(), Arc::new(ConfiguredViewFactory::new())),
            calls: AtomicUsize::new(0),
        });
        Self {
            storage,
            lister,
            state: Arc::new(MemoryStateStore::new()),
        }
    }

    fn subscriber(&self) -> RouteSubscriber {
        RouteSubscriber::new(
            self.lister.clone(),
            self.storage.clone(),
            Arc::new(ConfiguredViewFactory::new()),
            self.state.clone(),
            &RoutingConfig::default(),
        )
    }

    fn builder(&self, sources: Vec<StaticRouteSource>) -> RouteBuilder {
        let mut dispatcher = EventDispatcher::new();
        dispatcher.add_subscriber(Box::new(self.subscriber()));

        let mut builder = RouteBuilder::new(dispatcher);
        for source in sources {
            builder.add_source(Box::new(source));
        }
        builder
    }

    fn persisted(&self) -> Option<serde_json::Value> {
        self.state.get(VIEW_ROUTE_NAMES_KEY).unwrap()
    }
}

fn page_view(view_id: &str, display_id: &str, path: &str) -> ViewConfig {
    ViewConfig::new(view_id).with_display(display_id, DisplayConfig::page(path))
}

fn pair(view_id: &str, display_id: &str) -> ViewDisplayPair {
    ViewDisplayPair::new(view_id, display_id)
}

// =============================================================================
// Candidate Cache Tests
// =============================================================================

/// Collecting twice without reset reuses the cached candidates.
#[test]
fn test_collection_is_idempotent() {
    let fixture = Fixture::new(vec![page_view("a", "1", "a"), page_view("b", "1", "b")]);
    let mut subscriber = fixture.subscriber();

    let mut first = RouteCollection::new();
    subscriber.routes(&mut first).unwrap();
    let first_candidates = subscriber.candidates().clone();

    let mut second = RouteCollection::new();
    subscriber.routes(&mut second).unwrap();

    assert_eq!(subscriber.candidates(), &first_candidates);
    assert_eq!(first.names(), second.names());
    assert_eq!(fixture.lister.calls(), 1);
}

/// Reset forces the next access to query the lister again.
#[test]
fn test_reset_invalidates_cache() {
    let fixture = Fixture::new(vec![page_view("a", "1", "a")]);
    let mut subscriber = fixture.subscriber();

    subscriber.candidates();
    assert!(subscriber.has_cached_candidates());
    subscriber.reset();
    assert!(!subscriber.has_cached_candidates());

    fixture.storage.save(page_view("b", "1", "b"));
    let expected: BTreeSet<_> = [pair("a", "1"), pair("b", "1")].into_iter().collect();
    assert_eq!(subscriber.candidates(), &expected);
    assert_eq!(fixture.lister.calls(), 2);
}

// =============================================================================
// Alteration Tests
// =============================================================================

/// A pair claimed by one alteration pass is not offered to the next one.
#[test]
fn test_claim_removes_pair_from_candidates() {
    let fixture = Fixture::new(vec![
        page_view("a", "1", "admin/people"),
        page_view("b", "1", "admin/content"),
    ]);
    let mut subscriber = fixture.subscriber();

    let mut dynamic = RouteCollection::new();
    subscriber.routes(&mut dynamic).unwrap();

    let mut user_routes = RouteCollection::new();
    user_routes.add("user.admin_people", Route::new("/admin/people"));
    subscriber.alter_routes(&mut user_routes, "user").unwrap();

    let remaining: BTreeSet<_> = [pair("b", "1")].into_iter().collect();
    assert_eq!(subscriber.candidates(), &remaining);

    // "a" no longer takes over routes at its path
    let mut system_routes = RouteCollection::new();
    system_routes.add("system.admin_people", Route::new("/admin/people"));
    system_routes.add("system.admin_content", Route::new("/admin/content"));
    subscriber.alter_routes(&mut system_routes, "system").unwrap();

    let untouched = system_routes.get("system.admin_people").unwrap();
    assert!(untouched.default_str("view_id").is_none());
    let claimed = system_routes.get("system.admin_content").unwrap();
    assert_eq!(claimed.default_str("view_id"), Some("b"));
    assert!(subscriber.candidates().is_empty());
}

/// The name assigned during collection survives a later claim.
#[test]
fn test_collected_name_wins_over_claim() {
    let view = ViewConfig::new("a").with_display(
        "1",
        DisplayConfig::page("admin/people").with_route_name("route_x"),
    );
    let fixture = Fixture::new(vec![view]);
    let source =
        StaticRouteSource::new("user").with_route("route_y", Route::new("/admin/people"));

    let mut builder = fixture.builder(vec![source]);
    builder.rebuild().unwrap();

    assert_eq!(fixture.persisted(), Some(json!({"a.1": "route_x"})));
    // The provider route was still taken over by the view
    let altered = builder.routes().get("route_y").unwrap();
    assert_eq!(altered.default_str("view_id"), Some("a"));
}

/// Claims for pairs without a collected route are recorded.
#[test]
fn test_claim_recorded_without_collected_name() {
    let fixture = Fixture::new(vec![page_view("a", "1", "admin/people")]);
    let mut subscriber = fixture.subscriber();

    // Alteration without a preceding collection phase in this cycle
    let mut user_routes = RouteCollection::new();
    user_routes.add("user.admin_people", Route::new("/admin/people"));
    subscriber.alter_routes(&mut user_routes, "user").unwrap();
    subscriber.route_rebuild_finished().unwrap();

    assert_eq!(
        fixture.persisted(),
        Some(json!({"a.1": "user.admin_people"}))
    );
}

// =============================================================================
// Skip Tests
// =============================================================================

/// A candidate whose view disappeared is skipped, not fatal.
#[test]
fn test_missing_view_is_skipped() {
    let fixture = Fixture::new(vec![page_view("a", "1", "a"), page_view("z", "9", "z")]);
    let mut subscriber = fixture.subscriber();

    assert!(subscriber.candidates().contains(&pair("z", "9")));
    fixture.storage.delete("z");

    let mut collection = RouteCollection::new();
    subscriber.routes(&mut collection).unwrap();

    assert!(!subscriber.route_names().contains_key(&pair("z", "9")));
    assert!(subscriber.route_names().contains_key(&pair("a", "1")));
    assert_eq!(collection.names(), vec!["view.a.1"]);
}

/// Displays without a route capability contribute nothing.
#[test]
fn test_disabled_and_plain_displays_ignored() {
    let view = ViewConfig::new("a")
        .with_display("default", DisplayConfig::new("default"))
        .with_display("block_1", DisplayConfig::block())
        .with_display("page_1", DisplayConfig::page("a").disabled())
        .with_display("page_2", DisplayConfig::page("a/all"));
    let fixture = Fixture::new(vec![view, page_view("off", "1", "off").disabled()]);

    let mut builder = fixture.builder(Vec::new());
    let report = builder.rebuild().unwrap();

    assert_eq!(report.dynamic_routes, 1);
    assert_eq!(fixture.persisted(), Some(json!({"a.page_2": "view.a.page_2"})));
}

// =============================================================================
// Persistence Tests
// =============================================================================

/// Finalize persists the names and drops the candidate cache.
#[test]
fn test_finalize_persists_and_resets() {
    let view = ViewConfig::new("A")
        .with_display("1", DisplayConfig::page("a").with_route_name("r1"));
    let fixture = Fixture::new(vec![view]);
    let mut subscriber = fixture.subscriber();

    let mut collection = RouteCollection::new();
    subscriber.routes(&mut collection).unwrap();
    subscriber.route_rebuild_finished().unwrap();

    assert_eq!(fixture.persisted(), Some(json!({"A.1": "r1"})));
    assert!(!subscriber.has_cached_candidates());
}

/// A second rebuild replaces names left over from the first.
#[test]
fn test_rebuild_drops_stale_names() {
    let fixture = Fixture::new(vec![page_view("a", "1", "a"), page_view("b", "1", "b")]);
    let mut builder = fixture.builder(Vec::new());

    builder.rebuild().unwrap();
    assert_eq!(
        fixture.persisted(),
        Some(json!({"a.1": "view.a.1", "b.1": "view.b.1"}))
    );

    fixture.storage.delete("b");
    builder.rebuild().unwrap();
    assert_eq!(fixture.persisted(), Some(json!({"a.1": "view.a.1"})));
    assert_eq!(fixture.lister.calls(), 2);
}

/// Rebuild report covers every provider and the dynamic routes.
#[test]
fn test_rebuild_report() {
    let fixture = Fixture::new(vec![page_view("frontpage", "page_1", "node")]);
    let sources = vec![
        StaticRouteSource::new("node")
            .with_route("node.add", Route::new("/node/add"))
            .with_route("node.view", Route::new("/node/{node}")),
        StaticRouteSource::new("user").with_route("user.login", Route::new("/user/login")),
    ];

    let mut builder = fixture.builder(sources);
    let report = builder.rebuild().unwrap();

    let providers: Vec<_> = report
        .providers
        .iter()
        .map(|p| (p.provider.as_str(), p.routes))
        .collect();
    assert_eq!(providers, vec![("node", 2), ("user", 1)]);
    assert_eq!(report.dynamic_routes, 1);
    assert_eq!(report.total_routes, 4);
    assert!(report.finished_at >= report.started_at);
    assert!(builder.routes().contains("view.frontpage.page_1"));
}

// =============================================================================
// Failed Rebuild Tests
// =============================================================================

fn flaky_builder(fixture: &Fixture, fail: &Arc<AtomicBool>) -> RouteBuilder {
    let user = StaticRouteSource::new("user")
        .with_route("user.admin_people", Route::new("/admin/people"));
    let mut builder = fixture.builder(vec![user]);
    builder.add_source(Box::new(FlakySource { fail: fail.clone() }));
    builder
}

/// A rebuild failing after a claim does not starve the next rebuild.
#[test]
fn test_rebuild_after_failure_sees_all_candidates() {
    let fixture = Fixture::new(vec![page_view("a", "1", "admin/people")]);
    let fail = Arc::new(AtomicBool::new(true));
    let mut builder = flaky_builder(&fixture, &fail);

    assert!(builder.rebuild().is_err());
    assert!(builder.routes().is_empty());
    assert_eq!(fixture.persisted(), Some(json!({})));

    fail.store(false, Ordering::SeqCst);
    builder.rebuild().unwrap();

    assert_eq!(fixture.persisted(), Some(json!({"a.1": "view.a.1"})));
    assert_eq!(
        builder.routes().names(),
        vec!["user.admin_people", "flaky.status", "view.a.1"]
    );
    let altered = builder.routes().get("user.admin_people").unwrap();
    assert_eq!(altered.default_str("view_id"), Some("a"));
    assert_eq!(fixture.lister.calls(), 2);
}

/// A failed rebuild puts back the index of the last finished rebuild.
#[test]
fn test_failed_rebuild_restores_persisted_names() {
    let fixture = Fixture::new(vec![page_view("a", "1", "admin/people")]);
    let fail = Arc::new(AtomicBool::new(false));
    let mut builder = flaky_builder(&fixture, &fail);

    builder.rebuild().unwrap();
    let routes_before = builder.routes().names();

    fixture.storage.save(page_view("b", "1", "b"));
    fail.store(true, Ordering::SeqCst);
    assert!(builder.rebuild().is_err());

    assert_eq!(fixture.persisted(), Some(json!({"a.1": "view.a.1"})));
    assert_eq!(builder.routes().names(), routes_before);

    fail.store(false, Ordering::SeqCst);
    builder.rebuild().unwrap();
    assert_eq!(
        fixture.persisted(),
        Some(json!({"a.1": "view.a.1", "b.1": "view.b.1"}))
    );
    assert_eq!(fixture.lister.calls(), 3);
}
