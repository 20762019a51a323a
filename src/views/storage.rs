//! # View Storage and Listing

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::{Arc, RwLock};

use super::config::ViewConfig;
use super::errors::{ViewError, ViewResult};
use super::executable::{ExecutableFactory, ExecutableGuard, ViewExecutable};

/// Loads stored view definitions
pub trait ViewStorage: Send + Sync {
    /// Load one view; `None` if no such view is stored
    fn load(&self, view_id: &str) -> Option<ViewConfig>;

    /// Load every stored view, ordered by id
    fn load_all(&self) -> Vec<ViewConfig>;
}

/// Lists the views that own a route
pub trait ViewLister: Send + Sync {
    /// Every enabled display that uses a route, with an executable of its view
    fn route_producing_views(&self) -> Vec<(Box<dyn ViewExecutable>, String)>;
}

/// In-memory view storage
#[derive(Debug, Default)]
pub struct MemoryViewStorage {
    views: RwLock<BTreeMap<String, ViewConfig>>,
}

impl MemoryViewStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a storage holding `views`
    pub fn with_views(views: impl IntoIterator<Item = ViewConfig>) -> Self {
        let storage = Self::new();
        for view in views {
            storage.save(view);
        }
        storage
    }

    /// Load a JSON array of view definitions
    pub fn from_file(path: impl AsRef<Path>) -> ViewResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ViewError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let views: Vec<ViewConfig> =
            serde_json::from_str(&content).map_err(|source| ViewError::Parse {
                path: path.display().to_string(),
                source,
            })?;
        Ok(Self::with_views(views))
    }

    /// Store a view, replacing one with the same id
    pub fn save(&self, view: ViewConfig) {
        if let Ok(mut views) = self.views.write() {
            views.insert(view.id.clone(), view);
        }
    }

    /// Remove a view
    pub fn delete(&self, view_id: &str) -> Option<ViewConfig> {
        self.views.write().ok()?.remove(view_id)
    }

    pub fn len(&self) -> usize {
        self.views.read().map(|v| v.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ViewStorage for MemoryViewStorage {
    fn load(&self, view_id: &str) -> Option<ViewConfig> {
        self.views.read().ok()?.get(view_id).cloned()
    }

    fn load_all(&self) -> Vec<ViewConfig> {
        self.views
            .read()
            .map(|v| v.values().cloned().collect())
            .unwrap_or_default()
    }
}

/// Lists route-producing displays of every enabled stored view
///
/// A view whose executable cannot be built is left out of the listing.
pub struct ApplicableViews {
    storage: Arc<dyn ViewStorage>,
    factory: Arc<dyn ExecutableFactory>,
}

impl ApplicableViews {
    pub fn new(storage: Arc<dyn ViewStorage>, factory: Arc<dyn ExecutableFactory>) -> Self {
        Self { storage, factory }
    }

    fn route_displays(&self, view: &ViewConfig) -> Vec<String> {
        let Ok(executable) = self.factory.executable(view) else {
            return Vec::new();
        };
        let mut executable = ExecutableGuard::new(executable);

        let displays: Vec<String> = view
            .displays
            .keys()
            .filter(|display_id| {
                executable
                    .display_handler(display_id)
                    .map(|handler| handler.is_enabled() && handler.uses_route())
                    .unwrap_or(false)
            })
            .cloned()
            .collect();
        displays
    }
}

impl ViewLister for ApplicableViews {
    fn route_producing_views(&self) -> Vec<(Box<dyn ViewExecutable>, String)> {
        let mut applicable = Vec::new();

        for view in self.storage.load_all().into_iter().filter(|v| v.status) {
            for display_id in self.route_displays(&view) {
                if let Ok(executable) = self.factory.executable(&view) {
                    applicable.push((executable, display_id));
                }
            }
        }

        applicable
    }
}
