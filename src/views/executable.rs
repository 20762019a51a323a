//! # View Executables
//!
//! A [`ViewExecutable`] is the runnable form of a stored view. It may hold
//! heavy per-request state, so it is always torn down through
//! [`ExecutableGuard`] once the caller is done with it.

use std::collections::BTreeMap;
use std::ops::{Deref, DerefMut};

use super::config::{DisplayConfig, ViewConfig};
use super::display::{DisplayPlugin, PathDisplay, PlainDisplay};
use super::errors::{ViewError, ViewResult};

/// Runnable view
pub trait ViewExecutable {
    /// Id of the stored view this executable was built from
    fn view_id(&self) -> &str;

    /// Activate `display_id`; false if the view has no such display
    fn set_display(&mut self, display_id: &str) -> bool;

    /// Currently active display, if any
    fn current_display(&self) -> Option<&str>;

    /// Handler of `display_id`, if the view has one
    fn display_handler(&mut self, display_id: &str) -> Option<&mut dyn DisplayPlugin>;

    /// Release per-request state; the executable is unusable afterwards
    fn destroy(&mut self);
}

/// Builds executables from stored views
pub trait ExecutableFactory: Send + Sync {
    fn executable(&self, view: &ViewConfig) -> ViewResult<Box<dyn ViewExecutable>>;
}

/// Owns an executable and destroys it when dropped
pub struct ExecutableGuard {
    inner: Box<dyn ViewExecutable>,
}

impl ExecutableGuard {
    pub fn new(inner: Box<dyn ViewExecutable>) -> Self {
        Self { inner }
    }
}

impl Deref for ExecutableGuard {
    type Target = dyn ViewExecutable;

    fn deref(&self) -> &Self::Target {
        &*self.inner
    }
}

impl DerefMut for ExecutableGuard {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.inner
    }
}

impl Drop for ExecutableGuard {
    fn drop(&mut self) {
        self.inner.destroy();
    }
}

/// Executable built from a [`ViewConfig`]
pub struct ConfiguredView {
    view_id: String,
    handlers: BTreeMap<String, Box<dyn DisplayPlugin>>,
    current: Option<String>,
    destroyed: bool,
}

impl ViewExecutable for ConfiguredView {
    fn view_id(&self) -> &str {
        &self.view_id
    }

    fn set_display(&mut self, display_id: &str) -> bool {
        if self.destroyed || !self.handlers.contains_key(display_id) {
            return false;
        }
        self.current = Some(display_id.to_string());
        true
    }

    fn current_display(&self) -> Option<&str> {
        self.current.as_deref()
    }

    fn display_handler(&mut self, display_id: &str) -> Option<&mut dyn DisplayPlugin> {
        let handler: &mut dyn DisplayPlugin = &mut **self.handlers.get_mut(display_id)?;
        Some(handler)
    }

    fn destroy(&mut self) {
        self.handlers.clear();
        self.current = None;
        self.destroyed = true;
    }
}

/// Factory mapping display plugin ids to handlers
///
/// `page` and `feed` displays are served at a path; `default`, `block`,
/// `attachment` and `embed` are not. Any other plugin id fails the build.
#[derive(Debug, Clone, Default)]
pub struct ConfiguredViewFactory;

impl ConfiguredViewFactory {
    pub fn new() -> Self {
        Self
    }

    fn handler(
        view_id: &str,
        display_id: &str,
        config: &DisplayConfig,
    ) -> ViewResult<Box<dyn DisplayPlugin>> {
        match config.display_plugin.as_str() {
            "page" | "feed" => Ok(Box::new(PathDisplay::new(view_id, display_id, config))),
            "default" | "block" | "attachment" | "embed" => {
                Ok(Box::new(PlainDisplay::new(display_id, config)))
            }
            other => Err(ViewError::UnknownPlugin {
                view_id: view_id.to_string(),
                display_id: display_id.to_string(),
                plugin: other.to_string(),
            }),
        }
    }
}

impl ExecutableFactory for ConfiguredViewFactory {
    fn executable(&self, view: &ViewConfig) -> ViewResult<Box<dyn ViewExecutable>> {
        if view.id.is_empty() || view.id.contains('.') {
            return Err(ViewError::InvalidDefinition(format!(
                "view id '{}' must be non-empty and contain no '.'",
                view.id
            )));
        }

        let mut handlers = BTreeMap::new();
        for (display_id, config) in &view.displays {
            handlers.insert(display_id.clone(), Self::handler(&view.id, display_id, config)?);
        }

        Ok(Box::new(ConfiguredView {
            view_id: view.id.clone(),
            handlers,
            current: None,
            destroyed: false,
        }))
    }
}
