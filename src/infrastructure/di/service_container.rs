//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::path::Path;
use std::sync::Arc;

use crate::application::services::RegionService;
use crate::config::Settings;
use crate::domain::RegionTree;
use crate::infrastructure::traits::{FileSystem, RealFileSystem};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    /// Region registry service
    pub region_service: RegionService,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(settings, Arc::new(RealFileSystem))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(settings: Settings, fs: Arc<dyn FileSystem>) -> Self {
        let settings = Arc::new(settings);
        let region_service = RegionService::new(Arc::clone(&fs));

        Self {
            settings,
            fs,
            region_service,
        }
    }

    /// Empty tree whose root carries the configured label.
    pub fn new_tree(&self) -> RegionTree {
        RegionTree::with_root_label(self.settings.root_label.clone())
    }

    /// Configured snapshot target, if any.
    pub fn snapshot_path(&self) -> Option<&Path> {
        self.settings.snapshot_path.as_deref()
    }
}
