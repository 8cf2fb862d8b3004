//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::{InventoryService, PlanningService};
use crate::config::Settings;
use crate::infrastructure::traits::{
    FileSystem, InventoryStore, JsonInventoryStore, RealFileSystem,
};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    /// Inventory persistence
    pub store: Arc<dyn InventoryStore>,

    pub inventory: InventoryService,
    pub planning: PlanningService,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);
        let store: Arc<dyn InventoryStore> = Arc::new(JsonInventoryStore::new(
            fs.clone(),
            settings.inventory_path.clone(),
        ));
        Self::with_deps(settings, fs, store)
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        fs: Arc<dyn FileSystem>,
        store: Arc<dyn InventoryStore>,
    ) -> Self {
        let settings = Arc::new(settings);
        let inventory = InventoryService::new(store.clone());
        let planning = PlanningService::new(settings.seed);

        Self {
            settings,
            fs,
            store,
            inventory,
            planning,
        }
    }
}
