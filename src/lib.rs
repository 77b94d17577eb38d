//! Orgboard client core
//!
//! The in-process core of the Orgboard admin dashboard: authorization
//! rules (role → permission lookup with global system-role overrides) and
//! the organization/team selection state the rest of the UI hangs off.
//! The crate owns no HTTP surface of its own; it talks to the dashboard's
//! REST backend through the [`services::DirectoryApi`] collaborator and
//! mirrors the current selection to durable storage for the next session.

use std::sync::{Arc, Mutex};

use anyhow::Context;
use tokio::task::JoinHandle;
use tracing::info;

pub mod config;
pub mod models;
pub mod services;
pub mod utils;

pub use config::AppConfig;
pub use services::{
    DirectoryApi, JsonFileStorage, OrganizationStore, RestDirectoryClient, SelectionStorage,
    SelectionStore, TeamStore,
};
pub use utils::{CoreError, CoreResult};

/// The application core: both selection stores plus the wiring between
/// them, constructed once at startup and shared with the UI layer.
pub struct AppCore {
    /// Application configuration
    pub config: AppConfig,
    /// Organization selection state
    pub organizations: Arc<OrganizationStore>,
    /// Team selection state, following the current organization
    pub teams: Arc<TeamStore>,
    team_watcher: Mutex<Option<JoinHandle<()>>>,
}

impl AppCore {
    /// Build the core with the default collaborators: a REST client
    /// against the configured directory endpoint and JSON-file storage.
    ///
    /// The organization list is loaded before returning, so the restored
    /// selection is already resolved (or the store is `Errored`) when the
    /// UI first renders. The team store follows from there.
    pub async fn init(config: AppConfig) -> CoreResult<Self> {
        let api = Arc::new(
            RestDirectoryClient::new(&config.directory)
                .context("Failed to initialize directory client")?,
        );
        let storage = Arc::new(JsonFileStorage::open(config.storage.resolved_path()));
        Self::with_collaborators(config, api, storage).await
    }

    /// Build the core against explicit collaborators (tests, alternate
    /// transports).
    pub async fn with_collaborators(
        config: AppConfig,
        api: Arc<dyn DirectoryApi>,
        storage: Arc<dyn SelectionStorage>,
    ) -> CoreResult<Self> {
        let organizations = Arc::new(SelectionStore::organizations(api.clone(), storage.clone()));
        let teams = Arc::new(SelectionStore::teams(api, storage));

        let watcher = teams.follow(organizations.subscribe());

        info!("Loading organizations");
        organizations.load().await;

        Ok(Self {
            config,
            organizations,
            teams,
            team_watcher: Mutex::new(Some(watcher)),
        })
    }

    /// Stop the team store's subscription to the organization store.
    ///
    /// The stores themselves stay readable; only the dependency wiring is
    /// torn down. Idempotent.
    pub fn teardown(&self) {
        if let Some(watcher) = self.team_watcher.lock().unwrap().take() {
            watcher.abort();
            info!("Selection wiring torn down");
        }
    }
}

impl Drop for AppCore {
    fn drop(&mut self) {
        self.teardown();
    }
}
