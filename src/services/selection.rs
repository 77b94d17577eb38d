//! Organization/team selection state
//!
//! One generic store, instantiated twice: the organization store lists the
//! organizations visible to the session and tracks which one is current;
//! the team store does the same for the current organization's teams. The
//! current id of each scope is mirrored to durable storage so the next
//! session restores where the user left off.
//!
//! Each store is a small state machine:
//!
//! ```text
//! Idle ──load──► Loading ──ok──► Ready
//!   ▲               │
//!   │               └──err──► Errored ──refresh──► Loading
//! ```
//!
//! A trigger while a fetch is in flight is dropped, not queued, so rapid
//! repeated refreshes cost one network call. An upstream change (the team
//! store following the organization store) supersedes an in-flight fetch
//! instead: the store bumps its generation and the stale result is
//! discarded when it lands.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error};

use crate::models::{Organization, Team};
use crate::services::directory::{DirectoryApi, DirectoryError};
use crate::services::storage::{
    SelectionStorage, CURRENT_ORGANIZATION_KEY, CURRENT_TEAM_KEY,
};

/// An entity a selection store can track
pub trait Selectable: Clone + Send + Sync + 'static {
    fn id(&self) -> i64;
}

impl Selectable for Organization {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Selectable for Team {
    fn id(&self) -> i64 {
        self.id
    }
}

/// Lifecycle of one selection store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionStatus {
    /// Never fetched
    Idle,
    /// Fetch in flight
    Loading,
    /// Items populated, current resolved
    Ready,
    /// Fetch failed; `error` carries the user-facing message
    Errored,
}

/// Snapshot of a store's state
///
/// Safe to read at any time: before the first load `items` is empty and
/// `current_id` is none.
#[derive(Debug, Clone)]
pub struct SelectionState<T> {
    pub status: SelectionStatus,
    /// Entities in backend order
    pub items: Vec<T>,
    pub current_id: Option<i64>,
    /// Fixed user-facing message while `Errored`
    pub error: Option<String>,
}

impl<T: Selectable> SelectionState<T> {
    fn new() -> Self {
        Self {
            status: SelectionStatus::Idle,
            items: Vec::new(),
            current_id: None,
            error: None,
        }
    }

    /// The currently selected entity, if any
    pub fn current(&self) -> Option<&T> {
        self.current_id
            .and_then(|id| self.items.iter().find(|item| item.id() == id))
    }
}

/// Which of the two selection instances a store is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionScope {
    Organization,
    Team,
}

impl SelectionScope {
    /// Durable storage key for this scope's current id
    pub fn storage_key(&self) -> &'static str {
        match self {
            SelectionScope::Organization => CURRENT_ORGANIZATION_KEY,
            SelectionScope::Team => CURRENT_TEAM_KEY,
        }
    }

    /// Fixed message shown when loading this scope fails
    pub fn load_error_message(&self) -> &'static str {
        match self {
            SelectionScope::Organization => {
                "Failed to load organizations. Please try again later."
            }
            SelectionScope::Team => "Failed to load teams. Please try again later.",
        }
    }

    /// Whether this scope's list is keyed by an upstream selection
    fn requires_parent(&self) -> bool {
        matches!(self, SelectionScope::Team)
    }
}

/// Where a store's entity list comes from
#[async_trait]
pub trait SelectionSource: Send + Sync + 'static {
    type Item: Selectable;

    /// Fetch the list, scoped to `parent_id` where the scope requires one
    async fn fetch(&self, parent_id: Option<i64>) -> Result<Vec<Self::Item>, DirectoryError>;
}

/// Organization list from the directory service
pub struct OrganizationSource {
    api: Arc<dyn DirectoryApi>,
}

#[async_trait]
impl SelectionSource for OrganizationSource {
    type Item = Organization;

    async fn fetch(&self, _parent_id: Option<i64>) -> Result<Vec<Organization>, DirectoryError> {
        self.api.fetch_organizations().await
    }
}

/// Team list of one organization from the directory service
pub struct TeamSource {
    api: Arc<dyn DirectoryApi>,
}

#[async_trait]
impl SelectionSource for TeamSource {
    type Item = Team;

    async fn fetch(&self, parent_id: Option<i64>) -> Result<Vec<Team>, DirectoryError> {
        match parent_id {
            Some(organization_id) => self.api.fetch_organization_teams(organization_id).await,
            None => Ok(Vec::new()),
        }
    }
}

struct Inner<T> {
    state: SelectionState<T>,
    /// Upstream id this store's list is scoped to (team store only)
    parent_id: Option<i64>,
    /// Bumped on every accepted load and every upstream change; a fetch
    /// result is applied only if the generation it started under is still
    /// current
    generation: u64,
}

/// Selection state holder for one scope
pub struct SelectionStore<S: SelectionSource> {
    scope: SelectionScope,
    source: S,
    storage: Arc<dyn SelectionStorage>,
    inner: Mutex<Inner<S::Item>>,
    current_tx: watch::Sender<Option<i64>>,
}

pub type OrganizationStore = SelectionStore<OrganizationSource>;
pub type TeamStore = SelectionStore<TeamSource>;

impl SelectionStore<OrganizationSource> {
    /// Create the organization-scope store
    pub fn organizations(
        api: Arc<dyn DirectoryApi>,
        storage: Arc<dyn SelectionStorage>,
    ) -> Self {
        Self::new(
            SelectionScope::Organization,
            OrganizationSource { api },
            storage,
        )
    }
}

impl SelectionStore<TeamSource> {
    /// Create the team-scope store. Call [`SelectionStore::follow`] with
    /// the organization store's receiver to wire the dependency.
    pub fn teams(api: Arc<dyn DirectoryApi>, storage: Arc<dyn SelectionStorage>) -> Self {
        Self::new(SelectionScope::Team, TeamSource { api }, storage)
    }
}

impl<S: SelectionSource> SelectionStore<S> {
    pub fn new(scope: SelectionScope, source: S, storage: Arc<dyn SelectionStorage>) -> Self {
        let (current_tx, _) = watch::channel(None);
        Self {
            scope,
            source,
            storage,
            inner: Mutex::new(Inner {
                state: SelectionState::new(),
                parent_id: None,
                generation: 0,
            }),
            current_tx,
        }
    }

    /// Fetch the entity list and resolve the current selection.
    ///
    /// A no-op while a fetch for this store is already in flight. On
    /// success the persisted id is preferred if still present, otherwise
    /// the first item is selected and persisted, otherwise the selection
    /// and the persisted key are cleared. On failure the store enters
    /// `Errored` with a fixed message; the persisted key is left alone so
    /// a later successful load can still restore it.
    pub async fn load(&self) {
        let (generation, parent_id) = {
            let mut inner = self.inner.lock().unwrap();
            if inner.state.status == SelectionStatus::Loading {
                debug!(scope = ?self.scope, "Fetch already in flight, dropping trigger");
                return;
            }
            if self.scope.requires_parent() && inner.parent_id.is_none() {
                // No upstream selection: settle on empty without a network
                // call. Storage is untouched here; an actual upstream
                // transition to none clears it in set_parent.
                inner.generation = inner.generation.wrapping_add(1);
                inner.state.status = SelectionStatus::Ready;
                inner.state.items = Vec::new();
                inner.state.current_id = None;
                inner.state.error = None;
                self.publish(None);
                return;
            }
            inner.generation = inner.generation.wrapping_add(1);
            inner.state.status = SelectionStatus::Loading;
            inner.state.error = None;
            (inner.generation, inner.parent_id)
        };

        let result = self.source.fetch(parent_id).await;

        let mut inner = self.inner.lock().unwrap();
        if inner.generation != generation {
            debug!(scope = ?self.scope, "Discarding superseded fetch result");
            return;
        }

        match result {
            Ok(items) => {
                let current_id = self.resolve_selection(&items);
                debug!(
                    scope = ?self.scope,
                    count = items.len(),
                    current = ?current_id,
                    "Entity list loaded"
                );
                inner.state.status = SelectionStatus::Ready;
                inner.state.items = items;
                inner.state.current_id = current_id;
                inner.state.error = None;
                self.publish(current_id);
            }
            Err(err) => {
                error!(scope = ?self.scope, %err, "Failed to load entity list");
                inner.state.status = SelectionStatus::Errored;
                inner.state.items = Vec::new();
                inner.state.current_id = None;
                inner.state.error = Some(self.scope.load_error_message().to_string());
                self.publish(None);
            }
        }
    }

    /// Re-run the fetch; identical to [`load`](Self::load). `Errored` is
    /// left only through here.
    pub async fn refresh(&self) {
        self.load().await;
    }

    /// Explicitly select an entity, or clear the selection.
    ///
    /// `None` always succeeds: the selection and the persisted key are
    /// cleared. An id not present in the current items is silently ignored
    /// (the list may have changed under the caller).
    pub fn set_current(&self, id: Option<i64>) {
        let key = self.scope.storage_key();
        let mut inner = self.inner.lock().unwrap();
        match id {
            None => {
                inner.state.current_id = None;
                self.storage.remove(key);
                self.publish(None);
            }
            Some(id) => {
                if inner.state.items.iter().any(|item| item.id() == id) {
                    inner.state.current_id = Some(id);
                    self.storage.set(key, &id.to_string());
                    self.publish(Some(id));
                } else {
                    debug!(scope = ?self.scope, id, "Ignoring selection of unknown id");
                }
            }
        }
    }

    /// Apply an upstream selection change (the team store's organization).
    ///
    /// A change away from a previous upstream id discards the items, the
    /// selection, and the persisted key before refetching, so a selection
    /// scoped to the old upstream can never survive into the new one,
    /// even when the new list happens to contain the same id. The first
    /// observation at bind time is not a transition and leaves the
    /// persisted key intact for session restore.
    pub async fn set_parent(&self, parent_id: Option<i64>) {
        {
            let mut inner = self.inner.lock().unwrap();
            let previous = inner.parent_id;
            if previous == parent_id && inner.state.status != SelectionStatus::Idle {
                return;
            }
            inner.parent_id = parent_id;
            // Supersede any in-flight fetch for the old upstream
            inner.generation = inner.generation.wrapping_add(1);
            inner.state.status = SelectionStatus::Idle;
            if previous.is_some() {
                inner.state.items = Vec::new();
                inner.state.current_id = None;
                inner.state.error = None;
                self.storage.remove(self.scope.storage_key());
                self.publish(None);
            }
        }
        self.load().await;
    }

    /// Follow another store's current id; returns the watcher task handle.
    ///
    /// The value present at bind time is applied first, then every change.
    /// Abort the handle to tear the subscription down.
    pub fn follow(
        self: &Arc<Self>,
        mut parent_rx: watch::Receiver<Option<i64>>,
    ) -> JoinHandle<()> {
        let store = Arc::clone(self);
        tokio::spawn(async move {
            let initial = *parent_rx.borrow_and_update();
            store.set_parent(initial).await;
            while parent_rx.changed().await.is_ok() {
                let next = *parent_rx.borrow_and_update();
                store.set_parent(next).await;
            }
        })
    }

    /// Subscribe to current-id changes (used by downstream stores and UI)
    pub fn subscribe(&self) -> watch::Receiver<Option<i64>> {
        self.current_tx.subscribe()
    }

    /// Snapshot of the full state
    pub fn state(&self) -> SelectionState<S::Item> {
        self.inner.lock().unwrap().state.clone()
    }

    /// Entities in backend order (empty until the first successful load)
    pub fn items(&self) -> Vec<S::Item> {
        self.inner.lock().unwrap().state.items.clone()
    }

    /// The currently selected entity, if any
    pub fn current(&self) -> Option<S::Item> {
        self.inner.lock().unwrap().state.current().cloned()
    }

    pub fn current_id(&self) -> Option<i64> {
        self.inner.lock().unwrap().state.current_id
    }

    pub fn status(&self) -> SelectionStatus {
        self.inner.lock().unwrap().state.status
    }

    pub fn is_loading(&self) -> bool {
        self.status() == SelectionStatus::Loading
    }

    pub fn error(&self) -> Option<String> {
        self.inner.lock().unwrap().state.error.clone()
    }

    /// Pick the selection for a freshly fetched list and mirror it to
    /// storage: persisted id if still present, else first item, else none.
    fn resolve_selection(&self, items: &[S::Item]) -> Option<i64> {
        let key = self.scope.storage_key();
        let persisted = self
            .storage
            .get(key)
            .and_then(|value| value.parse::<i64>().ok());

        let resolved = persisted
            .filter(|id| items.iter().any(|item| item.id() == *id))
            .or_else(|| items.first().map(Selectable::id));

        match resolved {
            Some(id) => self.storage.set(key, &id.to_string()),
            None => self.storage.remove(key),
        }
        resolved
    }

    fn publish(&self, current_id: Option<i64>) {
        self.current_tx.send_if_modified(|value| {
            if *value != current_id {
                *value = current_id;
                true
            } else {
                false
            }
        });
    }
}
