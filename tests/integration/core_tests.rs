//! Application core wiring tests
//!
//! Exercise both selection stores through `AppCore`: session restore,
//! organization switching, failure recovery, and teardown.

use std::sync::Arc;
use std::time::Duration;

use orgboard::config::AppConfig;
use orgboard::services::{
    MemoryStorage, SelectionStatus, SelectionStorage, CURRENT_ORGANIZATION_KEY, CURRENT_TEAM_KEY,
};
use orgboard::AppCore;

use crate::common::{mocks::MockError, organization_with_id, team_with_id, MockDirectory};

/// Poll until `cond` holds; the team store applies organization changes
/// through its watcher task, so most assertions need a grace period.
async fn wait_until(cond: impl Fn() -> bool) {
    for _ in 0..400 {
        if cond() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("condition not met within timeout");
}

fn seeded_directory() -> Arc<MockDirectory> {
    let api = Arc::new(MockDirectory::new());
    api.set_organizations(vec![organization_with_id(1), organization_with_id(2)]);
    api.set_teams(1, vec![team_with_id(7, 1), team_with_id(8, 1)]);
    // Team id 7 exists under both organizations on purpose: a switch must
    // never carry the old selection over on an id collision.
    api.set_teams(2, vec![team_with_id(9, 2), team_with_id(7, 2)]);
    api
}

#[tokio::test]
async fn test_init_selects_first_organization_and_its_teams() {
    let api = seeded_directory();
    let storage = Arc::new(MemoryStorage::new());
    let core = AppCore::with_collaborators(AppConfig::default(), api, storage.clone())
        .await
        .unwrap();

    assert_eq!(core.organizations.current_id(), Some(1));
    assert_eq!(storage.get(CURRENT_ORGANIZATION_KEY), Some("1".to_string()));

    wait_until(|| core.teams.current_id() == Some(7)).await;
    assert_eq!(storage.get(CURRENT_TEAM_KEY), Some("7".to_string()));
    assert_eq!(core.teams.items().len(), 2);
}

#[tokio::test]
async fn test_previous_session_is_restored() {
    let api = seeded_directory();
    let storage = Arc::new(MemoryStorage::new());
    storage.set(CURRENT_ORGANIZATION_KEY, "2");
    storage.set(CURRENT_TEAM_KEY, "7");

    let core = AppCore::with_collaborators(AppConfig::default(), api, storage.clone())
        .await
        .unwrap();

    assert_eq!(core.organizations.current_id(), Some(2));
    // The persisted team belongs to organization 2's list and is honored
    wait_until(|| core.teams.current_id() == Some(7)).await;
    assert_eq!(
        core.teams.current().map(|t| t.organization_id),
        Some(2)
    );
}

#[tokio::test]
async fn test_switching_organization_discards_old_team_selection() {
    let api = seeded_directory();
    let storage = Arc::new(MemoryStorage::new());
    let core = AppCore::with_collaborators(AppConfig::default(), api, storage.clone())
        .await
        .unwrap();

    wait_until(|| core.teams.current_id() == Some(7)).await;

    core.organizations.set_current(Some(2));

    // Organization 2's list contains a team with id 7 as well; the store
    // must still fall back to the new list's first item.
    wait_until(|| core.teams.current_id() == Some(9)).await;
    assert_eq!(storage.get(CURRENT_TEAM_KEY), Some("9".to_string()));
    assert!(core
        .teams
        .items()
        .iter()
        .all(|t| t.organization_id == 2));
}

#[tokio::test]
async fn test_clearing_organization_empties_teams() {
    let api = seeded_directory();
    let storage = Arc::new(MemoryStorage::new());
    let core = AppCore::with_collaborators(AppConfig::default(), api, storage.clone())
        .await
        .unwrap();

    wait_until(|| core.teams.current_id().is_some()).await;

    core.organizations.set_current(None);

    wait_until(|| {
        core.teams.status() == SelectionStatus::Ready && core.teams.items().is_empty()
    })
    .await;
    assert_eq!(core.teams.current_id(), None);
    assert_eq!(storage.get(CURRENT_ORGANIZATION_KEY), None);
    assert_eq!(storage.get(CURRENT_TEAM_KEY), None);
}

#[tokio::test]
async fn test_organization_load_failure_and_recovery() {
    let api = seeded_directory();
    api.set_error_mode(MockError::ServerError);
    let storage = Arc::new(MemoryStorage::new());
    let core = AppCore::with_collaborators(AppConfig::default(), api.clone(), storage)
        .await
        .unwrap();

    let state = core.organizations.state();
    assert_eq!(state.status, SelectionStatus::Errored);
    assert!(state.items.is_empty());
    assert_eq!(
        state.error.as_deref(),
        Some("Failed to load organizations. Please try again later.")
    );

    // No organization means the team store settles empty without fetching
    wait_until(|| core.teams.status() == SelectionStatus::Ready).await;
    assert!(core.teams.items().is_empty());

    api.clear_error_mode();
    core.organizations.refresh().await;

    assert_eq!(core.organizations.current_id(), Some(1));
    assert!(core.organizations.error().is_none());
    assert_eq!(
        api.organization_calls.load(std::sync::atomic::Ordering::SeqCst),
        2
    );
    wait_until(|| core.teams.current_id() == Some(7)).await;
}

#[tokio::test]
async fn test_teardown_stops_following_organization_changes() {
    let api = seeded_directory();
    let storage = Arc::new(MemoryStorage::new());
    let core = AppCore::with_collaborators(AppConfig::default(), api.clone(), storage)
        .await
        .unwrap();

    wait_until(|| core.teams.current_id() == Some(7)).await;
    assert!(!core.teams.items().is_empty());

    core.teardown();
    let fetches_before = api.team_calls.load(std::sync::atomic::Ordering::SeqCst);

    core.organizations.set_current(Some(2));
    tokio::time::sleep(Duration::from_millis(50)).await;

    // The team store no longer reacts
    assert_eq!(
        api.team_calls.load(std::sync::atomic::Ordering::SeqCst),
        fetches_before
    );
    assert_eq!(core.teams.current_id(), Some(7));
}
