//! Core services

pub mod authorization;
pub mod directory;
pub mod rest;
pub mod selection;
pub mod storage;

pub use authorization::*;
pub use directory::{DirectoryApi, DirectoryError};
pub use rest::RestDirectoryClient;
pub use selection::{
    OrganizationStore, Selectable, SelectionScope, SelectionState, SelectionStatus,
    SelectionStore, TeamStore,
};
pub use storage::{
    JsonFileStorage, MemoryStorage, SelectionStorage, CURRENT_ORGANIZATION_KEY, CURRENT_TEAM_KEY,
};
