// ============================================================================
// Bike Store Library
// ============================================================================

pub mod config;
pub mod core;
pub mod manager;
pub mod state;
pub mod storage;
pub mod web;

pub use crate::core::{Bike, BikeType, Collection, ManagerError, Result, StorageError, UpsertBike};
pub use manager::BikeManager;
pub use state::AppState;
pub use storage::{BikeStore, InMemoryBikeStore, JsonFileStore};
pub use web::build_router;
