pub mod engine;
pub mod memory;
pub mod persistence;

pub use engine::{BikeStore, StorageResult};
pub use memory::InMemoryBikeStore;
pub use persistence::JsonFileStore;
