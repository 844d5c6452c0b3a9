use async_trait::async_trait;

use crate::core::{Bike, Collection, StorageError};

pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Whole-collection storage backend for bikes.
///
/// Every call is a complete open/read-or-write/close cycle; implementations
/// hold no handle across calls and apply no locking between a load and a
/// later overwrite.
#[async_trait]
pub trait BikeStore: Send + Sync {
    /// Append a bike, creating an empty backing collection first if none exists.
    async fn append(&self, bike: Bike) -> StorageResult<()>;

    /// Load the full collection in stored order.
    ///
    /// `Ok(None)` means the backing file exists but holds no collection
    /// (a JSON `null`), which is distinct from an empty array.
    async fn load_all(&self) -> StorageResult<Option<Collection>>;

    /// Replace the stored collection. Fails if the backing store was never created.
    async fn overwrite(&self, collection: Collection) -> StorageResult<()>;
}
