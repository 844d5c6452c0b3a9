use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::engine::{BikeStore, StorageResult};
use crate::core::{Bike, Collection, StorageError};

const MEMORY_PATH: &str = ":memory:";

#[derive(Debug, Clone)]
enum Contents {
    /// Nothing was ever created; mirrors a missing file.
    Missing,
    /// Created but holding no collection; mirrors a file containing `null`.
    Absent,
    Present(Collection),
}

/// In-process [`BikeStore`] with the same observable contract as the file store.
///
/// Writes can be switched to fail, which lets callers exercise the
/// write-fault paths without touching a filesystem.
#[derive(Debug)]
pub struct InMemoryBikeStore {
    contents: RwLock<Contents>,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

impl InMemoryBikeStore {
    /// A store with no backing collection yet.
    pub fn new() -> Self {
        Self::from_contents(Contents::Missing)
    }

    /// A store whose backing collection exists but is `null`.
    pub fn absent() -> Self {
        Self::from_contents(Contents::Absent)
    }

    pub fn with_bikes(bikes: Vec<Bike>) -> Self {
        Self::from_contents(Contents::Present(Collection::new(bikes)))
    }

    fn from_contents(contents: Contents) -> Self {
        Self {
            contents: RwLock::new(contents),
            fail_writes: AtomicBool::new(false),
            writes: AtomicUsize::new(0),
        }
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of successful writes (appends and overwrites).
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Current stored collection, `None` when missing or absent.
    pub async fn snapshot(&self) -> Option<Collection> {
        match &*self.contents.read().await {
            Contents::Present(collection) => Some(collection.clone()),
            Contents::Missing | Contents::Absent => None,
        }
    }

    fn check_writable(&self) -> StorageResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable(
                "in-memory store rejects writes".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for InMemoryBikeStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BikeStore for InMemoryBikeStore {
    async fn append(&self, bike: Bike) -> StorageResult<()> {
        self.check_writable()?;
        let mut contents = self.contents.write().await;
        let mut collection = match std::mem::replace(&mut *contents, Contents::Absent) {
            Contents::Present(collection) => collection,
            Contents::Missing | Contents::Absent => Collection::default(),
        };
        collection.push(bike);
        *contents = Contents::Present(collection);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn load_all(&self) -> StorageResult<Option<Collection>> {
        match &*self.contents.read().await {
            Contents::Missing => Err(StorageError::MissingFile(PathBuf::from(MEMORY_PATH))),
            Contents::Absent => Ok(None),
            Contents::Present(collection) => Ok(Some(collection.clone())),
        }
    }

    async fn overwrite(&self, collection: Collection) -> StorageResult<()> {
        let mut contents = self.contents.write().await;
        if matches!(*contents, Contents::Missing) {
            return Err(StorageError::MissingFile(PathBuf::from(MEMORY_PATH)));
        }
        self.check_writable()?;
        *contents = Contents::Present(collection);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
