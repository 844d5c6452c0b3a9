//! JSON file persistence for the bike collection

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use super::engine::{BikeStore, StorageResult};
use crate::core::{Bike, Collection, StorageError};

/// Stores the whole collection as one JSON array in a single file.
///
/// Writes go to a sibling `.tmp` file which is then renamed over the target,
/// so a reader never observes a half-written array.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn exists(&self) -> StorageResult<bool> {
        fs::try_exists(&self.path)
            .await
            .map_err(|err| StorageError::io(&self.path, err))
    }

    async fn ensure_exists(&self) -> StorageResult<()> {
        if self.exists().await? {
            Ok(())
        } else {
            Err(StorageError::MissingFile(self.path.clone()))
        }
    }

    async fn read_collection(&self) -> StorageResult<Option<Collection>> {
        let bytes = fs::read(&self.path)
            .await
            .map_err(|err| StorageError::io(&self.path, err))?;

        let collection = serde_json::from_slice::<Option<Collection>>(&bytes)
            .map_err(|err| StorageError::decode(&self.path, err))?;

        debug!(
            path = %self.path.display(),
            records = collection.as_ref().map(Collection::len),
            "loaded bike collection"
        );
        Ok(collection)
    }

    async fn write_collection(&self, collection: &Collection) -> StorageResult<()> {
        let json = serde_json::to_vec_pretty(collection)?;
        atomic_write(&self.path, &json).await?;

        debug!(
            path = %self.path.display(),
            records = collection.len(),
            "wrote bike collection"
        );
        Ok(())
    }
}

#[async_trait]
impl BikeStore for JsonFileStore {
    async fn append(&self, bike: Bike) -> StorageResult<()> {
        if !self.exists().await? {
            debug!(path = %self.path.display(), "creating empty bike collection file");
            self.write_collection(&Collection::default()).await?;
        }

        // A file holding `null` starts over from an empty array.
        let mut collection = self.read_collection().await?.unwrap_or_default();
        collection.push(bike);
        self.write_collection(&collection).await
    }

    async fn load_all(&self) -> StorageResult<Option<Collection>> {
        self.ensure_exists().await?;
        self.read_collection().await
    }

    async fn overwrite(&self, collection: Collection) -> StorageResult<()> {
        self.ensure_exists().await?;
        self.write_collection(&collection).await
    }
}

async fn atomic_write(path: &Path, bytes: &[u8]) -> StorageResult<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .await
            .map_err(|err| StorageError::io(parent, err))?;
    }

    let tmp = tmp_path(path);
    fs::write(&tmp, bytes)
        .await
        .map_err(|err| StorageError::io(&tmp, err))?;

    fs::rename(&tmp, path)
        .await
        .map_err(|err| StorageError::io(path, err))?;
    Ok(())
}

/// `bikes.json` stages through `bikes.json.tmp`.
fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".tmp");
    PathBuf::from(name)
}
