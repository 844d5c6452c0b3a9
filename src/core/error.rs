use std::path::PathBuf;

use thiserror::Error;
use uuid::Uuid;

/// Failures raised by a [`BikeStore`](crate::storage::BikeStore) implementation.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("File '{}' does not exist", .0.display())]
    MissingFile(PathBuf),

    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode '{}': {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode collection: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

impl StorageError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn decode(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Decode {
            path: path.into(),
            source,
        }
    }
}

/// Faults surfaced by [`BikeManager`](crate::manager::BikeManager).
#[derive(Error, Debug)]
pub enum ManagerError {
    #[error("Bike with id:{0} does not exist")]
    NotFound(Uuid),

    #[error("List is empty")]
    EmptyCollection,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub type Result<T> = std::result::Result<T, ManagerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_message_names_the_path() {
        let err = StorageError::MissingFile(PathBuf::from("data/bikes.json"));
        assert_eq!(err.to_string(), "File 'data/bikes.json' does not exist");
    }

    #[test]
    fn storage_error_converts_into_manager_error() {
        let err: ManagerError = StorageError::Unavailable("offline".to_string()).into();
        assert!(matches!(err, ManagerError::Storage(StorageError::Unavailable(_))));
        assert_eq!(err.to_string(), "Storage unavailable: offline");
    }
}
