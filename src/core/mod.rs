pub mod error;
pub mod types;

pub use error::{ManagerError, Result, StorageError};
pub use types::{Bike, BikeType, Collection, UpsertBike};
