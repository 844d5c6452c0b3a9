use std::cmp::Ordering;
use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::core::{Bike, Collection, ManagerError, Result, UpsertBike};
use crate::storage::BikeStore;

/// Identity-based CRUD on top of a whole-collection [`BikeStore`].
///
/// Every call loads the full collection, works on it in memory and, for
/// mutations, writes the full collection back. Nothing guards the gap between
/// the load and the write: two racing mutations each work on their own
/// snapshot and the later write wins.
#[derive(Clone)]
pub struct BikeManager {
    store: Arc<dyn BikeStore>,
}

impl BikeManager {
    pub fn new(store: Arc<dyn BikeStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, payload: UpsertBike) -> Result<Bike> {
        let bike = Bike::create(payload);
        self.store.append(bike.clone()).await?;

        info!(bike_id = %bike.id, model = %bike.model, "bike created");
        Ok(bike)
    }

    /// All bikes ordered by model name, ignoring case first. Ties keep their
    /// stored order.
    pub async fn list(&self) -> Result<Vec<Bike>> {
        let Some(collection) = self.store.load_all().await? else {
            return Err(ManagerError::EmptyCollection);
        };

        let mut bikes = collection.into_vec();
        bikes.sort_by(|left, right| compare_models(&left.model, &right.model));
        Ok(bikes)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Bike> {
        let collection = self.load_populated().await?;

        collection
            .find(id)
            .cloned()
            .ok_or(ManagerError::NotFound(id))
    }

    /// Replaces every field but the identity.
    ///
    /// Returns `Ok(false)` when the final write fails; lookup faults are
    /// still returned as errors.
    pub async fn update(&self, id: Uuid, payload: UpsertBike) -> Result<bool> {
        let mut collection = self.load_populated().await?;

        let Some(bike) = collection.find_mut(id) else {
            return Err(ManagerError::NotFound(id));
        };
        bike.apply(payload);

        Ok(self.persist(collection, id, "update").await)
    }

    /// Removes the bike. Write failures degrade to `Ok(false)` as in [`update`](Self::update).
    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        let mut collection = self.store.load_all().await?.unwrap_or_default();

        if collection.remove(id).is_none() {
            return Err(ManagerError::NotFound(id));
        }

        Ok(self.persist(collection, id, "delete").await)
    }

    async fn load_populated(&self) -> Result<Collection> {
        match self.store.load_all().await? {
            Some(collection) if !collection.is_empty() => Ok(collection),
            _ => Err(ManagerError::EmptyCollection),
        }
    }

    async fn persist(&self, collection: Collection, id: Uuid, operation: &'static str) -> bool {
        match self.store.overwrite(collection).await {
            Ok(()) => {
                info!(bike_id = %id, operation, "bike collection saved");
                true
            }
            Err(err) => {
                warn!(bike_id = %id, operation, error = %err, "bike collection not saved");
                false
            }
        }
    }
}

fn compare_models(left: &str, right: &str) -> Ordering {
    left.to_lowercase()
        .cmp(&right.to_lowercase())
        .then_with(|| left.cmp(right))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::BikeType;
    use crate::storage::InMemoryBikeStore;

    fn bike(model: &str) -> Bike {
        Bike::create(UpsertBike {
            model: model.to_string(),
            make: format!("{model}Make"),
            color: "Blue".to_string(),
            bike_type: BikeType::City,
            size: 22.2,
        })
    }

    #[tokio::test]
    async fn list_sort_is_stable_for_equal_models() {
        let first = bike("Same");
        let second = bike("Same");
        let third = bike("Alpha");
        let store = Arc::new(InMemoryBikeStore::with_bikes(vec![
            first.clone(),
            second.clone(),
            third.clone(),
        ]));
        let manager = BikeManager::new(store);

        let listed = manager.list().await.unwrap();

        let ids: Vec<Uuid> = listed.iter().map(|bike| bike.id).collect();
        assert_eq!(ids, vec![third.id, first.id, second.id]);
    }

    #[tokio::test]
    async fn delete_on_absent_collection_is_not_found() {
        let manager = BikeManager::new(Arc::new(InMemoryBikeStore::absent()));
        let id = Uuid::new_v4();

        let err = manager.delete(id).await.unwrap_err();
        assert!(matches!(err, ManagerError::NotFound(missing) if missing == id));
    }
}
