//! Request-scoped repository with an explicit unit of work.
//!
//! A [`CityInfoRepository`] is created per request over the shared store.
//! Reads are forwarded immediately. Writes are only staged, and nothing is
//! visible to other requests until [`CityInfoRepository::commit`] succeeds.
//! Dropping the repository without committing discards the staged changes.

use std::sync::Arc;

use thiserror::Error;

use super::change_set::{ChangeSet, CommitReceipt, StagedCity, StagedPoint};
use super::city::{City, CityId, NewCity, NewPointOfInterest, PointOfInterest, PointOfInterestId};
use super::ports::{CityStore, CityStoreError};

/// Failures raised by repository operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// The parent city of a staged point does not exist.
    #[error("city {city_id} does not exist")]
    CityNotFound { city_id: CityId },
    /// The backing store failed.
    #[error(transparent)]
    Store(#[from] CityStoreError),
}

/// Repository over a [`CityStore`] that batches writes into one commit.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use cityinfo::domain::{CityInfoRepository, NewCity};
/// use cityinfo::outbound::persistence::InMemoryCityStore;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let store = Arc::new(InMemoryCityStore::default());
/// let mut repository = CityInfoRepository::new(store);
/// let staged = repository.add_city(NewCity {
///     name: "Brunflo".to_owned(),
///     description: None,
///     points_of_interest: Vec::new(),
/// });
/// let receipt = repository.commit().await.expect("commit");
/// assert_eq!(receipt.city(staged).map(|c| c.id.get()), Some(1));
/// # });
/// ```
pub struct CityInfoRepository {
    store: Arc<dyn CityStore>,
    changes: ChangeSet,
}

impl CityInfoRepository {
    /// Start a unit of work over `store`.
    pub fn new(store: Arc<dyn CityStore>) -> Self {
        Self {
            store,
            changes: ChangeSet::default(),
        }
    }

    /// Every city without children, ordered by name.
    pub async fn list_cities(&self) -> Result<Vec<City>, RepositoryError> {
        let mut cities = self.store.list_cities().await?;
        cities.sort_by(|left, right| left.name.cmp(&right.name));
        Ok(cities)
    }

    /// One city, with children only when `include_points` is set.
    pub async fn get_city(
        &self,
        city_id: CityId,
        include_points: bool,
    ) -> Result<Option<City>, RepositoryError> {
        Ok(self.store.find_city(city_id, include_points).await?)
    }

    /// Whether the city exists in committed state.
    pub async fn city_exists(&self, city_id: CityId) -> Result<bool, RepositoryError> {
        Ok(self.store.city_exists(city_id).await?)
    }

    /// Points of interest of one city, ordered by id.
    pub async fn list_points(
        &self,
        city_id: CityId,
    ) -> Result<Vec<PointOfInterest>, RepositoryError> {
        Ok(self.store.list_points(city_id).await?)
    }

    /// One point of interest, scoped to its city.
    pub async fn get_point(
        &self,
        city_id: CityId,
        point_id: PointOfInterestId,
    ) -> Result<Option<PointOfInterest>, RepositoryError> {
        Ok(self.store.find_point(city_id, point_id).await?)
    }

    /// Stage a new city together with any initial children it carries.
    pub fn add_city(&mut self, city: NewCity) -> StagedCity {
        self.changes.add_city(city)
    }

    /// Stage a new point of interest under an existing city.
    ///
    /// # Errors
    /// Returns [`RepositoryError::CityNotFound`] when the parent city is not
    /// in committed state. Nothing is staged in that case.
    pub async fn add_point(
        &mut self,
        city_id: CityId,
        point: NewPointOfInterest,
    ) -> Result<StagedPoint, RepositoryError> {
        if !self.city_exists(city_id).await? {
            return Err(RepositoryError::CityNotFound { city_id });
        }
        Ok(self.changes.add_point(city_id, point))
    }

    /// Stage an overwrite of a loaded point's mutable fields.
    pub fn update_point(&mut self, point: &PointOfInterest) {
        self.changes.update_point(point.clone());
    }

    /// Stage removal of a loaded point of interest.
    pub fn delete_point(&mut self, point: &PointOfInterest) {
        self.changes.delete_point(point.city_id, point.id);
    }

    /// Stage removal of a loaded city and all of its children.
    pub fn delete_city(&mut self, city: &City) {
        self.changes.delete_city(city.id);
    }

    /// Whether anything is staged.
    #[must_use]
    pub fn has_pending_changes(&self) -> bool {
        !self.changes.is_empty()
    }

    /// Persist every staged change atomically.
    ///
    /// The staged changes are consumed whether or not the commit succeeds.
    /// A commit with nothing staged is a successful no-op.
    pub async fn commit(&mut self) -> Result<CommitReceipt, RepositoryError> {
        let changes = std::mem::take(&mut self.changes);
        Ok(self.store.apply(changes).await?)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::StagedChange;
    use crate::domain::ports::MockCityStore;

    fn city(id: u32, name: &str) -> City {
        City {
            id: CityId::new(id),
            name: name.to_owned(),
            description: None,
            points_of_interest: Vec::new(),
        }
    }

    fn point(city_id: u32, id: u32) -> PointOfInterest {
        PointOfInterest {
            id: PointOfInterestId::new(id),
            city_id: CityId::new(city_id),
            name: format!("point {id}"),
            description: None,
        }
    }

    #[tokio::test]
    async fn list_cities_orders_by_name() {
        let mut store = MockCityStore::new();
        store.expect_list_cities().returning(|| {
            Ok(vec![
                city(1, "Östersund"),
                city(2, "Brunflo"),
                city(3, "Åre"),
                city(4, "Bräcke"),
            ])
        });
        let repository = CityInfoRepository::new(Arc::new(store));

        let names: Vec<_> = repository
            .list_cities()
            .await
            .expect("list")
            .into_iter()
            .map(|c| c.name)
            .collect();

        assert_eq!(names, ["Brunflo", "Bräcke", "Åre", "Östersund"]);
    }

    #[tokio::test]
    async fn add_point_requires_existing_city() {
        let mut store = MockCityStore::new();
        store.expect_city_exists().returning(|_| Ok(false));
        store.expect_apply().never();
        let mut repository = CityInfoRepository::new(Arc::new(store));

        let result = repository
            .add_point(
                CityId::new(99),
                NewPointOfInterest {
                    name: "Jamtli".to_owned(),
                    description: None,
                },
            )
            .await;

        assert_eq!(
            result,
            Err(RepositoryError::CityNotFound {
                city_id: CityId::new(99)
            })
        );
        assert!(!repository.has_pending_changes());
    }

    #[tokio::test]
    async fn commit_hands_every_staged_change_to_the_store() {
        let mut store = MockCityStore::new();
        store
            .expect_apply()
            .withf(|changes| {
                let staged: Vec<_> = changes.iter().collect();
                matches!(
                    staged.as_slice(),
                    [
                        StagedChange::UpdatePoint(_),
                        StagedChange::DeletePoint { .. },
                        StagedChange::DeleteCity { .. },
                    ]
                )
            })
            .times(1)
            .returning(|_| Ok(CommitReceipt::default()));
        let mut repository = CityInfoRepository::new(Arc::new(store));

        repository.update_point(&point(1, 1));
        repository.delete_point(&point(1, 2));
        repository.delete_city(&city(2, "Brunflo"));
        repository.commit().await.expect("commit");

        assert!(!repository.has_pending_changes());
    }

    #[tokio::test]
    async fn failed_commit_discards_staged_changes() {
        let mut store = MockCityStore::new();
        store
            .expect_apply()
            .returning(|_| Err(CityStoreError::connection("refused")));
        let mut repository = CityInfoRepository::new(Arc::new(store));
        repository.delete_city(&city(1, "Brunflo"));

        let result = repository.commit().await;

        assert!(matches!(result, Err(RepositoryError::Store(_))));
        assert!(!repository.has_pending_changes());
    }
}
