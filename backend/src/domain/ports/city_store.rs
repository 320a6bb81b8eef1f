//! Port for city and point-of-interest storage.
//!
//! Reads go straight to the store. Writes never do: callers stage them in a
//! [`ChangeSet`] and hand the whole set to [`CityStore::apply`], which must
//! either apply every change or none of them.

use async_trait::async_trait;

use crate::domain::{
    ChangeSet, City, CityId, CommitReceipt, PointOfInterest, PointOfInterestId,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised by city store adapters.
    pub enum CityStoreError {
        /// Store connection could not be established.
        Connection => "city store connection failed",
        /// Query or mutation failed during execution.
        Query => "city store query failed",
        /// A staged change no longer matches the stored state.
        Conflict => "city store commit conflict",
    }
}

/// Port for reading cities and committing staged changes.
///
/// # Identity
///
/// City ids are assigned on commit, start at 1 and are never reused. Point ids
/// are assigned per city on the same terms, so `(city_id, point_id)` is the
/// only stable address of a point of interest.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CityStore: Send + Sync {
    /// Every city, without children, in no particular order.
    async fn list_cities(&self) -> Result<Vec<City>, CityStoreError>;

    /// Fetch one city. Children are loaded only when `include_points` is set.
    async fn find_city(
        &self,
        city_id: CityId,
        include_points: bool,
    ) -> Result<Option<City>, CityStoreError>;

    /// Whether a city with this id exists.
    async fn city_exists(&self, city_id: CityId) -> Result<bool, CityStoreError>;

    /// Points of interest of one city, ordered by id.
    ///
    /// Returns an empty list when the city does not exist; callers check
    /// existence first.
    async fn list_points(&self, city_id: CityId) -> Result<Vec<PointOfInterest>, CityStoreError>;

    /// Fetch one point of interest scoped to its city.
    async fn find_point(
        &self,
        city_id: CityId,
        point_id: PointOfInterestId,
    ) -> Result<Option<PointOfInterest>, CityStoreError>;

    /// Apply every staged change atomically.
    ///
    /// An empty change set succeeds and changes nothing.
    async fn apply(&self, changes: ChangeSet) -> Result<CommitReceipt, CityStoreError>;

    /// Cheap liveness probe used by readiness checks.
    async fn ping(&self) -> Result<(), CityStoreError>;
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(CityStoreError::connection("refused"), "city store connection failed: refused")]
    #[case(CityStoreError::query("timeout"), "city store query failed: timeout")]
    #[case(CityStoreError::conflict("city 4 is gone"), "city store commit conflict: city 4 is gone")]
    fn errors_render_their_context(#[case] error: CityStoreError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[tokio::test]
    async fn mock_store_reports_configured_lookup() {
        let mut store = MockCityStore::new();
        store
            .expect_city_exists()
            .withf(|id| id.get() == 3)
            .returning(|_| Ok(true));

        assert!(store.city_exists(CityId::new(3)).await.expect("lookup"));
    }
}
