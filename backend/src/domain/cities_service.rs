//! City resource operations.
//!
//! Every call opens its own [`CityInfoRepository`] so staged changes never
//! leak between requests.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use super::city::CityId;
use super::ports::{CityStore, CityStoreError, NotificationSink};
use super::projection::{CityCreateInput, CityFull, CitySummary};
use super::resource_error::ResourceError;
use super::unit_of_work::CityInfoRepository;
use super::validation::Validate;

/// City as returned by [`CitiesService::get_city`], with or without children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CityView {
    Full(CityFull),
    Summary(CitySummary),
}

/// Service behind the `/api/cities` routes.
#[derive(Clone)]
pub struct CitiesService {
    store: Arc<dyn CityStore>,
    notifications: Arc<dyn NotificationSink>,
}

impl CitiesService {
    /// Create a service over the shared store and notification sink.
    pub fn new(store: Arc<dyn CityStore>, notifications: Arc<dyn NotificationSink>) -> Self {
        Self {
            store,
            notifications,
        }
    }

    fn repository(&self) -> CityInfoRepository {
        CityInfoRepository::new(Arc::clone(&self.store))
    }

    /// Every city without children, ordered by name.
    pub async fn list_cities(&self) -> Result<Vec<CitySummary>, ResourceError> {
        let cities = self.repository().list_cities().await?;
        Ok(cities.iter().map(CitySummary::from).collect())
    }

    /// One city in the requested tier.
    pub async fn get_city(
        &self,
        city_id: CityId,
        include_points: bool,
    ) -> Result<CityView, ResourceError> {
        let city = self
            .repository()
            .get_city(city_id, include_points)
            .await?
            .ok_or_else(|| city_not_found(city_id))?;
        Ok(if include_points {
            CityView::Full(CityFull::from(&city))
        } else {
            CityView::Summary(CitySummary::from(&city))
        })
    }

    /// Validate, stage and commit a new city.
    pub async fn create_city(&self, input: CityCreateInput) -> Result<CityFull, ResourceError> {
        input.validate()?;

        let mut repository = self.repository();
        let staged = repository.add_city(input.into());
        let receipt = repository.commit().await?;
        let city = receipt.city(staged).ok_or_else(|| {
            ResourceError::from(CityStoreError::query(
                "commit receipt is missing the created city",
            ))
        })?;

        info!(city_id = %city.id, "city created");
        Ok(CityFull::from(city))
    }

    /// Delete a city with all of its points of interest.
    ///
    /// The deletion notification is sent only after a successful commit.
    pub async fn delete_city(&self, city_id: CityId) -> Result<(), ResourceError> {
        let mut repository = self.repository();
        let city = repository
            .get_city(city_id, true)
            .await?
            .ok_or_else(|| city_not_found(city_id))?;

        repository.delete_city(&city);
        repository
            .commit()
            .await
            .map_err(|err| ResourceError::from_commit(err, || city_not_found(city_id)))?;

        info!(city_id = %city.id, "city deleted");
        self.notifications.send(
            "City was deleted",
            &format!(
                "City: {} with id {} and {} points of interest was deleted",
                city.name,
                city.id,
                city.points_of_interest.len()
            ),
        );
        Ok(())
    }
}

pub(crate) fn city_not_found(city_id: CityId) -> ResourceError {
    info!(city_id = %city_id, "city not found");
    ResourceError::CityNotFound { city_id }
}
