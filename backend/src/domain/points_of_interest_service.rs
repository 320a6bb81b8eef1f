//! Point-of-interest resource operations.
//!
//! Mutating calls follow one shape: resolve the city and the point, build or
//! update a working value, validate it, stage the change and commit. Nothing
//! is staged before validation passes, so a rejected request never reaches
//! the store.

use std::sync::Arc;

use tracing::info;

use super::cities_service::city_not_found;
use super::city::{CityId, PointOfInterest, PointOfInterestId};
use super::patch::PatchDocument;
use super::ports::{CityStore, CityStoreError, NotificationSink};
use super::projection::{PointCreateInput, PointSummary, PointUpdateInput};
use super::resource_error::ResourceError;
use super::unit_of_work::CityInfoRepository;
use super::validation::Validate;

/// Service behind the `/api/cities/{cityId}/pointsofinterest` routes.
#[derive(Clone)]
pub struct PointsOfInterestService {
    store: Arc<dyn CityStore>,
    notifications: Arc<dyn NotificationSink>,
}

impl PointsOfInterestService {
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

    /// Points of interest of one city, ordered by id.
    pub async fn list_points(&self, city_id: CityId) -> Result<Vec<PointSummary>, ResourceError> {
        let repository = self.repository();
        ensure_city(&repository, city_id).await?;
        let points = repository.list_points(city_id).await?;
        Ok(points.iter().map(PointSummary::from).collect())
    }

    /// One point of interest.
    pub async fn get_point(
        &self,
        city_id: CityId,
        point_id: PointOfInterestId,
    ) -> Result<PointSummary, ResourceError> {
        let repository = self.repository();
        let point = load_point(&repository, city_id, point_id).await?;
        Ok(PointSummary::from(&point))
    }

    /// Validate, stage and commit a new point of interest.
    pub async fn create_point(
        &self,
        city_id: CityId,
        input: PointCreateInput,
    ) -> Result<PointSummary, ResourceError> {
        input.validate()?;

        let mut repository = self.repository();
        let staged = repository.add_point(city_id, input.into()).await?;
        let receipt = repository
            .commit()
            .await
            .map_err(|err| ResourceError::from_commit(err, || city_not_found(city_id)))?;
        let point = receipt.point(staged).ok_or_else(|| {
            ResourceError::from(CityStoreError::query(
                "commit receipt is missing the created point of interest",
            ))
        })?;

        info!(city_id = %city_id, point_id = %point.id, "point of interest created");
        Ok(PointSummary::from(point))
    }

    /// Overwrite every mutable field of a point of interest.
    pub async fn update_point(
        &self,
        city_id: CityId,
        point_id: PointOfInterestId,
        input: PointUpdateInput,
    ) -> Result<(), ResourceError> {
        let mut repository = self.repository();
        let mut point = load_point(&repository, city_id, point_id).await?;

        input.validate()?;
        input.apply_to(&mut point);
        repository.update_point(&point);
        repository
            .commit()
            .await
            .map_err(|err| ResourceError::from_commit(err, || point_not_found(city_id, point_id)))?;

        info!(city_id = %city_id, point_id = %point_id, "point of interest updated");
        Ok(())
    }

    /// Apply a patch document to a working copy, re-validate, then commit.
    ///
    /// The stored point is untouched unless the patched copy validates and
    /// the commit succeeds.
    pub async fn patch_point(
        &self,
        city_id: CityId,
        point_id: PointOfInterestId,
        patch: &PatchDocument,
    ) -> Result<(), ResourceError> {
        let mut repository = self.repository();
        let mut point = load_point(&repository, city_id, point_id).await?;

        let mut working = PointUpdateInput::from(&point);
        patch.apply_to(&mut working)?;
        working.validate()?;

        working.apply_to(&mut point);
        repository.update_point(&point);
        repository
            .commit()
            .await
            .map_err(|err| ResourceError::from_commit(err, || point_not_found(city_id, point_id)))?;

        info!(
            city_id = %city_id,
            point_id = %point_id,
            operations = patch.operations().len(),
            "point of interest patched"
        );
        Ok(())
    }

    /// Delete a point of interest and notify the administrator.
    pub async fn delete_point(
        &self,
        city_id: CityId,
        point_id: PointOfInterestId,
    ) -> Result<(), ResourceError> {
        let mut repository = self.repository();
        let point = load_point(&repository, city_id, point_id).await?;

        repository.delete_point(&point);
        repository
            .commit()
            .await
            .map_err(|err| ResourceError::from_commit(err, || point_not_found(city_id, point_id)))?;

        info!(city_id = %city_id, point_id = %point_id, "point of interest deleted");
        self.notifications.send(
            "Point of interest was deleted",
            &format!("POI: {} with id {} was deleted", point.name, point.id),
        );
        Ok(())
    }
}

async fn ensure_city(repository: &CityInfoRepository, city_id: CityId) -> Result<(), ResourceError> {
    if repository.city_exists(city_id).await? {
        Ok(())
    } else {
        Err(city_not_found(city_id))
    }
}

async fn load_point(
    repository: &CityInfoRepository,
    city_id: CityId,
    point_id: PointOfInterestId,
) -> Result<PointOfInterest, ResourceError> {
    ensure_city(repository, city_id).await?;
    repository
        .get_point(city_id, point_id)
        .await?
        .ok_or_else(|| point_not_found(city_id, point_id))
}

fn point_not_found(city_id: CityId, point_id: PointOfInterestId) -> ResourceError {
    info!(city_id = %city_id, point_id = %point_id, "point of interest not found");
    ResourceError::PointOfInterestNotFound { city_id, point_id }
}
