//! `CityStore` adapter holding every record in memory.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::ports::{CityStore, CityStoreError};
use crate::domain::{
    ChangeSet, City, CityId, CommitReceipt, NewCity, NewPointOfInterest, PointOfInterest,
    PointOfInterestId, StagedChange,
};

#[derive(Debug, Clone)]
struct PointRecord {
    name: String,
    description: Option<String>,
}

#[derive(Debug, Clone)]
struct CityRecord {
    name: String,
    description: Option<String>,
    last_point_id: u32,
    points: BTreeMap<PointOfInterestId, PointRecord>,
}

impl CityRecord {
    fn to_point(&self, city_id: CityId, point_id: PointOfInterestId) -> Option<PointOfInterest> {
        self.points.get(&point_id).map(|record| PointOfInterest {
            id: point_id,
            city_id,
            name: record.name.clone(),
            description: record.description.clone(),
        })
    }

    fn to_points(&self, city_id: CityId) -> Vec<PointOfInterest> {
        self.points
            .keys()
            .filter_map(|point_id| self.to_point(city_id, *point_id))
            .collect()
    }

    fn to_city(&self, city_id: CityId, include_points: bool) -> City {
        City {
            id: city_id,
            name: self.name.clone(),
            description: self.description.clone(),
            points_of_interest: if include_points {
                self.to_points(city_id)
            } else {
                Vec::new()
            },
        }
    }

    fn insert_point(
        &mut self,
        city_id: CityId,
        point: NewPointOfInterest,
    ) -> Result<PointOfInterest, CityStoreError> {
        let next = self.last_point_id.checked_add(1).ok_or_else(|| {
            CityStoreError::conflict(format!("city {city_id} has no point ids left"))
        })?;
        self.last_point_id = next;
        let point_id = PointOfInterestId::new(next);
        self.points.insert(
            point_id,
            PointRecord {
                name: point.name.clone(),
                description: point.description.clone(),
            },
        );
        Ok(PointOfInterest {
            id: point_id,
            city_id,
            name: point.name,
            description: point.description,
        })
    }
}

#[derive(Debug, Clone, Default)]
struct StoreState {
    last_city_id: u32,
    cities: BTreeMap<CityId, CityRecord>,
}

impl StoreState {
    fn city_mut(&mut self, city_id: CityId) -> Result<&mut CityRecord, CityStoreError> {
        self.cities
            .get_mut(&city_id)
            .ok_or_else(|| CityStoreError::conflict(format!("city {city_id} no longer exists")))
    }

    fn insert_city(&mut self, city: NewCity) -> Result<City, CityStoreError> {
        let next = self
            .last_city_id
            .checked_add(1)
            .ok_or_else(|| CityStoreError::conflict("no city ids left"))?;
        self.last_city_id = next;
        let city_id = CityId::new(next);

        let mut record = CityRecord {
            name: city.name,
            description: city.description,
            last_point_id: 0,
            points: BTreeMap::new(),
        };
        for point in city.points_of_interest {
            record.insert_point(city_id, point)?;
        }
        let created = record.to_city(city_id, true);
        self.cities.insert(city_id, record);
        Ok(created)
    }

    fn apply(
        &mut self,
        change: StagedChange,
        receipt: &mut CommitReceipt,
    ) -> Result<(), CityStoreError> {
        match change {
            StagedChange::AddCity { handle, city } => {
                let created = self.insert_city(city)?;
                receipt.record_city(handle, created);
            }
            StagedChange::AddPoint {
                handle,
                city_id,
                point,
            } => {
                let created = self.city_mut(city_id)?.insert_point(city_id, point)?;
                receipt.record_point(handle, created);
            }
            StagedChange::UpdatePoint(point) => {
                let record = self
                    .city_mut(point.city_id)?
                    .points
                    .get_mut(&point.id)
                    .ok_or_else(|| missing_point(point.city_id, point.id))?;
                record.name = point.name;
                record.description = point.description;
            }
            StagedChange::DeletePoint { city_id, point_id } => {
                self.city_mut(city_id)?
                    .points
                    .remove(&point_id)
                    .ok_or_else(|| missing_point(city_id, point_id))?;
            }
            StagedChange::DeleteCity { city_id } => {
                self.cities.remove(&city_id).ok_or_else(|| {
                    CityStoreError::conflict(format!("city {city_id} no longer exists"))
                })?;
            }
        }
        Ok(())
    }
}

fn missing_point(city_id: CityId, point_id: PointOfInterestId) -> CityStoreError {
    CityStoreError::conflict(format!(
        "point of interest {point_id} in city {city_id} no longer exists"
    ))
}

/// Thread-safe in-memory city store.
///
/// Commits are applied to a copy of the current state and swapped in only
/// when every staged change succeeded, so a failing change set leaves no
/// trace. Identifiers are never reused, even after deletion.
#[derive(Debug, Default)]
pub struct InMemoryCityStore {
    state: RwLock<StoreState>,
}

impl InMemoryCityStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CityStore for InMemoryCityStore {
    async fn list_cities(&self) -> Result<Vec<City>, CityStoreError> {
        let state = self.state.read().await;
        Ok(state
            .cities
            .iter()
            .map(|(city_id, record)| record.to_city(*city_id, false))
            .collect())
    }

    async fn find_city(
        &self,
        city_id: CityId,
        include_points: bool,
    ) -> Result<Option<City>, CityStoreError> {
        let state = self.state.read().await;
        Ok(state
            .cities
            .get(&city_id)
            .map(|record| record.to_city(city_id, include_points)))
    }

    async fn city_exists(&self, city_id: CityId) -> Result<bool, CityStoreError> {
        Ok(self.state.read().await.cities.contains_key(&city_id))
    }

    async fn list_points(&self, city_id: CityId) -> Result<Vec<PointOfInterest>, CityStoreError> {
        let state = self.state.read().await;
        Ok(state
            .cities
            .get(&city_id)
            .map(|record| record.to_points(city_id))
            .unwrap_or_default())
    }

    async fn find_point(
        &self,
        city_id: CityId,
        point_id: PointOfInterestId,
    ) -> Result<Option<PointOfInterest>, CityStoreError> {
        let state = self.state.read().await;
        Ok(state
            .cities
            .get(&city_id)
            .and_then(|record| record.to_point(city_id, point_id)))
    }

    async fn apply(&self, changes: ChangeSet) -> Result<CommitReceipt, CityStoreError> {
        let mut state = self.state.write().await;
        let mut working = state.clone();
        let mut receipt = CommitReceipt::default();
        let staged = changes.len();
        for change in changes {
            working.apply(change, &mut receipt)?;
        }
        *state = working;
        debug!(changes = staged, "change set committed");
        Ok(receipt)
    }

    async fn ping(&self) -> Result<(), CityStoreError> {
        let _state = self.state.read().await;
        Ok(())
    }
}
