//! Staged mutations and the receipt returned once they are committed.
//!
//! A [`ChangeSet`] is the explicit unit-of-work record: every add, update and
//! delete a request performs is appended here, and the whole set is handed to
//! [`crate::domain::ports::CityStore::apply`] in one call. Stores must apply a
//! change set completely or not at all.

use std::collections::BTreeMap;

use super::city::{City, CityId, NewCity, NewPointOfInterest, PointOfInterest, PointOfInterestId};

/// Handle for a city staged for creation; resolves against a [`CommitReceipt`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StagedCity(usize);

/// Handle for a point of interest staged for creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StagedPoint(usize);

/// One staged mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StagedChange {
    /// Create a city, and any initial children it carries.
    AddCity { handle: StagedCity, city: NewCity },
    /// Append a point of interest to an existing city.
    AddPoint {
        handle: StagedPoint,
        city_id: CityId,
        point: NewPointOfInterest,
    },
    /// Overwrite the mutable fields of an existing point of interest.
    UpdatePoint(PointOfInterest),
    /// Remove one point of interest.
    DeletePoint {
        city_id: CityId,
        point_id: PointOfInterestId,
    },
    /// Remove a city together with all of its points of interest.
    DeleteCity { city_id: CityId },
}

/// Ordered list of staged mutations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    changes: Vec<StagedChange>,
}

impl ChangeSet {
    /// Stage a new city.
    pub fn add_city(&mut self, city: NewCity) -> StagedCity {
        let handle = StagedCity(self.changes.len());
        self.changes.push(StagedChange::AddCity { handle, city });
        handle
    }

    /// Stage a new point of interest under `city_id`.
    pub fn add_point(&mut self, city_id: CityId, point: NewPointOfInterest) -> StagedPoint {
        let handle = StagedPoint(self.changes.len());
        self.changes.push(StagedChange::AddPoint {
            handle,
            city_id,
            point,
        });
        handle
    }

    /// Stage an overwrite of `point`'s mutable fields.
    pub fn update_point(&mut self, point: PointOfInterest) {
        self.changes.push(StagedChange::UpdatePoint(point));
    }

    /// Stage removal of a point of interest.
    pub fn delete_point(&mut self, city_id: CityId, point_id: PointOfInterestId) {
        self.changes
            .push(StagedChange::DeletePoint { city_id, point_id });
    }

    /// Stage removal of a city and its children.
    pub fn delete_city(&mut self, city_id: CityId) {
        self.changes.push(StagedChange::DeleteCity { city_id });
    }

    /// Whether nothing has been staged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Number of staged mutations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Staged mutations in application order.
    pub fn iter(&self) -> impl Iterator<Item = &StagedChange> {
        self.changes.iter()
    }
}

impl IntoIterator for ChangeSet {
    type Item = StagedChange;
    type IntoIter = std::vec::IntoIter<StagedChange>;

    fn into_iter(self) -> Self::IntoIter {
        self.changes.into_iter()
    }
}

/// Outcome of a successful commit: the entities created by it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitReceipt {
    cities: BTreeMap<StagedCity, City>,
    points: BTreeMap<StagedPoint, PointOfInterest>,
}

impl CommitReceipt {
    /// Record the city created for `handle`.
    pub fn record_city(&mut self, handle: StagedCity, city: City) {
        self.cities.insert(handle, city);
    }

    /// Record the point of interest created for `handle`.
    pub fn record_point(&mut self, handle: StagedPoint, point: PointOfInterest) {
        self.points.insert(handle, point);
    }

    /// City created for `handle`, with its children and assigned ids.
    #[must_use]
    pub fn city(&self, handle: StagedCity) -> Option<&City> {
        self.cities.get(&handle)
    }

    /// Point of interest created for `handle`, with its assigned id.
    #[must_use]
    pub fn point(&self, handle: StagedPoint) -> Option<&PointOfInterest> {
        self.points.get(&handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn handles_follow_staging_order() {
        let mut changes = ChangeSet::default();
        let city = changes.add_city(NewCity {
            name: "Brunflo".to_owned(),
            description: None,
            points_of_interest: Vec::new(),
        });
        changes.delete_city(CityId::new(9));
        let point = changes.add_point(
            CityId::new(1),
            NewPointOfInterest {
                name: "Ragnarök".to_owned(),
                description: None,
            },
        );

        assert_eq!(changes.len(), 3);
        assert_ne!(city.0, point.0);
        assert!(matches!(
            changes.iter().nth(2),
            Some(StagedChange::AddPoint { handle, .. }) if *handle == point
        ));
    }

    #[rstest]
    fn receipt_resolves_recorded_handles_only() {
        let mut changes = ChangeSet::default();
        let recorded = changes.add_point(
            CityId::new(1),
            NewPointOfInterest {
                name: "Jamtli".to_owned(),
                description: None,
            },
        );
        let missing = changes.add_point(
            CityId::new(1),
            NewPointOfInterest {
                name: "Utsiktstornet".to_owned(),
                description: None,
            },
        );

        let mut receipt = CommitReceipt::default();
        receipt.record_point(
            recorded,
            PointOfInterest {
                id: PointOfInterestId::new(1),
                city_id: CityId::new(1),
                name: "Jamtli".to_owned(),
                description: None,
            },
        );

        assert!(receipt.point(recorded).is_some());
        assert!(receipt.point(missing).is_none());
    }
}
