//! City and point-of-interest entities.
//!
//! Entities are the persisted shape of the resource model. Identifiers are
//! assigned by the [`crate::domain::ports::CityStore`] when a change set is
//! committed; before that, new resources travel as [`NewCity`] and
//! [`NewPointOfInterest`] shells that carry no id at all.
//!
//! A point-of-interest id is unique only within its owning city, so a point is
//! always addressed by the pair `(CityId, PointOfInterestId)`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Maximum length, in characters, of a city or point-of-interest name.
pub const NAME_MAX_CHARS: usize = 50;

/// Maximum length, in characters, of a city or point-of-interest description.
pub const DESCRIPTION_MAX_CHARS: usize = 200;

/// Store-assigned city identifier.
///
/// # Examples
/// ```
/// use cityinfo::domain::CityId;
///
/// let id = CityId::new(7);
/// assert_eq!(id.get(), 7);
/// assert_eq!(id.to_string(), "7");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CityId(u32);

impl CityId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Raw identifier value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for CityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Store-assigned point-of-interest identifier, unique within one city.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointOfInterestId(u32);

impl PointOfInterestId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Raw identifier value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for PointOfInterestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Persisted point of interest.
///
/// `city_id` is a back-reference to the owning city. The owning [`City`]
/// holds the canonical collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointOfInterest {
    pub id: PointOfInterestId,
    pub city_id: CityId,
    pub name: String,
    pub description: Option<String>,
}

/// Persisted city.
///
/// `points_of_interest` is ordered by id, which is also creation order. It is
/// only populated when the city was loaded with its children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct City {
    pub id: CityId,
    pub name: String,
    pub description: Option<String>,
    pub points_of_interest: Vec<PointOfInterest>,
}

impl City {
    /// Look up one of the loaded children by id.
    #[must_use]
    pub fn point_of_interest(&self, point_id: PointOfInterestId) -> Option<&PointOfInterest> {
        self.points_of_interest
            .iter()
            .find(|point| point.id == point_id)
    }
}

/// Point of interest that has not been committed yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPointOfInterest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// City that has not been committed yet, optionally with initial children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCity {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "pointsOfInterest")]
    pub points_of_interest: Vec<NewPointOfInterest>,
}
