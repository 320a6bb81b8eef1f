//! Projections between entities and their wire-facing shapes.
//!
//! Projections are pure: they never validate and never touch the store.
//! Outbound shapes come in two tiers, [`CityFull`] with its children and
//! [`CitySummary`] without. Inbound shapes keep every field optional so that
//! a missing `name` reaches validation as a reportable violation instead of
//! failing deserialisation.

use serde::{Deserialize, Serialize};

use super::city::{City, NewCity, NewPointOfInterest, PointOfInterest};
use super::validation::{Validate, ValidationErrors, validate_name_and_description};

/// Point of interest as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointSummary {
    pub id: u32,
    pub name: String,
    pub description: Option<String>,
}

impl From<&PointOfInterest> for PointSummary {
    fn from(value: &PointOfInterest) -> Self {
        Self {
            id: value.id.get(),
            name: value.name.clone(),
            description: value.description.clone(),
        }
    }
}

/// City with its points of interest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityFull {
    pub id: u32,
    pub name: String,
    pub description: Option<String>,
    pub points_of_interest: Vec<PointSummary>,
}

impl From<&City> for CityFull {
    fn from(value: &City) -> Self {
        Self {
            id: value.id.get(),
            name: value.name.clone(),
            description: value.description.clone(),
            points_of_interest: value
                .points_of_interest
                .iter()
                .map(PointSummary::from)
                .collect(),
        }
    }
}

/// City without its points of interest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CitySummary {
    pub id: u32,
    pub name: String,
    pub description: Option<String>,
}

impl From<&City> for CitySummary {
    fn from(value: &City) -> Self {
        Self {
            id: value.id.get(),
            name: value.name.clone(),
            description: value.description.clone(),
        }
    }
}

/// Payload for `POST /api/cities`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityCreateInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl Validate for CityCreateInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        validate_name_and_description(self.name.as_deref(), self.description.as_deref())
    }
}

impl From<CityCreateInput> for NewCity {
    fn from(value: CityCreateInput) -> Self {
        Self {
            name: value.name.unwrap_or_default(),
            description: value.description,
            points_of_interest: Vec::new(),
        }
    }
}

/// Payload for `POST /api/cities/{cityId}/pointsofinterest`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointCreateInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl Validate for PointCreateInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        validate_name_and_description(self.name.as_deref(), self.description.as_deref())
    }
}

impl From<PointCreateInput> for NewPointOfInterest {
    fn from(value: PointCreateInput) -> Self {
        Self {
            name: value.name.unwrap_or_default(),
            description: value.description,
        }
    }
}

/// Payload for `PUT` and the working copy for `PATCH` on a point of interest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointUpdateInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl PointUpdateInput {
    /// Overwrite every mutable field of `point`, leaving its identity alone.
    pub fn apply_to(self, point: &mut PointOfInterest) {
        point.name = self.name.unwrap_or_default();
        point.description = self.description;
    }
}

impl Validate for PointUpdateInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        validate_name_and_description(self.name.as_deref(), self.description.as_deref())
    }
}

impl From<&PointOfInterest> for PointUpdateInput {
    fn from(value: &PointOfInterest) -> Self {
        Self {
            name: Some(value.name.clone()),
            description: value.description.clone(),
        }
    }
}
