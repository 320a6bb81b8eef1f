//! Failure taxonomy for resource operations.
//!
//! Services return [`ResourceError`]; the conversion into the transport
//! agnostic [`Error`] payload decides which details a client may see.
//! Persistence failures keep their cause for logs only.

use serde_json::json;
use thiserror::Error as ThisError;
use tracing::{error, info};

use super::city::{CityId, PointOfInterestId};
use super::error::Error;
use super::patch::PatchError;
use super::ports::CityStoreError;
use super::unit_of_work::RepositoryError;
use super::validation::ValidationErrors;

/// Why a resource operation failed.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum ResourceError {
    /// The payload broke one or more validation rules.
    #[error("validation failed: {0}")]
    ValidationFailed(ValidationErrors),
    /// The patch document could not be applied.
    #[error("malformed patch document: {0}")]
    MalformedPatch(#[from] PatchError),
    /// The addressed city does not exist.
    #[error("city {city_id} was not found")]
    CityNotFound { city_id: CityId },
    /// The addressed point of interest does not exist within its city.
    #[error("point of interest {point_id} was not found in city {city_id}")]
    PointOfInterestNotFound {
        city_id: CityId,
        point_id: PointOfInterestId,
    },
    /// The store failed to read or commit.
    #[error("persistence failed: {0}")]
    PersistenceFailed(CityStoreError),
}

impl From<ValidationErrors> for ResourceError {
    fn from(value: ValidationErrors) -> Self {
        Self::ValidationFailed(value)
    }
}

impl From<CityStoreError> for ResourceError {
    fn from(value: CityStoreError) -> Self {
        error!(error = %value, "city store operation failed");
        Self::PersistenceFailed(value)
    }
}

impl From<RepositoryError> for ResourceError {
    fn from(value: RepositoryError) -> Self {
        match value {
            RepositoryError::CityNotFound { city_id } => Self::CityNotFound { city_id },
            RepositoryError::Store(err) => Self::from(err),
        }
    }
}

impl ResourceError {
    /// Translate a failed commit, reporting a store conflict via `vanished`.
    ///
    /// A conflict means the target was removed after it was loaded, which a
    /// client sees as the resource no longer existing.
    pub(crate) fn from_commit(err: RepositoryError, vanished: impl FnOnce() -> Self) -> Self {
        match err {
            RepositoryError::Store(CityStoreError::Conflict { message }) => {
                info!(%message, "commit target removed concurrently");
                vanished()
            }
            other => Self::from(other),
        }
    }
}

impl From<ResourceError> for Error {
    fn from(value: ResourceError) -> Self {
        match value {
            ResourceError::ValidationFailed(errors) => {
                Error::invalid_request("request validation failed").with_details(json!({
                    "code": "validation_failed",
                    "errors": errors,
                }))
            }
            ResourceError::MalformedPatch(err) => {
                Error::invalid_request(err.to_string()).with_details(json!({
                    "code": "malformed_patch",
                    "index": err.index(),
                }))
            }
            ResourceError::CityNotFound { city_id } => {
                Error::not_found(format!("city {city_id} was not found")).with_details(json!({
                    "resource": "city",
                    "cityId": city_id.get(),
                }))
            }
            ResourceError::PointOfInterestNotFound { city_id, point_id } => Error::not_found(
                format!("point of interest {point_id} was not found in city {city_id}"),
            )
            .with_details(json!({
                "resource": "pointOfInterest",
                "cityId": city_id.get(),
                "pointOfInterestId": point_id.get(),
            })),
            ResourceError::PersistenceFailed(_) => Error::internal("Internal server error"),
        }
    }
}
