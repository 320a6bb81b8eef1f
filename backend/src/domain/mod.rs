//! Domain primitives, services and ports.
//!
//! Purpose: model cities and their points of interest, the rules that guard
//! them, and the request-scoped unit of work used to change them. Nothing in
//! this module knows about HTTP or about a particular store.
//!
//! Public surface:
//! - Entities (`City`, `PointOfInterest`) and wire projections
//!   (`CityFull`, `CitySummary`, `PointSummary`, the `*Input` payloads).
//! - `CitiesService` and `PointsOfInterestService`, the resource operations.
//! - `CityInfoRepository`, the per-request unit of work over a `CityStore`.
//! - `Error` / `ErrorCode`, the transport agnostic error payload, and
//!   `ResourceError`, the failure taxonomy services return.

mod change_set;
mod cities_service;
mod city;
pub mod error;
mod patch;
mod points_of_interest_service;
pub mod ports;
mod projection;
mod resource_error;
mod seed;
mod trace_id;
mod unit_of_work;
pub mod validation;

pub use self::change_set::{ChangeSet, CommitReceipt, StagedChange, StagedCity, StagedPoint};
pub use self::cities_service::{CitiesService, CityView};
pub use self::city::{
    City, CityId, DESCRIPTION_MAX_CHARS, NAME_MAX_CHARS, NewCity, NewPointOfInterest,
    PointOfInterest, PointOfInterestId,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::patch::{PatchDocument, PatchError, PatchOperation};
pub use self::points_of_interest_service::PointsOfInterestService;
pub use self::projection::{
    CityCreateInput, CityFull, CitySummary, PointCreateInput, PointSummary, PointUpdateInput,
};
pub use self::resource_error::ResourceError;
pub use self::seed::{CitySeeder, SeedError, SeedOutcome, builtin_seed_cities, parse_seed_cities};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::unit_of_work::{CityInfoRepository, RepositoryError};
pub use self::validation::{Validate, ValidationErrors};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use cityinfo::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
