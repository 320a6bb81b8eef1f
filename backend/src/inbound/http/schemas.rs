//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration. The wrappers mirror the
//! serialised shape of their domain counterparts.

#![expect(
    dead_code,
    reason = "Schema wrappers exist only for OpenAPI generation via utoipa"
)]

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[serde(rename_all = "camelCase")]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "request validation failed")]
    message: String,
    /// Correlation identifier for tracing this error across systems.
    #[schema(example = "6f1d3c2a-8a55-4f57-9d0a-4a1c0b7d2e11")]
    trace_id: Option<String>,
    /// Supplementary error details, such as validation messages per field.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::PointSummary`].
#[derive(ToSchema)]
#[schema(as = crate::domain::PointSummary)]
pub struct PointSummarySchema {
    #[schema(example = 1)]
    id: u32,
    #[schema(example = "Jamtli")]
    name: String,
    #[schema(example = "Open-air museum")]
    description: Option<String>,
}

/// OpenAPI schema for [`crate::domain::CityFull`].
#[derive(ToSchema)]
#[schema(as = crate::domain::CityFull)]
#[serde(rename_all = "camelCase")]
pub struct CityFullSchema {
    #[schema(example = 1)]
    id: u32,
    #[schema(example = "Östersund")]
    name: String,
    description: Option<String>,
    points_of_interest: Vec<PointSummarySchema>,
}

/// OpenAPI schema for [`crate::domain::CitySummary`].
#[derive(ToSchema)]
#[schema(as = crate::domain::CitySummary)]
pub struct CitySummarySchema {
    #[schema(example = 1)]
    id: u32,
    #[schema(example = "Östersund")]
    name: String,
    description: Option<String>,
}

/// OpenAPI schema shared by the city and point-of-interest write payloads.
#[derive(ToSchema)]
pub struct ResourceInputSchema {
    /// Required, at most 50 characters.
    #[schema(example = "Jamtli", max_length = 50)]
    name: Option<String>,
    /// At most 200 characters and different from the name.
    #[schema(example = "Open-air museum", max_length = 200)]
    description: Option<String>,
}

/// OpenAPI schema for [`crate::domain::PatchOperation`].
#[derive(ToSchema)]
#[schema(as = crate::domain::PatchOperation)]
pub struct PatchOperationSchema {
    /// One of `add`, `replace`, `remove`, `copy`, `move`, `test`.
    #[schema(example = "replace")]
    op: String,
    /// `/name` or `/description`.
    #[schema(example = "/description")]
    path: String,
    /// Source path for `copy` and `move`.
    from: Option<String>,
    /// New value; a string or `null`.
    value: Option<serde_json::Value>,
}
