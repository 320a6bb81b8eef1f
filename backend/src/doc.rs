//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every resource route, the health probes and the
//! schema wrappers from [`crate::inbound::http::schemas`], which describe the
//! domain types without coupling them to utoipa.
//!
//! The generated document is served by Swagger UI in debug builds and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use utoipa::OpenApi;

use crate::inbound::http::schemas::{
    CityFullSchema, CitySummarySchema, ErrorCodeSchema, ErrorSchema, PatchOperationSchema,
    PointSummarySchema, ResourceInputSchema,
};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "City info API",
        description = "Cities and their points of interest."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::cities::list_cities,
        crate::inbound::http::cities::get_city,
        crate::inbound::http::cities::create_city,
        crate::inbound::http::cities::delete_city,
        crate::inbound::http::points_of_interest::list_points,
        crate::inbound::http::points_of_interest::get_point,
        crate::inbound::http::points_of_interest::create_point,
        crate::inbound::http::points_of_interest::update_point,
        crate::inbound::http::points_of_interest::patch_point,
        crate::inbound::http::points_of_interest::delete_point,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
        crate::inbound::http::health::test_database,
    ),
    components(schemas(
        CityFullSchema,
        CitySummarySchema,
        PointSummarySchema,
        ResourceInputSchema,
        PatchOperationSchema,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "cities", description = "Cities"),
        (name = "points of interest", description = "Points of interest within a city"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
