//! Point-of-interest HTTP handlers.
//!
//! ```text
//! GET    /api/cities/{cityId}/pointsofinterest
//! GET    /api/cities/{cityId}/pointsofinterest/{id}
//! POST   /api/cities/{cityId}/pointsofinterest
//! PUT    /api/cities/{cityId}/pointsofinterest/{id}
//! PATCH  /api/cities/{cityId}/pointsofinterest/{id}
//! DELETE /api/cities/{cityId}/pointsofinterest/{id}
//! ```

use actix_web::{HttpResponse, delete, get, patch, post, put, web};

use crate::domain::{
    CityId, PatchDocument, PointCreateInput, PointOfInterestId, PointSummary, PointUpdateInput,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::negotiation::Negotiated;
use crate::inbound::http::schemas::{
    ErrorSchema, PatchOperationSchema, PointSummarySchema, ResourceInputSchema,
};
use crate::inbound::http::state::HttpState;

fn point_path(path: web::Path<(u32, u32)>) -> (CityId, PointOfInterestId) {
    let (city_id, point_id) = path.into_inner();
    (CityId::new(city_id), PointOfInterestId::new(point_id))
}

/// List the points of interest of one city.
#[utoipa::path(
    get,
    path = "/api/cities/{cityId}/pointsofinterest",
    params(("cityId" = u32, Path, description = "City identifier")),
    responses(
        (status = 200, description = "Points of interest", body = [PointSummarySchema]),
        (status = 404, description = "City not found", body = ErrorSchema)
    ),
    tags = ["points of interest"],
    operation_id = "listPointsOfInterest"
)]
#[get("/cities/{cityId}/pointsofinterest")]
pub async fn list_points(
    state: web::Data<HttpState>,
    path: web::Path<u32>,
) -> ApiResult<Negotiated<Vec<PointSummary>>> {
    let city_id = CityId::new(path.into_inner());
    let points = state.points_of_interest.list_points(city_id).await?;
    Ok(Negotiated::list("pointsOfInterest", "pointOfInterest", points))
}

/// Fetch one point of interest.
#[utoipa::path(
    get,
    path = "/api/cities/{cityId}/pointsofinterest/{id}",
    params(
        ("cityId" = u32, Path, description = "City identifier"),
        ("id" = u32, Path, description = "Point-of-interest identifier, unique within the city")
    ),
    responses(
        (status = 200, description = "Point of interest", body = PointSummarySchema),
        (status = 404, description = "City or point of interest not found", body = ErrorSchema)
    ),
    tags = ["points of interest"],
    operation_id = "getPointOfInterest"
)]
#[get("/cities/{cityId}/pointsofinterest/{id}")]
pub async fn get_point(
    state: web::Data<HttpState>,
    path: web::Path<(u32, u32)>,
) -> ApiResult<Negotiated<PointSummary>> {
    let (city_id, point_id) = point_path(path);
    let point = state
        .points_of_interest
        .get_point(city_id, point_id)
        .await?;
    Ok(Negotiated::ok("pointOfInterest", point))
}

/// Create a point of interest in a city.
#[utoipa::path(
    post,
    path = "/api/cities/{cityId}/pointsofinterest",
    params(("cityId" = u32, Path, description = "City identifier")),
    request_body = ResourceInputSchema,
    responses(
        (
            status = 201,
            description = "Point of interest created",
            headers(("Location" = String, description = "URL of the new point of interest")),
            body = PointSummarySchema
        ),
        (status = 400, description = "Validation failed", body = ErrorSchema),
        (status = 404, description = "City not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["points of interest"],
    operation_id = "createPointOfInterest"
)]
#[post("/cities/{cityId}/pointsofinterest")]
pub async fn create_point(
    state: web::Data<HttpState>,
    path: web::Path<u32>,
    payload: web::Json<PointCreateInput>,
) -> ApiResult<Negotiated<PointSummary>> {
    let city_id = CityId::new(path.into_inner());
    let point = state
        .points_of_interest
        .create_point(city_id, payload.into_inner())
        .await?;
    let location = format!("/api/cities/{city_id}/pointsofinterest/{}", point.id);
    Ok(Negotiated::ok("pointOfInterest", point).created(location))
}

/// Replace every mutable field of a point of interest.
#[utoipa::path(
    put,
    path = "/api/cities/{cityId}/pointsofinterest/{id}",
    params(
        ("cityId" = u32, Path, description = "City identifier"),
        ("id" = u32, Path, description = "Point-of-interest identifier")
    ),
    request_body = ResourceInputSchema,
    responses(
        (status = 204, description = "Point of interest updated"),
        (status = 400, description = "Validation failed", body = ErrorSchema),
        (status = 404, description = "City or point of interest not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["points of interest"],
    operation_id = "updatePointOfInterest"
)]
#[put("/cities/{cityId}/pointsofinterest/{id}")]
pub async fn update_point(
    state: web::Data<HttpState>,
    path: web::Path<(u32, u32)>,
    payload: web::Json<PointUpdateInput>,
) -> ApiResult<HttpResponse> {
    let (city_id, point_id) = point_path(path);
    state
        .points_of_interest
        .update_point(city_id, point_id, payload.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Apply a JSON Patch document to a point of interest.
#[utoipa::path(
    patch,
    path = "/api/cities/{cityId}/pointsofinterest/{id}",
    params(
        ("cityId" = u32, Path, description = "City identifier"),
        ("id" = u32, Path, description = "Point-of-interest identifier")
    ),
    request_body(
        content = [PatchOperationSchema],
        content_type = "application/json-patch+json"
    ),
    responses(
        (status = 204, description = "Point of interest patched"),
        (status = 400, description = "Malformed patch or validation failed", body = ErrorSchema),
        (status = 404, description = "City or point of interest not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["points of interest"],
    operation_id = "patchPointOfInterest"
)]
#[patch("/cities/{cityId}/pointsofinterest/{id}")]
pub async fn patch_point(
    state: web::Data<HttpState>,
    path: web::Path<(u32, u32)>,
    payload: web::Json<PatchDocument>,
) -> ApiResult<HttpResponse> {
    let (city_id, point_id) = point_path(path);
    state
        .points_of_interest
        .patch_point(city_id, point_id, &payload)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Delete a point of interest.
#[utoipa::path(
    delete,
    path = "/api/cities/{cityId}/pointsofinterest/{id}",
    params(
        ("cityId" = u32, Path, description = "City identifier"),
        ("id" = u32, Path, description = "Point-of-interest identifier")
    ),
    responses(
        (status = 204, description = "Point of interest deleted"),
        (status = 404, description = "City or point of interest not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["points of interest"],
    operation_id = "deletePointOfInterest"
)]
#[delete("/cities/{cityId}/pointsofinterest/{id}")]
pub async fn delete_point(
    state: web::Data<HttpState>,
    path: web::Path<(u32, u32)>,
) -> ApiResult<HttpResponse> {
    let (city_id, point_id) = point_path(path);
    state
        .points_of_interest
        .delete_point(city_id, point_id)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
