//! City HTTP handlers.
//!
//! ```text
//! GET    /api/cities
//! GET    /api/cities/{cityId}?includePointsOfInterest=bool
//! POST   /api/cities
//! DELETE /api/cities/{cityId}
//! ```

use actix_web::{HttpResponse, delete, get, post, web};
use serde::de::{self, Deserializer, Unexpected};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::{CityCreateInput, CityFull, CityId, CitySummary, CityView};
use crate::inbound::http::ApiResult;
use crate::inbound::http::negotiation::Negotiated;
use crate::inbound::http::schemas::{
    CityFullSchema, CitySummarySchema, ErrorSchema, ResourceInputSchema,
};
use crate::inbound::http::state::HttpState;

/// Query parameters for [`get_city`].
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct CityQuery {
    /// Include the city's points of interest.
    #[serde(default, deserialize_with = "flag")]
    pub include_points_of_interest: bool,
}

/// Parse a boolean query flag without regard to case, so `True` is accepted.
fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    if value.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if value.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(de::Error::invalid_value(
            Unexpected::Str(&value),
            &"`true` or `false`",
        ))
    }
}

/// List every city without its points of interest, ordered by name.
#[utoipa::path(
    get,
    path = "/api/cities",
    responses(
        (status = 200, description = "Cities ordered by name", body = [CitySummarySchema]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["cities"],
    operation_id = "listCities"
)]
#[get("/cities")]
pub async fn list_cities(state: web::Data<HttpState>) -> ApiResult<Negotiated<Vec<CitySummary>>> {
    let cities = state.cities.list_cities().await?;
    Ok(Negotiated::list("cities", "city", cities))
}

/// Fetch one city, optionally with its points of interest.
#[utoipa::path(
    get,
    path = "/api/cities/{cityId}",
    params(("cityId" = u32, Path, description = "City identifier"), CityQuery),
    responses(
        (
            status = 200,
            description = "City; `pointsOfInterest` is present only when requested",
            body = CityFullSchema
        ),
        (status = 404, description = "City not found", body = ErrorSchema)
    ),
    tags = ["cities"],
    operation_id = "getCity"
)]
#[get("/cities/{cityId}")]
pub async fn get_city(
    state: web::Data<HttpState>,
    path: web::Path<u32>,
    query: web::Query<CityQuery>,
) -> ApiResult<Negotiated<CityView>> {
    let city_id = CityId::new(path.into_inner());
    let view = state
        .cities
        .get_city(city_id, query.include_points_of_interest)
        .await?;
    Ok(Negotiated::ok("city", view))
}

/// Create a city.
#[utoipa::path(
    post,
    path = "/api/cities",
    request_body = ResourceInputSchema,
    responses(
        (
            status = 201,
            description = "City created",
            headers(("Location" = String, description = "URL of the new city")),
            body = CityFullSchema
        ),
        (status = 400, description = "Validation failed", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["cities"],
    operation_id = "createCity"
)]
#[post("/cities")]
pub async fn create_city(
    state: web::Data<HttpState>,
    payload: web::Json<CityCreateInput>,
) -> ApiResult<Negotiated<CityFull>> {
    let city = state.cities.create_city(payload.into_inner()).await?;
    let location = format!("/api/cities/{}", city.id);
    Ok(Negotiated::ok("city", city).created(location))
}

/// Delete a city together with its points of interest.
#[utoipa::path(
    delete,
    path = "/api/cities/{cityId}",
    params(("cityId" = u32, Path, description = "City identifier")),
    responses(
        (status = 204, description = "City deleted"),
        (status = 404, description = "City not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["cities"],
    operation_id = "deleteCity"
)]
#[delete("/cities/{cityId}")]
pub async fn delete_city(
    state: web::Data<HttpState>,
    path: web::Path<u32>,
) -> ApiResult<HttpResponse> {
    state
        .cities
        .delete_city(CityId::new(path.into_inner()))
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
