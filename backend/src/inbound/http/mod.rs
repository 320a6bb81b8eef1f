//! HTTP inbound adapter exposing REST endpoints.

pub mod cities;
pub mod error;
pub mod health;
pub mod negotiation;
pub mod points_of_interest;
pub mod schemas;
pub mod state;

use actix_web::{Scope, web};

pub use error::ApiResult;

/// Resource routes mounted under `/api`, with extractor failures reported
/// through the JSON error payload.
///
/// The caller registers [`state::HttpState`] as app data.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use actix_web::{App, web};
/// use cityinfo::domain::ports::FixtureNotificationSink;
/// use cityinfo::inbound::http::{api_scope, state::HttpState};
/// use cityinfo::outbound::persistence::InMemoryCityStore;
///
/// let state = HttpState::new(
///     Arc::new(InMemoryCityStore::new()),
///     Arc::new(FixtureNotificationSink),
/// );
/// let _app = App::new().app_data(web::Data::new(state)).service(api_scope());
/// ```
#[must_use]
pub fn api_scope() -> Scope {
    web::scope("/api")
        .app_data(error::json_config())
        .app_data(error::path_config())
        .app_data(error::query_config())
        .service(cities::list_cities)
        .service(cities::get_city)
        .service(cities::create_city)
        .service(cities::delete_city)
        .service(points_of_interest::list_points)
        .service(points_of_interest::get_point)
        .service(points_of_interest::create_point)
        .service(points_of_interest::update_point)
        .service(points_of_interest::patch_point)
        .service(points_of_interest::delete_point)
        .service(health::test_database)
}
