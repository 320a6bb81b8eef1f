//! Health endpoints: liveness and readiness probes for orchestration, plus
//! the store probe kept for operators.

use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, http::header, web};
use tracing::error;

use crate::inbound::http::state::HttpState;

/// Shared health state for readiness and liveness checks.
pub struct HealthState {
    ready: AtomicBool,
    live: AtomicBool,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            ready: AtomicBool::new(false),
            live: AtomicBool::new(true),
        }
    }
}

impl HealthState {
    /// Create a new health state starting as not ready but live.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the service as ready.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Flag the service as unhealthy so liveness checks fail fast during shutdown.
    pub fn mark_unhealthy(&self) {
        self.live.store(false, Ordering::Release);
    }

    /// Return readiness state.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Return liveness state.
    pub fn is_alive(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    fn probe_response(probe_ok: bool) -> HttpResponse {
        let mut response = if probe_ok {
            HttpResponse::Ok()
        } else {
            HttpResponse::ServiceUnavailable()
        };

        response
            .insert_header((header::CACHE_CONTROL, "no-store"))
            .finish()
    }
}

/// Readiness probe. 200 once startup seeding finished, 503 before.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    responses(
        (status = 200, description = "Server is ready to handle traffic"),
        (status = 503, description = "Server is not ready")
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    HealthState::probe_response(state.is_ready())
}

/// Liveness probe. 200 while the process is marked alive, 503 once draining.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    responses(
        (status = 200, description = "Server is alive"),
        (status = 503, description = "Server is shutting down")
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    HealthState::probe_response(state.is_alive())
}

/// Store probe. 200 when the city store answers, 500 otherwise.
#[utoipa::path(
    get,
    path = "/api/testdatabase",
    tags = ["health"],
    responses(
        (status = 200, description = "City store is reachable"),
        (status = 500, description = "City store failed")
    )
)]
#[get("/testdatabase")]
pub async fn test_database(state: web::Data<HttpState>) -> HttpResponse {
    match state.store.ping().await {
        Ok(()) => HttpResponse::Ok()
            .insert_header((header::CACHE_CONTROL, "no-store"))
            .finish(),
        Err(err) => {
            error!(error = %err, "city store probe failed");
            HttpResponse::InternalServerError()
                .insert_header((header::CACHE_CONTROL, "no-store"))
                .finish()
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use std::sync::Arc;

    use super::*;
    use crate::domain::ports::{CityStoreError, FixtureNotificationSink, MockCityStore};
    use actix_web::test as actix_test;
    use actix_web::{App, http::StatusCode};
    use rstest::rstest;

    #[rstest]
    #[case(false, StatusCode::SERVICE_UNAVAILABLE)]
    #[case(true, StatusCode::OK)]
    #[actix_web::test]
    async fn readiness_follows_state(#[case] mark_ready: bool, #[case] expected: StatusCode) {
        let health = web::Data::new(HealthState::new());
        if mark_ready {
            health.mark_ready();
        }
        let app = actix_test::init_service(App::new().app_data(health).service(ready)).await;

        let res = actix_test::call_service(&app, actix_test::TestRequest::get().uri("/health/ready").to_request())
            .await;

        assert_eq!(res.status(), expected);
        assert_eq!(
            res.headers()
                .get(header::CACHE_CONTROL)
                .and_then(|v| v.to_str().ok()),
            Some("no-store")
        );
    }

    #[actix_web::test]
    async fn liveness_fails_once_draining() {
        let health = web::Data::new(HealthState::new());
        health.mark_unhealthy();
        let app = actix_test::init_service(App::new().app_data(health).service(live)).await;

        let res = actix_test::call_service(&app, actix_test::TestRequest::get().uri("/health/live").to_request())
            .await;

        assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[rstest]
    #[case(true, StatusCode::OK)]
    #[case(false, StatusCode::INTERNAL_SERVER_ERROR)]
    #[actix_web::test]
    async fn store_probe_reports_store_health(#[case] healthy: bool, #[case] expected: StatusCode) {
        let mut store = MockCityStore::new();
        store.expect_ping().returning(move || {
            if healthy {
                Ok(())
            } else {
                Err(CityStoreError::connection("refused"))
            }
        });
        let state = web::Data::new(HttpState::new(
            Arc::new(store),
            Arc::new(FixtureNotificationSink),
        ));
        let app = actix_test::init_service(
            App::new()
                .app_data(state)
                .service(web::scope("/api").service(test_database)),
        )
        .await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/api/testdatabase").to_request(),
        )
        .await;

        assert_eq!(res.status(), expected);
    }
}
