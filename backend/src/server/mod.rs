//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use cityinfo::Trace;
use cityinfo::bootstrap::seed_cities_on_startup;
#[cfg(debug_assertions)]
use cityinfo::doc::ApiDoc;
use cityinfo::domain::ports::CityStore;
use cityinfo::inbound::http::api_scope;
use cityinfo::inbound::http::health::{HealthState, live, ready};
use cityinfo::inbound::http::state::HttpState;
use cityinfo::outbound::notification::LocalMailService;
use cityinfo::outbound::persistence::InMemoryCityStore;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api_scope())
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Seed the store, then construct an Actix HTTP server.
///
/// Readiness flips to 200 only after seeding finished and the listener is
/// bound.
///
/// # Errors
/// Returns [`std::io::Error`] when seeding fails or when binding the socket
/// fails.
pub async fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let store: Arc<dyn CityStore> = Arc::new(InMemoryCityStore::new());
    seed_cities_on_startup(&config.settings, Arc::clone(&store))
        .await
        .map_err(std::io::Error::other)?;

    let ServerConfig {
        bind_addr, mail, ..
    } = config;
    let http_state = web::Data::new(HttpState::new(
        store,
        Arc::new(LocalMailService::new(mail)),
    ));

    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
