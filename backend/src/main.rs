//! Service entry-point: loads configuration, seeds the store and serves the
//! REST API.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use cityinfo::bootstrap::CityInfoSettings;
use cityinfo::inbound::http::health::HealthState;

use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = CityInfoSettings::load().map_err(std::io::Error::other)?;
    let config = ServerConfig::new(settings);
    info!(bind_addr = %config.bind_addr(), "starting city info service");

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config).await?;
    server.await
}
