//! Backend entry-point: loads settings, wires adapters into services, starts
//! the notification dispatcher and serves the REST API.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{
    ServerConfig, StartupError, build_dispatcher, build_http_state, create_server, system_clock,
};
use ward_rounds::config::WardSettings;
use ward_rounds::inbound::http::health::HealthState;
use ward_rounds::outbound::persistence::{DbPool, PoolConfig};

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

    let settings = WardSettings::load_from_iter(std::env::args_os())
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;

    let health_state = web::Data::new(HealthState::new());
    let config = bootstrap(&settings).await.map_err(std::io::Error::other)?;
    let server = create_server(health_state.clone(), config)?;
    let result = server.await;
    health_state.mark_unhealthy();
    result
}

async fn bootstrap(settings: &WardSettings) -> Result<ServerConfig, StartupError> {
    let bind_addr = settings.bind_addr()?;
    let pool_config = PoolConfig::new(settings.database_url()?)
        .with_max_size(settings.db_max_connections());
    let pool = DbPool::new(pool_config).await?;
    let clock = system_clock();

    let http_state = build_http_state(&pool, settings, clock.clone())?;
    if let Some(dispatcher) = build_dispatcher(&pool, settings, clock)? {
        actix_web::rt::spawn(dispatcher.run());
    }

    info!(%bind_addr, "starting ward-rounds backend");
    Ok(ServerConfig::new(bind_addr, http_state))
}
