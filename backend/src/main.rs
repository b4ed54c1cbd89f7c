//! Backend entry-point: loads settings, prepares the stores and serves the
//! resolution and admin APIs.

mod server;

use std::path::Path;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use site_backend::domain::ServiceArea;
use site_backend::inbound::http::health::HealthState;
use site_backend::outbound::memory::InMemorySiteStore;
use site_backend::outbound::persistence::{DbPool, run_pending_migrations};
use site_backend::settings::AppSettings;

fn load_seed_areas(path: &Path) -> Result<Vec<ServiceArea>> {
    let raw = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("reading service area seed {}", path.display()))?;
    InMemorySiteStore::parse_seed(&raw)
        .wrap_err_with(|| format!("parsing service area seed {}", path.display()))
}

async fn build_config(settings: &AppSettings) -> Result<ServerConfig> {
    let bind_addr = settings
        .bind_addr()
        .wrap_err("SITE_BIND_ADDR must be a socket address")?;
    let config = ServerConfig::new(bind_addr, settings.bypass_policy());

    let Some(pool_config) = settings.pool_config() else {
        let seed = match &settings.service_areas_seed {
            Some(path) => load_seed_areas(path)?,
            None => Vec::new(),
        };
        warn!("no database configured; mappings will not survive a restart");
        return Ok(config.with_seed_areas(seed));
    };

    if settings.run_migrations() {
        let applied = run_pending_migrations(pool_config.database_url())
            .await
            .wrap_err("applying database migrations")?;
        info!(applied, "database migrations complete");
    }
    let pool = DbPool::new(pool_config)
        .await
        .wrap_err("building database pool")?;
    Ok(config.with_db_pool(pool))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().wrap_err("loading settings")?;
    let config = build_config(&settings).await?;
    let bind_addr = config.bind_addr;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    info!(%bind_addr, "site backend listening");
    server.await?;
    health_state.mark_unhealthy();
    Ok(())
}
