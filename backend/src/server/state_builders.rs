//! Builders wiring store adapters into the HTTP state.

use std::sync::Arc;

use tracing::info;

use site_backend::domain::ports::{DomainMappingRepository, ServiceAreaRepository};
use site_backend::domain::{BypassPolicy, DomainMappingAdminService, DomainResolutionService};
use site_backend::inbound::http::state::HttpState;
use site_backend::outbound::memory::InMemorySiteStore;
use site_backend::outbound::persistence::{
    DieselDomainMappingRepository, DieselServiceAreaRepository,
};

use super::ServerConfig;

/// Wire the resolver and the admin service over one pair of stores.
fn wire<M, A>(mappings: Arc<M>, areas: Arc<A>, policy: BypassPolicy) -> HttpState
where
    M: DomainMappingRepository + 'static,
    A: ServiceAreaRepository + 'static,
{
    let admin = Arc::new(DomainMappingAdminService::new(
        mappings.clone(),
        areas.clone(),
    ));
    let resolution = Arc::new(DomainResolutionService::new(mappings, areas, policy));
    HttpState::new(resolution, admin.clone(), admin)
}

/// Build handler state from the server configuration.
///
/// PostgreSQL adapters are used when a pool is configured; otherwise a fresh
/// in-memory store holding the seed areas backs both ports.
pub(super) fn build_http_state(config: &ServerConfig) -> HttpState {
    let policy = config.policy.clone();
    match &config.db_pool {
        Some(pool) => {
            info!("serving from PostgreSQL");
            wire(
                Arc::new(DieselDomainMappingRepository::new(pool.clone())),
                Arc::new(DieselServiceAreaRepository::new(pool.clone())),
                policy,
            )
        }
        None => {
            info!(
                service_areas = config.seed_areas.len(),
                "serving from the in-memory store"
            );
            let store = Arc::new(InMemorySiteStore::with_service_areas(
                config.seed_areas.iter().cloned(),
            ));
            wire(store.clone(), store, policy)
        }
    }
}
