//! HTTP server configuration object and helpers.

use site_backend::domain::{BypassPolicy, ServiceArea};
use site_backend::outbound::persistence::DbPool;
use std::net::SocketAddr;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) policy: BypassPolicy,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) seed_areas: Vec<ServiceArea>,
}

impl ServerConfig {
    /// Construct a configuration that serves from the in-memory store.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, policy: BypassPolicy) -> Self {
        Self {
            bind_addr,
            policy,
            db_pool: None,
            seed_areas: Vec::new(),
        }
    }

    /// Attach a database connection pool.
    ///
    /// When provided, both stores are backed by PostgreSQL and seed areas are
    /// ignored.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Service areas to preload into the in-memory store.
    #[must_use]
    pub fn with_seed_areas(mut self, areas: Vec<ServiceArea>) -> Self {
        self.seed_areas = areas;
        self
    }
}
