//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{DomainMappingsCommand, DomainMappingsQuery, DomainResolutionQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub resolution: Arc<dyn DomainResolutionQuery>,
    pub mappings: Arc<dyn DomainMappingsCommand>,
    pub mappings_query: Arc<dyn DomainMappingsQuery>,
}

impl HttpState {
    /// Construct state from port implementations.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use site_backend::domain::{
    ///     BypassPolicy, DomainMappingAdminService, DomainResolutionService,
    /// };
    /// use site_backend::inbound::http::state::HttpState;
    /// use site_backend::outbound::memory::InMemorySiteStore;
    ///
    /// let store = Arc::new(InMemorySiteStore::new());
    /// let admin = Arc::new(DomainMappingAdminService::new(store.clone(), store.clone()));
    /// let state = HttpState::new(
    ///     Arc::new(DomainResolutionService::new(
    ///         store.clone(),
    ///         store,
    ///         BypassPolicy::default(),
    ///     )),
    ///     admin.clone(),
    ///     admin,
    /// );
    /// let _resolution = state.resolution.clone();
    /// ```
    pub fn new(
        resolution: Arc<dyn DomainResolutionQuery>,
        mappings: Arc<dyn DomainMappingsCommand>,
        mappings_query: Arc<dyn DomainMappingsQuery>,
    ) -> Self {
        Self {
            resolution,
            mappings,
            mappings_query,
        }
    }
}
