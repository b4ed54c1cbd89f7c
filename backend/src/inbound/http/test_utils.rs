//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use crate::domain::ports::DomainResolutionQuery;
use crate::domain::{
    BypassPolicy, DomainMappingAdminService, DomainResolutionService, ServiceArea, ServiceAreaId,
};
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::InMemorySiteStore;

/// Service area with a random id.
pub fn area(name: &str, is_main_address: bool) -> ServiceArea {
    ServiceArea {
        id: ServiceAreaId::random(),
        name: name.to_owned(),
        is_main_address,
        address: None,
    }
}

/// Handler state wired to real services over one in-memory store.
pub fn memory_state(store: Arc<InMemorySiteStore>) -> HttpState {
    let admin = Arc::new(DomainMappingAdminService::new(store.clone(), store.clone()));
    let resolution = Arc::new(DomainResolutionService::new(
        store.clone(),
        store,
        BypassPolicy::default(),
    ));
    HttpState::new(resolution, admin.clone(), admin)
}

/// Memory-backed state whose resolver is replaced by `resolution`.
pub fn state_with_resolution(resolution: impl DomainResolutionQuery + 'static) -> HttpState {
    let mut state = memory_state(Arc::new(InMemorySiteStore::new()));
    state.resolution = Arc::new(resolution);
    state
}
