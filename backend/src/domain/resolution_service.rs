//! Resolution service implementing [`DomainResolutionQuery`] over the stores.
//!
//! At most two sequential store calls are made per resolution: the mapping
//! lookup, then the area search only when the mapping lookup missed. Store
//! failures are logged and treated as "no match" so a broken database never
//! blocks a page from rendering.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::ports::{DomainMappingRepository, DomainResolutionQuery, ServiceAreaRepository};
use crate::domain::{BypassPolicy, ResolutionGuard, ResolutionTarget, derive_area_candidate};

/// Domain service resolving hostnames against the Mapping Store and the
/// Service Area Directory.
#[derive(Clone)]
pub struct DomainResolutionService<M, A> {
    mappings: Arc<M>,
    areas: Arc<A>,
    policy: BypassPolicy,
}

impl<M, A> DomainResolutionService<M, A> {
    /// Create a service over the given stores.
    pub fn new(mappings: Arc<M>, areas: Arc<A>, policy: BypassPolicy) -> Self {
        Self {
            mappings,
            areas,
            policy,
        }
    }
}

impl<M, A> DomainResolutionService<M, A>
where
    M: DomainMappingRepository,
    A: ServiceAreaRepository,
{
    async fn explicit_target(&self, hostname: &str) -> Option<ResolutionTarget> {
        match self.mappings.find_by_domain(hostname).await {
            Ok(found) => found.as_ref().map(ResolutionTarget::explicit),
            Err(error) => {
                warn!(%hostname, %error, "domain mapping lookup failed; continuing without redirect");
                None
            }
        }
    }

    async fn heuristic_target(&self, hostname: &str) -> Option<ResolutionTarget> {
        let candidate = derive_area_candidate(hostname)?;
        match self.areas.search_by_name_substring(&candidate, true).await {
            Ok(found) => found.as_ref().map(ResolutionTarget::heuristic),
            Err(error) => {
                warn!(%hostname, %candidate, %error, "service area search failed; continuing without redirect");
                None
            }
        }
    }
}

#[async_trait]
impl<M, A> DomainResolutionQuery for DomainResolutionService<M, A>
where
    M: DomainMappingRepository,
    A: ServiceAreaRepository,
{
    async fn resolve(&self, hostname: &str, guard: &ResolutionGuard) -> Option<ResolutionTarget> {
        if guard.is_spent() {
            debug!(%hostname, "redirect already issued for this load");
            return None;
        }
        if self.policy.is_bypassed(hostname) {
            debug!(%hostname, "hostname bypasses resolution");
            return None;
        }

        let target = match self.explicit_target(hostname).await {
            Some(target) => target,
            None => self.heuristic_target(hostname).await?,
        };

        if guard.claim() {
            debug!(%hostname, kind = target.kind.as_str(), path = %target.path, "hostname resolved");
            Some(target)
        } else {
            debug!(%hostname, "discarding stale resolution result");
            None
        }
    }
}

#[cfg(test)]
#[path = "resolution_service_tests.rs"]
mod tests;
