//! Driving port for hostname resolution.
//!
//! Inbound adapters hand over the request hostname and a per-load
//! [`ResolutionGuard`]; the port answers with an optional navigation target.
//! Resolution never fails: store errors degrade to "no target".

use async_trait::async_trait;

use crate::domain::{ResolutionGuard, ResolutionTarget};

/// Use-case port turning a hostname into an optional redirect target.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DomainResolutionQuery: Send + Sync {
    /// Resolve `hostname` for the page load represented by `guard`.
    async fn resolve(&self, hostname: &str, guard: &ResolutionGuard) -> Option<ResolutionTarget>;
}

/// Resolver that never redirects.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureDomainResolutionQuery;

#[async_trait]
impl DomainResolutionQuery for FixtureDomainResolutionQuery {
    async fn resolve(&self, _hostname: &str, _guard: &ResolutionGuard) -> Option<ResolutionTarget> {
        None
    }
}
