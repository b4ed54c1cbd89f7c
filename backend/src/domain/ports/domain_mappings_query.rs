//! Driving port for Admin Editor reads.

use async_trait::async_trait;

use crate::domain::{DomainMapping, Error, ServiceArea};

/// Use-case port backing the admin listing screens.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DomainMappingsQuery: Send + Sync {
    /// Every mapping, ordered by domain.
    async fn list_mappings(&self) -> Result<Vec<DomainMapping>, Error>;

    /// Every service area, ordered by name, for the mapping form's select box.
    async fn list_service_areas(&self) -> Result<Vec<ServiceArea>, Error>;
}
