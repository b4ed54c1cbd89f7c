//! Admin Editor service for domain mappings.
//!
//! Implements the admin driving ports on top of the Mapping Store and the
//! Service Area Directory. Drafts arrive already validated; this service adds
//! the rules that need the store: one mapping per domain and reporting
//! unknown ids.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::info;

use crate::domain::ports::{
    DomainMappingRepository, DomainMappingRepositoryError, DomainMappingsCommand,
    DomainMappingsQuery, ServiceAreaRepository, ServiceAreaRepositoryError,
};
use crate::domain::{DomainMapping, DomainMappingDraft, DomainMappingId, Error, ServiceArea};

/// Service backing the admin mapping endpoints.
#[derive(Clone)]
pub struct DomainMappingAdminService<M, A> {
    mappings: Arc<M>,
    areas: Arc<A>,
}

impl<M, A> DomainMappingAdminService<M, A> {
    /// Create a new service with the given repositories.
    pub fn new(mappings: Arc<M>, areas: Arc<A>) -> Self {
        Self { mappings, areas }
    }
}

impl<M, A> DomainMappingAdminService<M, A>
where
    M: DomainMappingRepository,
    A: ServiceAreaRepository,
{
    fn map_mapping_error(error: DomainMappingRepositoryError) -> Error {
        match error {
            DomainMappingRepositoryError::Connection { message } => Error::service_unavailable(
                format!("domain mapping repository unavailable: {message}"),
            ),
            DomainMappingRepositoryError::Query { message } => {
                Error::internal(format!("domain mapping repository error: {message}"))
            }
            DomainMappingRepositoryError::DuplicateDomain { domain } => Self::duplicate(&domain),
            DomainMappingRepositoryError::UnknownServiceArea { service_area_id } => {
                Error::invalid_request(format!("service area {service_area_id} does not exist"))
                    .with_details(json!({
                        "field": "serviceAreaId",
                        "code": "unknown_service_area",
                    }))
            }
        }
    }

    fn map_area_error(error: ServiceAreaRepositoryError) -> Error {
        match error {
            ServiceAreaRepositoryError::Connection { message } => Error::service_unavailable(
                format!("service area repository unavailable: {message}"),
            ),
            ServiceAreaRepositoryError::Query { message } => {
                Error::internal(format!("service area repository error: {message}"))
            }
        }
    }

    fn duplicate(domain: &str) -> Error {
        Error::conflict(format!("domain {domain} is already mapped")).with_details(json!({
            "field": "domain",
            "code": "duplicate_domain",
        }))
    }

    fn missing(id: DomainMappingId) -> Error {
        Error::not_found(format!("domain mapping {id} not found")).with_details(json!({
            "id": id.to_string(),
            "code": "mapping_not_found",
        }))
    }

    /// Fail with a conflict when a mapping other than `own_id` holds the
    /// draft's domain.
    async fn ensure_domain_available(
        &self,
        draft: &DomainMappingDraft,
        own_id: Option<DomainMappingId>,
    ) -> Result<(), Error> {
        let existing = self
            .mappings
            .find_by_domain(draft.domain.as_ref())
            .await
            .map_err(Self::map_mapping_error)?;
        match existing {
            Some(found) if Some(found.id) != own_id => Err(Self::duplicate(draft.domain.as_ref())),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl<M, A> DomainMappingsCommand for DomainMappingAdminService<M, A>
where
    M: DomainMappingRepository,
    A: ServiceAreaRepository,
{
    async fn create_mapping(&self, draft: DomainMappingDraft) -> Result<DomainMapping, Error> {
        self.ensure_domain_available(&draft, None).await?;
        let created = self
            .mappings
            .create(&draft)
            .await
            .map_err(Self::map_mapping_error)?;
        info!(id = %created.id, domain = %created.domain, "domain mapping created");
        Ok(created)
    }

    async fn update_mapping(
        &self,
        id: DomainMappingId,
        draft: DomainMappingDraft,
    ) -> Result<DomainMapping, Error> {
        self.mappings
            .find_by_id(&id)
            .await
            .map_err(Self::map_mapping_error)?
            .ok_or_else(|| Self::missing(id))?;
        self.ensure_domain_available(&draft, Some(id)).await?;
        let updated = self
            .mappings
            .update(&id, &draft)
            .await
            .map_err(Self::map_mapping_error)?
            .ok_or_else(|| Self::missing(id))?;
        info!(%id, domain = %updated.domain, "domain mapping updated");
        Ok(updated)
    }

    async fn delete_mapping(&self, id: DomainMappingId) -> Result<(), Error> {
        let deleted = self
            .mappings
            .delete(&id)
            .await
            .map_err(Self::map_mapping_error)?;
        if !deleted {
            return Err(Self::missing(id));
        }
        info!(%id, "domain mapping deleted");
        Ok(())
    }
}

#[async_trait]
impl<M, A> DomainMappingsQuery for DomainMappingAdminService<M, A>
where
    M: DomainMappingRepository,
    A: ServiceAreaRepository,
{
    async fn list_mappings(&self) -> Result<Vec<DomainMapping>, Error> {
        self.mappings.list().await.map_err(Self::map_mapping_error)
    }

    async fn list_service_areas(&self) -> Result<Vec<ServiceArea>, Error> {
        self.areas.list().await.map_err(Self::map_area_error)
    }
}

#[cfg(test)]
#[path = "domain_mapping_admin_service_tests.rs"]
mod tests;
