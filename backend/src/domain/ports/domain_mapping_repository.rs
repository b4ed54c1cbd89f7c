//! Port for the Mapping Store: persisted hostname redirect rules.
//!
//! The resolver only reads through [`DomainMappingRepository::find_by_domain`].
//! The admin service uses the remaining operations to maintain the table.

use async_trait::async_trait;

use crate::domain::{DomainMapping, DomainMappingDraft, DomainMappingId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by domain mapping repository adapters.
    pub enum DomainMappingRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "domain mapping repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "domain mapping repository query failed: {message}",
        /// Another mapping already uses the domain.
        DuplicateDomain { domain: String } =>
            "domain is already mapped: {domain}",
        /// The referenced service area does not exist.
        UnknownServiceArea { service_area_id: String } =>
            "service area does not exist: {service_area_id}",
    }
}

/// Storage contract for [`DomainMapping`] records.
///
/// Domains are compared byte-for-byte, so `Example.com` and `example.com`
/// are distinct keys.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DomainMappingRepository: Send + Sync {
    /// Fetch the mapping whose domain equals `domain` exactly.
    ///
    /// When legacy data holds more than one row for a domain, the oldest
    /// record (then lowest id) is returned.
    async fn find_by_domain(
        &self,
        domain: &str,
    ) -> Result<Option<DomainMapping>, DomainMappingRepositoryError>;

    /// Fetch a mapping by identifier.
    async fn find_by_id(
        &self,
        id: &DomainMappingId,
    ) -> Result<Option<DomainMapping>, DomainMappingRepositoryError>;

    /// List every mapping ordered by domain.
    async fn list(&self) -> Result<Vec<DomainMapping>, DomainMappingRepositoryError>;

    /// Insert a new mapping, assigning its identifier and timestamps.
    async fn create(
        &self,
        draft: &DomainMappingDraft,
    ) -> Result<DomainMapping, DomainMappingRepositoryError>;

    /// Replace the fields of an existing mapping.
    ///
    /// Returns `Ok(None)` when no mapping has the given id.
    async fn update(
        &self,
        id: &DomainMappingId,
        draft: &DomainMappingDraft,
    ) -> Result<Option<DomainMapping>, DomainMappingRepositoryError>;

    /// Remove a mapping. Returns `Ok(false)` when it did not exist.
    async fn delete(&self, id: &DomainMappingId) -> Result<bool, DomainMappingRepositoryError>;
}

/// Fixture repository holding no mappings and discarding writes.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureDomainMappingRepository;

#[async_trait]
impl DomainMappingRepository for FixtureDomainMappingRepository {
    async fn find_by_domain(
        &self,
        _domain: &str,
    ) -> Result<Option<DomainMapping>, DomainMappingRepositoryError> {
        Ok(None)
    }

    async fn find_by_id(
        &self,
        _id: &DomainMappingId,
    ) -> Result<Option<DomainMapping>, DomainMappingRepositoryError> {
        Ok(None)
    }

    async fn list(&self) -> Result<Vec<DomainMapping>, DomainMappingRepositoryError> {
        Ok(Vec::new())
    }

    async fn create(
        &self,
        draft: &DomainMappingDraft,
    ) -> Result<DomainMapping, DomainMappingRepositoryError> {
        let now = chrono::Utc::now();
        Ok(DomainMapping {
            id: DomainMappingId::random(),
            domain: draft.domain.clone(),
            redirect_to: draft.redirect_to.clone(),
            service_area_id: draft.service_area_id,
            created_at: now,
            updated_at: now,
        })
    }

    async fn update(
        &self,
        _id: &DomainMappingId,
        _draft: &DomainMappingDraft,
    ) -> Result<Option<DomainMapping>, DomainMappingRepositoryError> {
        Ok(None)
    }

    async fn delete(&self, _id: &DomainMappingId) -> Result<bool, DomainMappingRepositoryError> {
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn fixture_repository_finds_nothing() {
        let repo = FixtureDomainMappingRepository;
        assert!(
            repo.find_by_domain("collingwoodplumbing.com")
                .await
                .expect("lookup succeeds")
                .is_none()
        );
        assert!(repo.list().await.expect("list succeeds").is_empty());
        assert!(
            !repo
                .delete(&DomainMappingId::random())
                .await
                .expect("delete succeeds")
        );
    }

    #[rstest]
    fn duplicate_domain_error_names_the_domain() {
        let err = DomainMappingRepositoryError::duplicate_domain("test.com");
        assert_eq!(err.to_string(), "domain is already mapped: test.com");
    }
}
