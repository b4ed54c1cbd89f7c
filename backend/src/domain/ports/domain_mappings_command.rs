//! Driving port for Admin Editor writes.

use async_trait::async_trait;

use crate::domain::{DomainMapping, DomainMappingDraft, DomainMappingId, Error};

/// Use-case port for creating, editing and removing domain mappings.
///
/// Implementations reject a draft whose domain is already used by another
/// mapping with a `conflict` error and report unknown ids as `not_found`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DomainMappingsCommand: Send + Sync {
    /// Persist a new mapping.
    async fn create_mapping(&self, draft: DomainMappingDraft) -> Result<DomainMapping, Error>;

    /// Replace an existing mapping.
    async fn update_mapping(
        &self,
        id: DomainMappingId,
        draft: DomainMappingDraft,
    ) -> Result<DomainMapping, Error>;

    /// Delete a mapping.
    async fn delete_mapping(&self, id: DomainMappingId) -> Result<(), Error>;
}
