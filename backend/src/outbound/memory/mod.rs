//! In-memory store implementing both store ports.
//!
//! Used when no database URL is configured and by the behaviour suites. It
//! enforces the same rules as the PostgreSQL schema: one mapping per domain,
//! and a mapping may only reference an existing service area.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;

use crate::domain::ports::{
    DomainMappingRepository, DomainMappingRepositoryError, ServiceAreaRepository,
    ServiceAreaRepositoryError,
};
use crate::domain::resolution::{best_area_match, mapping_precedence};
use crate::domain::{
    DomainMapping, DomainMappingDraft, DomainMappingId, ServiceArea, ServiceAreaId,
};

const POISONED: &str = "in-memory store lock poisoned";

/// Service area entry as written in a seed file.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceAreaSeed {
    /// Place name.
    pub name: String,
    /// Marks the primary business address.
    #[serde(default)]
    pub is_main_address: bool,
    /// Optional postal address.
    #[serde(default)]
    pub address: Option<String>,
}

impl From<ServiceAreaSeed> for ServiceArea {
    fn from(seed: ServiceAreaSeed) -> Self {
        Self {
            id: ServiceAreaId::random(),
            name: seed.name,
            is_main_address: seed.is_main_address,
            address: seed.address,
        }
    }
}

/// Process-local Mapping Store and Service Area Directory.
#[derive(Debug, Default)]
pub struct InMemorySiteStore {
    mappings: RwLock<HashMap<DomainMappingId, DomainMapping>>,
    areas: RwLock<Vec<ServiceArea>>,
}

impl InMemorySiteStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `areas`.
    pub fn with_service_areas(areas: impl IntoIterator<Item = ServiceArea>) -> Self {
        Self {
            mappings: RwLock::default(),
            areas: RwLock::new(areas.into_iter().collect()),
        }
    }

    /// Parse a JSON array of [`ServiceAreaSeed`] entries.
    pub fn parse_seed(json: &str) -> Result<Vec<ServiceArea>, serde_json::Error> {
        let seeds: Vec<ServiceAreaSeed> = serde_json::from_str(json)?;
        Ok(seeds.into_iter().map(ServiceArea::from).collect())
    }

    /// Add a service area, returning its identifier.
    pub fn add_service_area(
        &self,
        area: ServiceArea,
    ) -> Result<ServiceAreaId, ServiceAreaRepositoryError> {
        let id = area.id;
        self.areas
            .write()
            .map_err(|_| ServiceAreaRepositoryError::query(POISONED))?
            .push(area);
        Ok(id)
    }

    fn area_exists(&self, id: ServiceAreaId) -> Result<bool, DomainMappingRepositoryError> {
        let areas = self
            .areas
            .read()
            .map_err(|_| DomainMappingRepositoryError::query(POISONED))?;
        Ok(areas.iter().any(|area| area.id == id))
    }

    /// Check the draft against the store's integrity rules.
    fn check_draft(
        &self,
        mappings: &HashMap<DomainMappingId, DomainMapping>,
        draft: &DomainMappingDraft,
        own_id: Option<DomainMappingId>,
    ) -> Result<(), DomainMappingRepositoryError> {
        let taken = mappings
            .values()
            .any(|mapping| mapping.domain == draft.domain && Some(mapping.id) != own_id);
        if taken {
            return Err(DomainMappingRepositoryError::duplicate_domain(draft.domain.as_ref()));
        }
        if let Some(area_id) = draft.service_area_id {
            if !self.area_exists(area_id)? {
                return Err(DomainMappingRepositoryError::unknown_service_area(
                    area_id.to_string(),
                ));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl DomainMappingRepository for InMemorySiteStore {
    async fn find_by_domain(
        &self,
        domain: &str,
    ) -> Result<Option<DomainMapping>, DomainMappingRepositoryError> {
        let mappings = self
            .mappings
            .read()
            .map_err(|_| DomainMappingRepositoryError::query(POISONED))?;
        Ok(mappings
            .values()
            .filter(|mapping| mapping.domain.as_ref() == domain)
            .min_by(|a, b| mapping_precedence(a, b))
            .cloned())
    }

    async fn find_by_id(
        &self,
        id: &DomainMappingId,
    ) -> Result<Option<DomainMapping>, DomainMappingRepositoryError> {
        let mappings = self
            .mappings
            .read()
            .map_err(|_| DomainMappingRepositoryError::query(POISONED))?;
        Ok(mappings.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<DomainMapping>, DomainMappingRepositoryError> {
        let mappings = self
            .mappings
            .read()
            .map_err(|_| DomainMappingRepositoryError::query(POISONED))?;
        let mut listed: Vec<DomainMapping> = mappings.values().cloned().collect();
        listed.sort_by(|a, b| {
            a.domain
                .as_ref()
                .cmp(b.domain.as_ref())
                .then_with(|| mapping_precedence(a, b))
        });
        Ok(listed)
    }

    async fn create(
        &self,
        draft: &DomainMappingDraft,
    ) -> Result<DomainMapping, DomainMappingRepositoryError> {
        let mut mappings = self
            .mappings
            .write()
            .map_err(|_| DomainMappingRepositoryError::query(POISONED))?;
        self.check_draft(&mappings, draft, None)?;

        let now = Utc::now();
        let mapping = DomainMapping {
            id: DomainMappingId::random(),
            domain: draft.domain.clone(),
            redirect_to: draft.redirect_to.clone(),
            service_area_id: draft.service_area_id,
            created_at: now,
            updated_at: now,
        };
        mappings.insert(mapping.id, mapping.clone());
        Ok(mapping)
    }

    async fn update(
        &self,
        id: &DomainMappingId,
        draft: &DomainMappingDraft,
    ) -> Result<Option<DomainMapping>, DomainMappingRepositoryError> {
        let mut mappings = self
            .mappings
            .write()
            .map_err(|_| DomainMappingRepositoryError::query(POISONED))?;
        if !mappings.contains_key(id) {
            return Ok(None);
        }
        self.check_draft(&mappings, draft, Some(*id))?;

        let Some(existing) = mappings.get_mut(id) else {
            return Ok(None);
        };
        existing.domain = draft.domain.clone();
        existing.redirect_to = draft.redirect_to.clone();
        existing.service_area_id = draft.service_area_id;
        existing.updated_at = Utc::now();
        Ok(Some(existing.clone()))
    }

    async fn delete(&self, id: &DomainMappingId) -> Result<bool, DomainMappingRepositoryError> {
        let mut mappings = self
            .mappings
            .write()
            .map_err(|_| DomainMappingRepositoryError::query(POISONED))?;
        Ok(mappings.remove(id).is_some())
    }
}

#[async_trait]
impl ServiceAreaRepository for InMemorySiteStore {
    async fn search_by_name_substring(
        &self,
        candidate: &str,
        exclude_main_address: bool,
    ) -> Result<Option<ServiceArea>, ServiceAreaRepositoryError> {
        let areas = self
            .areas
            .read()
            .map_err(|_| ServiceAreaRepositoryError::query(POISONED))?;
        Ok(best_area_match(areas.iter(), candidate, exclude_main_address).cloned())
    }

    async fn list(&self) -> Result<Vec<ServiceArea>, ServiceAreaRepositoryError> {
        let areas = self
            .areas
            .read()
            .map_err(|_| ServiceAreaRepositoryError::query(POISONED))?;
        let mut listed = areas.clone();
        listed.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(listed)
    }
}
