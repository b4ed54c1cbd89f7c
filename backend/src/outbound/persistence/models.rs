//! Internal Diesel row structs for database operations.
//!
//! These types never leave the persistence layer. Conversions into domain
//! types validate stored values so a hand-edited row cannot smuggle an
//! invalid domain or path into the resolver.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{
    DomainMapping, DomainMappingDraft, DomainMappingId, DomainName, RedirectPath, ServiceArea,
    ServiceAreaId,
};

use super::schema::{domain_mappings, service_areas};

/// Row struct for reading from the domain_mappings table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = domain_mappings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct DomainMappingRow {
    pub id: Uuid,
    pub domain: String,
    pub redirect_to: String,
    pub service_area_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<DomainMappingRow> for DomainMapping {
    type Error = String;

    fn try_from(row: DomainMappingRow) -> Result<Self, Self::Error> {
        let domain = DomainName::new(&row.domain)
            .map_err(|err| format!("stored mapping {} has invalid domain: {err}", row.id))?;
        let redirect_to = RedirectPath::new(&row.redirect_to)
            .map_err(|err| format!("stored mapping {} has invalid redirect: {err}", row.id))?;
        Ok(Self {
            id: DomainMappingId::from_uuid(row.id),
            domain,
            redirect_to,
            service_area_id: row.service_area_id.map(ServiceAreaId::from_uuid),
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Insertable struct for creating domain mappings.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = domain_mappings)]
pub(crate) struct NewDomainMappingRow<'a> {
    pub id: Uuid,
    pub domain: &'a str,
    pub redirect_to: &'a str,
    pub service_area_id: Option<Uuid>,
}

impl<'a> NewDomainMappingRow<'a> {
    pub(crate) fn from_draft(id: Uuid, draft: &'a DomainMappingDraft) -> Self {
        Self {
            id,
            domain: draft.domain.as_ref(),
            redirect_to: draft.redirect_to.as_ref(),
            service_area_id: draft.service_area_id.map(|area| *area.as_uuid()),
        }
    }
}

/// Changeset for replacing a mapping's editable fields.
///
/// `treat_none_as_null` lets an update clear the service area link.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = domain_mappings, treat_none_as_null = true)]
pub(crate) struct DomainMappingUpdate<'a> {
    pub domain: &'a str,
    pub redirect_to: &'a str,
    pub service_area_id: Option<Uuid>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> DomainMappingUpdate<'a> {
    pub(crate) fn from_draft(draft: &'a DomainMappingDraft, updated_at: DateTime<Utc>) -> Self {
        Self {
            domain: draft.domain.as_ref(),
            redirect_to: draft.redirect_to.as_ref(),
            service_area_id: draft.service_area_id.map(|area| *area.as_uuid()),
            updated_at,
        }
    }
}

/// Row struct for reading from the service_areas table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = service_areas)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ServiceAreaRow {
    pub id: Uuid,
    pub name: String,
    pub is_main_address: bool,
    pub address: Option<String>,
}

impl From<ServiceAreaRow> for ServiceArea {
    fn from(row: ServiceAreaRow) -> Self {
        Self {
            id: ServiceAreaId::from_uuid(row.id),
            name: row.name,
            is_main_address: row.is_main_address,
            address: row.address,
        }
    }
}
