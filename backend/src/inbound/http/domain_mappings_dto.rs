//! Domain mapping DTOs and parsing helpers.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{DomainMapping, DomainMappingDraft, DomainMappingId, Error, ServiceArea};
use crate::inbound::http::validation::{
    FieldName, mapping_validation_error, missing_field_error, parse_uuid,
};

#[derive(Debug, Deserialize)]
pub(super) struct MappingPath {
    pub(super) id: String,
}

/// Request payload for creating or replacing a domain mapping.
///
/// Example JSON:
/// `{"domain":"collingwoodplumbing.com","redirectTo":"/service-area/collingwood"}`
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DomainMappingRequest {
    #[schema(example = "collingwoodplumbing.com")]
    pub domain: Option<String>,
    #[schema(example = "/service-area/collingwood")]
    pub redirect_to: Option<String>,
    /// Empty string or `null` clears the link.
    pub service_area_id: Option<String>,
}

/// Response payload for a domain mapping.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DomainMappingResponse {
    pub id: String,
    pub domain: String,
    pub redirect_to: String,
    pub service_area_id: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Service area entry for the mapping form's select box.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceAreaResponse {
    pub id: String,
    pub name: String,
    pub is_main_address: bool,
    pub address: Option<String>,
    /// Path of the area's landing page, handy as a `redirectTo` value.
    #[schema(example = "/service-area/owen-sound")]
    pub landing_path: String,
}

impl From<DomainMapping> for DomainMappingResponse {
    fn from(mapping: DomainMapping) -> Self {
        Self {
            id: mapping.id.to_string(),
            domain: mapping.domain.into(),
            redirect_to: mapping.redirect_to.into(),
            service_area_id: mapping.service_area_id.map(|id| id.to_string()),
            created_at: mapping.created_at.to_rfc3339(),
            updated_at: mapping.updated_at.to_rfc3339(),
        }
    }
}

impl From<ServiceArea> for ServiceAreaResponse {
    fn from(area: ServiceArea) -> Self {
        let landing_path = area.landing_path();
        Self {
            id: area.id.to_string(),
            name: area.name,
            is_main_address: area.is_main_address,
            address: area.address,
            landing_path,
        }
    }
}

pub(super) fn parse_mapping_id(path: MappingPath) -> Result<DomainMappingId, Error> {
    parse_uuid(&path.id, FieldName::new("id")).map(DomainMappingId::from_uuid)
}

pub(super) fn parse_mapping_request(
    payload: DomainMappingRequest,
) -> Result<DomainMappingDraft, Error> {
    let domain = payload
        .domain
        .ok_or_else(|| missing_field_error(FieldName::new("domain")))?;
    let redirect_to = payload
        .redirect_to
        .ok_or_else(|| missing_field_error(FieldName::new("redirectTo")))?;
    DomainMappingDraft::parse(&domain, &redirect_to, payload.service_area_id.as_deref())
        .map_err(mapping_validation_error)
}
