//! Admin Editor API handlers for domain mappings.
//!
//! ```text
//! GET    /api/v1/admin/domain-mappings
//! POST   /api/v1/admin/domain-mappings {"domain":"test.com","redirectTo":"/service-area/test"}
//! PUT    /api/v1/admin/domain-mappings/{id}
//! DELETE /api/v1/admin/domain-mappings/{id}
//! GET    /api/v1/admin/service-areas
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};

use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

#[path = "domain_mappings_dto.rs"]
mod dto;

pub use dto::{DomainMappingRequest, DomainMappingResponse, ServiceAreaResponse};
use dto::{MappingPath, parse_mapping_id, parse_mapping_request};

/// List every mapping ordered by domain.
#[utoipa::path(
    get,
    path = "/api/v1/admin/domain-mappings",
    responses(
        (status = 200, description = "Mappings", body = [DomainMappingResponse]),
        (status = 503, description = "Store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "listDomainMappings"
)]
#[get("/admin/domain-mappings")]
pub async fn list_domain_mappings(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<DomainMappingResponse>>> {
    let mappings = state.mappings_query.list_mappings().await?;
    Ok(web::Json(
        mappings
            .into_iter()
            .map(DomainMappingResponse::from)
            .collect(),
    ))
}

/// Create a mapping.
///
/// A domain may only be mapped once; a second mapping for the same domain is
/// rejected with `409 conflict`.
#[utoipa::path(
    post,
    path = "/api/v1/admin/domain-mappings",
    request_body = DomainMappingRequest,
    responses(
        (status = 201, description = "Mapping created", body = DomainMappingResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Domain already mapped", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "createDomainMapping"
)]
#[post("/admin/domain-mappings")]
pub async fn create_domain_mapping(
    state: web::Data<HttpState>,
    payload: web::Json<DomainMappingRequest>,
) -> ApiResult<HttpResponse> {
    let draft = parse_mapping_request(payload.into_inner())?;
    let created = state.mappings.create_mapping(draft).await?;
    Ok(HttpResponse::Created().json(DomainMappingResponse::from(created)))
}

/// Replace every field of an existing mapping.
#[utoipa::path(
    put,
    path = "/api/v1/admin/domain-mappings/{id}",
    params(("id" = String, Path, description = "Mapping identifier")),
    request_body = DomainMappingRequest,
    responses(
        (status = 200, description = "Mapping updated", body = DomainMappingResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Mapping not found", body = ErrorSchema),
        (status = 409, description = "Domain already mapped", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "updateDomainMapping"
)]
#[put("/admin/domain-mappings/{id}")]
pub async fn update_domain_mapping(
    state: web::Data<HttpState>,
    path: web::Path<MappingPath>,
    payload: web::Json<DomainMappingRequest>,
) -> ApiResult<web::Json<DomainMappingResponse>> {
    let id = parse_mapping_id(path.into_inner())?;
    let draft = parse_mapping_request(payload.into_inner())?;
    let updated = state.mappings.update_mapping(id, draft).await?;
    Ok(web::Json(DomainMappingResponse::from(updated)))
}

/// Delete a mapping.
#[utoipa::path(
    delete,
    path = "/api/v1/admin/domain-mappings/{id}",
    params(("id" = String, Path, description = "Mapping identifier")),
    responses(
        (status = 204, description = "Mapping deleted"),
        (status = 400, description = "Invalid identifier", body = ErrorSchema),
        (status = 404, description = "Mapping not found", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "deleteDomainMapping"
)]
#[delete("/admin/domain-mappings/{id}")]
pub async fn delete_domain_mapping(
    state: web::Data<HttpState>,
    path: web::Path<MappingPath>,
) -> ApiResult<HttpResponse> {
    let id = parse_mapping_id(path.into_inner())?;
    state.mappings.delete_mapping(id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// List service areas ordered by name.
#[utoipa::path(
    get,
    path = "/api/v1/admin/service-areas",
    responses(
        (status = 200, description = "Service areas", body = [ServiceAreaResponse]),
        (status = 503, description = "Store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "listServiceAreas"
)]
#[get("/admin/service-areas")]
pub async fn list_service_areas(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<ServiceAreaResponse>>> {
    let areas = state.mappings_query.list_service_areas().await?;
    Ok(web::Json(
        areas.into_iter().map(ServiceAreaResponse::from).collect(),
    ))
}

#[cfg(test)]
#[path = "domain_mappings_tests.rs"]
mod tests;
