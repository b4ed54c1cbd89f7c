//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint from the inbound layer together
//! with the schema wrappers for domain types. The document is served by
//! Swagger UI in debug builds and exported via `cargo run --bin openapi-dump`.

use crate::inbound::http::domain_mappings::{
    DomainMappingRequest, DomainMappingResponse, ServiceAreaResponse,
};
use crate::inbound::http::domain_resolution::{ResolutionKind, ResolutionResponse};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Site backend API",
        description = "Vanity hostname resolution and domain mapping administration."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::domain_resolution::resolve_domain,
        crate::inbound::http::domain_mappings::list_domain_mappings,
        crate::inbound::http::domain_mappings::create_domain_mapping,
        crate::inbound::http::domain_mappings::update_domain_mapping,
        crate::inbound::http::domain_mappings::delete_domain_mapping,
        crate::inbound::http::domain_mappings::list_service_areas,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        ResolutionKind,
        ResolutionResponse,
        DomainMappingRequest,
        DomainMappingResponse,
        ServiceAreaResponse
    )),
    tags(
        (name = "resolution", description = "Hostname to internal path resolution"),
        (name = "admin", description = "Domain mapping administration"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
