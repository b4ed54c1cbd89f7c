//! Domain primitives, services and ports.
//!
//! Purpose: model hostname redirect rules and service areas, and decide where
//! a page load on a vanity domain should go. Everything here is transport
//! agnostic; HTTP and persistence live in the adapters.
//!
//! Public surface:
//! - Error / ErrorCode: API error payload and stable error identifiers.
//! - DomainMapping / DomainMappingDraft: persisted and proposed redirect rules.
//! - ServiceArea: named service locality.
//! - resolve / DomainResolutionService: the resolver in pure and store-backed
//!   form.
//! - DomainMappingAdminService: Admin Editor use cases.

pub mod domain_mapping;
pub mod domain_mapping_admin_service;
pub mod error;
pub mod ports;
pub mod resolution;
pub mod resolution_service;
pub mod service_area;
pub mod slug;
pub mod trace_id;

pub use self::domain_mapping::{
    DomainMapping, DomainMappingDraft, DomainMappingId, DomainMappingValidationError, DomainName,
    RedirectPath,
};
pub use self::domain_mapping_admin_service::DomainMappingAdminService;
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::resolution::{
    BypassPolicy, DEFAULT_BYPASS_HOSTS, DEFAULT_PREVIEW_SUBSTRINGS, ResolutionGuard,
    ResolutionTarget, TargetKind, derive_area_candidate, resolve,
};
pub use self::resolution_service::DomainResolutionService;
pub use self::service_area::{ServiceArea, ServiceAreaId};
pub use self::slug::slugify;
pub use self::trace_id::TraceId;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use site_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("no such mapping"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
