//! Hostname resolution endpoint.
//!
//! ```text
//! GET /api/v1/domain-resolution?hostname=collingwoodplumbing.com
//! ```
//!
//! Each request is its own page load, so a fresh [`ResolutionGuard`] is used.

use actix_web::{HttpResponse, get, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Error, ResolutionGuard, ResolutionTarget, TargetKind};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, missing_field_error};

const HOSTNAME: FieldName = FieldName::new("hostname");

/// Query string for the resolution endpoint.
#[derive(Debug, Deserialize, IntoParams)]
pub struct ResolutionParams {
    /// Hostname the page was loaded from; a `:port` suffix is ignored.
    pub hostname: Option<String>,
}

/// Which phase produced the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionKind {
    Explicit,
    Heuristic,
}

impl From<TargetKind> for ResolutionKind {
    fn from(kind: TargetKind) -> Self {
        match kind {
            TargetKind::Explicit => Self::Explicit,
            TargetKind::Heuristic => Self::Heuristic,
        }
    }
}

/// Navigation target returned when a hostname resolves.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionResponse {
    pub kind: ResolutionKind,
    /// Internal path to navigate to.
    #[schema(example = "/service-area/collingwood")]
    pub path: String,
}

impl From<ResolutionTarget> for ResolutionResponse {
    fn from(target: ResolutionTarget) -> Self {
        Self {
            kind: target.kind.into(),
            path: target.path,
        }
    }
}

/// Drop a trailing `:port` from a `Host` value.
///
/// Bracketed IPv6 literals keep their brackets; case is left alone because
/// explicit mappings match case-sensitively.
pub(crate) fn strip_port(host: &str) -> &str {
    let host = host.trim();
    if host.starts_with('[') {
        return host.find(']').map_or(host, |end| &host[..=end]);
    }
    match host.rsplit_once(':') {
        Some((name, port)) if !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()) => {
            name
        }
        _ => host,
    }
}

fn parse_hostname(params: ResolutionParams) -> Result<String, Error> {
    let raw = params.hostname.ok_or_else(|| missing_field_error(HOSTNAME))?;
    let hostname = strip_port(&raw);
    if hostname.is_empty() {
        return Err(missing_field_error(HOSTNAME));
    }
    Ok(hostname.to_owned())
}

/// Resolve a hostname to an internal path.
///
/// Returns `204 No Content` when the hostname is bypassed or nothing matches.
/// Store failures never surface here; they degrade to `204`.
#[utoipa::path(
    get,
    path = "/api/v1/domain-resolution",
    params(ResolutionParams),
    responses(
        (status = 200, description = "Hostname resolved", body = ResolutionResponse),
        (status = 204, description = "No redirect for this hostname"),
        (status = 400, description = "Missing hostname", body = ErrorSchema)
    ),
    tags = ["resolution"],
    operation_id = "resolveDomain"
)]
#[get("/domain-resolution")]
pub async fn resolve_domain(
    state: web::Data<HttpState>,
    query: web::Query<ResolutionParams>,
) -> ApiResult<HttpResponse> {
    let hostname = parse_hostname(query.into_inner())?;
    let guard = ResolutionGuard::new();
    let response = match state.resolution.resolve(&hostname, &guard).await {
        Some(target) => HttpResponse::Ok().json(ResolutionResponse::from(target)),
        None => HttpResponse::NoContent().finish(),
    };
    Ok(response)
}

#[cfg(test)]
#[path = "domain_resolution_tests.rs"]
mod tests;
