//! Site backend library modules.
//!
//! Resolves vanity hostnames to internal routes and exposes the admin API
//! that maintains explicit domain mappings.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
