//! HTTP inbound adapter exposing REST endpoints.

pub mod domain_mappings;
pub mod domain_resolution;
pub mod error;
pub mod health;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

pub use error::ApiResult;
