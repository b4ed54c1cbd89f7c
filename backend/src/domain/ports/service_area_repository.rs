//! Port for the Service Area Directory.

use async_trait::async_trait;

use crate::domain::ServiceArea;

use super::define_port_error;

define_port_error! {
    /// Errors raised by service area repository adapters.
    pub enum ServiceAreaRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "service area repository connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } =>
            "service area repository query failed: {message}",
    }
}

/// Read access to [`ServiceArea`] records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ServiceAreaRepository: Send + Sync {
    /// Return the best area whose name contains `candidate`, ignoring case.
    ///
    /// When `exclude_main_address` is set, records flagged as the main
    /// address are skipped. Among several matches the longest name wins,
    /// then names compare ascending, then ids ascending.
    async fn search_by_name_substring(
        &self,
        candidate: &str,
        exclude_main_address: bool,
    ) -> Result<Option<ServiceArea>, ServiceAreaRepositoryError>;

    /// List every area ordered by name.
    async fn list(&self) -> Result<Vec<ServiceArea>, ServiceAreaRepositoryError>;
}

/// Fixture directory with no areas.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureServiceAreaRepository;

#[async_trait]
impl ServiceAreaRepository for FixtureServiceAreaRepository {
    async fn search_by_name_substring(
        &self,
        _candidate: &str,
        _exclude_main_address: bool,
    ) -> Result<Option<ServiceArea>, ServiceAreaRepositoryError> {
        Ok(None)
    }

    async fn list(&self) -> Result<Vec<ServiceArea>, ServiceAreaRepositoryError> {
        Ok(Vec::new())
    }
}
