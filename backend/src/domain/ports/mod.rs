//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod domain_mapping_repository;
mod domain_mappings_command;
mod domain_mappings_query;
mod domain_resolution_query;
mod service_area_repository;

#[cfg(test)]
pub use domain_mapping_repository::MockDomainMappingRepository;
pub use domain_mapping_repository::{
    DomainMappingRepository, DomainMappingRepositoryError, FixtureDomainMappingRepository,
};
#[cfg(test)]
pub use domain_mappings_command::MockDomainMappingsCommand;
pub use domain_mappings_command::DomainMappingsCommand;
#[cfg(test)]
pub use domain_mappings_query::MockDomainMappingsQuery;
pub use domain_mappings_query::DomainMappingsQuery;
#[cfg(test)]
pub use domain_resolution_query::MockDomainResolutionQuery;
pub use domain_resolution_query::{DomainResolutionQuery, FixtureDomainResolutionQuery};
#[cfg(test)]
pub use service_area_repository::MockServiceAreaRepository;
pub use service_area_repository::{
    FixtureServiceAreaRepository, ServiceAreaRepository, ServiceAreaRepositoryError,
};
