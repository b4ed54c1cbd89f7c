//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Adapters translate between Diesel rows and domain types and hold no
//! business logic. Row structs and table definitions stay private to this
//! module. Connections come from a `bb8` pool via `diesel-async`.

mod diesel_domain_mapping_repository;
mod diesel_error_mapping;
mod diesel_service_area_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_domain_mapping_repository::DieselDomainMappingRepository;
pub use diesel_service_area_repository::DieselServiceAreaRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
