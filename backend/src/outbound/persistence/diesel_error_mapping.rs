//! Shared mapping from Diesel and pool failures to port error constructors.
//!
//! Messages handed to the ports are generic; the underlying database detail
//! is logged at debug level only.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Unique index guarding `domain_mappings.domain`.
pub(crate) const DOMAIN_UNIQUE_CONSTRAINT: &str = "domain_mappings_domain_key";

/// Coarse classification of a Diesel failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DieselFailure {
    /// The connection dropped or could not be used.
    Connection,
    /// A unique constraint rejected the write.
    UniqueViolation {
        /// Whether the violated constraint is the mapping domain index.
        on_domain: bool,
    },
    /// A foreign key rejected the write.
    ForeignKeyViolation,
    /// Any other query failure.
    Query,
}

/// Classify a Diesel error and log its detail.
pub(crate) fn classify_diesel_error(error: &DieselError, operation: &str) -> DieselFailure {
    match error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), %operation, "diesel operation failed");
            match kind {
                DatabaseErrorKind::ClosedConnection => DieselFailure::Connection,
                DatabaseErrorKind::UniqueViolation => DieselFailure::UniqueViolation {
                    on_domain: info.constraint_name() == Some(DOMAIN_UNIQUE_CONSTRAINT),
                },
                DatabaseErrorKind::ForeignKeyViolation => DieselFailure::ForeignKeyViolation,
                _ => DieselFailure::Query,
            }
        }
        _ => {
            debug!(
                error_type = %std::any::type_name_of_val(error),
                %operation,
                "diesel operation failed"
            );
            DieselFailure::Query
        }
    }
}

/// Map a pool failure through a repository's connection constructor.
pub(crate) fn map_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    connection(error.into_message())
}
