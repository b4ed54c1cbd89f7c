//! PostgreSQL-backed `DomainMappingRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{DomainMappingRepository, DomainMappingRepositoryError};
use crate::domain::{DomainMapping, DomainMappingDraft, DomainMappingId};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error, map_pool_error};
use super::models::{DomainMappingRow, DomainMappingUpdate, NewDomainMappingRow};
use super::pool::DbPool;
use super::schema::domain_mappings;

/// Diesel-backed Mapping Store.
#[derive(Clone)]
pub struct DieselDomainMappingRepository {
    pool: DbPool,
}

impl DieselDomainMappingRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_read_error(error: diesel::result::Error, operation: &str) -> DomainMappingRepositoryError {
    match classify_diesel_error(&error, operation) {
        DieselFailure::Connection => {
            DomainMappingRepositoryError::connection("database connection error")
        }
        _ => DomainMappingRepositoryError::query("database error"),
    }
}

fn map_write_error(
    error: diesel::result::Error,
    operation: &str,
    draft: &DomainMappingDraft,
) -> DomainMappingRepositoryError {
    match classify_diesel_error(&error, operation) {
        DieselFailure::Connection => {
            DomainMappingRepositoryError::connection("database connection error")
        }
        DieselFailure::UniqueViolation { on_domain: true } => {
            DomainMappingRepositoryError::duplicate_domain(draft.domain.as_ref())
        }
        DieselFailure::ForeignKeyViolation => DomainMappingRepositoryError::unknown_service_area(
            draft
                .service_area_id
                .map(|id| id.to_string())
                .unwrap_or_default(),
        ),
        DieselFailure::UniqueViolation { on_domain: false } | DieselFailure::Query => {
            DomainMappingRepositoryError::query("database error")
        }
    }
}

fn to_domain(row: DomainMappingRow) -> Result<DomainMapping, DomainMappingRepositoryError> {
    DomainMapping::try_from(row).map_err(DomainMappingRepositoryError::query)
}

#[async_trait]
impl DomainMappingRepository for DieselDomainMappingRepository {
    async fn find_by_domain(
        &self,
        domain: &str,
    ) -> Result<Option<DomainMapping>, DomainMappingRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, DomainMappingRepositoryError::connection))?;

        let row: Option<DomainMappingRow> = domain_mappings::table
            .filter(domain_mappings::domain.eq(domain))
            .order((domain_mappings::created_at.asc(), domain_mappings::id.asc()))
            .select(DomainMappingRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_read_error(err, "find mapping by domain"))?;

        row.map(to_domain).transpose()
    }

    async fn find_by_id(
        &self,
        id: &DomainMappingId,
    ) -> Result<Option<DomainMapping>, DomainMappingRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, DomainMappingRepositoryError::connection))?;

        let row: Option<DomainMappingRow> = domain_mappings::table
            .find(*id.as_uuid())
            .select(DomainMappingRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_read_error(err, "find mapping by id"))?;

        row.map(to_domain).transpose()
    }

    async fn list(&self) -> Result<Vec<DomainMapping>, DomainMappingRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, DomainMappingRepositoryError::connection))?;

        let rows: Vec<DomainMappingRow> = domain_mappings::table
            .order((domain_mappings::domain.asc(), domain_mappings::created_at.asc()))
            .select(DomainMappingRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_read_error(err, "list mappings"))?;

        rows.into_iter().map(to_domain).collect()
    }

    async fn create(
        &self,
        draft: &DomainMappingDraft,
    ) -> Result<DomainMapping, DomainMappingRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, DomainMappingRepositoryError::connection))?;

        let new_row = NewDomainMappingRow::from_draft(Uuid::new_v4(), draft);
        let row: DomainMappingRow = diesel::insert_into(domain_mappings::table)
            .values(&new_row)
            .returning(DomainMappingRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_write_error(err, "insert mapping", draft))?;

        to_domain(row)
    }

    async fn update(
        &self,
        id: &DomainMappingId,
        draft: &DomainMappingDraft,
    ) -> Result<Option<DomainMapping>, DomainMappingRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, DomainMappingRepositoryError::connection))?;

        let changeset = DomainMappingUpdate::from_draft(draft, Utc::now());
        let target = domain_mappings::table.find(*id.as_uuid());
        let row: Option<DomainMappingRow> = diesel::update(target)
            .set(&changeset)
            .returning(DomainMappingRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|err| map_write_error(err, "update mapping", draft))?;

        row.map(to_domain).transpose()
    }

    async fn delete(&self, id: &DomainMappingId) -> Result<bool, DomainMappingRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, DomainMappingRepositoryError::connection))?;

        let deleted = diesel::delete(domain_mappings::table.find(*id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(|err| map_read_error(err, "delete mapping"))?;

        Ok(deleted > 0)
    }
}
