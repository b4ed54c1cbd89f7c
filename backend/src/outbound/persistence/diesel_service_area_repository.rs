//! PostgreSQL-backed `ServiceAreaRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::expression_methods::PgTextExpressionMethods;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ServiceArea;
use crate::domain::ports::{ServiceAreaRepository, ServiceAreaRepositoryError};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error, map_pool_error};
use super::models::ServiceAreaRow;
use super::pool::DbPool;
use super::schema::service_areas;

diesel::define_sql_function!(
    fn char_length(value: diesel::sql_types::Text) -> diesel::sql_types::Integer
);

/// Diesel-backed Service Area Directory.
#[derive(Clone)]
pub struct DieselServiceAreaRepository {
    pool: DbPool,
}

impl DieselServiceAreaRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_diesel_error(error: diesel::result::Error, operation: &str) -> ServiceAreaRepositoryError {
    match classify_diesel_error(&error, operation) {
        DieselFailure::Connection => {
            ServiceAreaRepositoryError::connection("database connection error")
        }
        _ => ServiceAreaRepositoryError::query("database error"),
    }
}

/// Build an `ILIKE` pattern matching `fragment` anywhere, with LIKE
/// metacharacters in the fragment taken literally.
pub(crate) fn contains_pattern(fragment: &str) -> String {
    let mut pattern = String::with_capacity(fragment.len() + 2);
    pattern.push('%');
    for ch in fragment.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

#[async_trait]
impl ServiceAreaRepository for DieselServiceAreaRepository {
    async fn search_by_name_substring(
        &self,
        candidate: &str,
        exclude_main_address: bool,
    ) -> Result<Option<ServiceArea>, ServiceAreaRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, ServiceAreaRepositoryError::connection))?;

        let mut query = service_areas::table
            .select(ServiceAreaRow::as_select())
            .filter(service_areas::name.ilike(contains_pattern(candidate)))
            .into_boxed();
        if exclude_main_address {
            query = query.filter(service_areas::is_main_address.eq(false));
        }

        let row: Option<ServiceAreaRow> = query
            .order((
                char_length(service_areas::name).desc(),
                service_areas::name.asc(),
                service_areas::id.asc(),
            ))
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, "search service areas"))?;

        Ok(row.map(ServiceArea::from))
    }

    async fn list(&self) -> Result<Vec<ServiceArea>, ServiceAreaRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, ServiceAreaRepositoryError::connection))?;

        let rows: Vec<ServiceAreaRow> = service_areas::table
            .select(ServiceAreaRow::as_select())
            .order((service_areas::name.asc(), service_areas::id.asc()))
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "list service areas"))?;

        Ok(rows.into_iter().map(ServiceArea::from).collect())
    }
}
