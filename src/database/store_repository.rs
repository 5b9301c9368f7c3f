use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use sqlx::{postgres::PgArguments, PgPool};
use thiserror::Error;

use crate::database::filter::{FilterError, SortDirection, StoreFilter};
use crate::domain::Store;

const TABLE_NAME: &str = "stores";

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Store with ID {0} not found")]
    NotFound(i64),

    #[error(transparent)]
    Filter(#[from] FilterError),

    // Generic messages only; the raw sqlx error stays on the source chain
    // for diagnostics and is logged at the wrap site.
    #[error("Failed to save store")]
    Save(#[source] sqlx::Error),

    #[error("database error")]
    Database(#[from] sqlx::Error),
}

/// Persistence seam for store entities. The service owns lifecycle
/// transitions; implementations own the row translation and never hand out
/// partially-constructed entities.
#[async_trait]
pub trait StoreRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Store, RepositoryError>;

    /// Exact-match filters and multi-key sort, both whitelist-checked before
    /// any query executes.
    async fn find_all(
        &self,
        filters: &[(String, Value)],
        sort: &[(String, SortDirection)],
    ) -> Result<Vec<Store>, RepositoryError>;

    /// Routes to INSERT (id is None) or UPDATE (id present) and re-fetches
    /// the row so the returned entity reflects storage-assigned values.
    async fn save(&self, store: &Store) -> Result<Store, RepositoryError>;

    /// True iff a row was removed. Deleting an absent id is `false`, not an
    /// error.
    async fn delete(&self, id: i64) -> Result<bool, RepositoryError>;

    async fn exists(&self, id: i64) -> Result<bool, RepositoryError>;
}

pub struct PgStoreRepository {
    pool: PgPool,
}

impl PgStoreRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert(&self, store: &Store) -> Result<Store, RepositoryError> {
        let row: (i64,) = sqlx::query_as(
            "INSERT INTO stores (name, address, city, country, postal_code, phone, email, is_active, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING id",
        )
        .bind(&store.name)
        .bind(&store.address)
        .bind(&store.city)
        .bind(&store.country)
        .bind(&store.postal_code)
        .bind(&store.phone)
        .bind(&store.email)
        .bind(store.is_active)
        .bind(store.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("store insert failed: {}", e);
            RepositoryError::Save(e)
        })?;

        self.find_by_id(row.0).await
    }

    async fn update(&self, id: i64, store: &Store) -> Result<Store, RepositoryError> {
        sqlx::query(
            "UPDATE stores SET name = $1, address = $2, city = $3, country = $4, \
             postal_code = $5, phone = $6, email = $7, is_active = $8, updated_at = $9 \
             WHERE id = $10",
        )
        .bind(&store.name)
        .bind(&store.address)
        .bind(&store.city)
        .bind(&store.country)
        .bind(&store.postal_code)
        .bind(&store.phone)
        .bind(&store.email)
        .bind(store.is_active)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("store update failed: {}", e);
            RepositoryError::Save(e)
        })?;

        self.find_by_id(id).await
    }
}

#[async_trait]
impl StoreRepository for PgStoreRepository {
    async fn find_by_id(&self, id: i64) -> Result<Store, RepositoryError> {
        sqlx::query_as::<_, Store>("SELECT * FROM stores WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(RepositoryError::NotFound(id))
    }

    async fn find_all(
        &self,
        filters: &[(String, Value)],
        sort: &[(String, SortDirection)],
    ) -> Result<Vec<Store>, RepositoryError> {
        let filter = StoreFilter::new(filters, sort)?;
        let (sql, params) = filter.to_sql(TABLE_NAME);

        let mut query = sqlx::query_as::<_, Store>(&sql);
        for param in params {
            query = bind_value(query, param);
        }

        Ok(query.fetch_all(&self.pool).await?)
    }

    async fn save(&self, store: &Store) -> Result<Store, RepositoryError> {
        match store.id {
            None => self.insert(store).await,
            Some(id) => self.update(id, store).await,
        }
    }

    async fn delete(&self, id: i64) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM stores WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn exists(&self, id: i64) -> Result<bool, RepositoryError> {
        let exists: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM stores WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists.0)
    }
}

fn bind_value<'q, O>(
    query: sqlx::query::QueryAs<'q, sqlx::Postgres, O, PgArguments>,
    value: &'q Value,
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, O, PgArguments>
where
    O: for<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow>,
{
    match value {
        Value::Null => {
            let none: Option<String> = None;
            query.bind(none)
        }
        Value::Bool(b) => query.bind(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                query.bind(i)
            } else if let Some(f) = n.as_f64() {
                query.bind(f)
            } else {
                query.bind(n.to_string())
            }
        }
        Value::String(s) => query.bind(s),
        // Exact-match filters never carry arrays or objects.
        _ => query.bind(value.to_string()),
    }
}
