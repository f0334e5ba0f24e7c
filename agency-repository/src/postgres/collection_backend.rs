use agency_shared::{Collection, OnDetach};
use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use tracing::{debug, instrument};
use uuid::Uuid;

use super::sql;
use crate::errors::BackendError;
use crate::interfaces::CollectionBackend;
use crate::types::Row;

/// Default upper bound on pooled connections.
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// PostgreSQL-backed collection store.
///
/// Every write runs in its own statement except `detach_and_delete`, which
/// wraps the reference cleanup and the delete in one transaction.
pub struct PostgresCollectionBackend {
    pool: sqlx::PgPool,
}

impl PostgresCollectionBackend {
    /// Creates a backend over an existing pool.
    ///
    /// # Arguments
    ///
    /// * `pool` - Configured PostgreSQL connection pool with the dashboard schema
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }

    /// Connects a new pool to `url`.
    ///
    /// # Returns
    ///
    /// * `Ok(PostgresCollectionBackend)` - Ready-to-use backend
    /// * `Err(BackendError::Connection)` - If the database cannot be reached
    pub async fn connect(url: &str) -> Result<Self, BackendError> {
        let pool = PgPoolOptions::new()
            .max_connections(DEFAULT_MAX_CONNECTIONS)
            .connect(url)
            .await?;
        Ok(Self { pool })
    }

    /// Applies the bundled schema migrations.
    pub async fn migrate(&self) -> Result<(), BackendError> {
        sqlx::migrate!("./src/postgres/migrations").run(&self.pool).await?;
        Ok(())
    }

    pub fn pool(&self) -> &sqlx::PgPool {
        &self.pool
    }
}

fn into_row(value: Value) -> Result<Row, BackendError> {
    match value {
        Value::Object(row) => Ok(row),
        other => Err(BackendError::serialization(format!(
            "expected a JSON object row, got {other}"
        ))),
    }
}

#[async_trait]
impl CollectionBackend for PostgresCollectionBackend {
    #[instrument(skip(self), fields(collection = %collection))]
    async fn select_all(&self, collection: Collection) -> Result<Vec<Row>, BackendError> {
        let statement = sql::select_all(collection.table_name());
        let rows: Vec<Value> = sqlx::query_scalar(&statement).fetch_all(&self.pool).await?;
        debug!(rows = rows.len(), "Fetched collection");

        rows.into_iter().map(into_row).collect()
    }

    #[instrument(skip(self, fields), fields(collection = %collection))]
    async fn insert(&self, collection: Collection, fields: &Row) -> Result<Row, BackendError> {
        let columns = sql::insert_columns(fields)?;
        let statement = sql::insert(collection.table_name(), &columns);

        let query = sqlx::query_scalar::<_, Value>(&statement);
        let query = if columns.is_empty() {
            query
        } else {
            query.bind(Value::Object(fields.clone()))
        };

        into_row(query.fetch_one(&self.pool).await?)
    }

    #[instrument(skip(self, patch), fields(collection = %collection, id = %id))]
    async fn update(&self, collection: Collection, id: Uuid, patch: &Row) -> Result<Row, BackendError> {
        let columns = sql::patch_columns(patch)?;
        let statement = sql::update(collection.table_name(), &columns);

        let row: Option<Value> = sqlx::query_scalar(&statement)
            .bind(Value::Object(patch.clone()))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.ok_or(BackendError::NotFound(id)).and_then(into_row)
    }

    #[instrument(skip(self), fields(collection = %collection, id = %id))]
    async fn delete(&self, collection: Collection, id: Uuid) -> Result<(), BackendError> {
        let statement = format!("DELETE FROM {} WHERE id = $1", collection.table_name());
        let result = sqlx::query(&statement).bind(id).execute(&self.pool).await?;

        if result.rows_affected() == 0 {
            return Err(BackendError::NotFound(id));
        }
        Ok(())
    }

    #[instrument(skip(self), fields(collection = %collection, id = %id))]
    async fn detach_and_delete(&self, collection: Collection, id: Uuid) -> Result<(), BackendError> {
        let mut tx = self.pool.begin().await?;

        let exists_statement = format!(
            "SELECT EXISTS(SELECT 1 FROM {} WHERE id = $1)",
            collection.table_name()
        );
        let exists: bool = sqlx::query_scalar(&exists_statement)
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;
        if !exists {
            return Err(BackendError::NotFound(id));
        }

        // Collect the root and every owned row below it; children are removed first.
        let mut pending = vec![(collection, id)];
        let mut doomed = Vec::new();
        while let Some((current, current_id)) = pending.pop() {
            for key in current.referenced_by().filter(|key| key.on_detach == OnDetach::Delete) {
                let statement = format!(
                    "SELECT id FROM {} WHERE {} = $1",
                    key.collection.table_name(),
                    sql::quote_ident(key.column)?
                );
                let children: Vec<Uuid> = sqlx::query_scalar(&statement)
                    .bind(current_id)
                    .fetch_all(&mut *tx)
                    .await?;
                pending.extend(children.into_iter().map(|child| (key.collection, child)));
            }
            doomed.push((current, current_id));
        }

        for (current, current_id) in doomed.into_iter().rev() {
            for key in current.referenced_by().filter(|key| key.on_detach == OnDetach::Nullify) {
                let column = sql::quote_ident(key.column)?;
                let statement = format!(
                    "UPDATE {} SET {column} = NULL WHERE {column} = $1",
                    key.collection.table_name()
                );
                let detached = sqlx::query(&statement)
                    .bind(current_id)
                    .execute(&mut *tx)
                    .await?
                    .rows_affected();
                if detached > 0 {
                    debug!(
                        referencing = %key.collection,
                        column = key.column,
                        detached,
                        "Detached references"
                    );
                }
            }

            let statement = format!("DELETE FROM {} WHERE id = $1", current.table_name());
            sqlx::query(&statement)
                .bind(current_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}
