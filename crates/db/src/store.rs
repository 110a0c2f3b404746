//! PostgreSQL-backed [`TomatoStore`].

use async_trait::async_trait;
use tomato_core::store::{
    FieldMatch, IndexLookup, StoreError, TomatoFields, TomatoPatch, TomatoStore,
};
use tomato_core::tomato::Tomato;
use tomato_core::types::DbId;

use crate::repositories::TomatoRepo;
use crate::DbPool;

/// Record store over the `tomatoes` table. Each primitive is a single SQL
/// statement, so per-record atomicity comes from PostgreSQL.
#[derive(Debug, Clone)]
pub struct PgTomatoStore {
    pool: DbPool,
}

impl PgTomatoStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Classify a sqlx error: connectivity problems are `Unavailable`,
/// everything else is `Rejected`.
fn store_error(err: sqlx::Error) -> StoreError {
    tracing::error!(error = %err, "Tomato store query failed");
    let message = err.to_string();
    match err {
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed => StoreError::Unavailable(message),
        _ => StoreError::Rejected(message),
    }
}

#[async_trait]
impl TomatoStore for PgTomatoStore {
    async fn get(&self, id: DbId) -> Result<Option<Tomato>, StoreError> {
        let row = TomatoRepo::find_by_id(&self.pool, id)
            .await
            .map_err(store_error)?;
        Ok(row.map(Tomato::from))
    }

    async fn insert(&self, fields: TomatoFields) -> Result<DbId, StoreError> {
        let id = TomatoRepo::create(&self.pool, &fields)
            .await
            .map_err(store_error)?;
        tracing::debug!(id, "Inserted tomato");
        Ok(id)
    }

    async fn patch(&self, id: DbId, patch: &TomatoPatch) -> Result<bool, StoreError> {
        TomatoRepo::update(&self.pool, id, patch)
            .await
            .map_err(store_error)
    }

    async fn delete(&self, id: DbId) -> Result<bool, StoreError> {
        TomatoRepo::delete(&self.pool, id)
            .await
            .map_err(store_error)
    }

    async fn scan(&self, filter: Option<&FieldMatch>) -> Result<Vec<Tomato>, StoreError> {
        let rows = match filter {
            Some(filter) => TomatoRepo::list_matching(&self.pool, filter).await,
            None => TomatoRepo::list(&self.pool).await,
        }
        .map_err(store_error)?;
        Ok(rows.into_iter().map(Tomato::from).collect())
    }

    async fn scan_index(&self, lookup: &IndexLookup) -> Result<Vec<Tomato>, StoreError> {
        // Each lookup column carries its own b-tree index, so the planner
        // serves the equality filter from it.
        let rows = TomatoRepo::list_matching(&self.pool, &lookup.as_match())
            .await
            .map_err(store_error)?;
        Ok(rows.into_iter().map(Tomato::from).collect())
    }
}
