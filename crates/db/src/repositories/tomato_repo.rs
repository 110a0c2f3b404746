//! Repository for the `tomatoes` table.

use sqlx::PgPool;
use tomato_core::store::{FieldMatch, TomatoFields, TomatoPatch};
use tomato_core::types::DbId;

use crate::models::tomato::TomatoRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, name, variety, price, description, in_stock, created_at, updated_at";

/// Provides CRUD and exact-match lookups for tomatoes. Every list is ordered
/// by `id`, which is insertion order.
pub struct TomatoRepo;

impl TomatoRepo {
    /// Insert a new tomato, returning the assigned id.
    pub async fn create(pool: &PgPool, input: &TomatoFields) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "INSERT INTO tomatoes (name, variety, price, description, in_stock, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING id",
        )
        .bind(&input.name)
        .bind(&input.variety)
        .bind(input.price)
        .bind(&input.description)
        .bind(input.in_stock)
        .bind(input.created_at)
        .bind(input.updated_at)
        .fetch_one(pool)
        .await
    }

    /// Find a tomato by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<TomatoRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tomatoes WHERE id = $1");
        sqlx::query_as::<_, TomatoRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every tomato.
    pub async fn list(pool: &PgPool) -> Result<Vec<TomatoRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tomatoes ORDER BY id ASC");
        sqlx::query_as::<_, TomatoRow>(&query).fetch_all(pool).await
    }

    /// List tomatoes whose field equals the filter value exactly.
    ///
    /// `name`, `variety` and `price` are served by their b-tree indexes.
    pub async fn list_matching(
        pool: &PgPool,
        filter: &FieldMatch,
    ) -> Result<Vec<TomatoRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tomatoes WHERE {} = $1 ORDER BY id ASC",
            match_column(filter)
        );
        let query = sqlx::query_as::<_, TomatoRow>(&query);
        let query = match filter {
            FieldMatch::Name(text) | FieldMatch::Variety(text) => query.bind(text.as_str()),
            FieldMatch::Price(price) => query.bind(*price),
        };
        query.fetch_all(pool).await
    }

    /// Merge a patch into a tomato. Only `Some` fields are written.
    ///
    /// Returns `false` if no row with the given `id` exists.
    pub async fn update(pool: &PgPool, id: DbId, patch: &TomatoPatch) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE tomatoes SET
                name = COALESCE($2, name),
                variety = COALESCE($3, variety),
                price = COALESCE($4, price),
                description = CASE WHEN $5 THEN $6 ELSE description END,
                in_stock = COALESCE($7, in_stock),
                updated_at = $8
             WHERE id = $1",
        )
        .bind(id)
        .bind(&patch.name)
        .bind(&patch.variety)
        .bind(patch.price)
        .bind(patch.description.is_some())
        .bind(patch.description.clone().flatten())
        .bind(patch.in_stock)
        .bind(patch.updated_at)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Permanently delete a tomato by id. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tomatoes WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn match_column(filter: &FieldMatch) -> &'static str {
    match filter {
        FieldMatch::Name(_) => "name",
        FieldMatch::Variety(_) => "variety",
        FieldMatch::Price(_) => "price",
    }
}
