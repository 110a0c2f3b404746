//! Row mapping for the `tomatoes` table.

use sqlx::FromRow;
use tomato_core::tomato::Tomato;
use tomato_core::types::{DbId, EpochMillis};

/// A row from the `tomatoes` table.
#[derive(Debug, Clone, FromRow)]
pub struct TomatoRow {
    pub id: DbId,
    pub name: String,
    pub variety: String,
    pub price: f64,
    pub description: Option<String>,
    pub in_stock: bool,
    pub created_at: EpochMillis,
    pub updated_at: EpochMillis,
}

impl From<TomatoRow> for Tomato {
    fn from(row: TomatoRow) -> Self {
        Tomato {
            id: row.id,
            name: row.name,
            variety: row.variety,
            price: row.price,
            description: row.description,
            in_stock: row.in_stock,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
