//! The record store capability.
//!
//! [`TomatoStore`] is the seam between [`crate::service::TomatoService`] and
//! whatever keeps the records: [`crate::memory_store::MemoryTomatoStore`]
//! for tests and local runs, or the PostgreSQL store in `tomato-db`.
//! Implementations must make each single-record write atomic with respect
//! to concurrent readers.

use async_trait::async_trait;

use crate::tomato::{Tomato, UpdateTomato};
use crate::types::{DbId, EpochMillis};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store could not be reached (connection, pool, I/O).
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// The store refused or failed the operation.
    #[error("Store rejected operation: {0}")]
    Rejected(String),
}

/// A complete record minus its identifier, ready for insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct TomatoFields {
    pub name: String,
    pub variety: String,
    pub price: f64,
    pub description: Option<String>,
    pub in_stock: bool,
    pub created_at: EpochMillis,
    pub updated_at: EpochMillis,
}

/// A merge-patch: only `Some` fields are written, everything else is kept.
#[derive(Debug, Clone, PartialEq)]
pub struct TomatoPatch {
    pub name: Option<String>,
    pub variety: Option<String>,
    pub price: Option<f64>,
    /// `Some(None)` clears the description.
    pub description: Option<Option<String>>,
    pub in_stock: Option<bool>,
    pub updated_at: EpochMillis,
}

impl TomatoPatch {
    pub fn new(changes: UpdateTomato, updated_at: EpochMillis) -> Self {
        Self {
            name: changes.name,
            variety: changes.variety,
            price: changes.price,
            description: changes.description,
            in_stock: changes.in_stock,
            updated_at,
        }
    }

    /// Merge this patch into `record` field by field.
    pub fn apply(&self, record: &mut Tomato) {
        if let Some(name) = &self.name {
            record.name.clone_from(name);
        }
        if let Some(variety) = &self.variety {
            record.variety.clone_from(variety);
        }
        if let Some(price) = self.price {
            record.price = price;
        }
        if let Some(description) = &self.description {
            record.description.clone_from(description);
        }
        if let Some(in_stock) = self.in_stock {
            record.in_stock = in_stock;
        }
        record.updated_at = self.updated_at;
    }
}

// ---------------------------------------------------------------------------
// Lookups
// ---------------------------------------------------------------------------

/// An exact-match filter for [`TomatoStore::scan`]. Text comparison is
/// byte-for-byte: no case folding, no partial matches.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldMatch {
    Name(String),
    Variety(String),
    Price(f64),
}

impl FieldMatch {
    pub fn matches(&self, record: &Tomato) -> bool {
        match self {
            FieldMatch::Name(name) => record.name == *name,
            FieldMatch::Variety(variety) => record.variety == *variety,
            FieldMatch::Price(price) => record.price == *price,
        }
    }
}

/// A lookup through one of the store-maintained indexes.
///
/// Every index lookup returns exactly what a full scan with the equivalent
/// [`FieldMatch`] would return.
#[derive(Debug, Clone, PartialEq)]
pub enum IndexLookup {
    ByName(String),
    ByVariety(String),
    ByPrice(f64),
}

impl IndexLookup {
    pub fn index_name(&self) -> &'static str {
        match self {
            IndexLookup::ByName(_) => "by_name",
            IndexLookup::ByVariety(_) => "by_variety",
            IndexLookup::ByPrice(_) => "by_price",
        }
    }

    /// The scan filter with the same semantics.
    pub fn as_match(&self) -> FieldMatch {
        match self {
            IndexLookup::ByName(name) => FieldMatch::Name(name.clone()),
            IndexLookup::ByVariety(variety) => FieldMatch::Variety(variety.clone()),
            IndexLookup::ByPrice(price) => FieldMatch::Price(*price),
        }
    }
}

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// Record store primitives. Results are returned in the store's natural
/// enumeration order (ascending id for both implementations).
#[async_trait]
pub trait TomatoStore: Send + Sync {
    /// Fetch one record. Absence is `Ok(None)`.
    async fn get(&self, id: DbId) -> Result<Option<Tomato>, StoreError>;

    /// Insert a record and return its freshly assigned id.
    async fn insert(&self, fields: TomatoFields) -> Result<DbId, StoreError>;

    /// Merge `patch` into the record. Returns `false` if no record has `id`.
    async fn patch(&self, id: DbId, patch: &TomatoPatch) -> Result<bool, StoreError>;

    /// Remove the record. Returns `false` if no record has `id`.
    async fn delete(&self, id: DbId) -> Result<bool, StoreError>;

    /// Enumerate records, optionally keeping only exact matches.
    async fn scan(&self, filter: Option<&FieldMatch>) -> Result<Vec<Tomato>, StoreError>;

    /// Enumerate records through a named index.
    async fn scan_index(&self, lookup: &IndexLookup) -> Result<Vec<Tomato>, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> Tomato {
        Tomato {
            id: 1,
            name: "Cherry Tomato".into(),
            variety: "Sweet 100".into(),
            price: 4.99,
            description: None,
            in_stock: false,
            created_at: 10,
            updated_at: 10,
        }
    }

    #[test]
    fn index_lookups_map_to_equivalent_filters() {
        let cases = [
            (IndexLookup::ByName("Cherry Tomato".into()), "by_name"),
            (IndexLookup::ByVariety("Sweet 100".into()), "by_variety"),
            (IndexLookup::ByPrice(4.99), "by_price"),
        ];
        for (lookup, index) in cases {
            assert_eq!(lookup.index_name(), index);
            assert!(lookup.as_match().matches(&record()));
        }
    }

    #[test]
    fn field_match_is_exact() {
        assert!(!FieldMatch::Name("cherry tomato".into()).matches(&record()));
        assert!(!FieldMatch::Variety("Sweet".into()).matches(&record()));
        assert!(!FieldMatch::Price(4.98).matches(&record()));
    }
}
