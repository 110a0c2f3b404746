//! In-memory [`TomatoStore`].
//!
//! Records live in an id-ordered map next to three secondary indexes
//! (name, variety, price). One `RwLock` guards the map and the indexes
//! together, so a reader never sees a record whose index entries are stale.
//! Ids come from a counter that only moves forward, so a deleted id is
//! never handed out again.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::store::{FieldMatch, IndexLookup, StoreError, TomatoFields, TomatoPatch, TomatoStore};
use crate::tomato::Tomato;
use crate::types::DbId;

#[derive(Debug, Default)]
pub struct MemoryTomatoStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    last_id: DbId,
    records: BTreeMap<DbId, Tomato>,
    by_name: HashMap<String, BTreeSet<DbId>>,
    by_variety: HashMap<String, BTreeSet<DbId>>,
    by_price: HashMap<u64, BTreeSet<DbId>>,
}

/// Index key for a price. `-0.0` and `0.0` compare equal, so they share a key.
fn price_key(price: f64) -> u64 {
    if price == 0.0 {
        0.0_f64.to_bits()
    } else {
        price.to_bits()
    }
}

fn add_entry<K: std::hash::Hash + Eq>(index: &mut HashMap<K, BTreeSet<DbId>>, key: K, id: DbId) {
    index.entry(key).or_default().insert(id);
}

fn remove_entry<K: std::hash::Hash + Eq>(index: &mut HashMap<K, BTreeSet<DbId>>, key: &K, id: DbId) {
    if let Some(ids) = index.get_mut(key) {
        ids.remove(&id);
        if ids.is_empty() {
            index.remove(key);
        }
    }
}

impl Inner {
    fn index(&mut self, record: &Tomato) {
        add_entry(&mut self.by_name, record.name.clone(), record.id);
        add_entry(&mut self.by_variety, record.variety.clone(), record.id);
        add_entry(&mut self.by_price, price_key(record.price), record.id);
    }

    fn unindex(&mut self, record: &Tomato) {
        remove_entry(&mut self.by_name, &record.name, record.id);
        remove_entry(&mut self.by_variety, &record.variety, record.id);
        remove_entry(&mut self.by_price, &price_key(record.price), record.id);
    }

    fn collect(&self, ids: Option<&BTreeSet<DbId>>) -> Vec<Tomato> {
        ids.into_iter()
            .flatten()
            .filter_map(|id| self.records.get(id).cloned())
            .collect()
    }
}

impl MemoryTomatoStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records currently held.
    pub async fn len(&self) -> usize {
        self.inner.read().await.records.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.records.is_empty()
    }
}

#[async_trait]
impl TomatoStore for MemoryTomatoStore {
    async fn get(&self, id: DbId) -> Result<Option<Tomato>, StoreError> {
        Ok(self.inner.read().await.records.get(&id).cloned())
    }

    async fn insert(&self, fields: TomatoFields) -> Result<DbId, StoreError> {
        let mut inner = self.inner.write().await;
        inner.last_id += 1;
        let record = Tomato {
            id: inner.last_id,
            name: fields.name,
            variety: fields.variety,
            price: fields.price,
            description: fields.description,
            in_stock: fields.in_stock,
            created_at: fields.created_at,
            updated_at: fields.updated_at,
        };
        inner.index(&record);
        inner.records.insert(record.id, record);
        Ok(inner.last_id)
    }

    async fn patch(&self, id: DbId, patch: &TomatoPatch) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().await;
        let Some(mut record) = inner.records.remove(&id) else {
            return Ok(false);
        };
        inner.unindex(&record);
        patch.apply(&mut record);
        inner.index(&record);
        inner.records.insert(id, record);
        Ok(true)
    }

    async fn delete(&self, id: DbId) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().await;
        match inner.records.remove(&id) {
            Some(record) => {
                inner.unindex(&record);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn scan(&self, filter: Option<&FieldMatch>) -> Result<Vec<Tomato>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .records
            .values()
            .filter(|record| filter.map_or(true, |f| f.matches(record)))
            .cloned()
            .collect())
    }

    async fn scan_index(&self, lookup: &IndexLookup) -> Result<Vec<Tomato>, StoreError> {
        let inner = self.inner.read().await;
        let ids = match lookup {
            IndexLookup::ByName(name) => inner.by_name.get(name),
            IndexLookup::ByVariety(variety) => inner.by_variety.get(variety),
            IndexLookup::ByPrice(price) => inner.by_price.get(&price_key(*price)),
        };
        Ok(inner.collect(ids))
    }
}
