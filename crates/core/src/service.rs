//! Record service: creation defaults, merge-patch updates, deletion and
//! lookups on top of any [`TomatoStore`].
//!
//! The service keeps no mutable state of its own. Cloning it is cheap and
//! every call is an independent request against the store.

use std::sync::Arc;

use crate::error::CoreError;
use crate::store::{FieldMatch, IndexLookup, TomatoFields, TomatoPatch, TomatoStore};
use crate::tomato::{normalize_price, validate_price, NewTomato, Tomato, UpdateTomato, ENTITY};
use crate::types::{Clock, DbId, SystemClock};

#[derive(Clone)]
pub struct TomatoService {
    store: Arc<dyn TomatoStore>,
    clock: Arc<dyn Clock>,
}

impl TomatoService {
    pub fn new(store: Arc<dyn TomatoStore>) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    pub fn with_clock(store: Arc<dyn TomatoStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Validate and insert a new record, returning its assigned id.
    ///
    /// `in_stock` defaults to `true`; `created_at` and `updated_at` are both
    /// set to the current time.
    pub async fn create(&self, input: NewTomato) -> Result<DbId, CoreError> {
        input.check()?;
        let now = self.clock.now_millis();
        let fields = TomatoFields {
            name: input.name,
            variety: input.variety,
            price: normalize_price(input.price),
            description: input.description,
            in_stock: input.in_stock.unwrap_or(true),
            created_at: now,
            updated_at: now,
        };
        Ok(self.store.insert(fields).await?)
    }

    /// Merge the supplied fields into an existing record and return the
    /// record as it now stands.
    ///
    /// An update with no supplied fields issues no write and leaves
    /// `updated_at` untouched. A record deleted while the update is in
    /// flight yields [`CoreError::NotFound`].
    pub async fn update(&self, id: DbId, mut input: UpdateTomato) -> Result<Tomato, CoreError> {
        let existing = self
            .store
            .get(id)
            .await?
            .ok_or_else(|| CoreError::not_found(ENTITY, id))?;
        input.check()?;

        if input.is_empty() {
            return Ok(existing);
        }

        // Never move updated_at backwards, even if the clock does.
        let stamp = self.clock.now_millis().max(existing.updated_at);
        input.price = input.price.map(normalize_price);
        let patch = TomatoPatch::new(input, stamp);
        if !self.store.patch(id, &patch).await? {
            return Err(CoreError::not_found(ENTITY, id));
        }

        self.store
            .get(id)
            .await?
            .ok_or_else(|| CoreError::not_found(ENTITY, id))
    }

    /// Delete a record. Missing records are reported as [`CoreError::NotFound`].
    pub async fn delete(&self, id: DbId) -> Result<(), CoreError> {
        if self.store.get(id).await?.is_none() {
            return Err(CoreError::not_found(ENTITY, id));
        }
        if !self.store.delete(id).await? {
            return Err(CoreError::not_found(ENTITY, id));
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Lookups
    // -----------------------------------------------------------------------

    /// Fetch one record. Absence is `Ok(None)`, not an error.
    pub async fn find_by_id(&self, id: DbId) -> Result<Option<Tomato>, CoreError> {
        Ok(self.store.get(id).await?)
    }

    pub async fn list_all(&self) -> Result<Vec<Tomato>, CoreError> {
        Ok(self.store.scan(None).await?)
    }

    /// Records whose name equals `name` exactly.
    pub async fn find_by_name(&self, name: &str) -> Result<Vec<Tomato>, CoreError> {
        let filter = FieldMatch::Name(name.to_string());
        Ok(self.store.scan(Some(&filter)).await?)
    }

    /// Records whose variety equals `variety` exactly, via the variety index.
    pub async fn find_by_variety(&self, variety: &str) -> Result<Vec<Tomato>, CoreError> {
        let lookup = IndexLookup::ByVariety(variety.to_string());
        Ok(self.store.scan_index(&lookup).await?)
    }

    /// Records priced exactly at `price`, via the price index.
    pub async fn find_by_price(&self, price: f64) -> Result<Vec<Tomato>, CoreError> {
        validate_price(price)?;
        Ok(self.store.scan_index(&IndexLookup::ByPrice(price)).await?)
    }
}
