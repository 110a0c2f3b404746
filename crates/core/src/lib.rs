//! Domain layer for the tomato records service.
//!
//! Holds the record types, input validation, the [`store::TomatoStore`]
//! capability trait with its in-memory implementation, and the
//! [`service::TomatoService`] that applies creation defaults, merge-patch
//! updates and lookups on top of any store.

pub mod error;
pub mod field;
pub mod memory_store;
pub mod service;
pub mod store;
pub mod tomato;
pub mod types;
