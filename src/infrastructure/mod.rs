//! Catalog storage
//!
//! Concrete [`crate::traversal::LineageSource`] implementations.

mod catalog;

pub use catalog::{CatalogError, CatalogSnapshot, InMemoryCatalog};
