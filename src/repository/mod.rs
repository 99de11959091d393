//! Repository layer for catalog persistence

pub mod catalog_file;

pub use catalog_file::{CatalogStore, JsonFileStore};
