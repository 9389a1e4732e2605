//! Outbound adapter loading the content catalogue from disk.

pub mod json_catalogue;

pub use json_catalogue::{CatalogueLoadError, JsonContentCatalogue};
