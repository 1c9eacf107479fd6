//! Surround catalog module
//!
//! This module provides the `Catalog`: the ordered set of enabled surround
//! entries built from the base and user maps, with language filtering,
//! label resolution and recency promotion.

mod resolver;

pub use resolver::{Catalog, CatalogBuild};
