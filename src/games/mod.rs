//! Card content.
//!
//! - `base`: the base set, as a `CatalogProvider`

pub mod base;
