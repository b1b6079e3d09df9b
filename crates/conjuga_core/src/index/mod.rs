//! Catalog lookup index.

pub mod builder;

pub use builder::{build_index, CatalogIndex, IndexBuild, IndexStats, IndexedForm};
