//! Catalog ingestion: record decoding and source merging.
//!
//! # Responsibility
//! - Turn JSON sources into typed records.
//! - Merge sources into one working catalog with a stated precedence rule.
//!
//! # See also
//! - `crate::index` for the lookup structures built on the merged catalog.

pub mod load;
pub mod merge;
