//! Typed catalog model.
//!
//! # Responsibility
//! - Define verb entries, paradigms, forms and their grammatical keys.
//! - Define the closed region and dialect-variant vocabularies.
//!
//! # Invariants
//! - Catalog records are immutable after load; nothing in core mutates them.
//! - Integrity violations are reported, never silently dropped.

pub mod grammar;
pub mod region;
pub mod verb;
