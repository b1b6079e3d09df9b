//! Core use-case services.
//!
//! # Responsibility
//! - Combine ingestion, resolution and validation into caller-level calls.
//! - Keep FFI and CLI layers decoupled from index internals.

pub mod conjugation_service;
