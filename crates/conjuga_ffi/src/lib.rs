//! Flutter bridge surface over `conjuga_core`.

pub mod api;
