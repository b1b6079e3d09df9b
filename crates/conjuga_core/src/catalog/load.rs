//! JSON record decoding for one catalog source.
//!
//! # Responsibility
//! - Decode an array of catalog records from JSON text.
//! - Keep decoding the remaining records when one is malformed.
//!
//! # Invariants
//! - Malformed records are reported with their position, never skipped silently.
//! - Record order is preserved.

use crate::model::verb::CatalogRecord;
use log::warn;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type LoadResult<T> = Result<T, CatalogLoadError>;

/// Whole-source decoding failure.
#[derive(Debug)]
pub enum CatalogLoadError {
    /// Text is not valid JSON.
    Json(serde_json::Error),
    /// Top-level JSON value is not an array of records.
    NotAnArray { found: &'static str },
}

impl Display for CatalogLoadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(err) => write!(f, "catalog is not valid JSON: {err}"),
            Self::NotAnArray { found } => {
                write!(f, "catalog must be a JSON array of records, found {found}")
            }
        }
    }
}

impl Error for CatalogLoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            Self::NotAnArray { .. } => None,
        }
    }
}

impl From<serde_json::Error> for CatalogLoadError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// One record that could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordIssue {
    /// Zero-based position in the source array.
    pub position: usize,
    /// Lemma, when the malformed record still carries a readable one.
    pub lemma: Option<String>,
    pub message: String,
}

impl Display for RecordIssue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.lemma {
            Some(lemma) => write!(f, "record #{} (`{lemma}`): {}", self.position, self.message),
            None => write!(f, "record #{}: {}", self.position, self.message),
        }
    }
}

/// Decoded records plus per-record decoding issues.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedCatalog {
    pub records: Vec<CatalogRecord>,
    pub issues: Vec<RecordIssue>,
}

/// Decodes one catalog source.
///
/// # Errors
/// - Returns `Json` when the text is not JSON at all.
/// - Returns `NotAnArray` when the top-level value is not an array.
///
/// Individual malformed records land in `ParsedCatalog::issues`.
pub fn parse_catalog(json: &str) -> LoadResult<ParsedCatalog> {
    let value: Value = serde_json::from_str(json)?;
    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(CatalogLoadError::NotAnArray {
                found: value_kind(&other),
            })
        }
    };

    let mut parsed = ParsedCatalog::default();
    for (position, item) in items.into_iter().enumerate() {
        let lemma = item
            .get("lemma")
            .and_then(Value::as_str)
            .map(str::to_string);
        match serde_json::from_value::<CatalogRecord>(item) {
            Ok(record) => parsed.records.push(record),
            Err(err) => {
                let issue = RecordIssue {
                    position,
                    lemma,
                    message: err.to_string(),
                };
                warn!(
                    "event=catalog_record_rejected module=catalog status=error position={} lemma={} reason={}",
                    issue.position,
                    issue.lemma.as_deref().unwrap_or("-"),
                    issue.message
                );
                parsed.issues.push(issue);
            }
        }
    }
    Ok(parsed)
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
