//! Primary-wins merge of catalog sources.
//!
//! # Responsibility
//! - Combine a primary catalog with ordered supplementary catalogs.
//! - Keep exactly one record per lemma, comparing trimmed lemmas.
//!
//! # Invariants
//! - Precedence is whole-record: the earliest source holding a lemma wins
//!   verbatim, later records for that lemma are dropped, never field-merged.
//! - Within one source the first occurrence of a lemma wins.
//! - Inputs are never mutated.

use crate::model::verb::CatalogRecord;
use log::{debug, info};
use std::collections::HashMap;
use std::fmt::{Display, Formatter};

/// Where a record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogSource {
    Primary,
    /// Zero-based position in the supplementary list.
    Supplementary(usize),
}

impl Display for CatalogSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Primary => write!(f, "primary"),
            Self::Supplementary(position) => write!(f, "supplementary#{position}"),
        }
    }
}

/// A record shadowed by an earlier record with the same lemma.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedRecord {
    pub lemma: String,
    pub id: String,
    pub source: CatalogSource,
    pub kept_from: CatalogSource,
}

/// Merge output plus an audit trail of dropped records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    pub records: Vec<CatalogRecord>,
    pub dropped: Vec<DroppedRecord>,
}

/// Merges catalogs with primary-wins, gap-fill-only precedence.
///
/// Records keep their source order: primary first, then each supplementary
/// catalog's new lemmas in the order given.
pub fn merge_catalogs(
    primary: &[CatalogRecord],
    supplementary: &[Vec<CatalogRecord>],
) -> Vec<CatalogRecord> {
    merge_with_report(primary, supplementary).records
}

/// Same as [`merge_catalogs`], also reporting which records were dropped.
pub fn merge_with_report(
    primary: &[CatalogRecord],
    supplementary: &[Vec<CatalogRecord>],
) -> MergeReport {
    let mut report = MergeReport::default();
    let mut owners: HashMap<String, CatalogSource> = HashMap::new();

    let sources = std::iter::once((CatalogSource::Primary, primary)).chain(
        supplementary
            .iter()
            .enumerate()
            .map(|(position, records)| (CatalogSource::Supplementary(position), records.as_slice())),
    );

    for (source, records) in sources {
        let mut added = 0usize;
        for record in records {
            let lemma = record.lemma().trim();
            if let Some(kept_from) = owners.get(lemma) {
                debug!(
                    "event=catalog_record_shadowed module=merge status=ok lemma={} source={} kept_from={}",
                    lemma, source, kept_from
                );
                report.dropped.push(DroppedRecord {
                    lemma: lemma.to_string(),
                    id: record.id().to_string(),
                    source,
                    kept_from: *kept_from,
                });
                continue;
            }
            owners.insert(lemma.to_string(), source);
            report.records.push(record.clone());
            added += 1;
        }
        debug!(
            "event=catalog_source_merged module=merge status=ok source={} offered={} added={}",
            source,
            records.len(),
            added
        );
    }

    info!(
        "event=catalog_merge module=merge status=ok sources={} records={} dropped={}",
        supplementary.len() + 1,
        report.records.len(),
        report.dropped.len()
    );
    report
}
