//! Lookup structures over a merged catalog.
//!
//! # Responsibility
//! - Index records by lemma, and forms by lemma -> region -> slot.
//! - Detect cross-paradigm slot conflicts per region.
//! - Expose authored irregularity metadata with a regular default.
//!
//! # Invariants
//! - An entry with any integrity violation is excluded wholesale; the rest
//!   of the catalog is still indexed.
//! - Two paradigms of one entry never both own a slot in the same region.
//! - The index is immutable after `build_index` returns.

use crate::model::grammar::{Slot, Tense};
use crate::model::region::{DialectVariant, Region};
use crate::model::verb::{CatalogIntegrityError, CatalogRecord, IrregularityMatrix, VerbEntry};
use log::{info, warn};
use std::collections::{BTreeMap, BTreeSet, HashMap};

type RegionSlots = BTreeMap<Region, HashMap<Slot, IndexedForm>>;

/// One form as visible under one region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedForm {
    pub value: String,
    pub accepts: BTreeMap<DialectVariant, String>,
    /// Position of the owning paradigm inside its entry.
    pub paradigm: usize,
}

impl IndexedForm {
    pub fn accepted(&self, variant: DialectVariant) -> Option<&str> {
        self.accepts.get(&variant).map(String::as_str)
    }
}

/// Catalog-wide counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexStats {
    pub verbs: usize,
    pub stubs: usize,
    pub rejected: usize,
    /// Region-scoped form registrations.
    pub forms: usize,
}

/// Read-only lookup handle over one merged catalog.
#[derive(Debug, Default)]
pub struct CatalogIndex {
    by_lemma: HashMap<String, CatalogRecord>,
    slots: HashMap<String, RegionSlots>,
    rejected: BTreeSet<String>,
}

/// Index plus every integrity violation found while building it.
#[derive(Debug)]
pub struct IndexBuild {
    pub index: CatalogIndex,
    pub issues: Vec<CatalogIntegrityError>,
}

/// Builds the lookup index for a merged catalog.
///
/// Never fails as a whole: offending entries are reported in
/// `IndexBuild::issues` and left out of the index.
pub fn build_index(records: &[CatalogRecord]) -> IndexBuild {
    let mut index = CatalogIndex::default();
    let mut issues = Vec::new();

    for record in records {
        let lemma = record.lemma().trim().to_string();
        if index.by_lemma.contains_key(&lemma) || index.rejected.contains(&lemma) {
            let issue = CatalogIntegrityError::DuplicateLemma { lemma };
            warn!(
                "event=index_entry_rejected module=index status=error lemma={} reason={}",
                issue.lemma(),
                issue
            );
            issues.push(issue);
            continue;
        }

        let mut entry_issues = record.integrity_issues();
        let table = match record {
            CatalogRecord::Verb(entry) => {
                let (table, conflicts) = region_slot_table(entry);
                entry_issues.extend(conflicts);
                Some(table)
            }
            CatalogRecord::Stub(_) => None,
        };

        if !entry_issues.is_empty() {
            for issue in &entry_issues {
                warn!(
                    "event=index_entry_rejected module=index status=error lemma={} reason={}",
                    lemma, issue
                );
            }
            issues.extend(entry_issues);
            index.rejected.insert(lemma);
            continue;
        }

        if let Some(table) = table {
            index.slots.insert(lemma.clone(), table);
        }
        index.by_lemma.insert(lemma, record.clone());
    }

    let stats = index.stats();
    info!(
        "event=index_build module=index status=ok verbs={} stubs={} rejected={} forms={}",
        stats.verbs, stats.stubs, stats.rejected, stats.forms
    );
    IndexBuild { index, issues }
}

fn region_slot_table(entry: &VerbEntry) -> (RegionSlots, Vec<CatalogIntegrityError>) {
    let mut table = RegionSlots::new();
    let mut conflicts = Vec::new();

    for (paradigm_index, paradigm) in entry.paradigms.iter().enumerate() {
        for region in paradigm.regions() {
            let region_forms = table.entry(region).or_default();
            for form in &paradigm.forms {
                let slot = form.slot();
                match region_forms.get(&slot) {
                    // Same-paradigm repeats are already reported as DuplicateSlot.
                    Some(existing) if existing.paradigm == paradigm_index => {}
                    Some(existing) => conflicts.push(CatalogIntegrityError::RegionSlotConflict {
                        lemma: entry.lemma.trim().to_string(),
                        region,
                        slot,
                        first_paradigm: existing.paradigm,
                        second_paradigm: paradigm_index,
                    }),
                    None => {
                        region_forms.insert(
                            slot,
                            IndexedForm {
                                value: form.value.clone(),
                                accepts: form.accepts.clone(),
                                paradigm: paradigm_index,
                            },
                        );
                    }
                }
            }
        }
    }
    (table, conflicts)
}

impl CatalogIndex {
    /// Record for a lemma, verb or stub.
    pub fn entry(&self, lemma: &str) -> Option<&CatalogRecord> {
        self.by_lemma.get(lemma.trim())
    }

    pub fn contains(&self, lemma: &str) -> bool {
        self.by_lemma.contains_key(lemma.trim())
    }

    /// Whether the lemma was present in the catalog but failed integrity checks.
    pub fn is_rejected(&self, lemma: &str) -> bool {
        self.rejected.contains(lemma.trim())
    }

    /// Indexed lemmas, sorted.
    pub fn lemmas(&self) -> Vec<&str> {
        let mut lemmas: Vec<&str> = self.by_lemma.keys().map(String::as_str).collect();
        lemmas.sort_unstable();
        lemmas
    }

    /// Rejected lemmas, sorted.
    pub fn rejected_lemmas(&self) -> impl Iterator<Item = &str> {
        self.rejected.iter().map(String::as_str)
    }

    /// Regions with at least one paradigm for this lemma, sorted.
    pub fn regions_for(&self, lemma: &str) -> Vec<Region> {
        self.slots
            .get(lemma.trim())
            .map(|table| table.keys().copied().collect())
            .unwrap_or_default()
    }

    /// Whether any paradigm of the lemma tags `region`.
    pub fn attests(&self, lemma: &str, region: Region) -> bool {
        self.slots
            .get(lemma.trim())
            .is_some_and(|table| table.contains_key(&region))
    }

    /// Direct slot lookup, without any dialect fallback.
    pub fn lookup(&self, lemma: &str, region: Region, slot: Slot) -> Option<&IndexedForm> {
        self.slots.get(lemma.trim())?.get(&region)?.get(&slot)
    }

    /// Every slot visible for the lemma in `region`, sorted by slot.
    pub fn slots_for(&self, lemma: &str, region: Region) -> Vec<(Slot, &IndexedForm)> {
        let Some(forms) = self
            .slots
            .get(lemma.trim())
            .and_then(|table| table.get(&region))
        else {
            return Vec::new();
        };
        let mut slots: Vec<(Slot, &IndexedForm)> =
            forms.iter().map(|(slot, form)| (*slot, form)).collect();
        slots.sort_by_key(|(slot, _)| *slot);
        slots
    }

    /// Authored irregularity summary for a lemma.
    pub fn irregularity(&self, lemma: &str) -> Option<&IrregularityMatrix> {
        self.entry(lemma)?.irregularity_matrix()
    }

    /// Whether the lemma is flagged irregular in `tense`.
    ///
    /// Returns `None` for unknown lemmas; unspecified tenses and entries
    /// without a matrix read as regular.
    pub fn is_irregular(&self, lemma: &str, tense: Tense) -> Option<bool> {
        let record = self.entry(lemma)?;
        Some(
            record
                .irregularity_matrix()
                .is_some_and(|matrix| matrix.is_irregular(tense)),
        )
    }

    pub fn stats(&self) -> IndexStats {
        let stubs = self.by_lemma.values().filter(|record| record.is_stub()).count();
        IndexStats {
            verbs: self.by_lemma.len() - stubs,
            stubs,
            rejected: self.rejected.len(),
            forms: self
                .slots
                .values()
                .flat_map(BTreeMap::values)
                .map(HashMap::len)
                .sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::build_index;
    use crate::model::grammar::{Mood, Person, Slot, Tense};
    use crate::model::region::Region;
    use crate::model::verb::{
        CatalogIntegrityError, CatalogRecord, Form, IrregularityMatrix, Paradigm, StubEntry,
        VerbEntry, VerbType,
    };

    fn pres(person: Person) -> Slot {
        Slot::finite(Mood::Indicative, Tense::Pres, person)
    }

    fn vivir() -> VerbEntry {
        VerbEntry::new(
            "v-vivir",
            "vivir",
            VerbType::Regular,
            vec![
                Paradigm::new(
                    [Region::LaGeneral, Region::Peninsular],
                    vec![
                        Form::new(pres(Person::FirstSingular), "vivo"),
                        Form::new(pres(Person::SecondSingularTu), "vives"),
                    ],
                ),
                Paradigm::new(
                    [Region::Peninsular],
                    vec![Form::new(pres(Person::SecondPluralVosotros), "vivís")],
                ),
                Paradigm::new(
                    [Region::Rioplatense],
                    vec![
                        Form::new(pres(Person::FirstSingular), "vivo"),
                        Form::new(pres(Person::SecondSingularVos), "vivís"),
                    ],
                ),
            ],
        )
    }

    #[test]
    fn indexes_forms_under_each_tagged_region() {
        let build = build_index(&[vivir().into()]);
        assert!(build.issues.is_empty());
        let index = build.index;

        assert_eq!(
            index.regions_for("vivir"),
            vec![Region::Rioplatense, Region::LaGeneral, Region::Peninsular]
        );
        assert_eq!(
            index
                .lookup("vivir", Region::Peninsular, pres(Person::SecondPluralVosotros))
                .map(|form| form.value.as_str()),
            Some("vivís")
        );
        assert!(index
            .lookup("vivir", Region::LaGeneral, pres(Person::SecondPluralVosotros))
            .is_none());
        assert_eq!(index.slots_for("vivir", Region::Peninsular).len(), 3);
        assert_eq!(index.stats().forms, 7);
    }

    #[test]
    fn rejects_cross_paradigm_conflicts_without_blocking_others() {
        let mut broken = vivir();
        broken.lemma = "convivir".to_string();
        broken.paradigms[1]
            .forms
            .push(Form::new(pres(Person::FirstSingular), "convivo"));

        let build = build_index(&[broken.into(), vivir().into()]);
        assert_eq!(
            build.issues,
            vec![CatalogIntegrityError::RegionSlotConflict {
                lemma: "convivir".to_string(),
                region: Region::Peninsular,
                slot: pres(Person::FirstSingular),
                first_paradigm: 0,
                second_paradigm: 1,
            }]
        );
        assert!(build.index.is_rejected("convivir"));
        assert_eq!(build.index.rejected_lemmas().collect::<Vec<_>>(), vec!["convivir"]);
        assert!(!build.index.contains("convivir"));
        assert!(build.index.contains("vivir"));
        assert_eq!(build.index.stats().rejected, 1);
    }

    #[test]
    fn reports_unmerged_duplicate_lemmas() {
        let build = build_index(&[vivir().into(), vivir().into()]);
        assert_eq!(
            build.issues,
            vec![CatalogIntegrityError::DuplicateLemma {
                lemma: "vivir".to_string()
            }]
        );
        assert!(build.index.contains("vivir"));
    }

    #[test]
    fn stubs_are_indexed_by_lemma_only() {
        let stub = CatalogRecord::Stub(StubEntry {
            id: "auto-balbucir".to_string(),
            lemma: "balbucir".to_string(),
            infinitive: "balbucir".to_string(),
            irregularity_matrix: IrregularityMatrix::new().with(Tense::Pres, true),
        });
        let index = build_index(&[stub, vivir().into()]).index;

        assert!(index.contains("balbucir"));
        assert!(index.regions_for("balbucir").is_empty());
        assert_eq!(
            index.irregularity("balbucir"),
            Some(&IrregularityMatrix::new().with(Tense::Pres, true))
        );
        assert_eq!(index.irregularity("vivir"), None);
        assert_eq!(index.is_irregular("balbucir", Tense::Pres), Some(true));
        assert_eq!(index.is_irregular("balbucir", Tense::Fut), Some(false));
        assert_eq!(index.is_irregular("vivir", Tense::Pres), Some(false));
        assert_eq!(index.is_irregular("salir", Tense::Pres), None);
        assert_eq!(index.stats().stubs, 1);
        assert_eq!(index.stats().verbs, 1);
        assert_eq!(index.lemmas(), vec!["balbucir", "vivir"]);
    }

    #[test]
    fn lemma_lookup_trims_whitespace() {
        let index = build_index(&[vivir().into()]).index;
        assert!(index.contains("  vivir "));
        assert!(index.attests(" vivir", Region::Rioplatense));
    }
}
