//! Verb catalog records.
//!
//! # Responsibility
//! - Define the typed shape of verb entries, paradigms and forms.
//! - Model metadata-only placeholder records as a separate `StubEntry` kind.
//! - Report data-integrity violations with the offending lemma and slot.
//!
//! # Invariants
//! - A `VerbEntry` has at least one paradigm.
//! - Every paradigm tags at least one region.
//! - `(mood, tense, person)` is unique within one paradigm.
//! - Records are immutable once a catalog is loaded.

use crate::model::grammar::{optional_person, Mood, Person, Slot, Tense};
use crate::model::region::{DialectVariant, Region};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Informational regularity tag. Does not gate any behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerbType {
    #[default]
    Regular,
    Irregular,
}

/// One grammatical slot's surface realization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Form {
    pub mood: Mood,
    pub tense: Tense,
    /// `None` for nonfinite forms; `""` on the wire.
    #[serde(default, with = "optional_person")]
    pub person: Option<Person>,
    /// Canonical spelling for the paradigm's base regions.
    pub value: String,
    /// Alternate accepted spellings keyed by dialect, e.g. `{"vos": "cerrás"}`.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub accepts: BTreeMap<DialectVariant, String>,
}

impl Form {
    pub fn new(slot: Slot, value: impl Into<String>) -> Self {
        Self {
            mood: slot.mood,
            tense: slot.tense,
            person: slot.person,
            value: value.into(),
            accepts: BTreeMap::new(),
        }
    }

    /// Adds one dialect alternate.
    pub fn accepting(mut self, variant: DialectVariant, value: impl Into<String>) -> Self {
        self.accepts.insert(variant, value.into());
        self
    }

    pub fn slot(&self) -> Slot {
        Slot::new(self.mood, self.tense, self.person)
    }

    pub fn accepted(&self, variant: DialectVariant) -> Option<&str> {
        self.accepts.get(&variant).map(String::as_str)
    }

    fn integrity_issues(&self, lemma: &str, issues: &mut Vec<CatalogIntegrityError>) {
        let slot = self.slot();
        if self.tense.mood() != self.mood {
            issues.push(CatalogIntegrityError::TenseMoodMismatch {
                lemma: lemma.to_string(),
                slot,
            });
        }
        match (self.mood.is_finite(), self.person) {
            (true, None) => issues.push(CatalogIntegrityError::MissingPerson {
                lemma: lemma.to_string(),
                slot,
            }),
            (false, Some(_)) => issues.push(CatalogIntegrityError::PersonOnNonfinite {
                lemma: lemma.to_string(),
                slot,
            }),
            _ => {}
        }
        if self.value.trim().is_empty() {
            issues.push(CatalogIntegrityError::EmptyValue {
                lemma: lemma.to_string(),
                slot,
            });
        }
        if !self.accepts.is_empty() && self.person != Some(Person::SecondSingularTu) {
            issues.push(CatalogIntegrityError::MisplacedAlternate {
                lemma: lemma.to_string(),
                slot,
            });
        }
        for (variant, alternate) in &self.accepts {
            if alternate.trim().is_empty() {
                issues.push(CatalogIntegrityError::EmptyAlternate {
                    lemma: lemma.to_string(),
                    slot,
                    variant: *variant,
                });
            }
        }
    }
}

/// Conjugation table scoped to one or more regions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paradigm {
    pub region_tags: Vec<Region>,
    pub forms: Vec<Form>,
}

impl Paradigm {
    pub fn new(region_tags: impl IntoIterator<Item = Region>, forms: Vec<Form>) -> Self {
        Self {
            region_tags: region_tags.into_iter().collect(),
            forms,
        }
    }

    /// Distinct regions in first-seen order.
    pub fn regions(&self) -> impl Iterator<Item = Region> + '_ {
        let mut seen = BTreeSet::new();
        self.region_tags
            .iter()
            .copied()
            .filter(move |region| seen.insert(*region))
    }
}

/// Per-tense irregularity flags as authored. Unspecified tenses read `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IrregularityMatrix(BTreeMap<Tense, bool>);

impl IrregularityMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, tense: Tense, irregular: bool) -> Self {
        self.0.insert(tense, irregular);
        self
    }

    pub fn is_irregular(&self, tense: Tense) -> bool {
        self.0.get(&tense).copied().unwrap_or(false)
    }

    /// Tenses explicitly flagged irregular.
    pub fn irregular_tenses(&self) -> impl Iterator<Item = Tense> + '_ {
        self.0
            .iter()
            .filter(|(_, irregular)| **irregular)
            .map(|(tense, _)| *tense)
    }
}

/// A fully conjugated verb.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerbEntry {
    /// Stable identifier, distinct from `lemma`.
    pub id: String,
    /// Canonical infinitive; the merge key.
    pub lemma: String,
    #[serde(rename = "type", default)]
    pub kind: VerbType,
    pub paradigms: Vec<Paradigm>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub irregularity_matrix: Option<IrregularityMatrix>,
}

impl VerbEntry {
    pub fn new(
        id: impl Into<String>,
        lemma: impl Into<String>,
        kind: VerbType,
        paradigms: Vec<Paradigm>,
    ) -> Self {
        Self {
            id: id.into(),
            lemma: lemma.into(),
            kind,
            paradigms,
            irregularity_matrix: None,
        }
    }

    /// Collects every integrity violation of this entry, in paradigm order.
    ///
    /// Cross-paradigm region conflicts are detected by the index builder.
    pub fn integrity_issues(&self) -> Vec<CatalogIntegrityError> {
        let mut issues = Vec::new();
        let lemma = self.lemma.trim();
        if lemma.is_empty() {
            issues.push(CatalogIntegrityError::BlankLemma {
                id: self.id.clone(),
            });
        }
        if self.id.trim().is_empty() {
            issues.push(CatalogIntegrityError::BlankId {
                lemma: lemma.to_string(),
            });
        }
        if self.paradigms.is_empty() {
            issues.push(CatalogIntegrityError::EmptyParadigms {
                lemma: lemma.to_string(),
            });
        }

        for (paradigm_index, paradigm) in self.paradigms.iter().enumerate() {
            if paradigm.region_tags.is_empty() {
                issues.push(CatalogIntegrityError::EmptyRegionTags {
                    lemma: lemma.to_string(),
                    paradigm: paradigm_index,
                });
            }
            let mut seen = BTreeSet::new();
            for form in &paradigm.forms {
                form.integrity_issues(lemma, &mut issues);
                if !seen.insert(form.slot()) {
                    issues.push(CatalogIntegrityError::DuplicateSlot {
                        lemma: lemma.to_string(),
                        paradigm: paradigm_index,
                        slot: form.slot(),
                    });
                }
            }
        }
        issues
    }

    /// Returns the first integrity violation, if any.
    pub fn validate(&self) -> Result<(), CatalogIntegrityError> {
        match self.integrity_issues().into_iter().next() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Metadata placeholder: an infinitive plus an authored irregularity summary.
///
/// Stubs carry no paradigm and are never a conjugation source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StubEntry {
    pub id: String,
    pub lemma: String,
    pub infinitive: String,
    pub irregularity_matrix: IrregularityMatrix,
}

impl StubEntry {
    pub fn integrity_issues(&self) -> Vec<CatalogIntegrityError> {
        let mut issues = Vec::new();
        if self.lemma.trim().is_empty() {
            issues.push(CatalogIntegrityError::BlankLemma {
                id: self.id.clone(),
            });
        }
        if self.id.trim().is_empty() {
            issues.push(CatalogIntegrityError::BlankId {
                lemma: self.lemma.trim().to_string(),
            });
        }
        issues
    }
}

/// Any record a catalog source may contain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CatalogRecord {
    Verb(VerbEntry),
    Stub(StubEntry),
}

impl CatalogRecord {
    pub fn id(&self) -> &str {
        match self {
            Self::Verb(entry) => &entry.id,
            Self::Stub(stub) => &stub.id,
        }
    }

    pub fn lemma(&self) -> &str {
        match self {
            Self::Verb(entry) => &entry.lemma,
            Self::Stub(stub) => &stub.lemma,
        }
    }

    pub fn as_verb(&self) -> Option<&VerbEntry> {
        match self {
            Self::Verb(entry) => Some(entry),
            Self::Stub(_) => None,
        }
    }

    pub fn is_stub(&self) -> bool {
        matches!(self, Self::Stub(_))
    }

    /// Authored irregularity summary, if any.
    pub fn irregularity_matrix(&self) -> Option<&IrregularityMatrix> {
        match self {
            Self::Verb(entry) => entry.irregularity_matrix.as_ref(),
            Self::Stub(stub) => Some(&stub.irregularity_matrix),
        }
    }

    pub fn integrity_issues(&self) -> Vec<CatalogIntegrityError> {
        match self {
            Self::Verb(entry) => entry.integrity_issues(),
            Self::Stub(stub) => stub.integrity_issues(),
        }
    }
}

impl From<VerbEntry> for CatalogRecord {
    fn from(value: VerbEntry) -> Self {
        Self::Verb(value)
    }
}

impl From<StubEntry> for CatalogRecord {
    fn from(value: StubEntry) -> Self {
        Self::Stub(value)
    }
}

/// Wire shape shared by both record kinds before classification.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCatalogRecord {
    id: String,
    lemma: String,
    #[serde(rename = "type", default)]
    kind: VerbType,
    #[serde(default)]
    paradigms: Option<Vec<Paradigm>>,
    #[serde(default)]
    infinitive: Option<String>,
    #[serde(default)]
    irregularity_matrix: Option<IrregularityMatrix>,
}

impl TryFrom<RawCatalogRecord> for CatalogRecord {
    type Error = String;

    fn try_from(raw: RawCatalogRecord) -> Result<Self, Self::Error> {
        match (raw.paradigms, raw.irregularity_matrix) {
            // An explicit `paradigms` field always means a full entry, even
            // when empty; integrity checks reject the empty case later.
            (Some(paradigms), irregularity_matrix) => Ok(Self::Verb(VerbEntry {
                id: raw.id,
                lemma: raw.lemma,
                kind: raw.kind,
                paradigms,
                irregularity_matrix,
            })),
            (None, Some(irregularity_matrix)) => Ok(Self::Stub(StubEntry {
                infinitive: raw.infinitive.unwrap_or_else(|| raw.lemma.clone()),
                id: raw.id,
                lemma: raw.lemma,
                irregularity_matrix,
            })),
            (None, None) => Err(format!(
                "record `{}` has neither paradigms nor irregularityMatrix",
                raw.lemma
            )),
        }
    }
}

impl<'de> Deserialize<'de> for CatalogRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawCatalogRecord::deserialize(deserializer)?;
        Self::try_from(raw).map_err(serde::de::Error::custom)
    }
}

/// Data-integrity violation. Fatal to the offending entry only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogIntegrityError {
    BlankId {
        lemma: String,
    },
    BlankLemma {
        id: String,
    },
    EmptyParadigms {
        lemma: String,
    },
    EmptyRegionTags {
        lemma: String,
        paradigm: usize,
    },
    DuplicateSlot {
        lemma: String,
        paradigm: usize,
        slot: Slot,
    },
    TenseMoodMismatch {
        lemma: String,
        slot: Slot,
    },
    MissingPerson {
        lemma: String,
        slot: Slot,
    },
    PersonOnNonfinite {
        lemma: String,
        slot: Slot,
    },
    EmptyValue {
        lemma: String,
        slot: Slot,
    },
    EmptyAlternate {
        lemma: String,
        slot: Slot,
        variant: DialectVariant,
    },
    MisplacedAlternate {
        lemma: String,
        slot: Slot,
    },
    /// Two paradigms of one entry tag the same region and define the same slot.
    RegionSlotConflict {
        lemma: String,
        region: Region,
        slot: Slot,
        first_paradigm: usize,
        second_paradigm: usize,
    },
    /// The same lemma reached the index twice; catalogs must be merged first.
    DuplicateLemma {
        lemma: String,
    },
}

impl CatalogIntegrityError {
    /// Lemma of the offending record (empty for blank-lemma records).
    pub fn lemma(&self) -> &str {
        match self {
            Self::BlankLemma { .. } => "",
            Self::BlankId { lemma }
            | Self::EmptyParadigms { lemma }
            | Self::EmptyRegionTags { lemma, .. }
            | Self::DuplicateSlot { lemma, .. }
            | Self::TenseMoodMismatch { lemma, .. }
            | Self::MissingPerson { lemma, .. }
            | Self::PersonOnNonfinite { lemma, .. }
            | Self::EmptyValue { lemma, .. }
            | Self::EmptyAlternate { lemma, .. }
            | Self::MisplacedAlternate { lemma, .. }
            | Self::RegionSlotConflict { lemma, .. }
            | Self::DuplicateLemma { lemma } => lemma,
        }
    }

    /// Offending slot, when the violation is slot-scoped.
    pub fn slot(&self) -> Option<Slot> {
        match self {
            Self::DuplicateSlot { slot, .. }
            | Self::TenseMoodMismatch { slot, .. }
            | Self::MissingPerson { slot, .. }
            | Self::PersonOnNonfinite { slot, .. }
            | Self::EmptyValue { slot, .. }
            | Self::EmptyAlternate { slot, .. }
            | Self::MisplacedAlternate { slot, .. }
            | Self::RegionSlotConflict { slot, .. } => Some(*slot),
            _ => None,
        }
    }
}

impl Display for CatalogIntegrityError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankId { lemma } => write!(f, "entry `{lemma}` has a blank id"),
            Self::BlankLemma { id } => write!(f, "entry with id `{id}` has a blank lemma"),
            Self::EmptyParadigms { lemma } => write!(f, "entry `{lemma}` has no paradigms"),
            Self::EmptyRegionTags { lemma, paradigm } => {
                write!(f, "entry `{lemma}` paradigm #{paradigm} has no region tags")
            }
            Self::DuplicateSlot {
                lemma,
                paradigm,
                slot,
            } => write!(
                f,
                "entry `{lemma}` paradigm #{paradigm} defines slot {slot} more than once"
            ),
            Self::TenseMoodMismatch { lemma, slot } => {
                write!(f, "entry `{lemma}` slot {slot} uses a tense outside its mood")
            }
            Self::MissingPerson { lemma, slot } => {
                write!(f, "entry `{lemma}` finite slot {slot} has no person")
            }
            Self::PersonOnNonfinite { lemma, slot } => {
                write!(f, "entry `{lemma}` nonfinite slot {slot} must not carry a person")
            }
            Self::EmptyValue { lemma, slot } => {
                write!(f, "entry `{lemma}` slot {slot} has an empty value")
            }
            Self::EmptyAlternate {
                lemma,
                slot,
                variant,
            } => write!(
                f,
                "entry `{lemma}` slot {slot} has an empty `{variant}` alternate"
            ),
            Self::MisplacedAlternate { lemma, slot } => write!(
                f,
                "entry `{lemma}` slot {slot} carries accepts but is not a 2s_tu form"
            ),
            Self::RegionSlotConflict {
                lemma,
                region,
                slot,
                first_paradigm,
                second_paradigm,
            } => write!(
                f,
                "entry `{lemma}` slot {slot} is defined for region {region} by paradigms #{first_paradigm} and #{second_paradigm}"
            ),
            Self::DuplicateLemma { lemma } => {
                write!(f, "lemma `{lemma}` appears more than once in the catalog")
            }
        }
    }
}

impl Error for CatalogIntegrityError {}

#[cfg(test)]
mod tests {
    use super::{
        CatalogIntegrityError, CatalogRecord, Form, IrregularityMatrix, Paradigm, VerbEntry,
        VerbType,
    };
    use crate::model::grammar::{Mood, Person, Slot, Tense};
    use crate::model::region::{DialectVariant, Region};

    fn pres(person: Person) -> Slot {
        Slot::finite(Mood::Indicative, Tense::Pres, person)
    }

    fn hablar() -> VerbEntry {
        VerbEntry::new(
            "v-hablar",
            "hablar",
            VerbType::Regular,
            vec![Paradigm::new(
                [Region::LaGeneral, Region::Rioplatense],
                vec![
                    Form::new(pres(Person::FirstSingular), "hablo"),
                    Form::new(pres(Person::SecondSingularTu), "hablas")
                        .accepting(DialectVariant::Vos, "hablás"),
                    Form::new(Slot::nonfinite(Tense::Inf), "hablar"),
                ],
            )],
        )
    }

    #[test]
    fn well_formed_entry_has_no_issues() {
        assert!(hablar().integrity_issues().is_empty());
        assert!(hablar().validate().is_ok());
    }

    #[test]
    fn rejects_entry_without_paradigms() {
        let mut entry = hablar();
        entry.paradigms.clear();
        assert_eq!(
            entry.validate().unwrap_err(),
            CatalogIntegrityError::EmptyParadigms {
                lemma: "hablar".to_string()
            }
        );
    }

    #[test]
    fn rejects_paradigm_without_region_tags() {
        let mut entry = hablar();
        entry.paradigms[0].region_tags.clear();
        assert_eq!(
            entry.validate().unwrap_err(),
            CatalogIntegrityError::EmptyRegionTags {
                lemma: "hablar".to_string(),
                paradigm: 0
            }
        );
    }

    #[test]
    fn rejects_duplicate_slot_within_paradigm() {
        let mut entry = hablar();
        entry.paradigms[0]
            .forms
            .push(Form::new(pres(Person::FirstSingular), "hablo"));
        let issues = entry.integrity_issues();
        assert_eq!(
            issues,
            vec![CatalogIntegrityError::DuplicateSlot {
                lemma: "hablar".to_string(),
                paradigm: 0,
                slot: pres(Person::FirstSingular),
            }]
        );
        assert!(issues[0].to_string().contains("indicative/pres/1s"));
    }

    #[test]
    fn reports_every_form_level_violation() {
        let mut entry = hablar();
        entry.paradigms[0].forms.extend([
            Form::new(
                Slot::new(Mood::Subjunctive, Tense::Pres, Some(Person::ThirdSingular)),
                "hable",
            ),
            Form::new(Slot::new(Mood::Indicative, Tense::Fut, None), "hablará"),
            Form::new(
                Slot::new(Mood::Nonfinite, Tense::Ger, Some(Person::ThirdSingular)),
                "hablando",
            ),
            Form::new(pres(Person::ThirdPlural), "  "),
            Form::new(pres(Person::ThirdSingular), "habla").accepting(DialectVariant::Vos, "habla"),
        ]);
        let issues = entry.integrity_issues();
        assert_eq!(issues.len(), 5);
        assert!(matches!(issues[0], CatalogIntegrityError::TenseMoodMismatch { .. }));
        assert!(matches!(issues[1], CatalogIntegrityError::MissingPerson { .. }));
        assert!(matches!(issues[2], CatalogIntegrityError::PersonOnNonfinite { .. }));
        assert!(matches!(issues[3], CatalogIntegrityError::EmptyValue { .. }));
        assert!(matches!(issues[4], CatalogIntegrityError::MisplacedAlternate { .. }));
        assert!(issues.iter().all(|issue| issue.lemma() == "hablar"));
    }

    #[test]
    fn irregularity_matrix_defaults_to_regular() {
        let matrix = IrregularityMatrix::new().with(Tense::PretIndef, true).with(Tense::Pres, false);
        assert!(matrix.is_irregular(Tense::PretIndef));
        assert!(!matrix.is_irregular(Tense::Pres));
        assert!(!matrix.is_irregular(Tense::SubjImpf));
        assert_eq!(matrix.irregular_tenses().collect::<Vec<_>>(), vec![Tense::PretIndef]);
    }

    #[test]
    fn decodes_verb_records_with_wire_field_names() {
        let record: CatalogRecord = serde_json::from_value(serde_json::json!({
            "id": "v-cerrar",
            "lemma": "cerrar",
            "type": "irregular",
            "paradigms": [{
                "regionTags": ["rioplatense"],
                "forms": [{
                    "mood": "subjunctive",
                    "tense": "subjPres",
                    "person": "2s_tu",
                    "value": "cierres",
                    "accepts": { "vos": "cierres" }
                }, {
                    "mood": "nonfinite",
                    "tense": "part",
                    "person": "",
                    "value": "cerrado"
                }]
            }]
        }))
        .expect("verb record decodes");

        let entry = record.as_verb().expect("record is a verb entry");
        assert_eq!(entry.kind, VerbType::Irregular);
        let form = &entry.paradigms[0].forms[0];
        assert_eq!(form.accepted(DialectVariant::Vos), Some("cierres"));
        assert_eq!(entry.paradigms[0].forms[1].person, None);
    }

    #[test]
    fn decodes_stub_records_without_paradigms() {
        let record: CatalogRecord = serde_json::from_value(serde_json::json!({
            "id": "auto-agredir",
            "lemma": "agredir",
            "irregularityMatrix": { "pres": true }
        }))
        .expect("stub record decodes");

        assert!(record.is_stub());
        let CatalogRecord::Stub(stub) = &record else {
            panic!("expected stub");
        };
        assert_eq!(stub.infinitive, "agredir");
        assert!(record
            .irregularity_matrix()
            .expect("stub matrix")
            .is_irregular(Tense::Pres));
    }

    #[test]
    fn empty_paradigm_list_stays_a_verb_entry() {
        let record: CatalogRecord = serde_json::from_value(serde_json::json!({
            "id": "v-x",
            "lemma": "x",
            "paradigms": [],
            "irregularityMatrix": {}
        }))
        .expect("record decodes");
        assert!(!record.is_stub());
        assert!(matches!(
            record.integrity_issues()[0],
            CatalogIntegrityError::EmptyParadigms { .. }
        ));
    }

    #[test]
    fn rejects_records_without_paradigms_or_matrix() {
        let err = serde_json::from_value::<CatalogRecord>(serde_json::json!({
            "id": "v-x",
            "lemma": "x"
        }))
        .unwrap_err();
        assert!(err
            .to_string()
            .contains("has neither paradigms nor irregularityMatrix"));
    }
}
