//! Region-aware slot resolution.
//!
//! # Responsibility
//! - Resolve the surface form for `(lemma, slot, region)`.
//! - Apply the vos fallback from a `2s_tu` form's `accepts.vos`.
//! - Keep "no such conjugation" distinct from "unknown verb or dialect".
//!
//! # Invariants
//! - A direct `2s_vos` slot always wins over the `2s_tu` fallback.
//! - `NotApplicable` is only returned for attested lemma/region pairs.
//! - Resolution never mutates the index.

use crate::index::CatalogIndex;
use crate::model::grammar::{Person, Slot};
use crate::model::region::{DialectVariant, Region};
use std::fmt::{Display, Formatter};

/// How the surface value was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormOrigin {
    /// The requested slot exists in the region's paradigm.
    Direct,
    /// Taken from the `2s_tu` form's `accepts.vos` alternate.
    VosFallback,
}

/// Dialect alternate accepted alongside the canonical value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alternate {
    pub variant: DialectVariant,
    pub value: String,
}

/// A resolved, region-scoped form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceForm {
    pub lemma: String,
    pub slot: Slot,
    pub region: Region,
    /// Canonical expected answer.
    pub value: String,
    pub origin: FormOrigin,
    /// Alternates active for `region`, in variant order.
    pub alternates: Vec<Alternate>,
}

impl SurfaceForm {
    /// Canonical value followed by every active alternate.
    pub fn accepted_values(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.value.as_str())
            .chain(self.alternates.iter().map(|alternate| alternate.value.as_str()))
    }
}

/// Why a lookup could not be answered: a data or caller problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundReason {
    UnknownLemma,
    /// The lemma was in the catalog but failed integrity checks.
    RejectedEntry,
    /// The lemma is a metadata placeholder without paradigms.
    StubOnly,
    /// No paradigm of the lemma is tagged with the requested region.
    UnattestedRegion,
    /// The requested slot is not grammatically well-formed.
    InvalidSlot,
}

impl Display for NotFoundReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::UnknownLemma => "unknown lemma",
            Self::RejectedEntry => "entry rejected by integrity checks",
            Self::StubOnly => "entry has no paradigm data",
            Self::UnattestedRegion => "verb not attested for region",
            Self::InvalidSlot => "malformed slot request",
        };
        f.write_str(text)
    }
}

/// Why a known verb has no form for the slot: linguistically meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotApplicableReason {
    /// The verb is defective in this slot.
    DefectiveSlot,
    /// No direct `2s_vos` slot and no `accepts.vos` on the `2s_tu` form.
    NoVosForm,
}

impl Display for NotApplicableReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::DefectiveSlot => "verb has no form in this slot",
            Self::NoVosForm => "verb has no vos form for this slot",
        };
        f.write_str(text)
    }
}

/// Outcome of [`resolve_form`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Found(SurfaceForm),
    NotApplicable(NotApplicableReason),
    NotFound(NotFoundReason),
}

impl Resolution {
    pub fn found(&self) -> Option<&SurfaceForm> {
        match self {
            Self::Found(form) => Some(form),
            _ => None,
        }
    }

    pub fn into_found(self) -> Option<SurfaceForm> {
        match self {
            Self::Found(form) => Some(form),
            _ => None,
        }
    }

    /// Resolved canonical value, if any.
    pub fn value(&self) -> Option<&str> {
        self.found().map(|form| form.value.as_str())
    }
}

/// Resolves the surface form for one slot of one verb in one region.
///
/// Order of checks: slot shape, lemma, region attestation, direct slot,
/// vos fallback.
pub fn resolve_form(index: &CatalogIndex, lemma: &str, slot: Slot, region: Region) -> Resolution {
    if !is_well_formed(slot) {
        return Resolution::NotFound(NotFoundReason::InvalidSlot);
    }

    let Some(record) = index.entry(lemma) else {
        let reason = if index.is_rejected(lemma) {
            NotFoundReason::RejectedEntry
        } else {
            NotFoundReason::UnknownLemma
        };
        return Resolution::NotFound(reason);
    };
    if record.is_stub() {
        return Resolution::NotFound(NotFoundReason::StubOnly);
    }
    if !index.attests(lemma, region) {
        return Resolution::NotFound(NotFoundReason::UnattestedRegion);
    }

    let canonical_lemma = record.lemma().trim();
    if let Some(form) = index.lookup(lemma, region, slot) {
        let alternates = form
            .accepts
            .iter()
            .filter(|(variant, _)| region.accepts_variant(**variant))
            .map(|(variant, value)| Alternate {
                variant: *variant,
                value: value.clone(),
            })
            .collect();
        return Resolution::Found(SurfaceForm {
            lemma: canonical_lemma.to_string(),
            slot,
            region,
            value: form.value.clone(),
            origin: FormOrigin::Direct,
            alternates,
        });
    }

    if slot.person != Some(Person::SecondSingularVos) {
        return Resolution::NotApplicable(NotApplicableReason::DefectiveSlot);
    }

    let tu_slot = slot.with_person(Person::SecondSingularTu);
    match index
        .lookup(lemma, region, tu_slot)
        .and_then(|form| form.accepted(DialectVariant::Vos))
    {
        Some(vos) => Resolution::Found(SurfaceForm {
            lemma: canonical_lemma.to_string(),
            slot,
            region,
            value: vos.to_string(),
            origin: FormOrigin::VosFallback,
            alternates: Vec::new(),
        }),
        None => Resolution::NotApplicable(NotApplicableReason::NoVosForm),
    }
}

fn is_well_formed(slot: Slot) -> bool {
    slot.tense.mood() == slot.mood && slot.mood.is_finite() == slot.person.is_some()
}
