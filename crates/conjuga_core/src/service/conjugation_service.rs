//! Practice-facing lookup and answer-checking service.
//!
//! # Responsibility
//! - Build the working catalog once from primary and supplementary sources.
//! - Resolve requested slots and check learner answers in one call.
//!
//! # Invariants
//! - The index is shared read-only; clones of the service share one index.
//! - `NotFound` outcomes are logged as caller/data bugs; mismatches are not.

use crate::catalog::merge::{merge_with_report, DroppedRecord};
use crate::index::{build_index, CatalogIndex};
use crate::model::grammar::Slot;
use crate::model::region::Region;
use crate::model::verb::{CatalogIntegrityError, CatalogRecord};
use crate::resolve::{resolve_form, NotApplicableReason, NotFoundReason, Resolution};
use crate::validator::{check_answer, AnswerCheck, ValidationPolicy};
use log::warn;
use std::sync::Arc;

/// One slot of one verb in one region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormRequest {
    pub lemma: String,
    pub slot: Slot,
    pub region: Region,
}

impl FormRequest {
    pub fn new(lemma: impl Into<String>, slot: Slot, region: Region) -> Self {
        Self {
            lemma: lemma.into(),
            slot,
            region,
        }
    }
}

/// Result of checking one learner answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PracticeOutcome {
    /// The slot exists; the answer was compared.
    Checked(AnswerCheck),
    /// The verb has no such form; tell the learner.
    NoSuchForm(NotApplicableReason),
    /// The request cannot be answered from the catalog.
    Unknown(NotFoundReason),
}

/// Service plus the ingestion report produced while building it.
#[derive(Debug)]
pub struct ServiceBuild {
    pub service: ConjugationService,
    pub dropped: Vec<DroppedRecord>,
    pub issues: Vec<CatalogIntegrityError>,
}

/// Cheap-to-clone handle over one immutable catalog index.
#[derive(Debug, Clone)]
pub struct ConjugationService {
    index: Arc<CatalogIndex>,
    policy: ValidationPolicy,
}

impl ConjugationService {
    pub fn new(index: Arc<CatalogIndex>, policy: ValidationPolicy) -> Self {
        Self { index, policy }
    }

    /// Merges sources with primary-wins precedence and builds the index.
    pub fn from_catalogs(
        primary: &[CatalogRecord],
        supplementary: &[Vec<CatalogRecord>],
        policy: ValidationPolicy,
    ) -> ServiceBuild {
        let merged = merge_with_report(primary, supplementary);
        let build = build_index(&merged.records);
        ServiceBuild {
            service: Self::new(Arc::new(build.index), policy),
            dropped: merged.dropped,
            issues: build.issues,
        }
    }

    pub fn index(&self) -> &CatalogIndex {
        &self.index
    }

    pub fn policy(&self) -> ValidationPolicy {
        self.policy
    }

    /// Same catalog, different comparison policy.
    pub fn with_policy(&self, policy: ValidationPolicy) -> Self {
        Self {
            index: Arc::clone(&self.index),
            policy,
        }
    }

    pub fn resolve(&self, request: &FormRequest) -> Resolution {
        let resolution = resolve_form(&self.index, &request.lemma, request.slot, request.region);
        if let Resolution::NotFound(reason) = &resolution {
            warn!(
                "event=resolve_not_found module=service status=error lemma={} slot={} region={} reason={}",
                request.lemma, request.slot, request.region, reason
            );
        }
        resolution
    }

    /// Resolves the request, then compares `candidate` under the service policy.
    pub fn check(&self, request: &FormRequest, candidate: &str) -> PracticeOutcome {
        match self.resolve(request) {
            Resolution::Found(form) => {
                PracticeOutcome::Checked(check_answer(&form, candidate, self.policy))
            }
            Resolution::NotApplicable(reason) => PracticeOutcome::NoSuchForm(reason),
            Resolution::NotFound(reason) => PracticeOutcome::Unknown(reason),
        }
    }
}
