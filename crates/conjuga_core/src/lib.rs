//! Inflection catalog and answer-resolution engine for Spanish verb practice.
//! This crate owns every invariant about catalog records, lookups and answers.

pub mod catalog;
pub mod config;
pub mod index;
pub mod logging;
pub mod model;
pub mod resolve;
pub mod service;
pub mod validator;

pub use catalog::load::{parse_catalog, CatalogLoadError, ParsedCatalog, RecordIssue};
pub use catalog::merge::{merge_catalogs, merge_with_report, CatalogSource, DroppedRecord, MergeReport};
pub use config::{ConfigError, EngineConfig};
pub use index::{build_index, CatalogIndex, IndexBuild, IndexStats, IndexedForm};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::grammar::{Mood, Person, Slot, Tense};
pub use model::region::{DialectVariant, Region};
pub use model::verb::{
    CatalogIntegrityError, CatalogRecord, Form, IrregularityMatrix, Paradigm, StubEntry, VerbEntry,
    VerbType,
};
pub use resolve::{
    resolve_form, Alternate, FormOrigin, NotApplicableReason, NotFoundReason, Resolution,
    SurfaceForm,
};
pub use service::conjugation_service::{ConjugationService, FormRequest, PracticeOutcome, ServiceBuild};
pub use validator::{
    check_answer, normalize_answer, AnswerCheck, MatchedVariant, ValidationPolicy, VariantKind,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
