//! FFI use-case API for the Flutter practice app.
//!
//! # Responsibility
//! - Apply the embedding app's engine config (logging, answer policy).
//! - Load the verb catalog once per process from JSON sources.
//! - Expose slot resolution and answer checking with flat, string-tagged
//!   request and response shapes.
//!
//! # Invariants
//! - Exported functions never panic across the FFI boundary.
//! - `status` fields use a fixed vocabulary: `found|not_applicable|not_found|error`.

use conjuga_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, parse_catalog,
    AnswerCheck, ConjugationService, EngineConfig, FormRequest, Mood, Person, PracticeOutcome,
    Region, Resolution, Slot, Tense, ValidationPolicy, VariantKind,
};
use log::info;
use std::sync::OnceLock;

const STATUS_FOUND: &str = "found";
const STATUS_NOT_APPLICABLE: &str = "not_applicable";
const STATUS_NOT_FOUND: &str = "not_found";
const STATUS_ERROR: &str = "error";

static ENGINE_CONFIG: OnceLock<EngineConfig> = OnceLock::new();
static CATALOG: OnceLock<ConjugationService> = OnceLock::new();

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes core logging once per process.
///
/// Returns an empty string on success and an error message otherwise.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Outcome of applying an engine config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigureResponse {
    pub ok: bool,
    /// Whether rolling file logging is active after this call.
    pub logging_started: bool,
    pub message: String,
}

/// Applies an `EngineConfig` JSON document once per process.
///
/// Must run before `load_catalogs` for its validation policy to take
/// effect. Repeating the same config is a no-op; a different one is refused.
#[flutter_rust_bridge::frb(sync)]
pub fn configure(config_json: String) -> ConfigureResponse {
    let config = match EngineConfig::from_json_str(&config_json) {
        Ok(config) => config,
        Err(err) => return configure_failure(err.to_string()),
    };
    if let Some(active) = ENGINE_CONFIG.get() {
        return if *active == config {
            ConfigureResponse {
                ok: true,
                logging_started: active.log_dir.is_some(),
                message: "Engine already configured.".to_string(),
            }
        } else {
            configure_failure("engine already configured with a different config".to_string())
        };
    }

    let logging_started = match config.init_logging() {
        Ok(started) => started,
        Err(err) => return configure_failure(err.to_string()),
    };
    let accent_insensitive = config.validation.accent_insensitive;
    if ENGINE_CONFIG.set(config).is_err() {
        return configure_failure("engine already configured".to_string());
    }
    info!(
        "event=ffi_configure module=ffi status=ok logging_started={} accent_insensitive={}",
        logging_started, accent_insensitive
    );
    ConfigureResponse {
        ok: true,
        logging_started,
        message: "Engine configured.".to_string(),
    }
}

fn configure_failure(message: String) -> ConfigureResponse {
    ConfigureResponse {
        ok: false,
        logging_started: false,
        message,
    }
}

fn configured_policy() -> ValidationPolicy {
    ENGINE_CONFIG
        .get()
        .map(|config| config.validation)
        .unwrap_or_default()
}

/// Summary of a catalog load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogLoadResponse {
    pub ok: bool,
    pub verbs: u32,
    pub stubs: u32,
    pub rejected: u32,
    /// Human-readable decoding and integrity issues, in source order.
    pub issues: Vec<String>,
    pub message: String,
}

impl CatalogLoadResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            verbs: 0,
            stubs: 0,
            rejected: 0,
            issues: Vec::new(),
            message: message.into(),
        }
    }
}

/// Resolved form envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormResponse {
    pub status: String,
    pub value: Option<String>,
    /// Dialect alternates accepted in the requested region.
    pub alternates: Vec<String>,
    pub message: String,
}

/// Answer check envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerResponse {
    pub status: String,
    pub correct: bool,
    /// `canonical` or a dialect key such as `vos`; set only when correct.
    pub matched_variant: Option<String>,
    pub message: String,
}

/// Merges and indexes the catalog. Only the first successful call takes effect.
///
/// `primary_json` wins over every entry of `supplementary_json`, and earlier
/// supplementary sources win over later ones.
#[flutter_rust_bridge::frb(sync)]
pub fn load_catalogs(primary_json: String, supplementary_json: Vec<String>) -> CatalogLoadResponse {
    if CATALOG.get().is_some() {
        return CatalogLoadResponse::failure("catalog already loaded");
    }

    let mut issues = Vec::new();
    let primary = match parse_catalog(&primary_json) {
        Ok(parsed) => {
            issues.extend(parsed.issues.iter().map(|issue| format!("primary {issue}")));
            parsed.records
        }
        Err(err) => return CatalogLoadResponse::failure(format!("primary: {err}")),
    };
    let mut supplementary = Vec::with_capacity(supplementary_json.len());
    for (position, json) in supplementary_json.iter().enumerate() {
        match parse_catalog(json) {
            Ok(parsed) => {
                issues.extend(
                    parsed
                        .issues
                        .iter()
                        .map(|issue| format!("supplementary#{position} {issue}")),
                );
                supplementary.push(parsed.records);
            }
            Err(err) => {
                return CatalogLoadResponse::failure(format!("supplementary#{position}: {err}"))
            }
        }
    }

    let build =
        ConjugationService::from_catalogs(&primary, &supplementary, configured_policy());
    issues.extend(build.issues.iter().map(ToString::to_string));
    let stats = build.service.index().stats();

    if CATALOG.set(build.service).is_err() {
        return CatalogLoadResponse::failure("catalog already loaded");
    }
    info!(
        "event=ffi_catalog_loaded module=ffi status=ok verbs={} stubs={} rejected={} issues={}",
        stats.verbs,
        stats.stubs,
        stats.rejected,
        issues.len()
    );
    CatalogLoadResponse {
        ok: true,
        verbs: to_u32(stats.verbs),
        stubs: to_u32(stats.stubs),
        rejected: to_u32(stats.rejected),
        issues,
        message: "Catalog loaded.".to_string(),
    }
}

/// Resolves the expected form for one slot.
///
/// `person` is empty for infinitive, gerund and participle requests.
#[flutter_rust_bridge::frb(sync)]
pub fn resolve_form(
    lemma: String,
    mood: String,
    tense: String,
    person: String,
    region: String,
) -> FormResponse {
    let (service, request) = match prepare(lemma, &mood, &tense, &person, &region) {
        Ok(prepared) => prepared,
        Err(message) => {
            return FormResponse {
                status: STATUS_ERROR.to_string(),
                value: None,
                alternates: Vec::new(),
                message,
            }
        }
    };

    match service.resolve(&request) {
        Resolution::Found(form) => FormResponse {
            status: STATUS_FOUND.to_string(),
            value: Some(form.value),
            alternates: form
                .alternates
                .into_iter()
                .map(|alternate| alternate.value)
                .collect(),
            message: String::new(),
        },
        Resolution::NotApplicable(reason) => FormResponse {
            status: STATUS_NOT_APPLICABLE.to_string(),
            value: None,
            alternates: Vec::new(),
            message: reason.to_string(),
        },
        Resolution::NotFound(reason) => FormResponse {
            status: STATUS_NOT_FOUND.to_string(),
            value: None,
            alternates: Vec::new(),
            message: reason.to_string(),
        },
    }
}

/// Checks a learner answer for one slot under the configured policy.
#[flutter_rust_bridge::frb(sync)]
pub fn check_answer(
    lemma: String,
    mood: String,
    tense: String,
    person: String,
    region: String,
    candidate: String,
) -> AnswerResponse {
    let (service, request) = match prepare(lemma, &mood, &tense, &person, &region) {
        Ok(prepared) => prepared,
        Err(message) => return answer_failure(STATUS_ERROR, message),
    };

    match service.check(&request, &candidate) {
        PracticeOutcome::Checked(check) => to_answer_response(check),
        PracticeOutcome::NoSuchForm(reason) => {
            answer_failure(STATUS_NOT_APPLICABLE, reason.to_string())
        }
        PracticeOutcome::Unknown(reason) => answer_failure(STATUS_NOT_FOUND, reason.to_string()),
    }
}

fn prepare(
    lemma: String,
    mood: &str,
    tense: &str,
    person: &str,
    region: &str,
) -> Result<(&'static ConjugationService, FormRequest), String> {
    let service = CATALOG.get().ok_or("catalog not loaded")?;
    let slot = parse_slot(mood, tense, person)?;
    let region = Region::parse(region).ok_or_else(|| format!("unknown region `{region}`"))?;
    Ok((service, FormRequest::new(lemma, slot, region)))
}

fn parse_slot(mood: &str, tense: &str, person: &str) -> Result<Slot, String> {
    let mood = Mood::parse(mood).ok_or_else(|| format!("unknown mood `{mood}`"))?;
    let tense = Tense::parse(tense).ok_or_else(|| format!("unknown tense `{tense}`"))?;
    let person = match person.trim() {
        "" => None,
        tag => Some(Person::parse(tag).ok_or_else(|| format!("unknown person `{tag}`"))?),
    };
    Ok(Slot::new(mood, tense, person))
}

fn to_answer_response(check: AnswerCheck) -> AnswerResponse {
    let matched_variant = check.matched.map(|matched| match matched.kind {
        VariantKind::Canonical => "canonical".to_string(),
        VariantKind::Dialect(variant) => variant.as_str().to_string(),
    });
    AnswerResponse {
        status: STATUS_FOUND.to_string(),
        correct: check.correct,
        matched_variant,
        message: String::new(),
    }
}

fn answer_failure(status: &str, message: String) -> AnswerResponse {
    AnswerResponse {
        status: status.to_string(),
        correct: false,
        matched_variant: None,
        message,
    }
}

fn to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
