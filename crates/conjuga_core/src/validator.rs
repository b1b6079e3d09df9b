//! Answer checking against a resolved form.
//!
//! # Responsibility
//! - Normalize learner answers and accepted spellings the same way.
//! - Report which accepted variant matched, for dialect-aware feedback.
//!
//! # Invariants
//! - Case and Unicode composition never affect the outcome.
//! - Accents only stop mattering when the caller's policy says so.
//! - `ñ` is a letter of its own and is never folded to `n`.

use crate::model::region::DialectVariant;
use crate::resolve::SurfaceForm;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Caller-supplied comparison policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationPolicy {
    /// Treat `saque` and `saqué` as the same answer.
    pub accent_insensitive: bool,
}

impl ValidationPolicy {
    pub fn strict() -> Self {
        Self {
            accent_insensitive: false,
        }
    }

    pub fn accent_insensitive() -> Self {
        Self {
            accent_insensitive: true,
        }
    }
}

/// Which accepted spelling an answer matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantKind {
    Canonical,
    Dialect(DialectVariant),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedVariant {
    pub kind: VariantKind,
    /// Accepted spelling as authored in the catalog.
    pub surface: String,
}

/// Result of [`check_answer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerCheck {
    pub correct: bool,
    /// Set only when `correct` is true.
    pub matched: Option<MatchedVariant>,
}

impl AnswerCheck {
    fn mismatch() -> Self {
        Self {
            correct: false,
            matched: None,
        }
    }

    fn matched(kind: VariantKind, surface: &str) -> Self {
        Self {
            correct: true,
            matched: Some(MatchedVariant {
                kind,
                surface: surface.to_string(),
            }),
        }
    }
}

/// Normalizes an answer or accepted spelling for comparison.
///
/// NFC composition, trimmed, inner whitespace collapsed, lower-cased, and
/// vowel accents folded when the policy is accent-insensitive.
pub fn normalize_answer(text: &str, policy: ValidationPolicy) -> String {
    let composed: String = text.nfc().collect();
    let collapsed = WHITESPACE_RE.replace_all(composed.trim(), " ");
    let lowered = collapsed.to_lowercase();
    if policy.accent_insensitive {
        fold_spanish_accents(&lowered)
    } else {
        lowered
    }
}

/// Checks a candidate against the canonical value, then each alternate.
///
/// First match wins. A blank candidate is never correct.
pub fn check_answer(resolved: &SurfaceForm, candidate: &str, policy: ValidationPolicy) -> AnswerCheck {
    let normalized = normalize_answer(candidate, policy);
    if normalized.is_empty() {
        return AnswerCheck::mismatch();
    }

    if normalize_answer(&resolved.value, policy) == normalized {
        return AnswerCheck::matched(VariantKind::Canonical, &resolved.value);
    }
    resolved
        .alternates
        .iter()
        .find(|alternate| normalize_answer(&alternate.value, policy) == normalized)
        .map(|alternate| AnswerCheck::matched(VariantKind::Dialect(alternate.variant), &alternate.value))
        .unwrap_or_else(AnswerCheck::mismatch)
}

fn fold_spanish_accents(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            'á' | 'à' | 'ä' | 'â' => 'a',
            'é' | 'è' | 'ë' | 'ê' => 'e',
            'í' | 'ì' | 'ï' | 'î' => 'i',
            'ó' | 'ò' | 'ö' | 'ô' => 'o',
            'ú' | 'ù' | 'ü' | 'û' => 'u',
            _ => c,
        })
        .collect()
}
