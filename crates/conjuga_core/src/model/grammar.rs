//! Grammatical coordinates of one conjugation slot.
//!
//! # Responsibility
//! - Define the closed sets of moods, tenses and persons used by catalogs.
//! - Provide the `Slot` key shared by the index, resolver and validator.
//!
//! # Invariants
//! - Every tense belongs to exactly one mood family.
//! - Nonfinite slots carry no person; finite slots always carry one.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Display, Formatter};

/// Verbal mood tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    Indicative,
    Subjunctive,
    Conditional,
    Imperative,
    /// Infinitive, gerund and participle.
    Nonfinite,
}

impl Mood {
    /// Stable wire tag.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Indicative => "indicative",
            Self::Subjunctive => "subjunctive",
            Self::Conditional => "conditional",
            Self::Imperative => "imperative",
            Self::Nonfinite => "nonfinite",
        }
    }

    /// Parses a wire tag such as `subjunctive`.
    pub fn parse(value: &str) -> Option<Self> {
        [
            Self::Indicative,
            Self::Subjunctive,
            Self::Conditional,
            Self::Imperative,
            Self::Nonfinite,
        ]
        .into_iter()
        .find(|mood| mood.as_str() == value.trim())
    }

    /// Whether forms of this mood are inflected for person.
    pub fn is_finite(self) -> bool {
        !matches!(self, Self::Nonfinite)
    }
}

/// Tense tag. Tags are mood-dependent, see [`Tense::mood`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Tense {
    Pres,
    PretIndef,
    Impf,
    Fut,
    PretPerf,
    Plusc,
    FutPerf,
    SubjPres,
    SubjImpf,
    SubjPerf,
    SubjPlusc,
    Cond,
    CondPerf,
    ImpAff,
    ImpNeg,
    Inf,
    Ger,
    Part,
}

impl Tense {
    pub const ALL: [Tense; 18] = [
        Self::Pres,
        Self::PretIndef,
        Self::Impf,
        Self::Fut,
        Self::PretPerf,
        Self::Plusc,
        Self::FutPerf,
        Self::SubjPres,
        Self::SubjImpf,
        Self::SubjPerf,
        Self::SubjPlusc,
        Self::Cond,
        Self::CondPerf,
        Self::ImpAff,
        Self::ImpNeg,
        Self::Inf,
        Self::Ger,
        Self::Part,
    ];

    /// Stable wire tag.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pres => "pres",
            Self::PretIndef => "pretIndef",
            Self::Impf => "impf",
            Self::Fut => "fut",
            Self::PretPerf => "pretPerf",
            Self::Plusc => "plusc",
            Self::FutPerf => "futPerf",
            Self::SubjPres => "subjPres",
            Self::SubjImpf => "subjImpf",
            Self::SubjPerf => "subjPerf",
            Self::SubjPlusc => "subjPlusc",
            Self::Cond => "cond",
            Self::CondPerf => "condPerf",
            Self::ImpAff => "impAff",
            Self::ImpNeg => "impNeg",
            Self::Inf => "inf",
            Self::Ger => "ger",
            Self::Part => "part",
        }
    }

    /// The mood family this tense tag belongs to.
    pub fn mood(self) -> Mood {
        match self {
            Self::Pres
            | Self::PretIndef
            | Self::Impf
            | Self::Fut
            | Self::PretPerf
            | Self::Plusc
            | Self::FutPerf => Mood::Indicative,
            Self::SubjPres | Self::SubjImpf | Self::SubjPerf | Self::SubjPlusc => Mood::Subjunctive,
            Self::Cond | Self::CondPerf => Mood::Conditional,
            Self::ImpAff | Self::ImpNeg => Mood::Imperative,
            Self::Inf | Self::Ger | Self::Part => Mood::Nonfinite,
        }
    }

    /// Parses a wire tag such as `pretIndef`.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tense| tense.as_str() == value.trim())
    }
}

/// Grammatical person, including the two second-singular dialect pronouns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Person {
    #[serde(rename = "1s")]
    FirstSingular,
    #[serde(rename = "2s_tu")]
    SecondSingularTu,
    #[serde(rename = "2s_vos")]
    SecondSingularVos,
    #[serde(rename = "3s")]
    ThirdSingular,
    #[serde(rename = "1p")]
    FirstPlural,
    #[serde(rename = "2p_vosotros")]
    SecondPluralVosotros,
    #[serde(rename = "3p")]
    ThirdPlural,
}

impl Person {
    pub const ALL: [Person; 7] = [
        Self::FirstSingular,
        Self::SecondSingularTu,
        Self::SecondSingularVos,
        Self::ThirdSingular,
        Self::FirstPlural,
        Self::SecondPluralVosotros,
        Self::ThirdPlural,
    ];

    /// Stable wire tag.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FirstSingular => "1s",
            Self::SecondSingularTu => "2s_tu",
            Self::SecondSingularVos => "2s_vos",
            Self::ThirdSingular => "3s",
            Self::FirstPlural => "1p",
            Self::SecondPluralVosotros => "2p_vosotros",
            Self::ThirdPlural => "3p",
        }
    }

    /// Parses a wire tag such as `2s_vos`.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|person| person.as_str() == value.trim())
    }
}

/// Serde adapter for `Form::person`: empty string and missing both mean `None`.
pub(crate) mod optional_person {
    use super::*;

    pub fn serialize<S: Serializer>(value: &Option<Person>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(value.map(Person::as_str).unwrap_or(""))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Person>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(tag) => Person::parse(tag)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("unknown person tag `{tag}`"))),
        }
    }
}

/// One grammatical slot: `(mood, tense, person)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Slot {
    pub mood: Mood,
    pub tense: Tense,
    #[serde(default, with = "optional_person")]
    pub person: Option<Person>,
}

impl Slot {
    pub fn new(mood: Mood, tense: Tense, person: Option<Person>) -> Self {
        Self {
            mood,
            tense,
            person,
        }
    }

    /// Finite slot shorthand.
    pub fn finite(mood: Mood, tense: Tense, person: Person) -> Self {
        Self::new(mood, tense, Some(person))
    }

    /// Nonfinite slot shorthand (`inf`, `ger`, `part`).
    pub fn nonfinite(tense: Tense) -> Self {
        Self::new(Mood::Nonfinite, tense, None)
    }

    /// Same mood and tense with another person.
    pub fn with_person(self, person: Person) -> Self {
        Self {
            person: Some(person),
            ..self
        }
    }
}

impl Display for Slot {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let person = self.person.map(Person::as_str).unwrap_or("-");
        write!(f, "{}/{}/{}", self.mood.as_str(), self.tense.as_str(), person)
    }
}
