//! Dialect regions and the alternate-spelling keys they activate.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Spanish-speaking variety a paradigm is attested for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    /// River Plate Spanish (voseo).
    Rioplatense,
    /// General Latin American Spanish (tú, ustedes).
    LaGeneral,
    /// Spain (tú, vosotros).
    Peninsular,
}

impl Region {
    pub const ALL: [Region; 3] = [Self::Rioplatense, Self::LaGeneral, Self::Peninsular];

    /// Stable wire tag.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rioplatense => "rioplatense",
            Self::LaGeneral => "la_general",
            Self::Peninsular => "peninsular",
        }
    }

    /// Parses a wire tag such as `la_general`.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|region| region.as_str() == value.trim())
    }

    /// Whether answers in this region may use the given dialect alternate.
    pub fn accepts_variant(self, variant: DialectVariant) -> bool {
        match variant {
            DialectVariant::Vos => matches!(self, Self::Rioplatense),
        }
    }
}

impl Display for Region {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Key of a `Form::accepts` alternate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialectVariant {
    Vos,
}

impl DialectVariant {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Vos => "vos",
        }
    }
}

impl Display for DialectVariant {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
