//! Relationship qualifiers and sibling-link classification

use crate::person::Person;
use serde::{Deserialize, Serialize};

/// Parental qualifier: which lineage a relationship follows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PMod {
    Maternal,
    Paternal,
    /// Either lineage
    #[default]
    Any,
}

impl PMod {
    /// Whether the maternal side is eligible under this qualifier
    pub fn includes_maternal(self) -> bool {
        matches!(self, Self::Maternal | Self::Any)
    }

    /// Whether the paternal side is eligible under this qualifier
    pub fn includes_paternal(self) -> bool {
        matches!(self, Self::Paternal | Self::Any)
    }

    /// Qualifier word as it appears in query text, `None` for `Any`
    pub fn keyword(self) -> Option<&'static str> {
        match self {
            Self::Maternal => Some("maternal"),
            Self::Paternal => Some("paternal"),
            Self::Any => None,
        }
    }

    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "maternal" => Some(Self::Maternal),
            "paternal" => Some(Self::Paternal),
            _ => None,
        }
    }
}

impl std::fmt::Display for PMod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.keyword().unwrap_or("any"))
    }
}

/// Sibling qualifier: whether a sibling-derived relation is full or half
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SMod {
    Full,
    Half,
    /// Full or half
    #[default]
    Any,
}

impl SMod {
    /// Qualifier word as it appears in query text, `None` for `Any`
    pub fn keyword(self) -> Option<&'static str> {
        match self {
            Self::Full => Some("full"),
            Self::Half => Some("half"),
            Self::Any => None,
        }
    }

    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "full" => Some(Self::Full),
            "half" => Some(Self::Half),
            _ => None,
        }
    }
}

impl std::fmt::Display for SMod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.keyword().unwrap_or("any"))
    }
}

/// How two people are linked through their parents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiblingLink {
    /// Same mother and same father
    Full,
    /// Same mother only
    MaternalHalf,
    /// Same father only
    PaternalHalf,
    /// No parent in common
    Unrelated,
}

impl SiblingLink {
    /// Classify `other` relative to `subject` by comparing both parent slots.
    ///
    /// A missing parent never matches, so two people with no recorded mother
    /// are not maternal siblings.
    pub fn classify(subject: &Person, other: &Person) -> Self {
        let same_mother = other.mother.is_some() && other.mother == subject.mother;
        let same_father = other.father.is_some() && other.father == subject.father;
        match (same_mother, same_father) {
            (true, true) => Self::Full,
            (true, false) => Self::MaternalHalf,
            (false, true) => Self::PaternalHalf,
            (false, false) => Self::Unrelated,
        }
    }

    /// Whether this link satisfies the requested qualifiers.
    ///
    /// Full links pass under any lineage; half links only under the lineage
    /// they share.
    pub fn matches(self, pmod: PMod, smod: SMod) -> bool {
        match self {
            Self::Full => matches!(smod, SMod::Full | SMod::Any),
            Self::MaternalHalf => {
                matches!(smod, SMod::Half | SMod::Any) && pmod.includes_maternal()
            }
            Self::PaternalHalf => {
                matches!(smod, SMod::Half | SMod::Any) && pmod.includes_paternal()
            }
            Self::Unrelated => false,
        }
    }
}
