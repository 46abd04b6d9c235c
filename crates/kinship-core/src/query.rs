//! Relationship queries: parsing, validation and execution
//!
//! A [`Query`] names a subject, a relationship keyword and two qualifiers.
//! It is validated once when built and can then be run any number of times
//! against a [`GenePool`].
//!
//! Textual form:
//!
//! ```text
//! [who is|who are] <name>'s [maternal|paternal] [full|half] <relationship>[?]
//! ```

use crate::error::{Error, Result};
use crate::limits::{validate_person_name, validate_query_text};
use crate::pool::GenePool;
use crate::relation::{PMod, SMod};
use crate::traversal::{Kin, PersonSet};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Relationship keywords understood by queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relationship {
    Ancestors,
    Descendants,
    Parents,
    Mother,
    Mothers,
    Father,
    Fathers,
    Children,
    Sons,
    Daughters,
    Siblings,
    Brothers,
    Sisters,
    Aunts,
    Uncles,
    Nephews,
    Nieces,
    Cousins,
    Grandparents,
    Grandfathers,
    Grandmothers,
    Grandchildren,
    Grandsons,
    Granddaughters,
}

impl Relationship {
    pub const ALL: [Relationship; 24] = [
        Self::Ancestors,
        Self::Descendants,
        Self::Parents,
        Self::Mother,
        Self::Mothers,
        Self::Father,
        Self::Fathers,
        Self::Children,
        Self::Sons,
        Self::Daughters,
        Self::Siblings,
        Self::Brothers,
        Self::Sisters,
        Self::Aunts,
        Self::Uncles,
        Self::Nephews,
        Self::Nieces,
        Self::Cousins,
        Self::Grandparents,
        Self::Grandfathers,
        Self::Grandmothers,
        Self::Grandchildren,
        Self::Grandsons,
        Self::Granddaughters,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ancestors => "ancestors",
            Self::Descendants => "descendants",
            Self::Parents => "parents",
            Self::Mother => "mother",
            Self::Mothers => "mothers",
            Self::Father => "father",
            Self::Fathers => "fathers",
            Self::Children => "children",
            Self::Sons => "sons",
            Self::Daughters => "daughters",
            Self::Siblings => "siblings",
            Self::Brothers => "brothers",
            Self::Sisters => "sisters",
            Self::Aunts => "aunts",
            Self::Uncles => "uncles",
            Self::Nephews => "nephews",
            Self::Nieces => "nieces",
            Self::Cousins => "cousins",
            Self::Grandparents => "grandparents",
            Self::Grandfathers => "grandfathers",
            Self::Grandmothers => "grandmothers",
            Self::Grandchildren => "grandchildren",
            Self::Grandsons => "grandsons",
            Self::Granddaughters => "granddaughters",
        }
    }

    /// Whether a maternal/paternal qualifier means anything here.
    ///
    /// Relations looking downward (children, grandchildren, descendants)
    /// have no lineage to choose.
    pub fn allows_pmod(&self) -> bool {
        !matches!(
            self,
            Self::Descendants
                | Self::Children
                | Self::Sons
                | Self::Daughters
                | Self::Grandchildren
                | Self::Grandsons
                | Self::Granddaughters
        )
    }

    /// Whether a full/half qualifier means anything here.
    ///
    /// Only relations derived through a sibling link take one.
    pub fn allows_smod(&self) -> bool {
        matches!(
            self,
            Self::Siblings
                | Self::Brothers
                | Self::Sisters
                | Self::Aunts
                | Self::Uncles
                | Self::Nephews
                | Self::Nieces
                | Self::Cousins
        )
    }

    fn derive(&self, kin: &Kin<'_>, pmod: PMod, smod: SMod) -> PersonSet {
        match self {
            Self::Ancestors => kin.ancestors(pmod),
            Self::Descendants => kin.descendants(),
            Self::Parents => kin.parents(pmod),
            Self::Mother | Self::Mothers => kin.mothers(pmod),
            Self::Father | Self::Fathers => kin.fathers(pmod),
            Self::Children => kin.children(),
            Self::Sons => kin.sons(),
            Self::Daughters => kin.daughters(),
            Self::Siblings => kin.siblings(pmod, smod),
            Self::Brothers => kin.brothers(pmod, smod),
            Self::Sisters => kin.sisters(pmod, smod),
            Self::Aunts => kin.aunts(pmod, smod),
            Self::Uncles => kin.uncles(pmod, smod),
            Self::Nephews => kin.nephews(pmod, smod),
            Self::Nieces => kin.nieces(pmod, smod),
            Self::Cousins => kin.cousins(pmod, smod),
            Self::Grandparents => kin.grandparents(pmod),
            Self::Grandfathers => kin.grandfathers(pmod),
            Self::Grandmothers => kin.grandmothers(pmod),
            Self::Grandchildren => kin.grandchildren(),
            Self::Grandsons => kin.grandsons(),
            Self::Granddaughters => kin.granddaughters(),
        }
    }
}

impl FromStr for Relationship {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| Error::UnknownRelationship(s.to_string()))
    }
}

impl std::fmt::Display for Relationship {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated relationship request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Query {
    name: String,
    relationship: Relationship,
    pmod: PMod,
    smod: SMod,
}

impl Query {
    /// Build a query from explicit fields, validating the name, the keyword
    /// and the qualifiers allowed for it. Names must already be trimmed so
    /// that the canonical text parses back to the same query.
    pub fn new(
        name: impl Into<String>,
        relationship: &str,
        pmod: PMod,
        smod: SMod,
    ) -> Result<Self> {
        let name = name.into();
        validate_person_name(&name)?;
        let relationship: Relationship = relationship.parse()?;
        Self::from_parts(name, relationship, pmod, smod)
    }

    /// Build an unqualified query (both qualifiers `Any`)
    pub fn simple(name: impl Into<String>, relationship: &str) -> Result<Self> {
        Self::new(name, relationship, PMod::Any, SMod::Any)
    }

    /// Parse a textual query such as `"Carol's maternal half sisters"`
    pub fn parse(text: &str) -> Result<Self> {
        validate_query_text(text)?;

        let body = text.trim();
        let body = body.strip_suffix('?').unwrap_or(body).trim_end();
        let body = strip_question_prefix(body);

        let (name, phrase) = body
            .rsplit_once("'s ")
            .ok_or_else(|| Error::parse(text, "expected \"<name>'s <relationship>\""))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::parse(text, "missing person name"));
        }

        let mut words: Vec<&str> = phrase.split_whitespace().collect();
        let keyword = words
            .pop()
            .ok_or_else(|| Error::parse(text, "missing relationship"))?;

        let mut pmod = None;
        let mut smod = None;
        for word in words {
            if let Some(p) = PMod::from_keyword(word) {
                if pmod.replace(p).is_some() {
                    return Err(Error::parse(text, "more than one parental qualifier"));
                }
            } else if let Some(s) = SMod::from_keyword(word) {
                if smod.replace(s).is_some() {
                    return Err(Error::parse(text, "more than one sibling qualifier"));
                }
            } else {
                return Err(Error::parse(text, format!("unknown qualifier '{}'", word)));
            }
        }

        Self::new(
            name,
            keyword,
            pmod.unwrap_or_default(),
            smod.unwrap_or_default(),
        )
    }

    fn from_parts(name: String, relationship: Relationship, pmod: PMod, smod: SMod) -> Result<Self> {
        let query = Self {
            name,
            relationship,
            pmod,
            smod,
        };
        query.validate()?;
        Ok(query)
    }

    fn validate(&self) -> Result<()> {
        if self.pmod != PMod::Any && !self.relationship.allows_pmod() {
            return Err(Error::IllegalParentalQualifier {
                relationship: self.relationship.to_string(),
                pmod: self.pmod,
            });
        }
        if self.smod != SMod::Any && !self.relationship.allows_smod() {
            return Err(Error::IllegalSiblingQualifier {
                relationship: self.relationship.to_string(),
                smod: self.smod,
            });
        }
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn relationship(&self) -> Relationship {
        self.relationship
    }

    pub fn pmod(&self) -> PMod {
        self.pmod
    }

    pub fn smod(&self) -> SMod {
        self.smod
    }

    /// Run against a pool. An unknown subject matches nobody.
    pub fn run(&self, pool: &GenePool) -> PersonSet {
        let Some(kin) = pool.kin_of(&self.name) else {
            tracing::debug!("No one named '{}'; query matches nobody", self.name);
            return PersonSet::new();
        };

        tracing::debug!(
            "Running query: name={}, relationship={}, pmod={}, smod={}",
            self.name,
            self.relationship,
            self.pmod,
            self.smod
        );
        self.relationship.derive(&kin, self.pmod, self.smod)
    }
}

impl FromStr for Query {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Canonical text form, e.g. `Carol's maternal half sisters`
impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}'s ", self.name)?;
        if let Some(p) = self.pmod.keyword() {
            write!(f, "{} ", p)?;
        }
        if let Some(s) = self.smod.keyword() {
            write!(f, "{} ", s)?;
        }
        write!(f, "{}", self.relationship)
    }
}

fn strip_question_prefix(body: &str) -> &str {
    for prefix in ["who is ", "who are "] {
        if body.len() >= prefix.len()
            && body.is_char_boundary(prefix.len())
            && body[..prefix.len()].eq_ignore_ascii_case(prefix)
        {
            return body[prefix.len()..].trim_start();
        }
    }
    body
}
