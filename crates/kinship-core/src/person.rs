//! Person (node) types

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Stable index of a person inside a [`GenePool`](crate::GenePool)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PersonId(pub usize);

impl std::fmt::Display for PersonId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Recorded gender of a person
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Parse the gender column of a family record: `male` or anything else.
    pub fn from_record(field: &str) -> Self {
        if field == "male" {
            Self::Male
        } else {
            Self::Female
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A person in the family tree.
///
/// Parent and child links are indices into the owning pool. The children set
/// is maintained by the pool and mirrors the mother/father links of every
/// other person.
#[derive(Debug, Clone)]
pub struct Person {
    id: PersonId,
    name: String,
    gender: Gender,
    pub(crate) mother: Option<PersonId>,
    pub(crate) father: Option<PersonId>,
    pub(crate) children: BTreeSet<PersonId>,
}

impl Person {
    pub(crate) fn new(id: PersonId, name: impl Into<String>, gender: Gender) -> Self {
        Self {
            id,
            name: name.into(),
            gender,
            mother: None,
            father: None,
            children: BTreeSet::new(),
        }
    }

    pub fn id(&self) -> PersonId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub(crate) fn set_gender(&mut self, gender: Gender) {
        self.gender = gender;
    }

    pub fn mother(&self) -> Option<PersonId> {
        self.mother
    }

    pub fn father(&self) -> Option<PersonId> {
        self.father
    }

    /// Children for whom this person is the mother or the father
    pub fn children(&self) -> &BTreeSet<PersonId> {
        &self.children
    }

    pub fn is_male(&self) -> bool {
        self.gender == Gender::Male
    }

    pub fn is_female(&self) -> bool {
        self.gender == Gender::Female
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_person_creation() {
        let person = Person::new(PersonId(3), "Carol", Gender::Female);

        assert_eq!(person.id(), PersonId(3));
        assert_eq!(person.name(), "Carol");
        assert!(person.is_female());
        assert!(person.mother().is_none());
        assert!(person.father().is_none());
        assert!(person.children().is_empty());
    }

    #[test]
    fn test_gender_from_record() {
        assert_eq!(Gender::from_record("male"), Gender::Male);
        assert_eq!(Gender::from_record("female"), Gender::Female);
        // Only the exact lowercase word counts as male
        assert_eq!(Gender::from_record("Male"), Gender::Female);
        assert_eq!(Gender::from_record(""), Gender::Female);
    }
}
