//! Relationship derivation over the parent/child graph
//!
//! [`Kin`] is a read-only view anchored on one person. Every method returns
//! the set of people standing in that relationship to the anchor. Parental
//! qualifiers ([`PMod`]) pick which parent's side is followed; sibling
//! qualifiers ([`SMod`]) pick full or half links for sibling-derived
//! relations.

use crate::person::{Gender, Person, PersonId};
use crate::pool::GenePool;
use crate::relation::{PMod, SMod, SiblingLink};
use std::collections::BTreeSet;

/// A set of people produced by a traversal
pub type PersonSet = BTreeSet<PersonId>;

/// Relationship view anchored on one person
#[derive(Debug, Clone, Copy)]
pub struct Kin<'a> {
    pool: &'a GenePool,
    person: &'a Person,
}

impl<'a> Kin<'a> {
    pub(crate) fn new(pool: &'a GenePool, person: &'a Person) -> Self {
        Self { pool, person }
    }

    /// The anchor person
    pub fn person(&self) -> &'a Person {
        self.person
    }

    fn of(&self, id: PersonId) -> Kin<'a> {
        Kin::new(self.pool, self.pool.at(id))
    }

    fn with_gender(&self, ids: PersonSet, gender: Gender) -> PersonSet {
        ids.into_iter()
            .filter(|id| self.pool.at(*id).gender() == gender)
            .collect()
    }

    /// The mother and/or father, as selected by `pmod`
    fn parent_ids(&self, pmod: PMod) -> impl Iterator<Item = PersonId> {
        let mother = self.person.mother.filter(|_| pmod.includes_maternal());
        let father = self.person.father.filter(|_| pmod.includes_paternal());
        mother.into_iter().chain(father)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Direct lines
    // ─────────────────────────────────────────────────────────────────────

    pub fn parents(&self, pmod: PMod) -> PersonSet {
        self.parent_ids(pmod).collect()
    }

    pub fn mothers(&self, pmod: PMod) -> PersonSet {
        self.with_gender(self.parents(pmod), Gender::Female)
    }

    pub fn fathers(&self, pmod: PMod) -> PersonSet {
        self.with_gender(self.parents(pmod), Gender::Male)
    }

    pub fn children(&self) -> PersonSet {
        self.person.children.clone()
    }

    pub fn sons(&self) -> PersonSet {
        self.with_gender(self.children(), Gender::Male)
    }

    pub fn daughters(&self) -> PersonSet {
        self.with_gender(self.children(), Gender::Female)
    }

    /// All ancestors. Only the first hop honours `pmod`; once a lineage is
    /// entered every ancestor above it is included.
    pub fn ancestors(&self, pmod: PMod) -> PersonSet {
        let mut result = PersonSet::new();
        let mut stack: Vec<PersonId> = self.parent_ids(pmod).collect();
        while let Some(id) = stack.pop() {
            if result.insert(id) {
                stack.extend(self.of(id).parent_ids(PMod::Any));
            }
        }
        result
    }

    /// Children, grandchildren and so on
    pub fn descendants(&self) -> PersonSet {
        let mut result = PersonSet::new();
        let mut stack: Vec<PersonId> = self.person.children.iter().copied().collect();
        while let Some(id) = stack.pop() {
            if result.insert(id) {
                stack.extend(self.pool.at(id).children.iter().copied());
            }
        }
        result
    }

    // ─────────────────────────────────────────────────────────────────────
    // Grandparents and grandchildren
    // ─────────────────────────────────────────────────────────────────────

    pub fn grandparents(&self, pmod: PMod) -> PersonSet {
        self.parent_ids(pmod)
            .flat_map(|parent| self.of(parent).parent_ids(PMod::Any))
            .collect()
    }

    /// Grandparents recorded as female, whichever parent column they sit in
    pub fn grandmothers(&self, pmod: PMod) -> PersonSet {
        self.with_gender(self.grandparents(pmod), Gender::Female)
    }

    pub fn grandfathers(&self, pmod: PMod) -> PersonSet {
        self.with_gender(self.grandparents(pmod), Gender::Male)
    }

    pub fn grandchildren(&self) -> PersonSet {
        self.person
            .children
            .iter()
            .flat_map(|child| self.pool.at(*child).children.iter().copied())
            .collect()
    }

    pub fn grandsons(&self) -> PersonSet {
        self.with_gender(self.grandchildren(), Gender::Male)
    }

    pub fn granddaughters(&self) -> PersonSet {
        self.with_gender(self.grandchildren(), Gender::Female)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Siblings and sibling-derived relations
    // ─────────────────────────────────────────────────────────────────────

    /// Other children of the mother and/or father, before any full/half test
    fn sibling_candidates(&self, pmod: PMod) -> PersonSet {
        self.parent_ids(pmod)
            .flat_map(|parent| self.pool.at(parent).children.iter().copied())
            .filter(|id| *id != self.person.id())
            .collect()
    }

    /// Siblings linked to the anchor in a way `pmod`/`smod` accept
    fn linked_siblings(&self, pmod: PMod, smod: SMod) -> impl Iterator<Item = PersonId> + 'a {
        let (pool, person) = (self.pool, self.person);
        self.sibling_candidates(pmod)
            .into_iter()
            .filter(move |id| SiblingLink::classify(person, pool.at(*id)).matches(pmod, smod))
    }

    pub fn siblings(&self, pmod: PMod, smod: SMod) -> PersonSet {
        self.linked_siblings(pmod, smod).collect()
    }

    pub fn brothers(&self, pmod: PMod, smod: SMod) -> PersonSet {
        self.with_gender(self.siblings(pmod, smod), Gender::Male)
    }

    pub fn sisters(&self, pmod: PMod, smod: SMod) -> PersonSet {
        self.with_gender(self.siblings(pmod, smod), Gender::Female)
    }

    /// Siblings of the mother and/or father. The lineage is already chosen
    /// by `pmod`, so the parent's own siblings are taken from either side.
    fn parents_siblings(&self, pmod: PMod, smod: SMod) -> PersonSet {
        self.parent_ids(pmod)
            .flat_map(|parent| self.of(parent).siblings(PMod::Any, smod))
            .collect()
    }

    pub fn aunts(&self, pmod: PMod, smod: SMod) -> PersonSet {
        self.with_gender(self.parents_siblings(pmod, smod), Gender::Female)
    }

    pub fn uncles(&self, pmod: PMod, smod: SMod) -> PersonSet {
        self.with_gender(self.parents_siblings(pmod, smod), Gender::Male)
    }

    /// Children of aunts and uncles
    pub fn cousins(&self, pmod: PMod, smod: SMod) -> PersonSet {
        self.parents_siblings(pmod, smod)
            .into_iter()
            .flat_map(|id| self.pool.at(id).children.iter().copied())
            .collect()
    }

    /// Children of siblings, each sibling tested against `pmod`/`smod`
    fn siblings_children(&self, pmod: PMod, smod: SMod) -> PersonSet {
        self.linked_siblings(pmod, smod)
            .flat_map(|id| self.pool.at(id).children.iter().copied())
            .collect()
    }

    pub fn nephews(&self, pmod: PMod, smod: SMod) -> PersonSet {
        self.with_gender(self.siblings_children(pmod, smod), Gender::Male)
    }

    pub fn nieces(&self, pmod: PMod, smod: SMod) -> PersonSet {
        self.with_gender(self.siblings_children(pmod, smod), Gender::Female)
    }
}
