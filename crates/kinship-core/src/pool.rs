//! The gene pool: owner of every person and authority for name lookup

use crate::loader::LoadStats;
use crate::person::{Gender, Person, PersonId};
use crate::traversal::{Kin, PersonSet};
use std::collections::HashMap;

/// Outcome of inserting one person into the pool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insertion {
    pub id: PersonId,
    /// The name already existed and the person was redefined in place
    pub redefined: bool,
    /// Parent names that did not resolve to anyone in the pool
    pub unresolved: Vec<String>,
    /// Parent names refused because the link would close a cycle
    pub rejected: Vec<String>,
}

/// All people in a family tree, indexed by unique name.
///
/// People are stored in an arena; mother, father and children links are
/// indices into it. Once loaded the pool is only read, so it can be shared
/// freely between threads.
#[derive(Debug, Clone, Default)]
pub struct GenePool {
    people: Vec<Person>,
    index: HashMap<String, PersonId>,
    pub(crate) stats: LoadStats,
}

impl GenePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Find a person by exact (case-sensitive) name
    pub fn find(&self, name: &str) -> Option<&Person> {
        self.index.get(name).map(|id| &self.people[id.0])
    }

    /// Get a person by id
    pub fn get(&self, id: PersonId) -> Option<&Person> {
        self.people.get(id.0)
    }

    /// Everyone in the pool, in insertion order
    pub fn everyone(&self) -> impl Iterator<Item = &Person> + '_ {
        self.people.iter()
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    /// Statistics gathered while the pool was loaded
    pub fn stats(&self) -> &LoadStats {
        &self.stats
    }

    /// Relationship view anchored on one person
    pub fn kin(&self, id: PersonId) -> Option<Kin<'_>> {
        self.get(id).map(|person| Kin::new(self, person))
    }

    /// Relationship view anchored on a person looked up by name
    pub fn kin_of(&self, name: &str) -> Option<Kin<'_>> {
        self.find(name).map(|person| Kin::new(self, person))
    }

    /// Sorted names of a result set
    pub fn names(&self, ids: &PersonSet) -> Vec<&str> {
        let mut names: Vec<&str> = ids
            .iter()
            .filter_map(|id| self.get(*id))
            .map(Person::name)
            .collect();
        names.sort_unstable();
        names
    }

    pub(crate) fn at(&self, id: PersonId) -> &Person {
        &self.people[id.0]
    }

    /// Add a person, resolving parent names against people already present.
    ///
    /// A name that already exists is redefined in place: its old parent links
    /// are detached and the new ones attached, while its own children keep
    /// pointing at it. A parent that is the person themself or one of their
    /// descendants is refused.
    pub fn insert(
        &mut self,
        name: &str,
        gender: Gender,
        mother: Option<&str>,
        father: Option<&str>,
    ) -> Insertion {
        let (id, redefined) = match self.index.get(name) {
            Some(&id) => {
                tracing::warn!("Redefining {}: replacing earlier record", name);
                self.detach_parents(id);
                self.people[id.0].set_gender(gender);
                (id, true)
            }
            None => {
                let id = PersonId(self.people.len());
                self.people.push(Person::new(id, name, gender));
                self.index.insert(name.to_string(), id);
                (id, false)
            }
        };

        let mut insertion = Insertion {
            id,
            redefined,
            unresolved: Vec::new(),
            rejected: Vec::new(),
        };

        let mother = mother.and_then(|m| self.resolve_parent(id, m, &mut insertion));
        let father = father.and_then(|f| self.resolve_parent(id, f, &mut insertion));

        let person = &mut self.people[id.0];
        person.mother = mother;
        person.father = father;
        for parent in [mother, father].into_iter().flatten() {
            self.people[parent.0].children.insert(id);
        }

        insertion
    }

    fn resolve_parent(
        &self,
        child: PersonId,
        name: &str,
        insertion: &mut Insertion,
    ) -> Option<PersonId> {
        let Some(&parent) = self.index.get(name) else {
            tracing::warn!(
                "Parent '{}' of '{}' is not in the pool; treating as unknown",
                name,
                self.at(child).name()
            );
            insertion.unresolved.push(name.to_string());
            return None;
        };

        if parent == child || Kin::new(self, self.at(child)).descendants().contains(&parent) {
            tracing::warn!(
                "Refusing to make '{}' a parent of '{}': the pedigree would become cyclic",
                name,
                self.at(child).name()
            );
            insertion.rejected.push(name.to_string());
            return None;
        }

        Some(parent)
    }

    fn detach_parents(&mut self, id: PersonId) {
        let person = &mut self.people[id.0];
        let parents = [person.mother.take(), person.father.take()];
        for parent in parents.into_iter().flatten() {
            self.people[parent.0].children.remove(&id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relation::{PMod, SMod};

    fn family() -> GenePool {
        let mut pool = GenePool::new();
        pool.insert("Alice", Gender::Female, None, None);
        pool.insert("Bob", Gender::Male, None, None);
        pool.insert("Carol", Gender::Female, Some("Alice"), Some("Bob"));
        pool.insert("Dave", Gender::Male, Some("Alice"), Some("Bob"));
        pool
    }

    #[test]
    fn test_find_and_backlinks() {
        let pool = family();
        let alice = pool.find("Alice").unwrap();
        let carol = pool.find("Carol").unwrap();

        assert_eq!(carol.mother(), Some(alice.id()));
        assert!(alice.children().contains(&carol.id()));
        assert_eq!(alice.children().len(), 2);
        assert_eq!(pool.len(), 4);
    }

    #[test]
    fn test_find_is_case_sensitive() {
        let pool = family();
        assert!(pool.find("alice").is_none());
        assert!(pool.find("Nonexistent").is_none());
    }

    #[test]
    fn test_unresolved_parent_becomes_unknown() {
        let mut pool = family();
        let insertion = pool.insert("Erin", Gender::Female, Some("Alice"), Some("Zane"));

        assert_eq!(insertion.unresolved, vec!["Zane".to_string()]);
        let erin = pool.find("Erin").unwrap();
        assert!(erin.father().is_none());
        assert!(pool.find("Zane").is_none());
    }

    #[test]
    fn test_redefinition_relinks_parents() {
        let mut pool = family();
        pool.insert("Zane", Gender::Male, None, None);
        let insertion = pool.insert("Dave", Gender::Male, Some("Alice"), Some("Zane"));

        assert!(insertion.redefined);
        let bob = pool.find("Bob").unwrap();
        let zane = pool.find("Zane").unwrap();
        let dave = pool.find("Dave").unwrap();
        assert!(!bob.children().contains(&dave.id()));
        assert!(zane.children().contains(&dave.id()));
        assert_eq!(dave.father(), Some(zane.id()));
        assert_eq!(pool.len(), 5);
    }

    #[test]
    fn test_redefinition_keeps_existing_children() {
        let mut pool = family();
        pool.insert("Frank", Gender::Male, Some("Carol"), None);
        pool.insert("Carol", Gender::Female, None, None);

        let carol = pool.find("Carol").unwrap();
        let frank = pool.find("Frank").unwrap();
        assert_eq!(frank.mother(), Some(carol.id()));
        assert!(carol.children().contains(&frank.id()));
        assert!(!pool.find("Alice").unwrap().children().contains(&carol.id()));
    }

    #[test]
    fn test_cyclic_links_are_refused() {
        let mut pool = family();
        // Alice redefined as her own granddaughter
        pool.insert("Gina", Gender::Female, Some("Carol"), None);
        let insertion = pool.insert("Alice", Gender::Female, Some("Gina"), Some("Alice"));

        assert_eq!(
            insertion.rejected,
            vec!["Gina".to_string(), "Alice".to_string()]
        );
        let alice = pool.find("Alice").unwrap();
        assert!(alice.mother().is_none());
        assert!(alice.father().is_none());
    }

    #[test]
    fn test_pool_can_be_shared_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<GenePool>();

        let pool = family();
        let count = std::thread::scope(|s| {
            s.spawn(|| pool.kin_of("Carol").unwrap().siblings(PMod::Any, SMod::Any).len())
                .join()
                .unwrap()
        });
        assert_eq!(count, 1);
    }

    #[test]
    fn test_names_are_sorted() {
        let pool = family();
        let ids: PersonSet = pool.everyone().map(Person::id).collect();
        assert_eq!(pool.names(&ids), vec!["Alice", "Bob", "Carol", "Dave"]);
    }
}
