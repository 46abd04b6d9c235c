//! Loading a gene pool from tab-separated family records
//!
//! Each non-blank, non-comment line holds four tab-separated fields:
//! `name`, `gender`, `mother`, `father`. A parent field of `???` means the
//! parent is unknown. Parents must be listed before their children; a parent
//! name that is not yet known resolves to "no parent".

use crate::error::Result;
use crate::limits::validate_person_name;
use crate::person::Gender;
use crate::pool::GenePool;
use serde::Serialize;
use std::io::BufRead;
use std::path::Path;

/// Parent field value meaning "unknown parent"
pub const UNKNOWN_PARENT: &str = "???";

/// Lines starting with this character are ignored
pub const COMMENT_MARKER: char = '#';

/// One parsed family record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub name: String,
    pub gender: Gender,
    pub mother: Option<String>,
    pub father: Option<String>,
}

impl Record {
    pub fn new(name: impl Into<String>, gender: Gender) -> Self {
        Self {
            name: name.into(),
            gender,
            mother: None,
            father: None,
        }
    }

    pub fn with_mother(mut self, mother: impl Into<String>) -> Self {
        self.mother = Some(mother.into());
        self
    }

    pub fn with_father(mut self, father: impl Into<String>) -> Self {
        self.father = Some(father.into());
        self
    }

    /// Parse one line of a family file.
    ///
    /// Returns `None` for blank lines and comments. Fields are trimmed of
    /// surrounding whitespace. Missing fields are read as empty strings, so a
    /// record with no father column names a father called "" (which will not
    /// resolve).
    pub fn parse_line(line: &str) -> Option<Self> {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() || line.starts_with(COMMENT_MARKER) {
            return None;
        }

        let mut fields = line.split('\t');
        let mut next = || fields.next().unwrap_or("").trim();
        let name = next();
        let gender = next();
        let mother = next();
        let father = next();

        Some(Self {
            name: name.to_string(),
            gender: Gender::from_record(gender),
            mother: parent_field(mother),
            father: parent_field(father),
        })
    }
}

fn parent_field(field: &str) -> Option<String> {
    (field != UNKNOWN_PARENT).then(|| field.to_string())
}

/// Statistics gathered while loading a gene pool
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadStats {
    /// Records applied to the pool
    pub records: usize,
    /// Blank and comment lines
    pub skipped_lines: usize,
    /// Records dropped because the name was empty, padded or too long
    pub invalid_records: usize,
    /// Records that redefined an existing name
    pub redefinitions: usize,
    /// Parent names that did not resolve
    pub unresolved_parents: usize,
    /// Parent links refused because they would close a cycle
    pub rejected_parents: usize,
}

impl GenePool {
    /// Build a pool from already-parsed records
    pub fn from_records(records: impl IntoIterator<Item = Record>) -> Self {
        let mut pool = Self::new();
        for record in records {
            pool.apply(&record);
        }
        pool
    }

    /// Build a pool from a stream of tab-separated lines
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut pool = Self::new();
        for (number, line) in reader.lines().enumerate() {
            let line = line?;
            match Record::parse_line(&line) {
                Some(record) => pool.apply(&record),
                None => {
                    tracing::trace!("Skipping line {}", number + 1);
                    pool.stats.skipped_lines += 1;
                }
            }
        }
        tracing::info!(
            "Loaded {} people from {} records ({} unresolved parents)",
            pool.len(),
            pool.stats.records,
            pool.stats.unresolved_parents
        );
        Ok(pool)
    }

    /// Build a pool from a family file on disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!("Loading family file {:?}", path);
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    fn apply(&mut self, record: &Record) {
        if let Err(e) = validate_person_name(&record.name) {
            tracing::warn!("Dropping record: {}", e);
            self.stats.invalid_records += 1;
            return;
        }

        let insertion = self.insert(
            &record.name,
            record.gender,
            record.mother.as_deref(),
            record.father.as_deref(),
        );

        self.stats.records += 1;
        self.stats.redefinitions += usize::from(insertion.redefined);
        self.stats.unresolved_parents += insertion.unresolved.len();
        self.stats.rejected_parents += insertion.rejected.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FAMILY: &str = "\
# name\tgender\tmother\tfather
Alice\tfemale\t???\t???
Bob\tmale\t???\t???

Carol\tfemale\tAlice\tBob
Dave\tmale\tAlice\tBob
Erin\tfemale\tAlice\tZane
";

    #[test]
    fn test_parse_line() {
        let record = Record::parse_line("Carol\tfemale\tAlice\tBob").unwrap();
        assert_eq!(
            record,
            Record::new("Carol", Gender::Female)
                .with_mother("Alice")
                .with_father("Bob")
        );
    }

    #[test]
    fn test_parse_line_unknown_parents() {
        let record = Record::parse_line("Bob\tmale\t???\t???\r\n").unwrap();
        assert_eq!(record, Record::new("Bob", Gender::Male));
    }

    #[test]
    fn test_parse_line_skips_blank_and_comments() {
        assert!(Record::parse_line("").is_none());
        assert!(Record::parse_line("   ").is_none());
        assert!(Record::parse_line("#Alice\tfemale\t???\t???").is_none());
    }

    #[test]
    fn test_parse_line_trims_fields() {
        let record = Record::parse_line("Carol 	 male	 Alice	Bob 
").unwrap();
        assert_eq!(
            record,
            Record::new("Carol", Gender::Male)
                .with_mother("Alice")
                .with_father("Bob")
        );

        let record = Record::parse_line("Bob	male	??? 	 ???").unwrap();
        assert!(record.mother.is_none());
        assert!(record.father.is_none());
    }

    #[test]
    fn test_padded_names_resolve_after_trimming() {
        let pool = GenePool::from_reader("Alice 	female	???	???
Carol	female	 Alice	???
".as_bytes())
            .unwrap();
        let alice = pool.find("Alice").unwrap();
        assert_eq!(pool.find("Carol").unwrap().mother(), Some(alice.id()));

        // Programmatic records are not trimmed, so a padded name is invalid
        let pool = GenePool::from_records([Record::new("Dave ", Gender::Male)]);
        assert!(pool.is_empty());
        assert_eq!(pool.stats().invalid_records, 1);
    }

    #[test]
    fn test_parse_line_missing_fields() {
        let record = Record::parse_line("Gus\tmale").unwrap();
        assert_eq!(record.gender, Gender::Male);
        assert_eq!(record.mother.as_deref(), Some(""));
        assert_eq!(record.father.as_deref(), Some(""));
    }

    #[test]
    fn test_from_reader() {
        let pool = GenePool::from_reader(FAMILY.as_bytes()).unwrap();

        assert_eq!(pool.len(), 5);
        assert_eq!(pool.stats().records, 5);
        assert_eq!(pool.stats().skipped_lines, 2);
        assert_eq!(pool.stats().unresolved_parents, 1);

        let erin = pool.find("Erin").unwrap();
        assert!(erin.father().is_none());
        assert_eq!(erin.mother(), pool.find("Alice").map(|p| p.id()));
    }

    #[test]
    fn test_parent_listed_after_child_is_unknown() {
        let pool = GenePool::from_reader("Kid\tmale\tMom\t???\nMom\tfemale\t???\t???\n".as_bytes())
            .unwrap();
        assert!(pool.find("Kid").unwrap().mother().is_none());
        assert!(pool.find("Mom").unwrap().children().is_empty());
    }

    #[test]
    fn test_invalid_names_are_dropped() {
        let pool = GenePool::from_reader("\tmale\t???\t???\nAnn\tfemale\t???\t???\n".as_bytes())
            .unwrap();
        assert_eq!(pool.len(), 1);
        assert_eq!(pool.stats().invalid_records, 1);
    }

    #[test]
    fn test_from_records() {
        let pool = GenePool::from_records([
            Record::new("Alice", Gender::Female),
            Record::new("Carol", Gender::Female).with_mother("Alice"),
        ]);
        let alice = pool.find("Alice").unwrap();
        assert_eq!(alice.children().len(), 1);
    }

    #[test]
    fn test_load_missing_file() {
        let err = GenePool::load("/definitely/not/here.tsv").unwrap_err();
        assert!(matches!(err, crate::Error::Io(_)));
    }
}
