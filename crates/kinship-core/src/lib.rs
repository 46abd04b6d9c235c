//! Kinship Core - Relationship derivation over a family tree
//!
//! This crate provides the person graph, the gene pool that owns it, the
//! traversal algorithms that derive named relationships, and the query type
//! that ties a relationship keyword to those algorithms.

pub mod error;
pub mod limits;
pub mod loader;
pub mod person;
pub mod pool;
pub mod query;
pub mod relation;
pub mod traversal;

pub use error::{Error, Result};
pub use loader::{LoadStats, Record, UNKNOWN_PARENT};
pub use person::{Gender, Person, PersonId};
pub use pool::{GenePool, Insertion};
pub use query::{Query, Relationship};
pub use relation::{PMod, SMod, SiblingLink};
pub use traversal::{Kin, PersonSet};
