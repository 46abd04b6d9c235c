//! Error types for Kinship Core

use crate::limits::ValidationError;
use crate::relation::{PMod, SMod};
use thiserror::Error;

/// Result type alias using Kinship's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Kinship error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown relationship: {0}")]
    UnknownRelationship(String),

    #[error("Relationship '{relationship}' does not take a parental qualifier (got {pmod})")]
    IllegalParentalQualifier { relationship: String, pmod: PMod },

    #[error("Relationship '{relationship}' does not take a sibling qualifier (got {smod})")]
    IllegalSiblingQualifier { relationship: String, smod: SMod },

    #[error("Could not parse query '{text}': {reason}")]
    Parse { text: String, reason: String },

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn parse(text: &str, reason: impl Into<String>) -> Self {
        Self::Parse {
            text: text.to_string(),
            reason: reason.into(),
        }
    }
}
