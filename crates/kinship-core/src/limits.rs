//! Input validation limits for query text and family records

/// Maximum length for a person's name (256 chars)
pub const MAX_PERSON_NAME_LEN: usize = 256;

/// Maximum length for a textual query (1024 chars)
pub const MAX_QUERY_LEN: usize = 1024;

/// Validation error type
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    PersonNameTooLong { len: usize, max: usize },
    QueryTooLong { len: usize, max: usize },
    EmptyPersonName,
    PaddedPersonName,
    EmptyQuery,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PersonNameTooLong { len, max } => {
                write!(f, "Person name too long: {} chars (max {})", len, max)
            }
            Self::QueryTooLong { len, max } => {
                write!(f, "Query too long: {} chars (max {})", len, max)
            }
            Self::EmptyPersonName => write!(f, "Person name cannot be empty"),
            Self::PaddedPersonName => {
                write!(f, "Person name cannot start or end with whitespace")
            }
            Self::EmptyQuery => write!(f, "Query cannot be empty"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate a person name as it appears in a record or a query
pub fn validate_person_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyPersonName);
    }
    if name.trim() != name {
        return Err(ValidationError::PaddedPersonName);
    }
    if name.len() > MAX_PERSON_NAME_LEN {
        return Err(ValidationError::PersonNameTooLong {
            len: name.len(),
            max: MAX_PERSON_NAME_LEN,
        });
    }
    Ok(())
}

/// Validate raw query text before parsing
pub fn validate_query_text(text: &str) -> Result<(), ValidationError> {
    if text.trim().is_empty() {
        return Err(ValidationError::EmptyQuery);
    }
    if text.len() > MAX_QUERY_LEN {
        return Err(ValidationError::QueryTooLong {
            len: text.len(),
            max: MAX_QUERY_LEN,
        });
    }
    Ok(())
}
