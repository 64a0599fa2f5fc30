use std::fmt;

use billbook_domain::DateParseError;
use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("{target} index {index} is out of range ({len} available)")]
    IndexOutOfRange {
        target: IndexTarget,
        index: usize,
        len: usize,
    },
    #[error("Invalid file format: {0}")]
    Format(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Serialization error: {0}")]
    Serde(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Level of the tree an index refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexTarget {
    Person,
    Bill,
    Installment,
}

impl fmt::Display for IndexTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            IndexTarget::Person => "Person",
            IndexTarget::Bill => "Bill",
            IndexTarget::Installment => "Installment",
        };
        f.write_str(label)
    }
}

impl From<DateParseError> for CoreError {
    fn from(err: DateParseError) -> Self {
        CoreError::Validation(err.to_string())
    }
}
