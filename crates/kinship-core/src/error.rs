//! Error types for Kinship Core

use crate::person::PersonId;
use crate::validation::{IdError, RelationshipError};
use thiserror::Error;

/// Result type alias using Kinship's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Tree operation that a relationship error happened in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    AddChild,
    AddPartner,
    RemovePartner,
    Delete,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AddChild => write!(f, "add child"),
            Self::AddPartner => write!(f, "add partner"),
            Self::RemovePartner => write!(f, "remove partner"),
            Self::Delete => write!(f, "delete person"),
        }
    }
}

/// Kinship error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Person with id {0} not found")]
    PersonNotFound(PersonId),

    #[error("failed to register person: {0}")]
    InvalidId(#[from] IdError),

    #[error("failed to {operation}: {source}")]
    Relationship {
        operation: Operation,
        #[source]
        source: RelationshipError,
    },

    /// Deleting needs confirmation; retry with `confirm_break` set
    #[error(
        "WARNING: {name} has {children} child(ren). Deleting them splits the tree and breaks the lineage"
    )]
    HasDescendants { name: String, children: usize },
}

impl Error {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::PersonNotFound(_))
    }

    /// True for the deletion warning, which a caller may confirm and retry
    pub fn is_warning(&self) -> bool {
        matches!(self, Self::HasDescendants { .. })
    }

    /// The underlying rule violation, if this is a relationship error
    pub fn relationship(&self) -> Option<&RelationshipError> {
        match self {
            Self::Relationship { source, .. } => Some(source),
            _ => None,
        }
    }
}
