use thiserror::Error;

use crate::model::RelationshipRole;

/// Failure of a call against the REST collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    #[error("{0}")]
    NotFound(String),

    /// No response reached the client (status 0)
    #[error("could not reach the backend: {0}")]
    Transport(String),

    #[error("{message}")]
    Validation { message: String, errors: Vec<String> },

    #[error("{message}")]
    Conflict { message: String, errors: Vec<String> },

    #[error("backend responded with {status}: {message}")]
    Server { status: u16, message: String },

    #[error("unexpected response from backend: {0}")]
    Decode(String),
}

impl BackendError {
    pub fn validation(message: impl Into<String>, errors: Vec<String>) -> Self {
        BackendError::Validation {
            message: message.into(),
            errors,
        }
    }

    /// HTTP status the error corresponds to; 0 when nothing was received.
    pub fn status(&self) -> u16 {
        match self {
            BackendError::NotFound(_) => 404,
            BackendError::Transport(_) => 0,
            BackendError::Validation { .. } => 422,
            BackendError::Conflict { .. } => 409,
            BackendError::Server { status, .. } => *status,
            BackendError::Decode(_) => 500,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, BackendError::NotFound(_))
    }
}

/// Rejection of a typeahead selection before it reaches a payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssignError {
    #[error("A horse cannot be its own {}", .role.label())]
    SelfReference { role: RelationshipRole },

    #[error("The selected entry cannot be used as {}", .role.label())]
    RoleMismatch { role: RelationshipRole },
}

/// Why the pedigree screen could not show a tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PedigreeViewError {
    #[error("No horse id provided")]
    MissingHorseId,

    #[error("'{0}' is not a valid horse id")]
    InvalidHorseId(String),

    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl PedigreeViewError {
    /// The screen has nothing to load; only navigating away helps.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            PedigreeViewError::MissingHorseId | PedigreeViewError::InvalidHorseId(_)
        )
    }
}

/// A horse form that cannot be turned into a payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HorseFormError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("This horse is shown read-only")]
    ReadOnly,

    #[error(transparent)]
    Assign(#[from] AssignError),
}
