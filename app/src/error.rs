//! Validation failures for todo commands.
//!
//! Only [`TodoError::Duplicate`] ever reaches the user, through
//! `TodoState::error_message`. The other variants describe actions the
//! presentation layer should not have sent; the reducer logs them and
//! leaves the state untouched.

use crate::types::TodoId;
use thiserror::Error;

/// Why a command was not applied
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TodoError {
    /// The submitted text matches another item, ignoring case
    #[error("This todo already exists!")]
    Duplicate {
        /// Trimmed text that collided
        candidate: String,
    },

    /// The draft is empty after trimming
    #[error("draft is empty")]
    EmptyDraft,

    /// No item has this id
    #[error("todo {0} not found")]
    NotFound(TodoId),

    /// Completed items cannot be edited or deleted
    #[error("todo {0} is completed")]
    Completed(TodoId),

    /// An added item would reuse an existing id
    #[error("todo id {0} is already in use")]
    IdInUse(TodoId),

    /// Edited text arrived for an item that is not being edited
    #[error("todo {0} is not being edited")]
    NotEditing(TodoId),

    /// Item text is empty or carries surrounding whitespace
    #[error("{0:?} is not valid todo text")]
    InvalidText(String),

    /// A duplicate rejection names text that collides with nothing
    #[error("{0:?} does not match any todo")]
    NoDuplicate(String),
}

impl TodoError {
    /// Returns true if the user should see this error
    #[must_use]
    pub const fn is_user_facing(&self) -> bool {
        matches!(self, Self::Duplicate { .. })
    }
}
