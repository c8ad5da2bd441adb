//! Domain types for the todo list.
//!
//! A todo list is an ordered sequence of items plus the transient input
//! state the presentation layer renders: the draft being typed, the item
//! being edited and the last validation error. Keeping all of it in one
//! value type lets the reducer be tested without any rendering environment.

use serde::{Deserialize, Serialize};
use todo_macros::Action;

/// Message shown when a submission collides with an existing item
pub const DUPLICATE_MESSAGE: &str = "This todo already exists!";

/// Unique identifier for a todo item
///
/// Ids come from the environment's id generator, so they are unique within
/// a session and increase in creation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(u64);

impl TodoId {
    /// Wraps a raw id
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw id
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single todo item
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    /// Unique identifier
    pub id: TodoId,
    /// Trimmed, non-empty text
    pub text: String,
    /// Whether the todo is completed
    pub completed: bool,
}

impl TodoItem {
    /// Creates a new, not yet completed item
    #[must_use]
    pub const fn new(id: TodoId, text: String) -> Self {
        Self {
            id,
            text,
            completed: false,
        }
    }

    /// Returns true if `candidate` names the same todo, ignoring case
    #[must_use]
    pub fn matches(&self, candidate: &str) -> bool {
        normalize(&self.text) == normalize(candidate)
    }
}

/// Comparison key for duplicate detection
///
/// The only place texts are normalized. Nothing caches its result.
#[must_use]
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
}

/// State of the todo list
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoState {
    /// Items, newest first
    pub items: Vec<TodoItem>,
    /// Text staged in the input field
    pub draft_text: String,
    /// Item being edited, resolved by id on every read
    pub editing_id: Option<TodoId>,
    /// Last validation failure, if any
    pub error_message: Option<String>,
}

impl TodoState {
    /// Creates a new empty todo state
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: Vec::new(),
            draft_text: String::new(),
            editing_id: None,
            error_message: None,
        }
    }

    /// Returns the number of todos
    #[must_use]
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Returns the number of completed todos
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.items.iter().filter(|t| t.completed).count()
    }

    /// Returns a todo by ID
    #[must_use]
    pub fn get(&self, id: TodoId) -> Option<&TodoItem> {
        self.items.iter().find(|t| t.id == id)
    }

    /// Returns a mutable todo by ID
    pub fn get_mut(&mut self, id: TodoId) -> Option<&mut TodoItem> {
        self.items.iter_mut().find(|t| t.id == id)
    }

    /// Checks if a todo exists
    #[must_use]
    pub fn exists(&self, id: TodoId) -> bool {
        self.get(id).is_some()
    }

    /// The item currently being edited
    ///
    /// `editing_id` is only a lookup key: a missing or completed target
    /// means no edit is in progress.
    #[must_use]
    pub fn editing_item(&self) -> Option<&TodoItem> {
        self.editing_id
            .and_then(|id| self.get(id))
            .filter(|item| !item.completed)
    }

    /// Returns true while an edit is in progress
    #[must_use]
    pub fn is_editing(&self) -> bool {
        self.editing_item().is_some()
    }

    /// Label for the submit button
    #[must_use]
    pub fn submit_label(&self) -> &'static str {
        if self.is_editing() { "EDIT" } else { "ADD" }
    }

    /// First item whose text matches `candidate` case-insensitively
    ///
    /// The item with id `exclude`, if any, is skipped so an edit never
    /// collides with its own original text.
    #[must_use]
    pub fn find_duplicate(&self, candidate: &str, exclude: Option<TodoId>) -> Option<&TodoItem> {
        self.items
            .iter()
            .filter(|item| Some(item.id) != exclude)
            .find(|item| item.matches(candidate))
    }
}

/// Actions representing commands and events for the todo list
///
/// Commands are what the presentation layer sends. The reducer validates
/// them and turns each accepted command into the event it applies. Events
/// sent directly are applied as they are.
#[derive(Action, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TodoAction {
    // ========== Commands ==========
    /// Command: the input field changed
    #[command]
    UpdateDraft {
        /// Full text of the input field
        text: String,
    },

    /// Command: add the draft as a new item, or save the edit in progress
    #[command]
    SubmitDraft,

    /// Command: remove an item
    #[command]
    DeleteItem {
        /// Todo to delete
        id: TodoId,
    },

    /// Command: flip an item's completed flag
    #[command]
    ToggleComplete {
        /// Todo to toggle
        id: TodoId,
    },

    /// Command: load an item into the draft for editing
    #[command]
    BeginEdit {
        /// Todo to edit
        id: TodoId,
    },

    // ========== Events ==========
    /// Event: the draft text changed and any error was dismissed
    #[event]
    DraftUpdated {
        /// New draft text
        text: String,
    },

    /// Event: a todo was added at the front of the list
    #[event]
    TodoAdded {
        /// Todo identifier
        id: TodoId,
        /// Trimmed text
        text: String,
    },

    /// Event: the edited todo received new text
    #[event]
    TodoEdited {
        /// Todo identifier
        id: TodoId,
        /// Trimmed text
        text: String,
    },

    /// Event: a todo was removed
    #[event]
    TodoDeleted {
        /// Todo identifier
        id: TodoId,
    },

    /// Event: a todo's completed flag flipped
    #[event]
    TodoToggled {
        /// Todo identifier
        id: TodoId,
    },

    /// Event: editing started on a todo
    #[event]
    EditStarted {
        /// Todo identifier
        id: TodoId,
        /// Text loaded into the draft
        text: String,
    },

    /// Event: a submission collided with an existing todo
    #[event]
    DuplicateRejected {
        /// Trimmed text that was rejected
        candidate: String,
    },
}
