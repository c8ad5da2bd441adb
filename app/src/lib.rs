//! A todo list with duplicate prevention and in-place editing.
//!
//! The list, the draft being typed, the item being edited and the last
//! validation error all live in one [`TodoState`] value. Every user
//! interaction is a [`TodoAction`] command handled by [`TodoReducer`]:
//!
//! - `UpdateDraft` replaces the draft and dismisses any error
//! - `SubmitDraft` adds the trimmed draft at the front, or saves the edit
//!   in progress, unless it collides case-insensitively with another item
//! - `DeleteItem`, `ToggleComplete` and `BeginEdit` act on an item by id;
//!   completed items can be toggled but not edited or deleted
//!
//! The [`shell`] module puts a line-oriented terminal front end on top of a
//! [`TodoStore`].
//!
//! # Quick Start
//!
//! ```no_run
//! use todo::{TodoAction, TodoEnvironment, TodoReducer, TodoState, TodoStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = TodoStore::new(TodoState::new(), TodoReducer::new(), TodoEnvironment::system());
//!
//! store.send(TodoAction::UpdateDraft { text: "Buy milk".to_string() }).await?;
//! store.send(TodoAction::SubmitDraft).await?;
//!
//! let state = store.snapshot().await;
//! println!("Total todos: {}", state.count());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod reducer;
pub mod shell;
pub mod types;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::TodoError;
pub use reducer::{TodoEnvironment, TodoReducer};
pub use types::{TodoAction, TodoId, TodoItem, TodoState, DUPLICATE_MESSAGE};

/// Store specialized to the todo list
pub type TodoStore = todo_runtime::Store<TodoState, TodoAction, TodoEnvironment, TodoReducer>;
