//! Line-oriented terminal shell over a [`TodoStore`].
//!
//! The shell is a thin presentation layer: it parses a line into a
//! [`Command`], resolves list positions to ids against the latest snapshot,
//! sends the resulting action and renders the state that comes back.
//! Malformed input is reported as a [`ShellError`] and never reaches the
//! store.

use crate::config::AppConfig;
use crate::types::{TodoAction, TodoId, TodoState};
use crate::TodoStore;
use std::fmt::Write as _;
use std::str::FromStr;
use thiserror::Error;
use todo_runtime::StoreError;

/// Command reference printed by `help`
pub const HELP: &str = "\
Commands:
  type <text>   set the draft (also: >text)
  add           add the draft, or save the edit (also: submit, empty line)
  edit <n>      load item n into the draft
  done <n>      toggle item n completed (also: toggle)
  rm <n>        delete item n (also: delete)
  list          show the list
  json          print the current state as JSON
  help          show this help
  quit          leave";

/// Errors surfaced to the shell user
#[derive(Error, Debug)]
pub enum ShellError {
    /// The first word is not a known command
    #[error("unknown command `{0}` (try `help`)")]
    UnknownCommand(String),

    /// A positional command was given no position
    #[error("`{0}` needs an item number")]
    MissingPosition(&'static str),

    /// The position is not a number
    #[error("`{0}` is not an item number")]
    InvalidPosition(String),

    /// The position does not name a rendered item
    #[error("there is no item {position} (the list has {count})")]
    OutOfRange {
        /// 1-based position the user asked for
        position: usize,
        /// Number of items in the list
        count: usize,
    },

    /// The store rejected the action
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The snapshot could not be serialized
    #[error("failed to serialize state: {0}")]
    Json(#[from] serde_json::Error),
}

/// A parsed shell line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Replace the draft text
    Type(String),
    /// Submit the draft
    Submit,
    /// Begin editing the item at a 1-based position
    Edit(usize),
    /// Toggle the item at a 1-based position
    Toggle(usize),
    /// Delete the item at a 1-based position
    Delete(usize),
    /// Re-render the list
    List,
    /// Print the snapshot as JSON
    Json,
    /// Print the command reference
    Help,
    /// Leave the shell
    Quit,
}

impl FromStr for Command {
    type Err = ShellError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        if let Some(text) = line.trim_start().strip_prefix('>') {
            return Ok(Self::Type(text.to_string()));
        }

        let line = line.trim();
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));

        match word.to_ascii_lowercase().as_str() {
            "" | "add" | "submit" => Ok(Self::Submit),
            "type" => Ok(Self::Type(rest.trim_start().to_string())),
            "edit" => parse_position("edit", rest).map(Self::Edit),
            "done" | "toggle" => parse_position("done", rest).map(Self::Toggle),
            "rm" | "delete" => parse_position("rm", rest).map(Self::Delete),
            "list" | "ls" => Ok(Self::List),
            "json" => Ok(Self::Json),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            _ => Err(ShellError::UnknownCommand(word.to_string())),
        }
    }
}

fn parse_position(command: &'static str, rest: &str) -> Result<usize, ShellError> {
    let raw = rest.trim();
    if raw.is_empty() {
        return Err(ShellError::MissingPosition(command));
    }
    raw.parse()
        .map_err(|_| ShellError::InvalidPosition(raw.to_string()))
}

/// Id of the item rendered at `position` (1-based)
///
/// # Errors
///
/// Returns [`ShellError::OutOfRange`] if no item is rendered there.
pub fn item_at(state: &TodoState, position: usize) -> Result<TodoId, ShellError> {
    position
        .checked_sub(1)
        .and_then(|index| state.items.get(index))
        .map(|item| item.id)
        .ok_or(ShellError::OutOfRange {
            position,
            count: state.count(),
        })
}

impl Command {
    /// The store action for this command, if it has one
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::OutOfRange`] if a position does not resolve
    /// against `state`.
    pub fn to_action(&self, state: &TodoState) -> Result<Option<TodoAction>, ShellError> {
        let action = match self {
            Self::Type(text) => TodoAction::UpdateDraft { text: text.clone() },
            Self::Submit => TodoAction::SubmitDraft,
            Self::Edit(position) => TodoAction::BeginEdit {
                id: item_at(state, *position)?,
            },
            Self::Toggle(position) => TodoAction::ToggleComplete {
                id: item_at(state, *position)?,
            },
            Self::Delete(position) => TodoAction::DeleteItem {
                id: item_at(state, *position)?,
            },
            Self::List | Self::Json | Self::Help | Self::Quit => return Ok(None),
        };
        Ok(Some(action))
    }
}

/// Renders the list the way the shell shows it
#[must_use]
pub fn render(state: &TodoState, show_ids: bool) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Todos ({} open, {} done)",
        state.count() - state.completed_count(),
        state.completed_count()
    );
    let _ = writeln!(out, "[{}] {}", state.submit_label(), state.draft_text);
    if let Some(error) = &state.error_message {
        let _ = writeln!(out, "! {error}");
    }

    if state.items.is_empty() {
        out.push_str("  (nothing to do)\n");
    }
    for (index, item) in state.items.iter().enumerate() {
        let mark = if item.completed { 'x' } else { ' ' };
        let _ = write!(out, "{}. [{mark}] {}", index + 1, item.text);
        if show_ids {
            let _ = write!(out, "  #{}", item.id);
        }
        out.push('\n');
    }

    out
}

/// What the caller should do after a line was handled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Print this text and keep reading
    Output(String),
    /// Stop reading input
    Quit,
}

/// Interactive shell bound to a store
#[derive(Clone)]
pub struct Shell {
    store: TodoStore,
    config: AppConfig,
}

impl Shell {
    /// Creates a shell over `store`
    #[must_use]
    pub const fn new(store: TodoStore, config: AppConfig) -> Self {
        Self { store, config }
    }

    /// The store this shell drives
    #[must_use]
    pub const fn store(&self) -> &TodoStore {
        &self.store
    }

    /// Greeting and initial render
    pub async fn banner(&self) -> String {
        let state = self.store.snapshot().await;
        format!(
            "Type a todo with `>text`, then press enter to add it (`help` for more).\n\n{}",
            render(&state, self.config.show_ids)
        )
    }

    /// Handles one line of input
    ///
    /// # Errors
    ///
    /// Returns a [`ShellError`] for malformed input, a position that does
    /// not resolve, or a store that is shutting down.
    #[tracing::instrument(skip(self), name = "shell_line")]
    pub async fn handle_line(&self, line: &str) -> Result<Reply, ShellError> {
        let command: Command = line.parse()?;

        match command {
            Command::Quit => return Ok(Reply::Quit),
            Command::Help => return Ok(Reply::Output(HELP.to_string())),
            Command::Json => {
                let state = self.store.snapshot().await;
                let json = if self.config.json_pretty {
                    serde_json::to_string_pretty(&state)?
                } else {
                    serde_json::to_string(&state)?
                };
                return Ok(Reply::Output(json));
            },
            _ => {},
        }

        let state = self.store.snapshot().await;
        if let Some(action) = command.to_action(&state)? {
            tracing::debug!(action = action.action_name(), "Dispatching");
            self.store.send(action).await?;
        }

        let state = self.store.snapshot().await;
        Ok(Reply::Output(render(&state, self.config.show_ids)))
    }
}
