//! Reducer logic for the todo list.
//!
//! Every action is validated against the current state, turned into the
//! event that describes its outcome, and that event is applied. Events sent
//! directly get the same checks as the command they stand for, so no input
//! can leave the list with a duplicate, a reused id or a changed completed
//! item. Rejected actions are logged and leave the state as it was.

use crate::error::TodoError;
use crate::types::{TodoAction, TodoId, TodoItem, TodoState, DUPLICATE_MESSAGE};
use std::sync::Arc;
use todo_core::{
    effect::Effect,
    environment::{IdGenerator, SystemClock, TimestampIdGenerator},
    reducer::Reducer,
    SmallVec,
};

/// Environment dependencies for the todo reducer
#[derive(Clone)]
pub struct TodoEnvironment {
    /// Source of ids for new todos
    pub ids: Arc<dyn IdGenerator>,
}

impl TodoEnvironment {
    /// Creates a new `TodoEnvironment`
    #[must_use]
    pub fn new(ids: Arc<dyn IdGenerator>) -> Self {
        Self { ids }
    }

    /// Millisecond-timestamp ids from the system clock
    #[must_use]
    pub fn system() -> Self {
        Self::new(Arc::new(TimestampIdGenerator::new(SystemClock)))
    }

    /// Next generated id that no item in `state` holds yet
    fn fresh_id(&self, state: &TodoState) -> TodoId {
        loop {
            let id = TodoId::new(self.ids.next_id());
            if !state.exists(id) {
                return id;
            }
            tracing::debug!(%id, "Skipping id already in the list");
        }
    }
}

impl std::fmt::Debug for TodoEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoEnvironment").finish_non_exhaustive()
    }
}

/// What an accepted submission does
#[derive(Debug, PartialEq, Eq)]
enum Submission {
    Add { text: String },
    Edit { id: TodoId, text: String },
}

/// Reducer for the todo list
#[derive(Clone, Debug, Default)]
pub struct TodoReducer;

impl TodoReducer {
    /// Creates a new `TodoReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Validates a `SubmitDraft` command
    fn validate_submit(state: &TodoState) -> Result<Submission, TodoError> {
        let candidate = state.draft_text.trim();
        if candidate.is_empty() {
            return Err(TodoError::EmptyDraft);
        }

        let target = state.editing_item().map(|item| item.id);

        if state.find_duplicate(candidate, target).is_some() {
            return Err(TodoError::Duplicate {
                candidate: candidate.to_string(),
            });
        }

        let text = candidate.to_string();
        Ok(match target {
            Some(id) => Submission::Edit { id, text },
            None => Submission::Add { text },
        })
    }

    /// Validates a command that may only touch open items
    fn validate_open_item(state: &TodoState, id: TodoId) -> Result<&TodoItem, TodoError> {
        let item = state.get(id).ok_or(TodoError::NotFound(id))?;
        if item.completed {
            return Err(TodoError::Completed(id));
        }
        Ok(item)
    }

    /// Validates a `ToggleComplete` command
    fn validate_toggle(state: &TodoState, id: TodoId) -> Result<(), TodoError> {
        if !state.exists(id) {
            return Err(TodoError::NotFound(id));
        }
        Ok(())
    }

    /// Item text must already be trimmed and non-empty
    fn validate_text(text: &str) -> Result<(), TodoError> {
        if text.is_empty() || text.trim() != text {
            return Err(TodoError::InvalidText(text.to_string()));
        }
        Ok(())
    }

    /// Validates a `TodoAdded` event
    fn validate_add(state: &TodoState, id: TodoId, text: &str) -> Result<(), TodoError> {
        Self::validate_text(text)?;
        if state.exists(id) {
            return Err(TodoError::IdInUse(id));
        }
        if state.find_duplicate(text, None).is_some() {
            return Err(TodoError::Duplicate {
                candidate: text.to_string(),
            });
        }
        Ok(())
    }

    /// Validates a `TodoEdited` event
    ///
    /// Only the item currently being edited may receive new text.
    fn validate_edit(state: &TodoState, id: TodoId, text: &str) -> Result<(), TodoError> {
        if state.editing_item().map(|item| item.id) != Some(id) {
            return Err(TodoError::NotEditing(id));
        }
        Self::validate_text(text)?;
        if state.find_duplicate(text, Some(id)).is_some() {
            return Err(TodoError::Duplicate {
                candidate: text.to_string(),
            });
        }
        Ok(())
    }

    /// Validates a `DuplicateRejected` event
    fn validate_rejection(state: &TodoState, candidate: &str) -> Result<(), TodoError> {
        let exclude = state.editing_item().map(|item| item.id);
        if state.find_duplicate(candidate.trim(), exclude).is_none() {
            return Err(TodoError::NoDuplicate(candidate.to_string()));
        }
        Ok(())
    }

    /// Turns an action into the event describing its outcome
    fn decide(
        state: &TodoState,
        action: &TodoAction,
        env: &TodoEnvironment,
    ) -> Result<TodoAction, TodoError> {
        match action {
            TodoAction::UpdateDraft { text } | TodoAction::DraftUpdated { text } => {
                Ok(TodoAction::DraftUpdated { text: text.clone() })
            },
            TodoAction::SubmitDraft => match Self::validate_submit(state) {
                Ok(Submission::Add { text }) => Ok(TodoAction::TodoAdded {
                    id: env.fresh_id(state),
                    text,
                }),
                Ok(Submission::Edit { id, text }) => Ok(TodoAction::TodoEdited { id, text }),
                Err(TodoError::Duplicate { candidate }) => {
                    Ok(TodoAction::DuplicateRejected { candidate })
                },
                Err(error) => Err(error),
            },
            TodoAction::DeleteItem { id } | TodoAction::TodoDeleted { id } => {
                Self::validate_open_item(state, *id)?;
                Ok(TodoAction::TodoDeleted { id: *id })
            },
            TodoAction::ToggleComplete { id } | TodoAction::TodoToggled { id } => {
                Self::validate_toggle(state, *id)?;
                Ok(TodoAction::TodoToggled { id: *id })
            },
            // The draft always comes from the item, whatever text was sent
            TodoAction::BeginEdit { id } | TodoAction::EditStarted { id, .. } => {
                let item = Self::validate_open_item(state, *id)?;
                Ok(TodoAction::EditStarted {
                    id: item.id,
                    text: item.text.clone(),
                })
            },
            TodoAction::TodoAdded { id, text } => {
                Self::validate_add(state, *id, text)?;
                Ok(action.clone())
            },
            TodoAction::TodoEdited { id, text } => {
                Self::validate_edit(state, *id, text)?;
                Ok(action.clone())
            },
            TodoAction::DuplicateRejected { candidate } => {
                Self::validate_rejection(state, candidate)?;
                Ok(action.clone())
            },
        }
    }

    /// Applies an event to state
    fn apply_event(state: &mut TodoState, event: &TodoAction) {
        tracing::debug!(event = event.event_type(), "Applying event");

        match event {
            TodoAction::DraftUpdated { text } => {
                state.draft_text.clone_from(text);
                state.error_message = None;
            },
            TodoAction::TodoAdded { id, text } => {
                state.items.insert(0, TodoItem::new(*id, text.clone()));
                state.editing_id = None;
                state.draft_text.clear();
                state.error_message = None;
            },
            TodoAction::TodoEdited { id, text } => {
                if let Some(item) = state.get_mut(*id).filter(|item| !item.completed) {
                    item.text.clone_from(text);
                }
                state.editing_id = None;
                state.draft_text.clear();
                state.error_message = None;
            },
            TodoAction::TodoDeleted { id } => {
                state.items.retain(|item| item.id != *id);
                if state.editing_id == Some(*id) {
                    state.editing_id = None;
                }
            },
            TodoAction::TodoToggled { id } => {
                if let Some(item) = state.get_mut(*id) {
                    item.completed = !item.completed;
                }
            },
            TodoAction::EditStarted { id, text } => {
                state.draft_text.clone_from(text);
                state.editing_id = Some(*id);
                state.error_message = None;
            },
            TodoAction::DuplicateRejected { .. } => {
                state.error_message = Some(DUPLICATE_MESSAGE.to_string());
            },
            // Commands are never applied directly
            TodoAction::UpdateDraft { .. }
            | TodoAction::SubmitDraft
            | TodoAction::DeleteItem { .. }
            | TodoAction::ToggleComplete { .. }
            | TodoAction::BeginEdit { .. } => {},
        }
    }
}

impl Reducer for TodoReducer {
    type State = TodoState;
    type Action = TodoAction;
    type Environment = TodoEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match Self::decide(state, &action, env) {
            Ok(event) => Self::apply_event(state, &event),
            Err(error) if error.is_user_facing() => {
                tracing::info!(action = action.action_name(), %error, "Rejected action");
            },
            Err(error) => {
                tracing::debug!(action = action.action_name(), %error, "Ignoring action");
            },
        }

        SmallVec::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use todo_testing::{assertions, ReducerTest, SequentialIdGenerator};

    fn create_test_env() -> TodoEnvironment {
        TodoEnvironment::new(Arc::new(SequentialIdGenerator::new()))
    }

    fn type_and_submit(text: &str) -> [TodoAction; 2] {
        [
            TodoAction::UpdateDraft {
                text: text.to_string(),
            },
            TodoAction::SubmitDraft,
        ]
    }

    fn state_with(items: &[(u64, &str, bool)]) -> TodoState {
        let mut state = TodoState::new();
        for &(id, text, completed) in items {
            state.items.push(TodoItem {
                id: TodoId::new(id),
                text: text.to_string(),
                completed,
            });
        }
        state
    }

    fn texts(state: &TodoState) -> Vec<&str> {
        state.items.iter().map(|item| item.text.as_str()).collect()
    }

    #[test]
    fn test_submit_adds_trimmed_item_at_front() {
        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(state_with(&[(100, "Walk dog", false)]))
            .when_actions(type_and_submit("  Buy milk \t"))
            .then_state(|state| {
                assert_eq!(texts(state), vec!["Buy milk", "Walk dog"]);
                assert_eq!(state.items[0].id, TodoId::new(1));
                assert!(!state.items[0].completed);
                assert!(state.draft_text.is_empty());
                assert!(state.error_message.is_none());
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_submit_empty_draft_is_noop() {
        let mut given = TodoState::new();
        given.draft_text = "   ".to_string();
        given.error_message = Some(DUPLICATE_MESSAGE.to_string());

        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(given.clone())
            .when_action(TodoAction::SubmitDraft)
            .then_state(move |state| assert_eq!(state, &given))
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_submit_duplicate_sets_error() {
        let given = state_with(&[(1, "Buy milk", false)]);

        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(given.clone())
            .when_actions(type_and_submit("buy milk"))
            .then_state(move |state| {
                assert_eq!(state.items, given.items);
                assert_eq!(state.error_message.as_deref(), Some(DUPLICATE_MESSAGE));
                assert_eq!(state.draft_text, "buy milk");
            })
            .run();
    }

    #[test]
    fn test_submit_duplicate_of_completed_item_is_rejected() {
        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(state_with(&[(1, "Buy milk", true)]))
            .when_actions(type_and_submit("BUY MILK"))
            .then_state(|state| {
                assert_eq!(state.count(), 1);
                assert_eq!(state.error_message.as_deref(), Some(DUPLICATE_MESSAGE));
            })
            .run();
    }

    #[test]
    fn test_update_draft_clears_error() {
        let mut given = TodoState::new();
        given.error_message = Some(DUPLICATE_MESSAGE.to_string());

        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(given)
            .when_action(TodoAction::UpdateDraft {
                text: String::new(),
            })
            .then_state(|state| {
                assert!(state.error_message.is_none());
                assert!(state.draft_text.is_empty());
            })
            .run();
    }

    #[test]
    fn test_edit_resubmitting_same_text_succeeds() {
        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(state_with(&[(1, "Buy milk", false)]))
            .when_action(TodoAction::BeginEdit { id: TodoId::new(1) })
            .when_action(TodoAction::SubmitDraft)
            .then_state(|state| {
                assert_eq!(texts(state), vec!["Buy milk"]);
                assert!(state.editing_id.is_none());
                assert!(state.error_message.is_none());
            })
            .run();
    }

    #[test]
    fn test_edit_may_change_case_of_own_text() {
        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(state_with(&[(1, "buy milk", false)]))
            .when_action(TodoAction::BeginEdit { id: TodoId::new(1) })
            .when_actions(type_and_submit("Buy Milk"))
            .then_state(|state| assert_eq!(texts(state), vec!["Buy Milk"]))
            .run();
    }

    #[test]
    fn test_edit_colliding_with_other_item_is_rejected() {
        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(state_with(&[(2, "Walk dog", false), (1, "Buy milk", false)]))
            .when_action(TodoAction::BeginEdit { id: TodoId::new(1) })
            .when_actions(type_and_submit("walk DOG"))
            .then_state(|state| {
                assert_eq!(texts(state), vec!["Walk dog", "Buy milk"]);
                assert_eq!(state.editing_id, Some(TodoId::new(1)));
                assert_eq!(state.error_message.as_deref(), Some(DUPLICATE_MESSAGE));
            })
            .run();
    }

    #[test]
    fn test_begin_edit_loads_draft() {
        let mut given = state_with(&[(1, "Buy milk", false)]);
        given.error_message = Some(DUPLICATE_MESSAGE.to_string());

        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(given)
            .when_action(TodoAction::BeginEdit { id: TodoId::new(1) })
            .then_state(|state| {
                assert_eq!(state.draft_text, "Buy milk");
                assert_eq!(state.editing_id, Some(TodoId::new(1)));
                assert!(state.error_message.is_none());
                assert_eq!(state.submit_label(), "EDIT");
            })
            .run();
    }

    #[test]
    fn test_begin_edit_retargets_and_discards_draft() {
        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(state_with(&[(2, "B", false), (1, "A", false)]))
            .when_action(TodoAction::BeginEdit { id: TodoId::new(1) })
            .when_action(TodoAction::UpdateDraft {
                text: "A changed".to_string(),
            })
            .when_action(TodoAction::BeginEdit { id: TodoId::new(2) })
            .then_state(|state| {
                assert_eq!(state.draft_text, "B");
                assert_eq!(state.editing_id, Some(TodoId::new(2)));
                assert_eq!(texts(state), vec!["B", "A"]);
            })
            .run();
    }

    #[test]
    fn test_completed_item_cannot_be_edited_or_deleted() {
        let given = state_with(&[(1, "Buy milk", true)]);

        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(given.clone())
            .when_action(TodoAction::DeleteItem { id: TodoId::new(1) })
            .when_action(TodoAction::BeginEdit { id: TodoId::new(1) })
            .then_state(move |state| assert_eq!(state, &given))
            .run();
    }

    #[test]
    fn test_delete_removes_open_item() {
        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(state_with(&[(2, "B", false), (1, "A", false)]))
            .when_action(TodoAction::DeleteItem { id: TodoId::new(2) })
            .then_state(|state| assert_eq!(texts(state), vec!["A"]))
            .run();
    }

    #[test]
    fn test_delete_edited_item_clears_editing() {
        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(state_with(&[(1, "A", false)]))
            .when_action(TodoAction::BeginEdit { id: TodoId::new(1) })
            .when_action(TodoAction::DeleteItem { id: TodoId::new(1) })
            .then_state(|state| {
                assert_eq!(state.count(), 0);
                assert!(state.editing_id.is_none());
                assert_eq!(state.submit_label(), "ADD");
            })
            .run();
    }

    #[test]
    fn test_unknown_ids_are_noops() {
        let given = state_with(&[(1, "A", false)]);

        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(given.clone())
            .when_actions([
                TodoAction::DeleteItem { id: TodoId::new(9) },
                TodoAction::ToggleComplete { id: TodoId::new(9) },
                TodoAction::BeginEdit { id: TodoId::new(9) },
            ])
            .then_state(move |state| assert_eq!(state, &given))
            .run();
    }

    #[test]
    fn test_toggle_twice_restores_item() {
        let given = state_with(&[(2, "B", false), (1, "A", true)]);

        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(given.clone())
            .when_action(TodoAction::ToggleComplete { id: TodoId::new(2) })
            .then_state(|state| {
                assert!(state.items[0].completed);
                assert!(state.items[1].completed);
            })
            .run();

        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(given.clone())
            .when_actions([
                TodoAction::ToggleComplete { id: TodoId::new(1) },
                TodoAction::ToggleComplete { id: TodoId::new(1) },
            ])
            .then_state(move |state| assert_eq!(state, &given))
            .run();
    }

    #[test]
    fn test_toggle_leaves_draft_and_editing_alone() {
        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(state_with(&[(2, "B", false), (1, "A", false)]))
            .when_action(TodoAction::BeginEdit { id: TodoId::new(1) })
            .when_action(TodoAction::ToggleComplete { id: TodoId::new(2) })
            .then_state(|state| {
                assert_eq!(state.draft_text, "A");
                assert_eq!(state.editing_id, Some(TodoId::new(1)));
            })
            .run();
    }

    #[test]
    fn test_submit_after_edit_target_completed_adds_new_item() {
        // The edit target was completed mid-edit, so the draft is a fresh add
        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(state_with(&[(50, "A", false)]))
            .when_action(TodoAction::BeginEdit { id: TodoId::new(50) })
            .when_action(TodoAction::ToggleComplete { id: TodoId::new(50) })
            .when_actions(type_and_submit("A2"))
            .then_state(|state| {
                assert_eq!(texts(state), vec!["A2", "A"]);
                assert!(state.items[1].completed);
                assert!(state.editing_id.is_none());
            })
            .run();
    }

    #[test]
    fn test_end_to_end_scenario() {
        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(TodoState::new())
            .when_actions(type_and_submit("A"))
            .when_actions(type_and_submit("B"))
            // ids are sequential, so "A" is 1
            .when_action(TodoAction::BeginEdit { id: TodoId::new(1) })
            .when_actions(type_and_submit("C"))
            .then_state(|state| {
                assert_eq!(texts(state), vec!["B", "C"]);
                assert_eq!(state.items[1].id, TodoId::new(1));
                assert!(state.items.iter().all(|item| !item.completed));
                assert!(state.editing_id.is_none());
                assert!(state.draft_text.is_empty());
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_event_replay() {
        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(TodoState::new())
            .when_actions([
                TodoAction::TodoAdded {
                    id: TodoId::new(10),
                    text: "A".to_string(),
                },
                TodoAction::TodoAdded {
                    id: TodoId::new(11),
                    text: "B".to_string(),
                },
                TodoAction::TodoToggled { id: TodoId::new(10) },
                TodoAction::TodoDeleted { id: TodoId::new(11) },
            ])
            .then_state(|state| {
                assert_eq!(state.count(), 1);
                assert!(state.get(TodoId::new(10)).unwrap().completed);
            })
            .run();
    }

    #[test]
    fn test_deleted_event_spares_completed_item() {
        let given = state_with(&[(1, "Buy milk", true)]);

        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(given.clone())
            .when_actions([
                TodoAction::TodoDeleted { id: TodoId::new(1) },
                TodoAction::TodoDeleted { id: TodoId::new(9) },
            ])
            .then_state(move |state| assert_eq!(state, &given))
            .run();
    }

    #[test]
    fn test_added_event_refuses_duplicates_and_taken_ids() {
        let given = state_with(&[(1, "Buy milk", false)]);

        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(given.clone())
            .when_actions([
                TodoAction::TodoAdded {
                    id: TodoId::new(2),
                    text: "BUY MILK".to_string(),
                },
                TodoAction::TodoAdded {
                    id: TodoId::new(1),
                    text: "Walk dog".to_string(),
                },
                TodoAction::TodoAdded {
                    id: TodoId::new(3),
                    text: "  ".to_string(),
                },
                TodoAction::TodoAdded {
                    id: TodoId::new(3),
                    text: " Walk dog".to_string(),
                },
            ])
            .then_state(move |state| assert_eq!(state, &given))
            .run();
    }

    #[test]
    fn test_edit_started_event_loads_item_text() {
        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(state_with(&[(2, "B", true), (1, "A", false)]))
            .when_action(TodoAction::EditStarted {
                id: TodoId::new(2),
                text: "B".to_string(),
            })
            .then_state(|state| {
                assert!(state.editing_id.is_none());
                assert!(state.draft_text.is_empty());
            })
            .run();

        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(state_with(&[(2, "B", true), (1, "A", false)]))
            .when_action(TodoAction::EditStarted {
                id: TodoId::new(1),
                text: "  ".to_string(),
            })
            .then_state(|state| {
                assert_eq!(state.editing_id, Some(TodoId::new(1)));
                assert_eq!(state.draft_text, "A");
            })
            .run();
    }

    #[test]
    fn test_edited_event_needs_matching_edit_in_progress() {
        let given = state_with(&[(2, "B", false), (1, "A", false)]);

        // Not editing anything
        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(given.clone())
            .when_action(TodoAction::TodoEdited {
                id: TodoId::new(1),
                text: "Z".to_string(),
            })
            .then_state(move |state| assert_eq!(state, &given))
            .run();

        // Editing 1: another id or colliding text is refused
        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(state_with(&[(2, "B", false), (1, "A", false)]))
            .when_action(TodoAction::BeginEdit { id: TodoId::new(1) })
            .when_actions([
                TodoAction::TodoEdited {
                    id: TodoId::new(2),
                    text: "Z".to_string(),
                },
                TodoAction::TodoEdited {
                    id: TodoId::new(1),
                    text: "b".to_string(),
                },
            ])
            .then_state(|state| {
                assert_eq!(texts(state), vec!["B", "A"]);
                assert_eq!(state.editing_id, Some(TodoId::new(1)));
            })
            .run();

        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(state_with(&[(2, "B", false), (1, "A", false)]))
            .when_action(TodoAction::BeginEdit { id: TodoId::new(1) })
            .when_action(TodoAction::TodoEdited {
                id: TodoId::new(1),
                text: "a".to_string(),
            })
            .then_state(|state| {
                assert_eq!(texts(state), vec!["B", "a"]);
                assert!(state.editing_id.is_none());
            })
            .run();
    }

    #[test]
    fn test_duplicate_rejected_event_needs_real_collision() {
        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(state_with(&[(1, "A", false)]))
            .when_action(TodoAction::DuplicateRejected {
                candidate: "Z".to_string(),
            })
            .then_state(|state| assert!(state.error_message.is_none()))
            .run();

        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(state_with(&[(1, "A", false)]))
            .when_action(TodoAction::DuplicateRejected {
                candidate: "a".to_string(),
            })
            .then_state(|state| {
                assert_eq!(state.error_message.as_deref(), Some(DUPLICATE_MESSAGE));
            })
            .run();
    }

    #[test]
    fn test_injected_events_cannot_corrupt_the_list() {
        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(TodoState::new())
            .when_actions(type_and_submit("Buy milk"))
            .when_actions([
                TodoAction::ToggleComplete { id: TodoId::new(1) },
                TodoAction::TodoDeleted { id: TodoId::new(1) },
                TodoAction::TodoAdded {
                    id: TodoId::new(2),
                    text: "X".to_string(),
                },
                TodoAction::TodoAdded {
                    id: TodoId::new(2),
                    text: "x".to_string(),
                },
                TodoAction::ToggleComplete { id: TodoId::new(2) },
                TodoAction::EditStarted {
                    id: TodoId::new(2),
                    text: "  ".to_string(),
                },
            ])
            .when_actions(type_and_submit("fresh"))
            .then_state(|state| {
                assert_eq!(texts(state), vec!["fresh", "X", "Buy milk"]);
                let mut ids: Vec<TodoId> = state.items.iter().map(|item| item.id).collect();
                ids.sort();
                ids.dedup();
                assert_eq!(ids.len(), 3);
                // Generator handed out 2, which the injected add already held
                assert_eq!(state.items[0].id, TodoId::new(3));
                assert!(state.editing_id.is_none());
            })
            .run();
    }

    #[test]
    fn test_validate_submit_outcomes() {
        let mut state = state_with(&[(1, "A", false)]);
        state.draft_text = " B ".to_string();
        assert_eq!(
            TodoReducer::validate_submit(&state),
            Ok(Submission::Add {
                text: "B".to_string()
            })
        );

        state.editing_id = Some(TodoId::new(1));
        assert_eq!(
            TodoReducer::validate_submit(&state),
            Ok(Submission::Edit {
                id: TodoId::new(1),
                text: "B".to_string()
            })
        );

        state.draft_text = "a".to_string();
        state.editing_id = None;
        assert_eq!(
            TodoReducer::validate_submit(&state),
            Err(TodoError::Duplicate {
                candidate: "a".to_string()
            })
        );
    }
}
