//! The todo record as the rest of the server sees it.
//!
//! # Design
//! `Todo` is the in-memory form of one row. `NewTodo` and `TodoPatch` are the
//! inputs the stores accept; they carry no `id` because ids are assigned by
//! storage and never change. Request/response JSON shapes live in
//! `schemas` and convert into these types at the handler boundary.

/// Storage-assigned identifier of a todo.
pub type TodoId = i64;

/// A persisted todo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
}

/// Fields for a row about to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
}

impl NewTodo {
    pub fn into_todo(self, id: TodoId) -> Todo {
        Todo {
            id,
            title: self.title,
            description: self.description,
            completed: self.completed,
        }
    }
}

/// A partial update. `None` leaves the field untouched.
///
/// `description` is doubly optional: `Some(None)` clears it, `Some(Some(_))`
/// overwrites it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub completed: Option<bool>,
}

impl TodoPatch {
    /// Overwrite only the fields that were supplied.
    pub fn apply(self, todo: &mut Todo) {
        if let Some(title) = self.title {
            todo.title = title;
        }
        if let Some(description) = self.description {
            todo.description = description;
        }
        if let Some(completed) = self.completed {
            todo.completed = completed;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.completed.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn milk() -> Todo {
        Todo {
            id: 1,
            title: "Buy milk".to_string(),
            description: Some("2 litres".to_string()),
            completed: false,
        }
    }

    #[test]
    fn empty_patch_changes_nothing() {
        let mut todo = milk();
        let patch = TodoPatch::default();
        assert!(patch.is_empty());
        patch.apply(&mut todo);
        assert_eq!(todo, milk());
    }

    #[test]
    fn patch_only_touches_supplied_fields() {
        let mut todo = milk();
        TodoPatch {
            completed: Some(true),
            ..Default::default()
        }
        .apply(&mut todo);
        assert_eq!(todo.title, "Buy milk");
        assert_eq!(todo.description.as_deref(), Some("2 litres"));
        assert!(todo.completed);
    }

    #[test]
    fn explicit_none_description_clears_it() {
        let mut todo = milk();
        TodoPatch {
            description: Some(None),
            ..Default::default()
        }
        .apply(&mut todo);
        assert!(todo.description.is_none());
    }

    #[test]
    fn applying_same_patch_twice_is_idempotent() {
        let patch = TodoPatch {
            title: Some("Buy oat milk".to_string()),
            description: None,
            completed: Some(true),
        };
        let mut once = milk();
        patch.clone().apply(&mut once);
        let mut twice = once.clone();
        patch.apply(&mut twice);
        assert_eq!(once, twice);
    }

    #[test]
    fn new_todo_keeps_fields_and_takes_id() {
        let todo = NewTodo {
            title: "Walk dog".to_string(),
            description: None,
            completed: false,
        }
        .into_todo(7);
        assert_eq!(todo.id, 7);
        assert_eq!(todo.title, "Walk dog");
        assert!(!todo.completed);
    }
}
