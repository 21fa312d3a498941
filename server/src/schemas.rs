//! JSON shapes accepted and returned by the HTTP surface.
//!
//! # Design
//! These are deliberately separate from `todo::Todo` so the wire format can
//! evolve without touching storage. Partial updates need to tell "field
//! absent" from "field set", so `TodoUpdate` reads every field through
//! `present` and only `description` may be explicitly `null`.

use serde::{Deserialize, Deserializer, Serialize};

use crate::todo::{NewTodo, Todo, TodoId, TodoPatch};

/// Body of `POST /todos`.
#[derive(Debug, Deserialize)]
pub struct TodoCreate {
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

/// Body of `PUT /todos/{todo_id}`.
#[derive(Debug, Default, Deserialize)]
pub struct TodoUpdate {
    #[serde(default, deserialize_with = "present")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub completed: Option<bool>,
}

/// A todo as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoResponse {
    pub id: TodoId,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
}

/// `{"message": ...}` body used by the root and delete endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Only runs when the key is in the payload, so a missing key stays `None`
/// through `#[serde(default)]` while a present one becomes `Some(T)`.
fn present<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl From<TodoCreate> for NewTodo {
    fn from(input: TodoCreate) -> Self {
        NewTodo {
            title: input.title,
            description: input.description,
            completed: input.completed,
        }
    }
}

impl From<TodoUpdate> for TodoPatch {
    fn from(input: TodoUpdate) -> Self {
        TodoPatch {
            title: input.title,
            description: input.description,
            completed: input.completed,
        }
    }
}

impl From<Todo> for TodoResponse {
    fn from(todo: Todo) -> Self {
        TodoResponse {
            id: todo.id,
            title: todo.title,
            description: todo.description,
            completed: todo.completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_serializes_null_description() {
        let todo = TodoResponse {
            id: 1,
            title: "Buy milk".to_string(),
            description: None,
            completed: false,
        };
        let json = serde_json::to_value(&todo).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": 1, "title": "Buy milk", "description": null, "completed": false})
        );
    }

    #[test]
    fn create_defaults_completed_and_description() {
        let input: TodoCreate = serde_json::from_str(r#"{"title":"No extras"}"#).unwrap();
        assert_eq!(input.title, "No extras");
        assert!(input.description.is_none());
        assert!(!input.completed);
    }

    #[test]
    fn create_accepts_empty_title() {
        let input: TodoCreate = serde_json::from_str(r#"{"title":""}"#).unwrap();
        assert_eq!(input.title, "");
    }

    #[test]
    fn create_rejects_missing_title() {
        let result: Result<TodoCreate, _> = serde_json::from_str(r#"{"completed":true}"#);
        assert!(result.is_err());
    }

    #[test]
    fn create_rejects_wrong_types() {
        assert!(serde_json::from_str::<TodoCreate>(r#"{"title":5}"#).is_err());
        assert!(serde_json::from_str::<TodoCreate>(r#"{"title":"x","completed":"yes"}"#).is_err());
        assert!(serde_json::from_str::<TodoCreate>(r#"{"title":"x","completed":null}"#).is_err());
    }

    #[test]
    fn create_ignores_unknown_fields() {
        let input: TodoCreate = serde_json::from_str(r#"{"title":"x","id":99}"#).unwrap();
        assert_eq!(input.title, "x");
    }

    #[test]
    fn update_all_fields_optional() {
        let patch: TodoPatch = serde_json::from_str::<TodoUpdate>("{}").unwrap().into();
        assert!(patch.is_empty());
    }

    #[test]
    fn update_partial_fields() {
        let input: TodoUpdate = serde_json::from_str(r#"{"completed":true}"#).unwrap();
        assert!(input.title.is_none());
        assert!(input.description.is_none());
        assert_eq!(input.completed, Some(true));
    }

    #[test]
    fn update_distinguishes_null_description_from_absent() {
        let cleared: TodoUpdate = serde_json::from_str(r#"{"description":null}"#).unwrap();
        assert_eq!(cleared.description, Some(None));

        let set: TodoUpdate = serde_json::from_str(r#"{"description":"later"}"#).unwrap();
        assert_eq!(set.description, Some(Some("later".to_string())));
    }

    #[test]
    fn update_rejects_null_title_and_completed() {
        assert!(serde_json::from_str::<TodoUpdate>(r#"{"title":null}"#).is_err());
        assert!(serde_json::from_str::<TodoUpdate>(r#"{"completed":null}"#).is_err());
    }
}
