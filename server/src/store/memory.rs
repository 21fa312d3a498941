use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{StoreError, TodoStore};
use crate::todo::{NewTodo, Todo, TodoId, TodoPatch};

/// In-process store. Ids start at 1 and are never reused, so listing by
/// key is insertion order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    last_id: TodoId,
    todos: BTreeMap<TodoId, Todo>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.todos.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl TodoStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Todo>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.todos.values().cloned().collect())
    }

    async fn create(&self, new: NewTodo) -> Result<Todo, StoreError> {
        let mut inner = self.inner.write().await;
        inner.last_id += 1;
        let todo = new.into_todo(inner.last_id);
        inner.todos.insert(todo.id, todo.clone());
        Ok(todo)
    }

    async fn update(&self, id: TodoId, patch: TodoPatch) -> Result<Todo, StoreError> {
        let mut inner = self.inner.write().await;
        let todo = inner.todos.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        patch.apply(todo);
        Ok(todo.clone())
    }

    async fn delete(&self, id: TodoId) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        inner
            .todos
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_todo(title: &str) -> NewTodo {
        NewTodo {
            title: title.to_string(),
            description: None,
            completed: false,
        }
    }

    #[tokio::test]
    async fn ids_are_sequential_and_not_reused() {
        let store = MemoryStore::new();
        let a = store.create(new_todo("a")).await.unwrap();
        let b = store.create(new_todo("b")).await.unwrap();
        assert_eq!((a.id, b.id), (1, 2));

        store.delete(b.id).await.unwrap();
        let c = store.create(new_todo("c")).await.unwrap();
        assert_eq!(c.id, 3);
    }

    #[tokio::test]
    async fn list_is_insertion_order() {
        let store = MemoryStore::new();
        for title in ["first", "second", "third"] {
            store.create(new_todo(title)).await.unwrap();
        }
        let titles: Vec<_> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert_eq!(titles, ["first", "second", "third"]);
    }

    #[tokio::test]
    async fn update_missing_is_not_found() {
        let store = MemoryStore::new();
        let err = store.update(42, TodoPatch::default()).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(42)));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn delete_twice_is_not_found() {
        let store = MemoryStore::new();
        let todo = store.create(new_todo("once")).await.unwrap();
        store.delete(todo.id).await.unwrap();
        let err = store.delete(todo.id).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(id) if id == todo.id));
    }
}
