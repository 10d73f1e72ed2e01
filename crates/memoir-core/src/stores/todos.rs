//! Wish list operations

use super::TodosStore;
use memoir_types::{partition_todos, TodoItem};

impl TodosStore {
    /// Newest items are stored first
    pub async fn add(&self, item: TodoItem) -> TodoItem {
        self.update(|todos| todos.insert(0, item.clone())).await;
        item
    }

    /// Flip completion; returns the new state, or `None` for an unknown id
    pub async fn toggle(&self, id: &str) -> Option<bool> {
        self.edit(id, |todo| {
            todo.completed = !todo.completed;
            todo.completed
        })
        .await
    }

    pub async fn edit<F, R>(&self, id: &str, f: F) -> Option<R>
    where
        F: FnOnce(&mut TodoItem) -> R,
    {
        self.update(|todos| todos.iter_mut().find(|t| t.id == id).map(f))
            .await
    }

    pub async fn delete(&self, id: &str) -> bool {
        self.update(|todos| {
            let before = todos.len();
            todos.retain(|t| t.id != id);
            todos.len() != before
        })
        .await
    }

    pub async fn pending(&self) -> Vec<TodoItem> {
        let todos = self.load().await;
        partition_todos(&todos).0.into_iter().cloned().collect()
    }

    pub async fn completed(&self) -> Vec<TodoItem> {
        let todos = self.load().await;
        partition_todos(&todos).1.into_iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::gateway;
    use super::*;
    use memoir_types::Priority;

    #[tokio::test]
    async fn test_todo_lifecycle() {
        let store = TodosStore::new(gateway());
        let a = store.add(TodoItem::new("travel", "Bali", Priority::High)).await;
        let b = store.add(TodoItem::new("cook", "", Priority::Low)).await;

        let ids: Vec<String> = store.load().await.into_iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![b.id.clone(), a.id.clone()]);

        assert_eq!(store.toggle(&a.id).await, Some(true));
        assert_eq!(store.toggle("missing").await, None);
        assert_eq!(store.pending().await, vec![b.clone()]);
        assert_eq!(store.completed().await.len(), 1);

        assert_eq!(store.edit(&b.id, |t| t.title = "bake".into()).await, Some(()));
        assert!(store.delete(&a.id).await);
        let todos = store.load().await;
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].title, "bake");
    }
}
