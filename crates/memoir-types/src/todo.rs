//! Shared wish list / to-do items

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TodoItem {
    pub fn new(title: impl Into<String>, description: impl Into<String>, priority: Priority) -> Self {
        Self {
            id: crate::generate_id(),
            title: title.into(),
            description: description.into(),
            completed: false,
            priority,
            due_date: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = Some(due_date.into());
        self
    }
}

/// Split into (pending, completed), preserving order
pub fn partition_todos(todos: &[TodoItem]) -> (Vec<&TodoItem>, Vec<&TodoItem>) {
    todos.iter().partition(|t| !t.completed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partition() {
        let mut done = TodoItem::new("done", "", Priority::Low);
        done.completed = true;
        let todos = vec![TodoItem::new("a", "", Priority::High), done];

        let (pending, completed) = partition_todos(&todos);
        assert_eq!(pending.len(), 1);
        assert_eq!(completed[0].title, "done");
    }

    #[test]
    fn test_wire_format_is_camel_case() {
        let todo = TodoItem::new("t", "d", Priority::High).with_due_date("2024-12-24");
        let json = serde_json::to_value(&todo).unwrap();
        assert_eq!(json["dueDate"], "2024-12-24");
        assert_eq!(json["priority"], "high");
        assert!(json.get("createdAt").is_some());
    }
}
