//! TodoList - Container for Tasks
//!
//! A named, ordered collection of tasks. Lists do not reference each other;
//! a task lives in exactly one list.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::task::Task;

/// Named, ordered collection of tasks
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TodoList {
    /// Server-assigned identifier, absent until the backend has stored the list
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Display name
    pub name: String,

    /// When this list was created
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    /// Tasks in this list, in insertion order
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl TodoList {
    /// Create a new empty list
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            created_at: Utc::now(),
            tasks: Vec::new(),
        }
    }

    /// Tasks not yet completed
    pub fn active_tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(|t| !t.done)
    }

    /// Completed tasks
    pub fn completed_tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(|t| t.done)
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Get task by server id
    pub fn get_task(&self, task_id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id.as_deref() == Some(task_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_and_completed_split() {
        let mut list = TodoList::new("Chores");
        let mut done = Task::new("Laundry");
        done.toggle();
        list.tasks.push(done);
        list.tasks.push(Task::new("Dishes"));

        assert_eq!(list.task_count(), 2);
        assert_eq!(list.active_tasks().count(), 1);
        assert_eq!(list.completed_tasks().count(), 1);
        assert_eq!(list.active_tasks().next().unwrap().title, "Dishes");
    }

    #[test]
    fn test_get_task_by_id() {
        let mut list = TodoList::new("Chores");
        let mut task = Task::new("Dishes");
        task.id = Some("abc123".to_string());
        list.tasks.push(task);

        assert!(list.get_task("abc123").is_some());
        assert!(list.get_task("missing").is_none());
    }

    #[test]
    fn test_wire_format() {
        let list = TodoList::new("Groceries");
        let json = serde_json::to_value(&list).unwrap();
        assert_eq!(json["name"], "Groceries");
        assert_eq!(json["tasks"], serde_json::json!([]));
        assert!(json.get("_id").is_none());
        assert!(json.get("createdAt").is_some());
    }
}
