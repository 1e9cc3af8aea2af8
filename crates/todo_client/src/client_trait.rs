use async_trait::async_trait;
use todo_core::{PriorityStat, Task, TodoList};

use crate::error::Result;

/// The todo backend's REST surface. The store depends on this trait so that
/// tests can substitute an in-memory implementation.
#[async_trait]
pub trait TodoApi: Send + Sync {
    /// Get all todo lists
    async fn get_all_lists(&self) -> Result<Vec<TodoList>>;

    /// Get a specific todo list
    async fn get_list(&self, id: &str) -> Result<TodoList>;

    /// Create a new, empty todo list
    async fn create_list(&self, name: &str) -> Result<TodoList>;

    /// Replace a todo list (rename, reorder)
    async fn update_list(&self, list: &TodoList) -> Result<TodoList>;

    /// Delete a todo list
    async fn delete_list(&self, id: &str) -> Result<()>;

    /// Add a task to a todo list; returns the updated list
    async fn add_task(&self, list_id: &str, task: &Task) -> Result<TodoList>;

    /// Replace a task in a todo list; returns the updated list
    async fn update_task(&self, list_id: &str, task_id: &str, task: &Task) -> Result<TodoList>;

    /// Delete a task from a todo list; returns the updated list
    async fn delete_task(&self, list_id: &str, task_id: &str) -> Result<TodoList>;

    /// Aggregate task counts by priority across all lists
    async fn priority_stats(&self) -> Result<Vec<PriorityStat>>;
}
