//! TodoStore - cached lists with refetch-on-mutation
//!
//! The data layer of the client: reads serve a cache, every successful
//! mutation invalidates the lists cache and refetches, and outcomes are
//! surfaced as transient notifications. A failed mutation leaves the cache
//! untouched.

use std::sync::Arc;

use log::warn;
use todo_client::TodoApi;
use todo_core::{PriorityStat, Task, TodoList};
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::notifications::NotificationBus;

type Result<T> = std::result::Result<T, StoreError>;

pub struct TodoStore {
    api: Arc<dyn TodoApi>,
    lists: RwLock<Option<Vec<TodoList>>>,
    stats: RwLock<Option<Vec<PriorityStat>>>,
    notifications: NotificationBus,
}

impl TodoStore {
    pub fn new(api: Arc<dyn TodoApi>) -> Self {
        Self {
            api,
            lists: RwLock::new(None),
            stats: RwLock::new(None),
            notifications: NotificationBus::new(),
        }
    }

    pub fn notifications(&self) -> &NotificationBus {
        &self.notifications
    }

    /// Cached lists, fetching on first access
    pub async fn lists(&self) -> Result<Vec<TodoList>> {
        if let Some(lists) = self.lists.read().await.as_ref() {
            return Ok(lists.clone());
        }
        self.refresh_lists().await
    }

    pub async fn refresh_lists(&self) -> Result<Vec<TodoList>> {
        let lists = self.report(self.api.get_all_lists().await)?;
        *self.lists.write().await = Some(lists.clone());
        Ok(lists)
    }

    pub async fn invalidate_lists(&self) {
        *self.lists.write().await = None;
    }

    /// Cached priority stats, fetching on first access
    pub async fn stats(&self) -> Result<Vec<PriorityStat>> {
        if let Some(stats) = self.stats.read().await.as_ref() {
            return Ok(stats.clone());
        }
        self.refresh_stats().await
    }

    pub async fn refresh_stats(&self) -> Result<Vec<PriorityStat>> {
        let stats = self.report(self.api.priority_stats().await)?;
        *self.stats.write().await = Some(stats.clone());
        Ok(stats)
    }

    /// Create a list. Blank names are a no-op.
    pub async fn create_list(&self, name: &str) -> Result<Option<TodoList>> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(None);
        }
        let created = self.report(self.api.create_list(name).await)?;
        self.finish_mutation("Todo list created successfully").await;
        Ok(Some(created))
    }

    /// Rename a list. Blank names are a no-op.
    pub async fn rename_list(&self, list_id: &str, name: &str) -> Result<Option<TodoList>> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(None);
        }
        let mut list = self.find_list(list_id).await?;
        list.name = name.to_string();
        let updated = self.report(self.api.update_list(&list).await)?;
        self.finish_mutation("Todo list updated successfully").await;
        Ok(Some(updated))
    }

    pub async fn delete_list(&self, list_id: &str) -> Result<()> {
        self.report(self.api.delete_list(list_id).await)?;
        self.finish_mutation("Todo list deleted successfully").await;
        Ok(())
    }

    /// Add a task to a list. Blank titles are a no-op; titles are trimmed.
    pub async fn add_task(&self, list_id: &str, mut task: Task) -> Result<Option<TodoList>> {
        task.title = task.title.trim().to_string();
        if task.title.is_empty() {
            return Ok(None);
        }
        let updated = self.report(self.api.add_task(list_id, &task).await)?;
        self.finish_mutation("Task added successfully").await;
        Ok(Some(updated))
    }

    pub async fn update_task(&self, list_id: &str, task_id: &str, task: Task) -> Result<TodoList> {
        let updated = self.report(self.api.update_task(list_id, task_id, &task).await)?;
        self.finish_mutation("Task updated successfully").await;
        Ok(updated)
    }

    /// Flip a task's completion flag and push the update.
    pub async fn toggle_task(&self, list_id: &str, task_id: &str) -> Result<TodoList> {
        let list = self.find_list(list_id).await?;
        let mut task = list
            .get_task(task_id)
            .cloned()
            .ok_or_else(|| StoreError::TaskNotFound(task_id.to_string()))?;
        task.toggle();
        self.update_task(list_id, task_id, task).await
    }

    pub async fn delete_task(&self, list_id: &str, task_id: &str) -> Result<TodoList> {
        let updated = self.report(self.api.delete_task(list_id, task_id).await)?;
        self.finish_mutation("Task deleted successfully").await;
        Ok(updated)
    }

    /// Resolve a list from the cache, fetching if needed.
    pub async fn find_list(&self, list_id: &str) -> Result<TodoList> {
        self.lists()
            .await?
            .into_iter()
            .find(|l| l.id.as_deref() == Some(list_id))
            .ok_or_else(|| StoreError::ListNotFound(list_id.to_string()))
    }

    /// Success toast, then invalidate and refetch the lists cache.
    async fn finish_mutation(&self, message: &str) {
        self.notifications.success(message);
        self.invalidate_lists().await;
        if let Err(err) = self.refresh_lists().await {
            warn!("refetch after mutation failed: {err}");
        }
    }

    fn report<T>(&self, result: todo_client::Result<T>) -> Result<T> {
        match result {
            Ok(value) => Ok(value),
            Err(err) => {
                self.notifications.error(err.to_string());
                Err(err.into())
            }
        }
    }
}
