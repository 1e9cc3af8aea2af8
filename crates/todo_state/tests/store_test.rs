//! Store behavior against an in-memory backend stub

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use todo_client::{ApiError, TodoApi};
use todo_core::{Priority, PriorityStat, Task, TodoList};
use todo_state::{NotificationLevel, TodoStore};
use tokio::sync::broadcast::error::TryRecvError;
use tokio::sync::Mutex;

/// In-memory TodoApi with a switchable failure mode
struct StubApi {
    lists: Mutex<Vec<TodoList>>,
    fail: AtomicBool,
    fetches: AtomicUsize,
    next_id: AtomicUsize,
}

impl StubApi {
    fn new(lists: Vec<TodoList>) -> Arc<Self> {
        Arc::new(Self {
            lists: Mutex::new(lists),
            fail: AtomicBool::new(false),
            fetches: AtomicUsize::new(0),
            next_id: AtomicUsize::new(100),
        })
    }

    fn set_failing(&self, failing: bool) {
        self.fail.store(failing, Ordering::SeqCst);
    }

    fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    fn check(&self) -> todo_client::Result<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(ApiError::Status {
                status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
                url: "stub".to_string(),
            });
        }
        Ok(())
    }

    fn fresh_id(&self, prefix: &str) -> String {
        format!("{}{}", prefix, self.next_id.fetch_add(1, Ordering::SeqCst))
    }

    fn not_found(id: &str) -> ApiError {
        ApiError::Status {
            status: reqwest::StatusCode::NOT_FOUND,
            url: format!("stub/{id}"),
        }
    }
}

#[async_trait]
impl TodoApi for StubApi {
    async fn get_all_lists(&self) -> todo_client::Result<Vec<TodoList>> {
        self.check()?;
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self.lists.lock().await.clone())
    }

    async fn get_list(&self, id: &str) -> todo_client::Result<TodoList> {
        self.check()?;
        self.lists
            .lock()
            .await
            .iter()
            .find(|l| l.id.as_deref() == Some(id))
            .cloned()
            .ok_or_else(|| Self::not_found(id))
    }

    async fn create_list(&self, name: &str) -> todo_client::Result<TodoList> {
        self.check()?;
        let mut list = TodoList::new(name);
        list.id = Some(self.fresh_id("l"));
        self.lists.lock().await.push(list.clone());
        Ok(list)
    }

    async fn update_list(&self, list: &TodoList) -> todo_client::Result<TodoList> {
        self.check()?;
        let mut lists = self.lists.lock().await;
        let stored = lists
            .iter_mut()
            .find(|l| l.id == list.id)
            .ok_or_else(|| Self::not_found(list.id.as_deref().unwrap_or("?")))?;
        *stored = list.clone();
        Ok(stored.clone())
    }

    async fn delete_list(&self, id: &str) -> todo_client::Result<()> {
        self.check()?;
        self.lists
            .lock()
            .await
            .retain(|l| l.id.as_deref() != Some(id));
        Ok(())
    }

    async fn add_task(&self, list_id: &str, task: &Task) -> todo_client::Result<TodoList> {
        self.check()?;
        let mut lists = self.lists.lock().await;
        let list = lists
            .iter_mut()
            .find(|l| l.id.as_deref() == Some(list_id))
            .ok_or_else(|| Self::not_found(list_id))?;
        let mut task = task.clone();
        task.id = Some(self.fresh_id("t"));
        list.tasks.push(task);
        Ok(list.clone())
    }

    async fn update_task(
        &self,
        list_id: &str,
        task_id: &str,
        task: &Task,
    ) -> todo_client::Result<TodoList> {
        self.check()?;
        let mut lists = self.lists.lock().await;
        let list = lists
            .iter_mut()
            .find(|l| l.id.as_deref() == Some(list_id))
            .ok_or_else(|| Self::not_found(list_id))?;
        let stored = list
            .tasks
            .iter_mut()
            .find(|t| t.id.as_deref() == Some(task_id))
            .ok_or_else(|| Self::not_found(task_id))?;
        *stored = task.clone();
        Ok(list.clone())
    }

    async fn delete_task(&self, list_id: &str, task_id: &str) -> todo_client::Result<TodoList> {
        self.check()?;
        let mut lists = self.lists.lock().await;
        let list = lists
            .iter_mut()
            .find(|l| l.id.as_deref() == Some(list_id))
            .ok_or_else(|| Self::not_found(list_id))?;
        list.tasks.retain(|t| t.id.as_deref() != Some(task_id));
        Ok(list.clone())
    }

    async fn priority_stats(&self) -> todo_client::Result<Vec<PriorityStat>> {
        self.check()?;
        let lists = self.lists.lock().await;
        let stats = Priority::ALL
            .iter()
            .map(|&priority| PriorityStat {
                priority,
                count: lists
                    .iter()
                    .flat_map(|l| l.tasks.iter())
                    .filter(|t| t.priority == priority)
                    .count() as u64,
            })
            .filter(|s| s.count > 0)
            .collect();
        Ok(stats)
    }
}

fn seeded_list(id: &str, name: &str, tasks: Vec<Task>) -> TodoList {
    let mut list = TodoList::new(name);
    list.id = Some(id.to_string());
    list.tasks = tasks;
    list
}

fn seeded_task(id: &str, title: &str) -> Task {
    let mut task = Task::new(title);
    task.id = Some(id.to_string());
    task
}

#[tokio::test]
async fn lists_are_cached_between_reads() {
    let api = StubApi::new(vec![seeded_list("l1", "Groceries", vec![])]);
    let store = TodoStore::new(api.clone());

    store.lists().await.unwrap();
    store.lists().await.unwrap();

    assert_eq!(api.fetch_count(), 1);
}

#[tokio::test]
async fn successful_mutation_refetches_and_notifies() {
    let api = StubApi::new(vec![]);
    let store = TodoStore::new(api.clone());
    let mut rx = store.notifications().subscribe();

    store.lists().await.unwrap();
    let created = store.create_list("Groceries").await.unwrap().unwrap();

    assert!(created.id.is_some());
    // initial fetch plus the refetch triggered by the mutation
    assert_eq!(api.fetch_count(), 2);

    let lists = store.lists().await.unwrap();
    assert_eq!(api.fetch_count(), 2);
    assert_eq!(lists.len(), 1);

    let note = rx.try_recv().unwrap();
    assert_eq!(note.level, NotificationLevel::Success);
    assert_eq!(note.message, "Todo list created successfully");
}

#[tokio::test]
async fn blank_list_name_is_a_noop() {
    let api = StubApi::new(vec![]);
    let store = TodoStore::new(api.clone());
    let mut rx = store.notifications().subscribe();

    let result = store.create_list("   ").await.unwrap();

    assert!(result.is_none());
    assert_eq!(api.fetch_count(), 0);
    assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
}

#[tokio::test]
async fn blank_task_title_is_a_noop() {
    let api = StubApi::new(vec![seeded_list("l1", "Groceries", vec![])]);
    let store = TodoStore::new(api.clone());

    let result = store.add_task("l1", Task::new("  \t ")).await.unwrap();

    assert!(result.is_none());
    assert!(api.lists.lock().await[0].tasks.is_empty());
}

#[tokio::test]
async fn task_titles_are_trimmed() {
    let api = StubApi::new(vec![seeded_list("l1", "Groceries", vec![])]);
    let store = TodoStore::new(api.clone());

    let updated = store
        .add_task("l1", Task::new("  Buy milk  "))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.tasks[0].title, "Buy milk");
}

#[tokio::test]
async fn toggle_flips_completion_flag() {
    let api = StubApi::new(vec![seeded_list(
        "l1",
        "Chores",
        vec![seeded_task("t1", "Laundry")],
    )]);
    let store = TodoStore::new(api.clone());

    store.toggle_task("l1", "t1").await.unwrap();
    let lists = store.lists().await.unwrap();
    assert!(lists[0].tasks[0].done);

    store.toggle_task("l1", "t1").await.unwrap();
    let lists = store.lists().await.unwrap();
    assert!(!lists[0].tasks[0].done);
}

#[tokio::test]
async fn failed_mutation_keeps_cache_and_notifies_error() {
    let api = StubApi::new(vec![seeded_list("l1", "Groceries", vec![])]);
    let store = TodoStore::new(api.clone());
    let mut rx = store.notifications().subscribe();

    let before = store.lists().await.unwrap();
    api.set_failing(true);

    let result = store.add_task("l1", Task::new("Buy milk")).await;
    assert!(result.is_err());

    // cache still serves the pre-mutation snapshot without a fetch
    let after = store.lists().await.unwrap();
    assert_eq!(before, after);
    assert_eq!(api.fetch_count(), 1);

    let note = rx.try_recv().unwrap();
    assert_eq!(note.level, NotificationLevel::Error);
}

#[tokio::test]
async fn delete_task_refetches_updated_list() {
    let api = StubApi::new(vec![seeded_list(
        "l1",
        "Chores",
        vec![seeded_task("t1", "Laundry"), seeded_task("t2", "Dishes")],
    )]);
    let store = TodoStore::new(api.clone());

    let updated = store.delete_task("l1", "t1").await.unwrap();
    assert_eq!(updated.tasks.len(), 1);

    let lists = store.lists().await.unwrap();
    assert_eq!(lists[0].tasks.len(), 1);
    assert_eq!(lists[0].tasks[0].id.as_deref(), Some("t2"));
}

#[tokio::test]
async fn rename_list_updates_backend() {
    let api = StubApi::new(vec![seeded_list("l1", "Groceries", vec![])]);
    let store = TodoStore::new(api.clone());

    let updated = store.rename_list("l1", "Errands").await.unwrap().unwrap();
    assert_eq!(updated.name, "Errands");

    let lists = store.lists().await.unwrap();
    assert_eq!(lists[0].name, "Errands");
}

#[tokio::test]
async fn stats_come_from_the_stats_endpoint() {
    let mut high = Task::new("Ship release");
    high.priority = Priority::High;
    let api = StubApi::new(vec![seeded_list("l1", "Work", vec![high])]);
    let store = TodoStore::new(api.clone());

    let stats = store.stats().await.unwrap();
    assert_eq!(stats.len(), 1);
    assert_eq!(stats[0].priority, Priority::High);
    assert_eq!(stats[0].count, 1);
}
