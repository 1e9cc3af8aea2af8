//! Task - single to-do entry
//!
//! Tasks carry a priority and optional due-date metadata. Field names on the
//! wire follow the backend's JSON shape (`_id`, `dueDate`, `createdAt`).

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Priority bucket of a task
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// All priorities, in ascending order
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    /// Wire representation (`"low"` / `"medium"` / `"high"`)
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown priority: {0}")]
pub struct ParsePriorityError(String);

impl FromStr for Priority {
    type Err = ParsePriorityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(ParsePriorityError(other.to_string())),
        }
    }
}

/// A single to-do entry
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Task {
    /// Server-assigned identifier, absent until the backend has stored the task
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Short title shown in list views
    pub title: String,

    /// Optional longer description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Completion flag
    pub done: bool,

    /// Optional due date (calendar date, no time component)
    #[serde(rename = "dueDate", default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,

    /// When this task was created
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    /// Priority bucket
    #[serde(default)]
    pub priority: Priority,
}

impl Task {
    /// Create a new pending task with medium priority
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            description: None,
            done: false,
            due_date: None,
            created_at: Utc::now(),
            priority: Priority::default(),
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Flip the completion flag
    pub fn toggle(&mut self) {
        self.done = !self.done;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_task_is_pending() {
        let task = Task::new("Buy milk");
        assert!(!task.done);
        assert!(task.id.is_none());
        assert_eq!(task.priority, Priority::Medium);
    }

    #[test]
    fn test_toggle_flips_completion() {
        let mut task = Task::new("Buy milk");
        task.toggle();
        assert!(task.done);
        task.toggle();
        assert!(!task.done);
    }

    #[test]
    fn test_priority_parsing() {
        assert_eq!("HIGH".parse::<Priority>().unwrap(), Priority::High);
        assert_eq!(" low ".parse::<Priority>().unwrap(), Priority::Low);
        assert!("urgent".parse::<Priority>().is_err());
    }

    #[test]
    fn test_wire_format() {
        let task = Task::new("Water plants")
            .with_priority(Priority::High)
            .with_due_date(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());

        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["priority"], "high");
        assert_eq!(json["dueDate"], "2025-06-01");
        assert!(json.get("_id").is_none());
        assert!(json.get("description").is_none());
        assert!(json.get("createdAt").is_some());
    }

    #[test]
    fn test_deserialize_server_task() {
        let json = r#"{
            "_id": "665f1c2e9b1d8c0012345678",
            "title": "Ship release",
            "done": true,
            "createdAt": "2025-05-30T12:00:00Z",
            "priority": "low"
        }"#;

        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.id.as_deref(), Some("665f1c2e9b1d8c0012345678"));
        assert!(task.done);
        assert_eq!(task.priority, Priority::Low);
        assert!(task.due_date.is_none());
    }
}
