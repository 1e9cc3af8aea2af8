//! UI session state
//!
//! What the browser UI kept in component state: which list is active, plus
//! display preferences. Persisted locally between runs; never sent to the
//! backend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use todo_core::TodoList;

/// UI session - active selection and preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiSession {
    /// Currently active list id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_list_id: Option<String>,

    /// Display preferences
    #[serde(default)]
    pub preferences: UiPreferences,

    /// Last time the session was updated
    pub last_updated: DateTime<Utc>,
}

impl Default for UiSession {
    fn default() -> Self {
        Self {
            active_list_id: None,
            preferences: UiPreferences::default(),
            last_updated: Utc::now(),
        }
    }
}

impl UiSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the first list when nothing valid is selected.
    /// Returns true when the selection changed.
    pub fn ensure_active(&mut self, lists: &[TodoList]) -> bool {
        let valid = self
            .active_list_id
            .as_deref()
            .map(|id| lists.iter().any(|l| l.id.as_deref() == Some(id)))
            .unwrap_or(false);
        if valid {
            return false;
        }
        let first = lists.iter().find_map(|l| l.id.clone());
        if first == self.active_list_id {
            return false;
        }
        self.set_active(first);
        true
    }

    pub fn set_active(&mut self, list_id: Option<String>) {
        self.active_list_id = list_id;
        self.last_updated = Utc::now();
    }

    /// Deleting the active list selects the first remaining list, if any.
    pub fn handle_list_removed(&mut self, removed_id: &str, remaining: &[TodoList]) {
        if self.active_list_id.as_deref() != Some(removed_id) {
            return;
        }
        let next = remaining
            .iter()
            .filter(|l| l.id.as_deref() != Some(removed_id))
            .find_map(|l| l.id.clone());
        self.set_active(next);
    }

    /// Resolve the active list against a fetched snapshot.
    pub fn active_list<'a>(&self, lists: &'a [TodoList]) -> Option<&'a TodoList> {
        let id = self.active_list_id.as_deref()?;
        lists.iter().find(|l| l.id.as_deref() == Some(id))
    }
}

/// Display preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiPreferences {
    /// Whether the completed-tasks section is rendered
    #[serde(default = "default_true")]
    pub show_completed: bool,

    /// Terminal color handling
    #[serde(default)]
    pub color_mode: ColorMode,
}

fn default_true() -> bool {
    true
}

impl Default for UiPreferences {
    fn default() -> Self {
        Self {
            show_completed: true,
            color_mode: ColorMode::Auto,
        }
    }
}

/// Terminal color handling
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Follow the terminal's capabilities
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorMode::Auto => "auto",
            ColorMode::Always => "always",
            ColorMode::Never => "never",
        }
    }
}

impl std::fmt::Display for ColorMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ColorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(ColorMode::Auto),
            "always" => Ok(ColorMode::Always),
            "never" => Ok(ColorMode::Never),
            other => Err(format!("unknown color mode: {other}")),
        }
    }
}
