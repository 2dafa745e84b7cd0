//! The task-list store: ordered tasks plus the theme choice, with every
//! successful mutation mirrored to persistent storage.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::notification::Notification;
use crate::storage::Storage;
use crate::theme::ThemeMode;

pub const TASKS_KEY: &str = "todo";
pub const THEME_KEY: &str = "theme";

/// A single to-do entry. Text is stored exactly as typed; display
/// truncation is the renderer's concern.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct Task {
    pub text: String,
    #[serde(default)]
    pub done: bool,
}

impl Task {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            done: false,
        }
    }
}

/// Validation failures. All are recovered locally: the intent is aborted,
/// state is unchanged, and the user retries with corrected input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentError {
    EmptyInput,
    DuplicateTask,
    CannotEditCompleted,
    IndexOutOfRange,
}

impl IntentError {
    /// The user-facing notification for this failure.
    pub fn notification(self) -> Notification {
        match self {
            Self::EmptyInput => Notification::warning("Task cannot be empty!"),
            Self::DuplicateTask => Notification::error("Task already exists!"),
            Self::CannotEditCompleted => Notification::warning("Cannot edit a completed task!"),
            Self::IndexOutOfRange => Notification::warning("No task at that position!"),
        }
    }
}

impl fmt::Display for IntentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::EmptyInput => "empty input",
            Self::DuplicateTask => "duplicate task",
            Self::CannotEditCompleted => "cannot edit completed task",
            Self::IndexOutOfRange => "index out of range",
        };
        f.write_str(name)
    }
}

impl std::error::Error for IntentError {}

/// Owns the ordered task list and the theme, applies mutating intents, and
/// persists after every successful mutation.
///
/// In-memory state is the source of truth: a storage fault never rolls back
/// a mutation. The fault is surfaced as an error notification and the write
/// is retried implicitly on the next mutation, since every mutation writes
/// the full state.
pub struct TaskListStore {
    tasks: Vec<Task>,
    theme: ThemeMode,
    storage: Storage,
}

impl TaskListStore {
    /// Load persisted state. A missing `todo` key yields an empty list, a
    /// missing `theme` key yields dark; unparseable payloads are treated as
    /// absent rather than surfaced.
    pub fn load(storage: Storage) -> Self {
        let tasks = match storage.get(TASKS_KEY) {
            Some(raw) => match serde_json::from_str::<Vec<Task>>(&raw) {
                Ok(tasks) => tasks,
                Err(error) => {
                    warn!("malformed task list in storage, starting empty: {error}");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        let theme = match storage.get(THEME_KEY) {
            Some(raw) => ThemeMode::from_str(&raw).unwrap_or_else(|()| {
                warn!("malformed theme '{raw}' in storage, falling back to dark");
                ThemeMode::default()
            }),
            None => ThemeMode::default(),
        };

        debug!(task_count = tasks.len(), theme = theme.as_str(), "store loaded");

        Self {
            tasks,
            theme,
            storage,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn theme(&self) -> ThemeMode {
        self.theme
    }

    /// Append a new task. The stored text is the input exactly as typed;
    /// trimming applies only to validation.
    pub fn add_task(&mut self, input: &str) -> Result<Notification, IntentError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(IntentError::EmptyInput);
        }

        let needle = trimmed.to_lowercase();
        if self
            .tasks
            .iter()
            .any(|task| task.text.trim().to_lowercase() == needle)
        {
            return Err(IntentError::DuplicateTask);
        }

        self.tasks.push(Task::new(input));
        Ok(self
            .persist_tasks()
            .unwrap_or_else(|| Notification::success("Task added!")))
    }

    /// Remove the task at `index`, shifting later tasks down by one.
    /// The "removed" notification is error-styled by convention, not
    /// because the operation failed.
    pub fn remove_task(&mut self, index: usize) -> Result<Notification, IntentError> {
        if index >= self.tasks.len() {
            return Err(IntentError::IndexOutOfRange);
        }

        self.tasks.remove(index);
        Ok(self
            .persist_tasks()
            .unwrap_or_else(|| Notification::error("Task removed!")))
    }

    /// Flip the completion flag of the task at `index`.
    pub fn toggle_complete(&mut self, index: usize) -> Result<Notification, IntentError> {
        let Some(task) = self.tasks.get_mut(index) else {
            return Err(IntentError::IndexOutOfRange);
        };

        task.done = !task.done;
        let message = if task.done {
            "Task completed!"
        } else {
            "Task marked incomplete!"
        };
        Ok(self
            .persist_tasks()
            .unwrap_or_else(|| Notification::info(message)))
    }

    /// Start-edit guard. Completed tasks refuse text edits; the returned
    /// text seeds the caller's edit buffer.
    pub fn editable_text(&self, index: usize) -> Result<&str, IntentError> {
        let task = self
            .tasks
            .get(index)
            .ok_or(IntentError::IndexOutOfRange)?;
        if task.done {
            return Err(IntentError::CannotEditCompleted);
        }
        Ok(&task.text)
    }

    /// Replace the text of the task at `index`. Deliberately applies no
    /// trim/empty/duplicate validation, matching the asymmetry with add.
    pub fn save_edit(&mut self, index: usize, new_text: &str) -> Result<Notification, IntentError> {
        let Some(task) = self.tasks.get_mut(index) else {
            return Err(IntentError::IndexOutOfRange);
        };

        task.text = new_text.to_string();
        Ok(self
            .persist_tasks()
            .unwrap_or_else(|| Notification::success("Task updated!")))
    }

    /// Flip between dark and light, persisting the new value independently
    /// of the task list.
    pub fn toggle_theme(&mut self) -> ThemeMode {
        self.theme = self.theme.toggled();
        if let Err(error) = self.storage.set(THEME_KEY, self.theme.as_str()) {
            warn!("failed to persist theme: {error:#}");
        }
        self.theme
    }

    /// Write the full task list. On fault, keep the in-memory state and
    /// report the fault as the operation's notification.
    fn persist_tasks(&self) -> Option<Notification> {
        let payload = match serde_json::to_string(&self.tasks) {
            Ok(payload) => payload,
            Err(error) => {
                warn!("failed to serialize task list: {error}");
                return Some(Notification::error("Failed to save tasks to disk!"));
            }
        };

        if let Err(error) = self.storage.set(TASKS_KEY, &payload) {
            warn!("failed to persist task list: {error:#}");
            return Some(Notification::error("Failed to save tasks to disk!"));
        }

        None
    }
}
