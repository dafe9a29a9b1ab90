use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Represents the status of a task.
/// Corresponds to the `task_status` SQL enum.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, sqlx::Type)]
#[sqlx(type_name = "task_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task is yet to be started.
    Pending,
    /// Task is currently being worked on.
    Active,
    /// Task is completed.
    Complete,
}

/// Input structure for creating or replacing a task.
/// Contains validation rules for its fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct TaskInput {
    /// The title of the task.
    /// Must be between 1 and 200 characters.
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    /// Free-form description. At most 1000 characters.
    #[validate(length(max = 1000))]
    pub description: String,

    /// The current status of the task.
    pub status: TaskStatus,

    /// Optional due date for the task.
    pub due_date: Option<DateTime<Utc>>,
}

/// Represents a task entity as stored and returned by the task service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Task {
    /// Store-assigned identifier. Increases with insertion order.
    pub id: i64,
    /// Subject of the identity that created the task.
    pub user_id: String,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub due_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Builds a task from validated input, stamped with `now`.
    pub fn new(id: i64, user_id: &str, input: TaskInput, now: DateTime<Utc>) -> Self {
        Self {
            id,
            user_id: user_id.to_string(),
            title: input.title,
            description: input.description,
            status: input.status,
            due_date: input.due_date,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.user_id == user_id
    }

    /// Replaces the mutable fields, keeping identity and creation time.
    pub fn apply(&mut self, input: TaskInput, now: DateTime<Utc>) {
        self.title = input.title;
        self.description = input.description;
        self.status = input.status;
        self.due_date = input.due_date;
        self.updated_at = now;
    }
}

/// Which tasks a listing covers. Always scoped to one owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFilter {
    pub user_id: String,
    pub status: Option<TaskStatus>,
}

impl TaskFilter {
    pub fn matches(&self, task: &Task) -> bool {
        task.is_owned_by(&self.user_id) && self.status.map_or(true, |status| task.status == status)
    }
}
