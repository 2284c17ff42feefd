use serde::{Deserialize, Serialize};

use super::enums::{TaskPriority, TaskStatus};

/// A task owned and mutated by the parent shell. This layer only ever reads
/// an immutable snapshot per render; camelCase field names match the shell's
/// wire shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    pub priority: TaskPriority,
    /// YYYY-MM-DD
    pub due_date: String,
    /// HH:MM
    pub due_time: String,
    pub status: TaskStatus,
    pub created_at: String,
    #[serde(default)]
    pub completed_at: Option<String>,
}
