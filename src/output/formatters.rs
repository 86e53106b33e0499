//! Reusable formatting utilities for CLI output
//!
//! Display rows for table output plus small helpers for timestamps and
//! completion glyphs, shared across the task and account commands.

use tabled::Tabled;

use crate::client::models::{Task, User};

/// Shorten an RFC 3339 timestamp to `YYYY-MM-DD HH:MM` for table cells.
///
/// Returns "-" for absent or unparseable values: display must never fail on
/// whatever the backend sent.
pub fn format_timestamp(value: Option<&str>) -> String {
    let Some(raw) = value else {
        return "-".to_string();
    };

    match chrono::DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
        Err(_) => raw.to_string(),
    }
}

/// Completion glyph for table cells
pub fn completion_mark(is_completed: bool) -> &'static str {
    if is_completed { "✓" } else { " " }
}

/// One task as a table row
#[derive(Debug, Tabled)]
pub struct TaskRow {
    #[tabled(rename = "ID")]
    pub id: String,

    #[tabled(rename = "DONE")]
    pub done: &'static str,

    #[tabled(rename = "TITLE")]
    pub title: String,

    #[tabled(rename = "DUE")]
    pub due: String,

    #[tabled(rename = "CREATED")]
    pub created: String,
}

impl From<&Task> for TaskRow {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id.clone(),
            done: completion_mark(task.is_completed),
            title: task.title.clone(),
            due: format_timestamp(task.due_date.as_deref()),
            created: format_timestamp(task.created_at.as_deref()),
        }
    }
}

/// One user account as a table row
#[derive(Debug, Tabled)]
pub struct UserRow {
    #[tabled(rename = "ID")]
    pub id: String,

    #[tabled(rename = "EMAIL")]
    pub email: String,

    #[tabled(rename = "ROLE")]
    pub role: String,

    #[tabled(rename = "ACTIVE")]
    pub active: &'static str,
}

impl From<&User> for UserRow {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            email: user.email.clone(),
            role: user.role.clone().unwrap_or_else(|| "-".to_string()),
            active: if user.is_active { "yes" } else { "no" },
        }
    }
}
