//! Task resource payloads

use serde::{Deserialize, Serialize};

/// Task as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Task ID
    pub id: String,

    /// Task title
    pub title: String,

    /// Free-form description (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Completion flag
    #[serde(default)]
    pub is_completed: bool,

    /// Owning subject ID
    pub owner_id: String,

    /// Creation timestamp (RFC 3339 string from the API)
    #[serde(default)]
    pub created_at: Option<String>,

    /// Last-update timestamp (RFC 3339 string from the API)
    #[serde(default)]
    pub updated_at: Option<String>,

    /// Due date (RFC 3339, optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}

/// Task creation body
#[derive(Debug, Clone, Default, Serialize)]
pub struct TaskCreate {
    pub title: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}

/// Partial task update body; absent fields are left unchanged server-side
#[derive(Debug, Clone, Default, Serialize)]
pub struct TaskUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_completed: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}

/// Body for the toggle-complete endpoint
#[derive(Debug, Clone, Serialize)]
pub struct CompletionUpdate {
    pub is_completed: bool,
}
