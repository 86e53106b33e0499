//! Task API trait

use async_trait::async_trait;

use crate::client::models::{Task, TaskCreate, TaskUpdate};
use crate::error::Result;

/// Task operations scoped to one subject.
///
/// All methods are pass-through calls to `/api/{subject_id}/tasks...`; the
/// refresh-and-retry contract is enforced underneath by the executor, not
/// per method.
#[async_trait]
pub trait TaskApi: Send + Sync {
    /// List all tasks owned by the subject
    async fn list_tasks(&self, subject_id: &str) -> Result<Vec<Task>>;

    /// Create a task
    async fn create_task(&self, subject_id: &str, task: &TaskCreate) -> Result<Task>;

    /// Fetch one task by ID
    async fn get_task(&self, subject_id: &str, task_id: &str) -> Result<Task>;

    /// Apply a partial update to a task
    async fn update_task(&self, subject_id: &str, task_id: &str, update: &TaskUpdate)
    -> Result<Task>;

    /// Delete a task
    async fn delete_task(&self, subject_id: &str, task_id: &str) -> Result<()>;

    /// Set a task's completion flag
    async fn set_task_completion(
        &self,
        subject_id: &str,
        task_id: &str,
        is_completed: bool,
    ) -> Result<Task>;
}
