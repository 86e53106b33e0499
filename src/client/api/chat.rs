//! Chat API trait

use async_trait::async_trait;

use crate::client::models::ChatResponse;
use crate::error::Result;

/// Assistant chat operations
#[async_trait]
pub trait ChatApi: Send + Sync {
    /// Send one message; `conversation_id` is `None` for the first message
    /// of a new thread
    async fn send_message(
        &self,
        subject_id: &str,
        message: &str,
        conversation_id: Option<&str>,
    ) -> Result<ChatResponse>;
}
