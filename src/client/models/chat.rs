//! Chat endpoint payloads

use serde::{Deserialize, Serialize};

/// Outbound chat message.
///
/// `conversation_id` is omitted on the first message of a new thread; the
/// backend assigns one and returns it in [`ChatResponse`].
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
}

/// Assistant reply
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Assistant message text
    pub response: String,

    /// Thread handle to send with follow-up messages
    pub conversation_id: String,

    /// Server-side timestamp of the reply
    #[serde(default)]
    pub timestamp: Option<String>,
}
