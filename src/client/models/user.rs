//! User account resource

use serde::{Deserialize, Serialize};

/// User account as returned by the signup and profile endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// User ID (the subject of issued tokens)
    pub id: String,

    /// Account email address
    pub email: String,

    /// Account role (optional, may not be in all responses)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Whether the account is active
    #[serde(default)]
    pub is_active: bool,

    /// Whether the email address has been verified
    #[serde(default)]
    pub is_verified: bool,

    /// Creation timestamp (RFC 3339 string from the API)
    #[serde(default)]
    pub created_at: Option<String>,

    /// Last-update timestamp (RFC 3339 string from the API)
    #[serde(default)]
    pub updated_at: Option<String>,
}
