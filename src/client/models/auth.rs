//! Auth endpoint request/response payloads

use serde::{Deserialize, Serialize};

use super::User;

/// Signup request body
#[derive(Debug, Clone, Serialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Login request body
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful login payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Short-lived bearer token
    pub access_token: String,

    /// Long-lived token used to obtain new access tokens
    pub refresh_token: String,

    /// Token scheme, always "bearer"
    #[serde(default)]
    pub token_type: Option<String>,

    /// Access token lifetime in seconds
    #[serde(default)]
    pub expires_in: Option<i64>,

    /// The authenticated account
    pub user: User,
}

/// Refresh request body
#[derive(Debug, Clone, Serialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Refresh response payload.
///
/// The backend always returns a new access token; a rotated refresh token is
/// optional — when present it replaces the stored one, when absent the stored
/// one stays valid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub access_token: String,

    #[serde(default)]
    pub refresh_token: Option<String>,
}
