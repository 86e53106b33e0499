//! Authenticated profile API trait

use async_trait::async_trait;

use crate::client::models::User;
use crate::error::Result;

/// Profile operations that ride through the authenticated executor
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Fetch the authenticated account's profile
    async fn me(&self) -> Result<User>;
}
