//! Tasklight API client implementation
//!
//! [`TasklightClient`] performs every authenticated call through one
//! executor that enforces the refresh-and-retry contract: attach the current
//! access token, and on a 401 refresh the session and re-issue the call
//! exactly once. No endpoint method carries its own retry logic — the rule
//! lives here and nowhere else, so a misbehaving backend can never pull the
//! client into a refresh loop.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client as HttpClient, Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::api::{AuthApi, ChatApi, TaskApi};
use super::models::{
    ChatRequest, ChatResponse, CompletionUpdate, Task, TaskCreate, TaskUpdate, User,
};
use crate::error::{ApiError, Result};
use crate::session::SessionManager;

/// Marker for calls without a request body
const NO_BODY: Option<&()> = None;

/// Outcome of a single HTTP attempt.
///
/// The classification happens once, here; the executor decides on retry
/// centrally instead of every call site inspecting errors.
enum Attempt<T> {
    /// 2xx with a parsed payload
    Success(T),
    /// 401 - the access token was rejected; eligible for one refresh-retry
    RetryableAuth,
    /// Anything else - classified and final for this attempt
    Terminal(ApiError),
}

/// Tasklight API client
pub struct TasklightClient {
    http: HttpClient,
    base_url: String,
    session: Arc<SessionManager>,
}

impl TasklightClient {
    /// Create a client sharing the session manager's connection pool and
    /// base URL
    pub fn new(session: Arc<SessionManager>) -> Self {
        Self {
            http: session.http().clone(),
            base_url: session.base_url().to_string(),
            session,
        }
    }

    /// Subject ID from the stored access token's claims, if any
    fn subject(&self) -> Option<String> {
        self.session.claims().map(|c| c.subject_id)
    }

    /// Perform one logical authenticated call.
    ///
    /// Preconditions are checked before any network activity: a caller with
    /// no subject at all is an `InvalidRequest`, a missing access token is
    /// `Unauthenticated`. A 401 triggers the session manager's single-flight
    /// refresh; the call is then re-issued at most once with the token that
    /// refresh stored. A second 401 is terminal.
    async fn execute<T, B>(
        &self,
        subject_id: &str,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + Sync,
    {
        if subject_id.trim().is_empty() {
            return Err(ApiError::InvalidRequest("no authenticated subject".to_string()).into());
        }
        if path.trim().is_empty() {
            return Err(ApiError::InvalidRequest("request target is required".to_string()).into());
        }

        let token = self
            .session
            .access_token()
            .ok_or(ApiError::Unauthenticated)?;

        let url = format!("{}{}", self.base_url, path);

        match self.attempt(&method, &url, body, &token).await {
            Attempt::Success(value) => Ok(value),
            Attempt::Terminal(err) => Err(err.into()),
            Attempt::RetryableAuth => {
                log::debug!("401 from {}, refreshing session", path);

                let fresh = match self.session.refresh_after_unauthorized(&token).await {
                    Ok(fresh) => fresh,
                    Err(err) => {
                        // Session is already torn down by the failed refresh
                        log::debug!("refresh failed: {}", err);
                        return Err(ApiError::AuthenticationFailed.into());
                    }
                };

                match self.attempt(&method, &url, body, &fresh).await {
                    Attempt::Success(value) => Ok(value),
                    // The retried attempt was rejected too; there is no
                    // third attempt
                    Attempt::RetryableAuth => Err(ApiError::Unauthenticated.into()),
                    Attempt::Terminal(err) => Err(err.into()),
                }
            }
        }
    }

    /// Issue one HTTP attempt and classify the response
    async fn attempt<T, B>(
        &self,
        method: &Method,
        url: &str,
        body: Option<&B>,
        token: &str,
    ) -> Attempt<T>
    where
        T: DeserializeOwned,
        B: Serialize + Sync,
    {
        let mut request = self.http.request(method.clone(), url).bearer_auth(token);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => return Attempt::Terminal(err.into()),
        };

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Attempt::RetryableAuth;
        }

        let text = match response.text().await {
            Ok(text) => text,
            Err(err) => return Attempt::Terminal(err.into()),
        };

        if !status.is_success() {
            return Attempt::Terminal(ApiError::from_response(status, &text));
        }

        // Bodyless success responses (e.g. DELETE) parse as JSON null
        let payload = if text.trim().is_empty() { "null" } else { &text };
        match serde_json::from_str(payload) {
            Ok(value) => Attempt::Success(value),
            Err(err) => Attempt::Terminal(ApiError::InvalidResponse(format!(
                "failed to parse response: {}",
                err
            ))),
        }
    }
}

#[async_trait]
impl AuthApi for TasklightClient {
    async fn me(&self) -> Result<User> {
        let subject = self.subject().unwrap_or_default();
        self.execute(&subject, Method::GET, "/auth/me", NO_BODY)
            .await
    }
}

#[async_trait]
impl TaskApi for TasklightClient {
    async fn list_tasks(&self, subject_id: &str) -> Result<Vec<Task>> {
        let path = format!("/api/{}/tasks", subject_id);
        self.execute(subject_id, Method::GET, &path, NO_BODY).await
    }

    async fn create_task(&self, subject_id: &str, task: &TaskCreate) -> Result<Task> {
        let path = format!("/api/{}/tasks", subject_id);
        self.execute(subject_id, Method::POST, &path, Some(task))
            .await
    }

    async fn get_task(&self, subject_id: &str, task_id: &str) -> Result<Task> {
        let path = format!("/api/{}/tasks/{}", subject_id, task_id);
        self.execute(subject_id, Method::GET, &path, NO_BODY).await
    }

    async fn update_task(
        &self,
        subject_id: &str,
        task_id: &str,
        update: &TaskUpdate,
    ) -> Result<Task> {
        let path = format!("/api/{}/tasks/{}", subject_id, task_id);
        self.execute(subject_id, Method::PUT, &path, Some(update))
            .await
    }

    async fn delete_task(&self, subject_id: &str, task_id: &str) -> Result<()> {
        let path = format!("/api/{}/tasks/{}", subject_id, task_id);
        let _: serde_json::Value = self.execute(subject_id, Method::DELETE, &path, NO_BODY).await?;
        Ok(())
    }

    async fn set_task_completion(
        &self,
        subject_id: &str,
        task_id: &str,
        is_completed: bool,
    ) -> Result<Task> {
        let path = format!("/api/{}/tasks/{}/complete", subject_id, task_id);
        let body = CompletionUpdate { is_completed };
        self.execute(subject_id, Method::PATCH, &path, Some(&body))
            .await
    }
}

#[async_trait]
impl ChatApi for TasklightClient {
    async fn send_message(
        &self,
        subject_id: &str,
        message: &str,
        conversation_id: Option<&str>,
    ) -> Result<ChatResponse> {
        if message.trim().is_empty() {
            return Err(ApiError::InvalidRequest("message cannot be empty".to_string()).into());
        }

        let path = format!("/api/{}/chat", subject_id);
        let body = ChatRequest {
            message: message.to_string(),
            conversation_id: conversation_id.map(str::to_string),
        };
        self.execute(subject_id, Method::POST, &path, Some(&body))
            .await
    }
}
