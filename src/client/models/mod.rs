//! Tasklight API data models
//!
//! Domain types exchanged with the backend, organized by resource type.

mod auth;
mod chat;
mod task;
mod user;

pub use auth::{LoginRequest, LoginResponse, RefreshRequest, RefreshResponse, SignupRequest};
pub use chat::{ChatRequest, ChatResponse};
pub use task::{CompletionUpdate, Task, TaskCreate, TaskUpdate};
pub use user::User;
