//! Tasklight API client

pub mod api;
pub mod http;
pub mod models;

pub use api::{AuthApi, ChatApi, TaskApi};
pub use http::TasklightClient;
