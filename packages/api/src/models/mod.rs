//! Data models exchanged with the admin API.

mod auth;
mod log;
mod user;

pub use auth::{AuthResponse, LoginCredentials};
pub use log::SyncLog;
pub use user::{ClientConfig, User, UserForm};
