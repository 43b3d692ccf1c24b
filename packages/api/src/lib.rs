//! # API crate: client for the sync platform's admin REST API
//!
//! Every screen of the admin console talks to the remote sync server through the
//! types defined here. The crate knows nothing about rendering; it only shapes
//! requests, decodes responses and reports failures.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`backend`] | The [`AdminApi`] and [`AuthApi`] traits every backend implements |
//! | [`client`] | [`HttpClient`], the reqwest-backed implementation used by the web app |
//! | [`memory`] | [`MemoryBackend`], an in-memory implementation for tests and offline previews |
//! | [`config`] | [`ConsoleConfig`]: API base URL and UI tunables (TOML + environment) |
//! | [`error`] | [`ApiError`], the single error type returned by every call |
//! | [`models`] | Wire records: users, sync logs, client configs, credentials |
//! | [`responses`] | JSON envelopes returned by each endpoint |
//!
//! ## Endpoints
//!
//! - **Setup**: `GET /api/admin/initialize`
//! - **Users**: `list-users`, `add-users`, `update-users/{id}`, `delete-users/{id}`, `users/{id}/config`
//! - **Logs**: `GET /api/admin/logs`
//! - **Session**: `login`, `logout`, `me` (cookie credentials)

pub mod backend;
pub mod client;
pub mod config;
pub mod error;
pub mod memory;
pub mod models;
pub mod responses;

pub use backend::{AdminApi, AuthApi};
pub use client::HttpClient;
pub use config::ConsoleConfig;
pub use error::ApiError;
pub use memory::MemoryBackend;
pub use models::{AuthResponse, ClientConfig, LoginCredentials, SyncLog, User, UserForm};
pub use responses::{ConfigResponse, CreateUserResponse, StatusResponse, UpdateUserResponse};
