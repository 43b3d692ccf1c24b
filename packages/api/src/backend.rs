//! # Backend traits
//!
//! The console never calls reqwest directly. Views and the session manager are
//! generic over these two traits so the same logic runs against the live server
//! ([`crate::HttpClient`]) or an in-memory fake ([`crate::MemoryBackend`]).
//!
//! Methods return futures without a `Send` bound: the console runs on a single
//! cooperative executor (the browser event loop on web).

use std::future::Future;

use crate::error::ApiError;
use crate::models::{AuthResponse, LoginCredentials, SyncLog, User, UserForm};
use crate::responses::{ConfigResponse, CreateUserResponse, StatusResponse, UpdateUserResponse};

/// Client-account management and log retrieval.
pub trait AdminApi {
    /// Ask the server to prepare its database. `Ok(false)` means it is not usable.
    fn initialize(&self) -> impl Future<Output = Result<bool, ApiError>>;

    fn list_users(&self) -> impl Future<Output = Result<Vec<User>, ApiError>>;

    fn create_user(
        &self,
        form: &UserForm,
    ) -> impl Future<Output = Result<CreateUserResponse, ApiError>>;

    fn update_user(
        &self,
        client_id: &str,
        form: &UserForm,
    ) -> impl Future<Output = Result<UpdateUserResponse, ApiError>>;

    fn delete_user(
        &self,
        client_id: &str,
    ) -> impl Future<Output = Result<StatusResponse, ApiError>>;

    fn user_config(
        &self,
        client_id: &str,
    ) -> impl Future<Output = Result<ConfigResponse, ApiError>>;

    fn sync_logs(&self) -> impl Future<Output = Result<Vec<SyncLog>, ApiError>>;
}

/// Operator session endpoints. The session itself lives in a server cookie.
pub trait AuthApi {
    fn login(
        &self,
        credentials: &LoginCredentials,
    ) -> impl Future<Output = Result<AuthResponse, ApiError>>;

    fn logout(&self) -> impl Future<Output = Result<AuthResponse, ApiError>>;

    /// `GET /api/admin/me`: is the cookie still valid?
    fn check_session(&self) -> impl Future<Output = Result<AuthResponse, ApiError>>;
}
