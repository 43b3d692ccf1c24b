//! # HTTP backend
//!
//! [`HttpClient`] implements [`AdminApi`] and [`AuthApi`] over reqwest. The
//! operator session is a server-issued cookie, so every request must carry
//! credentials:
//!
//! - **Web** (WASM): reqwest drives `fetch`, and each request is built with
//!   `credentials: "include"` so the browser attaches the session cookie even
//!   when the API lives on another origin.
//! - **Native**: the client keeps its own cookie jar for the lifetime of the
//!   process.
//!
//! Response bodies are decoded regardless of HTTP status. The admin API reports
//! failures as `{"success": false, "error": ...}` with 4xx/5xx codes, and that
//! body is what the operator needs to see.

use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::backend::{AdminApi, AuthApi};
use crate::config::ConsoleConfig;
use crate::error::ApiError;
use crate::models::{AuthResponse, LoginCredentials, SyncLog, User, UserForm};
use crate::responses::{
    ConfigResponse, CreateUserResponse, InitializeResponse, LogsResponse, StatusResponse,
    UpdateUserResponse, UsersResponse,
};

/// reqwest-backed client for the admin API.
#[derive(Clone, Debug)]
pub struct HttpClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpClient {
    /// Build a client for the base URL in `config`.
    pub fn new(config: &ConsoleConfig) -> Result<Self, ApiError> {
        let base_url = config.base_url()?;
        Ok(Self {
            http: build_http()?,
            base_url,
        })
    }

    /// Normalised base URL, without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, self.endpoint(path));
        #[cfg(target_arch = "wasm32")]
        let builder = builder.fetch_credentials_include();
        builder
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let request = request.build()?;
        let method = request.method().clone();
        let url = request.url().path().to_string();
        tracing::debug!(%method, %url, "admin api request");

        let response = self.http.execute(request).await.map_err(|err| {
            tracing::warn!(%method, %url, "admin api unreachable: {err}");
            ApiError::from(err)
        })?;
        let status = response.status();
        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|err| {
            tracing::warn!(%method, %url, %status, "admin api returned a non-JSON body: {err}");
            ApiError::Decode(err.to_string())
        })
    }
}

// Clients pointed at the same API are interchangeable.
impl PartialEq for HttpClient {
    fn eq(&self, other: &Self) -> bool {
        self.base_url == other.base_url
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn build_http() -> Result<reqwest::Client, ApiError> {
    reqwest::Client::builder()
        .cookie_store(true)
        .build()
        .map_err(|e| ApiError::Config(e.to_string()))
}

#[cfg(target_arch = "wasm32")]
fn build_http() -> Result<reqwest::Client, ApiError> {
    Ok(reqwest::Client::new())
}

fn client_path(prefix: &str, client_id: &str, suffix: &str) -> String {
    format!("{prefix}{}{suffix}", urlencoding::encode(client_id))
}

impl AdminApi for HttpClient {
    async fn initialize(&self) -> Result<bool, ApiError> {
        let resp: InitializeResponse = self
            .send(self.request(Method::GET, "/api/admin/initialize"))
            .await?;
        Ok(resp.success)
    }

    async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        let resp: UsersResponse = self
            .send(self.request(Method::GET, "/api/admin/list-users"))
            .await?;
        Ok(resp.into_users())
    }

    async fn create_user(&self, form: &UserForm) -> Result<CreateUserResponse, ApiError> {
        self.send(self.request(Method::POST, "/api/admin/add-users").json(form))
            .await
    }

    async fn update_user(
        &self,
        client_id: &str,
        form: &UserForm,
    ) -> Result<UpdateUserResponse, ApiError> {
        let path = client_path("/api/admin/update-users/", client_id, "");
        self.send(self.request(Method::PUT, &path).json(form)).await
    }

    async fn delete_user(&self, client_id: &str) -> Result<StatusResponse, ApiError> {
        let path = client_path("/api/admin/delete-users/", client_id, "");
        self.send(self.request(Method::DELETE, &path)).await
    }

    async fn user_config(&self, client_id: &str) -> Result<ConfigResponse, ApiError> {
        let path = client_path("/api/admin/users/", client_id, "/config");
        self.send(self.request(Method::GET, &path)).await
    }

    async fn sync_logs(&self) -> Result<Vec<SyncLog>, ApiError> {
        let resp: LogsResponse = self
            .send(self.request(Method::GET, "/api/admin/logs"))
            .await?;
        Ok(resp.into_logs())
    }
}

impl AuthApi for HttpClient {
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthResponse, ApiError> {
        self.send(self.request(Method::POST, "/api/admin/login").json(credentials))
            .await
    }

    async fn logout(&self) -> Result<AuthResponse, ApiError> {
        self.send(self.request(Method::POST, "/api/admin/logout"))
            .await
    }

    async fn check_session(&self) -> Result<AuthResponse, ApiError> {
        self.send(self.request(Method::GET, "/api/admin/me")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_ids_are_path_encoded() {
        assert_eq!(
            client_path("/api/admin/users/", "ACME/01", "/config"),
            "/api/admin/users/ACME%2F01/config"
        );
        assert_eq!(
            client_path("/api/admin/delete-users/", "C1", ""),
            "/api/admin/delete-users/C1"
        );
    }

    #[test]
    fn test_endpoint_joins_base_url() {
        let config = ConsoleConfig::default().with_base_url("https://sync.example.com/");
        let client = HttpClient::new(&config).unwrap();
        assert_eq!(client.base_url(), "https://sync.example.com");
        assert_eq!(
            client.endpoint("/api/admin/logs"),
            "https://sync.example.com/api/admin/logs"
        );
    }

    #[test]
    fn test_rejects_invalid_base_url() {
        let config = ConsoleConfig::default().with_base_url("not a url");
        assert!(matches!(HttpClient::new(&config), Err(ApiError::Config(_))));
    }
}
