use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::backend::{AdminApi, AuthApi};
use crate::error::ApiError;
use crate::models::{AuthResponse, ClientConfig, LoginCredentials, SyncLog, User, UserForm};
use crate::responses::{ConfigResponse, CreateUserResponse, StatusResponse, UpdateUserResponse};

/// In-memory admin API for testing and offline previews.
///
/// Behaves like the real server: assigns client ids and access tokens, keeps
/// a single operator session, and answers rejections as `success: false`.
/// Every call is appended to a request journal (`"DELETE /api/admin/delete-users/C1"`)
/// so tests can assert exactly what was sent. Individual endpoints, or the
/// whole server, can be made unreachable.
#[derive(Clone, Debug, Default)]
pub struct MemoryBackend {
    state: Arc<Mutex<MemoryState>>,
}

#[derive(Debug, Default)]
struct MemoryState {
    users: Vec<User>,
    logs: Vec<SyncLog>,
    tokens: HashMap<String, String>,
    admins: Vec<(String, String, i64)>,
    session: Option<i64>,
    database_ready: bool,
    offline: bool,
    failing: HashSet<String>,
    requests: Vec<String>,
    next_client: u32,
    next_token: u32,
    api_url: String,
}

impl MemoryBackend {
    pub fn new() -> Self {
        let backend = Self::default();
        {
            let mut state = backend.state();
            state.database_ready = true;
            state.api_url = "https://sync.example.test".to_string();
        }
        backend
    }

    /// Register an operator account.
    pub fn with_admin(self, username: &str, password: &str, admin_id: i64) -> Self {
        self.state()
            .admins
            .push((username.to_string(), password.to_string(), admin_id));
        self
    }

    /// Seed an existing client account with its access token.
    pub fn with_user(self, user: User, access_token: &str) -> Self {
        {
            let mut state = self.state();
            state
                .tokens
                .insert(user.client_id.clone(), access_token.to_string());
            state.users.push(user);
        }
        self
    }

    pub fn with_logs(self, logs: Vec<SyncLog>) -> Self {
        self.state().logs.extend(logs);
        self
    }

    /// Start with an operator session already established.
    pub fn signed_in_as(self, admin_id: i64) -> Self {
        self.state().session = Some(admin_id);
        self
    }

    pub fn set_database_ready(&self, ready: bool) {
        self.state().database_ready = ready;
    }

    /// Make every endpoint unreachable.
    pub fn set_offline(&self, offline: bool) {
        self.state().offline = offline;
    }

    /// Make one endpoint unreachable, e.g. `"/api/admin/logs"`.
    pub fn fail_path(&self, path: &str) {
        self.state().failing.insert(path.to_string());
    }

    /// Every request received so far, as `"METHOD /path"`.
    pub fn requests(&self) -> Vec<String> {
        self.state().requests.clone()
    }

    pub fn users(&self) -> Vec<User> {
        self.state().users.clone()
    }

    pub fn session(&self) -> Option<i64> {
        self.state().session
    }

    fn state(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Journal the request and fail it if the endpoint is unreachable.
    fn receive(&self, method: &str, path: &str) -> Result<MutexGuard<'_, MemoryState>, ApiError> {
        let mut state = self.state();
        state.requests.push(format!("{method} {path}"));
        if state.offline || state.failing.contains(path) {
            return Err(ApiError::Network(format!("{method} {path}: connection refused")));
        }
        Ok(state)
    }
}

impl MemoryState {
    fn issue_token(&mut self) -> String {
        self.next_token += 1;
        format!("token-{:04}", self.next_token)
    }

    fn find_user(&mut self, client_id: &str) -> Option<&mut User> {
        self.users.iter_mut().find(|u| u.client_id == client_id)
    }
}

fn optional(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

impl AdminApi for MemoryBackend {
    async fn initialize(&self) -> Result<bool, ApiError> {
        let state = self.receive("GET", "/api/admin/initialize")?;
        Ok(state.database_ready)
    }

    async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        let state = self.receive("GET", "/api/admin/list-users")?;
        Ok(state.users.clone())
    }

    async fn create_user(&self, form: &UserForm) -> Result<CreateUserResponse, ApiError> {
        let mut state = self.receive("POST", "/api/admin/add-users")?;
        if form.db_name.trim().is_empty() || form.db_user.trim().is_empty() {
            return Ok(CreateUserResponse {
                error: Some("Database name and user are required".to_string()),
                ..Default::default()
            });
        }
        if state.users.iter().any(|u| u.db_name == form.db_name) {
            return Ok(CreateUserResponse {
                error: Some(format!("Database {} is already registered", form.db_name)),
                ..Default::default()
            });
        }

        state.next_client += 1;
        let client_id = format!("CLIENT{:04}", state.next_client);
        let token = state.issue_token();
        let created_at = format!("2024-01-01T00:00:{:02}Z", state.next_client % 60);
        state.tokens.insert(client_id.clone(), token.clone());
        state.users.push(User {
            client_id: client_id.clone(),
            db_name: form.db_name.clone(),
            db_user: form.db_user.clone(),
            created_at: Some(created_at),
            client_name: optional(&form.client_name),
            address: optional(&form.address),
            phone_number: optional(&form.phone_number),
            username: optional(&form.username),
            password: optional(&form.password),
        });

        Ok(CreateUserResponse {
            success: true,
            client_id: Some(client_id),
            access_token: Some(token),
            error: None,
        })
    }

    async fn update_user(
        &self,
        client_id: &str,
        form: &UserForm,
    ) -> Result<UpdateUserResponse, ApiError> {
        let mut state = self.receive("PUT", &format!("/api/admin/update-users/{client_id}"))?;
        let Some(user) = state.find_user(client_id) else {
            return Ok(UpdateUserResponse {
                error: Some("Client not found".to_string()),
                ..Default::default()
            });
        };
        user.db_name = form.db_name.clone();
        user.db_user = form.db_user.clone();
        user.client_name = optional(&form.client_name);
        user.address = optional(&form.address);
        user.phone_number = optional(&form.phone_number);
        user.username = optional(&form.username);
        if !form.password.is_empty() {
            user.password = Some(form.password.clone());
        }

        let token = state.issue_token();
        state.tokens.insert(client_id.to_string(), token.clone());
        Ok(UpdateUserResponse {
            success: true,
            access_token: Some(token),
            error: None,
        })
    }

    async fn delete_user(&self, client_id: &str) -> Result<StatusResponse, ApiError> {
        let mut state = self.receive("DELETE", &format!("/api/admin/delete-users/{client_id}"))?;
        let before = state.users.len();
        state.users.retain(|u| u.client_id != client_id);
        if state.users.len() == before {
            return Ok(StatusResponse {
                success: false,
                error: Some("Client not found".to_string()),
            });
        }
        state.tokens.remove(client_id);
        Ok(StatusResponse {
            success: true,
            error: None,
        })
    }

    async fn user_config(&self, client_id: &str) -> Result<ConfigResponse, ApiError> {
        let mut state = self.receive("GET", &format!("/api/admin/users/{client_id}/config"))?;
        let api_url = state.api_url.clone();
        let token = state.tokens.get(client_id).cloned();
        let Some(user) = state.find_user(client_id) else {
            return Ok(ConfigResponse {
                error: Some("Client not found".to_string()),
                ..Default::default()
            });
        };
        Ok(ConfigResponse {
            success: true,
            config: Some(ClientConfig {
                client_id: user.client_id.clone(),
                db_name: user.db_name.clone(),
                access_token: token.unwrap_or_default(),
                api_url,
            }),
            error: None,
        })
    }

    async fn sync_logs(&self) -> Result<Vec<SyncLog>, ApiError> {
        let state = self.receive("GET", "/api/admin/logs")?;
        Ok(state.logs.clone())
    }
}

impl AuthApi for MemoryBackend {
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthResponse, ApiError> {
        let mut state = self.receive("POST", "/api/admin/login")?;
        let admin = state
            .admins
            .iter()
            .find(|(user, pass, _)| *user == credentials.username && *pass == credentials.password)
            .map(|(_, _, id)| *id);
        match admin {
            Some(id) => {
                state.session = Some(id);
                Ok(AuthResponse::granted(id))
            }
            None => Ok(AuthResponse::denied("Invalid credentials")),
        }
    }

    async fn logout(&self) -> Result<AuthResponse, ApiError> {
        let mut state = self.receive("POST", "/api/admin/logout")?;
        state.session = None;
        Ok(AuthResponse {
            success: true,
            ..Default::default()
        })
    }

    async fn check_session(&self) -> Result<AuthResponse, ApiError> {
        let state = self.receive("GET", "/api/admin/me")?;
        match state.session {
            Some(id) => Ok(AuthResponse::granted(id)),
            None => Ok(AuthResponse::denied("Not authenticated")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(db_name: &str) -> UserForm {
        UserForm {
            db_name: db_name.to_string(),
            db_user: "sa".to_string(),
            db_password: "pw".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_token() {
        let backend = MemoryBackend::new();
        let created = backend.create_user(&form("shop")).await.unwrap();
        assert!(created.success);
        let (client_id, token) = created.into_result().unwrap();
        assert_eq!(client_id, "CLIENT0001");
        assert_eq!(token, "token-0001");

        let config = backend.user_config(&client_id).await.unwrap().into_result().unwrap();
        assert_eq!(config.db_name, "shop");
        assert_eq!(config.access_token, token);
    }

    #[tokio::test]
    async fn test_duplicate_database_is_rejected() {
        let backend = MemoryBackend::new();
        backend.create_user(&form("shop")).await.unwrap();
        let second = backend.create_user(&form("shop")).await.unwrap();
        assert!(!second.success);
        assert!(second.error.unwrap().contains("shop"));
        assert_eq!(backend.users().len(), 1);
    }

    #[tokio::test]
    async fn test_update_rotates_token() {
        let backend = MemoryBackend::new();
        let (id, first) = backend
            .create_user(&form("shop"))
            .await
            .unwrap()
            .into_result()
            .unwrap();
        let rotated = backend
            .update_user(&id, &form("shop2"))
            .await
            .unwrap()
            .into_result()
            .unwrap();
        assert_ne!(rotated, Some(first));
        assert_eq!(backend.users()[0].db_name, "shop2");
    }

    #[tokio::test]
    async fn test_session_lifecycle() {
        let backend = MemoryBackend::new().with_admin("root", "pw", 7);
        assert!(!backend.check_session().await.unwrap().success);

        let denied = backend.login(&LoginCredentials::new("root", "nope")).await.unwrap();
        assert!(!denied.success);

        let granted = backend.login(&LoginCredentials::new("root", "pw")).await.unwrap();
        assert_eq!(granted.admin_id, Some(7));
        assert_eq!(backend.check_session().await.unwrap().admin_id, Some(7));

        backend.logout().await.unwrap();
        assert_eq!(backend.session(), None);
    }

    #[tokio::test]
    async fn test_failures_are_journaled() {
        let backend = MemoryBackend::new();
        backend.fail_path("/api/admin/logs");
        assert!(backend.sync_logs().await.unwrap_err().is_transport());
        assert!(backend.list_users().await.is_ok());

        backend.set_offline(true);
        assert!(backend.list_users().await.is_err());
        assert_eq!(
            backend.requests(),
            vec![
                "GET /api/admin/logs",
                "GET /api/admin/list-users",
                "GET /api/admin/list-users",
            ]
        );
    }
}
