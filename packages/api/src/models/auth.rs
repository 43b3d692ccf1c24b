use serde::{Deserialize, Serialize};

/// Operator credentials posted to `/api/admin/login`.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginCredentials {
    pub username: String,
    pub password: String,
}

impl LoginCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Reply from `login`, `logout` and `me`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_id: Option<i64>,
}

impl AuthResponse {
    pub fn granted(admin_id: i64) -> Self {
        Self {
            success: true,
            error: None,
            admin_id: Some(admin_id),
        }
    }

    pub fn denied(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            admin_id: None,
        }
    }
}
