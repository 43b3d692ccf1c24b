//! # Client accounts and their sync configuration
//!
//! Three shapes describe a client account on the wire:
//!
//! ## [`User`]
//!
//! A row from the server's client table, as returned by `list-users`. Field names
//! are snake_case because the server sends raw column names. Only `client_id`,
//! `db_name` and `db_user` are guaranteed; the profile fields are optional and may
//! arrive as `null`.
//!
//! ## [`UserForm`]
//!
//! The camelCase request body for `add-users` and `update-users/{id}`. An empty
//! `db_password` on update means "keep the current password".
//!
//! ## [`ClientConfig`]
//!
//! The record a remote sync client needs to authenticate: client id, database
//! name, access token and the API URL to post to. Field order here is the order
//! used when the record is written out as a downloadable JSON file.

use serde::{Deserialize, Serialize};

/// A client account as stored by the sync server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub client_id: String,
    pub db_name: String,
    pub db_user: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub client_name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl User {
    /// Client name if set, otherwise the client id.
    pub fn display_name(&self) -> &str {
        self.client_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.client_id)
    }
}

/// Request body for creating or updating a client account.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserForm {
    pub db_name: String,
    pub db_user: String,
    pub db_password: String,
    #[serde(default)]
    pub client_name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl UserForm {
    /// Prefill a form from an existing account. Passwords are never prefilled.
    pub fn from_user(user: &User) -> Self {
        Self {
            db_name: user.db_name.clone(),
            db_user: user.db_user.clone(),
            db_password: String::new(),
            client_name: user.client_name.clone().unwrap_or_default(),
            address: user.address.clone().unwrap_or_default(),
            phone_number: user.phone_number.clone().unwrap_or_default(),
            username: user.username.clone().unwrap_or_default(),
            password: String::new(),
        }
    }
}

impl std::fmt::Debug for UserForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserForm")
            .field("db_name", &self.db_name)
            .field("db_user", &self.db_user)
            .field("client_name", &self.client_name)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// Per-client configuration handed to the remote sync client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    pub client_id: String,
    pub db_name: String,
    pub access_token: String,
    pub api_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_tolerates_null_profile_fields() {
        let json = r#"{
            "client_id": "C1",
            "db_name": "db1",
            "db_user": "sa",
            "created_at": "2024-03-01T10:00:00.000Z",
            "client_name": null,
            "address": null
        }"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.client_id, "C1");
        assert!(user.client_name.is_none());
        assert!(user.phone_number.is_none());
        assert_eq!(user.display_name(), "C1");
    }

    #[test]
    fn test_form_serializes_camel_case() {
        let form = UserForm {
            db_name: "db1".into(),
            db_user: "sa".into(),
            db_password: "secret".into(),
            phone_number: "555".into(),
            ..Default::default()
        };
        let value = serde_json::to_value(&form).unwrap();
        assert_eq!(value["dbName"], "db1");
        assert_eq!(value["dbPassword"], "secret");
        assert_eq!(value["phoneNumber"], "555");
        assert!(value.get("db_name").is_none());
    }

    #[test]
    fn test_form_debug_hides_passwords() {
        let form = UserForm {
            db_password: "hunter2".into(),
            password: "letmein".into(),
            ..Default::default()
        };
        let debug = format!("{form:?}");
        assert!(!debug.contains("hunter2"));
        assert!(!debug.contains("letmein"));
    }

    #[test]
    fn test_from_user_leaves_passwords_empty() {
        let user = User {
            client_id: "C9".into(),
            db_name: "shop".into(),
            db_user: "owner".into(),
            created_at: None,
            client_name: Some("Shop".into()),
            address: None,
            phone_number: None,
            username: Some("shop-admin".into()),
            password: Some("stored".into()),
        };
        let form = UserForm::from_user(&user);
        assert_eq!(form.db_name, "shop");
        assert_eq!(form.client_name, "Shop");
        assert_eq!(form.username, "shop-admin");
        assert!(form.db_password.is_empty());
        assert!(form.password.is_empty());
    }
}
