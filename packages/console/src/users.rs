//! User list and per-client configuration.
//!
//! Deleting is a two-step affair: [`UserList::request_delete`] marks one
//! client as pending, and only [`UserList::confirm_delete`] hands that id to
//! the caller. Nothing is sent to the server before confirmation.

use api::{AdminApi, ApiError, ClientConfig, User};

use crate::listing::{describe_error, Listing};

pub const USERS_LOAD_FAILED: &str = "Failed to load users";
pub const DELETE_FAILED: &str = "Failed to delete user";
pub const CONFIG_LOAD_FAILED: &str = "Failed to load configuration";

pub async fn load_users(api: &impl AdminApi) -> Listing<User> {
    Listing::from_result(api.list_users().await, USERS_LOAD_FAILED)
}

/// Client accounts as shown in the user table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserList {
    pub users: Vec<User>,
    pub error: Option<String>,
    pending_delete: Option<String>,
}

impl From<Listing<User>> for UserList {
    fn from(listing: Listing<User>) -> Self {
        Self {
            users: listing.items,
            error: listing.error,
            pending_delete: None,
        }
    }
}

impl UserList {
    pub fn request_delete(&mut self, client_id: &str) {
        self.pending_delete = Some(client_id.to_string());
    }

    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.as_deref()
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// How the confirmation dialog names the pending target: the client
    /// name with its id when one is set, otherwise just the id.
    pub fn pending_delete_label(&self) -> Option<String> {
        let client_id = self.pending_delete()?;
        let name = self
            .users
            .iter()
            .find(|u| u.client_id == client_id)
            .map_or(client_id, User::display_name);
        Some(if name == client_id {
            format!("client {client_id}")
        } else {
            format!("{name} ({client_id})")
        })
    }

    /// Take the confirmed target, clearing the pending mark.
    pub fn confirm_delete(&mut self) -> Option<String> {
        self.pending_delete.take()
    }

    /// Apply the server's answer for deleting `client_id`.
    pub fn apply_delete(&mut self, client_id: &str, result: Result<(), ApiError>) {
        match result {
            Ok(()) => {
                self.users.retain(|u| u.client_id != client_id);
                self.error = None;
            }
            Err(err) => {
                let message = match err.server_message() {
                    Some(message) => format!("Error: {message}"),
                    None => DELETE_FAILED.to_string(),
                };
                self.error = Some(message);
            }
        }
    }
}

/// Delete one client account on the server.
pub async fn send_delete(api: &impl AdminApi, client_id: &str) -> Result<(), ApiError> {
    let result = match api.delete_user(client_id).await {
        Ok(resp) => resp.into_result(),
        Err(err) => Err(err),
    };
    match &result {
        Ok(()) => tracing::info!(%client_id, "client deleted"),
        Err(err) => tracing::warn!(%client_id, "delete failed: {err}"),
    }
    result
}

/// Send the confirmed delete, if any, and fold the answer into `list`.
///
/// Returns the client id that was deleted.
pub async fn delete_confirmed(api: &impl AdminApi, list: &mut UserList) -> Option<String> {
    let client_id = list.confirm_delete()?;
    let result = send_delete(api, &client_id).await;
    let deleted = result.is_ok();
    list.apply_delete(&client_id, result);
    deleted.then_some(client_id)
}

pub async fn load_client_config(api: &impl AdminApi, client_id: &str) -> Result<ClientConfig, String> {
    let result = match api.user_config(client_id).await {
        Ok(resp) => resp.into_result(),
        Err(err) => Err(err),
    };
    result.map_err(|err| {
        tracing::warn!(%client_id, "config fetch failed: {err}");
        describe_error(&err, CONFIG_LOAD_FAILED)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::MemoryBackend;

    fn user(id: &str) -> User {
        User {
            client_id: id.to_string(),
            db_name: format!("db_{id}"),
            db_user: "sa".to_string(),
            created_at: None,
            client_name: None,
            address: None,
            phone_number: None,
            username: None,
            password: None,
        }
    }

    fn backend() -> MemoryBackend {
        MemoryBackend::new()
            .with_user(user("C1"), "t1")
            .with_user(user("C2"), "t2")
            .with_user(user("C3"), "t3")
    }

    #[test]
    fn test_pending_delete_label() {
        let mut named = user("C1");
        named.client_name = Some("Corner Shop".to_string());
        let mut list = UserList {
            users: vec![named, user("C2")],
            ..Default::default()
        };
        assert_eq!(list.pending_delete_label(), None);

        list.request_delete("C1");
        assert_eq!(list.pending_delete_label().as_deref(), Some("Corner Shop (C1)"));
        list.request_delete("C2");
        assert_eq!(list.pending_delete_label().as_deref(), Some("client C2"));
    }

    #[tokio::test]
    async fn test_delete_removes_exactly_one_client() {
        let backend = backend();
        let mut list = UserList::from(load_users(&backend).await);
        assert_eq!(list.users.len(), 3);

        list.request_delete("C2");
        let deleted = delete_confirmed(&backend, &mut list).await;
        assert_eq!(deleted.as_deref(), Some("C2"));

        let ids: Vec<_> = list.users.iter().map(|u| u.client_id.as_str()).collect();
        assert_eq!(ids, vec!["C1", "C3"]);
        assert!(list.error.is_none());

        let deletes: Vec<_> = backend
            .requests()
            .into_iter()
            .filter(|r| r.starts_with("DELETE"))
            .collect();
        assert_eq!(deletes, vec!["DELETE /api/admin/delete-users/C2"]);
    }

    #[tokio::test]
    async fn test_no_request_without_confirmation() {
        let backend = backend();
        let mut list = UserList::from(load_users(&backend).await);

        list.request_delete("C1");
        list.cancel_delete();
        assert_eq!(delete_confirmed(&backend, &mut list).await, None);
        assert_eq!(list.users.len(), 3);
        assert!(backend.requests().iter().all(|r| !r.starts_with("DELETE")));
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_rows() {
        let backend = backend();
        let mut list = UserList::from(load_users(&backend).await);

        list.request_delete("C9");
        list.users.push(user("C9"));
        assert_eq!(delete_confirmed(&backend, &mut list).await, None);
        assert_eq!(list.users.len(), 4);
        assert_eq!(list.error.as_deref(), Some("Error: Client not found"));

        backend.set_offline(true);
        list.request_delete("C1");
        delete_confirmed(&backend, &mut list).await;
        assert_eq!(list.users.len(), 4);
        assert_eq!(list.error.as_deref(), Some(DELETE_FAILED));
    }

    #[tokio::test]
    async fn test_failed_load_shows_error_and_no_rows() {
        let backend = backend();
        backend.fail_path("/api/admin/list-users");
        let list = UserList::from(load_users(&backend).await);
        assert!(list.users.is_empty());
        assert_eq!(list.error.as_deref(), Some(USERS_LOAD_FAILED));
    }

    #[tokio::test]
    async fn test_load_client_config() {
        let backend = backend();
        let config = load_client_config(&backend, "C1").await.unwrap();
        assert_eq!(config.access_token, "t1");
        assert_eq!(config.db_name, "db_C1");

        assert_eq!(
            load_client_config(&backend, "nope").await.unwrap_err(),
            "Client not found"
        );

        backend.set_offline(true);
        assert_eq!(
            load_client_config(&backend, "C1").await.unwrap_err(),
            "Network error"
        );
    }
}
