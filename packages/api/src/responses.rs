//! # Response envelopes
//!
//! The admin API answers every call with a small JSON object. Mutations carry a
//! `success` flag plus an optional `error` string; listings wrap their array in a
//! named field. HTTP status codes are not part of the contract, so the envelope
//! is the only source of truth for whether a call succeeded.
//!
//! | Endpoint | Envelope |
//! |----------|----------|
//! | `initialize` | [`InitializeResponse`] |
//! | `list-users` | [`UsersResponse`] |
//! | `add-users` | [`CreateUserResponse`] |
//! | `update-users/{id}` | [`UpdateUserResponse`] |
//! | `delete-users/{id}`, `logout` | [`StatusResponse`] |
//! | `users/{id}/config` | [`ConfigResponse`] |
//! | `logs` | [`LogsResponse`] |
//!
//! Listing envelopes treat a missing or `null` array as empty.

use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::models::{ClientConfig, SyncLog, User};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InitializeResponse {
    #[serde(default)]
    pub success: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UsersResponse {
    #[serde(default)]
    pub users: Option<Vec<User>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogsResponse {
    #[serde(default)]
    pub logs: Option<Vec<SyncLog>>,
}

/// Reply to `add-users`. The access token is only ever returned here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Reply to `update-users/{id}`. The server may rotate the access token.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<ClientConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl UsersResponse {
    pub fn into_users(self) -> Vec<User> {
        self.users.unwrap_or_default()
    }
}

impl LogsResponse {
    pub fn into_logs(self) -> Vec<SyncLog> {
        self.logs.unwrap_or_default()
    }
}

impl CreateUserResponse {
    /// Client id and access token of the new account, or the server's rejection.
    pub fn into_result(self) -> Result<(String, String), ApiError> {
        if self.success {
            Ok((
                self.client_id.unwrap_or_default(),
                self.access_token.unwrap_or_default(),
            ))
        } else {
            Err(ApiError::Rejected(self.error))
        }
    }
}

impl UpdateUserResponse {
    /// The rotated access token, if any, or the server's rejection.
    pub fn into_result(self) -> Result<Option<String>, ApiError> {
        if self.success {
            Ok(self.access_token)
        } else {
            Err(ApiError::Rejected(self.error))
        }
    }
}

impl StatusResponse {
    pub fn into_result(self) -> Result<(), ApiError> {
        if self.success {
            Ok(())
        } else {
            Err(ApiError::Rejected(self.error))
        }
    }
}

impl ConfigResponse {
    /// The config record. A `success` reply without a record counts as a rejection.
    pub fn into_result(self) -> Result<ClientConfig, ApiError> {
        match (self.success, self.config) {
            (true, Some(config)) => Ok(config),
            _ => Err(ApiError::Rejected(self.error)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_arrays_decode_as_empty() {
        let users: UsersResponse = serde_json::from_str("{}").unwrap();
        assert!(users.into_users().is_empty());

        let logs: LogsResponse = serde_json::from_str(r#"{"logs": null}"#).unwrap();
        assert!(logs.into_logs().is_empty());
    }

    #[test]
    fn test_one_incomplete_log_row_keeps_the_rest() {
        let json = r#"{"logs": [
            {"id": 1, "client_id": "C1", "sync_date": "2024-03-01", "records_synced": 12, "status": "success"},
            {"id": 2, "client_id": "C2", "sync_date": "2024-03-02", "records_synced": null, "status": null}
        ]}"#;
        let logs = serde_json::from_str::<LogsResponse>(json).unwrap().into_logs();
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].records_synced, 12);
        assert_eq!(logs[1].records_synced, 0);
        assert!(logs[1].status.is_empty());
    }

    #[test]
    fn test_create_response_camel_case() {
        let json = r#"{"success": true, "clientId": "C7", "accessToken": "tok"}"#;
        let resp: CreateUserResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.into_result().unwrap(), ("C7".to_string(), "tok".to_string()));
    }

    #[test]
    fn test_rejection_keeps_server_message() {
        let json = r#"{"success": false, "error": "Database already exists"}"#;
        let resp: StatusResponse = serde_json::from_str(json).unwrap();
        match resp.into_result() {
            Err(ApiError::Rejected(Some(msg))) => assert_eq!(msg, "Database already exists"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_config_success_without_record_is_rejected() {
        let resp = ConfigResponse {
            success: true,
            config: None,
            error: None,
        };
        assert!(matches!(resp.into_result(), Err(ApiError::Rejected(None))));
    }
}
