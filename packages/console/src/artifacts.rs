//! # Client configuration artifacts
//!
//! Files the operator hands to a client site so its sync agent can connect:
//!
//! | Artifact                      | Contents                                  |
//! |-------------------------------|-------------------------------------------|
//! | `sync-config-{clientId}.json` | the [`ClientConfig`] record, pretty JSON  |
//! | `sync-client-{clientId}.bat`  | Windows launcher                          |
//! | `sync-client-{clientId}.sh`   | POSIX launcher                            |
//!
//! Launchers export `CLIENT_ID`, `DB_NAME`, `ACCESS_TOKEN`, `API_URL` and
//! `CONFIG_FILE`, then start the `sync-client` executable if it sits next to
//! the script. Without it they fall back to posting an empty payload to
//! `{API_URL}/api/sync/data` with curl, which at least proves the token works.
//!
//! Values are substituted verbatim. The output is a pure function of the
//! record: the same config always yields byte-identical files.

use api::ClientConfig;

/// Placeholder appended to the visible prefix of a masked secret.
pub const MASK: &str = "••••••••";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptKind {
    /// Windows `.bat`.
    Batch,
    /// POSIX `sh`.
    Shell,
}

impl ScriptKind {
    pub const ALL: [ScriptKind; 2] = [ScriptKind::Batch, ScriptKind::Shell];

    pub fn extension(self) -> &'static str {
        match self {
            ScriptKind::Batch => "bat",
            ScriptKind::Shell => "sh",
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            ScriptKind::Batch => "application/bat",
            ScriptKind::Shell => "application/x-sh",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ScriptKind::Batch => "Batch File",
            ScriptKind::Shell => "Shell Script",
        }
    }
}

/// A generated file ready to be offered for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub filename: String,
    pub mime: &'static str,
    pub contents: String,
}

/// Generator over one client's configuration record.
#[derive(Debug, Clone, Copy)]
pub struct ConfigArtifacts<'a> {
    config: &'a ClientConfig,
}

impl<'a> ConfigArtifacts<'a> {
    pub fn new(config: &'a ClientConfig) -> Self {
        Self { config }
    }

    pub fn config_filename(&self) -> String {
        format!("sync-config-{}.json", self.config.client_id)
    }

    pub fn script_filename(&self, kind: ScriptKind) -> String {
        format!("sync-client-{}.{}", self.config.client_id, kind.extension())
    }

    pub fn config_json(&self) -> Result<Artifact, serde_json::Error> {
        Ok(Artifact {
            filename: self.config_filename(),
            mime: "application/json",
            contents: serde_json::to_string_pretty(self.config)?,
        })
    }

    pub fn script(&self, kind: ScriptKind) -> Artifact {
        Artifact {
            filename: self.script_filename(kind),
            mime: kind.mime(),
            contents: self.render(kind, &self.config.access_token),
        }
    }

    /// Script text for on-screen display, with the access token masked.
    pub fn preview(&self, kind: ScriptKind) -> String {
        self.render(kind, &mask_secret(&self.config.access_token))
    }

    fn render(&self, kind: ScriptKind, access_token: &str) -> String {
        let ClientConfig {
            client_id,
            db_name,
            api_url,
            ..
        } = self.config;
        let config_file = self.config_filename();

        match kind {
            ScriptKind::Batch => format!(
                r#"@echo off
echo Data Sync Client Starter
echo ------------------------------------------
echo Client ID: {client_id}
echo Database: {db_name}
echo ------------------------------------------
echo.

set CLIENT_ID={client_id}
set DB_NAME={db_name}
set ACCESS_TOKEN={access_token}
set API_URL={api_url}
set CONFIG_FILE={config_file}

if exist sync-client.exe (
  sync-client.exe --client-id %CLIENT_ID% --config %CONFIG_FILE% --non-interactive
) else (
  echo sync-client.exe not found, sending an empty payload instead
  curl -X POST %API_URL%/api/sync/data ^
    -H "Content-Type: application/json" ^
    -d "{{\"clientId\": \"%CLIENT_ID%\", \"accessToken\": \"%ACCESS_TOKEN%\", \"data\": []}}"
)

echo.
echo Process completed.
"#
            ),
            ScriptKind::Shell => format!(
                r#"#!/bin/sh
echo "Data Sync Client Starter"
echo "------------------------------------------"
echo "Client ID: {client_id}"
echo "Database: {db_name}"
echo "------------------------------------------"
echo

CLIENT_ID="{client_id}"
DB_NAME="{db_name}"
ACCESS_TOKEN="{access_token}"
API_URL="{api_url}"
CONFIG_FILE="{config_file}"
export CLIENT_ID DB_NAME ACCESS_TOKEN API_URL CONFIG_FILE

if [ -x ./sync-client ]; then
  ./sync-client --client-id "$CLIENT_ID" --config "$CONFIG_FILE" --non-interactive
else
  echo "sync-client not found, sending an empty payload instead"
  curl -X POST "$API_URL/api/sync/data" \
    -H "Content-Type: application/json" \
    -d "{{\"clientId\": \"$CLIENT_ID\", \"accessToken\": \"$ACCESS_TOKEN\", \"data\": []}}"
fi

echo
echo "Process completed."
"#
            ),
        }
    }
}

/// Keep the first four characters of a secret and hide the rest.
pub fn mask_secret(secret: &str) -> String {
    let visible: String = secret.chars().take(4).collect();
    if secret.chars().count() <= 4 {
        MASK.to_string()
    } else {
        format!("{visible}{MASK}")
    }
}
