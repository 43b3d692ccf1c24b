//! # Console configuration: `sync-admin.toml`
//!
//! Where the admin API lives and a couple of UI tunables.
//!
//! ## Structure
//!
//! ```toml
//! [api]
//! base_url = "https://synctool.imcbs.com"
//!
//! [ui]
//! recent_log_limit = 5          # rows in the dashboard's recent activity table
//! auth_bypass_delay_secs = 3    # when the login page offers to skip a slow session check
//! ```
//!
//! ## Resolution
//!
//! [`ConsoleConfig::load`] starts from defaults, then applies the
//! `sync-admin.toml` file in the working directory (native builds only), then the
//! `SYNC_ADMIN_API_URL` environment variable. Browsers have no environment at run
//! time, so the WASM build reads that variable at compile time instead.
//!
//! All sections derive `Default`, so a missing or empty file is equivalent to the
//! default configuration.

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Production admin API.
pub const DEFAULT_API_URL: &str = "https://synctool.imcbs.com";

/// Environment variable overriding [`ApiConfig::base_url`].
pub const API_URL_ENV: &str = "SYNC_ADMIN_API_URL";

/// Top-level configuration stored in `sync-admin.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsoleConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_recent_log_limit")]
    pub recent_log_limit: usize,
    /// Seconds before the login page stops waiting on the initial session check.
    #[serde(default = "default_auth_bypass_delay")]
    pub auth_bypass_delay_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_recent_log_limit() -> usize {
    5
}

fn default_auth_bypass_delay() -> u64 {
    3
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            recent_log_limit: default_recent_log_limit(),
            auth_bypass_delay_secs: default_auth_bypass_delay(),
        }
    }
}

impl ConsoleConfig {
    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "sync-admin.toml"
    }

    /// Builder method to point the console at another API.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api.base_url = url.into();
        self
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Validated base URL with any trailing slash removed.
    pub fn base_url(&self) -> Result<String, ApiError> {
        let raw = self.api.base_url.trim();
        let url = reqwest::Url::parse(raw)
            .map_err(|e| ApiError::Config(format!("invalid API base URL {raw:?}: {e}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ApiError::Config(format!(
                "API base URL must be http or https, got {raw:?}"
            )));
        }
        Ok(raw.trim_end_matches('/').to_string())
    }

    /// Defaults, then `sync-admin.toml`, then `SYNC_ADMIN_API_URL`.
    pub fn load() -> Self {
        let mut config = Self::from_file().unwrap_or_default();
        if let Some(url) = env_base_url() {
            tracing::debug!(%url, "API base URL taken from {API_URL_ENV}");
            config.api.base_url = url;
        }
        config
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn from_file() -> Option<Self> {
        let raw = std::fs::read_to_string(Self::filename()).ok()?;
        match Self::from_toml(&raw) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::warn!("ignoring {}: {e}", Self::filename());
                None
            }
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn from_file() -> Option<Self> {
        None
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn env_base_url() -> Option<String> {
    dotenvy::dotenv().ok();
    std::env::var(API_URL_ENV)
        .ok()
        .or_else(|| option_env!("SYNC_ADMIN_API_URL").map(str::to_string))
        .filter(|url| !url.trim().is_empty())
}

#[cfg(target_arch = "wasm32")]
fn env_base_url() -> Option<String> {
    option_env!("SYNC_ADMIN_API_URL")
        .map(str::to_string)
        .filter(|url| !url.trim().is_empty())
}
