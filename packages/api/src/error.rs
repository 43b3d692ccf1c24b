use thiserror::Error;

/// Failure of a call to the admin API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server could not be reached or the connection dropped.
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with something that is not the expected JSON.
    #[error("Malformed response: {0}")]
    Decode(String),

    /// The server answered `success: false`, optionally with a message.
    #[error("{}", .0.as_deref().unwrap_or("Request rejected by server"))]
    Rejected(Option<String>),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl ApiError {
    /// Network and decode failures are both reported as a generic network error.
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Network(_) | ApiError::Decode(_))
    }

    /// The message the server attached to a rejection, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Rejected(message) => message.as_deref().filter(|m| !m.is_empty()),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}
