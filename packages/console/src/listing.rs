use api::ApiError;

/// Message for a transport failure where the server never answered.
pub const NETWORK_ERROR: &str = "Network error";

/// A fetched collection and the error that replaced it, if any.
///
/// A failed fetch never leaves stale rows behind: `items` is empty whenever
/// `error` is set.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing<T> {
    pub items: Vec<T>,
    pub error: Option<String>,
}

impl<T> Default for Listing<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            error: None,
        }
    }
}

impl<T> Listing<T> {
    pub fn loaded(items: Vec<T>) -> Self {
        Self { items, error: None }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            items: Vec::new(),
            error: Some(message.into()),
        }
    }

    /// Collapse a fetch result, reporting any failure as `failure`.
    pub fn from_result(result: Result<Vec<T>, ApiError>, failure: &str) -> Self {
        match result {
            Ok(items) => Self::loaded(items),
            Err(err) => {
                tracing::warn!("{failure}: {err}");
                Self::failed(failure)
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Operator-facing text for a failed call.
///
/// Transport failures are generic; rejections show the server's own
/// message, or `fallback` when it sent none.
pub fn describe_error(err: &ApiError, fallback: &str) -> String {
    if err.is_transport() {
        return NETWORK_ERROR.to_string();
    }
    err.server_message().unwrap_or(fallback).to_string()
}
