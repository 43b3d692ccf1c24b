//! # Route guard
//!
//! Decides what a protected route shows for the current [`Session`]:
//!
//! | Session                     | Decision                               |
//! |-----------------------------|----------------------------------------|
//! | `loading`                   | [`GuardDecision::ShowVerifying`]       |
//! | authenticated               | [`GuardDecision::Render`]              |
//! | unauthenticated, first time | [`GuardDecision::Redirect`] to login   |
//! | unauthenticated, again      | [`GuardDecision::Hold`] (render nothing) |
//!
//! The guard remembers that it already redirected, so re-renders during the
//! navigation do not queue a second redirect. Any evaluation outside the
//! unauthenticated state re-arms it.

use std::cell::Cell;

use crate::session::Session;

/// Route of the login page.
pub const LOGIN_PATH: &str = "/login";

/// Where the operator lands when no usable return location is known.
pub const HOME_PATH: &str = "/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    Verifying,
    Authenticated,
    Unauthenticated,
}

impl GuardState {
    pub fn of(session: &Session) -> Self {
        if session.loading {
            GuardState::Verifying
        } else if session.authenticated {
            GuardState::Authenticated
        } else {
            GuardState::Unauthenticated
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    ShowVerifying,
    Render,
    /// Navigate to the login page, which returns to `from` after sign-in.
    Redirect { from: String },
    Hold,
}

impl GuardDecision {
    /// Only `Render` may show protected content.
    pub fn allows_content(&self) -> bool {
        matches!(self, GuardDecision::Render)
    }
}

#[derive(Debug, Default)]
pub struct RouteGuard {
    redirected: Cell<bool>,
}

impl RouteGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn evaluate(&self, session: &Session, requested: &str) -> GuardDecision {
        match GuardState::of(session) {
            GuardState::Verifying => {
                self.redirected.set(false);
                GuardDecision::ShowVerifying
            }
            GuardState::Authenticated => {
                self.redirected.set(false);
                GuardDecision::Render
            }
            GuardState::Unauthenticated if self.redirected.replace(true) => GuardDecision::Hold,
            GuardState::Unauthenticated => {
                tracing::debug!(requested, "guard redirecting to login");
                GuardDecision::Redirect {
                    from: sanitize_return_to(requested),
                }
            }
        }
    }
}

/// Reduce a return location to a same-origin path that is safe to navigate to.
///
/// Anything that is not an absolute path, could be read as another origin
/// (`//host`, `/\host`), or points back at the login page becomes `/`.
pub fn sanitize_return_to(path: &str) -> String {
    let path = path.trim();
    let same_origin = path.starts_with('/') && !path.starts_with("//") && !path.contains('\\');
    if !same_origin {
        return HOME_PATH.to_string();
    }

    let route = path.split(['?', '#']).next().unwrap_or(path);
    if route == LOGIN_PATH || route.starts_with("/login/") {
        return HOME_PATH.to_string();
    }
    path.to_string()
}

/// Where the login page should send an operator who is already signed in.
pub fn login_redirect(session: &Session, return_to: Option<&str>) -> Option<String> {
    if session.loading || !session.authenticated {
        return None;
    }
    Some(return_to.map_or_else(|| HOME_PATH.to_string(), sanitize_return_to))
}

/// Whether the login form replaces the verifying spinner.
///
/// `bypass` is the operator's explicit choice to stop waiting on a slow
/// session check. It never changes the session itself.
pub fn show_login_form(session: &Session, bypass: bool) -> bool {
    !session.loading || bypass
}

/// Banner text for the login page. A local validation message is about the
/// operator's latest attempt, so it wins over whatever the session recorded.
pub fn login_error(session: &Session, local: Option<&str>) -> Option<String> {
    local.or(session.error.as_deref()).map(str::to_string)
}

/// Target for unknown routes.
pub fn fallback_path(session: &Session) -> &'static str {
    if session.authenticated {
        HOME_PATH
    } else {
        LOGIN_PATH
    }
}
