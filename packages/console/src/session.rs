//! # Operator session
//!
//! The console has exactly one [`Session`]: whether the operator is signed in,
//! whether a check is in flight, the last error, and the admin id the server
//! reported. The server cookie is the authority; the session only mirrors the
//! most recent answer from `login`, `logout` or `me`.
//!
//! ## Sharing
//!
//! [`SessionManager`] does not own the session value. It reads and publishes
//! through a [`SessionStore`], so the state can live wherever the host keeps
//! shared state: a Dioxus signal in the UI (which re-renders every subscriber),
//! or a [`SharedSession`] in tests and non-UI callers.
//!
//! ## Loading indicator
//!
//! Only the very first `check_auth` may raise `loading`. The manager tracks this
//! with an explicit `initial_check_done` flag, so background re-checks (for
//! example when a protected layout mounts) never flash the verifying screen.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use api::{ApiError, AuthApi, LoginCredentials};

/// Error shown when the session check cannot reach the server.
pub const CHECK_FAILED: &str = "Failed to verify authentication";
/// Error shown when the server rejects a login without saying why.
pub const LOGIN_REJECTED: &str = "Invalid username or password";
/// Error shown when login or logout cannot reach the server.
pub const NETWORK_FAILURE: &str = "Network error occurred";
/// Error shown when the server rejects a logout without saying why.
pub const LOGOUT_FAILED: &str = "Logout failed";

/// Authentication state of the operator.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub authenticated: bool,
    pub loading: bool,
    pub error: Option<String>,
    pub admin_id: Option<i64>,
}

impl Default for Session {
    /// Application start: nothing verified yet.
    fn default() -> Self {
        Self {
            authenticated: false,
            loading: true,
            error: None,
            admin_id: None,
        }
    }
}

impl Session {
    fn signed_in(admin_id: Option<i64>) -> Self {
        Self {
            authenticated: true,
            loading: false,
            error: None,
            admin_id,
        }
    }

    /// Error to show above signed-in pages. Only a failed logout leaves one
    /// behind while the operator is still authenticated.
    pub fn signed_in_error(&self) -> Option<&str> {
        if self.loading || !self.authenticated {
            return None;
        }
        self.error.as_deref()
    }

    fn signed_out(error: Option<String>) -> Self {
        Self {
            authenticated: false,
            loading: false,
            error,
            admin_id: None,
        }
    }
}

/// Shared cell holding the one session instance.
pub trait SessionStore {
    fn snapshot(&self) -> Session;

    /// Replace the session and notify readers.
    fn publish(&self, session: Session);

    fn update(&self, change: impl FnOnce(&mut Session)) {
        let mut session = self.snapshot();
        change(&mut session);
        self.publish(session);
    }
}

type Listener = Box<dyn Fn(&Session)>;

/// Reference-counted [`SessionStore`] with change listeners.
///
/// Clones share the same session. Listeners run synchronously on every
/// publish and must not subscribe further listeners from inside the callback.
#[derive(Clone, Default)]
pub struct SharedSession {
    session: Rc<RefCell<Session>>,
    listeners: Rc<RefCell<Vec<Listener>>>,
}

impl SharedSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, listener: impl Fn(&Session) + 'static) {
        self.listeners.borrow_mut().push(Box::new(listener));
    }
}

impl SessionStore for SharedSession {
    fn snapshot(&self) -> Session {
        self.session.borrow().clone()
    }

    fn publish(&self, session: Session) {
        *self.session.borrow_mut() = session.clone();
        for listener in self.listeners.borrow().iter() {
            listener(&session);
        }
    }
}

/// Runs check/login/logout against the auth API and publishes the outcome.
///
/// None of the operations can fail from the caller's point of view: every
/// failure ends up in [`Session::error`] and the boolean result.
pub struct SessionManager<A, S> {
    auth: A,
    store: S,
    initial_check_done: Cell<bool>,
}

impl<A: AuthApi, S: SessionStore> SessionManager<A, S> {
    pub fn new(auth: A, store: S) -> Self {
        Self {
            auth,
            store,
            initial_check_done: Cell::new(false),
        }
    }

    /// Current session snapshot.
    pub fn session(&self) -> Session {
        self.store.snapshot()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Whether at least one `check_auth` has settled.
    pub fn initial_check_done(&self) -> bool {
        self.initial_check_done.get()
    }

    /// Ask the server whether the session cookie is still valid.
    ///
    /// Raises `loading` only on the first, unsuppressed call. Always settles
    /// with `loading == false` and returns the resulting authenticated flag.
    pub async fn check_auth(&self, suppress_loading: bool) -> bool {
        if !suppress_loading && !self.initial_check_done.get() {
            self.store.update(|s| {
                s.loading = true;
                s.error = None;
            });
        }

        let next = match self.auth.check_session().await {
            Ok(resp) if resp.success => Session::signed_in(resp.admin_id),
            Ok(resp) => {
                tracing::debug!("session check rejected: {:?}", resp.error);
                Session::signed_out(resp.error.filter(|e| !e.is_empty()))
            }
            Err(err) => {
                tracing::warn!("session check failed: {err}");
                Session::signed_out(Some(CHECK_FAILED.to_string()))
            }
        };

        let authenticated = next.authenticated;
        self.store.publish(next);
        self.initial_check_done.set(true);
        authenticated
    }

    /// Sign in. Returns `true` when the server accepted the credentials.
    pub async fn login(&self, credentials: &LoginCredentials) -> bool {
        self.store.update(|s| {
            s.loading = true;
            s.error = None;
        });

        let next = match self.auth.login(credentials).await {
            Ok(resp) if resp.success => {
                tracing::info!(admin_id = ?resp.admin_id, "operator signed in");
                Session::signed_in(resp.admin_id)
            }
            Ok(resp) => {
                tracing::warn!(username = %credentials.username, "login rejected");
                Session::signed_out(Some(
                    resp.error
                        .filter(|e| !e.is_empty())
                        .unwrap_or_else(|| LOGIN_REJECTED.to_string()),
                ))
            }
            Err(err) => {
                tracing::warn!("login failed: {err}");
                Session::signed_out(Some(NETWORK_FAILURE.to_string()))
            }
        };

        let authenticated = next.authenticated;
        self.store.publish(next);
        authenticated
    }

    /// Sign out. On failure the previous authentication state is kept.
    pub async fn logout(&self) -> bool {
        self.store.update(|s| s.loading = true);

        let failure = match self.auth.logout().await {
            Ok(resp) if resp.success => None,
            Ok(resp) => Some(logout_failure(ApiError::Rejected(resp.error))),
            Err(err) => Some(logout_failure(err)),
        };

        match failure {
            None => {
                tracing::info!("operator signed out");
                self.store.publish(Session::signed_out(None));
                true
            }
            Some(message) => {
                tracing::warn!("logout failed: {message}");
                self.store.update(|s| {
                    s.loading = false;
                    s.error = Some(message);
                });
                false
            }
        }
    }
}

fn logout_failure(err: ApiError) -> String {
    if err.is_transport() {
        return NETWORK_FAILURE.to_string();
    }
    err.server_message().unwrap_or(LOGOUT_FAILED).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::MemoryBackend;

    fn recorded(store: &SharedSession) -> Rc<RefCell<Vec<Session>>> {
        let history = Rc::new(RefCell::new(Vec::new()));
        let sink = history.clone();
        store.subscribe(move |s| sink.borrow_mut().push(s.clone()));
        history
    }

    fn manager(backend: &MemoryBackend) -> SessionManager<MemoryBackend, SharedSession> {
        SessionManager::new(backend.clone(), SharedSession::new())
    }

    #[test]
    fn test_session_starts_loading() {
        let session = Session::default();
        assert!(session.loading);
        assert!(!session.authenticated);
        assert!(session.error.is_none());
    }

    #[tokio::test]
    async fn test_first_check_raises_loading_once() {
        let backend = MemoryBackend::new().with_admin("root", "pw", 1).signed_in_as(1);
        let manager = manager(&backend);
        let history = recorded(manager.store());

        assert!(manager.check_auth(false).await);
        {
            let history = history.borrow();
            assert_eq!(history.len(), 2);
            assert!(history[0].loading);
            assert!(!history[1].loading);
            assert!(history[1].authenticated);
            assert_eq!(history[1].admin_id, Some(1));
        }

        history.borrow_mut().clear();
        assert!(manager.check_auth(false).await);
        let history = history.borrow();
        assert_eq!(history.len(), 1);
        assert!(!history[0].loading);
    }

    #[tokio::test]
    async fn test_suppressed_check_never_raises_loading() {
        let backend = MemoryBackend::new();
        let manager = manager(&backend);
        let history = recorded(manager.store());

        assert!(!manager.check_auth(true).await);
        assert!(manager.initial_check_done());
        assert!(!manager.check_auth(false).await);

        for session in history.borrow().iter() {
            assert!(!session.loading);
        }
    }

    #[tokio::test]
    async fn test_loading_false_after_every_outcome() {
        let backend = MemoryBackend::new().with_admin("root", "pw", 1);
        let manager = manager(&backend);

        // rejected
        assert!(!manager.check_auth(false).await);
        let session = manager.session();
        assert!(!session.loading);
        assert_eq!(session.error.as_deref(), Some("Not authenticated"));

        // unreachable
        backend.set_offline(true);
        assert!(!manager.check_auth(false).await);
        let session = manager.session();
        assert!(!session.loading);
        assert!(!session.authenticated);
        assert_eq!(session.error.as_deref(), Some(CHECK_FAILED));

        // accepted
        backend.set_offline(false);
        manager.login(&LoginCredentials::new("root", "pw")).await;
        assert!(manager.check_auth(false).await);
        let session = manager.session();
        assert!(!session.loading);
        assert!(session.error.is_none());
    }

    #[tokio::test]
    async fn test_login_with_valid_credentials() {
        let backend = MemoryBackend::new().with_admin("root", "pw", 42);
        let manager = manager(&backend);
        let history = recorded(manager.store());

        assert!(manager.login(&LoginCredentials::new("root", "pw")).await);
        let session = manager.session();
        assert!(session.authenticated);
        assert!(!session.loading);
        assert!(session.error.is_none());
        assert_eq!(session.admin_id, Some(42));
        assert!(history.borrow()[0].loading);
    }

    #[tokio::test]
    async fn test_login_with_invalid_credentials() {
        let backend = MemoryBackend::new().with_admin("root", "pw", 42);
        let manager = manager(&backend);

        assert!(!manager.login(&LoginCredentials::new("root", "wrong")).await);
        let session = manager.session();
        assert!(!session.authenticated);
        assert!(!session.loading);
        assert_eq!(session.error.as_deref(), Some("Invalid credentials"));
    }

    #[tokio::test]
    async fn test_login_when_server_unreachable() {
        let backend = MemoryBackend::new().with_admin("root", "pw", 42);
        backend.set_offline(true);
        let manager = manager(&backend);

        assert!(!manager.login(&LoginCredentials::new("root", "pw")).await);
        let session = manager.session();
        assert!(!session.authenticated);
        assert_eq!(session.error.as_deref(), Some(NETWORK_FAILURE));
    }

    #[tokio::test]
    async fn test_login_clears_previous_error() {
        let backend = MemoryBackend::new().with_admin("root", "pw", 42);
        let manager = manager(&backend);

        manager.login(&LoginCredentials::new("root", "wrong")).await;
        assert!(manager.session().error.is_some());
        manager.login(&LoginCredentials::new("root", "pw")).await;
        assert!(manager.session().error.is_none());
    }

    #[tokio::test]
    async fn test_logout_resets_session() {
        let backend = MemoryBackend::new().with_admin("root", "pw", 42);
        let manager = manager(&backend);
        manager.login(&LoginCredentials::new("root", "pw")).await;

        assert!(manager.logout().await);
        assert_eq!(manager.session(), Session::signed_out(None));
        assert_eq!(backend.session(), None);
    }

    #[tokio::test]
    async fn test_failed_logout_keeps_authentication() {
        let backend = MemoryBackend::new().with_admin("root", "pw", 42);
        let manager = manager(&backend);
        manager.login(&LoginCredentials::new("root", "pw")).await;

        backend.fail_path("/api/admin/logout");
        assert!(!manager.logout().await);
        let session = manager.session();
        assert!(session.authenticated);
        assert!(!session.loading);
        assert_eq!(session.admin_id, Some(42));
        assert_eq!(session.error.as_deref(), Some(NETWORK_FAILURE));
    }

    #[tokio::test]
    async fn test_failed_logout_error_reaches_signed_in_pages() {
        let backend = MemoryBackend::new().with_admin("root", "pw", 42);
        let manager = manager(&backend);
        manager.login(&LoginCredentials::new("root", "pw")).await;
        assert_eq!(manager.session().signed_in_error(), None);

        backend.fail_path("/api/admin/logout");
        manager.logout().await;
        assert_eq!(manager.session().signed_in_error(), Some(NETWORK_FAILURE));

        // A later quiet re-check that still finds the cookie clears it
        assert!(manager.check_auth(true).await);
        assert_eq!(manager.session().signed_in_error(), None);
    }

    #[tokio::test]
    async fn test_signed_out_error_stays_off_signed_in_pages() {
        let backend = MemoryBackend::new().with_admin("root", "pw", 42);
        let manager = manager(&backend);

        manager.login(&LoginCredentials::new("root", "wrong")).await;
        let session = manager.session();
        assert!(session.error.is_some());
        assert_eq!(session.signed_in_error(), None);
    }

    #[test]
    fn test_logout_failure_messages() {
        assert_eq!(logout_failure(ApiError::Rejected(None)), LOGOUT_FAILED);
        assert_eq!(
            logout_failure(ApiError::Rejected(Some("Session expired".into()))),
            "Session expired"
        );
        assert_eq!(
            logout_failure(ApiError::Decode("eof".into())),
            NETWORK_FAILURE
        );
    }
}
