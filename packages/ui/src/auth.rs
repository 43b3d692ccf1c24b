//! Authentication context and hooks for the UI.
//!
//! [`AuthProvider`] owns the one [`Session`] signal and the
//! [`SessionManager`] that writes to it. Views read the signal through
//! [`use_auth`] and re-render whenever a check, login or logout settles.

use std::rc::Rc;

use api::HttpClient;
use console::{Session, SessionManager, SessionStore};
use dioxus::core::spawn_forever;
use dioxus::prelude::*;

use crate::backend::use_api;

/// [`SessionStore`] over a Dioxus signal.
#[derive(Clone, Copy)]
pub struct SignalSession(Signal<Session>);

impl SessionStore for SignalSession {
    fn snapshot(&self) -> Session {
        self.0.peek().clone()
    }

    fn publish(&self, session: Session) {
        let mut signal = self.0;
        signal.set(session);
    }
}

pub type AppSession = SessionManager<HttpClient, SignalSession>;

/// Get the current authentication state.
/// Returns a signal that updates when the operator logs in or out.
pub fn use_auth() -> Signal<Session> {
    use_context::<Signal<Session>>()
}

pub fn use_session_manager() -> Rc<AppSession> {
    use_context::<Rc<AppSession>>()
}

/// Provider component that manages authentication state.
/// Must sit below [`crate::ApiProvider`].
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let client = use_api();
    let session = use_signal(Session::default);
    use_context_provider(|| session);
    let manager =
        use_context_provider(|| Rc::new(SessionManager::new(client, SignalSession(session))));

    // Verify the session cookie on mount
    let _ = use_resource(move || {
        let manager = manager.clone();
        async move { manager.check_auth(false).await }
    });

    rsx! {
        {children}
    }
}

/// Button to log out the current operator.
///
/// Logging out raises `loading`, which unmounts the protected shell and this
/// button with it, so the request runs on a task that outlives the component.
#[component]
pub fn LogoutButton(
    on_logged_out: EventHandler<()>,
    #[props(default = "Logout".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let auth = use_auth();
    let manager = use_session_manager();

    let onclick = move |_| {
        let manager = manager.clone();
        spawn_forever(async move {
            if manager.logout().await {
                on_logged_out.call(());
            }
        });
    };

    let in_flight = auth().loading;

    rsx! {
        button {
            class: "{class}",
            disabled: in_flight,
            onclick: onclick,
            if in_flight {
                "Logging out..."
            } else {
                "{label}"
            }
        }
    }
}
