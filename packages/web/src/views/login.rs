//! Operator sign-in page.

use std::time::Duration;

use api::LoginCredentials;
use console::{login_error, login_redirect, show_login_form, validate_login};
use dioxus::prelude::*;
use ui::{use_auth, use_config, use_session_manager, ErrorBanner, Spinner};

use crate::Route;

/// Login page. `from` is where the operator goes once signed in.
#[component]
pub fn Login(from: String) -> Element {
    let auth = use_auth();
    let manager = use_session_manager();
    let config = use_config();
    let nav = use_navigator();

    let mut username = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut submit_error = use_signal(|| Option::<String>::None);
    let mut submitting = use_signal(|| false);
    let mut bypass = use_signal(|| false);

    // Stop waiting on a slow session check after a while
    let delay = Duration::from_secs(config.ui.auth_bypass_delay_secs);
    use_hook(move || {
        spawn(async move {
            ui::sleep(delay).await;
            if auth.peek().loading {
                tracing::debug!("session check still pending, showing login form");
                bypass.set(true);
            }
        })
    });

    let return_to = from.clone();
    use_effect(move || {
        let session = auth();
        let requested = (!return_to.is_empty()).then_some(return_to.as_str());
        if let Some(target) = login_redirect(&session, requested) {
            let route = target.parse::<Route>().unwrap_or(Route::Dashboard {});
            nav.replace(route);
        }
    });

    let session = auth();

    if !show_login_form(&session, bypass()) {
        return rsx! {
            div {
                class: "fullscreen-center",
                div {
                    class: "status-card",
                    Spinner { label: "Checking authentication status..." }
                    button {
                        class: "btn btn-outline",
                        onclick: move |_| bypass.set(true),
                        "Bypass Loading"
                    }
                }
            }
        };
    }

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let manager = manager.clone();
        async move {
            let user = username.peek().clone();
            let pass = password.peek().clone();
            if let Err(err) = validate_login(&user, &pass) {
                submit_error.set(Some(err.to_string()));
                return;
            }
            submit_error.set(None);
            submitting.set(true);
            manager.login(&LoginCredentials::new(user.trim(), pass)).await;
            submitting.set(false);
        }
    };

    let error = login_error(&session, submit_error().as_deref());

    rsx! {
        div {
            class: "login-page",
            div {
                class: "login-card",
                h1 { class: "login-title", "Data Sync Admin Panel" }
                p { class: "login-subtitle", "Sign in to manage clients and sync activity" }

                if let Some(message) = error {
                    ErrorBanner { message: message }
                }

                form {
                    class: "login-form",
                    onsubmit: onsubmit,
                    label {
                        class: "field",
                        span { class: "field-label", "Username" }
                        input {
                            class: "field-input",
                            r#type: "text",
                            autocomplete: "username",
                            value: "{username}",
                            disabled: submitting(),
                            oninput: move |e| username.set(e.value()),
                        }
                    }
                    label {
                        class: "field",
                        span { class: "field-label", "Password" }
                        input {
                            class: "field-input",
                            r#type: "password",
                            autocomplete: "current-password",
                            value: "{password}",
                            disabled: submitting(),
                            oninput: move |e| password.set(e.value()),
                        }
                    }
                    button {
                        class: "btn btn-primary btn-block",
                        r#type: "submit",
                        disabled: submitting(),
                        if submitting() { "Signing in..." } else { "Sign In" }
                    }
                }
            }
        }
    }
}
