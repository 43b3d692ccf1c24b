//! Database-initialization gate shown before anything else mounts.

use console::{check_database, InitStatus};
use dioxus::prelude::*;
use ui::icons::FaCircleExclamation;
use ui::{use_api, Icon, Spinner};

/// Asks the server to prepare its database, and only renders `children`
/// once it reports ready. Failure offers a manual retry.
#[component]
pub fn DatabaseGate(children: Element) -> Element {
    let client = use_api();
    let mut status = use_resource(move || {
        let client = client.clone();
        async move { check_database(&client).await }
    });

    let current = status.read().unwrap_or(InitStatus::Pending);

    match current {
        InitStatus::Ready => rsx! {
            {children}
        },
        InitStatus::Pending => rsx! {
            div {
                class: "fullscreen-center",
                div {
                    class: "status-card",
                    h2 { "Initializing Data Sync Admin Panel" }
                    p { "Please wait while we set up the application..." }
                    Spinner {}
                }
            }
        },
        InitStatus::Unavailable => rsx! {
            div {
                class: "fullscreen-center",
                div {
                    class: "status-card",
                    div {
                        class: "status-icon--error",
                        Icon { icon: FaCircleExclamation, width: 48, height: 48 }
                    }
                    h2 { "Database Connection Error" }
                    p {
                        "Unable to connect to the database. Please check your server "
                        "configuration and ensure the API server is running."
                    }
                    button {
                        class: "btn btn-primary btn-block",
                        onclick: move |_| status.restart(),
                        "Retry Connection"
                    }
                }
            }
        },
    }
}
