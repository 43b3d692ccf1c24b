use dioxus::prelude::*;

use api::{ConsoleConfig, HttpClient};
use ui::{ApiProvider, AuthProvider};
use views::{Dashboard, DatabaseGate, Login, Logs, NotFound, ProtectedLayout, Users};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/login?:from")]
    Login { from: String },
    #[layout(ProtectedLayout)]
        #[route("/")]
        Dashboard {},
        #[route("/users")]
        Users {},
        #[route("/logs")]
        Logs {},
    #[end_layout]
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    let config = use_hook(ConsoleConfig::load);
    let client = use_hook(|| {
        HttpClient::new(&config).map_err(|e| {
            tracing::error!("cannot start console: {e}");
            e.to_string()
        })
    });

    rsx! {
        // Global app resources
        document::Link { rel: "stylesheet", href: ui::CONSOLE_CSS }
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        match client {
            Ok(client) => rsx! {
                ApiProvider {
                    client: client,
                    config: config,
                    DatabaseGate {
                        AuthProvider {
                            Router::<Route> {}
                        }
                    }
                }
            },
            Err(error) => rsx! {
                div {
                    class: "fullscreen-center",
                    div {
                        class: "status-card",
                        h2 { "Configuration Error" }
                        p { "{error}" }
                        p { "Set SYNC_ADMIN_API_URL or fix sync-admin.toml, then reload." }
                    }
                }
            },
        }
    }
}
