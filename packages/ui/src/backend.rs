//! Shared API client for all platforms.
//!
//! The web app builds one [`HttpClient`] from the resolved [`ConsoleConfig`]
//! at startup and hands both down through context:
//! - **Web** (WASM): requests go through `fetch` with credentials included
//! - **Desktop** (native): reqwest with an in-process cookie jar

use api::{ConsoleConfig, HttpClient};
use dioxus::prelude::*;

/// Get the admin API client provided by [`ApiProvider`].
pub fn use_api() -> HttpClient {
    use_context::<HttpClient>()
}

pub fn use_config() -> ConsoleConfig {
    use_context::<ConsoleConfig>()
}

/// Makes the client and configuration available to every view below it.
#[component]
pub fn ApiProvider(client: HttpClient, config: ConsoleConfig, children: Element) -> Element {
    use_context_provider(|| client);
    use_context_provider(|| config);

    rsx! {
        {children}
    }
}
