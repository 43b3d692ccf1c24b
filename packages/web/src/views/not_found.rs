use console::fallback_path;
use dioxus::prelude::*;
use ui::{use_auth, VerifyingScreen};

use crate::Route;

/// Unknown paths go home when signed in, otherwise to the login page.
#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let auth = use_auth();
    let nav = use_navigator();

    use_effect(move || {
        let session = auth();
        if session.loading {
            return;
        }
        tracing::debug!(path = %segments.join("/"), "unknown route");
        let target = fallback_path(&session)
            .parse::<Route>()
            .unwrap_or(Route::Dashboard {});
        nav.replace(target);
    });

    rsx! {
        VerifyingScreen {}
    }
}
