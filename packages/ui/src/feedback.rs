//! Banners and spinners shared by every view.

use dioxus::prelude::*;

use crate::icons::{FaCircleCheck, FaCircleExclamation};
use crate::Icon;

/// Red banner. Shows a retry button when `on_retry` is set.
#[component]
pub fn ErrorBanner(message: String, on_retry: Option<EventHandler<()>>) -> Element {
    rsx! {
        div {
            class: "banner banner--error",
            role: "alert",
            Icon { icon: FaCircleExclamation, width: 16, height: 16 }
            span { class: "banner-text", "{message}" }
            if let Some(retry) = on_retry {
                button {
                    class: "banner-action",
                    onclick: move |_| retry.call(()),
                    "Retry"
                }
            }
        }
    }
}

#[component]
pub fn SuccessBanner(message: String) -> Element {
    rsx! {
        div {
            class: "banner banner--success",
            role: "status",
            Icon { icon: FaCircleCheck, width: 16, height: 16 }
            span { class: "banner-text", "{message}" }
        }
    }
}

#[component]
pub fn Spinner(#[props(default)] label: String) -> Element {
    rsx! {
        div {
            class: "spinner-block",
            div { class: "spinner" }
            if !label.is_empty() {
                p { class: "spinner-label", "{label}" }
            }
        }
    }
}

/// Full-page placeholder while the session check runs.
#[component]
pub fn VerifyingScreen() -> Element {
    rsx! {
        div {
            class: "fullscreen-center",
            Spinner { label: "Verifying authentication..." }
        }
    }
}
