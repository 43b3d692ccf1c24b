//! Console chrome: header bar and navigation sidebar.
//!
//! Platform packages own the router, so the sidebar only reports which
//! [`NavSection`] was picked and lets the caller navigate.

use dioxus::prelude::*;

use crate::auth::LogoutButton;
use crate::icons::{FaClockRotateLeft, FaGaugeHigh, FaUsers};
use crate::Icon;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavSection {
    Dashboard,
    Users,
    Logs,
}

impl NavSection {
    pub const ALL: [NavSection; 3] = [NavSection::Dashboard, NavSection::Users, NavSection::Logs];

    pub fn label(self) -> &'static str {
        match self {
            NavSection::Dashboard => "Dashboard",
            NavSection::Users => "Users",
            NavSection::Logs => "Sync Logs",
        }
    }
}

#[component]
pub fn Header(on_logged_out: EventHandler<()>) -> Element {
    rsx! {
        header {
            class: "console-header",
            h1 { class: "console-title", "Data Sync Admin Panel" }
            LogoutButton {
                class: "btn btn-light",
                on_logged_out: on_logged_out,
            }
        }
    }
}

#[component]
pub fn SideNav(active: Option<NavSection>, on_navigate: EventHandler<NavSection>) -> Element {
    rsx! {
        nav {
            class: "console-sidebar",
            h2 { class: "sidebar-title", "Admin Console" }
            ul {
                class: "sidebar-menu",
                for section in NavSection::ALL {
                    li {
                        key: "{section.label()}",
                        button {
                            class: if active == Some(section) { "sidebar-link active" } else { "sidebar-link" },
                            onclick: move |_| on_navigate.call(section),
                            match section {
                                NavSection::Dashboard => rsx! { Icon { icon: FaGaugeHigh, width: 16, height: 16 } },
                                NavSection::Users => rsx! { Icon { icon: FaUsers, width: 16, height: 16 } },
                                NavSection::Logs => rsx! { Icon { icon: FaClockRotateLeft, width: 16, height: 16 } },
                            }
                            span { "{section.label()}" }
                        }
                    }
                }
            }
        }
    }
}
