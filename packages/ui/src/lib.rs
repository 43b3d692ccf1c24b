//! This crate contains all shared UI for the admin console.

use dioxus::prelude::*;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

mod backend;
pub use backend::{use_api, use_config, ApiProvider};

mod timer;
pub use timer::sleep;

mod download;
pub use download::save_artifact;

mod auth;
pub use auth::{use_auth, use_session_manager, AppSession, AuthProvider, LogoutButton, SignalSession};

mod feedback;
pub use feedback::{ErrorBanner, Spinner, SuccessBanner, VerifyingScreen};

mod layout;
pub use layout::{Header, NavSection, SideNav};

pub mod views;

pub const CONSOLE_CSS: Asset = asset!("/assets/console.css");
