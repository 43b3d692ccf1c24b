use std::collections::HashSet;

use dioxus::prelude::*;

use api::User;
use console::artifacts::MASK;
use console::dates::display_day;
use console::{delete_confirmed, load_users, FormMode, UserList};

use super::{ConfirmDialog, UserConfigView, UserFormView};
use crate::icons::{FaPlus, FaRotate};
use crate::{use_api, ErrorBanner, Icon, Spinner};

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

/// Which screen of user management is showing.
#[derive(Debug, Clone, PartialEq)]
enum Panel {
    List,
    Form(FormMode),
    Config(String),
}

/// User management: table, create/edit form and per-client configuration.
#[component]
pub fn UsersView() -> Element {
    let client = use_api();
    let mut list = use_signal(UserList::default);
    let mut panel = use_signal(|| Panel::List);
    let mut revealed = use_signal(HashSet::<String>::new);
    let mut deleting = use_signal(|| false);

    let loader_client = client.clone();
    let mut loader = use_resource(move || {
        let client = loader_client.clone();
        async move {
            let listing = load_users(&client).await;
            list.set(UserList::from(listing));
        }
    });

    let confirm_delete = move |_: ()| {
        let client = client.clone();
        async move {
            // The dialog stays up, busy, until the server answers
            let mut next = list.peek().clone();
            deleting.set(true);
            if let Some(client_id) = delete_confirmed(&client, &mut next).await {
                revealed.write().remove(&client_id);
            }
            list.set(next);
            deleting.set(false);
        }
    };

    match panel() {
        Panel::Config(client_id) => {
            return rsx! {
                document::Link { rel: "stylesheet", href: VIEWS_CSS }
                UserConfigView {
                    client_id: client_id,
                    on_close: move |_| panel.set(Panel::List),
                }
            };
        }
        Panel::Form(mode) => {
            return rsx! {
                document::Link { rel: "stylesheet", href: VIEWS_CSS }
                UserFormView {
                    mode: mode,
                    on_saved: move |_| loader.restart(),
                    on_close: move |_| panel.set(Panel::List),
                }
            };
        }
        Panel::List => {}
    }

    if !loader.finished() {
        return rsx! {
            Spinner { label: "Loading users..." }
        };
    }

    let current = list.read().clone();

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }

        div {
            class: "view card",
            div {
                class: "view-header",
                h2 { class: "view-title", "User Management" }
                div {
                    class: "view-actions",
                    button {
                        class: "btn btn-outline",
                        title: "Reload",
                        onclick: move |_| loader.restart(),
                        Icon { icon: FaRotate, width: 14, height: 14 }
                    }
                    button {
                        class: "btn btn-accent",
                        onclick: move |_| panel.set(Panel::Form(FormMode::Create)),
                        Icon { icon: FaPlus, width: 14, height: 14 }
                        span { "Add New User" }
                    }
                }
            }

            if let Some(error) = current.error.clone() {
                ErrorBanner {
                    message: error,
                    on_retry: move |_| loader.restart(),
                }
            }

            if current.users.is_empty() {
                p { class: "empty-state", "No users found. Add your first user to get started." }
            } else {
                div {
                    class: "table-scroll",
                    table {
                        class: "data-table",
                        thead {
                            tr {
                                th { "Client ID" }
                                th { "Client Name" }
                                th { "Database Name" }
                                th { "Database User" }
                                th { "Address" }
                                th { "Phone Number" }
                                th { "Username" }
                                th { "Password" }
                                th { "Created" }
                                th { class: "cell-center", "Actions" }
                            }
                        }
                        tbody {
                            for user in current.users.iter().cloned() {
                                UserRow {
                                    key: "{user.client_id}",
                                    revealed: revealed.read().contains(&user.client_id),
                                    user: user.clone(),
                                    on_toggle_password: move |id: String| {
                                        let mut shown = revealed.write();
                                        if !shown.remove(&id) {
                                            shown.insert(id);
                                        }
                                    },
                                    on_config: move |id: String| panel.set(Panel::Config(id)),
                                    on_edit: move |user: User| panel.set(Panel::Form(FormMode::Edit(user))),
                                    on_delete: move |id: String| list.write().request_delete(&id),
                                }
                            }
                        }
                    }
                }
            }
        }

        if let Some(target) = current.pending_delete_label() {
            ConfirmDialog {
                title: "Delete User",
                message: "Are you sure you want to delete {target}? Its access token stops working immediately.",
                confirm_label: "Delete",
                busy: deleting(),
                on_confirm: confirm_delete,
                on_cancel: move |_| list.write().cancel_delete(),
            }
        }
    }
}

#[component]
fn UserRow(
    user: User,
    revealed: bool,
    on_toggle_password: EventHandler<String>,
    on_config: EventHandler<String>,
    on_edit: EventHandler<User>,
    on_delete: EventHandler<String>,
) -> Element {
    let or_na = |value: &Option<String>| {
        value
            .as_deref()
            .filter(|v| !v.is_empty())
            .unwrap_or("N/A")
            .to_string()
    };
    let id = user.client_id.clone();
    let created = user.created_at.as_deref().map(display_day).unwrap_or_default();

    rsx! {
        tr {
            td { class: "cell-strong", "{user.client_id}" }
            td { {or_na(&user.client_name)} }
            td { "{user.db_name}" }
            td { "{user.db_user}" }
            td { {or_na(&user.address)} }
            td { {or_na(&user.phone_number)} }
            td { {or_na(&user.username)} }
            td {
                match user.password.as_deref().filter(|p| !p.is_empty()) {
                    Some(password) => rsx! {
                        span {
                            class: "secret",
                            span { class: "mono", if revealed { "{password}" } else { "{MASK}" } }
                            button {
                                class: "link-button",
                                onclick: {
                                    let id = id.clone();
                                    move |_| on_toggle_password.call(id.clone())
                                },
                                if revealed { "Hide" } else { "Show" }
                            }
                        }
                    },
                    None => rsx! { "N/A" },
                }
            }
            td { class: "cell-muted", "{created}" }
            td {
                class: "cell-center row-actions",
                button {
                    class: "link-button link-button--indigo",
                    onclick: {
                        let id = id.clone();
                        move |_| on_config.call(id.clone())
                    },
                    "Config"
                }
                button {
                    class: "link-button link-button--blue",
                    onclick: {
                        let user = user.clone();
                        move |_| on_edit.call(user.clone())
                    },
                    "Edit"
                }
                button {
                    class: "link-button link-button--red",
                    onclick: move |_| on_delete.call(id.clone()),
                    "Delete"
                }
            }
        }
    }
}
