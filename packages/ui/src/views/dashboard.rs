use dioxus::prelude::*;

use console::dates::display_date;
use console::{load_dashboard, recent_logs, DashboardSummary, StatusTone};

use crate::icons::{FaCircleCheck, FaCircleXmark, FaRotate, FaUsers};
use crate::{use_api, use_config, ErrorBanner, Icon, NavSection, Spinner};

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

/// Overview of accounts and recent sync activity.
///
/// Figures are recomputed from the fetched collections on every render.
#[component]
pub fn DashboardView(on_navigate: EventHandler<NavSection>) -> Element {
    let client = use_api();
    let limit = use_config().ui.recent_log_limit;

    let mut data = use_resource(move || {
        let client = client.clone();
        async move { load_dashboard(&client).await }
    });

    let Some(loaded) = data.read().as_ref().cloned() else {
        return rsx! {
            Spinner { label: "Loading dashboard data..." }
        };
    };

    let summary = DashboardSummary::of(&loaded.users, &loaded.logs);
    let recent = recent_logs(&loaded.logs, limit);

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }

        div {
            class: "view",
            h2 { class: "view-title", "Dashboard" }

            if let Some(error) = loaded.error.clone() {
                ErrorBanner {
                    message: error,
                    on_retry: move |_| data.restart(),
                }
            }

            div {
                class: "stat-grid",
                StatCard { label: "Total Users", value: summary.total_users, tone: "indigo",
                    Icon { icon: FaUsers, width: 20, height: 20 }
                }
                StatCard { label: "Total Syncs", value: summary.total_syncs, tone: "blue",
                    Icon { icon: FaRotate, width: 20, height: 20 }
                }
                StatCard { label: "Successful Syncs", value: summary.successful_syncs, tone: "green",
                    Icon { icon: FaCircleCheck, width: 20, height: 20 }
                }
                StatCard { label: "Failed Syncs", value: summary.failed_syncs, tone: "red",
                    Icon { icon: FaCircleXmark, width: 20, height: 20 }
                }
            }

            section {
                class: "card",
                h3 { class: "card-title", "Recent Sync Activity" }
                if recent.is_empty() {
                    p { class: "empty-state", "No sync logs found." }
                } else {
                    div {
                        class: "table-scroll",
                        table {
                            class: "data-table",
                            thead {
                                tr {
                                    th { "Client ID" }
                                    th { "Database" }
                                    th { "Date & Time" }
                                    th { "Records" }
                                    th { "Status" }
                                }
                            }
                            tbody {
                                for log in recent {
                                    tr {
                                        key: "{log.id}",
                                        td { class: "cell-strong", "{log.client_id}" }
                                        td { {log.db_name.clone().unwrap_or_default()} }
                                        td { class: "cell-muted", {display_date(&log.sync_date)} }
                                        td { "{log.records_synced}" }
                                        td {
                                            span {
                                                class: StatusTone::of(&log.status).badge_class(),
                                                "{log.status}"
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }

            section {
                class: "card",
                h3 { class: "card-title", "Quick Actions" }
                div {
                    class: "quick-actions",
                    button {
                        class: "btn btn-primary",
                        onclick: move |_| on_navigate.call(NavSection::Users),
                        "Manage Users"
                    }
                    button {
                        class: "btn btn-secondary",
                        onclick: move |_| on_navigate.call(NavSection::Logs),
                        "View Sync Logs"
                    }
                }
            }
        }
    }
}

#[component]
fn StatCard(label: String, value: usize, tone: String, children: Element) -> Element {
    rsx! {
        div {
            class: "stat-card",
            div { class: "stat-icon stat-icon--{tone}", {children} }
            div {
                h3 { class: "stat-label", "{label}" }
                p { class: "stat-value", "{value}" }
            }
        }
    }
}
