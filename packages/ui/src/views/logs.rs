use dioxus::prelude::*;

use console::dates::display_date;
use console::{load_logs, visible_logs, LogFilter, StatusCounts, StatusTone};

use crate::icons::FaRotate;
use crate::{use_api, ErrorBanner, Icon, Spinner};

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

/// Every sync run reported by client agents, newest first.
#[component]
pub fn LogsView() -> Element {
    let client = use_api();
    let mut filter = use_signal(LogFilter::default);

    let mut logs = use_resource(move || {
        let client = client.clone();
        async move { load_logs(&client).await }
    });

    let Some(listing) = logs.read().as_ref().cloned() else {
        return rsx! {
            Spinner { label: "Loading sync logs..." }
        };
    };

    let current = filter();
    let counts = StatusCounts::tally(&listing.items);
    let rows = visible_logs(&listing.items, &current);

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }

        div {
            class: "view card",
            div {
                class: "view-header",
                h2 { class: "view-title", "Sync Logs" }
                button {
                    class: "btn btn-outline",
                    onclick: move |_| logs.restart(),
                    Icon { icon: FaRotate, width: 14, height: 14 }
                    span { "Refresh" }
                }
            }

            if let Some(error) = listing.error.clone() {
                ErrorBanner {
                    message: error,
                    on_retry: move |_| logs.restart(),
                }
            }

            div {
                class: "filter-bar",
                button {
                    class: if current.tone.is_none() { "chip active" } else { "chip" },
                    onclick: move |_| filter.write().tone = None,
                    "All ({listing.items.len()})"
                }
                for tone in StatusTone::ALL {
                    button {
                        key: "{tone.label()}",
                        class: if current.tone == Some(tone) { "chip active" } else { "chip" },
                        onclick: move |_| filter.write().tone = Some(tone),
                        "{tone.label()} ({counts.get(tone)})"
                    }
                }
                input {
                    class: "filter-search",
                    r#type: "search",
                    placeholder: "Search client ID or database",
                    value: "{current.query}",
                    oninput: move |evt: FormEvent| filter.write().query = evt.value(),
                }
            }

            if rows.is_empty() {
                p {
                    class: "empty-state",
                    if current.is_active() { "No sync logs match the current filter." } else { "No sync logs found." }
                }
            } else {
                div {
                    class: "table-scroll",
                    table {
                        class: "data-table",
                        thead {
                            tr {
                                th { "ID" }
                                th { "Client ID" }
                                th { "Database" }
                                th { "Date & Time" }
                                th { "Records" }
                                th { "Status" }
                                th { "Message" }
                            }
                        }
                        tbody {
                            for log in rows {
                                tr {
                                    key: "{log.id}",
                                    td { class: "cell-muted", "{log.id}" }
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
                                    td { class: "cell-wrap", {log.message.clone().unwrap_or_default()} }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
