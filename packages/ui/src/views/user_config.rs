use dioxus::prelude::*;

use api::ClientConfig;
use console::{load_client_config, mask_secret, Artifact, ConfigArtifacts, ScriptKind};

use crate::icons::{FaArrowLeft, FaDownload, FaEye, FaEyeSlash};
use crate::{save_artifact, use_api, ErrorBanner, Icon, Spinner, SuccessBanner};

/// Connection details for one client and the files its sync agent needs.
///
/// Artifacts are regenerated from the fetched record on every click. If the
/// fetch fails, only the error is shown and no download is offered.
#[component]
pub fn UserConfigView(client_id: String, on_close: EventHandler<()>) -> Element {
    let client = use_api();
    let id = client_id.clone();
    let mut config = use_resource(move || {
        let client = client.clone();
        let id = id.clone();
        async move { load_client_config(&client, &id).await }
    });

    let loaded = config.read().as_ref().cloned();

    rsx! {
        div {
            class: "view card",
            div {
                class: "view-header",
                h2 { class: "view-title", "User Configuration" }
                button {
                    class: "btn btn-light",
                    onclick: move |_| on_close.call(()),
                    Icon { icon: FaArrowLeft, width: 14, height: 14 }
                    span { "Back to User List" }
                }
            }

            match loaded {
                None => rsx! {
                    Spinner { label: "Loading configuration..." }
                },
                Some(Err(error)) => rsx! {
                    ErrorBanner {
                        message: error,
                        on_retry: move |_| config.restart(),
                    }
                },
                Some(Ok(record)) => rsx! {
                    ConfigDetails { config: record }
                },
            }
        }
    }
}

#[component]
fn ConfigDetails(config: ClientConfig) -> Element {
    let mut show_token = use_signal(|| false);
    let mut preview = use_signal(|| Option::<ScriptKind>::None);
    let mut notice = use_signal(|| Option::<Result<String, String>>::None);

    let artifacts = ConfigArtifacts::new(&config);
    let token = if show_token() {
        config.access_token.clone()
    } else {
        mask_secret(&config.access_token)
    };

    let mut offer = move |artifact: Result<Artifact, String>| {
        let outcome = artifact.and_then(|a| save_artifact(&a).map(|place| format!("Saved {place}")));
        if let Err(e) = &outcome {
            tracing::error!("download failed: {e}");
        }
        notice.set(Some(outcome));
    };

    let json = artifacts.config_json().map_err(|e| e.to_string());
    let batch = artifacts.script(ScriptKind::Batch);
    let shell = artifacts.script(ScriptKind::Shell);
    let preview_text = preview().map(|kind| artifacts.preview(kind));

    rsx! {
        section {
            class: "config-info",
            h3 { class: "card-title", "Client Information" }
            div {
                class: "info-grid",
                InfoItem { label: "Client ID", value: config.client_id.clone() }
                InfoItem { label: "Database Name", value: config.db_name.clone() }
                InfoItem { label: "API URL", value: config.api_url.clone() }
                div {
                    p { class: "info-label", "Access Token" }
                    p {
                        class: "mono break-all",
                        "{token} "
                        button {
                            class: "link-button",
                            onclick: move |_| show_token.set(!show_token()),
                            if show_token() {
                                Icon { icon: FaEyeSlash, width: 12, height: 12 }
                            } else {
                                Icon { icon: FaEye, width: 12, height: 12 }
                            }
                        }
                    }
                }
            }
        }

        section {
            h3 { class: "card-title", "Configuration Files" }
            div {
                class: "download-row",
                button {
                    class: "btn btn-primary",
                    onclick: move |_| offer(json.clone()),
                    Icon { icon: FaDownload, width: 14, height: 14 }
                    span { "Download Config JSON" }
                }
                button {
                    class: "btn btn-success",
                    onclick: move |_| offer(Ok(batch.clone())),
                    Icon { icon: FaDownload, width: 14, height: 14 }
                    span { "Download Batch File" }
                }
                button {
                    class: "btn btn-success",
                    onclick: move |_| offer(Ok(shell.clone())),
                    Icon { icon: FaDownload, width: 14, height: 14 }
                    span { "Download Shell Script" }
                }
            }
            div {
                class: "download-row",
                for kind in ScriptKind::ALL {
                    button {
                        key: "{kind.extension()}",
                        class: "btn btn-dark",
                        onclick: move |_| {
                            let next = if preview() == Some(kind) { None } else { Some(kind) };
                            preview.set(next);
                        },
                        if preview() == Some(kind) { "Hide " } else { "Show " }
                        "{kind.label()} Content"
                    }
                }
            }

            match notice() {
                Some(Ok(message)) => rsx! { SuccessBanner { message: message } },
                Some(Err(message)) => rsx! { ErrorBanner { message: message } },
                None => rsx! {},
            }
        }

        if let (Some(kind), Some(text)) = (preview(), preview_text) {
            section {
                h3 { class: "card-title", "{kind.label()} Content" }
                p { class: "form-hint", "The access token is masked here; downloaded files contain the full value." }
                pre { class: "script-preview", "{text}" }
            }
        }
    }
}

#[component]
fn InfoItem(label: String, value: String) -> Element {
    rsx! {
        div {
            p { class: "info-label", "{label}" }
            p { class: "mono break-all", "{value}" }
        }
    }
}
