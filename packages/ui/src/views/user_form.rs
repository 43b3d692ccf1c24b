use std::time::Duration;

use dioxus::prelude::*;

use console::{submit_user_form, FormMode, UserFormState};

use crate::{sleep, use_api, ErrorBanner, SuccessBanner};

/// How long the success message stays up before returning to the list.
const SAVED_NOTICE: Duration = Duration::from_secs(2);

/// Create or edit one client account.
///
/// Validation runs before any request. While a submit is in flight the form is
/// locked. On success `on_saved` fires at once so the list is re-fetched even
/// if the operator leaves early; the server's client id and token stay up
/// briefly before `on_close`.
#[component]
pub fn UserFormView(mode: FormMode, on_saved: EventHandler<()>, on_close: EventHandler<()>) -> Element {
    let client = use_api();
    let mut state = use_signal(|| UserFormState::new(mode.clone()));

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let client = client.clone();
        async move {
            if !state.write().begin_submit() {
                return;
            }
            let (mode, form) = {
                let current = state.read();
                (current.mode.clone(), current.form.clone())
            };
            let result = submit_user_form(&client, &mode, &form).await;
            let saved = state.write().finish_submit(result);
            if saved {
                on_saved.call(());
                sleep(SAVED_NOTICE).await;
                on_close.call(());
            }
        }
    };

    let current = state.read().clone();
    let editing = matches!(current.mode, FormMode::Edit(_));
    let locked = current.submitting || current.succeeded();
    let password_hint = if editing {
        "Leave blank to keep the current password"
    } else {
        ""
    };

    rsx! {
        div {
            class: "view card",
            h2 { class: "view-title", {current.mode.title()} }
            if let FormMode::Edit(user) = &current.mode {
                p { class: "view-subtitle", "Client ID: {user.client_id}" }
            }

            if let Some(error) = current.error.clone() {
                ErrorBanner { message: error }
            }
            if let Some(success) = current.success.clone() {
                SuccessBanner { message: success }
            }

            form {
                class: "form-grid",
                onsubmit: onsubmit,

                FormField {
                    id: "client-name",
                    label: "Client Name",
                    value: current.form.client_name.clone(),
                    disabled: locked,
                    on_input: move |v: String| state.write().form.client_name = v,
                }
                FormField {
                    id: "db-name",
                    label: "Database Name",
                    required: true,
                    value: current.form.db_name.clone(),
                    disabled: locked,
                    on_input: move |v: String| state.write().form.db_name = v,
                }
                FormField {
                    id: "db-user",
                    label: "Database User",
                    required: true,
                    value: current.form.db_user.clone(),
                    disabled: locked,
                    on_input: move |v: String| state.write().form.db_user = v,
                }
                FormField {
                    id: "db-password",
                    label: "Database Password",
                    input_type: "password",
                    required: !editing,
                    hint: password_hint.to_string(),
                    value: current.form.db_password.clone(),
                    disabled: locked,
                    on_input: move |v: String| state.write().form.db_password = v,
                }
                FormField {
                    id: "address",
                    label: "Address",
                    value: current.form.address.clone(),
                    disabled: locked,
                    on_input: move |v: String| state.write().form.address = v,
                }
                FormField {
                    id: "phone-number",
                    label: "Phone Number",
                    input_type: "tel",
                    value: current.form.phone_number.clone(),
                    disabled: locked,
                    on_input: move |v: String| state.write().form.phone_number = v,
                }
                FormField {
                    id: "username",
                    label: "Username",
                    value: current.form.username.clone(),
                    disabled: locked,
                    on_input: move |v: String| state.write().form.username = v,
                }
                FormField {
                    id: "password",
                    label: "Password",
                    input_type: "password",
                    value: current.form.password.clone(),
                    disabled: locked,
                    on_input: move |v: String| state.write().form.password = v,
                }

                div {
                    class: "form-actions",
                    button {
                        r#type: "button",
                        class: "btn btn-outline",
                        disabled: current.submitting,
                        onclick: move |_| on_close.call(()),
                        if current.succeeded() { "Back" } else { "Cancel" }
                    }
                    button {
                        r#type: "submit",
                        class: "btn btn-primary",
                        disabled: locked,
                        if current.submitting {
                            "Saving..."
                        } else {
                            {current.mode.submit_label()}
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn FormField(
    id: String,
    label: String,
    value: String,
    #[props(default = "text".to_string())] input_type: String,
    #[props(default)] required: bool,
    #[props(default)] disabled: bool,
    #[props(default)] hint: String,
    on_input: EventHandler<String>,
) -> Element {
    rsx! {
        div {
            class: "form-field",
            label {
                r#for: "{id}",
                "{label}"
                if required {
                    span { class: "required-mark", " *" }
                }
            }
            input {
                id: "{id}",
                r#type: "{input_type}",
                value: "{value}",
                disabled: disabled,
                oninput: move |evt: FormEvent| on_input.call(evt.value()),
            }
            if !hint.is_empty() {
                small { class: "form-hint", "{hint}" }
            }
        }
    }
}

