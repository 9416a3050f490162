use api::UserRecordApi;
use dioxus::core::Task;
use dioxus::prelude::*;

use crate::auth::{use_auth, LogoutButton};
use crate::profile::fields::{format_date_input, FieldControl};
use crate::profile::{LoadStep, ProfileModel};
use crate::services::use_services;
use crate::status::success_window;

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

/// The signed-in user's record as an editable form.
///
/// Fetches once per identity; without a session it asks to be sent to login.
/// Fields follow the configured schema when there is one, otherwise the
/// fetched record's keys.
#[component]
pub fn ProfileView(on_unauthenticated: EventHandler<()>, on_signed_out: EventHandler<()>) -> Element {
    let services = use_services();
    let auth = use_auth();
    let declared = services.records.config().field_schema.clone();
    let mut model = use_signal(move || match declared {
        Some(schema) => ProfileModel::new().with_schema(schema),
        None => ProfileModel::new(),
    });
    let mut pending_expiry = use_signal(|| Option::<Task>::None);

    let records = services.records.clone();
    use_effect(move || {
        let session = auth().session;
        let step = model.write().begin_load(session.as_ref());
        match step {
            LoadStep::RedirectToLogin => on_unauthenticated.call(()),
            LoadStep::Unchanged => {}
            LoadStep::Fetch(credentials) => {
                let records = records.clone();
                spawn(async move {
                    let result = records.fetch_user_data(&credentials).await;
                    if let Err(e) = &result {
                        tracing::error!("Fetching user data failed: {}", e);
                    }
                    model.write().finish_load(credentials.user_id(), result);
                });
            }
        }
    });

    use_drop(move || {
        if let Ok(mut slot) = pending_expiry.try_write() {
            if let Some(task) = slot.take() {
                task.cancel();
            }
        }
    });

    let records = services.records.clone();
    let handle_submit = move |_| {
        let session = auth.peek().session.clone();
        let Some(request) = model.write().begin_submit(session.as_ref()) else {
            return;
        };
        let records = records.clone();
        spawn(async move {
            let result = records
                .update_user_data(&request.credentials, request.payload)
                .await;
            if let Err(e) = &result {
                tracing::error!("Updating user data failed: {}", e);
            }
            let Some(ticket) = model.write().finish_submit(result) else {
                return;
            };
            if let Some(previous) = pending_expiry.write().take() {
                previous.cancel();
            }
            let task = spawn(async move {
                let fired = success_window(ticket).await;
                model.write().expire_success(fired);
            });
            pending_expiry.set(Some(task));
        });
    };

    let state = model.read();
    let session_present = auth.read().session.is_some();
    let controls = state.controls();

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        div {
            class: "view-page",

            h1 { class: "view-title", "Home" }

            if state.status.loading {
                p { class: "view-muted", "Loading..." }
            }
            if let Some(error) = state.status.error.clone() {
                p { class: "view-error", "{error}" }
            }
            if state.status.success {
                p { class: "view-success", "User data updated successfully!" }
            }

            form {
                class: "profile-form",
                onsubmit: move |evt: FormEvent| evt.prevent_default(),
                {controls.into_iter().map(move |control| {
                    let key = control.label().to_string();
                    let target = control.clone();
                    rsx! {
                        FieldInput {
                            key: "{key}",
                            control,
                            on_input: move |value: String| model.write().apply_input(&target, &value),
                        }
                    }
                })}
            }

            div {
                class: "view-actions",
                button {
                    class: "view-button",
                    r#type: "button",
                    disabled: !state.can_submit(session_present),
                    onclick: handle_submit,
                    "Update User Data"
                }
                LogoutButton {
                    class: "view-button view-button-secondary",
                    on_signed_out: move |_| on_signed_out.call(()),
                }
            }
        }
    }
}

/// One labelled input for a [`FieldControl`].
#[component]
fn FieldInput(control: FieldControl, on_input: EventHandler<String>) -> Element {
    let id = format!("field-{}", control.label());

    let input = match &control {
        FieldControl::Text { value, editable, .. } => rsx! {
            input {
                id: "{id}",
                class: "view-input",
                r#type: "text",
                value: "{value}",
                readonly: !editable,
                oninput: move |evt: FormEvent| on_input.call(evt.value()),
            }
        },
        FieldControl::Date { value, .. } => rsx! {
            input {
                id: "{id}",
                class: "view-input",
                r#type: "date",
                value: format_date_input(*value),
                oninput: move |evt: FormEvent| on_input.call(evt.value()),
            }
        },
        FieldControl::Select { value, options, .. } => {
            let selected = value.clone();
            rsx! {
                select {
                    id: "{id}",
                    class: "view-input",
                    value: "{selected}",
                    onchange: move |evt: FormEvent| on_input.call(evt.value()),
                    option { value: "", disabled: true, selected: selected.is_empty(), "Select..." }
                    for opt in options.iter() {
                        option {
                            value: "{opt}",
                            selected: selected == *opt,
                            "{opt}"
                        }
                    }
                }
            }
        }
    };

    rsx! {
        div {
            class: "view-field",
            label { r#for: "{id}", class: "view-label", "{control.label()}" }
            {input}
        }
    }
}
