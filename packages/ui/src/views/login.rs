use dioxus::prelude::*;

use crate::auth::{use_auth, LoginButton};

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

/// Sign-in page.
///
/// Shows the last sign-in error, or the notice left by a sign-out.
#[component]
pub fn LoginView(on_signed_in: EventHandler<()>) -> Element {
    let auth = use_auth();
    let mut error = use_signal(|| Option::<String>::None);

    let message = error().or_else(|| auth().notice);

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        div {
            class: "view-page view-centered",

            h1 { class: "view-title", "Profile" }
            p { class: "view-muted", "Sign in to view and edit your details" }

            if let Some(err) = message {
                div { class: "view-error", "{err}" }
            }

            LoginButton {
                class: "view-button view-button-google",
                on_signed_in: move |_| {
                    error.set(None);
                    on_signed_in.call(());
                },
                on_error: move |e: String| error.set(Some(e)),
            }
        }
    }
}
