use dioxus::prelude::*;
use ui::views::ProfileView;

use crate::Route;

/// Profile page; bounces to login without a session.
#[component]
pub fn Home() -> Element {
    let nav = use_navigator();

    rsx! {
        ProfileView {
            on_unauthenticated: move |_| {
                nav.replace(Route::Login {});
            },
            on_signed_out: move |_| {
                nav.replace(Route::Login {});
            },
        }
    }
}
