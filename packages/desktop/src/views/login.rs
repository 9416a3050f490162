//! Login page view for desktop.

use dioxus::prelude::*;
use ui::views::LoginView;

use crate::Route;

/// Login page component for desktop.
///
/// Navigation happens only once the sign-in and its profile write succeed.
#[component]
pub fn Login() -> Element {
    let nav = use_navigator();

    rsx! {
        LoginView {
            on_signed_in: move |_| {
                nav.replace(Route::Home {});
            },
        }
    }
}
