use dioxus::prelude::*;
use views::{Home, Login};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Home {},
    #[route("/login")]
    Login {},
}

fn main() {
    let services = match ui::Services::from_env() {
        Ok(services) => services,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            std::process::exit(1);
        }
    };

    dioxus::LaunchBuilder::new().with_context(services).launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: ui::MAIN_CSS }
        ui::AuthProvider {
            Router::<Route> {}
        }
    }
}
