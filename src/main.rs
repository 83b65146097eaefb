use dioxus::prelude::*;

mod api;
mod components;
mod db;
mod diagnostics;
mod error;
mod utils;

use components::ChatShell;

const APP_CSS: Asset = asset!("/assets/styling/app.css");

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        // Theme color for mobile browsers
        document::Meta { name: "theme-color", content: "#a38449" }
        document::Meta { name: "mobile-web-app-capable", content: "yes" }
        document::Meta { name: "apple-mobile-web-app-title", content: "VoiceNote" }

        document::Stylesheet { href: APP_CSS }

        ChatShell {}
    }
}
