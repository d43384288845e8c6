use dioxus::prelude::*;

use crate::views::use_controller;

/// Dismissible error shown above every screen.
#[component]
pub fn ErrorBanner(message: String) -> Element {
    let mut controller = use_controller();

    rsx! {
        div { class: "error-banner", role: "alert",
            div {
                strong { class: "error-banner__title", "Error: " }
                span { "{message}" }
            }
            button {
                r#type: "button",
                class: "error-banner__dismiss",
                aria_label: "Dismiss error",
                onclick: move |_| controller.write().dismiss_error(),
                "×"
            }
        }
    }
}
