use dioxus::prelude::*;

use crate::views::use_controller;

#[component]
pub fn BackButton() -> Element {
    let mut controller = use_controller();

    rsx! {
        button {
            r#type: "button",
            class: "back-button",
            aria_label: "Go back",
            onclick: move |_| controller.write().go_back(),
            "← Back"
        }
    }
}
