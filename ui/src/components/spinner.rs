use dioxus::prelude::*;

#[component]
pub fn LoadingSpinner(label: String) -> Element {
    rsx! {
        div { class: "spinner", role: "status",
            div { class: "spinner__ring", aria_hidden: "true" }
            p { class: "spinner__label", "{label}" }
        }
    }
}
