use dioxus::prelude::*;

use crate::core::Screen;
use crate::views::use_controller;

#[component]
pub fn TitleScreen() -> Element {
    let mut controller = use_controller();

    rsx! {
        section { class: "page page-title",
            div { class: "page-title__hero",
                span { class: "page-title__mark", aria_hidden: "true", "♻" }
                h1 { class: "page-title__name", "EcoSort" }
                p { class: "page-title__tagline",
                    "Snap a photo, learn how to sort it, and see what it is made of."
                }
            }
            button {
                r#type: "button",
                class: "button button--primary page-title__start",
                onclick: move |_| controller.write().navigate(Screen::Login),
                "Get Started"
            }
        }
    }
}
