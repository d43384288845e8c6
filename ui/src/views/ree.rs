use api::ReeResult;
use dioxus::prelude::*;

use crate::components::BackButton;
use crate::views::use_controller;

#[component]
pub fn ReeScreen(image_url: String, result: ReeResult) -> Element {
    let mut controller = use_controller();

    rsx! {
        section { class: "page page-ree",
            BackButton {}
            div { class: "ree-card",
                h2 { class: "ree-card__title",
                    span { class: "ree-card__accent", "Rare Earth Element" }
                    " Lookup"
                }
                div { class: "ree-card__body",
                    img { class: "ree-card__image", src: "{image_url}", alt: "E-waste item" }
                    div { class: "ree-card__findings",
                        h3 { "Identified REEs:" }
                        if result.identified_rees.is_empty() {
                            p { class: "ree-card__none",
                                "No specific Rare Earth Elements were identified for this item."
                            }
                        } else {
                            ul { class: "ree-card__list",
                                for ree in result.identified_rees.iter() {
                                    li { key: "{ree}", class: "chip chip--teal", "{ree}" }
                                }
                            }
                        }
                    }
                }
                button {
                    r#type: "button",
                    class: "button button--teal",
                    onclick: move |_| controller.write().reset(),
                    "Sort Another Item"
                }
            }
        }
    }
}
