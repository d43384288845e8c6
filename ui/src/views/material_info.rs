use api::{CompositionItem, MaterialInfoResult};
use dioxus::prelude::*;

use crate::components::{BackButton, CompositionChart};

#[component]
fn InfoCard(title: &'static str, icon: &'static str, points: Vec<String>) -> Element {
    rsx! {
        div { class: "info-card",
            div { class: "info-card__heading",
                span { class: "info-card__icon", aria_hidden: "true", "{icon}" }
                h3 { "{title}" }
            }
            ul { class: "info-card__points",
                for (index, point) in points.iter().enumerate() {
                    li { key: "{index}", "{point}" }
                }
            }
        }
    }
}

#[component]
pub fn MaterialInfoScreen(
    image_url: String,
    info: MaterialInfoResult,
    composition: Vec<CompositionItem>,
) -> Element {
    rsx! {
        section { class: "page page-material",
            BackButton {}
            div { class: "page-material__header",
                img { class: "page-material__image", src: "{image_url}", alt: "Scanned item" }
                h2 { "Material Deep Dive" }
                p { class: "page-material__name", "{info.material_name}" }
            }
            div { class: "page-material__cards",
                InfoCard { title: "Description", icon: "📝", points: info.description.clone() }
                InfoCard {
                    title: "Environmental Impact",
                    icon: "🌍",
                    points: info.environmental_impact.clone(),
                }
                InfoCard {
                    title: "Recycling Potential",
                    icon: "♻️",
                    points: info.recycling_potential.clone(),
                }
                div { class: "info-card",
                    div { class: "info-card__heading",
                        span { class: "info-card__icon", aria_hidden: "true", "📊" }
                        h3 { "Item-Specific Composition" }
                    }
                    CompositionChart { items: composition }
                }
            }
        }
    }
}
