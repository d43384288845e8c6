use dioxus::prelude::*;

use crate::components::{BackButton, CompositionChart, WasteIcon};
use crate::core::ResultView;
use crate::views::{use_app_events, use_controller, AppEvent};

#[component]
pub fn ResultScreen(view: ResultView) -> Element {
    let mut controller = use_controller();
    let events = use_app_events();
    let mut selected = use_signal(|| 0usize);

    if view.results.is_empty() {
        return rsx! {
            section { class: "page page-result page-result--empty",
                BackButton {}
                div { class: "result-card result-card--empty",
                    h2 { "No Items Identified" }
                    p {
                        "No classifiable items were found in the image. Please try again with a clearer picture or a different angle."
                    }
                    img {
                        class: "result-card__image",
                        src: "{view.image_url}",
                        alt: "Uploaded item that could not be identified",
                    }
                    button {
                        r#type: "button",
                        class: "button button--neutral",
                        onclick: move |_| controller.write().reset(),
                        "Try Another Photo"
                    }
                }
            }
        };
    }

    let index = selected();
    let overall = view.overall_composition();
    let offers_rees = view.offers_ree_lookup(index);
    let learn_more = view.learn_more_target(index);
    let Some(item) = view.selected(index).cloned() else {
        return rsx! {};
    };
    let count = view.results.len();

    rsx! {
        section { class: "page page-result",
            BackButton {}
            div { class: "result-card",
                div { class: "result-card__overview",
                    h2 { "Classification Result" }
                    p { class: "result-card__summary",
                        "Found {count} item(s). Select an item below to see details."
                    }
                    img {
                        class: "result-card__image",
                        src: "{view.image_url}",
                        alt: "Uploaded waste items",
                    }
                    div { class: "result-card__overall",
                        h3 { "Overall Material Composition" }
                        CompositionChart { items: overall }
                    }
                    button {
                        r#type: "button",
                        class: "button button--neutral",
                        onclick: move |_| controller.write().reset(),
                        "Sort Another Item"
                    }
                }

                div { class: "result-card__details",
                    div { class: "result-card__chips", role: "tablist",
                        for (i, result) in view.results.iter().enumerate() {
                            button {
                                key: "{i}",
                                r#type: "button",
                                role: "tab",
                                class: if i == index { "chip chip--active" } else { "chip" },
                                aria_selected: i == index,
                                onclick: move |_| selected.set(i),
                                "{result.item_name}"
                            }
                        }
                    }

                    div { key: "{index}", class: "result-card__item",
                        div { class: "result-card__panel result-card__panel--type",
                            h3 { "Waste Type" }
                            div { class: "result-card__type",
                                WasteIcon { waste: item.waste_type }
                                span { "{item.waste_type}" }
                            }
                        }
                        div { class: "result-card__panel result-card__panel--info",
                            h3 { "Recycling Info" }
                            p { "{item.recycling_info}" }
                        }

                        if offers_rees {
                            button {
                                r#type: "button",
                                class: "button button--indigo",
                                onclick: move |_| events.send(AppEvent::LookupRees),
                                "⚙️ Lookup Rare Earth Elements"
                            }
                        }

                        if let Some((material, composition)) = learn_more {
                            button {
                                r#type: "button",
                                class: "button button--amber",
                                onclick: {
                                    let material = material.clone();
                                    move |_| {
                                        events.send(AppEvent::LearnMore {
                                            material: material.clone(),
                                            composition: composition.clone(),
                                        })
                                    }
                                },
                                "🧠 Learn More about {material}"
                            }
                        }
                    }
                }
            }
        }
    }
}
