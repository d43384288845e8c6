use api::ScanHistoryItem;
use dioxus::prelude::*;

use crate::components::BackButton;
use crate::core::format::{format_item_count, format_timestamp};

#[component]
pub fn HistoryScreen(entries: Vec<ScanHistoryItem>) -> Element {
    rsx! {
        section { class: "page page-history",
            BackButton {}
            div { class: "page-history__header",
                h2 { "Scan History" }
                p { "Your recent classifications." }
            }
            if entries.is_empty() {
                div { class: "page-history__empty",
                    h3 { "No History Yet" }
                    p { "Start scanning items to see your history here!" }
                }
            } else {
                ul { class: "page-history__list",
                    for entry in entries.iter() {
                        li { key: "{entry.id}", class: "history-entry",
                            img {
                                class: "history-entry__thumb",
                                src: "{entry.thumbnail}",
                                alt: "Scanned item thumbnail",
                            }
                            div { class: "history-entry__text",
                                p { class: "history-entry__items", "{entry.item_names()}" }
                                p { class: "history-entry__count",
                                    "{format_item_count(entry.results.len())}"
                                }
                                p { class: "history-entry__time",
                                    "{format_timestamp(entry.timestamp)}"
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
