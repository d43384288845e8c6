use api::WasteType;
use dioxus::prelude::*;

fn glyph(waste: WasteType) -> &'static str {
    match waste {
        WasteType::Biodegradable => "🍃",
        WasteType::NonBiodegradable => "🧴",
        WasteType::EWaste => "💻",
        WasteType::Unknown => "❓",
    }
}

fn modifier(waste: WasteType) -> &'static str {
    match waste {
        WasteType::Biodegradable => "waste-icon--bio",
        WasteType::NonBiodegradable => "waste-icon--nonbio",
        WasteType::EWaste => "waste-icon--ewaste",
        WasteType::Unknown => "waste-icon--unknown",
    }
}

#[component]
pub fn WasteIcon(waste: WasteType) -> Element {
    rsx! {
        span {
            class: format!("waste-icon {}", modifier(waste)),
            aria_hidden: "true",
            "{glyph(waste)}"
        }
    }
}
