use dioxus::logger::tracing::Level;
use dioxus::prelude::*;

use ui::EcoSortApp;

const MAIN_CSS_INLINE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
));

fn main() {
    init_logging();
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Title { "EcoSort" }
        document::Meta { name: "viewport", content: "width=device-width, initial-scale=1" }
        document::Style { "{MAIN_CSS_INLINE}" }

        EcoSortApp {}
    }
}

fn init_logging() {
    if let Err(err) = dioxus::logger::init(Level::INFO) {
        eprintln!("Failed to initialise logging: {err}");
    }
}
