#![cfg_attr(all(windows, not(debug_assertions)), windows_subsystem = "windows")]

use dioxus::logger::tracing::Level;
#[cfg(feature = "desktop")]
use dioxus::desktop::{tao::dpi::LogicalSize, tao::window::WindowBuilder, Config};
use dioxus::prelude::*;

use ui::EcoSortApp;

const MAIN_CSS_INLINE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
));

#[cfg(feature = "desktop")]
fn main() {
    init_logging();

    LaunchBuilder::desktop()
        .with_cfg(
            Config::new()
                .with_window(
                    WindowBuilder::new()
                        .with_title(format!("EcoSort – v{}", env!("CARGO_PKG_VERSION")))
                        .with_inner_size(LogicalSize::new(1024.0, 768.0)),
                ),
        )
        .launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        // Inline so packaged builds need no external stylesheet.
        document::Style { "{MAIN_CSS_INLINE}" }

        EcoSortApp {}
    }
}

fn init_logging() {
    if let Err(err) = dioxus::logger::init(Level::INFO) {
        eprintln!("Failed to initialise logging: {err}");
    }
}
