use dioxus::prelude::*;

use crate::core::Screen;
use crate::views::use_controller;

/// Brand bar with the signed-in user and session controls.
///
/// Hidden on the title screen, which carries its own hero branding.
#[component]
pub fn AppHeader() -> Element {
    let mut controller = use_controller();

    let (user, on_title) = {
        let state = controller.read();
        (
            state.session().current_user().map(str::to_string),
            state.active_screen() == Screen::Title,
        )
    };

    if on_title {
        return rsx! {};
    }

    rsx! {
        header { id: "app-header", class: "app-header",
            div { class: "app-header__inner",
                div { class: "app-header__brand",
                    span { class: "app-header__brand-mark", aria_hidden: "true", "♻" }
                    span { class: "app-header__brand-name", "EcoSort" }
                }

                if let Some(user) = user {
                    div { class: "app-header__session",
                        span { class: "app-header__user", "{user}" }
                        button {
                            r#type: "button",
                            class: "app-header__history",
                            onclick: move |_| controller.write().show_history(),
                            "History"
                        }
                        button {
                            r#type: "button",
                            class: "app-header__logout",
                            onclick: move |_| controller.write().logout(),
                            "Log out"
                        }
                    }
                }
            }
        }
    }
}
