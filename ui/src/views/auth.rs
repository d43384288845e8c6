//! Login and sign-up forms. Passwords are collected but never verified;
//! identity is the trimmed email.

use dioxus::prelude::*;

use crate::core::Screen;
use crate::views::use_controller;

const PASSWORD_MISMATCH: &str = "Passwords do not match.";

fn normalized_identity(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[component]
pub fn LoginScreen() -> Element {
    let mut controller = use_controller();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut remember = use_signal(|| false);

    let auth_error = controller.read().auth_error().map(str::to_string);

    let submit = move |_| {
        let Some(identity) = normalized_identity(&email.read()) else {
            return;
        };
        controller.write().login(&identity, remember());
    };

    rsx! {
        section { class: "page page-auth",
            div { class: "auth-card",
                h1 { class: "auth-card__title", "Welcome Back" }
                p { class: "auth-card__subtitle", "Log in to continue sorting." }

                if let Some(message) = auth_error {
                    div { class: "auth-card__error", role: "alert", "{message}" }
                }

                div { class: "auth-card__field",
                    label { r#for: "email-login", "Email" }
                    input {
                        id: "email-login",
                        r#type: "email",
                        placeholder: "you@example.com",
                        value: "{email}",
                        oninput: move |evt| email.set(evt.value()),
                    }
                }
                div { class: "auth-card__field",
                    label { r#for: "password-login", "Password" }
                    input {
                        id: "password-login",
                        r#type: "password",
                        value: "{password}",
                        oninput: move |evt| password.set(evt.value()),
                    }
                }
                label { class: "auth-card__remember",
                    input {
                        r#type: "checkbox",
                        checked: remember(),
                        onchange: move |_| remember.set(!remember()),
                    }
                    span { "Remember me" }
                }

                button {
                    r#type: "button",
                    class: "button button--primary auth-card__submit",
                    onclick: submit,
                    "Log In"
                }

                p { class: "auth-card__switch",
                    "Don't have an account? "
                    button {
                        r#type: "button",
                        class: "link-button",
                        onclick: move |_| controller.write().navigate(Screen::SignUp),
                        "Sign Up"
                    }
                }
            }
        }
    }
}

#[component]
pub fn SignUpScreen() -> Element {
    let mut controller = use_controller();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut confirm = use_signal(String::new);

    let auth_error = controller.read().auth_error().map(str::to_string);
    let mismatch = !confirm.read().is_empty() && *password.read() != *confirm.read();

    let submit = move |_| {
        if *password.read() != *confirm.read() {
            return;
        }
        let Some(identity) = normalized_identity(&email.read()) else {
            return;
        };
        controller.write().sign_up(&identity);
    };

    rsx! {
        section { class: "page page-auth",
            div { class: "auth-card",
                h1 { class: "auth-card__title", "Create Account" }
                p { class: "auth-card__subtitle", "Join Eco-Sort to start classifying." }

                if let Some(message) = auth_error {
                    div { class: "auth-card__error", role: "alert", "{message}" }
                }

                div { class: "auth-card__field",
                    label { r#for: "email-signup", "Email" }
                    input {
                        id: "email-signup",
                        r#type: "email",
                        placeholder: "you@example.com",
                        value: "{email}",
                        oninput: move |evt| email.set(evt.value()),
                    }
                }
                div { class: "auth-card__field",
                    label { r#for: "password-signup", "Password" }
                    input {
                        id: "password-signup",
                        r#type: "password",
                        value: "{password}",
                        oninput: move |evt| password.set(evt.value()),
                    }
                }
                div { class: "auth-card__field",
                    label { r#for: "confirm-signup", "Confirm Password" }
                    input {
                        id: "confirm-signup",
                        r#type: "password",
                        value: "{confirm}",
                        oninput: move |evt| confirm.set(evt.value()),
                    }
                    if mismatch {
                        p { class: "auth-card__hint", "{PASSWORD_MISMATCH}" }
                    }
                }

                button {
                    r#type: "button",
                    class: "button button--primary auth-card__submit",
                    disabled: mismatch,
                    onclick: submit,
                    "Sign Up"
                }

                p { class: "auth-card__switch",
                    "Already have an account? "
                    button {
                        r#type: "button",
                        class: "link-button",
                        onclick: move |_| controller.write().navigate(Screen::Login),
                        "Log In"
                    }
                }
            }
        }
    }
}
