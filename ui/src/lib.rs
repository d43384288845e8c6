//! Shared UI crate for EcoSort: the navigation controller, its storage and
//! every screen, rendered by the web and desktop launchers.

pub mod components;
pub mod core;
pub mod views;

pub use views::EcoSortApp;
