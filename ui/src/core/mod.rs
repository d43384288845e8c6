//! Platform-agnostic application core: navigation, persistence and the
//! glue between the controller and its collaborators.

pub mod config;
pub mod controller;
pub mod display;
pub mod format;
pub mod history;
pub mod identity;
pub mod lookup;
pub mod navigation;
pub mod platform;
pub mod storage;
pub mod thumbnail;
pub mod timing;

pub use controller::{AppController, LoadedImage, LoadedItem, LoadingState, Session};
pub use display::{DisplayedScreen, ResultView};
pub use lookup::{ArchiveJob, Lookup, LookupKind, Settled, Ticket};
pub use navigation::{NavigationState, Screen};
