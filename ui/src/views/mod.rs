//! Screens and the application shell.

mod app;
pub use app::{use_app_events, use_controller, AppEvent, EcoSortApp};

mod title;
pub use title::TitleScreen;

mod auth;
pub use auth::{LoginScreen, SignUpScreen};

mod upload;
pub use upload::UploadScreen;

mod result;
pub use result::ResultScreen;

mod ree;
pub use ree::ReeScreen;

mod material_info;
pub use material_info::MaterialInfoScreen;

mod history;
pub use history::HistoryScreen;
