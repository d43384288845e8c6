//! Reusable building blocks shared by the screens.

mod app_header;
pub use app_header::AppHeader;

mod back_button;
pub use back_button::BackButton;

mod banner;
pub use banner::ErrorBanner;

mod composition_chart;
pub use composition_chart::CompositionChart;

mod spinner;
pub use spinner::LoadingSpinner;

mod waste_icon;
pub use waste_icon::WasteIcon;
