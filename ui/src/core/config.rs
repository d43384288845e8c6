//! Application-level settings.

use api::ServiceConfig;

use super::thumbnail::ThumbnailBounds;

pub const HISTORY_LIMIT: usize = 50;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub services: ServiceConfig,
    /// Scans kept per user, newest first.
    pub history_limit: usize,
    pub thumbnail: ThumbnailBounds,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            services: ServiceConfig::default(),
            history_limit: HISTORY_LIMIT,
            thumbnail: ThumbnailBounds::default(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Self {
        Self {
            services: ServiceConfig::from_env(),
            ..Self::default()
        }
    }
}
