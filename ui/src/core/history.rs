//! Recording completed classifications into a user's scan history.

use std::sync::Arc;

use api::{ClassificationResult, ImageData, ScanHistoryItem};
use thiserror::Error;
use tracing::{info, warn};

use super::storage::{AppStorage, StorageError};
use super::thumbnail::{self, ThumbnailBounds, ThumbnailError};

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error(transparent)]
    Thumbnail(#[from] ThumbnailError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// A classification waiting to be archived for `user`.
#[derive(Debug, Clone)]
pub struct HistoryDraft {
    pub user: String,
    pub image: Arc<ImageData>,
    pub results: Vec<ClassificationResult>,
    pub timestamp: i64,
}

impl HistoryDraft {
    pub fn into_item(self, bounds: ThumbnailBounds) -> Result<(String, ScanHistoryItem), HistoryError> {
        let thumbnail = thumbnail::create_thumbnail(&self.image, bounds)?;
        let item = ScanHistoryItem {
            id: format!("scan_{}_{}", self.timestamp, uuid::Uuid::new_v4().simple()),
            timestamp: self.timestamp,
            thumbnail,
            results: self.results,
        };
        Ok((self.user, item))
    }
}

pub fn record(
    storage: &AppStorage,
    draft: HistoryDraft,
    bounds: ThumbnailBounds,
) -> Result<ScanHistoryItem, HistoryError> {
    let (user, item) = draft.into_item(bounds)?;
    let stored = storage.prepend_history(&user, item.clone())?;
    info!("Saved scan {} for {user} ({stored} in history)", item.id);
    Ok(item)
}

/// Record `draft`, logging instead of surfacing any failure.
pub fn record_best_effort(storage: &AppStorage, draft: HistoryDraft, bounds: ThumbnailBounds) {
    if let Err(err) = record(storage, draft, bounds) {
        warn!("Failed to save scan to history: {err}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::WasteType;
    use image::{ImageFormat, RgbImage};
    use std::io::Cursor;

    fn draft(bytes: Vec<u8>) -> HistoryDraft {
        HistoryDraft {
            user: "ada@example.com".into(),
            image: Arc::new(ImageData::new(bytes, "image/png")),
            results: vec![ClassificationResult {
                item_name: "Bottle".into(),
                waste_type: WasteType::NonBiodegradable,
                recycling_info: "Rinse and recycle.".into(),
                composition: Vec::new(),
            }],
            timestamp: 1_700_000_000_000,
        }
    }

    #[test]
    fn record_prepends_with_thumbnail() {
        let mut png = Cursor::new(Vec::new());
        RgbImage::new(8, 8).write_to(&mut png, ImageFormat::Png).unwrap();

        let storage = AppStorage::in_memory(50);
        let item = record(&storage, draft(png.into_inner()), ThumbnailBounds::default()).unwrap();

        assert!(item.id.starts_with("scan_1700000000000_"));
        assert!(item.thumbnail.starts_with("data:image/jpeg;base64,"));
        assert_eq!(storage.load_history("ada@example.com"), vec![item]);
    }

    #[test]
    fn undecodable_image_is_not_recorded() {
        let storage = AppStorage::in_memory(50);
        let err = record(&storage, draft(vec![0, 1, 2]), ThumbnailBounds::default()).unwrap_err();
        assert!(matches!(err, HistoryError::Thumbnail(_)));
        assert!(storage.load_history("ada@example.com").is_empty());
    }
}
