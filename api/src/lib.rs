//! Collaborators for EcoSort: payload types, the Gemini client, the scan
//! archive backend and their configuration.

pub mod backend;
pub mod config;
pub mod gemini;
pub mod model;
pub mod services;

pub use config::ServiceConfig;
pub use model::{
    aggregate_composition, ClassificationResult, CompositionItem, ImageData, MaterialInfoResult,
    ReeResult, ScanHistoryItem, WasteType,
};
pub use services::{
    Classifier, MaterialCatalog, ReeLookup, ScanArchive, ServiceError, ServiceResult, Services,
};
