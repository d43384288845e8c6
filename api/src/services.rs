//! Collaborator seams. The controller never talks to a network directly; it
//! hands lookups to whatever implements these traits.

use std::rc::Rc;

use async_trait::async_trait;
use thiserror::Error;

use crate::backend::{BackendArchive, NoopArchive};
use crate::config::ServiceConfig;
use crate::gemini::GeminiClient;
use crate::model::{ClassificationResult, ImageData, MaterialInfoResult, ReeResult};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("{0}")]
    Transport(String),
    #[error("Service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
    #[error("{0} is not configured")]
    NotConfigured(&'static str),
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        ServiceError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(err: serde_json::Error) -> Self {
        ServiceError::MalformedResponse(err.to_string())
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

#[async_trait(?Send)]
pub trait Classifier {
    async fn classify(&self, image: &ImageData) -> ServiceResult<Vec<ClassificationResult>>;
}

#[async_trait(?Send)]
pub trait ReeLookup {
    async fn lookup_rees(&self, image: &ImageData) -> ServiceResult<ReeResult>;
}

#[async_trait(?Send)]
pub trait MaterialCatalog {
    async fn material_info(&self, material_name: &str) -> ServiceResult<MaterialInfoResult>;
}

/// Durable logging of completed lookups. Callers treat every failure as
/// non-fatal.
#[async_trait(?Send)]
pub trait ScanArchive {
    async fn record_scan(
        &self,
        image: &ImageData,
        results: &[ClassificationResult],
    ) -> ServiceResult<()>;

    async fn record_rees(&self, image: &ImageData, result: &ReeResult) -> ServiceResult<()>;

    async fn log_material_lookup(&self, material_name: &str) -> ServiceResult<()>;
}

/// The full set of collaborators the app drives.
#[derive(Clone)]
pub struct Services {
    pub classifier: Rc<dyn Classifier>,
    pub rees: Rc<dyn ReeLookup>,
    pub materials: Rc<dyn MaterialCatalog>,
    pub archive: Rc<dyn ScanArchive>,
}

impl Services {
    pub fn from_config(config: &ServiceConfig) -> Self {
        let gemini = Rc::new(GeminiClient::new(config));
        let archive: Rc<dyn ScanArchive> = match config.backend_url.as_deref() {
            Some(url) => Rc::new(BackendArchive::new(url)),
            None => Rc::new(NoopArchive),
        };

        Self {
            classifier: gemini.clone(),
            rees: gemini.clone(),
            materials: gemini,
            archive,
        }
    }
}
