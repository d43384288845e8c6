//! Async lookups dispatched by the controller.
//!
//! The controller never awaits. It hands out a [`Lookup`], the caller runs it
//! against the [`Services`] and feeds the [`Settled`] outcome back through
//! `AppController::apply`. Each lookup carries the [`Ticket`] it was issued
//! under so late outcomes can be recognised.

use std::sync::Arc;

use api::{
    ClassificationResult, ImageData, MaterialInfoResult, ReeResult, ScanArchive, ServiceResult,
    Services,
};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(pub(crate) u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
    Classification,
    Rees,
    MaterialInfo,
}

#[derive(Debug, Clone)]
pub enum Lookup {
    Classify {
        ticket: Ticket,
        image: Arc<ImageData>,
    },
    Rees {
        ticket: Ticket,
        image: Arc<ImageData>,
    },
    MaterialInfo {
        ticket: Ticket,
        material: String,
    },
}

#[derive(Debug, Clone)]
pub enum Settled {
    Classified {
        ticket: Ticket,
        outcome: ServiceResult<Vec<ClassificationResult>>,
    },
    Rees {
        ticket: Ticket,
        outcome: ServiceResult<ReeResult>,
    },
    MaterialInfo {
        ticket: Ticket,
        outcome: ServiceResult<MaterialInfoResult>,
    },
}

impl Settled {
    pub fn ticket(&self) -> Ticket {
        match self {
            Settled::Classified { ticket, .. }
            | Settled::Rees { ticket, .. }
            | Settled::MaterialInfo { ticket, .. } => *ticket,
        }
    }

    pub fn kind(&self) -> LookupKind {
        match self {
            Settled::Classified { .. } => LookupKind::Classification,
            Settled::Rees { .. } => LookupKind::Rees,
            Settled::MaterialInfo { .. } => LookupKind::MaterialInfo,
        }
    }
}

/// Follow-up for the best-effort scan archive.
#[derive(Debug, Clone)]
pub enum ArchiveJob {
    Scan {
        image: Arc<ImageData>,
        results: Vec<ClassificationResult>,
    },
    Rees {
        image: Arc<ImageData>,
        result: ReeResult,
    },
    Material {
        name: String,
    },
}

impl ArchiveJob {
    /// Failures are logged and swallowed.
    pub async fn run(self, archive: &dyn ScanArchive) {
        let (what, outcome) = match &self {
            ArchiveJob::Scan { image, results } => {
                ("classification", archive.record_scan(image, results).await)
            }
            ArchiveJob::Rees { image, result } => ("REE result", archive.record_rees(image, result).await),
            ArchiveJob::Material { name } => {
                ("material lookup", archive.log_material_lookup(name).await)
            }
        };
        match outcome {
            Ok(()) => debug!("Archived {what}"),
            Err(err) => warn!("Failed to archive {what}: {err}"),
        }
    }
}

impl Lookup {
    pub fn ticket(&self) -> Ticket {
        match self {
            Lookup::Classify { ticket, .. }
            | Lookup::Rees { ticket, .. }
            | Lookup::MaterialInfo { ticket, .. } => *ticket,
        }
    }

    pub fn kind(&self) -> LookupKind {
        match self {
            Lookup::Classify { .. } => LookupKind::Classification,
            Lookup::Rees { .. } => LookupKind::Rees,
            Lookup::MaterialInfo { .. } => LookupKind::MaterialInfo,
        }
    }

    /// Call the collaborator. Also returns the archive follow-up for a
    /// successful lookup.
    pub async fn run(self, services: &Services) -> (Settled, Option<ArchiveJob>) {
        match self {
            Lookup::Classify { ticket, image } => {
                let outcome = services.classifier.classify(&image).await;
                let job = match &outcome {
                    Ok(results) if !results.is_empty() => Some(ArchiveJob::Scan {
                        image,
                        results: results.clone(),
                    }),
                    _ => None,
                };
                (Settled::Classified { ticket, outcome }, job)
            }
            Lookup::Rees { ticket, image } => {
                let outcome = services.rees.lookup_rees(&image).await;
                let job = outcome.as_ref().ok().map(|result| ArchiveJob::Rees {
                    image,
                    result: result.clone(),
                });
                (Settled::Rees { ticket, outcome }, job)
            }
            Lookup::MaterialInfo { ticket, material } => {
                let outcome = services.materials.material_info(&material).await;
                let job = outcome
                    .is_ok()
                    .then(|| ArchiveJob::Material { name: material });
                (Settled::MaterialInfo { ticket, outcome }, job)
            }
        }
    }
}
