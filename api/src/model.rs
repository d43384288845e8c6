//! Payload types exchanged with the classification, REE and material-info
//! collaborators, and persisted inside scan history.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Raw image handed to the collaborators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl ImageData {
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes,
            mime_type: mime_type.into(),
        }
    }

    pub fn to_base64(&self) -> String {
        use base64::{engine::general_purpose::STANDARD, Engine as _};
        STANDARD.encode(&self.bytes)
    }

    /// `data:` URL suitable for an `<img src>` on every platform.
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.to_base64())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum WasteType {
    Biodegradable,
    #[serde(rename = "Non-Biodegradable")]
    NonBiodegradable,
    #[serde(rename = "E-Waste")]
    EWaste,
    Unknown,
}

impl WasteType {
    pub fn label(self) -> &'static str {
        match self {
            WasteType::Biodegradable => "Biodegradable",
            WasteType::NonBiodegradable => "Non-Biodegradable",
            WasteType::EWaste => "E-Waste",
            WasteType::Unknown => "Unknown",
        }
    }
}

impl From<String> for WasteType {
    fn from(raw: String) -> Self {
        let key: String = raw
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "biodegradable" => WasteType::Biodegradable,
            "nonbiodegradable" => WasteType::NonBiodegradable,
            "ewaste" => WasteType::EWaste,
            _ => WasteType::Unknown,
        }
    }
}

impl fmt::Display for WasteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositionItem {
    pub name: String,
    pub value: f64,
}

impl CompositionItem {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    /// Entries must carry a positive, finite share to be kept.
    pub fn is_meaningful(&self) -> bool {
        self.value.is_finite() && self.value > 0.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    pub item_name: String,
    pub waste_type: WasteType,
    pub recycling_info: String,
    #[serde(default)]
    pub composition: Vec<CompositionItem>,
}

impl ClassificationResult {
    /// Drop composition entries with a non-positive (or non-finite) value.
    pub fn sanitized(mut self) -> Self {
        self.composition.retain(CompositionItem::is_meaningful);
        self
    }

    pub fn is_e_waste(&self) -> bool {
        self.waste_type == WasteType::EWaste
    }

    /// Largest composition entry; the first one wins on ties.
    pub fn dominant_material(&self) -> Option<&CompositionItem> {
        self.composition
            .iter()
            .fold(None, |best: Option<&CompositionItem>, item| match best {
                Some(current) if item.value <= current.value => Some(current),
                _ => Some(item),
            })
    }
}

/// Merge every item's composition into percentages of the overall total,
/// keeping first-seen material order.
pub fn aggregate_composition(results: &[ClassificationResult]) -> Vec<CompositionItem> {
    let mut merged: Vec<CompositionItem> = Vec::new();
    let mut total = 0.0;

    for item in results.iter().flat_map(|r| r.composition.iter()) {
        total += item.value;
        match merged.iter_mut().find(|m| m.name == item.name) {
            Some(existing) => existing.value += item.value,
            None => merged.push(item.clone()),
        }
    }

    if total <= 0.0 {
        return Vec::new();
    }

    merged
        .into_iter()
        .map(|m| CompositionItem::new(m.name, m.value / total * 100.0))
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReeResult {
    #[serde(rename = "identifiedREEs", default)]
    pub identified_rees: Vec<String>,
}

impl ReeResult {
    /// Collapse duplicate element names, keeping the first spelling seen.
    pub fn deduplicated(mut self) -> Self {
        let mut seen: Vec<String> = Vec::with_capacity(self.identified_rees.len());
        self.identified_rees.retain(|name| {
            let key = name.trim().to_lowercase();
            if seen.contains(&key) {
                false
            } else {
                seen.push(key);
                true
            }
        });
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialInfoResult {
    pub material_name: String,
    #[serde(default)]
    pub description: Vec<String>,
    #[serde(default)]
    pub environmental_impact: Vec<String>,
    #[serde(default)]
    pub recycling_potential: Vec<String>,
}

/// One archived classification, owned by a single user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanHistoryItem {
    pub id: String,
    /// Epoch milliseconds.
    pub timestamp: i64,
    pub thumbnail: String,
    pub results: Vec<ClassificationResult>,
}

impl ScanHistoryItem {
    pub fn item_names(&self) -> String {
        self.results
            .iter()
            .map(|r| r.item_name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
