//! Google Gemini client for classification, REE lookup and material info.
//!
//! Every call asks for `application/json` output constrained by a response
//! schema, then parses the candidate text into the typed payloads.

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, error, warn};

use crate::config::ServiceConfig;
use crate::model::{ClassificationResult, ImageData, MaterialInfoResult, ReeResult};
use crate::services::{
    Classifier, MaterialCatalog, ReeLookup, ServiceError, ServiceResult,
};

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

const CLASSIFY_PROMPT: &str = "Identify all distinct waste items in the image. For each item return \
its short name, its waste type (Biodegradable, Non-Biodegradable or E-Waste), recycling or disposal \
instructions, and its material composition as named percentages.";

const REE_PROMPT: &str = "Identify the Rare Earth Elements likely present in the electronic waste \
shown in this image. Return a JSON object with an identifiedREEs array of element names.";

#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    Inline {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
    Text {
        text: String,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: Value,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
    #[serde(default, rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

impl GeminiClient {
    pub fn new(config: &ServiceConfig) -> Self {
        if config.gemini_api_key.is_none() {
            warn!("Gemini API key not set; classification requests will fail");
        }
        Self {
            client: Client::new(),
            api_key: config.gemini_api_key.clone(),
            model: config.gemini_model.clone(),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Point the client at a different host (proxies, local fakes).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/{}:generateContent", self.base_url, self.model)
    }

    async fn generate(&self, parts: Vec<Part>, schema: Value) -> ServiceResult<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ServiceError::NotConfigured("Gemini API key"))?;

        let body = GenerateRequest {
            contents: vec![Content { parts }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: schema,
            },
        };

        let url = self.endpoint();
        debug!("Sending Gemini request to {url}");

        let response = self
            .client
            .post(&url)
            .query(&[("key", api_key)])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            error!("Gemini API error: {status} - {text}");
            return Err(ServiceError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        candidate_text(&text)
    }
}

fn image_part(image: &ImageData) -> Part {
    Part::Inline {
        inline_data: InlineData {
            mime_type: image.mime_type.clone(),
            data: image.to_base64(),
        },
    }
}

fn text_part(text: impl Into<String>) -> Part {
    Part::Text { text: text.into() }
}

/// Concatenate the text parts of the first candidate.
fn candidate_text(raw: &str) -> ServiceResult<String> {
    let response: GenerateResponse = serde_json::from_str(raw)?;
    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| ServiceError::MalformedResponse("no candidates in response".into()))?;

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        let reason = candidate.finish_reason.unwrap_or_else(|| "unknown".into());
        return Err(ServiceError::MalformedResponse(format!(
            "empty candidate (finish reason: {reason})"
        )));
    }
    Ok(text)
}

/// Strip an optional markdown code fence around a JSON body.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

fn parse_json<T: DeserializeOwned>(text: &str) -> ServiceResult<T> {
    Ok(serde_json::from_str(strip_code_fence(text))?)
}

pub fn parse_classifications(text: &str) -> ServiceResult<Vec<ClassificationResult>> {
    let value: Value = parse_json(text)?;
    if !value.is_array() {
        return Err(ServiceError::MalformedResponse(
            "expected an array of classified items".into(),
        ));
    }
    let results: Vec<ClassificationResult> = serde_json::from_value(value)?;
    Ok(results.into_iter().map(ClassificationResult::sanitized).collect())
}

pub fn parse_ree_result(text: &str) -> ServiceResult<ReeResult> {
    parse_json::<ReeResult>(text).map(ReeResult::deduplicated)
}

pub fn parse_material_info(text: &str) -> ServiceResult<MaterialInfoResult> {
    parse_json(text)
}

fn classification_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "itemName": { "type": "STRING", "description": "Short name of the item" },
                "wasteType": {
                    "type": "STRING",
                    "description": "Type of waste",
                    "enum": ["Biodegradable", "Non-Biodegradable", "E-Waste"]
                },
                "recyclingInfo": { "type": "STRING", "description": "Recycling/disposal instructions" },
                "composition": {
                    "type": "ARRAY",
                    "description": "Material composition",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "name": { "type": "STRING" },
                            "value": { "type": "NUMBER" }
                        },
                        "required": ["name", "value"]
                    }
                }
            },
            "required": ["itemName", "wasteType", "recyclingInfo", "composition"]
        }
    })
}

fn ree_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "identifiedREEs": { "type": "ARRAY", "items": { "type": "STRING" } }
        },
        "required": ["identifiedREEs"]
    })
}

fn material_info_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "materialName": { "type": "STRING" },
            "description": { "type": "ARRAY", "items": { "type": "STRING" } },
            "environmentalImpact": { "type": "ARRAY", "items": { "type": "STRING" } },
            "recyclingPotential": { "type": "ARRAY", "items": { "type": "STRING" } }
        },
        "required": ["materialName", "description", "environmentalImpact", "recyclingPotential"]
    })
}

#[async_trait(?Send)]
impl Classifier for GeminiClient {
    async fn classify(&self, image: &ImageData) -> ServiceResult<Vec<ClassificationResult>> {
        let text = self
            .generate(vec![image_part(image), text_part(CLASSIFY_PROMPT)], classification_schema())
            .await?;
        parse_classifications(&text).inspect_err(|err| error!("Error classifying waste: {err}"))
    }
}

#[async_trait(?Send)]
impl ReeLookup for GeminiClient {
    async fn lookup_rees(&self, image: &ImageData) -> ServiceResult<ReeResult> {
        let text = self
            .generate(vec![image_part(image), text_part(REE_PROMPT)], ree_schema())
            .await?;
        parse_ree_result(&text).inspect_err(|err| error!("Error looking up REEs: {err}"))
    }
}

#[async_trait(?Send)]
impl MaterialCatalog for GeminiClient {
    async fn material_info(&self, material_name: &str) -> ServiceResult<MaterialInfoResult> {
        let prompt = format!(
            "Provide material information for '{material_name}'. Return JSON with the material \
             name and description, environmentalImpact and recyclingPotential arrays of short \
             bullet points."
        );
        let text = self
            .generate(vec![text_part(prompt)], material_info_schema())
            .await?;
        parse_material_info(&text)
            .inspect_err(|err| error!("Error fetching material info for {material_name}: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::WasteType;

    #[test]
    fn candidate_text_joins_parts() {
        let raw = json!({
            "candidates": [{
                "content": { "parts": [{ "text": "[{\"itemName\":" }, { "text": "\"Can\"}]" }] },
                "finishReason": "STOP"
            }]
        })
        .to_string();
        assert_eq!(candidate_text(&raw).unwrap(), "[{\"itemName\":\"Can\"}]");
    }

    #[test]
    fn empty_candidates_are_malformed() {
        let err = candidate_text(r#"{"candidates": []}"#).unwrap_err();
        assert!(matches!(err, ServiceError::MalformedResponse(_)));

        let blocked = json!({ "candidates": [{ "finishReason": "SAFETY" }] }).to_string();
        let err = candidate_text(&blocked).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Malformed response: empty candidate (finish reason: SAFETY)"
        );
    }

    #[test]
    fn classifications_are_sanitized() {
        let text = r#"```json
        [{"itemName": "Laptop", "wasteType": "E-Waste", "recyclingInfo": "Take to an e-waste depot.",
          "composition": [{"name": "Aluminium", "value": 45}, {"name": "Lithium", "value": 0}]}]
        ```"#;
        let results = parse_classifications(text).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].waste_type, WasteType::EWaste);
        assert_eq!(results[0].composition.len(), 1);
        assert_eq!(results[0].composition[0].name, "Aluminium");
    }

    #[test]
    fn non_array_classification_is_rejected() {
        let err = parse_classifications(r#"{"itemName": "Laptop"}"#).unwrap_err();
        assert!(matches!(err, ServiceError::MalformedResponse(_)));
    }

    #[test]
    fn material_info_parses() {
        let info = parse_material_info(
            r#"{"materialName": "PET", "description": ["Clear plastic"],
                "environmentalImpact": ["Persists for centuries"], "recyclingPotential": ["High"]}"#,
        )
        .unwrap();
        assert_eq!(info.material_name, "PET");
        assert_eq!(info.recycling_potential, vec!["High"]);
    }

    #[test]
    fn missing_key_fails_before_network() {
        let client = GeminiClient::new(&ServiceConfig::default());
        let image = ImageData::new(vec![1, 2, 3], "image/png");
        let err = futures::executor::block_on(client.classify(&image)).unwrap_err();
        assert_eq!(err, ServiceError::NotConfigured("Gemini API key"));
        assert_eq!(err.to_string(), "Gemini API key is not configured");
    }

    #[test]
    fn base_url_override_drops_trailing_slashes() {
        let config = ServiceConfig {
            gemini_model: "gemini-test".to_string(),
            ..ServiceConfig::default()
        };
        let client = GeminiClient::new(&config).with_base_url("http://127.0.0.1:8080/v1beta/models//");
        assert_eq!(
            client.endpoint(),
            "http://127.0.0.1:8080/v1beta/models/gemini-test:generateContent"
        );
        assert!(GeminiClient::new(&config).endpoint().starts_with(BASE_URL));
    }
}
