//! Best-effort scan archive backed by the EcoSort HTTP backend.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use crate::model::{ClassificationResult, ImageData, ReeResult};
use crate::services::{ScanArchive, ServiceError, ServiceResult};

#[derive(Debug, Clone)]
pub struct BackendArchive {
    client: Client,
    base_url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ScanUpload<'a, T: Serialize> {
    mime_type: &'a str,
    image: String,
    payload: &'a T,
}

impl BackendArchive {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn post<T: Serialize + ?Sized>(
        &self,
        path: &str,
        image: &ImageData,
        payload: &T,
    ) -> ServiceResult<()> {
        let url = self.endpoint(path);
        debug!("Archiving to {url}");
        let body = ScanUpload {
            mime_type: &image.mime_type,
            image: image.to_base64(),
            payload: &payload,
        };
        let response = self.client.post(&url).json(&body).send().await?;
        check_status(response).await
    }
}

async fn check_status(response: reqwest::Response) -> ServiceResult<()> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }
    let body = response.text().await.unwrap_or_default();
    Err(ServiceError::Status {
        status: status.as_u16(),
        body,
    })
}

#[async_trait(?Send)]
impl ScanArchive for BackendArchive {
    async fn record_scan(
        &self,
        image: &ImageData,
        results: &[ClassificationResult],
    ) -> ServiceResult<()> {
        self.post("classify", image, results).await
    }

    async fn record_rees(&self, image: &ImageData, result: &ReeResult) -> ServiceResult<()> {
        self.post("ree", image, result).await
    }

    async fn log_material_lookup(&self, material_name: &str) -> ServiceResult<()> {
        let url = self.endpoint("material-info");
        let response = self
            .client
            .get(&url)
            .query(&[("name", material_name)])
            .send()
            .await?;
        check_status(response).await
    }
}

/// Archive used when no backend is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopArchive;

#[async_trait(?Send)]
impl ScanArchive for NoopArchive {
    async fn record_scan(&self, _: &ImageData, _: &[ClassificationResult]) -> ServiceResult<()> {
        Ok(())
    }

    async fn record_rees(&self, _: &ImageData, _: &ReeResult) -> ServiceResult<()> {
        Ok(())
    }

    async fn log_material_lookup(&self, _: &str) -> ServiceResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_join_without_double_slash() {
        let archive = BackendArchive::new("http://localhost:8080/");
        assert_eq!(archive.endpoint("ree"), "http://localhost:8080/ree");
    }

    #[test]
    fn upload_body_is_camel_case() {
        let image = ImageData::new(vec![0xff, 0xd8], "image/jpeg");
        let rees = ReeResult {
            identified_rees: vec!["Neodymium".into()],
        };
        let body = serde_json::to_value(ScanUpload {
            mime_type: &image.mime_type,
            image: image.to_base64(),
            payload: &rees,
        })
        .unwrap();
        assert_eq!(body["mimeType"], "image/jpeg");
        assert_eq!(body["image"], "/9g=");
        assert_eq!(body["payload"]["identifiedREEs"][0], "Neodymium");
    }
}
