use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::Deserialize;
use std::time::Duration;

use super::{ensure_success, ClientError, VisionClassifier, VisionOutcome};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PredictionBody {
    disease: String,
    confidence: f32,
    heatmap_url: String,
}

/// Client for the external leaf-image classification service.
#[derive(Clone)]
pub struct HttpVisionClassifier {
    http_client: HttpClient,
    base_url: String,
}

impl HttpVisionClassifier {
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, ClientError> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            base_url,
        })
    }
}

#[async_trait]
impl VisionClassifier for HttpVisionClassifier {
    async fn classify(&self, image: &[u8]) -> Result<VisionOutcome, ClientError> {
        let part = reqwest::multipart::Part::bytes(image.to_vec())
            .file_name("leaf.jpg")
            .mime_str("application/octet-stream")?;
        let form = reqwest::multipart::Form::new().part("image", part);

        let response = self
            .http_client
            .post(format!("{}/predict", self.base_url))
            .multipart(form)
            .send()
            .await?;

        let body: PredictionBody = ensure_success(response).await?.json().await?;
        if body.disease.is_empty() {
            return Err(ClientError::Decode(
                "classifier returned an empty disease label".to_string(),
            ));
        }

        Ok(VisionOutcome {
            disease: body.disease,
            confidence: body.confidence.clamp(0.0, 100.0),
            heatmap_url: body.heatmap_url,
        })
    }
}
