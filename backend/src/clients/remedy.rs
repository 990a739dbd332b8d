use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{ensure_success, ClientError, RemedyGenerator};

#[derive(Debug, Serialize)]
struct RemedyRequest<'a> {
    disease: &'a str,
    confidence: f32,
}

#[derive(Debug, Deserialize)]
struct RemedyBody {
    remedies: String,
}

/// Client for the language-model service that writes treatment advice for a
/// detected disease.
#[derive(Clone)]
pub struct HttpRemedyGenerator {
    http_client: HttpClient,
    base_url: String,
    api_key: String,
}

impl HttpRemedyGenerator {
    pub fn new(base_url: String, api_key: String, timeout: Duration) -> Result<Self, ClientError> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            base_url,
            api_key,
        })
    }
}

#[async_trait]
impl RemedyGenerator for HttpRemedyGenerator {
    async fn remedies(&self, disease: &str, confidence: f32) -> Result<String, ClientError> {
        let response = self
            .http_client
            .post(format!("{}/remedies", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&RemedyRequest {
                disease,
                confidence,
            })
            .send()
            .await?;

        let body: RemedyBody = ensure_success(response).await?.json().await?;
        if body.remedies.trim().is_empty() {
            return Err(ClientError::Decode(
                "remedy service returned an empty advisory".to_string(),
            ));
        }
        Ok(body.remedies)
    }
}
