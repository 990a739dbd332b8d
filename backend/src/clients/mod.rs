pub mod remedy;
pub mod translate;
pub mod tts;
pub mod vision;
pub mod weather;

use async_trait::async_trait;
use shared::{CurrentWeather, WeatherReport};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("URL parsing failed: {0}")]
    Url(#[from] url::ParseError),
    #[error("upstream returned status {status}: {body}")]
    UpstreamStatus { status: u16, body: String },
    #[error("unexpected upstream payload: {0}")]
    Decode(String),
}

/// Reads the body of a failed response so the status and upstream message
/// survive into the error.
pub(crate) async fn ensure_success(
    response: reqwest::Response,
) -> Result<reqwest::Response, ClientError> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    Err(ClientError::UpstreamStatus { status, body })
}

#[derive(Debug, Clone)]
pub struct VisionOutcome {
    pub disease: String,
    pub confidence: f32,
    pub heatmap_url: String,
}

#[async_trait]
pub trait VisionClassifier: Send + Sync {
    async fn classify(&self, image: &[u8]) -> Result<VisionOutcome, ClientError>;
}

#[async_trait]
pub trait RemedyGenerator: Send + Sync {
    async fn remedies(&self, disease: &str, confidence: f32) -> Result<String, ClientError>;
}

#[async_trait]
pub trait WeatherAdvisor: Send + Sync {
    async fn current(&self, location: &str) -> Result<CurrentWeather, ClientError>;
    async fn advise(&self, location: &str, disease: &str) -> Result<WeatherReport, ClientError>;
}

#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(&self, text: &str, language: &str) -> Result<String, ClientError>;
}
