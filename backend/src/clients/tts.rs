use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{ensure_success, ClientError, SpeechSynthesizer};

#[derive(Debug, Serialize)]
struct SynthesisRequest<'a> {
    text: &'a str,
    language: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SynthesisBody {
    audio_url: String,
}

/// Client for the text-to-speech service that voices the final advisory.
#[derive(Clone)]
pub struct HttpSpeechSynthesizer {
    http_client: HttpClient,
    base_url: String,
}

impl HttpSpeechSynthesizer {
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, ClientError> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            base_url,
        })
    }
}

#[async_trait]
impl SpeechSynthesizer for HttpSpeechSynthesizer {
    async fn synthesize(&self, text: &str, language: &str) -> Result<String, ClientError> {
        let response = self
            .http_client
            .post(format!("{}/synthesize", self.base_url))
            .json(&SynthesisRequest { text, language })
            .send()
            .await?;

        let body: SynthesisBody = ensure_success(response).await?.json().await?;
        if body.audio_url.is_empty() {
            return Err(ClientError::Decode(
                "speech service returned an empty audio url".to_string(),
            ));
        }
        Ok(body.audio_url)
    }
}
