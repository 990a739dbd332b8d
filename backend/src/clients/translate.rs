use lazy_static::lazy_static;
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

use super::{ensure_success, ClientError};

#[derive(Debug, Serialize)]
struct TranslationRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranslationBody {
    translated_text: String,
}

lazy_static! {
    /// Offline phrase table used when the translation backend is down.
    static ref FALLBACK_PHRASES: HashMap<&'static str, Vec<(&'static str, &'static str)>> = {
        let mut table = HashMap::new();
        table.insert(
            "hi",
            vec![
                ("water your crops", "अपनी फसलों को पानी दें"),
                ("apply fertilizer", "उर्वरक डालें"),
                ("disease detected", "रोग का पता चला"),
                ("healthy plant", "स्वस्थ पौधा"),
                ("check soil moisture", "मिट्टी की नमी जांचें"),
            ],
        );
        table.insert(
            "bn",
            vec![
                ("water your crops", "আপনার ফসলে জল দিন"),
                ("disease detected", "রোগ শনাক্ত হয়েছে"),
                ("healthy plant", "সুস্থ গাছ"),
            ],
        );
        table.insert(
            "ta",
            vec![
                ("water your crops", "உங்கள் பயிர்களுக்கு தண்ணீர் பாய்ச்சுங்கள்"),
                ("disease detected", "நோய் கண்டறியப்பட்டது"),
                ("healthy plant", "ஆரோக்கியமான செடி"),
            ],
        );
        table
    };
}

/// Proxies text to the translation backend. Upstream failures fall back to
/// the static phrase table, and finally to the untranslated input, so this
/// endpoint never surfaces an error to the client.
#[derive(Clone)]
pub struct Translator {
    http_client: HttpClient,
    base_url: String,
}

impl Translator {
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, ClientError> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            base_url,
        })
    }

    pub async fn translate(&self, text: &str, target_lang: &str) -> String {
        match self.translate_remote(text, target_lang).await {
            Ok(translated) => translated,
            Err(err) => {
                log::warn!(
                    "translation backend failed for target {}: {}; using fallback table",
                    target_lang,
                    err
                );
                lookup_fallback(text, target_lang).unwrap_or_else(|| text.to_string())
            }
        }
    }

    async fn translate_remote(
        &self,
        text: &str,
        target_lang: &str,
    ) -> Result<String, ClientError> {
        let response = self
            .http_client
            .post(format!("{}/translate", self.base_url))
            .json(&TranslationRequest {
                q: text,
                source: "en",
                target: target_lang,
                format: "text",
            })
            .send()
            .await?;

        let body: TranslationBody = ensure_success(response).await?.json().await?;
        Ok(body.translated_text)
    }
}

fn lookup_fallback(text: &str, target_lang: &str) -> Option<String> {
    let needle = text.trim().to_lowercase();
    FALLBACK_PHRASES
        .get(target_lang)?
        .iter()
        .find(|(phrase, _)| *phrase == needle)
        .map(|(_, translated)| translated.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_matches_known_phrase_case_insensitively() {
        let hit = lookup_fallback("Disease Detected", "hi");
        assert_eq!(hit.as_deref(), Some("रोग का पता चला"));
    }

    #[test]
    fn fallback_misses_unknown_phrase() {
        assert!(lookup_fallback("untranslatable sentence", "hi").is_none());
    }

    #[test]
    fn fallback_misses_unknown_language() {
        assert!(lookup_fallback("disease detected", "fr").is_none());
    }
}
