use chrono::Utc;
use shared::{DetectionResponse, WeatherReport};
use std::fmt;
use std::sync::Arc;

use crate::clients::{
    ClientError, RemedyGenerator, SpeechSynthesizer, VisionClassifier, WeatherAdvisor,
};

/// Identifies which step of the detection chain failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Vision,
    Remedy,
    Weather,
    Speech,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Vision => "vision classification",
            Stage::Remedy => "remedy generation",
            Stage::Weather => "weather advisory",
            Stage::Speech => "speech synthesis",
        };
        f.write_str(name)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DetectionError {
    #[error("No image file provided")]
    MissingImage,
    #[error("Only image files are allowed")]
    UnsupportedImage,
    #[error("{stage} stage failed: {source}")]
    Stage { stage: Stage, source: ClientError },
}

impl DetectionError {
    fn stage(stage: Stage, source: ClientError) -> Self {
        Self::Stage { stage, source }
    }

    /// Input errors map to 400, stage failures to 500.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Stage { .. })
    }
}

/// Runs the four-stage detection chain. Stages are strictly sequential and
/// the chain aborts on the first failure; a `DetectionResponse` exists only
/// when every stage has succeeded.
pub struct DetectionOrchestrator {
    vision: Arc<dyn VisionClassifier>,
    remedy: Arc<dyn RemedyGenerator>,
    weather: Arc<dyn WeatherAdvisor>,
    tts: Arc<dyn SpeechSynthesizer>,
    default_location: String,
}

impl DetectionOrchestrator {
    pub fn new(
        vision: Arc<dyn VisionClassifier>,
        remedy: Arc<dyn RemedyGenerator>,
        weather: Arc<dyn WeatherAdvisor>,
        tts: Arc<dyn SpeechSynthesizer>,
        default_location: String,
    ) -> Self {
        Self {
            vision,
            remedy,
            weather,
            tts,
            default_location,
        }
    }

    pub async fn run(
        &self,
        image: &[u8],
        location: Option<&str>,
    ) -> Result<DetectionResponse, DetectionError> {
        if image.is_empty() {
            return Err(DetectionError::MissingImage);
        }
        if image::guess_format(image).is_err() {
            return Err(DetectionError::UnsupportedImage);
        }

        let location = location
            .filter(|l| !l.trim().is_empty())
            .unwrap_or(&self.default_location);

        log::info!("Running disease detection for location: {}", location);
        let outcome = self
            .vision
            .classify(image)
            .await
            .map_err(|e| DetectionError::stage(Stage::Vision, e))?;
        log::info!(
            "Detected {} at {:.1}% confidence",
            outcome.disease,
            outcome.confidence
        );

        let remedies = self
            .remedy
            .remedies(&outcome.disease, outcome.confidence)
            .await
            .map_err(|e| DetectionError::stage(Stage::Remedy, e))?;

        // Depends on the detected disease, so it cannot start before the
        // vision stage. It is kept after the remedy stage to preserve the
        // original request ordering.
        let weather = self
            .weather
            .advise(location, &outcome.disease)
            .await
            .map_err(|e| DetectionError::stage(Stage::Weather, e))?;

        let summary = compose_summary(&outcome.disease, outcome.confidence, &remedies, &weather);

        let audio_url = self
            .tts
            .synthesize(&summary, "en")
            .await
            .map_err(|e| DetectionError::stage(Stage::Speech, e))?;

        Ok(DetectionResponse {
            success: true,
            disease: outcome.disease,
            confidence: outcome.confidence,
            heatmap_url: outcome.heatmap_url,
            remedies,
            weather,
            audio_url,
            timestamp: Utc::now(),
        })
    }
}

pub(crate) fn compose_summary(
    disease: &str,
    confidence: f32,
    remedies: &str,
    weather: &WeatherReport,
) -> String {
    format!(
        "Disease Detected: {disease} with {confidence:.0}% confidence.\n\n\
         {remedies}\n\n\
         Weather Advisory: {advice}\n\
         Current conditions: Temperature {temperature}°C, Humidity {humidity}%, {condition}.\n\
         Risk Level: {risk}",
        advice = weather.advice,
        temperature = weather.temperature,
        humidity = weather.humidity,
        condition = weather.condition,
        risk = weather.risk_level,
    )
}
