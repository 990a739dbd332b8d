use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::Deserialize;
use shared::{CurrentWeather, RiskLevel, WeatherReport};
use std::time::Duration;
use url::Url;

use super::{ensure_success, ClientError, WeatherAdvisor};

#[derive(Debug, Deserialize)]
struct ProviderBody {
    main: ProviderMain,
    weather: Vec<ProviderCondition>,
    name: String,
}

#[derive(Debug, Deserialize)]
struct ProviderMain {
    temp: f32,
    humidity: f32,
}

#[derive(Debug, Deserialize)]
struct ProviderCondition {
    main: String,
}

/// Fetches current conditions from the weather provider and derives a
/// disease-specific risk advisory from them.
#[derive(Clone)]
pub struct HttpWeatherAdvisor {
    http_client: HttpClient,
    base_url: String,
    api_key: String,
}

impl HttpWeatherAdvisor {
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
impl WeatherAdvisor for HttpWeatherAdvisor {
    async fn current(&self, location: &str) -> Result<CurrentWeather, ClientError> {
        let mut url = Url::parse(&format!("{}/data/2.5/weather", self.base_url))?;
        url.query_pairs_mut()
            .append_pair("q", location)
            .append_pair("units", "metric")
            .append_pair("appid", &self.api_key);

        let response = self.http_client.get(url).send().await?;
        let body: ProviderBody = ensure_success(response).await?.json().await?;

        let condition = body
            .weather
            .first()
            .map(|w| w.main.clone())
            .ok_or_else(|| {
                ClientError::Decode("weather provider returned no condition".to_string())
            })?;

        Ok(CurrentWeather {
            temperature: body.main.temp,
            humidity: body.main.humidity,
            condition,
            location: body.name,
        })
    }

    async fn advise(&self, location: &str, disease: &str) -> Result<WeatherReport, ClientError> {
        let current = self.current(location).await?;
        let (risk_level, advice) = assess_risk(disease, &current);
        Ok(WeatherReport {
            temperature: current.temperature,
            humidity: current.humidity,
            condition: current.condition,
            risk_level,
            advice,
        })
    }
}

const FUNGAL_MARKERS: [&str; 6] = ["blight", "mildew", "rust", "spot", "mold", "rot"];
const WET_CONDITIONS: [&str; 4] = ["rain", "drizzle", "thunderstorm", "humid"];

/// Risk rules: moisture drives fungal spread, so high humidity or active
/// precipitation raises the level, and known moisture-loving diseases raise
/// it again.
pub fn assess_risk(disease: &str, current: &CurrentWeather) -> (RiskLevel, String) {
    let disease_lower = disease.to_lowercase();
    let condition_lower = current.condition.to_lowercase();

    let fungal = FUNGAL_MARKERS.iter().any(|m| disease_lower.contains(m));
    let wet = WET_CONDITIONS.iter().any(|c| condition_lower.contains(c));

    let mut score = 0u8;
    if current.humidity >= 60.0 {
        score += 1;
    }
    if current.humidity >= 80.0 {
        score += 1;
    }
    if wet {
        score += 1;
    }
    if fungal && current.humidity >= 55.0 {
        score += 1;
    }

    let risk_level = match score {
        0 => RiskLevel::Low,
        1 => RiskLevel::Moderate,
        _ => RiskLevel::High,
    };

    let advice = match risk_level {
        RiskLevel::High => format!(
            "Current conditions strongly favor the spread of {}. Avoid overhead \
             irrigation, improve airflow around plants and apply treatment within 24 hours.",
            disease
        ),
        RiskLevel::Moderate => format!(
            "Conditions are somewhat favorable for {}. Monitor the crop daily and \
             treat at the first sign of spread.",
            disease
        ),
        RiskLevel::Low => format!(
            "Current weather is unfavorable for the spread of {}. Continue routine \
             monitoring.",
            disease
        ),
    };

    (risk_level, advice)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weather(humidity: f32, condition: &str) -> CurrentWeather {
        CurrentWeather {
            temperature: 24.0,
            humidity,
            condition: condition.to_string(),
            location: "Pune".to_string(),
        }
    }

    #[test]
    fn dry_weather_is_low_risk() {
        let (risk, advice) = assess_risk("Healthy", &weather(35.0, "Clear"));
        assert_eq!(risk, RiskLevel::Low);
        assert!(advice.contains("Healthy"));
    }

    #[test]
    fn humid_weather_raises_risk_for_fungal_disease() {
        let (risk, _) = assess_risk("Early Blight", &weather(85.0, "Clouds"));
        assert_eq!(risk, RiskLevel::High);
    }

    #[test]
    fn rain_alone_is_moderate_for_non_fungal_disease() {
        let (risk, _) = assess_risk("Mosaic Virus", &weather(40.0, "Rain"));
        assert_eq!(risk, RiskLevel::Moderate);
    }

    #[test]
    fn advice_names_the_disease() {
        let (_, advice) = assess_risk("Late Blight", &weather(90.0, "Rain"));
        assert!(advice.contains("Late Blight"));
    }
}
