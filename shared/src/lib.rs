use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// Weather risk for the detected disease, derived from current conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherReport {
    pub temperature: f32,
    pub humidity: f32,
    pub condition: String,
    pub risk_level: RiskLevel,
    pub advice: String,
}

/// Full advisory returned by `POST /api/detection/predict`. Built only after
/// every stage of the detection chain has succeeded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionResponse {
    pub success: bool,
    pub disease: String,
    pub confidence: f32,
    pub heatmap_url: String,
    pub remedies: String,
    pub weather: WeatherReport,
    pub audio_url: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentWeather {
    pub temperature: f32,
    pub humidity: f32,
    pub condition: String,
    pub location: String,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SoilData {
    pub nitrogen: f32,
    pub phosphorus: f32,
    pub potassium: f32,
    pub ph: f32,
    pub moisture: f32,
    pub organic_matter: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum NutrientLevel {
    Low,
    Optimal,
    High,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutrientLevels {
    pub nitrogen: NutrientLevel,
    pub phosphorus: NutrientLevel,
    pub potassium: NutrientLevel,
    pub ph: NutrientLevel,
    pub moisture: NutrientLevel,
    pub organic_matter: NutrientLevel,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FertilizerRecommendation {
    #[serde(rename = "type")]
    pub kind: String,
    pub quantity: f32,
    pub unit: String,
    pub timing: String,
    pub cost: f32,
    pub organic: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoilAnalysisResponse {
    pub success: bool,
    pub soil_health: String,
    pub health_score: u32,
    pub nutrient_levels: NutrientLevels,
    pub fertilizers: Vec<FertilizerRecommendation>,
    pub organic_matter: NutrientLevel,
    pub recommendations: Vec<String>,
    pub total_cost: f32,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricePoint {
    pub date: String,
    pub price: f32,
    pub market: String,
    pub variety: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPoint {
    pub date: String,
    pub predicted_price: f32,
    pub lower_bound: f32,
    pub upper_bound: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricePrediction {
    pub success: bool,
    pub crop: String,
    pub location: String,
    pub historical: Vec<PricePoint>,
    pub forecast: Vec<ForecastPoint>,
    pub insights: Vec<String>,
    pub timestamp: DateTime<Utc>,
}
