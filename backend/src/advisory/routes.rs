use actix_web::{web, HttpResponse, Result};
use chrono::Utc;
use log::error;
use serde::Deserialize;
use serde_json::json;
use shared::{SoilAnalysisResponse, SoilData};

use super::{prices, soil};

/// `POST /api/soil/analyze`. Fields are checked by name before parsing so
/// the error can say which one is missing.
pub async fn analyze_soil(body: web::Json<serde_json::Value>) -> Result<HttpResponse> {
    let body = body.into_inner();
    for field in soil::REQUIRED_FIELDS {
        if body.get(field).and_then(|v| v.as_f64()).is_none() {
            return Ok(HttpResponse::BadRequest().json(json!({
                "error": format!("Missing required field: {field}")
            })));
        }
    }

    let data: SoilData = match serde_json::from_value(body) {
        Ok(data) => data,
        Err(e) => {
            return Ok(HttpResponse::BadRequest().json(json!({
                "error": format!("Invalid soil data: {e}")
            })));
        }
    };

    let analysis = soil::analyze(&data);
    let (fertilizers, recommendations) = soil::recommend_fertilizers(&data, &analysis.levels);
    let total_cost: f32 = fertilizers.iter().map(|f| f.cost).sum();

    Ok(HttpResponse::Ok().json(SoilAnalysisResponse {
        success: true,
        soil_health: analysis.health,
        health_score: analysis.score,
        organic_matter: analysis.levels.organic_matter,
        nutrient_levels: analysis.levels,
        fertilizers,
        recommendations,
        total_cost,
        timestamp: Utc::now(),
    }))
}

/// `POST /api/soil/fertilizer/{crop_type}`. Absent nutrient values default
/// to zero, which reads as fully depleted soil.
pub async fn fertilizer_plan(
    path: web::Path<String>,
    body: web::Json<SoilData>,
) -> Result<HttpResponse> {
    let crop_type = path.into_inner();
    let plan = soil::crop_fertilizer_plan(&crop_type, &body);

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "crop": crop_type,
        "recommendations": plan,
    })))
}

#[derive(Debug, Deserialize)]
pub struct PredictQuery {
    #[serde(default = "default_price_location")]
    pub location: String,
}

fn default_price_location() -> String {
    "Delhi".to_string()
}

/// `GET /api/prices/predict/{crop_id}?location=`.
pub async fn predict_prices(
    path: web::Path<String>,
    query: web::Query<PredictQuery>,
) -> Result<HttpResponse> {
    let crop_id = path.into_inner();
    log::info!("Predicting prices for {} in {}", crop_id, query.location);

    match prices::predict(&crop_id, &query.location) {
        Some(prediction) => Ok(HttpResponse::Ok().json(prediction)),
        None => {
            error!("Price prediction requested for unknown crop: {}", crop_id);
            Ok(HttpResponse::NotFound().json(json!({
                "error": format!("Unknown crop: {crop_id}")
            })))
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct HistoricalQuery {
    #[serde(default = "default_days")]
    pub days: u32,
}

fn default_days() -> u32 {
    30
}

/// `GET /api/prices/historical/{crop_id}?days=`.
pub async fn historical_prices(
    path: web::Path<String>,
    query: web::Query<HistoricalQuery>,
) -> Result<HttpResponse> {
    let crop_id = path.into_inner();
    match prices::historical_prices(&crop_id, query.days) {
        Some(data) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "crop": crop_id,
            "data": data,
            "period": format!("{} days", query.days),
        }))),
        None => Ok(HttpResponse::NotFound().json(json!({
            "error": format!("Unknown crop: {crop_id}")
        }))),
    }
}
