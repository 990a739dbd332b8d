use actix_files::Files;
use actix_web::{web, HttpResponse, Result};
use chrono::Utc;
use log::error;
use serde::Deserialize;
use serde_json::json;

use crate::advisory;
use crate::auth;
use crate::auth::middleware::AuthMiddleware;
use crate::clients::translate::Translator;
use crate::clients::WeatherAdvisor;
use crate::detection;

pub fn configure_routes(
    cfg: &mut web::ServiceConfig,
    static_dir: String,
    auth_middleware: AuthMiddleware,
) {
    cfg.service(
        web::scope("/api")
            .service(
                web::resource("/detection/predict")
                    .route(web::post().to(detection::routes::predict)),
            )
            .service(
                web::scope("/auth")
                    .service(
                        web::resource("/register").route(web::post().to(auth::routes::register)),
                    )
                    .service(web::resource("/login").route(web::post().to(auth::routes::login)))
                    .service(
                        web::resource("/profile")
                            .wrap(auth_middleware)
                            .route(web::get().to(auth::routes::profile)),
                    ),
            )
            .service(
                web::resource("/prices/predict/{crop_id}")
                    .route(web::get().to(advisory::routes::predict_prices)),
            )
            .service(
                web::resource("/prices/historical/{crop_id}")
                    .route(web::get().to(advisory::routes::historical_prices)),
            )
            .service(
                web::resource("/soil/analyze")
                    .route(web::post().to(advisory::routes::analyze_soil)),
            )
            .service(
                web::resource("/soil/fertilizer/{crop_type}")
                    .route(web::post().to(advisory::routes::fertilizer_plan)),
            )
            .service(web::resource("/translate").route(web::post().to(translate_text)))
            .service(
                web::resource("/weather/current/{location}")
                    .route(web::get().to(current_weather)),
            ),
    )
    .service(web::resource("/health").route(web::get().to(health)))
    .service(Files::new("/static", static_dir));
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "timestamp": Utc::now(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn current_weather(
    advisor: web::Data<dyn WeatherAdvisor>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let location = path.into_inner();
    match advisor.current(&location).await {
        Ok(data) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": data,
        }))),
        Err(e) => {
            error!("Weather lookup failed for {}: {}", location, e);
            Ok(HttpResponse::InternalServerError().json(json!({
                "error": "Failed to fetch weather data",
                "message": e.to_string(),
            })))
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranslateRequest {
    text: String,
    #[serde(default = "default_target_lang")]
    target_lang: String,
}

fn default_target_lang() -> String {
    "hi".to_string()
}

async fn translate_text(
    translator: web::Data<Translator>,
    body: web::Json<TranslateRequest>,
) -> Result<HttpResponse> {
    let body = body.into_inner();
    if body.text.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(json!({
            "error": "Text is required for translation"
        })));
    }

    let translated = translator.translate(&body.text, &body.target_lang).await;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "originalText": body.text,
        "translatedText": translated,
        "targetLanguage": body.target_lang,
    })))
}
