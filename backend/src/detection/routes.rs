use actix_multipart::Multipart;
use actix_web::{web, Error, HttpResponse};
use futures::{StreamExt, TryStreamExt};
use log::error;
use serde_json::json;
use std::io::Write;

use super::orchestrator::DetectionOrchestrator;
use super::MAX_IMAGE_BYTES;

/// `POST /api/detection/predict` — multipart form with an `image` file and an
/// optional `location` text field.
pub async fn predict(
    orchestrator: web::Data<DetectionOrchestrator>,
    mut payload: Multipart,
) -> Result<HttpResponse, Error> {
    let mut image_data: Vec<u8> = Vec::new();
    let mut location: Option<String> = None;

    while let Ok(Some(mut field)) = payload.try_next().await {
        let field_name = field.name().map(|n| n.to_string());
        match field_name.as_deref() {
            Some("image") => {
                if let Some(content_type) = field.content_type() {
                    if !content_type.essence_str().starts_with("image/") {
                        return Ok(HttpResponse::BadRequest().json(json!({
                            "error": "Only image files are allowed"
                        })));
                    }
                }
                while let Some(chunk) = field.next().await {
                    let data = chunk?;
                    if image_data.len() + data.len() > MAX_IMAGE_BYTES {
                        return Ok(HttpResponse::PayloadTooLarge().json(json!({
                            "error": "Image exceeds the 10 MB upload limit"
                        })));
                    }
                    image_data.write_all(&data)?;
                }
            }
            Some("location") => {
                let mut buffer = Vec::new();
                while let Some(chunk) = field.next().await {
                    buffer.write_all(&chunk?)?;
                }
                let text = String::from_utf8_lossy(&buffer).trim().to_string();
                if !text.is_empty() {
                    location = Some(text);
                }
            }
            _ => {
                // Drain unknown fields so the stream can advance.
                while let Some(chunk) = field.next().await {
                    chunk?;
                }
            }
        }
    }

    if image_data.is_empty() {
        return Ok(HttpResponse::BadRequest().json(json!({
            "error": "No image file provided"
        })));
    }

    match orchestrator.run(&image_data, location.as_deref()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(response)),
        Err(err) if err.is_client_error() => {
            Ok(HttpResponse::BadRequest().json(json!({ "error": err.to_string() })))
        }
        Err(err) => {
            error!("Disease detection failed: {}", err);
            Ok(HttpResponse::InternalServerError().json(json!({
                "error": "Disease detection failed",
                "message": err.to_string(),
            })))
        }
    }
}
