use actix_web::{web, HttpResponse, Result};
use log::error;
use serde_json::json;

use crate::db::user_repository::{RepositoryError, UserRepository};

use super::jwt::JwtService;
use super::middleware::AuthenticatedUser;
use super::models::{AuthResponse, LoginRequest, PublicUser, RegisterRequest, User};

pub async fn register(
    repo: web::Data<dyn UserRepository>,
    jwt_service: web::Data<JwtService>,
    body: web::Json<RegisterRequest>,
) -> Result<HttpResponse> {
    let body = body.into_inner();
    if body.email.trim().is_empty() || body.password.is_empty() || body.name.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(json!({
            "message": "All fields are required"
        })));
    }

    let password_hash = match bcrypt::hash(&body.password, bcrypt::DEFAULT_COST) {
        Ok(hash) => hash,
        Err(e) => {
            error!("Password hashing failed: {}", e);
            return Ok(HttpResponse::InternalServerError().json(json!({
                "message": "Internal server error"
            })));
        }
    };

    let user = User::new(body.email.trim().to_string(), body.name.trim().to_string(), password_hash);

    if let Err(RepositoryError::DuplicateEmail) = repo.insert(user.clone()).await {
        return Ok(HttpResponse::BadRequest().json(json!({
            "message": "User already exists"
        })));
    }

    let token = match jwt_service.generate_token(&user) {
        Ok(token) => token,
        Err(e) => {
            error!("Token generation failed for {}: {}", user.email, e);
            return Ok(HttpResponse::InternalServerError().json(json!({
                "message": "Internal server error"
            })));
        }
    };

    log::info!("Registered new user: {}", user.email);
    Ok(HttpResponse::Created().json(AuthResponse {
        message: "User created successfully".to_string(),
        token,
        user: PublicUser::from(&user),
    }))
}

pub async fn login(
    repo: web::Data<dyn UserRepository>,
    jwt_service: web::Data<JwtService>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse> {
    let body = body.into_inner();
    if body.email.trim().is_empty() || body.password.is_empty() {
        return Ok(HttpResponse::BadRequest().json(json!({
            "message": "Email and password are required"
        })));
    }

    let Some(user) = repo.find_by_email(body.email.trim()).await else {
        return Ok(unauthorized());
    };

    match bcrypt::verify(&body.password, &user.password_hash) {
        Ok(true) => {}
        Ok(false) => return Ok(unauthorized()),
        Err(e) => {
            error!("Password verification failed for {}: {}", user.email, e);
            return Ok(unauthorized());
        }
    }

    let token = match jwt_service.generate_token(&user) {
        Ok(token) => token,
        Err(e) => {
            error!("Token generation failed for {}: {}", user.email, e);
            return Ok(HttpResponse::InternalServerError().json(json!({
                "message": "Internal server error"
            })));
        }
    };

    log::info!("User logged in: {}", user.email);
    Ok(HttpResponse::Ok().json(AuthResponse {
        message: "Login successful".to_string(),
        token,
        user: PublicUser::from(&user),
    }))
}

pub async fn profile(
    user: AuthenticatedUser,
    repo: web::Data<dyn UserRepository>,
) -> Result<HttpResponse> {
    match repo.find_by_id(user.0).await {
        Some(record) => Ok(HttpResponse::Ok().json(json!({
            "user": PublicUser::from(&record)
        }))),
        None => Ok(HttpResponse::NotFound().json(json!({
            "message": "User not found"
        }))),
    }
}

fn unauthorized() -> HttpResponse {
    HttpResponse::Unauthorized().json(json!({ "message": "Invalid credentials" }))
}
