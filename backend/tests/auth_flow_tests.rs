use actix_web::{test, web, App};
use serde_json::{json, Value};
use std::sync::Arc;

use backend::auth::jwt::JwtService;
use backend::auth::middleware::AuthMiddleware;
use backend::db::user_repository::{InMemoryUserRepository, UserRepository};
use backend::routes::configure_routes;

fn test_services() -> (Arc<InMemoryUserRepository>, JwtService, AuthMiddleware) {
    let repo = Arc::new(InMemoryUserRepository::new());
    let jwt_service = JwtService::new("integration-test-secret");
    let middleware = AuthMiddleware::new(jwt_service.clone());
    (repo, jwt_service, middleware)
}

macro_rules! test_app {
    ($repo:expr, $jwt:expr, $middleware:expr) => {{
        let repo_data: web::Data<dyn UserRepository> =
            web::Data::from($repo.clone() as Arc<dyn UserRepository>);
        test::init_service(
            App::new()
                .app_data(repo_data)
                .app_data(web::Data::new($jwt.clone()))
                .configure(|cfg| configure_routes(cfg, ".".to_string(), $middleware.clone())),
        )
        .await
    }};
}

#[actix_web::test]
async fn register_issues_token_and_hides_password() {
    let (repo, jwt, middleware) = test_services();
    let app = test_app!(repo, jwt, middleware);

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({
            "email": "farmer@example.com",
            "password": "hunter2!",
            "name": "Test Farmer"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);

    let body: Value = test::read_body_json(resp).await;
    assert!(!body["token"].as_str().unwrap().is_empty());
    assert_eq!(body["user"]["email"], "farmer@example.com");
    assert_eq!(body["user"]["plan"], "free");
    assert!(body["user"].get("password").is_none());
    assert!(body["user"].get("passwordHash").is_none());
}

#[actix_web::test]
async fn duplicate_registration_is_rejected_without_growing_the_store() {
    let (repo, jwt, middleware) = test_services();
    let app = test_app!(repo, jwt, middleware);

    let payload = json!({
        "email": "farmer@example.com",
        "password": "hunter2!",
        "name": "Test Farmer"
    });

    let first = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(payload.clone())
        .to_request();
    assert_eq!(test::call_service(&app, first).await.status(), 201);
    assert_eq!(repo.count().await, 1);

    let second = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(payload)
        .to_request();
    let resp = test::call_service(&app, second).await;
    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "User already exists");
    assert_eq!(repo.count().await, 1);
}

#[actix_web::test]
async fn register_requires_all_fields() {
    let (repo, jwt, middleware) = test_services();
    let app = test_app!(repo, jwt, middleware);

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({
            "email": "farmer@example.com",
            "password": "hunter2!",
            "name": ""
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    assert_eq!(repo.count().await, 0);
}

#[actix_web::test]
async fn login_with_wrong_password_issues_no_token() {
    let (repo, jwt, middleware) = test_services();
    let app = test_app!(repo, jwt, middleware);

    let register = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({
            "email": "farmer@example.com",
            "password": "correct-password",
            "name": "Test Farmer"
        }))
        .to_request();
    assert_eq!(test::call_service(&app, register).await.status(), 201);

    let login = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({
            "email": "farmer@example.com",
            "password": "wrong-password"
        }))
        .to_request();
    let resp = test::call_service(&app, login).await;
    assert_eq!(resp.status(), 401);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Invalid credentials");
    assert!(body.get("token").is_none());
}

#[actix_web::test]
async fn login_with_unknown_email_is_unauthorized() {
    let (repo, jwt, middleware) = test_services();
    let app = test_app!(repo, jwt, middleware);

    let login = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({
            "email": "nobody@example.com",
            "password": "whatever"
        }))
        .to_request();
    assert_eq!(test::call_service(&app, login).await.status(), 401);
}

#[actix_web::test]
async fn login_token_round_trips_through_profile() {
    let (repo, jwt, middleware) = test_services();
    let app = test_app!(repo, jwt, middleware);

    let register = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({
            "email": "farmer@example.com",
            "password": "hunter2!",
            "name": "Test Farmer"
        }))
        .to_request();
    assert_eq!(test::call_service(&app, register).await.status(), 201);

    let login = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({
            "email": "farmer@example.com",
            "password": "hunter2!"
        }))
        .to_request();
    let resp = test::call_service(&app, login).await;
    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    let token = body["token"].as_str().unwrap().to_string();
    let user_id = body["user"]["id"].as_str().unwrap().to_string();

    let profile = test::TestRequest::get()
        .uri("/api/auth/profile")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, profile).await;
    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["user"]["id"], user_id.as_str());
    assert_eq!(body["user"]["email"], "farmer@example.com");
}

#[actix_web::test]
async fn profile_rejects_missing_and_tampered_tokens() {
    let (repo, jwt, middleware) = test_services();
    let app = test_app!(repo, jwt, middleware);

    let no_token = test::TestRequest::get()
        .uri("/api/auth/profile")
        .to_request();
    assert_eq!(test::call_service(&app, no_token).await.status(), 401);

    let register = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({
            "email": "farmer@example.com",
            "password": "hunter2!",
            "name": "Test Farmer"
        }))
        .to_request();
    let resp = test::call_service(&app, register).await;
    let body: Value = test::read_body_json(resp).await;
    let mut token = body["token"].as_str().unwrap().to_string();
    token.pop();
    token.push('x');

    let tampered = test::TestRequest::get()
        .uri("/api/auth/profile")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    assert_eq!(test::call_service(&app, tampered).await.status(), 403);
}
